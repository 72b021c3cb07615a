use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
    Frame,
};
use slidereel_core::Axis;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::stage::TerminalSlide;
use crate::theme::Theme;

/// Leading edge of a slide along the layout axis, relative to the carousel
///
/// Slides sit one length apart in strip order; the strip offset moves all of
/// them and a slide's own offset (loop corrections) moves it alone. Horizontal
/// right-to-left strips grow towards negative positions.
pub fn slide_start(
    position: usize,
    length: f64,
    strip_offset: f64,
    slide_offset: f64,
    mirrored: bool,
) -> f64 {
    let base = position as f64 * length;
    let base = if mirrored { -base } else { base };
    base + strip_offset + slide_offset
}

/// Rect of `width` x `height` centered in `outer`, shrunk to fit
pub fn center_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - width) / 2,
        outer.y + (outer.height - height) / 2,
        width,
        height,
    )
}

/// An active slide ready to be drawn
pub struct SlideView<'a> {
    pub slide: Rc<TerminalSlide>,
    pub start: f64,
    pub is_current: bool,
    pub label: Option<&'a str>,
}

pub fn slide_views(app: &App) -> Vec<SlideView<'_>> {
    let projector = app.slider.projector();
    let runtime = projector.runtime();
    let mirrored = runtime.is_horizontal() && runtime.is_rtl();
    let length = projector.slide_length();
    let strip_offset = app.animator.current();

    projector
        .slides(true)
        .into_iter()
        .enumerate()
        .filter_map(|(position, slide)| {
            let terminal = app.stage.slide(slide.key())?;
            Some(SlideView {
                slide: terminal,
                start: slide_start(position, length, strip_offset, slide.offset(), mirrored),
                is_current: slide.is_current(),
                label: app.slider.state().label(slide.key()),
            })
        })
        .collect()
}

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let views = slide_views(app);

        if views.is_empty() {
            let empty = Paragraph::new("No visible slides")
                .style(Style::default().fg(app.theme.grey0).bg(app.theme.bg0));
            frame.render_widget(empty, area);
            return;
        }

        render_views(frame.buffer_mut(), area, &views, app.axis(), &app.theme);
    }
}

/// Draw every view that overlaps `area`, clipped to it
pub fn render_views(buf: &mut Buffer, area: Rect, views: &[SlideView<'_>], axis: Axis, theme: &Theme) {
    let extent = match axis {
        Axis::Horizontal => f64::from(area.width),
        Axis::Vertical => f64::from(area.height),
    };

    for view in views {
        let shift = view.start.round();
        if !shift.is_finite() || shift >= extent || shift <= -extent {
            continue;
        }

        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, area.height));
        draw_slide(&mut scratch, view, theme);
        blit(&scratch, buf, area, axis, shift as i32);
    }
}

fn draw_slide(buf: &mut Buffer, view: &SlideView<'_>, theme: &Theme) {
    let area = *buf.area();
    let content = view.slide.content();
    let border = if view.is_current { theme.current } else { theme.border };

    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg0));

    if let Some(title) = &content.title {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(label) = view.label {
        block = block.title_bottom(
            Line::from(Span::styled(format!(" {} ", label), Style::default().fg(theme.grey0)))
                .right_aligned(),
        );
    }

    let inner = block.inner(area);
    block.render(area, buf);

    let widest = content
        .lines
        .iter()
        .map(|line| line.as_str().width())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest).unwrap_or(u16::MAX);
    let height = u16::try_from(content.lines.len()).unwrap_or(u16::MAX);

    let lines: Vec<Line> = content.lines.iter().map(|line| Line::raw(line.as_str())).collect();
    Paragraph::new(lines)
        .style(Style::default().fg(theme.fg0))
        .render(center_rect(inner, width, height), buf);
}

/// Copy `scratch` onto `buf` at `area`, displaced by `shift` along `axis`
fn blit(scratch: &Buffer, buf: &mut Buffer, area: Rect, axis: Axis, shift: i32) {
    let (width, height) = (i32::from(area.width), i32::from(area.height));

    for y in 0..area.height {
        for x in 0..area.width {
            let (tx, ty) = match axis {
                Axis::Horizontal => (i32::from(x) + shift, i32::from(y)),
                Axis::Vertical => (i32::from(x), i32::from(y) + shift),
            };
            if tx < 0 || ty < 0 || tx >= width || ty >= height {
                continue;
            }

            let target = (area.x + tx as u16, area.y + ty as u16);
            if let (Some(src), Some(dst)) = (scratch.cell((x, y)), buf.cell_mut(target)) {
                *dst = src.clone();
            }
        }
    }
}
