use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

const HELP_HINT: &str = " q:quit h/l:slide m:replay d:dir x:hide u:show ";

/// Slider summary: position, strip offset, replay, direction, state flags
pub fn status_text(app: &App) -> String {
    let projector = app.slider.projector();
    let runtime = projector.runtime();

    let position = projector
        .current_active_position()
        .map_or_else(|| "-".to_string(), |position| (position + 1).to_string());

    let direction = if !runtime.is_horizontal() {
        "vertical"
    } else if runtime.is_rtl() {
        "rtl"
    } else {
        "ltr"
    };

    let autoplay = app.slider.autoplay();
    let autoplay = match (autoplay.is_enabled(), autoplay.is_paused()) {
        (false, _) => "",
        (true, false) => " | autoplay",
        (true, true) => " | autoplay paused",
    };

    format!(
        " {}/{} | offset {:.0} | {} | {} | {}{}",
        position,
        app.active_count(),
        // Avoid printing "-0"
        projector.current_offset() + 0.0,
        app.replay(),
        direction,
        app.slider.state(),
        autoplay
    )
}

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let (text, fg) = match &app.status_message {
            Some(message) => (format!(" {}", message), theme.warning),
            None => (status_text(app), theme.fg0),
        };

        let padding = usize::from(area.width)
            .saturating_sub(text.as_str().width() + HELP_HINT.width());

        let line = Line::from(vec![
            Span::styled(text, Style::default().fg(fg).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(HELP_HINT, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
