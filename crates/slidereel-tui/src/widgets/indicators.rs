use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use slidereel_core::{plugins::SlideState, SlideKey};

use crate::app::App;
use crate::theme::Theme;

const CURRENT_MARKER: &str = "●";
const MARKER: &str = "○";

fn marker_style(state: &SlideState, key: SlideKey, label: &str, theme: &Theme) -> Style {
    match label {
        "current" => Style::default().fg(theme.current).add_modifier(Modifier::BOLD),
        "current-p1" | "current-n1" => Style::default().fg(theme.fg1),
        _ if state.first == Some(key) || state.last == Some(key) => Style::default().fg(theme.accent),
        _ => Style::default().fg(theme.grey0),
    }
}

/// One marker per active slide, in strip order (reversed when `mirrored`)
pub fn indicator_spans(state: &SlideState, theme: &Theme, mirrored: bool) -> Vec<Span<'static>> {
    let mut markers: Vec<Span<'static>> = state
        .positions
        .iter()
        .map(|(key, label)| {
            let symbol = if label == "current" { CURRENT_MARKER } else { MARKER };
            Span::styled(symbol, marker_style(state, *key, label, theme))
        })
        .collect();

    if mirrored {
        markers.reverse();
    }

    let mut spans = Vec::with_capacity(markers.len() * 2);
    for marker in markers {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(marker);
    }
    spans
}

pub struct IndicatorsWidget;

impl IndicatorsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let runtime = app.slider.projector().runtime();
        let mirrored = runtime.is_horizontal() && runtime.is_rtl();

        let spans = indicator_spans(app.slider.state(), &app.theme, mirrored);
        let line = Line::from(spans).centered();
        let indicators = Paragraph::new(line).style(Style::default().bg(app.theme.bg0));
        frame.render_widget(indicators, area);
    }
}
