use std::rc::Rc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use slidereel_core::config::UiConfig;
use slidereel_core::{Axis, AppConfig, ReplayStrategy, SlideKey, Slider, SliderEvent, SwitchTarget};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::animation::{AnimationConfigExt, OffsetAnimator};
use crate::deck::Deck;
use crate::input::{Action, PointerAction};
use crate::stage::TerminalStage;
use crate::theme::Theme;

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub carousel: Rect,
    pub indicators: Option<Rect>,
    pub status: Option<Rect>,
}

/// Split the screen into the carousel, the indicator row and the status bar
pub fn screen_layout(area: Rect, ui: &UiConfig) -> ScreenLayout {
    let mut carousel = area;
    let status = split_bottom_row(&mut carousel, ui.show_status_bar);
    let indicators = split_bottom_row(&mut carousel, ui.show_indicators);

    ScreenLayout {
        carousel,
        indicators,
        status,
    }
}

/// Take the last row off `area`, leaving at least one row behind
fn split_bottom_row(area: &mut Rect, enabled: bool) -> Option<Rect> {
    if !enabled || area.height < 2 {
        return None;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(*area);
    *area = rows[0];
    Some(rows[1])
}

/// State of the terminal slideshow
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub deck: Deck,
    pub stage: Rc<TerminalStage>,
    pub slider: Slider,
    pub animator: OffsetAnimator,
    /// Events forwarded by the slider
    events: mpsc::UnboundedReceiver<SliderEvent>,
    /// Whether the app should quit
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Pointer is over the carousel
    pub hovered: bool,
    /// Slide membership changed and still has to reach the slider
    pending_refresh: bool,
    layout: ScreenLayout,
}

impl App {
    /// Build the slideshow for a terminal of size `area`
    pub fn new(deck: Deck, config: AppConfig, area: Rect) -> Result<Self> {
        let layout = screen_layout(area, &config.ui);
        let stage = TerminalStage::with_deck(&deck, layout.carousel.width, layout.carousel.height);

        let (tx, events) = mpsc::unbounded_channel();
        let slider = Slider::new(stage.clone(), &config, tx)?;
        let animator = OffsetAnimator::new(config.ui.animation.clone());

        Ok(Self {
            config,
            theme: Theme::default(),
            deck,
            stage,
            slider,
            animator,
            events,
            should_quit: false,
            status_message: None,
            pending_key: None,
            hovered: false,
            pending_refresh: false,
            layout,
        })
    }

    pub fn carousel_area(&self) -> Rect {
        self.layout.carousel
    }

    pub fn indicator_area(&self) -> Option<Rect> {
        self.layout.indicators
    }

    pub fn status_area(&self) -> Option<Rect> {
        self.layout.status
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn axis(&self) -> Axis {
        self.slider.projector().runtime().axis()
    }

    /// Number of slides taking part in the carousel
    pub fn active_count(&self) -> usize {
        self.slider.projector().slides(true).len()
    }

    /// Whether the next loop iteration should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.is_animating()
            || self.slider.projector().has_pending_frames()
            || self.pending_refresh
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        self.animator.config().frame_interval()
    }

    /// Adopt a new terminal size
    pub fn fit(&mut self, area: Rect) {
        self.layout = screen_layout(area, &self.config.ui);
        let carousel = self.layout.carousel;

        if self.stage.resize(carousel.width, carousel.height) {
            debug!(width = carousel.width, height = carousel.height, "Stage resized");
            self.slider.refresh_dimensions();
        }
    }

    /// Run one frame: pending refreshes, the slider's frame, autoplay, animation
    pub fn tick(&mut self, now: Instant) {
        if self.pending_refresh && self.slider.refresh_slides() {
            self.pending_refresh = false;
        }

        self.slider.run_frame();
        self.slider.poll_autoplay(now, self.hovered);
        self.drain_events();

        let target = self.slider.projector().current_offset();
        if self.slider.is_swiping() {
            self.animator.jump_to(target);
        } else {
            self.animator.animate_to(target, now);
        }
        self.animator.update(now);
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(%event, "Slider event");
            if event == SliderEvent::SlidesUpdated {
                let hidden = self.stage.hidden_count();
                if hidden > 0 {
                    self.set_status(format!("{} slide(s) hidden", hidden));
                }
            }
        }
    }

    pub async fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if action != Action::None {
            self.clear_status();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSlide => self.slider.switch_to(SwitchTarget::Relative(1)),
            Action::PrevSlide => self.slider.switch_to(SwitchTarget::Relative(-1)),
            Action::FirstSlide => self.slider.switch_to(SwitchTarget::Absolute(0)),
            Action::LastSlide => {
                let count = self.active_count();
                if count > 0 {
                    self.slider.switch_to(SwitchTarget::Absolute(count as i64 - 1));
                }
            }
            Action::JumpTo(position) => {
                if position < self.active_count() {
                    self.slider.switch_to(SwitchTarget::Absolute(position as i64));
                } else {
                    self.set_status(format!("No slide {}", position + 1));
                }
            }
            Action::ToggleRtl => self.toggle_rtl(),
            Action::CycleReplay => {
                let replay = self.slider.replay().next();
                self.slider.set_replay(replay);
                self.set_status(format!("Replay: {}", replay));
            }
            Action::HideSlide => self.hide_current(),
            Action::ShowAll => {
                let shown = self.stage.show_all();
                if shown > 0 {
                    self.pending_refresh = true;
                    self.set_status(format!("{} slide(s) shown again", shown));
                }
            }
            Action::ToggleAutoplay => {
                if !self.slider.autoplay().is_enabled() {
                    self.set_status("Autoplay needs an interval (timedTransitionInterval)");
                } else if self.slider.toggle_autoplay() {
                    self.set_status("Autoplay running");
                } else {
                    self.set_status("Autoplay paused");
                }
            }
            Action::Reload => {
                if let Err(e) = self.reload().await {
                    self.set_status(format!("Reload failed: {}", e));
                }
            }
            Action::None => {}
        }

        Ok(())
    }

    fn toggle_rtl(&mut self) {
        if self.axis() == Axis::Vertical {
            self.set_status("Direction only applies to horizontal sliders");
            return;
        }

        let is_rtl = !self.slider.projector().runtime().is_rtl();
        self.stage.set_rtl(is_rtl);
        self.slider.refresh_direction(is_rtl);
        self.set_status(if is_rtl { "Right-to-left" } else { "Left-to-right" });
    }

    fn hide_current(&mut self) {
        let Some(key) = self.current_key() else {
            return;
        };

        if self.active_count() <= 1 {
            self.set_status("The last visible slide stays");
            return;
        }

        self.stage.set_hidden(key, true);
        self.pending_refresh = true;
        info!(%key, "Slide hidden");
    }

    fn current_key(&self) -> Option<SlideKey> {
        self.slider.projector().current_slide().map(|slide| slide.key())
    }

    /// Read the deck again and swap in its slides
    pub async fn reload(&mut self) -> Result<()> {
        let deck = self.deck.reload().await?;
        if deck.is_empty() {
            return Err(anyhow!("deck has no slides"));
        }

        self.stage.load_deck(&deck);
        self.set_status(format!("Reloaded {} slide(s)", deck.len()));
        self.deck = deck;
        self.pending_refresh = true;
        Ok(())
    }

    /// Feed pointer activity to the swipe handling and hover tracking
    pub fn handle_pointer(&mut self, pointer: PointerAction) {
        match pointer {
            PointerAction::Press { column, row } => {
                if self.layout.carousel.contains(Position::new(column, row)) {
                    let position = self.along_axis(column, row);
                    self.slider.swipe_start(position);
                }
            }
            PointerAction::Drag { column, row } => {
                let position = self.along_axis(column, row);
                self.slider.swipe_progress(position);
            }
            PointerAction::Release => self.slider.swipe_end(),
            PointerAction::Move { column, row } => {
                self.hovered = self.layout.carousel.contains(Position::new(column, row));
                if !self.hovered {
                    // Leaving the carousel ends a drag
                    self.slider.swipe_end();
                }
            }
            PointerAction::None => {}
        }
    }

    fn along_axis(&self, column: u16, row: u16) -> f64 {
        match self.axis() {
            Axis::Horizontal => f64::from(column),
            Axis::Vertical => f64::from(row),
        }
    }

    /// Replay strategy shown in the status bar
    pub fn replay(&self) -> ReplayStrategy {
        self.slider.replay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app_with(config: AppConfig) -> App {
        App::new(Deck::sample(), config, Rect::new(0, 0, 40, 11)).unwrap()
    }

    fn instant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.ui.animation.smooth_enabled = false;
        config
    }

    fn settle(app: &mut App) {
        let now = Instant::now();
        for _ in 0..8 {
            app.tick(now);
        }
    }

    #[test]
    fn test_layout_reserves_bottom_rows() {
        let mut ui = UiConfig::default();
        let layout = screen_layout(Rect::new(0, 0, 40, 11), &ui);
        assert_eq!(layout.carousel, Rect::new(0, 0, 40, 9));
        assert_eq!(layout.indicators, Some(Rect::new(0, 9, 40, 1)));
        assert_eq!(layout.status, Some(Rect::new(0, 10, 40, 1)));

        ui.show_status_bar = false;
        let layout = screen_layout(Rect::new(0, 0, 40, 11), &ui);
        assert_eq!(layout.carousel.height, 10);
        assert_eq!(layout.indicators, Some(Rect::new(0, 10, 40, 1)));
        assert_eq!(layout.status, None);

        ui.show_indicators = false;
        let layout = screen_layout(Rect::new(0, 0, 40, 11), &ui);
        assert_eq!(layout.carousel.height, 11);
        assert_eq!(layout.indicators, None);
    }

    #[test]
    fn test_tiny_screen_keeps_carousel_row() {
        let layout = screen_layout(Rect::new(0, 0, 40, 2), &UiConfig::default());
        assert_eq!(layout.carousel.height, 1);
        assert!(layout.status.is_some());
        assert_eq!(layout.indicators, None);
    }

    #[tokio::test]
    async fn test_navigation() {
        let mut app = app_with(instant_config());
        settle(&mut app);

        app.handle_action(Action::NextSlide).await.unwrap();
        settle(&mut app);
        app.handle_action(Action::NextSlide).await.unwrap();
        settle(&mut app);
        assert_eq!(app.slider.projector().current_slide_index(), 2);
        assert_eq!(app.animator.current(), -80.0);

        app.handle_action(Action::LastSlide).await.unwrap();
        settle(&mut app);
        assert_eq!(app.slider.projector().current_slide_index(), 4);

        app.handle_action(Action::JumpTo(7)).await.unwrap();
        assert_eq!(app.status_message.as_deref(), Some("No slide 8"));

        app.handle_action(Action::FirstSlide).await.unwrap();
        settle(&mut app);
        assert_eq!(app.animator.current(), 0.0);
    }

    #[tokio::test]
    async fn test_hide_and_show() {
        let mut app = app_with(instant_config());
        settle(&mut app);

        app.handle_action(Action::HideSlide).await.unwrap();
        settle(&mut app);
        assert_eq!(app.active_count(), 4);
        assert!(app.stage.slide(SlideKey(0)).unwrap().is_hidden());

        app.handle_action(Action::ShowAll).await.unwrap();
        settle(&mut app);
        assert_eq!(app.active_count(), 5);
    }

    #[tokio::test]
    async fn test_cycle_replay_and_direction() {
        let mut app = app_with(instant_config());
        settle(&mut app);

        app.handle_action(Action::CycleReplay).await.unwrap();
        assert_eq!(app.replay(), ReplayStrategy::Loop);

        app.handle_action(Action::ToggleRtl).await.unwrap();
        app.handle_action(Action::NextSlide).await.unwrap();
        settle(&mut app);
        assert!(app.slider.projector().runtime().is_rtl());
        assert_eq!(app.animator.current(), 40.0);
    }

    #[tokio::test]
    async fn test_autoplay_toggle_needs_interval() {
        let mut app = app_with(instant_config());
        app.handle_action(Action::ToggleAutoplay).await.unwrap();
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|msg| msg.starts_with("Autoplay needs")));

        let mut config = instant_config();
        config.autoplay.interval_secs = 1.0;
        let mut app = app_with(config);
        app.handle_action(Action::ToggleAutoplay).await.unwrap();
        assert_eq!(app.status_message.as_deref(), Some("Autoplay paused"));
    }

    #[test]
    fn test_resize_remeasures() {
        let mut app = app_with(instant_config());
        settle(&mut app);

        app.fit(Rect::new(0, 0, 60, 11));
        settle(&mut app);

        assert_eq!(app.carousel_area().width, 60);
        assert_eq!(app.slider.projector().slide_length(), 60.0);
    }

    #[test]
    fn test_drag_moves_strip_immediately() {
        let mut config = AppConfig::default();
        config.swipe.enabled = true;
        let mut app = app_with(config);
        settle(&mut app);

        app.handle_pointer(PointerAction::Press { column: 30, row: 2 });
        app.handle_pointer(PointerAction::Drag { column: 25, row: 2 });
        app.tick(Instant::now());
        assert_eq!(app.animator.current(), -5.0);

        app.handle_pointer(PointerAction::Release);
        assert!(!app.slider.is_swiping());
    }

    #[test]
    fn test_smooth_switch_needs_fast_updates() {
        let mut app = app_with(AppConfig::default());
        let start = Instant::now();
        for _ in 0..4 {
            app.tick(start);
        }

        app.slider.switch("+1");
        for _ in 0..4 {
            app.tick(start);
        }
        assert!(app.needs_fast_update());

        app.tick(start + Duration::from_secs(1));
        assert!(!app.needs_fast_update());
        assert_eq!(app.animator.current(), -40.0);
    }
}
