use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;

use slidereel_core::AppConfig;
use slidereel_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    widgets::{CarouselWidget, IndicatorsWidget, StatusBarWidget},
    App, Deck,
};

pub async fn run(config: AppConfig, deck_path: Option<PathBuf>) -> Result<()> {
    let deck = match &deck_path {
        Some(path) => Deck::load(path).await?,
        None => Deck::sample(),
    };
    if deck.is_empty() {
        bail!("Deck has no slides");
    }

    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Slidereel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, deck, config, &keymap).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    deck: Deck,
    config: AppConfig,
    keymap: &Keymap,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(deck, config, Rect::new(0, 0, size.width, size.height))?;
    info!(slides = app.deck.len(), "Presenting deck");

    let event_handler = EventHandler::with_animation_tick(app.config.ui.tick_rate_ms, app.frame_interval());

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = true;

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            CarouselWidget::render(frame, app.carousel_area(), &app);
            if let Some(area) = app.indicator_area() {
                IndicatorsWidget::render(frame, area, &app);
            }
            if let Some(area) = app.status_area() {
                StatusBarWidget::render(frame, area, &app);
            }
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, keymap);
                    app.handle_action(action).await?;
                }
                AppEvent::Mouse(mouse) => app.handle_pointer(handle_mouse_event(mouse)),
                AppEvent::Resize(width, height) => app.fit(Rect::new(0, 0, width, height)),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
