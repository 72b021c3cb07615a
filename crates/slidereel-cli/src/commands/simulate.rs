use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use slidereel_core::event::{EventLog, SliderEvent};
use slidereel_core::host::MemoryContainer;
use slidereel_core::{AppConfig, Slider};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of slides
    #[arg(short = 'n', long, default_value_t = 5)]
    pub slides: usize,

    /// Container length along the layout axis
    #[arg(short, long, default_value_t = 100.0)]
    pub length: f64,

    /// Replay strategy (none, loop, rewind)
    #[arg(long)]
    pub replay: Option<String>,

    /// Right-to-left text direction
    #[arg(long)]
    pub rtl: bool,

    /// Stack slides vertically
    #[arg(long)]
    pub vertical: bool,

    /// Zero-based slides to hide before the first switch
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<usize>,

    /// Schedule every target before running any frame
    #[arg(long)]
    pub batch: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Switch requests in order: "2", "+1", "-3"
    #[arg(allow_negative_numbers = true)]
    pub targets: Vec<String>,
}

/// Per-slide displacement applied by the loop projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    pub slide: u64,
    pub offset: f64,
}

/// Engine state after a request settled
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub request: String,
    pub frames: usize,
    pub index: i64,
    pub offset: f64,
    pub current: Option<u64>,
    pub corrections: Vec<Correction>,
    pub events: Vec<String>,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub slides: usize,
    pub active: usize,
    pub length: f64,
    pub replay: String,
    pub rtl: bool,
    pub orientation: String,
    pub steps: Vec<Step>,
}

fn apply_args(args: &SimulateArgs, config: &mut AppConfig) -> Result<()> {
    if let Some(replay) = &args.replay {
        config.apply_override("replayStrategy", replay)?;
    }
    if args.rtl {
        config.apply_override("rtl", "true")?;
    }
    if args.vertical {
        config.apply_override("orientation", "vertical")?;
    }
    Ok(())
}

fn snapshot(slider: &Slider, log: &EventLog, request: String, frames: usize) -> Step {
    let projector = slider.projector();
    let events = log.take().iter().map(SliderEvent::to_string).collect();

    Step {
        request,
        frames,
        index: projector.current_slide_index(),
        offset: projector.current_offset(),
        current: projector.current_slide().map(|slide| slide.key().0),
        corrections: projector
            .slides(false)
            .into_iter()
            .filter(|slide| slide.offset() != 0.0)
            .map(|slide| Correction {
                slide: slide.key().0,
                offset: slide.offset(),
            })
            .collect(),
        events,
        state: slider.state().to_string(),
    }
}

/// Run the requested switches against an in-memory host
pub fn simulate(args: &SimulateArgs, mut config: AppConfig) -> Result<Simulation> {
    if !(args.length.is_finite() && args.length >= 0.0) {
        bail!("Length must be a non-negative number, got {}", args.length);
    }
    apply_args(args, &mut config)?;

    let container = MemoryContainer::with_slides(args.slides, args.length, args.length);
    for &index in &args.hide {
        match container.slide(index) {
            Some(slide) => slide.set_visible(false),
            None => bail!("Cannot hide slide {}: only {} slides", index, args.slides),
        }
    }

    let log = EventLog::new();
    let mut slider = Slider::new(container, &config, log.clone())?;
    let frames = slider.flush();

    let mut steps = vec![snapshot(&slider, &log, "init".to_string(), frames)];

    if args.batch {
        for target in &args.targets {
            slider.switch(target);
        }
        let frames = slider.flush();
        steps.push(snapshot(&slider, &log, args.targets.join(" "), frames));
    } else {
        for target in &args.targets {
            slider.switch(target);
            let frames = slider.flush();
            steps.push(snapshot(&slider, &log, target.clone(), frames));
        }
    }

    let runtime = slider.projector().runtime();
    Ok(Simulation {
        slides: args.slides,
        active: slider.projector().slides(true).len(),
        length: args.length,
        replay: slider.replay().to_string(),
        rtl: runtime.is_rtl(),
        orientation: runtime.axis().to_string(),
        steps,
    })
}

fn print_text(simulation: &Simulation) {
    println!(
        "slides={} active={} length={} replay={} direction={} orientation={}",
        simulation.slides,
        simulation.active,
        simulation.length,
        simulation.replay,
        if simulation.rtl { "rtl" } else { "ltr" },
        simulation.orientation
    );

    for step in &simulation.steps {
        let current = step
            .current
            .map_or_else(|| "-".to_string(), |key| format!("#{}", key));
        println!(
            "{:<8} frames={:<2} index={:<4} offset={:<8} current={:<4} {}",
            step.request, step.frames, step.index, step.offset, current, step.state
        );

        if !step.corrections.is_empty() {
            let corrections: Vec<String> = step
                .corrections
                .iter()
                .map(|c| format!("#{}={}", c.slide, c.offset))
                .collect();
            println!("         corrections: {}", corrections.join(" "));
        }
        if !step.events.is_empty() {
            println!("         events: {}", step.events.join(", "));
        }
    }
}

pub fn run(args: &SimulateArgs, config: AppConfig) -> Result<()> {
    let simulation = simulate(args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&simulation)?);
    } else {
        print_text(&simulation);
    }

    Ok(())
}
