mod carousel;
mod indicators;
mod status_bar;

pub use carousel::{center_rect, render_views, slide_start, slide_views, CarouselWidget, SlideView};
pub use indicators::{indicator_spans, IndicatorsWidget};
pub use status_bar::{status_text, StatusBarWidget};
