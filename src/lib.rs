mod config;
mod requests;

mod grid_renderer;
mod session_extractor;
mod text_manipulators;
mod week_partition;

pub use config::ScrapeConfig;
pub use grid_renderer::{CalendarRenderer, Cell, WeekGrid};
pub use requests::RequestClient;
pub use session_extractor::{Session, SessionExtractor};
pub use week_partition::{TimeAxis, group_by_week, week_start};
