pub mod config;
pub mod entry;
pub mod grid;
pub mod month;

pub use config::{ChronosConfig, ClockifyConfig, GitlabConfig, LinearConfig};
pub use entry::{ActivityItem, ReportEntry, TimeEntry};
pub use grid::TaskGrid;
pub use month::ReportMonth;
