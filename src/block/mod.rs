//! Production units and the production schedule

mod data;
mod schedule;
pub mod loader;

pub use data::Block;
pub use schedule::{Period, ScheduleEntry};
pub use loader::{load_blocks, load_blocks_from_reader, load_schedule, load_schedule_from_reader};
