//! File I/O operations for schedule persistence.
//!
//! This module handles:
//! - Saving schedules with atomic writes
//! - Loading schedules with format validation

mod load;
mod save;

pub use load::load_schedule;
pub use save::save_schedule;
