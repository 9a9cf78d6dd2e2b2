pub mod helper;
pub mod parse;
pub mod poll;
pub mod sysfs;
pub mod tracker;

pub use helper::{invoke, HelperResult, HELPER_OUTPUT_CAP};
pub use poll::{poll_loop, run_cycle, PollSettings};
pub use tracker::{ChangeReport, Tracker, CRITICAL_PERCENT};
