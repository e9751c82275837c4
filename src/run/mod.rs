//! Run orchestration: event interpretation and the drive loop.

pub mod driver;
pub mod events;

pub use driver::{DeltaSink, RunDriver};
pub use events::{interpret, RunEvent};
