pub mod clock;
pub mod eastern;
pub mod error;
pub mod models;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
