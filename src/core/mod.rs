pub mod ids;
pub mod services;
pub mod time;
pub mod tracker;

pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::FinanceTracker;
