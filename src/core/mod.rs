pub mod host;
pub mod ticker;
pub mod tracker;

pub use host::HostOptions;
pub use ticker::{Tick, Ticker};
pub use tracker::Tracker;
