pub mod clock;
pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use time::format_hm;
