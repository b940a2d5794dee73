pub mod clock_state;
pub mod session;
pub mod shift;

pub use clock_state::ClockState;
pub use session::Session;
pub use shift::Shift;
