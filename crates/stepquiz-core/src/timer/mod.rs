mod countdown;

pub use countdown::Countdown;
