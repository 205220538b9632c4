pub mod digest;
pub mod rate;
pub mod time;
pub mod vesting;
