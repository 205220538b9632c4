pub mod allocations;
pub mod executor;
pub mod grant;

pub use allocations::*;
pub use executor::*;
pub use grant::*;
