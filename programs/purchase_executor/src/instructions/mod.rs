pub mod stage_purchasers;
pub mod reset_purchasers;
pub mod initialize_executor;
pub mod start_offer;
pub mod execute_purchase;
pub mod recover_unsold_tokens;
pub mod recover_erc20;
pub mod transfer_vested;
pub mod quote_allocation;
pub mod offer_status;
pub mod quote_vesting;

pub use stage_purchasers::*;
pub use reset_purchasers::*;
pub use initialize_executor::*;
pub use start_offer::*;
pub use execute_purchase::*;
pub use recover_unsold_tokens::*;
pub use recover_erc20::*;
pub use transfer_vested::*;
pub use quote_allocation::*;
pub use offer_status::*;
pub use quote_vesting::*;
