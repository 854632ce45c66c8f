mod campaigns;
mod error;
mod network;
mod rpc;
mod wallet;

pub use campaigns::{builtin_campaigns, CampaignClient};
pub use error::{WalletError, WalletResult};
pub use network::Network;
pub use rpc::{format_ether, parse_quantity, RpcClient};
pub use wallet::{parse_address, short_address, Wallet, DEFAULT_DERIVATION_PATH};

pub use alloy_primitives::{Address, U256};
pub use campaign_core::Campaign;
