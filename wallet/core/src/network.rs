use crate::error::{WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

const MAINNET_RPC: &str = "https://cloudflare-eth.com";
const GOERLI_ALCHEMY_RPC: &str = "https://eth-goerli.g.alchemy.com/v2";
const HARDHAT_RPC: &str = "http://127.0.0.1:8545";

/// Chains the client knows how to reach without an explicit RPC URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Goerli,
    Hardhat,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Goerli, Network::Hardhat];

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Goerli => "goerli",
            Network::Hardhat => "hardhat",
        }
    }

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Goerli => 5,
            Network::Hardhat => 31337,
        }
    }

    /// Goerli goes through Alchemy and needs its API key.
    pub fn rpc_url(self, alchemy_key: Option<&str>) -> WalletResult<String> {
        match self {
            Network::Mainnet => Ok(MAINNET_RPC.to_string()),
            Network::Hardhat => Ok(HARDHAT_RPC.to_string()),
            Network::Goerli => {
                let key = alchemy_key
                    .filter(|k| !k.is_empty())
                    .ok_or(WalletError::MissingApiKey("ALCHEMY_KEY"))?;
                Ok(format!("{GOERLI_ALCHEMY_RPC}/{key}"))
            }
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|n| n.name() == wanted || n.chain_id().to_string() == wanted)
            .ok_or_else(|| WalletError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
