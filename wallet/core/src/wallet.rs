use crate::error::{WalletError, WalletResult};
use alloy_primitives::{Address, B256};
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

/// First account of the standard Ethereum BIP-44 tree.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// In-memory Ethereum keypair. Nothing here is ever written to disk.
pub struct Wallet {
    signer: PrivateKeySigner,
    mnemonic: Option<String>,
}

impl Wallet {
    /// Fresh wallet backed by a new 12-word English mnemonic.
    pub fn create_random() -> WalletResult<Self> {
        let mut entropy = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut entropy);
        let mnemonic = bip39::Mnemonic::from_entropy(&entropy)
            .map_err(|e| WalletError::Mnemonic(e.to_string()))?;
        Self::from_mnemonic(&mnemonic.to_string())
    }

    pub fn from_mnemonic(phrase: &str) -> WalletResult<Self> {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        bip39::Mnemonic::parse_in_normalized(bip39::Language::English, &phrase)
            .map_err(|e| WalletError::Mnemonic(e.to_string()))?;
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.as_str())
            .derivation_path(DEFAULT_DERIVATION_PATH)?
            .build()?;
        Ok(Self {
            signer,
            mnemonic: Some(phrase),
        })
    }

    pub fn from_private_key(key: &str) -> WalletResult<Self> {
        let bytes = B256::from_str(key.trim())
            .map_err(|e| WalletError::PrivateKey(e.to_string()))?;
        let signer = PrivateKeySigner::from_bytes(&bytes)
            .map_err(|e| WalletError::PrivateKey(e.to_string()))?;
        Ok(Self {
            signer,
            mnemonic: None,
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// `0x1234…abcd` rendering of the checksummed address.
    pub fn short_address(&self) -> String {
        short_address(&self.address())
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }

    pub fn private_key_hex(&self) -> String {
        self.signer.to_bytes().to_string()
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("has_mnemonic", &self.mnemonic.is_some())
            .finish()
    }
}

pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

pub fn parse_address(raw: &str) -> WalletResult<Address> {
    Address::from_str(raw.trim()).map_err(|e| WalletError::Address(format!("{raw}: {e}")))
}
