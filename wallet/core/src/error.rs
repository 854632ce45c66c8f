use alloy_signer_local::LocalSignerError;
use campaign_core::CampaignError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    Mnemonic(String),

    #[error("invalid private key: {0}")]
    PrivateKey(String),

    #[error("invalid address: {0}")]
    Address(String),

    #[error("signer error: {0}")]
    Signer(#[from] LocalSignerError),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("{0} is required for this network")]
    MissingApiKey(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("rpc returned neither result nor error for {0}")]
    EmptyResponse(String),

    #[error("malformed quantity: {0}")]
    Quantity(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("unexpected backend payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Campaign(#[from] CampaignError),
}

impl WalletError {
    /// Transport failures, 5xx responses and server-side JSON-RPC errors
    /// (-32000..=-32099) are worth retrying; auth, method and input errors
    /// are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            WalletError::Http(_) | WalletError::EmptyResponse(_) => true,
            WalletError::HttpStatus { status, .. } => (500..600).contains(status),
            WalletError::Rpc { code, .. } => (-32099..=-32000).contains(code),
            _ => false,
        }
    }
}

pub type WalletResult<T> = Result<T, WalletError>;
