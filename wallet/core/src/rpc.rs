use crate::error::{WalletError, WalletResult};
use crate::wallet::parse_address;
use alloy_primitives::{utils, Address, U256};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RpcReply<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Minimal Ethereum JSON-RPC 2.0 client over HTTP.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> WalletResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("rpc {} id={} -> {}", method, id, self.url);
        let res = self
            .http
            .post(&self.url)
            .json(&json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(WalletError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: RpcReply<T> = res.json().await?;
        match (reply.result, reply.error) {
            (_, Some(err)) => Err(WalletError::Rpc {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(WalletError::EmptyResponse(method.to_string())),
        }
    }

    /// Balance in wei at the latest block.
    pub async fn get_balance(&self, address: Address) -> WalletResult<U256> {
        let raw: String = self
            .call("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?;
        parse_quantity(&raw)
    }

    pub async fn chain_id(&self) -> WalletResult<u64> {
        let raw: String = self.call("eth_chainId", json!([])).await?;
        let id = parse_quantity(&raw)?;
        u64::try_from(id).map_err(|_| WalletError::Quantity(raw))
    }

    /// Accounts the node manages itself, e.g. the funded dev accounts of a
    /// local hardhat node.
    pub async fn accounts(&self) -> WalletResult<Vec<Address>> {
        let raw: Vec<String> = self.call("eth_accounts", json!([])).await?;
        raw.iter().map(|a| parse_address(a)).collect()
    }
}

/// Decodes a JSON-RPC hex quantity such as `0x1bc16d674ec80000`.
pub fn parse_quantity(raw: &str) -> WalletResult<U256> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::Quantity(raw.to_string()))?;
    if digits.is_empty() {
        return Err(WalletError::Quantity(raw.to_string()));
    }
    U256::from_str_radix(digits, 16).map_err(|_| WalletError::Quantity(raw.to_string()))
}

pub fn format_ether(wei: U256) -> String {
    utils::format_ether(wei)
}
