use campaign_core::CampaignError;
use axum::{extract::Path, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use wallet_core::{parse_address, CampaignClient, RpcClient, WalletError, U256};

const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn fake_node(Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let reply = match req["method"].as_str() {
        Some("eth_getBalance") => {
            assert_eq!(req["params"][1], "latest");
            json!({"jsonrpc": "2.0", "id": id, "result": "0x21e19e0c9bab2400000"})
        }
        Some("eth_chainId") => json!({"jsonrpc": "2.0", "id": id, "result": "0x7a69"}),
        Some("eth_accounts") => json!({"jsonrpc": "2.0", "id": id, "result": [DEV_ADDRESS.to_lowercase()]}),
        _ => json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32601, "message": "method not found"}}),
    };
    Json(reply)
}

#[tokio::test]
async fn rpc_client_reads_balance_chain_and_accounts() {
    let addr = serve(Router::new().route("/", post(fake_node))).await;
    let rpc = RpcClient::new(format!("http://{addr}/"));

    let balance = rpc.get_balance(parse_address(DEV_ADDRESS).unwrap()).await.unwrap();
    assert_eq!(balance, U256::from(10_000_000_000_000_000_000_000u128));

    assert_eq!(rpc.chain_id().await.unwrap(), 31337);

    let accounts = rpc.accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].to_string(), DEV_ADDRESS);
}

#[tokio::test]
async fn rpc_errors_surface_code_and_message() {
    let app = Router::new().route(
        "/",
        post(|Json(req): Json<Value>| async move {
            Json(json!({"jsonrpc": "2.0", "id": req["id"], "error": {"code": -32000, "message": "header not found"}}))
        }),
    );
    let addr = serve(app).await;
    let rpc = RpcClient::new(format!("http://{addr}/"));

    let err = rpc.chain_id().await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        WalletError::Rpc { code, message } => {
            assert_eq!(code, -32000);
            assert_eq!(message, "header not found");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

fn fake_backend() -> Router {
    Router::new()
        .route(
            "/campaign-list",
            get(|| async {
                Json(json!([
                    {"name": "Name 1", "goal": 200, "raised": 101, "id": 1},
                    {"name": "Name 2", "goal": 20, "raised": 1, "id": 2}
                ]))
            }),
        )
        .route(
            "/campaign-list/:id",
            get(|Path(id): Path<String>| async move {
                if id == "1" {
                    Json(json!({"name": "Name 1", "goal": 200, "raised": 101, "id": 1}))
                } else {
                    Json(json!({"error": "ENOENT"}))
                }
            }),
        )
}

#[tokio::test]
async fn campaign_client_lists_and_fetches() {
    let addr = serve(fake_backend()).await;
    let client = CampaignClient::new(format!("http://{addr}/"));

    let list = client.list().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name(), Some("Name 2"));

    let one = client.get("1").await.unwrap();
    assert_eq!(one.id().unwrap().as_str(), "1");

    let missing = client.get("9").await.unwrap_err();
    assert!(matches!(missing, WalletError::Backend(code) if code == "ENOENT"));
}

#[tokio::test]
async fn unreachable_backend_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = CampaignClient::new(format!("http://{addr}")).list().await.unwrap_err();
    assert!(matches!(err, WalletError::Http(_)));
}

#[tokio::test]
async fn rejected_calls_are_not_retryable() {
    let app = Router::new()
        .route(
            "/",
            post(|Json(req): Json<Value>| async move {
                Json(json!({"jsonrpc": "2.0", "id": req["id"], "error": {"code": -32601, "message": "method not found"}}))
            }),
        )
        .route(
            "/locked",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "missing api key") }),
        );
    let addr = serve(app).await;

    let err = RpcClient::new(format!("http://{addr}/")).chain_id().await.unwrap_err();
    assert!(matches!(err, WalletError::Rpc { code: -32601, .. }));
    assert!(!err.is_retryable());

    let err = RpcClient::new(format!("http://{addr}/locked"))
        .chain_id()
        .await
        .unwrap_err();
    match &err {
        WalletError::HttpStatus { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "missing api key");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unsafe_campaign_ids_never_reach_the_backend() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = CampaignClient::new(format!("http://{addr}"));

    for bad in ["../campaign-list", "1?x=2", "a/b", "1#frag", ""] {
        let err = client.get(bad).await.unwrap_err();
        assert!(
            matches!(err, WalletError::Campaign(CampaignError::InvalidId(_))),
            "{bad:?} gave {err:?}"
        );
    }
}
