use crate::webserver::{state::AppState, utils::error_response};
use axum::{http::StatusCode, response::Response, Router};
use std::sync::Arc;

pub mod metrics;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .nest("/metrics", metrics::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, WebserverConfig};
    use crate::poller::MetricsHub;
    use crate::rpc::testing::ScriptedGateway;
    use crate::rpc::{
        RpcError, GET_EPOCH_INFO, GET_LATEST_BLOCKHASH, GET_SLOT, GET_SUPPLY, GET_VOTE_ACCOUNTS,
    };
    use crate::shutdown::Shutdown;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tower::ServiceExt;

    struct Harness {
        router: Router,
        state: Arc<AppState>,
        gateway: Arc<ScriptedGateway>,
        shutdown: Arc<Shutdown>,
        tasks: Vec<JoinHandle<()>>,
    }

    impl Harness {
        fn start(gateway: ScriptedGateway, webserver: WebserverConfig) -> Self {
            Self::start_with(
                gateway,
                Config {
                    webserver,
                    ..Config::default()
                },
            )
        }

        fn start_with(gateway: ScriptedGateway, config: Config) -> Self {
            let gateway = Arc::new(gateway);
            let shutdown = Arc::new(Shutdown::new());
            let (hub, tasks) = MetricsHub::spawn(gateway.clone(), &config, shutdown.clone());
            let state = Arc::new(AppState::new(
                config.webserver.clone(),
                hub,
                "scripted://test".to_string(),
            ));
            Self {
                router: create_router(state.clone()),
                state,
                gateway,
                shutdown,
                tasks,
            }
        }

        async fn call(&self, method: Method, uri: &str) -> (StatusCode, Value, Response) {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let (parts, body) = response.into_parts();
            let bytes = to_bytes(body, usize::MAX).await.unwrap();
            let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json, Response::from_parts(parts, Body::empty()))
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            let (status, json, _) = self.call(Method::GET, uri).await;
            (status, json)
        }

        async fn stop(self) {
            self.shutdown.trigger();
            for task in self.tasks {
                task.await.unwrap();
            }
        }
    }

    fn healthy_gateway() -> ScriptedGateway {
        ScriptedGateway::new()
            .respond(
                GET_SUPPLY,
                json!({ "value": {
                    "total": 5_000_000_000u64,
                    "circulating": 4_000_000_000u64,
                    "nonCirculating": 1_000_000_000u64
                }}),
            )
            .respond(
                GET_EPOCH_INFO,
                json!({
                    "epoch": 7,
                    "slotIndex": 50,
                    "slotsInEpoch": 200,
                    "absoluteSlot": 1_450,
                    "blockHeight": 1_400,
                    "transactionCount": 10_000
                }),
            )
            .respond(
                GET_VOTE_ACCOUNTS,
                json!({
                    "current": [{
                        "votePubkey": "vote1",
                        "nodePubkey": "node1",
                        "activatedStake": 3_000_000_000u64,
                        "commission": 5,
                        "lastVote": 1_449,
                        "epochCredits": [[7, 100, 100_000]]
                    }],
                    "delinquent": []
                }),
            )
            .respond(GET_SLOT, json!(1_450))
            .respond(GET_LATEST_BLOCKHASH, json!({ "value": { "blockhash": "h" } }))
    }

    #[tokio::test]
    async fn test_supply_route_serves_snapshot() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        let (status, body, response) = harness.call(Method::GET, "/metrics/supply").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 5.0);
        assert_eq!(body["data"]["nonCirculating"], 1.0);
        assert!(body["data"]["timestamp"].is_string());
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            crate::webserver::utils::NO_STORE
        );
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
        assert_eq!(response.headers()[header::EXPIRES], "0");

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_every_metric_route_answers() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());

        let (_, epoch) = harness.get("/metrics/epoch").await;
        assert_eq!(epoch["data"]["epochProgress"], 25.0);
        assert_eq!(epoch["data"]["timeRemaining"], 150 * 400);

        let (_, transactions) = harness.get("/metrics/transactions").await;
        assert_eq!(transactions["data"]["totalTransactions"], 10_000);
        assert_eq!(transactions["data"]["transactionsPerSecond"], 0);

        let (_, staking) = harness.get("/metrics/staking").await;
        assert_eq!(staking["data"]["totalStaked"], 3.0);

        let (_, validators) = harness.get("/metrics/validators").await;
        assert_eq!(validators["data"]["validators"][0]["voteAccount"], "vote1");
        assert_eq!(validators["data"]["stats"]["totalPotentialAirdrop"], 2.0);

        let (status, ping) = harness.get("/metrics/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ping["data"]["responseTime"].is_u64());

        let (_, gas) = harness.get("/metrics/gas").await;
        assert_eq!(gas["data"]["normal"], 0.000005);

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_disabled_metric_answers_503() {
        let mut config = Config::default();
        config.pollers.gas.enabled = false;
        let harness = Harness::start_with(healthy_gateway(), config);

        let (status, body, response) = harness.call(Method::GET, "/metrics/gas").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Metric gas is disabled");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            crate::webserver::utils::NO_STORE
        );

        let (status, _) = harness.get("/metrics/ping").await;
        assert_eq!(status, StatusCode::OK);

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        let (status, body) = harness.get("/metrics/ping?t=1700000000000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        harness.stop().await;
    }

    #[tokio::test]
    async fn test_failing_metric_returns_500_with_message() {
        let gateway = healthy_gateway().fail(GET_VOTE_ACCOUNTS, RpcError::HttpStatus { status: 502 });
        let harness = Harness::start(gateway, WebserverConfig::default());

        let (status, body) = harness.get("/metrics/staking").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch staking data");
        assert!(body["timestamp"].is_string());

        let (status, _) = harness.get("/metrics/epoch").await;
        assert_eq!(status, StatusCode::OK);

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_stale_value_is_served_after_failure() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        let (status, _) = harness.get("/metrics/supply").await;
        assert_eq!(status, StatusCode::OK);

        harness
            .gateway
            .set(GET_SUPPLY, vec![Err(RpcError::Timeout)]);
        let mut rx = harness.state.hub.supply.subscribe();
        assert!(harness.state.hub.supply.refresh());
        rx.wait_for(|s| s.error_count == 1).await.unwrap();

        let (status, body) = harness.get("/metrics/supply").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 5.0);

        harness.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_request_times_out_without_outcome() {
        let gateway = healthy_gateway().with_delay(Duration::from_secs(60));
        let webserver = WebserverConfig {
            request_timeout_ms: 100,
            ..WebserverConfig::default()
        };
        let harness = Harness::start(gateway, webserver);

        let (status, body) = harness.get("/metrics/gas").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch gas prices");

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_refresh_all_lists_metrics() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        let (status, body, _) = harness.call(Method::POST, "/metrics/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["requested"].as_array().unwrap().len(), 7);
        assert_eq!(body["data"]["requested"][0], "supply");

        let (status, _, _) = harness.call(Method::POST, "/metrics/focus").await;
        assert_eq!(status, StatusCode::OK);

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_status_and_health() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        harness.get("/metrics/epoch").await;

        let (status, body) = harness.get("/metrics/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["rpcEndpoint"], "scripted://test");
        let metrics = body["data"]["metrics"].as_array().unwrap();
        assert_eq!(metrics.len(), 7);
        assert_eq!(metrics[1]["kind"], "epoch");
        assert_eq!(metrics[1]["hasValue"], true);

        let (status, body) = harness.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));

        harness.stop().await;
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let harness = Harness::start(healthy_gateway(), WebserverConfig::default());
        let (status, body) = harness.get("/metrics/fees").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        harness.stop().await;
    }
}
