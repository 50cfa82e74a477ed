//! JSON-RPC 2.0 gateway over HTTP

use super::types::{RpcError, RpcResult};
use super::RpcGateway;
use crate::config::RpcConfig;
use crate::logger::{self, LogTag};
use crate::metrics::RequestContext;
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Production gateway: one POST per call, no retries
pub struct HttpRpcGateway {
    client: reqwest::Client,
    url: String,
    commitment: String,
}

impl HttpRpcGateway {
    pub fn new(config: &RpcConfig) -> RpcResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RpcError::ConnectionFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            commitment: config.commitment.clone(),
        })
    }
}

#[async_trait]
impl RpcGateway for HttpRpcGateway {
    async fn execute_raw(
        &self,
        ctx: &RequestContext,
        method: &str,
        params: Value,
    ) -> RpcResult<Value> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": ctx.correlation_id.to_string(),
            "method": method,
            "params": params,
        });

        let start = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            logger::debug(
                LogTag::Rpc,
                &format!(
                    "[{}] {} returned HTTP {} after {}ms",
                    ctx.correlation_id,
                    method,
                    status.as_u16(),
                    start.elapsed().as_millis()
                ),
            );
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RpcError::Timeout
            } else {
                RpcError::InvalidResponse(format!("Body is not JSON: {}", e))
            }
        })?;

        logger::debug(
            LogTag::Rpc,
            &format!(
                "[{}] {} completed in {}ms",
                ctx.correlation_id,
                method,
                start.elapsed().as_millis()
            ),
        );

        extract_result(body)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn commitment(&self) -> &str {
        &self.commitment
    }
}

fn classify_transport_error(e: reqwest::Error) -> RpcError {
    if e.is_timeout() {
        RpcError::Timeout
    } else {
        RpcError::ConnectionFailed(e.to_string())
    }
}

/// Unwrap a JSON-RPC envelope into its `result`
///
/// An `error` object wins over a `result`; an envelope with neither is invalid.
pub fn extract_result(mut body: Value) -> RpcResult<Value> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(RpcError::Rpc { code, message });
    }

    match body.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(RpcError::InvalidResponse(
            "Envelope has neither result nor error".to_string(),
        )),
    }
}
