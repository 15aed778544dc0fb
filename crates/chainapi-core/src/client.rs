//! Runtime client for a chain's RPC and REST nodes.
//!
//! RPC nodes wrap their payload in a JSON-RPC style envelope
//! (`{"result": ...}` or `{"error": ...}`); REST nodes answer with the payload
//! itself or a Cosmos error object (`{"code", "message", "details"}`). Both
//! envelopes are unwrapped here so callers only ever see the payload.
//!
//! # Examples
//!
//! ```no_run
//! # async fn run() -> chainapi_core::Result<()> {
//! use chainapi_core::{chains, client::{ChainClient, Pagination}};
//!
//! let client = ChainClient::new(chains::find("kyve")?.clone())?;
//! let status = client.rpc_request("/status", &serde_json::Value::Null).await?;
//!
//! let page = Pagination { limit: Some(10), ..Default::default() };
//! let proposals = client
//!     .rest_get("/cosmos/gov/v1beta1/proposals", &page.into_params()?)
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::time::Duration;

use crate::{
    chains::ChainInfo,
    error::{Error, Result},
    rpc::RpcMethod,
};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use url::form_urlencoded;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder pattern is valid"));

/// Cosmos SDK pagination query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(rename = "pagination.key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "pagination.offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(rename = "pagination.limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(rename = "pagination.count_total", skip_serializing_if = "Option::is_none")]
    pub count_total: Option<bool>,
    #[serde(rename = "pagination.reverse", skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl Pagination {
    /// The pagination keys as a query parameter object
    pub fn into_params(self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Build a `?k=v&...` query string from a JSON object.
///
/// `null` values are skipped, nested objects are flattened into dotted keys
/// and arrays repeat their key once per element. Anything that is not an
/// object, or an object that yields no pairs, gives an empty string.
pub fn build_query(params: &JsonValue) -> String {
    let JsonValue::Object(map) = params else {
        return String::new();
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut pairs = 0;
    append_pairs(&mut serializer, &mut pairs, None, map);

    if pairs == 0 {
        String::new()
    } else {
        format!("?{}", serializer.finish())
    }
}

fn append_pairs(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    pairs: &mut usize,
    prefix: Option<&str>,
    map: &Map<String, JsonValue>,
) {
    for (key, value) in map {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        append_value(serializer, pairs, &key, value);
    }
}

fn append_value(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    pairs: &mut usize,
    key: &str,
    value: &JsonValue,
) {
    match value {
        JsonValue::Null => {}
        JsonValue::Object(nested) => append_pairs(serializer, pairs, Some(key), nested),
        JsonValue::Array(items) => {
            for item in items {
                append_value(serializer, pairs, key, item);
            }
        }
        JsonValue::String(s) => {
            serializer.append_pair(key, s);
            *pairs += 1;
        }
        other => {
            serializer.append_pair(key, &other.to_string());
            *pairs += 1;
        }
    }
}

/// Placeholder names of an endpoint path, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Substitute `{name}` placeholders in `template` with values from `path_params`
pub fn render_endpoint(template: &str, path_params: &Map<String, JsonValue>) -> Result<String> {
    if let Some(missing) = placeholders(template)
        .into_iter()
        .find(|name| !path_params.contains_key(*name))
    {
        return Err(Error::config(format!(
            "Missing path parameter '{}' for endpoint {}",
            missing, template
        )));
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
        match &path_params[&caps[1]] {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    });
    Ok(rendered.into_owned())
}

/// HTTP client bound to one chain's nodes
#[derive(Debug, Clone)]
pub struct ChainClient {
    info: ChainInfo,
    http: Client,
}

impl ChainClient {
    /// Create a client with the default request timeout
    pub fn new(info: ChainInfo) -> Result<Self> {
        Self::with_timeout(info, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(info: ChainInfo, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { info, http })
    }

    pub fn info(&self) -> &ChainInfo {
        &self.info
    }

    /// Call an RPC endpoint and return the `result` of its envelope
    pub async fn rpc_request(&self, endpoint: &str, params: &JsonValue) -> Result<JsonValue> {
        let url = format!("{}{}{}", self.info.urls.rpc, endpoint, build_query(params));
        let mut json = self.send(self.http.get(&url), &url).await?;

        if let Some(error) = json.get("error").filter(|e| is_present(e)) {
            return Err(Error::Rpc(describe(error)));
        }
        Ok(json
            .as_object_mut()
            .and_then(|envelope| envelope.remove("result"))
            .unwrap_or(JsonValue::Null))
    }

    /// Call a named RPC method
    pub async fn rpc_call(&self, method: RpcMethod, params: &JsonValue) -> Result<JsonValue> {
        self.rpc_request(method.endpoint(), params).await
    }

    /// Node heartbeat
    pub async fn health(&self) -> Result<JsonValue> {
        self.rpc_call(RpcMethod::Health, &JsonValue::Null).await
    }

    /// Node status
    pub async fn status(&self) -> Result<JsonValue> {
        self.rpc_call(RpcMethod::Status, &JsonValue::Null).await
    }

    /// The block at `height`, or the latest block
    pub async fn block(&self, height: Option<u64>) -> Result<JsonValue> {
        let params = match height {
            Some(height) => serde_json::json!({ "height": height }),
            None => JsonValue::Null,
        };
        self.rpc_call(RpcMethod::Block, &params).await
    }

    /// GET a REST endpoint
    pub async fn rest_get(&self, endpoint: &str, query: &JsonValue) -> Result<JsonValue> {
        let url = self.rest_url(endpoint, query);
        let json = self.send(self.http.get(&url), &url).await?;
        check_rest_envelope(json)
    }

    /// POST a JSON body to a REST endpoint
    pub async fn rest_post(
        &self,
        endpoint: &str,
        query: &JsonValue,
        body: &JsonValue,
    ) -> Result<JsonValue> {
        let url = self.rest_url(endpoint, query);
        let json = self.send(self.http.post(&url).json(body), &url).await?;
        check_rest_envelope(json)
    }

    fn rest_url(&self, endpoint: &str, query: &JsonValue) -> String {
        format!("{}{}{}", self.info.urls.rest, endpoint, build_query(query))
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<JsonValue> {
        log::debug!("{} request: {}", self.info.name, url);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} request to {} failed: {}", self.info.name, url, status);
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

fn check_rest_envelope(json: JsonValue) -> Result<JsonValue> {
    if let Some(message) = json.get("message").filter(|m| is_present(m)) {
        return Err(Error::Rest(describe(message)));
    }
    Ok(json)
}

fn is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn describe(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => map
            .get("message")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{ChainPrefixes, ChainUrls};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ChainClient {
        let info = ChainInfo {
            name: "Testnet".into(),
            urls: ChainUrls {
                rpc: format!("{}/rpc", server.uri()),
                rest: server.uri(),
                socket: "wss://localhost/websocket".into(),
            },
            prefixes: ChainPrefixes {
                prefix: "test".into(),
                valoper_prefix: "testvaloper".into(),
                cons_prefix: "testvalcons".into(),
            },
            decimals: 6,
        };
        ChainClient::with_timeout(info, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query(&JsonValue::Null), "");
        assert_eq!(build_query(&json!({})), "");
        assert_eq!(build_query(&json!({"height": null})), "");
        assert_eq!(
            build_query(&json!({"minHeight": 1, "maxHeight": 20, "skip": null})),
            "?minHeight=1&maxHeight=20"
        );
        assert_eq!(
            build_query(&json!({"pagination": {"limit": 5, "reverse": true}, "status": "PROPOSAL_STATUS_PASSED"})),
            "?pagination.limit=5&pagination.reverse=true&status=PROPOSAL_STATUS_PASSED"
        );
        assert_eq!(
            build_query(&json!({"events": ["tx.height=5", "message.action='send'"]})),
            "?events=tx.height%3D5&events=message.action%3D%27send%27"
        );
    }

    #[test]
    fn test_pagination_keys() {
        let page = Pagination {
            key: Some("abc".into()),
            limit: Some(10),
            count_total: Some(true),
            ..Default::default()
        };
        assert_eq!(
            build_query(&page.into_params().unwrap()),
            "?pagination.key=abc&pagination.limit=10&pagination.count_total=true"
        );
        assert_eq!(build_query(&Pagination::default().into_params().unwrap()), "");
    }

    #[test]
    fn test_render_endpoint() {
        let params = json!({"address": "kyve1xyz", "height": 42});
        let params = params.as_object().unwrap();
        assert_eq!(
            render_endpoint("/cosmos/bank/v1beta1/balances/{address}", params).unwrap(),
            "/cosmos/bank/v1beta1/balances/kyve1xyz"
        );
        assert_eq!(
            render_endpoint("/blocks/{height}/{address}", params).unwrap(),
            "/blocks/42/kyve1xyz"
        );
        assert_eq!(placeholders("/a/{x}/b/{y}"), vec!["x", "y"]);
        assert!(matches!(
            render_endpoint("/validators/{validator_addr}", params),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_rpc_request_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rpc/blockchain"))
            .and(query_param("minHeight", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": -1,
                "result": {"last_height": "100"}
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .rpc_request("/blockchain", &json!({"minHeight": 1}))
            .await
            .unwrap();
        assert_eq!(result, json!({"last_height": "100"}));
    }

    #[tokio::test]
    async fn test_named_rpc_methods() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rpc/net_info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "result": {"listening": true, "n_peers": "3"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rpc/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "result": {}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rpc/block"))
            .and(query_param("height", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "result": {"block": {"header": {"height": "7"}}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let net_info = client
            .rpc_call("net_info".parse().unwrap(), &JsonValue::Null)
            .await
            .unwrap();
        assert_eq!(net_info["n_peers"], "3");
        assert_eq!(client.health().await.unwrap(), json!({}));
        assert_eq!(
            client.block(Some(7)).await.unwrap()["block"]["header"]["height"],
            "7"
        );
    }

    #[tokio::test]
    async fn test_rpc_request_surfaces_envelope_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rpc/block"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "error": {"code": -32603, "message": "height must be less than or equal to the current blockchain height"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .rpc_request("/block", &json!({"height": 999999999}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rpc(message) if message.starts_with("height must be")));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rpc/status"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .rpc_request("/status", &JsonValue::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_rest_get_and_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cosmos/gov/v1beta1/proposals"))
            .and(query_param("pagination.limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "proposals": [],
                "pagination": {"next_key": null, "total": "0"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cosmos/gov/v1beta1/proposals/0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 3,
                "message": "proposal 0 doesn't exist: key not found",
                "details": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = Pagination {
            limit: Some(2),
            ..Default::default()
        };
        let proposals = client
            .rest_get("/cosmos/gov/v1beta1/proposals", &page.into_params().unwrap())
            .await
            .unwrap();
        assert_eq!(proposals["proposals"], json!([]));

        let err = client
            .rest_get("/cosmos/gov/v1beta1/proposals/0", &JsonValue::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rest(message) if message.contains("doesn't exist")));
    }

    #[tokio::test]
    async fn test_rest_post_sends_body() {
        let server = MockServer::start().await;
        let body = json!({"tx_bytes": "CpABCo0B", "mode": "BROADCAST_MODE_SYNC"});
        Mock::given(method("POST"))
            .and(path("/cosmos/tx/v1beta1/txs"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tx_response": {"txhash": "ABC", "code": 0}
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .rest_post("/cosmos/tx/v1beta1/txs", &JsonValue::Null, &body)
            .await
            .unwrap();
        assert_eq!(response["tx_response"]["txhash"], "ABC");
    }
}
