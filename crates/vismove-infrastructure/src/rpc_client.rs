//! SuiRpcClient - JSON-RPC 2.0 client for a Sui fullnode.
//!
//! Implements [`ChainQueryClient`] over `reqwest`. Only the first page of
//! paginated queries is requested.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use vismove_core::chain::{
    ChainQueryClient, DynamicFieldInfo, DynamicFieldName, ObjectDataOptions, ObjectFilter,
    ObjectResponse, OwnedObjectsQuery, Page,
};
use vismove_core::config::SuiNetwork;
use vismove_core::error::{Result, VisMoveError};

/// JSON-RPC client bound to one fullnode endpoint.
#[derive(Debug)]
pub struct SuiRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Client for the public fullnode of `network`.
    pub fn for_network(network: SuiNetwork) -> Self {
        Self::new(network.fullnode_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs one JSON-RPC call and deserializes its `result`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("[SuiRpc] {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| VisMoveError::http(format!("{method} request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read fullnode error body".to_string());
            return Err(map_http_error(status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|err| VisMoveError::http(format!("{method} response unreadable: {err}")))?;

        parse_envelope(method, &body)
    }

    /// Base64 bytecode of every module of a package, keyed by module name.
    pub async fn get_module_map(&self, package_id: &str) -> Result<serde_json::Map<String, Value>> {
        let response = self.get_object(package_id, ObjectDataOptions::bcs()).await?;
        let data = response
            .data
            .ok_or_else(|| VisMoveError::not_found("package", package_id))?;
        data.bcs
            .as_ref()
            .and_then(|bcs| bcs.get("moduleMap"))
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| {
                VisMoveError::InvalidArgument(format!("object {package_id} is not a package"))
            })
    }
}

#[async_trait]
impl ChainQueryClient for SuiRpcClient {
    async fn get_owned_objects(&self, query: OwnedObjectsQuery) -> Result<Page<ObjectResponse>> {
        let filter = query.filter.as_ref().map(filter_to_json);
        let params = json!([
            query.owner,
            { "filter": filter, "options": query.options },
            Value::Null,
            Value::Null,
        ]);
        self.call("suix_getOwnedObjects", params).await
    }

    async fn get_dynamic_fields(&self, parent_id: &str) -> Result<Page<DynamicFieldInfo>> {
        self.call(
            "suix_getDynamicFields",
            json!([parent_id, Value::Null, Value::Null]),
        )
        .await
    }

    async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse> {
        self.call("suix_getDynamicFieldObject", json!([parent_id, name]))
            .await
    }

    async fn get_object(
        &self,
        object_id: &str,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse> {
        self.call("sui_getObject", json!([object_id, options])).await
    }
}

fn filter_to_json(filter: &ObjectFilter) -> Value {
    match filter {
        ObjectFilter::StructType(struct_type) => json!({ "StructType": struct_type }),
        ObjectFilter::Package(package) => json!({ "Package": package }),
    }
}

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

fn parse_envelope<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let envelope: RpcEnvelope<T> = serde_json::from_str(body)?;
    if let Some(error) = envelope.error {
        tracing::debug!("[SuiRpc] {} returned error {}", method, error.code);
        return Err(VisMoveError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    envelope
        .result
        .ok_or_else(|| VisMoveError::internal(format!("{method} returned neither result nor error")))
}

fn map_http_error(status: StatusCode, body: String) -> VisMoveError {
    // Some gateways answer with a JSON-RPC error body even on non-2xx.
    let envelope = serde_json::from_str::<RpcEnvelope<Value>>(&body).ok();
    if let Some(error) = envelope.and_then(|envelope| envelope.error) {
        return VisMoveError::Rpc {
            code: error.code,
            message: error.message,
        };
    }
    VisMoveError::http(format!("fullnode answered {}: {}", status.as_u16(), body))
}
