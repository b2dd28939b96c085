//! Read-side view of the chain.
//!
//! `ChainQueryClient` is the seam between the contract service and a
//! fullnode. The types below mirror the Sui JSON-RPC response shapes closely
//! enough to be deserialized straight from the wire.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Which parts of an object a query should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    #[serde(default)]
    pub show_type: bool,
    #[serde(default)]
    pub show_content: bool,
    #[serde(default)]
    pub show_bcs: bool,
    #[serde(default)]
    pub show_owner: bool,
}

impl ObjectDataOptions {
    /// Content and type, the combination used for owned-object queries.
    pub fn content_and_type() -> Self {
        Self {
            show_type: true,
            show_content: true,
            ..Self::default()
        }
    }

    pub fn content() -> Self {
        Self {
            show_content: true,
            ..Self::default()
        }
    }

    pub fn bcs() -> Self {
        Self {
            show_bcs: true,
            ..Self::default()
        }
    }
}

/// Object filter for owned-object queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectFilter {
    StructType(String),
    Package(String),
}

/// Parameters of an owned-object query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedObjectsQuery {
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectFilter>,
    pub options: ObjectDataOptions,
}

/// One page of a paginated query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<Value>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next_cursor: None,
            has_next_page: false,
        }
    }
}

impl<T> Page<T> {
    pub fn of(data: Vec<T>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

/// Parsed object content (`dataType` = `moveObject` or `package`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub data_type: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl ParsedContent {
    /// The move struct fields, when the content is a move object.
    pub fn move_fields(&self) -> Option<&Map<String, Value>> {
        self.fields.as_ref().and_then(Value::as_object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ParsedContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcs: Option<Value>,
}

impl ObjectData {
    pub fn move_fields(&self) -> Option<&Map<String, Value>> {
        self.content.as_ref().and_then(ParsedContent::move_fields)
    }
}

/// Response for a single object; either `data` or `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ObjectData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ObjectResponse {
    pub fn with_data(data: ObjectData) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// Name of a dynamic field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: DynamicFieldName,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

/// Read-only chain queries used by the contract service.
#[async_trait]
pub trait ChainQueryClient: Send + Sync {
    /// Objects owned by an address, first page only.
    async fn get_owned_objects(&self, query: OwnedObjectsQuery) -> Result<Page<ObjectResponse>>;

    /// Dynamic fields attached to an object, first page only.
    async fn get_dynamic_fields(&self, parent_id: &str) -> Result<Page<DynamicFieldInfo>>;

    async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse>;

    async fn get_object(&self, object_id: &str, options: ObjectDataOptions)
    -> Result<ObjectResponse>;
}

pub type DynChainQueryClient = Arc<dyn ChainQueryClient>;
