#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use vismove_application::ContractSession;
use vismove_core::AppStore;
use vismove_core::MoveAddress;
use vismove_core::chain::{
    ChainQueryClient, DynamicFieldInfo, DynamicFieldName, ObjectDataOptions, ObjectFilter,
    ObjectResponse, OwnedObjectsQuery, Page,
};
use vismove_core::config::{ContractConfig, SuiNetwork};
use vismove_core::error::{Result, VisMoveError};
use vismove_core::explainer::{Explainer, ExplanationRequest, FunctionExplanation};
use vismove_core::package::{ModuleSources, PackageSource};
use vismove_core::transaction::Transaction;
use vismove_core::wallet::{TransactionReceipt, TransactionSigner, WalletAccount};
use vismove_infrastructure::ContractService;

pub const PKG: &str = "0xf8bfd9c5714ab5701d912a402819205b603b605c236cfc0cb642d982d8aac7d2";
pub const REGISTRY: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa";
pub const ADMIN_CAP: &str = "0x00000000000000000000000000000000000000000000000000000000000000bb";
pub const USER: &str = "0x123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
pub const CETUS: &str = "0x1eabed72c53feb3805120a081dc15963c204dc8d091542592abaf7a35689b2fb";

// ----------------------------------------------------------------------
// Chain
// ----------------------------------------------------------------------

/// Mock chain client serving one profile and one explanation; `failing`
/// makes every call return an RPC error.
#[derive(Default)]
pub struct MockChainClient {
    pub failing: bool,
    pub calls: AtomicUsize,
}

impl MockChainClient {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(VisMoveError::Rpc {
                code: -32000,
                message: "Network error".to_string(),
            });
        }
        Ok(())
    }
}

fn response(value: Value) -> ObjectResponse {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl ChainQueryClient for MockChainClient {
    async fn get_owned_objects(&self, query: OwnedObjectsQuery) -> Result<Page<ObjectResponse>> {
        self.check()?;
        let Some(ObjectFilter::StructType(struct_type)) = query.filter else {
            return Ok(Page::default());
        };
        let data = if struct_type.ends_with("::UserProfile") {
            vec![response(json!({
                "data": {
                    "objectId": "0xabc123",
                    "content": {
                        "dataType": "moveObject",
                        "fields": { "username": "testuser", "contributions": "5", "reputation": "100" }
                    }
                }
            }))]
        } else if struct_type.ends_with("::Explanation") {
            vec![response(json!({
                "data": {
                    "objectId": "0xe1",
                    "content": {
                        "dataType": "moveObject",
                        "fields": {
                            "title": "Swap",
                            "package_id": CETUS,
                            "module_name": "pool",
                            "function_name": "swap",
                            "explanation_text": "Swaps coin A for coin B",
                            "author": USER,
                            "rating": "4",
                            "votes": "2",
                            "created_at": "1700000000000"
                        }
                    }
                }
            }))]
        } else {
            Vec::new()
        };
        Ok(Page::of(data))
    }

    async fn get_dynamic_fields(&self, _parent_id: &str) -> Result<Page<DynamicFieldInfo>> {
        self.check()?;
        Ok(Page::default())
    }

    async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        _name: &DynamicFieldName,
    ) -> Result<ObjectResponse> {
        self.check()?;
        Err(VisMoveError::not_found("dynamic field", parent_id))
    }

    async fn get_object(
        &self,
        _object_id: &str,
        _options: ObjectDataOptions,
    ) -> Result<ObjectResponse> {
        self.check()?;
        Ok(response(json!({
            "data": {
                "objectId": REGISTRY,
                "content": {
                    "dataType": "moveObject",
                    "fields": {
                        "total_count": "12",
                        "categories": { "fields": { "DeFi": ["0xe1"], "NFT": [] } }
                    }
                }
            }
        })))
    }
}

pub fn contract_config() -> ContractConfig {
    ContractConfig {
        package_id: PKG.to_string(),
        registry_id: REGISTRY.to_string(),
        admin_cap_id: ADMIN_CAP.to_string(),
        ..ContractConfig::default()
    }
}

pub fn session_with(client: Arc<MockChainClient>) -> Arc<ContractSession> {
    let service = Arc::new(ContractService::new(client, contract_config()));
    Arc::new(ContractSession::new(service, Arc::new(AppStore::new())))
}

pub fn user() -> WalletAccount {
    WalletAccount::new(USER)
}

// ----------------------------------------------------------------------
// Package source
// ----------------------------------------------------------------------

pub const POOL_SOURCE: &str = r#"module 0x1eab::pool {
    public fun swap(a: u64): u64 { a }
    public(friend) fun settle() { }
    fun helper() { }
}"#;

#[derive(Default)]
pub struct MockPackageSource {
    pub failing: bool,
    pub requests: Mutex<Vec<(MoveAddress, SuiNetwork)>>,
}

impl MockPackageSource {
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PackageSource for MockPackageSource {
    async fn package_modules(
        &self,
        package_id: &MoveAddress,
        network: SuiNetwork,
    ) -> Result<ModuleSources> {
        self.requests.lock().unwrap().push((*package_id, network));
        if self.failing {
            return Err(VisMoveError::Decompile("revela exited with 1".to_string()));
        }
        let mut modules = ModuleSources::new();
        modules.insert("pool".to_string(), POOL_SOURCE.to_string());
        modules.insert(
            "router".to_string(),
            "module 0x1eab::router { entry fun route() { } }".to_string(),
        );
        Ok(modules)
    }
}

// ----------------------------------------------------------------------
// Explainer
// ----------------------------------------------------------------------

#[derive(Default)]
pub struct MockExplainer {
    pub error: Option<String>,
    pub requests: Mutex<Vec<ExplanationRequest>>,
}

impl MockExplainer {
    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Explainer for MockExplainer {
    async fn explain(&self, request: ExplanationRequest) -> Result<FunctionExplanation> {
        self.requests.lock().unwrap().push(request);
        if let Some(message) = &self.error {
            return Err(VisMoveError::explainer(message.clone()));
        }
        Ok(FunctionExplanation {
            explanation: "Test explanation".to_string(),
            coin_flow: "No coin flow".to_string(),
            uml_sequence_diagram: "@startuml\nTest -> Diagram\n@enduml".to_string(),
            concepts_to_explain: vec!["concept1".to_string(), "concept2".to_string()],
        })
    }
}

// ----------------------------------------------------------------------
// Signer
// ----------------------------------------------------------------------

/// Records every transaction and reports one created object.
#[derive(Default)]
pub struct MockSigner {
    pub transactions: Mutex<Vec<Transaction>>,
}

impl MockSigner {
    pub fn call_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    async fn sign_and_execute(&self, transaction: Transaction) -> Result<TransactionReceipt> {
        self.transactions.lock().unwrap().push(transaction);
        Ok(TransactionReceipt {
            digest: Some("8sXf1pUDigest".to_string()),
            created_object_ids: vec!["0xe9".to_string()],
        })
    }
}

/// Signs nothing: records the transaction and returns an empty receipt, the
/// way an export-only wallet does.
#[derive(Default)]
pub struct ExportOnlySigner {
    pub transactions: Mutex<Vec<Transaction>>,
}

impl ExportOnlySigner {
    pub fn call_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionSigner for ExportOnlySigner {
    async fn sign_and_execute(&self, transaction: Transaction) -> Result<TransactionReceipt> {
        self.transactions.lock().unwrap().push(transaction);
        Ok(TransactionReceipt::default())
    }
}
