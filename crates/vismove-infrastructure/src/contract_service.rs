//! ContractService - the vmc package seen from the client side.
//!
//! Write operations build [`Transaction`]s that are handed to a signer
//! elsewhere; nothing here signs or submits. Read operations never fail:
//! query errors are logged and surface as empty or default results.

use serde_json::Value;
use vismove_core::chain::{
    DynChainQueryClient, ObjectDataOptions, ObjectFilter, ObjectResponse, OwnedObjectsQuery,
};
use vismove_core::config::{Category, ContractConfig, ContractFunction, StructKind};
use vismove_core::error::Result;
use vismove_core::explanation::{ExplanationData, RegistryStats, category_map};
use vismove_core::transaction::Transaction;
use vismove_core::user::{PREFERENCES_FIELD, UserProfileData, preferences_from_fields};

/// Builds vmc transactions and reads vmc objects through a chain client.
#[derive(Clone)]
pub struct ContractService {
    client: DynChainQueryClient,
    config: ContractConfig,
}

impl ContractService {
    pub fn new(client: DynChainQueryClient, config: ContractConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// `vmc::create_explanation(admin_cap, registry, title, package_id,
    /// module_name, function_name, explanation_text)`.
    ///
    /// Content is not validated; only `package_id` must encode as an address.
    pub fn create_explanation_tx(
        &self,
        title: &str,
        package_id: &str,
        module_name: &str,
        function_name: &str,
        explanation_text: &str,
    ) -> Result<Transaction> {
        let mut tx = Transaction::new();
        let admin_cap = tx.object(&self.config.admin_cap_id)?;
        let registry = tx.object(&self.config.registry_id)?;
        let title = tx.pure_string(title)?;
        let package_id = tx.pure_address(package_id)?;
        let module_name = tx.pure_string(module_name)?;
        let function_name = tx.pure_string(function_name)?;
        let explanation_text = tx.pure_string(explanation_text)?;

        tx.move_call(
            &self.config.function(ContractFunction::CreateExplanation),
            vec![
                admin_cap,
                registry,
                title,
                package_id,
                module_name,
                function_name,
                explanation_text,
            ],
        )?;
        Ok(tx)
    }

    /// `vmc::rate_explanation(explanation, rating)`. The range is enforced
    /// on chain.
    pub fn rate_explanation_tx(&self, explanation_id: &str, rating: u64) -> Result<Transaction> {
        let mut tx = Transaction::new();
        let explanation = tx.object(explanation_id)?;
        let rating = tx.pure_u64(rating)?;
        tx.move_call(
            &self.config.function(ContractFunction::RateExplanation),
            vec![explanation, rating],
        )?;
        Ok(tx)
    }

    pub fn register_user_tx(&self, username: &str) -> Result<Transaction> {
        let mut tx = Transaction::new();
        let username = tx.pure_string(username)?;
        tx.move_call(
            &self.config.function(ContractFunction::RegisterUser),
            vec![username],
        )?;
        Ok(tx)
    }

    pub fn add_user_preference_tx(&self, profile_id: &str, preference: &str) -> Result<Transaction> {
        let mut tx = Transaction::new();
        let profile = tx.object(profile_id)?;
        let preference = tx.pure_string(preference)?;
        tx.move_call(
            &self.config.function(ContractFunction::AddUserPreference),
            vec![profile, preference],
        )?;
        Ok(tx)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Explanations owned by `address`. Malformed objects are skipped.
    pub async fn get_user_explanations(&self, address: &str) -> Vec<ExplanationData> {
        let objects = match self.owned_objects(address, StructKind::Explanation).await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::error!("[ContractService] Error fetching user explanations: {}", e);
                return Vec::new();
            }
        };

        objects
            .iter()
            .filter_map(|response| {
                let data = response.data.as_ref()?;
                ExplanationData::from_fields(&data.object_id, data.move_fields()?)
            })
            .collect()
    }

    /// The first `UserProfile` owned by `address`, with its preferences.
    pub async fn get_user_profile(&self, address: &str) -> Option<UserProfileData> {
        let objects = match self.owned_objects(address, StructKind::UserProfile).await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::error!("[ContractService] Error fetching user profile: {}", e);
                return None;
            }
        };

        let data = objects.first()?.data.as_ref()?;
        let profile = UserProfileData::from_fields(&data.object_id, data.move_fields()?)?;

        let preferences = match self.fetch_preferences(&profile.id).await {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!(
                    "[ContractService] Could not fetch preferences for {}: {}",
                    profile.id,
                    e
                );
                Vec::new()
            }
        };

        Some(profile.with_preferences(preferences))
    }

    /// Registry counters; `{0, 0}` when the registry cannot be read.
    pub async fn get_registry_stats(&self) -> RegistryStats {
        match self.registry_object().await {
            Ok(response) => response
                .data
                .as_ref()
                .and_then(|data| data.move_fields())
                .and_then(RegistryStats::from_fields)
                .unwrap_or_default(),
            Err(e) => {
                tracing::error!("[ContractService] Error fetching registry stats: {}", e);
                RegistryStats::default()
            }
        }
    }

    /// Explanation ids the registry lists under `category`.
    pub async fn get_explanations_by_category(&self, category: Category) -> Vec<String> {
        let response = match self.registry_object().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "[ContractService] Error fetching {} explanations: {}",
                    category,
                    e
                );
                return Vec::new();
            }
        };

        response
            .data
            .as_ref()
            .and_then(|data| data.move_fields())
            .and_then(category_map)
            .and_then(|categories| categories.get(category.as_str()))
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn owned_objects(&self, owner: &str, kind: StructKind) -> Result<Vec<ObjectResponse>> {
        let query = OwnedObjectsQuery {
            owner: owner.to_string(),
            filter: Some(ObjectFilter::StructType(self.config.struct_type(kind))),
            options: ObjectDataOptions::content_and_type(),
        };
        Ok(self.client.get_owned_objects(query).await?.data)
    }

    async fn registry_object(&self) -> Result<ObjectResponse> {
        self.client
            .get_object(&self.config.registry_id, ObjectDataOptions::content())
            .await
    }

    async fn fetch_preferences(&self, profile_id: &str) -> Result<Vec<String>> {
        let fields = self.client.get_dynamic_fields(profile_id).await?;
        let Some(field) = fields
            .data
            .iter()
            .find(|field| field.name.value.as_str() == Some(PREFERENCES_FIELD))
        else {
            return Ok(Vec::new());
        };

        let object = self
            .client
            .get_dynamic_field_object(profile_id, &field.name)
            .await?;

        Ok(object
            .data
            .as_ref()
            .and_then(|data| data.move_fields())
            .map(preferences_from_fields)
            .unwrap_or_default())
    }
}
