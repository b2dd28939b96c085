//! Domain layer for VisMove.
//!
//! Contract configuration, the on-chain data model, transaction assembly,
//! the shared store and the traits the outer layers implement
//! ([`chain::ChainQueryClient`], [`package::PackageSource`],
//! [`explainer::Explainer`], [`wallet::TransactionSigner`]).

pub mod address;
pub mod chain;
pub mod config;
pub mod error;
pub mod explainer;
pub mod explanation;
pub mod notification;
pub mod package;
pub mod store;
pub mod transaction;
pub mod user;
pub mod wallet;

// Re-export common types
pub use address::MoveAddress;
pub use error::{Result, VisMoveError};
pub use store::AppStore;
