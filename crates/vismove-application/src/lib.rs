//! Application layer for VisMove.
//!
//! Coordinates the contract service, the package source, the explainer and
//! the wallet signer, reporting outcomes through the shared store.

pub mod contract_session;
pub mod explainer_workflow;

pub use contract_session::ContractSession;
pub use explainer_workflow::ExplainerWorkflow;
