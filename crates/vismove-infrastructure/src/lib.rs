//! Infrastructure layer for VisMove: fullnode access, the contract service,
//! the package reader and configuration loading.

pub mod config_service;
pub mod contract_service;
pub mod package_reader;
pub mod paths;
pub mod rpc_client;

pub use crate::config_service::ConfigService;
pub use crate::contract_service::ContractService;
pub use crate::package_reader::RevelaPackageSource;
pub use crate::paths::VisMovePaths;
pub use crate::rpc_client::SuiRpcClient;
