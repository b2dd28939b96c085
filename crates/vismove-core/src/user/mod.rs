//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: On-chain user profile model and preference parsing
//!
//! # Usage
//!
//! ```ignore
//! use vismove_core::user::{UserProfileData, PREFERENCES_FIELD};
//! ```

mod model;

// Re-export public API
pub use model::{PREFERENCES_FIELD, UserProfileData, preferences_from_fields};
