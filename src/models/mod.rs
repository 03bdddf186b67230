//! Data models
//!
//! Records, derived fields and the view-field metadata they are derived from.

pub mod field;
pub mod metadata;
pub mod record;

// Re-export commonly used types
pub use field::*;
pub use metadata::*;
pub use record::*;
