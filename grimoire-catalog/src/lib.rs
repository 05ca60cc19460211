//! Spell and monster catalog data model, plus the normalizers the importers
//! apply to raw CSV text.
//!
//! This crate has no database dependency. Consumers can use these types
//! directly for display, or pass them to `grimoire-db` for persistence.

pub mod class_names;
pub mod image;
pub mod json;
pub mod text;
pub mod types;
pub mod values;

pub use class_names::{
    class_display_name, fold_name, normalize_class_name, normalize_subclass_name,
    resolve_class_name, split_class_list,
};
pub use json::{JsonFallback, normalize_json};
pub use text::clean_description;
pub use types::*;
