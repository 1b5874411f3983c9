//! Org-roam output: file naming, header synthesis and property drawers.

pub mod header;
pub mod naming;
pub mod properties;

pub use header::{format_alias, format_aliases, node_id, OrgHeader, MATH_STARTUP};
pub use naming::{org_file_name, TARGET_EXTENSION};
pub use properties::strip_property_blocks;
