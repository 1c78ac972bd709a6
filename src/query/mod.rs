//! Generic query-construction and resource-fetch layer.
//!
//! Every resource handler goes through the same four pieces: a search
//! clause builder, a sort clause builder validated against a per-resource
//! allow-list, a foreign-key conflict translator scoped around deletes,
//! and a generic fetch-by-id. `TableSpec` is the per-resource
//! configuration the pieces are parameterized by; nothing in here
//! special-cases a table name except when reporting errors.

pub mod fetch;
pub mod fk;
pub mod list;
pub mod search;
pub mod sort;
pub mod table;

pub use fetch::fetch_instance;
pub use fk::{extract_fk_detail, is_fk_violation, with_fk_translation};
pub use list::{ListPage, ListParams, Pagination, list_instances};
pub use search::{SqlFragment, search_clause};
pub use sort::sort_clause;
pub use table::TableSpec;
