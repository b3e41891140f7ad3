//! slashc-catalog: the command registry and description table.
//!
//! A [`Catalog`] lists, per category, the command ids a build must produce
//! and maps `category/command` keys to one-line descriptions. It is built
//! once at startup and handed to the build pipeline; nothing mutates it
//! afterwards.

pub mod builtin;
pub mod describe;
pub mod registry;

pub use builtin::builtin_catalog;
pub use describe::fallback_description;
pub use registry::{Catalog, CatalogError, Category, CommandRef, is_valid_identifier};
