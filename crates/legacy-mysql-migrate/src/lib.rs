//! # legacy-mysql-migrate
//!
//! Schema migration engine that maps legacy RDBMS catalogs onto MySQL.
//!
//! A reverse-engineering collaborator produces an in-memory source
//! [`Catalog`](core::schema::Catalog); this library decides, object by
//! object, which MySQL representation to produce:
//!
//! - **Identifier policies** per source dialect (case folding, character
//!   substitution)
//! - **Type mapping** via forced parameters, declarative mapping tables
//!   and per-dialect hardcoded rules, with a never-silently-drop
//!   VARCHAR(255) fallback
//! - **Rated dispatch**: explicit per-object mappings, per-kind defaults
//!   and a best-rated method registry select the migrator for every
//!   object, including nested ones
//! - **Cross-reference resolution** rewiring foreign keys once every
//!   table exists
//! - A structured **migration log** that records per-object warnings and
//!   errors instead of aborting the run
//!
//! ## Example
//!
//! ```rust
//! use legacy_mysql_migrate::{Dispatcher, Migration};
//! use legacy_mysql_migrate::core::schema::{Catalog, Rdbms, Schema, SourceDialect};
//!
//! let mut source = Catalog::new("SCOTT", SourceDialect::Oracle);
//! source.schemata.push(Schema::new("SCOTT"));
//!
//! let dispatcher = Dispatcher::with_builtins();
//! let mut migration = Migration::new(&Rdbms::mysql(), None);
//! let target = dispatcher.migrate_catalog(&mut migration, &source).unwrap();
//!
//! assert_eq!(target.schemata[0].old_name, "SCOTT");
//! assert_eq!(migration.log.error_count(), 0);
//! ```

pub mod core;
pub mod dialect;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod params;
pub mod typemap;
pub mod xref;

// Re-exports for convenient access
pub use dispatch::{
    ClassMapping, Dispatcher, IgnoreList, Method, Migration, NoopListener, ObjectMapping,
    ProgressListener, SourceRef, SourceScope, TargetObject, TargetParent,
};
pub use error::{MigrateError, Result};
pub use log::{LogMessage, MigrationLog, ObjectLog, Severity};
pub use params::ParamMap;
pub use typemap::DatatypeMapping;
