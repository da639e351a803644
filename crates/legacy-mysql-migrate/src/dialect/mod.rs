//! Dialect migrators.
//!
//! [`DialectMigrator`] is the capability interface: one method per
//! migratable object kind plus the identifier policy hook and the list of
//! rated methods the module contributes to the dispatcher's registry.
//!
//! Dialect modules compose rather than inherit: each implementation
//! delegates explicitly to the shared routines in [`generic`] and layers
//! its own behavior on top. The generic module registers its methods with
//! rating 0, dialect modules with rating 1, so the dispatcher prefers the
//! dialect-specific method whenever the source dialect matches.

pub mod access;
pub mod generic;
pub mod maxdb;
pub mod mysql;
pub mod oracle;
pub mod sybase;

use crate::core::schema::{
    Column, ForeignKey, Index, Routine, Schema, SourceDialect, Synonym, Table, Trigger, View,
};
use crate::dispatch::{Dispatcher, Method, Migration, SourceScope, TargetParent};
use crate::error::{MigrateError, Result};
use crate::params::ParamMap;

/// One migrator module: a family of per-kind migration functions for a
/// source dialect, plus its identifier policy.
#[allow(clippy::too_many_arguments)]
pub trait DialectMigrator: Send + Sync {
    /// Registry key of this module (e.g. "oracle").
    fn module_name(&self) -> &'static str;

    /// The source dialect this module is specialized for, if any. The
    /// dispatcher uses this to find the identifier policy that applies
    /// when a dialect-less method (the generic fallback) migrates an
    /// object of a specialized catalog.
    fn source_dialect(&self) -> Option<SourceDialect> {
        None
    }

    /// Rated methods this module contributes to the dispatcher.
    fn methods(&self) -> Vec<Method>;

    /// Fold a source identifier into a target-safe identifier.
    fn migrate_identifier(&self, name: &str) -> String;

    fn migrate_schema(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Schema,
        params: &ParamMap,
    ) -> Result<Schema>;

    fn migrate_table(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Table,
        params: &ParamMap,
    ) -> Result<Table>;

    fn migrate_column(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Column,
        params: &ParamMap,
    ) -> Result<Column>;

    fn migrate_index(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Index,
        params: &ParamMap,
    ) -> Result<Index>;

    fn migrate_foreign_key(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &ForeignKey,
        params: &ParamMap,
    ) -> Result<ForeignKey>;

    fn migrate_view(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &View,
        params: &ParamMap,
    ) -> Result<View>;

    fn migrate_routine(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Routine,
        params: &ParamMap,
    ) -> Result<Routine>;

    /// Synonym migration; only dialects that have synonyms override
    /// this. Returns `None` when the synonym is deliberately skipped.
    fn migrate_synonym(
        &self,
        _disp: &Dispatcher,
        _mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        _source: &Synonym,
        _params: &ParamMap,
    ) -> Result<Option<Synonym>> {
        Err(MigrateError::dispatch(format!(
            "module `{}` does not migrate synonyms",
            self.module_name()
        )))
    }

    /// Trigger migration; only dialects that reverse-engineer triggers
    /// override this.
    fn migrate_trigger(
        &self,
        _disp: &Dispatcher,
        _mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        _source: &Trigger,
        _params: &ParamMap,
    ) -> Result<Trigger> {
        Err(MigrateError::dispatch(format!(
            "module `{}` does not migrate triggers",
            self.module_name()
        )))
    }
}

/// Default parameter map for schema methods.
pub(crate) fn default_schema_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("charset", "latin1");
    params.set("collation", "latin1_swedish_ci");
    params
}

/// Default parameter map for table methods.
pub(crate) fn default_table_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("engine", "INNODB");
    params.set("charset", "");
    params.set("collation", "");
    params.set("addAutoincrement", "yes");
    params
}

/// Default parameter map for column methods.
pub(crate) fn default_column_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("forceDatatypeName", "");
    params.set("forceLength", "no");
    params.set("forceLengthValue", "");
    params.set("forceDecimalDigits", "no");
    params.set("forceScaleValue", "");
    params.set("forcePrecisionValue", "");
    params.set("autoDecimalDigits", "no");
    params
}

/// Default parameter map for index methods.
pub(crate) fn default_index_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("forcedIndexLength", "0");
    params
}

/// Default parameter map for foreign-key methods.
pub(crate) fn default_foreign_key_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("overrideRules", "no");
    params.set("defaultDeleteRule", "NO ACTION");
    params.set("defaultUpdateRule", "NO ACTION");
    params
}

/// Default parameter map for view methods.
pub(crate) fn default_view_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("forceCheckOption", "no");
    params
}

/// Default parameter map for routine methods.
pub(crate) fn default_routine_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("Skip", "no");
    params
}

/// Default parameter map for synonym methods.
pub(crate) fn default_synonym_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.set("skipBuildinSynonyms", "yes");
    params
}
