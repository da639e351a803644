//! Migration dispatch: method registry, run context and object routing.
//!
//! The dispatcher decides, for every source object, which migrator
//! function produces its MySQL counterpart. Resolution order:
//!
//! 1. ignore list (object skipped entirely, no log entry),
//! 2. explicit per-object mapping,
//! 3. per-kind default mapping,
//! 4. best-rated registered method (strictly higher rating wins; equal
//!    ratings resolve to the first registered).
//!
//! A method that cannot be found, or whose invocation fails, records an
//! error entry against the source object and returns nothing; migration
//! of sibling objects continues.
//!
//! Registration is explicit and ordered — no global state — so a run's
//! dispatch behavior is deterministic by construction.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tracing::{info, warn};

use crate::core::schema::{
    Catalog, Column, ForeignKey, Index, ObjectId, ObjectKind, Rdbms, Routine, Schema, Sequence,
    SimpleDatatype, SourceDialect, Synonym, Table, Trigger, Version, View,
};
use crate::dialect::DialectMigrator;
use crate::error::{MigrateError, Result};
use crate::log::{MigrationLog, Severity};
use crate::params::ParamMap;
use crate::typemap::DatatypeMapping;
use crate::xref;

/// Cooperative progress/cancellation hook.
///
/// The engine reports coarse progress through this listener and polls
/// `is_cancelled` between top-level objects. A cancelled run keeps the
/// partially built target catalog and log; there is no rollback.
pub trait ProgressListener: Send + Sync {
    fn message(&self, _text: &str) {}
    fn progress(&self, _action: &str, _percent: i32) {}
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Listener that reports nothing and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ProgressListener for NoopListener {}

/// Borrowed view of a source object for dispatch.
#[derive(Debug, Clone, Copy)]
pub enum SourceRef<'a> {
    Schema(&'a Schema),
    Table(&'a Table),
    Column(&'a Column),
    Index(&'a Index),
    ForeignKey(&'a ForeignKey),
    View(&'a View),
    Routine(&'a Routine),
    Synonym(&'a Synonym),
    Trigger(&'a Trigger),
    Sequence(&'a Sequence),
}

impl<'a> SourceRef<'a> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SourceRef::Schema(_) => ObjectKind::Schema,
            SourceRef::Table(_) => ObjectKind::Table,
            SourceRef::Column(_) => ObjectKind::Column,
            SourceRef::Index(_) => ObjectKind::Index,
            SourceRef::ForeignKey(_) => ObjectKind::ForeignKey,
            SourceRef::View(_) => ObjectKind::View,
            SourceRef::Routine(_) => ObjectKind::Routine,
            SourceRef::Synonym(_) => ObjectKind::Synonym,
            SourceRef::Trigger(_) => ObjectKind::Trigger,
            SourceRef::Sequence(_) => ObjectKind::Sequence,
        }
    }

    pub fn id(&self) -> ObjectId {
        match self {
            SourceRef::Schema(o) => o.id,
            SourceRef::Table(o) => o.id,
            SourceRef::Column(o) => o.id,
            SourceRef::Index(o) => o.id,
            SourceRef::ForeignKey(o) => o.id,
            SourceRef::View(o) => o.id,
            SourceRef::Routine(o) => o.id,
            SourceRef::Synonym(o) => o.id,
            SourceRef::Trigger(o) => o.id,
            SourceRef::Sequence(o) => o.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            SourceRef::Schema(o) => &o.name,
            SourceRef::Table(o) => &o.name,
            SourceRef::Column(o) => &o.name,
            SourceRef::Index(o) => &o.name,
            SourceRef::ForeignKey(o) => &o.name,
            SourceRef::View(o) => &o.name,
            SourceRef::Routine(o) => &o.name,
            SourceRef::Synonym(o) => &o.name,
            SourceRef::Trigger(o) => &o.name,
            SourceRef::Sequence(o) => &o.name,
        }
    }
}

/// Owned target object produced by a migrator.
#[derive(Debug, Clone)]
pub enum TargetObject {
    Schema(Schema),
    Table(Table),
    Column(Column),
    Index(Index),
    ForeignKey(ForeignKey),
    View(View),
    Routine(Routine),
    Synonym(Synonym),
    Trigger(Trigger),
}

/// Source-side navigation scope for a dispatch call: the catalog plus the
/// enclosing schema/table, when the object has them. The innermost
/// available name is the object's owner for ignore-list matching, and
/// index/foreign-key migrators use the table to look up sibling columns.
#[derive(Debug, Clone, Copy)]
pub struct SourceScope<'a> {
    pub catalog: &'a Catalog,
    pub schema: Option<&'a Schema>,
    pub table: Option<&'a Table>,
}

impl<'a> SourceScope<'a> {
    pub fn catalog(catalog: &'a Catalog) -> Self {
        SourceScope {
            catalog,
            schema: None,
            table: None,
        }
    }

    pub fn schema(catalog: &'a Catalog, schema: &'a Schema) -> Self {
        SourceScope {
            catalog,
            schema: Some(schema),
            table: None,
        }
    }

    pub fn table(catalog: &'a Catalog, schema: &'a Schema, table: &'a Table) -> Self {
        SourceScope {
            catalog,
            schema: Some(schema),
            table: Some(table),
        }
    }

    /// Innermost enclosing object name.
    pub fn owner_name(&self) -> &'a str {
        if let Some(table) = self.table {
            &table.name
        } else if let Some(schema) = self.schema {
            &schema.name
        } else {
            &self.catalog.name
        }
    }
}

/// Target-side parent of the object being migrated, for migrators that
/// must inspect already-built siblings (index columns read their referred
/// target column's type).
#[derive(Debug, Clone, Copy)]
pub enum TargetParent<'a> {
    None,
    Table(&'a Table),
}

impl<'a> TargetParent<'a> {
    pub fn table(&self) -> Option<&'a Table> {
        match *self {
            TargetParent::Table(t) => Some(t),
            TargetParent::None => None,
        }
    }
}

/// A registered migration method.
#[derive(Debug, Clone)]
pub struct Method {
    /// Migrator module the method lives in (e.g. "oracle").
    pub module: String,
    /// Method name within the module (e.g. "migrate_column").
    pub name: String,
    /// Short user-facing caption (e.g. "Oracle Default").
    pub caption: String,
    pub description: String,
    pub kind: ObjectKind,
    /// Source dialect the method is specialized for; `None` applies to
    /// any source.
    pub source_dialect: Option<SourceDialect>,
    /// Preference score; the dispatcher picks the highest applicable.
    pub rating: i32,
    /// Default parameters used when the dispatcher selects this method.
    pub params: ParamMap,
}

impl Method {
    pub fn new(module: &str, name: &str, kind: ObjectKind) -> Self {
        Method {
            module: module.to_string(),
            name: name.to_string(),
            caption: String::new(),
            description: String::new(),
            kind,
            source_dialect: None,
            rating: 0,
            params: ParamMap::new(),
        }
    }

    pub fn caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn dialect(mut self, dialect: SourceDialect) -> Self {
        self.source_dialect = Some(dialect);
        self
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    pub fn params(mut self, params: ParamMap) -> Self {
        self.params = params;
        self
    }

    fn applies_to(&self, kind: ObjectKind, dialect: SourceDialect) -> bool {
        self.kind == kind && self.source_dialect.map_or(true, |d| d == dialect)
    }
}

/// Binds one specific source object to a module/method with parameters.
#[derive(Debug, Clone)]
pub struct ObjectMapping {
    pub source_object_id: ObjectId,
    pub module: String,
    pub method: String,
    pub params: ParamMap,
}

/// Binds every object of a kind (optionally restricted to one source
/// dialect) to a module/method with parameters.
#[derive(Debug, Clone)]
pub struct ClassMapping {
    pub kind: ObjectKind,
    pub source_dialect: Option<SourceDialect>,
    pub module: String,
    pub method: String,
    pub params: ParamMap,
}

/// Glob-style exclusion list over `"Kind:Owner.Name"` strings.
///
/// `*` matches any run of characters, `?` a single character; `.` and the
/// remaining regex metacharacters are literal. Patterns are compiled
/// lazily on first use. Only non-schema database objects are checked.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<String>,
    compiled: Option<Vec<Regex>>,
}

impl IgnoreList {
    pub fn add(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into());
        self.compiled = None;
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&mut self, kind: ObjectKind, owner: &str, name: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }

        if self.compiled.is_none() {
            let compiled = self
                .patterns
                .iter()
                .filter_map(|p| match Regex::new(&glob_to_regex(p)) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!("skipping unusable ignore pattern {:?}: {}", p, e);
                        None
                    }
                })
                .collect();
            self.compiled = Some(compiled);
        }

        let Some(compiled) = &self.compiled else {
            return false;
        };

        let object_name = format!("{}:{}.{}", kind.leaf_name(), owner, name);
        compiled.iter().any(|re| re.is_match(&object_name))
    }
}

/// Translate one ignore glob into an anchored regex.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '.' | '$' | '\\' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '|' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out.push('$');
    out
}

/// Run-scoped migration context: target configuration, mapping overrides,
/// the source→target object map, the migration log and the state shared
/// by migrators (foreign-key name sequence, progress listener).
pub struct Migration {
    pub target_version: Version,
    pub simple_datatypes: Vec<SimpleDatatype>,
    pub ignore_list: IgnoreList,
    pub object_mappings: Vec<ObjectMapping>,
    pub class_mappings: Vec<ClassMapping>,
    /// Declarative mapping table consulted by the generic column migrator.
    pub datatype_mappings: Vec<DatatypeMapping>,
    pub log: MigrationLog,
    /// Set once the listener reports cancellation.
    pub cancelled: bool,
    object_map: HashMap<ObjectId, ObjectId>,
    reverse_map: HashMap<ObjectId, ObjectId>,
    fk_name_seq: u32,
    listener: Arc<dyn ProgressListener>,
}

impl Migration {
    /// Context for migrating into `target_rdbms`. Without an explicit
    /// version, MySQL targets default to 5.0.21 and anything else to
    /// 1.0.0.
    pub fn new(target_rdbms: &Rdbms, version: Option<Version>) -> Self {
        let target_version = version.unwrap_or_else(|| {
            if target_rdbms.name.eq_ignore_ascii_case("mysql") {
                Version::new(5, 0, 21)
            } else {
                Version::new(1, 0, 0)
            }
        });

        Migration {
            target_version,
            simple_datatypes: target_rdbms.simple_datatypes.clone(),
            ignore_list: IgnoreList::default(),
            object_mappings: Vec::new(),
            class_mappings: Vec::new(),
            datatype_mappings: Vec::new(),
            log: MigrationLog::new(),
            cancelled: false,
            object_map: HashMap::new(),
            reverse_map: HashMap::new(),
            fk_name_seq: 0,
            listener: Arc::new(NoopListener),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Record a source→target identity pair. The first registration for a
    /// source object wins; a run maps each source object at most once.
    pub fn map_objects(&mut self, source: ObjectId, target: ObjectId) {
        if !self.object_map.contains_key(&source) {
            self.object_map.insert(source, target);
            self.reverse_map.insert(target, source);
        }
    }

    /// Target object migrated from `source`, if any.
    pub fn target_of(&self, source: ObjectId) -> Option<ObjectId> {
        self.object_map.get(&source).copied()
    }

    /// Source object a target was migrated from, if known.
    pub fn source_of(&self, target: ObjectId) -> Option<ObjectId> {
        self.reverse_map.get(&target).copied()
    }

    /// Case-insensitive lookup in the target type catalog.
    pub fn simple_datatype(&self, name: &str) -> Option<&SimpleDatatype> {
        self.simple_datatypes
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Next value of the run-scoped foreign-key name sequence.
    pub fn next_fk_seq(&mut self) -> u32 {
        let seq = self.fk_name_seq;
        self.fk_name_seq += 1;
        seq
    }

    pub fn message(&self, text: &str) {
        info!("{}", text);
        self.listener.message(text);
    }

    pub fn progress(&self, action: &str, percent: i32) {
        self.listener.progress(action, percent);
    }

    /// Poll the cancellation flag; latches once set.
    pub fn check_cancelled(&mut self) -> bool {
        if !self.cancelled && self.listener.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("target_version", &self.target_version)
            .field("mapped_objects", &self.object_map.len())
            .field("log_entries", &self.log.entries().len())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

/// Registry of dialect migrators and their rated methods.
pub struct Dispatcher {
    migrators: Vec<Arc<dyn DialectMigrator>>,
    methods: Vec<Method>,
}

impl Dispatcher {
    /// Empty dispatcher; migrators must be registered explicitly.
    pub fn new() -> Self {
        Dispatcher {
            migrators: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Dispatcher with the generic migrator and every built-in dialect
    /// registered, generic first.
    pub fn with_builtins() -> Self {
        use crate::dialect::{
            access::AccessMigrator, generic::GenericMigrator, maxdb::MaxdbMigrator,
            mysql::MysqlMigrator, oracle::OracleMigrator, sybase::SybaseMigrator,
        };

        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(GenericMigrator));
        dispatcher.register(Arc::new(OracleMigrator));
        dispatcher.register(Arc::new(SybaseMigrator));
        dispatcher.register(Arc::new(MaxdbMigrator));
        dispatcher.register(Arc::new(AccessMigrator));
        dispatcher.register(Arc::new(MysqlMigrator));
        dispatcher
    }

    /// Register a migrator module and append its methods to the registry.
    /// Registration order is the tie-break for equally rated methods.
    pub fn register(&mut self, migrator: Arc<dyn DialectMigrator>) {
        self.methods.extend(migrator.methods());
        self.migrators.push(migrator);
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn migrator(&self, module: &str) -> Option<&dyn DialectMigrator> {
        self.migrators
            .iter()
            .find(|m| m.module_name() == module)
            .map(Arc::as_ref)
    }

    /// The registered migrator specialized for `dialect`, if any. The
    /// generic module consults this so that a source catalog's
    /// identifier policy applies even when the fallback implementation
    /// does the work.
    pub fn dialect_migrator(&self, dialect: SourceDialect) -> Option<&dyn DialectMigrator> {
        self.migrators
            .iter()
            .find(|m| m.source_dialect() == Some(dialect))
            .map(Arc::as_ref)
    }

    /// Migrate one source catalog into a target MySQL catalog.
    ///
    /// Builds the target catalog shell (name, version, type catalog),
    /// dispatches every schema, and finally resolves cross-references.
    /// Cancellation leaves the partial catalog and log in place.
    pub fn migrate_catalog(&self, mig: &mut Migration, source: &Catalog) -> Result<Catalog> {
        if self.migrators.is_empty() {
            return Err(MigrateError::config(
                "no migration modules registered in the dispatcher",
            ));
        }

        mig.message(&format!("Starting {} migration...", source.dialect));

        let mut target = Catalog::new("Standard", SourceDialect::Mysql);
        target.version = mig.target_version.clone();
        target.simple_datatypes = mig.simple_datatypes.clone();

        for source_schema in &source.schemata {
            let scope = SourceScope::catalog(source);
            if let Some(TargetObject::Schema(schema)) = self.migrate_object(
                mig,
                &scope,
                TargetParent::None,
                SourceRef::Schema(source_schema),
            ) {
                target.schemata.push(schema);
            }

            if mig.check_cancelled() {
                return Ok(target);
            }
        }

        xref::resolve_references(mig, &mut target);

        mig.message("Migration completed.");

        Ok(target)
    }

    /// Resolve and invoke the migration method for one source object.
    ///
    /// Returns the produced target object, or `None` when the object is
    /// ignored, no method applies, or the invocation failed (the latter
    /// two record an error log entry).
    pub fn migrate_object(
        &self,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: SourceRef<'_>,
    ) -> Option<TargetObject> {
        let kind = source.kind();

        // Schemata cannot be ignored; everything below them can.
        if kind != ObjectKind::Schema
            && mig
                .ignore_list
                .matches(kind, scope.owner_name(), source.name())
        {
            return None;
        }

        let dialect = scope.catalog.dialect;

        let binding = self.resolve_binding(mig, source, kind, dialect);

        let (module, method, params) = match binding {
            Some(b) => b,
            None => {
                mig.log.add_message(
                    source.id(),
                    source.name(),
                    None,
                    format!(
                        "There is no method defined to migrate an object of the type {}.",
                        kind
                    ),
                    Severity::Error,
                );
                return None;
            }
        };

        match self.invoke(mig, scope, parent, source, &module, &method, &params) {
            Ok(target) => target,
            Err(e) => {
                mig.log.add_message(
                    source.id(),
                    source.name(),
                    None,
                    format!(
                        "An error occurred when the migration method {}::{} was invoked for {} ({}).",
                        module,
                        method,
                        source.name(),
                        e
                    ),
                    Severity::Error,
                );
                None
            }
        }
    }

    /// Explicit object mapping, then class default, then best-rated scan.
    fn resolve_binding(
        &self,
        mig: &Migration,
        source: SourceRef<'_>,
        kind: ObjectKind,
        dialect: SourceDialect,
    ) -> Option<(String, String, ParamMap)> {
        if let Some(m) = mig
            .object_mappings
            .iter()
            .find(|m| m.source_object_id == source.id())
        {
            return Some((m.module.clone(), m.method.clone(), m.params.clone()));
        }

        if let Some(m) = mig.class_mappings.iter().find(|m| {
            m.kind == kind && m.source_dialect.map_or(true, |d| d == dialect)
        }) {
            return Some((m.module.clone(), m.method.clone(), m.params.clone()));
        }

        // Strictly-higher rating wins; equal ratings keep the earlier
        // registration.
        let mut best: Option<&Method> = None;
        for method in &self.methods {
            if method.applies_to(kind, dialect)
                && best.map_or(true, |b| method.rating > b.rating)
            {
                best = Some(method);
            }
        }

        best.map(|m| (m.module.clone(), m.name.clone(), m.params.clone()))
    }

    #[allow(clippy::too_many_arguments)]
    fn invoke(
        &self,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: SourceRef<'_>,
        module: &str,
        method: &str,
        params: &ParamMap,
    ) -> Result<Option<TargetObject>> {
        let migrator = self
            .migrator(module)
            .ok_or_else(|| MigrateError::dispatch(format!("unknown migration module `{}`", module)))?;

        match (source, method) {
            (SourceRef::Schema(s), "migrate_schema") => migrator
                .migrate_schema(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Schema(t))),
            (SourceRef::Table(s), "migrate_table") => migrator
                .migrate_table(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Table(t))),
            (SourceRef::Column(s), "migrate_column") => migrator
                .migrate_column(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Column(t))),
            (SourceRef::Index(s), "migrate_index") => migrator
                .migrate_index(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Index(t))),
            (SourceRef::ForeignKey(s), "migrate_foreign_key") => migrator
                .migrate_foreign_key(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::ForeignKey(t))),
            (SourceRef::View(s), "migrate_view") => migrator
                .migrate_view(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::View(t))),
            (SourceRef::Routine(s), "migrate_routine") => migrator
                .migrate_routine(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Routine(t))),
            (SourceRef::Synonym(s), "migrate_synonym") => migrator
                .migrate_synonym(self, mig, scope, parent, s, params)
                .map(|t| t.map(TargetObject::Synonym)),
            (SourceRef::Trigger(s), "migrate_trigger") => migrator
                .migrate_trigger(self, mig, scope, parent, s, params)
                .map(|t| Some(TargetObject::Trigger(t))),
            _ => Err(MigrateError::dispatch(format!(
                "method `{}::{}` cannot migrate an object of the type {}",
                module,
                method,
                source.kind()
            ))),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "migrators",
                &self
                    .migrators
                    .iter()
                    .map(|m| m.module_name())
                    .collect::<Vec<_>>(),
            )
            .field("methods", &self.methods.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Ignore-list glob translation
    // =========================================================================

    #[test]
    fn test_glob_to_regex_escapes_literals() {
        assert_eq!(glob_to_regex("Table:S.emp"), "^Table:S\\.emp$");
        assert_eq!(glob_to_regex("Table:*.tmp?"), "^Table:.*\\.tmp.$");
        assert_eq!(glob_to_regex("View:A.V$x"), "^View:A\\.V\\$x$");
    }

    #[test]
    fn test_ignore_list_matches_full_string_only() {
        let mut list = IgnoreList::default();
        list.add("Table:SCOTT.TMP_*");

        assert!(list.matches(ObjectKind::Table, "SCOTT", "TMP_SALES"));
        assert!(!list.matches(ObjectKind::Table, "SCOTT", "EMP"));
        // prefix of a matching name is not a full match
        assert!(!list.matches(ObjectKind::View, "SCOTT", "TMP_SALES"));
    }

    #[test]
    fn test_ignore_list_question_mark_matches_one_char() {
        let mut list = IgnoreList::default();
        list.add("Table:S.emp?");
        assert!(list.matches(ObjectKind::Table, "S", "emp1"));
        assert!(!list.matches(ObjectKind::Table, "S", "emp"));
        assert!(!list.matches(ObjectKind::Table, "S", "emp12"));
    }

    // =========================================================================
    // Method registry
    // =========================================================================

    #[test]
    fn test_method_applicability() {
        let generic = Method::new("generic", "migrate_column", ObjectKind::Column);
        assert!(generic.applies_to(ObjectKind::Column, SourceDialect::Oracle));
        assert!(generic.applies_to(ObjectKind::Column, SourceDialect::Generic));
        assert!(!generic.applies_to(ObjectKind::Table, SourceDialect::Oracle));

        let oracle = Method::new("oracle", "migrate_column", ObjectKind::Column)
            .dialect(SourceDialect::Oracle)
            .rating(1);
        assert!(oracle.applies_to(ObjectKind::Column, SourceDialect::Oracle));
        assert!(!oracle.applies_to(ObjectKind::Column, SourceDialect::Sybase));
    }

    #[test]
    fn test_migration_object_map_keeps_first_entry() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let src = ObjectId::new();
        let a = ObjectId::new();
        let b = ObjectId::new();

        mig.map_objects(src, a);
        mig.map_objects(src, b);
        assert_eq!(mig.target_of(src), Some(a));
    }

    #[test]
    fn test_migration_default_version_for_mysql_target() {
        let mig = Migration::new(&Rdbms::mysql(), None);
        assert_eq!(mig.target_version, Version::new(5, 0, 21));

        let other = Rdbms {
            name: "Generic".to_string(),
            simple_datatypes: Vec::new(),
        };
        let mig = Migration::new(&other, None);
        assert_eq!(mig.target_version, Version::new(1, 0, 0));
    }

    #[test]
    fn test_fk_seq_is_run_scoped() {
        let mut a = Migration::new(&Rdbms::mysql(), None);
        let mut b = Migration::new(&Rdbms::mysql(), None);
        assert_eq!(a.next_fk_seq(), 0);
        assert_eq!(a.next_fk_seq(), 1);
        // a fresh run starts over
        assert_eq!(b.next_fk_seq(), 0);
    }
}
