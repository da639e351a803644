//! Generic migrators: the dialect-independent baseline.
//!
//! Every routine here takes the active [`DialectMigrator`] as its first
//! argument so the caller's identifier policy applies; dialect modules
//! delegate to these functions and layer their own behavior on top.
//!
//! Nested collections (columns, indices, foreign keys, views, routines)
//! are migrated through [`Dispatcher::migrate_object`], never inlined, so
//! mapping overrides, ratings and the ignore list apply uniformly at
//! every level of the tree.

use crate::core::identifier;
use crate::core::schema::{
    Column, DatatypeGroup, ForeignKey, Index, IndexColumn, ObjectId, ObjectKind, Routine, Schema,
    Table, View,
};
use crate::dialect::{self, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceRef, SourceScope, TargetObject, TargetParent};
use crate::error::Result;
use crate::log::Severity;
use crate::params::{
    resolve_target_name, ColumnParams, ForeignKeyParams, IndexParams, ParamMap, RoutineParams,
    SchemaParams, TableParams, ViewParams,
};
use crate::typemap;

/// Record the creation of a target object: source→target identity pair
/// plus the log entry that keeps partially migrated objects traceable.
pub(crate) fn register(
    mig: &mut Migration,
    source_id: ObjectId,
    source_name: &str,
    target_id: ObjectId,
    target_name: &str,
) {
    mig.map_objects(source_id, target_id);
    mig.log.register(source_id, source_name, target_id, target_name);
}

/// Flag parameter keys nobody recognizes instead of dropping them.
pub(crate) fn warn_unknown_params(
    mig: &mut Migration,
    source_id: ObjectId,
    source_name: &str,
    unknown: &[String],
) {
    if !unknown.is_empty() {
        mig.log.add_message(
            source_id,
            source_name,
            None,
            format!(
                "Unrecognized migration parameter(s): {}.",
                unknown.join(", ")
            ),
            Severity::Warning,
        );
    }
}

/// Migrate a schema: tables first, then foreign keys (which need every
/// table of the schema migrated so references can be found), then views
/// and routines. Cancellation is polled between objects and returns the
/// partial schema.
pub fn migrate_schema(
    m: &dyn DialectMigrator,
    disp: &Dispatcher,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    source: &Schema,
    params: &ParamMap,
) -> Result<Schema> {
    mig.message(&format!("Migrating schema {} ...", source.name));

    let mut target = Schema::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();

    let (schema_params, unknown) = SchemaParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);
    if let Some(charset) = schema_params.charset {
        target.default_character_set_name = charset;
    }
    if let Some(collation) = schema_params.collation {
        target.default_collation_name = collation;
    }

    let child_scope = SourceScope::schema(scope.catalog, source);

    // tables
    mig.message("Migrating tables ...");
    let total = source.tables.len().max(1);
    for (i, source_table) in source.tables.iter().enumerate() {
        mig.progress(
            &format!("Migrating table {}", source_table.name),
            (i * 100 / total) as i32,
        );
        if mig.check_cancelled() {
            mig.message("Migration canceled by user.");
            return Ok(target);
        }

        if let Some(TargetObject::Table(table)) = disp.migrate_object(
            mig,
            &child_scope,
            TargetParent::None,
            SourceRef::Table(source_table),
        ) {
            target.tables.push(table);
        }
    }

    // foreign keys, once all tables of the schema exist
    for source_table in &source.tables {
        migrate_table_foreign_keys(disp, mig, scope, source, source_table, &mut target);
    }

    // views
    mig.message("Migrating views ...");
    let total = source.views.len().max(1);
    for (i, source_view) in source.views.iter().enumerate() {
        mig.progress(
            &format!("Migrating view {}", source_view.name),
            (i * 100 / total) as i32,
        );
        if mig.check_cancelled() {
            mig.message("Migration canceled by user.");
            return Ok(target);
        }

        if let Some(TargetObject::View(view)) = disp.migrate_object(
            mig,
            &child_scope,
            TargetParent::None,
            SourceRef::View(source_view),
        ) {
            target.views.push(view);
        }
    }

    // routines
    mig.message("Migrating routines ...");
    let total = source.routines.len().max(1);
    for (i, source_routine) in source.routines.iter().enumerate() {
        mig.progress(
            &format!("Migrating routine {}", source_routine.name),
            (i * 100 / total) as i32,
        );
        if mig.check_cancelled() {
            mig.message("Migration canceled by user.");
            return Ok(target);
        }

        if let Some(TargetObject::Routine(routine)) = disp.migrate_object(
            mig,
            &child_scope,
            TargetParent::None,
            SourceRef::Routine(source_routine),
        ) {
            target.routines.push(routine);
        }
    }

    mig.progress("", -1);

    Ok(target)
}

/// Dispatch the foreign keys of one source table into its already
/// migrated target table.
pub fn migrate_table_foreign_keys(
    disp: &Dispatcher,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    source_schema: &Schema,
    source_table: &Table,
    target_schema: &mut Schema,
) {
    let Some(target_table_id) = mig.target_of(source_table.id) else {
        return;
    };

    for source_fk in &source_table.foreign_keys {
        let fk_scope = SourceScope::table(scope.catalog, source_schema, source_table);
        let migrated = {
            let parent = target_schema
                .table_by_id(target_table_id)
                .map(TargetParent::Table)
                .unwrap_or(TargetParent::None);
            disp.migrate_object(mig, &fk_scope, parent, SourceRef::ForeignKey(source_fk))
        };

        if let Some(TargetObject::ForeignKey(fk)) = migrated {
            if let Some(table) = target_schema.table_by_id_mut(target_table_id) {
                table.foreign_keys.push(fk);
            }
        }
    }
}

/// Migrate a table: scalar attributes, then columns, indices and the
/// primary-key/auto-increment fixups.
pub fn migrate_table(
    m: &dyn DialectMigrator,
    disp: &Dispatcher,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    source: &Table,
    params: &ParamMap,
) -> Result<Table> {
    let mut target = Table::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();

    let (table_params, unknown) = TableParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);
    if let Some(charset) = &table_params.charset {
        target.default_character_set_name = charset.clone();
    }
    if let Some(collation) = &table_params.collation {
        target.default_collation_name = collation.clone();
    }
    if let Some(engine) = &table_params.engine {
        target.table_engine = engine.clone();
    }

    let child_scope = SourceScope {
        catalog: scope.catalog,
        schema: scope.schema,
        table: Some(source),
    };

    // columns
    for source_column in &source.columns {
        if let Some(TargetObject::Column(column)) = disp.migrate_object(
            mig,
            &child_scope,
            TargetParent::None,
            SourceRef::Column(source_column),
        ) {
            target.columns.push(column);
        }
    }

    // indices; the target table is the parent so index columns can see
    // their referred columns' migrated types
    for source_index in &source.indices {
        let migrated = disp.migrate_object(
            mig,
            &child_scope,
            TargetParent::Table(&target),
            SourceRef::Index(source_index),
        );
        if let Some(TargetObject::Index(index)) = migrated {
            target.indices.push(index);
        }
    }

    // primary key: mark the migrated index and force its columns NOT NULL
    if let Some(source_pk) = source.primary_key() {
        if let Some(target_pk_id) = mig.target_of(source_pk.id) {
            let mut pk_column_ids = Vec::new();
            if let Some(pk) = target.indices.iter_mut().find(|i| i.id == target_pk_id) {
                pk.primary = true;
                pk_column_ids.extend(pk.columns.iter().filter_map(|c| c.referred_column));
            }
            for column_id in pk_column_ids {
                if let Some(column) = target.column_by_id_mut(column_id) {
                    column.is_nullable = false;
                }
            }
        }
    }

    // addAutoincrement: a single-column integer primary key becomes
    // auto-increment
    if table_params.add_autoincrement {
        let candidate = target
            .primary_key()
            .filter(|pk| pk.columns.len() == 1)
            .and_then(|pk| pk.columns[0].referred_column)
            .filter(|id| {
                target.column_by_id(*id).is_some_and(|c| {
                    c.datatype_name.eq_ignore_ascii_case("INT")
                        || c.datatype_name.eq_ignore_ascii_case("INTEGER")
                })
            });
        if let Some(column_id) = candidate {
            if let Some(column) = target.column_by_id_mut(column_id) {
                column.auto_increment = true;
            }
        }
    }

    ensure_single_auto_increment(&mut target);

    Ok(target)
}

/// MySQL allows one auto-increment column and it must belong to the
/// primary key. Extra auto-increment columns are cleared; an
/// auto-increment column on a table without a primary key gets a
/// synthetic one.
fn ensure_single_auto_increment(table: &mut Table) {
    let pk_column_ids: Option<Vec<ObjectId>> = table
        .primary_key()
        .map(|pk| pk.columns.iter().filter_map(|c| c.referred_column).collect());

    let mut kept = false;
    let mut needs_synthetic_pk: Option<ObjectId> = None;

    for i in 0..table.columns.len() {
        if !table.columns[i].auto_increment {
            continue;
        }
        if kept {
            table.columns[i].auto_increment = false;
            continue;
        }
        match &pk_column_ids {
            Some(ids) => {
                if ids.contains(&table.columns[i].id) {
                    kept = true;
                } else {
                    table.columns[i].auto_increment = false;
                }
            }
            None => {
                needs_synthetic_pk = Some(table.columns[i].id);
                kept = true;
            }
        }
    }

    if let Some(column_id) = needs_synthetic_pk {
        let column_name = table
            .column_by_id(column_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let mut pk = Index::new("PRIMARY");
        pk.primary = true;
        let mut pk_column = IndexColumn::new(column_name);
        pk_column.referred_column = Some(column_id);
        pk.columns.push(pk_column);
        table.indices.push(pk);
    }
}

/// Shared column prologue: allocate the target column, register it in
/// the log and map, and copy the scalar fields every dialect copies.
pub fn new_target_column(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    source: &Column,
    params: &ParamMap,
) -> Column {
    let mut target = Column::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();
    target.default_value = source.default_value.clone();
    target.default_value_is_null = source.default_value_is_null;
    target.is_nullable = source.is_nullable;
    target.precision = source.precision;
    target.scale = source.scale;
    target.length = source.length;
    target
}

/// Apply forced column parameters. Returns true when an explicit
/// datatype was forced, which short-circuits all dialect inference.
pub fn apply_column_params(target: &mut Column, params: &ColumnParams) -> bool {
    if let Some(precision) = params.force_precision {
        target.precision = precision;
        if let Some(scale) = params.force_scale {
            target.scale = scale;
        }
    }
    if let Some(length) = params.force_length {
        target.length = length;
    }
    if let Some(datatype) = &params.force_datatype_name {
        target.datatype_name = datatype.clone();
        return true;
    }
    false
}

/// Column epilogue shared by every dialect: link the simple type, apply
/// the never-silently-drop fallback, and normalize TIMESTAMP defaults.
pub fn finish_column(mig: &mut Migration, source: &Column, target: &mut Column) {
    if !target.datatype_name.is_empty() {
        if let Some(datatype) = mig.simple_datatype(&target.datatype_name) {
            target.simple_type = Some(datatype.name.clone());
        }
    }

    // a column is never dropped for lack of a mapping; it degrades to
    // VARCHAR(255) with an error entry naming the source type
    if target.datatype_name.is_empty() || target.simple_type.is_none() {
        mig.log.add_message(
            source.id,
            &source.name,
            Some((target.id, &target.name)),
            format!("The datatype {} cannot be migrated.", source.datatype_name),
            Severity::Error,
        );
        target.datatype_name = "VARCHAR".to_string();
        target.length = 255;
        target.simple_type = mig.simple_datatype("VARCHAR").map(|d| d.name.clone());
    }

    if target.datatype_name.eq_ignore_ascii_case("TIMESTAMP")
        && (target.default_value.eq_ignore_ascii_case("NOW")
            || target.default_value.eq_ignore_ascii_case("'NOW'"))
    {
        target.default_value = "CURRENT_TIMESTAMP".to_string();
    }
}

/// Migrate a column: registry lookup by source type name, then the
/// declarative mapping table, then the shared epilogue.
pub fn migrate_column(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    source: &Column,
    params: &ParamMap,
) -> Result<Column> {
    let mut target = new_target_column(m, mig, source, params);

    let (column_params, unknown) = ColumnParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);

    if !apply_column_params(&mut target, &column_params) {
        // a source type the target knows by name maps to itself
        if let Some(datatype) = mig.simple_datatype(&source.datatype_name) {
            target.datatype_name = datatype.name.clone();
            target.simple_type = Some(datatype.name.clone());
        }

        if !target.name.is_empty() {
            typemap::apply_first_match(&mig.datatype_mappings, source, &mut target);
        }
    }

    finish_column(mig, source, &mut target);

    Ok(target)
}

/// Migrate an index: 31-char name ceiling, then per-column prefix-length
/// rules driven by the referred target column's datatype group.
pub fn migrate_index(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    parent: TargetParent<'_>,
    source: &Index,
    params: &ParamMap,
) -> Result<Index> {
    let mut target = Index::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    if target.name.chars().count() > 31 {
        target.name = target.name.chars().take(31).collect();
    }
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();
    target.unique = source.unique;

    let (index_params, unknown) = IndexParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);

    let Some(source_table) = scope.table else {
        return Ok(target);
    };
    let target_table = parent.table();

    for source_index_column in &source.columns {
        let Some(source_column) = source_table.column_by_name(&source_index_column.name) else {
            continue;
        };

        let referred_id = mig.target_of(source_column.id);
        let referred_column = referred_id.and_then(|id| target_table.and_then(|t| t.column_by_id(id)));

        let mut target_column = IndexColumn::new(
            referred_column
                .map(|c| c.name.clone())
                .unwrap_or_else(|| m.migrate_identifier(&source_index_column.name)),
        );
        target_column.referred_column = referred_id;
        target_column.descending = source_index_column.descending;

        target_column.column_length = if index_params.forced_index_length > 0 {
            index_params.forced_index_length
        } else {
            let mut length = source_index_column.column_length;

            if let Some(column) = referred_column {
                let group = column
                    .simple_type
                    .as_deref()
                    .and_then(|name| mig.simple_datatype(name))
                    .map(|d| d.group);

                if let Some(group) = group {
                    let prefixable = matches!(
                        group,
                        DatatypeGroup::String | DatatypeGroup::Text | DatatypeGroup::Blob
                    );
                    // only string, text or blob columns carry a prefix length
                    if length > 0 && !prefixable {
                        length = 0;
                    }
                    // text and blob columns must have one
                    if length == 0
                        && matches!(group, DatatypeGroup::Text | DatatypeGroup::Blob)
                    {
                        length = 45;
                    }
                }
            }

            // cap at 500 so at least two columns fit into one index
            if length > 500 {
                length = 500;
            }

            if let Some(column) = referred_column {
                if column.length > 0 && length > column.length {
                    length = column.length;
                }
            }

            length
        };

        target.columns.push(target_column);
    }

    Ok(target)
}

/// Migrate a foreign key under the standard name policy.
pub fn migrate_foreign_key(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    source: &ForeignKey,
    params: &ParamMap,
) -> Result<ForeignKey> {
    let name = resolve_target_name(params, m.migrate_identifier(&source.name));
    migrate_foreign_key_named(m, mig, scope, source, params, name)
}

/// Migrate a foreign key with a caller-chosen target name (MaxDB appends
/// a uniqueness suffix before the name policy applies).
pub fn migrate_foreign_key_named(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    scope: &SourceScope<'_>,
    source: &ForeignKey,
    params: &ParamMap,
    name: String,
) -> Result<ForeignKey> {
    let mut target = ForeignKey::new(name);
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();

    let (fk_params, unknown) = ForeignKeyParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);

    if fk_params.override_rules {
        target.delete_rule = fk_params.default_delete_rule.clone();
        target.update_rule = fk_params.default_update_rule.clone();
    } else {
        target.delete_rule = source.delete_rule.clone();
        target.update_rule = source.update_rule.clone();
    }

    target.deferability = source.deferability;
    target.referred_table_schema_name =
        m.migrate_identifier(&source.referred_table_schema_name);
    target.referred_table_name = m.migrate_identifier(&source.referred_table_name);

    // local columns through the source→target map
    if let Some(source_table) = scope.table {
        for column_name in &source.column_names {
            if let Some(source_column) = source_table.column_by_name(column_name) {
                if let Some(target_id) = mig.target_of(source_column.id) {
                    target.columns.push(target_id);
                }
            }
            target.column_names.push(m.migrate_identifier(column_name));
        }
    }

    // referred objects the source graph already resolved; names are kept
    // for the cross-reference pass either way
    if let Some(referred_table) = source.referred_table {
        target.referred_table = mig.target_of(referred_table);
    }
    for referred_column in &source.referred_columns {
        if let Some(target_id) = mig.target_of(*referred_column) {
            target.referred_columns.push(target_id);
        }
    }
    for name in &source.referred_column_names {
        target.referred_column_names.push(m.migrate_identifier(name));
    }

    Ok(target)
}

/// Migrate a view: copy the query text, strip a trailing WITH CHECK
/// OPTION clause, and comment the result out for manual review.
pub fn migrate_view(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    source: &View,
    params: &ParamMap,
) -> Result<View> {
    let mut target = View::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();
    target.with_check_condition = source.with_check_condition;

    let (_view_params, unknown) = ViewParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);

    let mut query = source.query_expression.trim().to_string();
    if query.to_uppercase().ends_with("WITH CHECK OPTION") {
        query.truncate(query.len() - "WITH CHECK OPTION".len());
        query = query.trim_end().to_string();
    }
    target.query_expression = query;

    target.columns = source.columns.clone();

    target.commented_out = true;
    mig.log.add_message(
        source.id,
        &source.name,
        Some((target.id, &target.name)),
        "The generated SQL has to be checked manually.",
        Severity::Warning,
    );

    Ok(target)
}

/// Migrate a routine: copy the body verbatim and comment it out for
/// manual review.
pub fn migrate_routine(
    m: &dyn DialectMigrator,
    mig: &mut Migration,
    source: &Routine,
    params: &ParamMap,
) -> Result<Routine> {
    let mut target = Routine::new(resolve_target_name(
        params,
        m.migrate_identifier(&source.name),
    ));
    register(mig, source.id, &source.name, target.id, &target.name);
    target.old_name = source.name.clone();
    target.routine_type = source.routine_type.clone();
    target.routine_code = source.routine_code.trim().to_string();

    let (_routine_params, unknown) = RoutineParams::from_params(params);
    warn_unknown_params(mig, source.id, &source.name, &unknown);

    target.commented_out = true;
    mig.log.add_message(
        source.id,
        &source.name,
        Some((target.id, &target.name)),
        "The generated SQL has to be checked manually.",
        Severity::Warning,
    );

    Ok(target)
}

/// The generic migrator module: rating-0 fallback for every source
/// dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericMigrator;

impl DialectMigrator for GenericMigrator {
    fn module_name(&self) -> &'static str {
        "generic"
    }

    fn methods(&self) -> Vec<Method> {
        vec![
            Method::new("generic", "migrate_schema", ObjectKind::Schema)
                .caption("Generic")
                .describe("Generic method to migrate a schema to MySQL.")
                .params(dialect::default_schema_params()),
            Method::new("generic", "migrate_table", ObjectKind::Table)
                .caption("Generic")
                .describe("Generic method to migrate a table to MySQL.")
                .params(dialect::default_table_params()),
            Method::new("generic", "migrate_column", ObjectKind::Column)
                .caption("Generic")
                .describe("Generic method to migrate a column to MySQL.")
                .params(dialect::default_column_params()),
            Method::new("generic", "migrate_index", ObjectKind::Index)
                .caption("Generic")
                .describe("Generic method to migrate an index to MySQL.")
                .params(dialect::default_index_params()),
            Method::new("generic", "migrate_foreign_key", ObjectKind::ForeignKey)
                .caption("Generic")
                .describe("Generic method to migrate a foreign key to MySQL.")
                .params(dialect::default_foreign_key_params()),
            Method::new("generic", "migrate_view", ObjectKind::View)
                .caption("Generic")
                .describe("Generic method to migrate a view to MySQL.")
                .params(dialect::default_view_params()),
            Method::new("generic", "migrate_routine", ObjectKind::Routine)
                .caption("Generic")
                .describe("Generic method to migrate a routine to MySQL.")
                .params(dialect::default_routine_params()),
        ]
    }

    fn migrate_identifier(&self, name: &str) -> String {
        identifier::pass_through(name)
    }

    fn migrate_schema(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Schema,
        params: &ParamMap,
    ) -> Result<Schema> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_schema(policy, disp, mig, scope, source, params)
    }

    fn migrate_table(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Table,
        params: &ParamMap,
    ) -> Result<Table> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_table(policy, disp, mig, scope, source, params)
    }

    fn migrate_column(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Column,
        params: &ParamMap,
    ) -> Result<Column> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_column(policy, mig, source, params)
    }

    fn migrate_index(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Index,
        params: &ParamMap,
    ) -> Result<Index> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_index(policy, mig, scope, parent, source, params)
    }

    fn migrate_foreign_key(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &ForeignKey,
        params: &ParamMap,
    ) -> Result<ForeignKey> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_foreign_key(policy, mig, scope, source, params)
    }

    fn migrate_view(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &View,
        params: &ParamMap,
    ) -> Result<View> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_view(policy, mig, source, params)
    }

    fn migrate_routine(
        &self,
        disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Routine,
        params: &ParamMap,
    ) -> Result<Routine> {
        let policy = disp.dialect_migrator(scope.catalog.dialect).unwrap_or(self);
        migrate_routine(policy, mig, source, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Rdbms;

    fn test_migration() -> Migration {
        Migration::new(&Rdbms::mysql(), None)
    }

    fn source_column(name: &str, datatype: &str) -> Column {
        let mut col = Column::new(name);
        col.datatype_name = datatype.to_string();
        col
    }

    #[test]
    fn test_finish_column_falls_back_to_varchar_255() {
        let mut mig = test_migration();
        let source = source_column("c", "FROB");
        let mut target = Column::new("c");

        finish_column(&mut mig, &source, &mut target);

        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.length, 255);
        assert_eq!(target.simple_type.as_deref(), Some("VARCHAR"));
        assert_eq!(mig.log.error_count(), 1);
        let entry = mig.log.entry_for(source.id).unwrap();
        assert!(entry.messages[0].text.contains("FROB"));
    }

    #[test]
    fn test_finish_column_rewrites_timestamp_now_default() {
        let mut mig = test_migration();
        let source = source_column("ts", "TIMESTAMP");
        let mut target = Column::new("ts");
        target.datatype_name = "TIMESTAMP".to_string();
        target.default_value = "'NOW'".to_string();

        finish_column(&mut mig, &source, &mut target);
        assert_eq!(target.default_value, "CURRENT_TIMESTAMP");
    }

    #[test]
    fn test_generic_column_uses_target_registry_by_name() {
        let mut mig = test_migration();
        let source = source_column("n", "varchar");
        let target = migrate_column(&GenericMigrator, &mut mig, &source, &ParamMap::new()).unwrap();
        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.simple_type.as_deref(), Some("VARCHAR"));
        assert_eq!(mig.log.error_count(), 0);
    }

    #[test]
    fn test_forced_datatype_short_circuits_inference() {
        let mut mig = test_migration();
        let source = source_column("n", "WEIRD");
        let mut params = ParamMap::new();
        params.set("forceDatatypeName", "BIGINT");

        let target = migrate_column(&GenericMigrator, &mut mig, &source, &params).unwrap();
        assert_eq!(target.datatype_name, "BIGINT");
        assert_eq!(mig.log.error_count(), 0);
    }

    #[test]
    fn test_view_strips_trailing_with_check_option() {
        let mut mig = test_migration();
        let mut source = View::new("v1");
        source.query_expression = "SELECT * FROM t WITH CHECK OPTION".to_string();

        let target = migrate_view(&GenericMigrator, &mut mig, &source, &ParamMap::new()).unwrap();
        assert_eq!(target.query_expression, "SELECT * FROM t");
        assert!(target.commented_out);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_index_name_truncated_to_31_chars() {
        let mut mig = test_migration();
        let catalog = crate::core::schema::Catalog::new("c", crate::core::schema::SourceDialect::Generic);
        let scope = SourceScope::catalog(&catalog);
        let source = Index::new("a_very_long_index_name_that_exceeds_the_limit");

        let target = migrate_index(
            &GenericMigrator,
            &mut mig,
            &scope,
            TargetParent::None,
            &source,
            &ParamMap::new(),
        )
        .unwrap();
        assert_eq!(target.name.len(), 31);
        assert_eq!(target.name, "a_very_long_index_name_that_exc");
        assert_eq!(target.old_name, source.name);
    }

    #[test]
    fn test_synthetic_primary_key_for_stray_auto_increment() {
        let mut table = Table::new("t");
        let mut col = Column::new("id");
        col.auto_increment = true;
        table.columns.push(col);

        ensure_single_auto_increment(&mut table);

        let pk = table.primary_key().unwrap();
        assert_eq!(pk.name, "PRIMARY");
        assert_eq!(pk.columns.len(), 1);
        assert_eq!(pk.columns[0].name, "id");
        assert!(table.columns[0].auto_increment);
    }

    #[test]
    fn test_auto_increment_outside_primary_key_is_cleared() {
        let mut table = Table::new("t");
        let mut id = Column::new("id");
        id.auto_increment = true;
        let mut other = Column::new("other");
        other.auto_increment = true;
        table.columns.push(id);
        table.columns.push(other);

        let id_col = table.columns[0].id;
        let mut pk = Index::new("PRIMARY");
        pk.primary = true;
        let mut pk_col = IndexColumn::new("id");
        pk_col.referred_column = Some(id_col);
        pk.columns.push(pk_col);
        table.indices.push(pk);

        ensure_single_auto_increment(&mut table);
        assert!(table.columns[0].auto_increment);
        assert!(!table.columns[1].auto_increment);
    }
}
