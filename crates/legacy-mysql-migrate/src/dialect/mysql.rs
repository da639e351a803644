//! MySQL-to-MySQL migrators.
//!
//! Migrating from a MySQL source is an identity mapping: datatypes,
//! character sets, flags and SQL bodies carry over unchanged, and views
//! and routines stay active instead of being commented out for review.

use crate::core::identifier;
use crate::core::schema::{
    Column, ForeignKey, Index, ObjectKind, Routine, Schema, SourceDialect, Table, View,
};
use crate::dialect::{self, generic, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceScope, TargetParent};
use crate::error::Result;
use crate::params::{resolve_target_name, ColumnParams, ParamMap, TableParams};

/// MySQL migrator module.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlMigrator;

impl DialectMigrator for MysqlMigrator {
    fn module_name(&self) -> &'static str {
        "mysql"
    }

    fn source_dialect(&self) -> Option<SourceDialect> {
        Some(SourceDialect::Mysql)
    }

    fn methods(&self) -> Vec<Method> {
        vec![
            Method::new("mysql", "migrate_schema", ObjectKind::Schema)
                .caption("MySQL Default")
                .describe("Default method to migrate a MySQL schema to MySQL.")
                .dialect(SourceDialect::Mysql)
                .rating(1)
                .params(dialect::default_schema_params()),
            Method::new("mysql", "migrate_table", ObjectKind::Table)
                .caption("MySQL Default")
                .describe("Default method to migrate a MySQL table to MySQL.")
                .dialect(SourceDialect::Mysql)
                .rating(1)
                .params(dialect::default_table_params()),
            Method::new("mysql", "migrate_column", ObjectKind::Column)
                .caption("MySQL Default")
                .describe("Default method to migrate a MySQL column to MySQL.")
                .dialect(SourceDialect::Mysql)
                .rating(1)
                .params(dialect::default_column_params()),
            Method::new("mysql", "migrate_view", ObjectKind::View)
                .caption("MySQL Default")
                .describe("Default method to migrate a MySQL view to MySQL.")
                .dialect(SourceDialect::Mysql)
                .rating(1)
                .params(dialect::default_view_params()),
            Method::new("mysql", "migrate_routine", ObjectKind::Routine)
                .caption("MySQL Default")
                .describe("Default method to migrate a MySQL routine to MySQL.")
                .dialect(SourceDialect::Mysql)
                .rating(1)
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
        generic::migrate_schema(self, disp, mig, scope, source, params)
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
        let mut target = generic::migrate_table(self, disp, mig, scope, source, params)?;

        // no engine override requested: keep the source table's engine
        let (table_params, _) = TableParams::from_params(params);
        if table_params.engine.is_none() {
            target.table_engine = source.table_engine.clone();
        }

        Ok(target)
    }

    fn migrate_column(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Column,
        params: &ParamMap,
    ) -> Result<Column> {
        let mut target = generic::new_target_column(self, mig, source, params);
        target.datatype_explicit_params = source.datatype_explicit_params.clone();

        let (column_params, unknown) = ColumnParams::from_params(params);
        generic::warn_unknown_params(mig, source.id, &source.name, &unknown);

        if !generic::apply_column_params(&mut target, &column_params) {
            target.datatype_name = source.datatype_name.clone();
        }

        generic::finish_column(mig, source, &mut target);

        target.character_set_name = source.character_set_name.clone();
        target.collation_name = source.collation_name.clone();
        target.auto_increment = source.auto_increment;
        for flag in &source.flags {
            target.add_flag(flag);
        }

        Ok(target)
    }

    fn migrate_index(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        parent: TargetParent<'_>,
        source: &Index,
        params: &ParamMap,
    ) -> Result<Index> {
        generic::migrate_index(self, mig, scope, parent, source, params)
    }

    fn migrate_foreign_key(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &ForeignKey,
        params: &ParamMap,
    ) -> Result<ForeignKey> {
        generic::migrate_foreign_key(self, mig, scope, source, params)
    }

    fn migrate_view(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &View,
        params: &ParamMap,
    ) -> Result<View> {
        let mut target = View::new(resolve_target_name(
            params,
            self.migrate_identifier(&source.name),
        ));
        generic::register(mig, source.id, &source.name, target.id, &target.name);
        target.old_name = source.name.clone();
        target.with_check_condition = source.with_check_condition;

        let mut query = source.query_expression.trim().to_string();
        if query.to_uppercase().ends_with("WITH CHECK OPTION") {
            query.truncate(query.len() - "WITH CHECK OPTION".len());
            query = query.trim_end().to_string();
        }
        target.query_expression = query;
        target.columns = source.columns.clone();

        // the SQL is already MySQL; leave the view active
        target.commented_out = false;

        Ok(target)
    }

    fn migrate_routine(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Routine,
        params: &ParamMap,
    ) -> Result<Routine> {
        let mut target = Routine::new(resolve_target_name(
            params,
            self.migrate_identifier(&source.name),
        ));
        generic::register(mig, source.id, &source.name, target.id, &target.name);
        target.old_name = source.name.clone();
        target.routine_type = source.routine_type.clone();
        target.routine_code = source.routine_code.clone();
        target.commented_out = false;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Catalog, Rdbms};

    fn scope_fixture() -> Catalog {
        Catalog::new("db", SourceDialect::Mysql)
    }

    #[test]
    fn test_column_identity_migration() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = scope_fixture();
        let scope = SourceScope::catalog(&catalog);

        let mut source = Column::new("status");
        source.datatype_name = "ENUM".to_string();
        source.datatype_explicit_params = "('new','done')".to_string();
        source.character_set_name = "utf8".to_string();
        source.collation_name = "utf8_general_ci".to_string();
        source.auto_increment = false;
        source.flags.push("UNSIGNED".to_string());

        let target = MysqlMigrator
            .migrate_column(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &source,
                &ParamMap::new(),
            )
            .unwrap();
        assert_eq!(target.datatype_name, "ENUM");
        assert_eq!(target.datatype_explicit_params, "('new','done')");
        assert_eq!(target.character_set_name, "utf8");
        assert_eq!(target.flags, vec!["UNSIGNED".to_string()]);
        assert_eq!(mig.log.error_count(), 0);
    }

    #[test]
    fn test_view_stays_active() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = scope_fixture();
        let scope = SourceScope::catalog(&catalog);

        let mut source = View::new("v");
        source.query_expression = "SELECT 1 WITH CHECK OPTION".to_string();

        let target = MysqlMigrator
            .migrate_view(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &source,
                &ParamMap::new(),
            )
            .unwrap();
        assert!(!target.commented_out);
        assert_eq!(target.query_expression, "SELECT 1");
        assert_eq!(mig.log.warning_count(), 0);
    }

    #[test]
    fn test_routine_stays_active_and_untrimmed() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = scope_fixture();
        let scope = SourceScope::catalog(&catalog);

        let mut source = Routine::new("p");
        source.routine_type = "PROCEDURE".to_string();
        source.routine_code = "BEGIN SELECT 1; END\n".to_string();

        let target = MysqlMigrator
            .migrate_routine(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &source,
                &ParamMap::new(),
            )
            .unwrap();
        assert!(!target.commented_out);
        assert_eq!(target.routine_code, "BEGIN SELECT 1; END\n");
    }

    #[test]
    fn test_table_keeps_source_engine_without_override() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::with_builtins();
        let catalog = scope_fixture();
        let scope = SourceScope::catalog(&catalog);

        let mut source = Table::new("t");
        source.table_engine = "MyISAM".to_string();

        let target = MysqlMigrator
            .migrate_table(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &source,
                &ParamMap::new(),
            )
            .unwrap();
        assert_eq!(target.table_engine, "MyISAM");

        let mut params = ParamMap::new();
        params.set("engine", "INNODB");
        let target = MysqlMigrator
            .migrate_table(&disp, &mut mig, &scope, TargetParent::None, &source, &params)
            .unwrap();
        assert_eq!(target.table_engine, "INNODB");
    }
}
