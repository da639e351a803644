//! MS Access migrators.

use crate::core::identifier;
use crate::core::schema::{
    Column, ForeignKey, Index, ObjectKind, Routine, Schema, SourceDialect, Table, View,
};
use crate::dialect::{self, generic, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceScope, TargetParent};
use crate::error::Result;
use crate::log::Severity;
use crate::params::{resolve_target_name, ColumnParams, ParamMap};

/// Access migrator module.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessMigrator;

impl AccessMigrator {
    fn migrate_column_datatype(
        &self,
        mig: &mut Migration,
        source: &Column,
        target: &mut Column,
        column_params: &ColumnParams,
    ) {
        let datatype = source.datatype_name.to_uppercase();

        match datatype.as_str() {
            "VARCHAR" => {
                target.datatype_name = "VARCHAR".to_string();
                target.length = source.length;
            }
            "INTEGER" | "INT" => {
                target.datatype_name = "INT".to_string();
            }
            "SMALLINT" => {
                target.datatype_name = "SMALLINT".to_string();
            }
            "COUNTER" => {
                target.datatype_name = "INT".to_string();
                target.auto_increment = true;
                target.is_nullable = false;
            }
            "BIT" => {
                target.datatype_name = "TINYINT".to_string();
            }
            "BYTE" => {
                target.datatype_name = "TINYINT".to_string();
                target.add_flag("UNSIGNED");
            }
            "REAL" | "DOUBLE" => {
                target.datatype_name = "DOUBLE".to_string();

                // Access reports no decimal digits for floating columns;
                // derive a scale from the precision when asked to
                if target.scale == 0 && column_params.auto_decimal_digits {
                    target.scale = target.precision / 3;
                }
            }
            "CURRENCY" | "DECIMAL" => {
                target.datatype_name = "DECIMAL".to_string();
            }
            "LONGBINARY" => {
                target.datatype_name = "LONGBLOB".to_string();
            }
            "LONGCHAR" => {
                target.datatype_name = "LONGTEXT".to_string();
            }
            "DATETIME" => {
                target.datatype_name = "DATETIME".to_string();
            }
            _ => {
                target.datatype_name = "VARCHAR".to_string();
                target.length = 255;
                mig.log.add_message(
                    source.id,
                    &source.name,
                    Some((target.id, &target.name)),
                    format!("The datatype {} cannot be migrated.", source.datatype_name),
                    Severity::Error,
                );
            }
        }
    }
}

impl DialectMigrator for AccessMigrator {
    fn module_name(&self) -> &'static str {
        "access"
    }

    fn source_dialect(&self) -> Option<SourceDialect> {
        Some(SourceDialect::Access)
    }

    fn methods(&self) -> Vec<Method> {
        let mut column_params = dialect::default_column_params();
        column_params.set("autoDecimalDigits", "yes");

        vec![
            Method::new("access", "migrate_column", ObjectKind::Column)
                .caption("Access Default")
                .describe("Default method to migrate an Access column to MySQL.")
                .dialect(SourceDialect::Access)
                .rating(1)
                .params(column_params),
            Method::new("access", "migrate_view", ObjectKind::View)
                .caption("Access Default")
                .describe("Default method to migrate an Access view to MySQL.")
                .dialect(SourceDialect::Access)
                .rating(1)
                .params(dialect::default_view_params()),
        ]
    }

    fn migrate_identifier(&self, name: &str) -> String {
        identifier::slash_to_underscore(name)
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
        generic::migrate_table(self, disp, mig, scope, source, params)
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

        let (column_params, unknown) = ColumnParams::from_params(params);
        generic::warn_unknown_params(mig, source.id, &source.name, &unknown);

        if !generic::apply_column_params(&mut target, &column_params) {
            self.migrate_column_datatype(mig, source, &mut target, &column_params);
        }

        generic::finish_column(mig, source, &mut target);

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
        mig.message(&format!("Migrating view {} ...", source.name));

        let mut target = View::new(resolve_target_name(
            params,
            self.migrate_identifier(&source.name),
        ));
        generic::register(mig, source.id, &source.name, target.id, &target.name);
        target.old_name = source.name.clone();

        // Access quotes identifiers with brackets; MySQL uses backticks
        target.query_expression = source
            .query_expression
            .replace('[', "`")
            .replace(']', "`");

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

    fn migrate_routine(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Routine,
        params: &ParamMap,
    ) -> Result<Routine> {
        generic::migrate_routine(self, mig, source, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Catalog, Rdbms};

    fn migrate_with_params(source: &Column, params: &ParamMap) -> (Migration, Column) {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("northwind", SourceDialect::Access);
        let scope = SourceScope::catalog(&catalog);
        let target = AccessMigrator
            .migrate_column(&disp, &mut mig, &scope, TargetParent::None, source, params)
            .unwrap();
        (mig, target)
    }

    fn migrate(source: &Column) -> (Migration, Column) {
        migrate_with_params(source, &ParamMap::new())
    }

    fn column(datatype: &str) -> Column {
        let mut col = Column::new("c");
        col.datatype_name = datatype.to_string();
        col
    }

    #[test]
    fn test_counter_becomes_not_null_auto_increment_int() {
        let (_, target) = migrate(&column("COUNTER"));
        assert_eq!(target.datatype_name, "INT");
        assert!(target.auto_increment);
        assert!(!target.is_nullable);
    }

    #[test]
    fn test_byte_becomes_unsigned_tinyint() {
        let (_, target) = migrate(&column("BYTE"));
        assert_eq!(target.datatype_name, "TINYINT");
        assert!(target.flags.contains(&"UNSIGNED".to_string()));
    }

    #[test]
    fn test_double_auto_decimal_digits_derives_scale() {
        let mut col = column("DOUBLE");
        col.precision = 15;

        let mut params = ParamMap::new();
        params.set("autoDecimalDigits", "yes");
        let (_, target) = migrate_with_params(&col, &params);
        assert_eq!(target.datatype_name, "DOUBLE");
        assert_eq!(target.scale, 5);

        // without the parameter the scale stays untouched
        let (_, target) = migrate(&col);
        assert_eq!(target.scale, 0);
    }

    #[test]
    fn test_longchar_becomes_longtext() {
        let (_, target) = migrate(&column("LONGCHAR"));
        assert_eq!(target.datatype_name, "LONGTEXT");
    }

    #[test]
    fn test_unknown_type_degrades_to_varchar_255_with_error() {
        let (mig, target) = migrate(&column("OLEOBJECT"));
        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.length, 255);
        assert_eq!(mig.log.error_count(), 1);
    }

    #[test]
    fn test_identifier_policy_replaces_slashes() {
        assert_eq!(
            AccessMigrator.migrate_identifier("Orders/2004"),
            "Orders_2004"
        );
    }

    #[test]
    fn test_view_brackets_become_backticks() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("northwind", SourceDialect::Access);
        let scope = SourceScope::catalog(&catalog);

        let mut source = View::new("Current Orders");
        source.query_expression = "SELECT [Order ID] FROM [Orders]".to_string();

        let target = AccessMigrator
            .migrate_view(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &source,
                &ParamMap::new(),
            )
            .unwrap();
        assert_eq!(target.query_expression, "SELECT `Order ID` FROM `Orders`");
        assert!(target.commented_out);
        assert_eq!(mig.log.warning_count(), 1);
    }
}
