//! Oracle 8i/9i migrators.

use crate::core::identifier;
use crate::core::schema::{
    Column, ForeignKey, Index, ObjectKind, Routine, Schema, SourceDialect, Table, View,
};
use crate::dialect::{self, generic, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceRef, SourceScope, TargetParent};
use crate::error::Result;
use crate::log::Severity;
use crate::params::{ColumnParams, ParamMap};

/// Oracle migrator module. Oracle folds unquoted identifiers to upper
/// case; migrated names are normalized to lower case instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleMigrator;

impl OracleMigrator {
    /// Oracle's type system maps onto MySQL by length ladders for the
    /// character types and by precision/scale inspection for NUMBER.
    fn migrate_column_datatype(
        &self,
        mig: &mut Migration,
        source: &Column,
        target: &mut Column,
    ) {
        let datatype = source.datatype_name.as_str();
        let target_major = mig.target_version.major;

        match datatype {
            "VARCHAR2" | "NVARCHAR2" => {
                target.add_flag("BINARY");
                if source.length < 256 {
                    target.datatype_name = "VARCHAR".to_string();
                } else if source.length < 65536 {
                    // MySQL 5 VARCHAR holds up to 65535 characters
                    if target_major >= 5 {
                        target.datatype_name = "VARCHAR".to_string();
                    } else {
                        target.datatype_name = "MEDIUMTEXT".to_string();
                    }
                } else {
                    target.datatype_name = "LONGTEXT".to_string();
                }
            }
            "CHAR" | "NCHAR" => {
                target.add_flag("BINARY");
                if source.length < 256 {
                    target.datatype_name = "CHAR".to_string();
                } else if source.length < 65536 {
                    // in InnoDB CHAR beyond 255 behaves like VARCHAR
                    if target_major >= 5 {
                        target.datatype_name = "VARCHAR".to_string();
                    } else {
                        target.datatype_name = "MEDIUMTEXT".to_string();
                    }
                } else {
                    target.datatype_name = "LONGTEXT".to_string();
                }
            }
            "CLOB" | "LONG" => {
                target.add_flag("BINARY");
                target.datatype_name = "LONGTEXT".to_string();
            }
            "RAW" => {
                target.datatype_name = "MEDIUMBLOB".to_string();
            }
            "LONG RAW" | "BLOB" => {
                target.datatype_name = "LONGBLOB".to_string();
            }
            "NUMBER" | "DECIMAL" => {
                if source.scale == 0 {
                    if target.precision < 10 {
                        target.datatype_name = "INT".to_string();
                    } else if target.precision < 19 {
                        target.datatype_name = "BIGINT".to_string();
                    } else {
                        target.datatype_name = "DECIMAL".to_string();
                    }
                } else {
                    target.datatype_name = "DECIMAL".to_string();
                }

                // enforce the DECIMAL ceilings, scale before precision
                if target.scale > 30 {
                    target.scale = 30;
                    mig.log.add_message(
                        source.id,
                        &source.name,
                        Some((target.id, &target.name)),
                        "The scale of this column has been set to the maximum allowed value (30). \
                         This might cause loss of data.",
                        Severity::Warning,
                    );
                }
                if target.precision > 65 {
                    target.precision = 65;
                }
                if target.scale > target.precision {
                    target.scale = target.precision - 1;
                }
            }
            "REAL" | "DOUBLE PRECISION" => {
                target.datatype_name = "DECIMAL".to_string();
                target.scale = 30;
            }
            "FLOAT" => {
                target.datatype_name = "DOUBLE".to_string();
                target.precision = -1;
                target.scale = -1;
            }
            "DATE" => {
                target.datatype_name = "DATETIME".to_string();
                if source.default_value.eq_ignore_ascii_case("sysdate") {
                    target.default_value = String::new();
                }
            }
            other if other.contains("TIMESTAMP") => {
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

impl DialectMigrator for OracleMigrator {
    fn module_name(&self) -> &'static str {
        "oracle"
    }

    fn source_dialect(&self) -> Option<SourceDialect> {
        Some(SourceDialect::Oracle)
    }

    fn methods(&self) -> Vec<Method> {
        vec![
            Method::new("oracle", "migrate_schema", ObjectKind::Schema)
                .caption("Oracle Default")
                .describe("Default method to migrate an Oracle schema to MySQL.")
                .dialect(SourceDialect::Oracle)
                .rating(1)
                .params(dialect::default_schema_params()),
            Method::new("oracle", "migrate_table", ObjectKind::Table)
                .caption("Oracle Default")
                .describe("Default method to migrate an Oracle table to MySQL.")
                .dialect(SourceDialect::Oracle)
                .rating(1)
                .params(dialect::default_table_params()),
            Method::new("oracle", "migrate_column", ObjectKind::Column)
                .caption("Oracle Default")
                .describe("Default method to migrate an Oracle column to MySQL.")
                .dialect(SourceDialect::Oracle)
                .rating(1)
                .params(dialect::default_column_params()),
            Method::new("oracle", "migrate_view", ObjectKind::View)
                .caption("Oracle Default")
                .describe("Default method to migrate an Oracle view to MySQL.")
                .dialect(SourceDialect::Oracle)
                .rating(1)
                .params(dialect::default_view_params()),
            Method::new("oracle", "migrate_routine", ObjectKind::Routine)
                .caption("Oracle Default")
                .describe("Default method to migrate an Oracle routine to MySQL.")
                .dialect(SourceDialect::Oracle)
                .rating(1)
                .params(dialect::default_routine_params()),
        ]
    }

    fn migrate_identifier(&self, name: &str) -> String {
        identifier::lower_case(name)
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
        let target = generic::migrate_schema(self, disp, mig, scope, source, params)?;

        // sequences have no MySQL counterpart; dispatching them records
        // the error entry that tells the operator they were dropped
        let child_scope = SourceScope::schema(scope.catalog, source);
        for source_sequence in &source.sequences {
            let _ = disp.migrate_object(
                mig,
                &child_scope,
                TargetParent::None,
                SourceRef::Sequence(source_sequence),
            );
        }

        Ok(target)
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
            self.migrate_column_datatype(mig, source, &mut target);
        }

        generic::finish_column(mig, source, &mut target);

        // national character types carry Unicode data
        if matches!(
            source.datatype_name.as_str(),
            "NVARCHAR2" | "NCHAR" | "NCLOB"
        ) {
            target.character_set_name = "utf8".to_string();
            target.collation_name = "utf8_bin".to_string();
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
        generic::migrate_view(self, mig, source, params)
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
    use crate::core::schema::Rdbms;

    fn migrate(source: &Column) -> (Migration, Column) {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = crate::core::schema::Catalog::new("db", SourceDialect::Oracle);
        let scope = SourceScope::catalog(&catalog);
        let target = OracleMigrator
            .migrate_column(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                source,
                &ParamMap::new(),
            )
            .unwrap();
        (mig, target)
    }

    fn number(precision: i32, scale: i32) -> Column {
        let mut col = Column::new("N");
        col.datatype_name = "NUMBER".to_string();
        col.precision = precision;
        col.scale = scale;
        col
    }

    #[test]
    fn test_number_with_small_precision_becomes_int() {
        let (_, target) = migrate(&number(5, 0));
        assert_eq!(target.datatype_name, "INT");
    }

    #[test]
    fn test_number_with_medium_precision_becomes_bigint() {
        let (_, target) = migrate(&number(12, 0));
        assert_eq!(target.datatype_name, "BIGINT");
    }

    #[test]
    fn test_number_with_large_precision_becomes_decimal() {
        let (_, target) = migrate(&number(20, 0));
        assert_eq!(target.datatype_name, "DECIMAL");
        assert_eq!(target.precision, 20);
    }

    #[test]
    fn test_number_precision_clamped_to_65() {
        let (_, target) = migrate(&number(99, 0));
        assert_eq!(target.datatype_name, "DECIMAL");
        assert_eq!(target.precision, 65);
    }

    #[test]
    fn test_number_scale_clamped_to_30_with_warning() {
        let (mig, target) = migrate(&number(40, 35));
        assert_eq!(target.datatype_name, "DECIMAL");
        assert_eq!(target.scale, 30);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_varchar2_length_ladder() {
        let mut col = Column::new("c");
        col.datatype_name = "VARCHAR2".to_string();

        col.length = 100;
        let (_, target) = migrate(&col);
        assert_eq!(target.datatype_name, "VARCHAR");
        assert!(target.flags.contains(&"BINARY".to_string()));

        // MySQL 5 target keeps long VARCHAR2 as VARCHAR
        col.length = 4000;
        let (_, target) = migrate(&col);
        assert_eq!(target.datatype_name, "VARCHAR");

        col.length = 100_000;
        let (_, target) = migrate(&col);
        assert_eq!(target.datatype_name, "LONGTEXT");
    }

    #[test]
    fn test_varchar2_medium_length_on_mysql4_target() {
        let rdbms = Rdbms::mysql();
        let mut mig = Migration::new(&rdbms, Some(crate::core::schema::Version::new(4, 1, 0)));
        let disp = Dispatcher::new();
        let catalog = crate::core::schema::Catalog::new("db", SourceDialect::Oracle);
        let scope = SourceScope::catalog(&catalog);

        let mut col = Column::new("c");
        col.datatype_name = "VARCHAR2".to_string();
        col.length = 4000;

        let target = OracleMigrator
            .migrate_column(
                &disp,
                &mut mig,
                &scope,
                TargetParent::None,
                &col,
                &ParamMap::new(),
            )
            .unwrap();
        assert_eq!(target.datatype_name, "MEDIUMTEXT");
    }

    #[test]
    fn test_date_with_sysdate_default_clears_default() {
        let mut col = Column::new("d");
        col.datatype_name = "DATE".to_string();
        col.default_value = "SYSDATE".to_string();

        let (_, target) = migrate(&col);
        assert_eq!(target.datatype_name, "DATETIME");
        assert!(target.default_value.is_empty());
    }

    #[test]
    fn test_timestamp_with_time_zone_becomes_datetime() {
        let mut col = Column::new("t");
        col.datatype_name = "TIMESTAMP(6) WITH TIME ZONE".to_string();
        let (_, target) = migrate(&col);
        assert_eq!(target.datatype_name, "DATETIME");
    }

    #[test]
    fn test_national_types_force_utf8() {
        let mut col = Column::new("c");
        col.datatype_name = "NVARCHAR2".to_string();
        col.length = 30;
        let (_, target) = migrate(&col);
        assert_eq!(target.character_set_name, "utf8");
        assert_eq!(target.collation_name, "utf8_bin");
    }

    #[test]
    fn test_unknown_type_degrades_to_varchar_255_with_error() {
        let mut col = Column::new("c");
        col.datatype_name = "SDO_GEOMETRY".to_string();
        let (mig, target) = migrate(&col);
        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.length, 255);
        assert_eq!(mig.log.error_count(), 1);
    }

    #[test]
    fn test_identifier_policy_lower_cases() {
        assert_eq!(OracleMigrator.migrate_identifier("SCOTT"), "scott");
    }
}
