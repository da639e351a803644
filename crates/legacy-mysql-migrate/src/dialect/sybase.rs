//! Sybase ASE 12.x migrators.

use crate::core::identifier;
use crate::core::schema::{
    Column, ForeignKey, Index, ObjectKind, Routine, Schema, SourceDialect, Table, View,
};
use crate::dialect::{self, generic, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceScope, TargetParent};
use crate::error::Result;
use crate::log::Severity;
use crate::params::{ColumnParams, ParamMap};

/// Sybase migrator module.
#[derive(Debug, Clone, Copy, Default)]
pub struct SybaseMigrator;

impl SybaseMigrator {
    fn migrate_column_datatype(
        &self,
        mig: &mut Migration,
        source: &Column,
        target: &mut Column,
    ) {
        let datatype = source.datatype_name.to_uppercase();
        let target_major = mig.target_version.major;

        match datatype.as_str() {
            "VARCHAR" | "NVARCHAR" | "UNIVARCHAR" => {
                if source.length < 256 {
                    target.datatype_name = "VARCHAR".to_string();
                } else if source.length < 65536 {
                    if target_major >= 5 {
                        target.datatype_name = "VARCHAR".to_string();
                    } else {
                        target.datatype_name = "MEDIUMTEXT".to_string();
                    }
                } else {
                    target.datatype_name = "LONGTEXT".to_string();
                }
            }
            "TEXT" | "NTEXT" => {
                target.datatype_name = "LONGTEXT".to_string();
            }
            "CHAR" | "NCHAR" | "UNICHAR" => {
                if source.length < 256 {
                    target.datatype_name = "CHAR".to_string();
                } else {
                    target.datatype_name = "LONGTEXT".to_string();
                }
            }
            "IMAGE" | "BINARY" | "VARBINARY" => {
                if source.length < 256 {
                    target.datatype_name = match datatype.as_str() {
                        "IMAGE" => "TINYBLOB".to_string(),
                        "BINARY" => "BINARY".to_string(),
                        _ => "VARBINARY".to_string(),
                    };
                } else if source.length < 65536 {
                    target.datatype_name = "MEDIUMBLOB".to_string();
                } else {
                    target.datatype_name = "LONGBLOB".to_string();
                }
            }
            "DECIMAL" | "NUMERIC" => {
                target.datatype_name = "DECIMAL".to_string();
            }
            "MONEY" => {
                target.datatype_name = "DECIMAL".to_string();
                target.precision = 19;
                target.scale = 4;
            }
            "SMALLMONEY" => {
                target.datatype_name = "DECIMAL".to_string();
                target.precision = 10;
                target.scale = 4;
            }
            "DOUBLE PRECISION" => {
                target.datatype_name = "DOUBLE".to_string();
                target.scale = -1;
            }
            "FLOAT" | "REAL" => {
                target.datatype_name = "FLOAT".to_string();
                target.scale = -1;
            }
            "DATETIME" | "SMALLDATETIME" => {
                target.datatype_name = "DATETIME".to_string();
            }
            "TIMESTAMP" => {
                target.datatype_name = "TIMESTAMP".to_string();
            }
            "BIGINT" => {
                target.datatype_name = "BIGINT".to_string();
            }
            "INT" => {
                target.datatype_name = "INT".to_string();
            }
            "SMALLINT" => {
                target.datatype_name = "SMALLINT".to_string();
            }
            "TINYINT" | "BIT" => {
                target.datatype_name = "TINYINT".to_string();
                target.add_flag("UNSIGNED");
            }
            "UNIQUEIDENTIFIER" => {
                target.datatype_name = "VARCHAR".to_string();
                target.length = 64;
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

impl DialectMigrator for SybaseMigrator {
    fn module_name(&self) -> &'static str {
        "sybase"
    }

    fn source_dialect(&self) -> Option<SourceDialect> {
        Some(SourceDialect::Sybase)
    }

    fn methods(&self) -> Vec<Method> {
        vec![
            Method::new("sybase", "migrate_schema", ObjectKind::Schema)
                .caption("Sybase Default")
                .describe("Default method to migrate a Sybase schema to MySQL.")
                .dialect(SourceDialect::Sybase)
                .rating(1)
                .params(dialect::default_schema_params()),
            Method::new("sybase", "migrate_table", ObjectKind::Table)
                .caption("Sybase Default")
                .describe("Default method to migrate a Sybase table to MySQL.")
                .dialect(SourceDialect::Sybase)
                .rating(1)
                .params(dialect::default_table_params()),
            Method::new("sybase", "migrate_column", ObjectKind::Column)
                .caption("Sybase Default")
                .describe("Default method to migrate a Sybase column to MySQL.")
                .dialect(SourceDialect::Sybase)
                .rating(1)
                .params(dialect::default_column_params()),
            Method::new("sybase", "migrate_view", ObjectKind::View)
                .caption("Sybase Default")
                .describe("Default method to migrate a Sybase view to MySQL.")
                .dialect(SourceDialect::Sybase)
                .rating(1)
                .params(dialect::default_view_params()),
            Method::new("sybase", "migrate_routine", ObjectKind::Routine)
                .caption("Sybase Default")
                .describe("Default method to migrate a Sybase routine to MySQL.")
                .dialect(SourceDialect::Sybase)
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
        let mut target = generic::migrate_schema(self, disp, mig, scope, source, params)?;

        // Sybase schemata live inside a database; the pair collapses to
        // one MySQL schema named catalog_schema
        target.name = format!("{}_{}", scope.catalog.name, source.name);

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
            source.datatype_name.to_uppercase().as_str(),
            "NVARCHAR" | "NCHAR" | "NTEXT"
        ) {
            target.character_set_name = "utf8".to_string();
            target.collation_name = "utf8_general_ci".to_string();
        }

        // identity columns become auto-increment, but only on integer
        // target types
        if matches!(
            target.datatype_name.to_uppercase().as_str(),
            "INT" | "INTEGER" | "TINYINT" | "SMALLINT" | "BIGINT"
        ) {
            target.auto_increment = source.auto_increment;
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
        let mut target = generic::migrate_routine(self, mig, source, params)?;

        // Sybase bodies are copied untouched, without trimming
        target.routine_code = source.routine_code.clone();

        Ok(target)
    }
}
