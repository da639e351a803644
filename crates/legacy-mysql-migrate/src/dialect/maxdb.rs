//! MaxDB 7.5/7.6 migrators.

use crate::core::identifier;
use crate::core::schema::{
    Column, ForeignKey, Index, ObjectKind, Routine, Schema, SourceDialect, Synonym, Table,
    Trigger, View,
};
use crate::dialect::{self, generic, DialectMigrator};
use crate::dispatch::{Dispatcher, Method, Migration, SourceRef, SourceScope, TargetObject, TargetParent};
use crate::error::Result;
use crate::log::Severity;
use crate::params::{resolve_target_name, ColumnParams, ParamMap, SynonymParams};

/// System synonyms every MaxDB instance ships; skipped under the
/// `skipBuildinSynonyms` parameter because they describe the server, not
/// the user's schema.
const BUILTIN_SYNONYMS: &[&str] = &[
    "ACTIVECONFIGURATION",
    "ALLOCATORSTATISTIC",
    "ALL_CATALOG",
    "ALL_COL_COMMENTS",
    "ALL_COL_PRIVS",
    "ALL_CONSTRAINTS",
    "ALL_CONS_COLUMNS",
    "ALL_DB_LINKS",
    "ALL_DEPENDENCIES",
    "ALL_ERRORS",
    "ALL_INDEXES",
    "ALL_IND_COLUMNS",
    "ALL_OBJECTS",
    "ALL_SEQUENCES",
    "ALL_SNAPSHOTS",
    "ALL_SOURCE",
    "ALL_SYNONYMS",
    "ALL_TABLES",
    "ALL_TAB_COLUMNS",
    "ALL_TAB_COMMENTS",
    "ALL_TAB_PRIVS",
    "ALL_TRIGGERS",
    "ALL_TRIGGER_COLS",
    "ALL_USERS",
    "ALL_VIEWS",
    "AUDIT_ACTIONS",
    "BACKUPTHREADS",
    "CACHESTATISTICS",
    "CAT",
    "CATALOGCACHESTATISTICS",
    "CLASSCONTAINERS",
    "CLU",
    "COLS",
    "COLUMNPRIVILEGES",
    "COLUMNS",
    "COMMANDCACHESTATISTICS",
    "COMMANDSTATISTICS",
    "CONFIGURATION",
    "CONNECTEDUSERS",
    "CONNECTPARAMETERS",
    "CONSISTENTVIEWS",
    "CONSTRAINTS",
    "DATACACHE",
    "DATASTATISTICS",
    "DATAVOLUMES",
    "DBA_CATALOG",
    "DBA_CONSTRAINTS",
    "DBA_CONS_COLUMNS",
    "DBA_DATA_FILES",
    "DBA_DEPENDENCIES",
    "DBA_ERRORS",
    "DBA_INDEXES",
    "DBA_IND_COLUMNS",
    "DBA_OBJECTS",
    "DBA_ROLES",
    "DBA_ROLE_PRIVS",
    "DBA_SEQUENCES",
    "DBA_SOURCE",
    "DBA_SYNONYMS",
    "DBA_SYS_PRIVS",
    "DBA_TABLES",
    "DBA_TABLESPACES",
    "DBA_TAB_COLUMNS",
    "DBA_TAB_COMMENTS",
    "DBA_TAB_PRIVS",
    "DBA_TRIGGERS",
    "DBA_TRIGGER_COLS",
    "DBA_USERS",
    "DBA_VIEWS",
    "DBPARAMETERS",
    "DBPROCEDURES",
    "DBPROCPARAMINFO",
    "DBPROCPARAMS",
    "DBTIMES",
    "DB_STATE",
    "DICT",
    "DICTIONARY",
    "DICT_COLUMNS",
    "DOMAINCONSTRAINTS",
    "DOMAINS",
    "DUAL",
    "ESTIMATED_PAGES",
    "EXCEPTIONS",
    "FILEDIRECTORIES",
    "FILES",
    "FOREIGNKEYCOLUMNS",
    "FOREIGNKEYS",
    "FUNCTIONS",
    "GLOBAL_NAME",
    "HISTORYINFO",
    "IND",
    "INDEXCOLUMNS",
    "INDEXES",
    "INDEXPAGES",
    "INDEXSTATISTICS",
    "INSTANCE",
    "INTERNAL_STATE",
    "IOBUFFERCACHES",
    "IOTHREADSTATISTICS",
    "LOCKLISTSTATISTICS",
    "LOCKS",
    "LOCKSTATISTICS",
    "LOCK_HOLDER",
    "LOCK_REQUESTOR",
    "LOCK_WAITS",
    "LOGINFORMATION",
    "LOGQUEUESTATISTICS",
    "LOGSTATISTICS",
    "LOGVOLUMES",
    "MACHINECONFIGURATION",
    "MACHINEUTILIZATION",
    "MAPCHARSETS",
    "MEMORYALLOCATORSTATISTICS",
    "MEMORYHOLDERS",
    "MONITOR",
    "MONITOR_CACHES",
    "MONITOR_LOAD",
    "MONITOR_LOCK",
    "MONITOR_LOG",
    "MONITOR_LONG",
    "MONITOR_OMS",
    "MONITOR_PAGES",
    "MONITOR_ROW",
    "MONITOR_TRANS",
    "OBJ",
    "OBJECTLOCKS",
    "OPTIMIZERINFORMATION",
    "OPTIMIZERSTATISTICS",
    "PACKAGES",
    "PAGES",
    "PARAMETERS",
    "PARSINFOS",
    "PUBLIC_DEPENDENCY",
    "RESTARTINFORMATION",
    "ROLEPRIVILEGES",
    "ROLES",
    "ROLE_ROLE_PRIVS",
    "ROLE_SYS_PRIVS",
    "ROLE_TAB_PRIVS",
    "ROOTS",
    "RUNNING_COMMANDS",
    "SCHEMAPRIVILEGES",
    "SCHEMAS",
    "SEQ",
    "SEQUENCES",
    "SERVERDBS",
    "SERVERTASKS",
    "SESSIONS",
    "SESSION_PRIVS",
    "SESSION_ROLES",
    "SNAPSHOTS",
    "SPINLOCKS",
    "SPINLOCKSTATISTICS",
    "SYN",
    "SYNONYMS",
    "SYSCHECKTABLELOG",
    "SYSMONDATA",
    "SYSMONITOR",
    "SYSMON_ACTIVE_TASK",
    "SYSMON_CONNECTION",
    "SYSMON_IOACCESS",
    "SYSMON_IOTHREAD",
    "SYSMON_REGION",
    "SYSMON_RUNNABLE",
    "SYSMON_STORAGE",
    "SYSMON_TASK",
    "SYSMON_TASK_DETAIL",
    "SYSMON_TOTALCOUNT",
    "SYSMON_UKTHREAD",
    "SYSPARSEID",
    "SYSSTATISTICS",
    "SYSTEMTRIGGERS",
    "SYSUPDSTATLOG",
    "SYSUPDSTATWANTED",
    "TABLEPRIVILEGES",
    "TABLES",
    "TABLESTATISTICS",
    "TABLE_PRIVILEGE_MAP",
    "TABS",
    "TRANSACTIONHISTORY",
    "TRANSACTIONS",
    "TRIGGERS",
    "UNLOADEDSTATEMENTS",
    "USERS",
    "USERSTATISTICS",
    "USER_CATALOG",
    "USER_COL_COMMENTS",
    "USER_COL_PRIVS",
    "USER_CONSTRAINTS",
    "USER_CONS_COLUMNS",
    "USER_DEPENDENCIES",
    "USER_ERRORS",
    "USER_INDEXES",
    "USER_IND_COLUMNS",
    "USER_OBJECTS",
    "USER_ROLE_PRIVS",
    "USER_SEQUENCES",
    "USER_SOURCE",
    "USER_SYNONYMS",
    "USER_SYS_PRIVS",
    "USER_TABLES",
    "USER_TAB_COLUMNS",
    "USER_TAB_COMMENTS",
    "USER_TAB_PRIVS",
    "USER_TRIGGERS",
    "USER_TRIGGER_COLS",
    "USER_USERS",
    "USER_VIEWS",
    "VERSION",
    "VERSIONS",
    "VIEWCOLUMNS",
    "VIEWDEFS",
    "VIEWS",
];

/// MaxDB migrator module.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxdbMigrator;

impl MaxdbMigrator {
    /// MySQL 5.0.3 raised VARCHAR/VARBINARY to 65535 bytes and added
    /// true BINARY columns; earlier targets need blob/text ladders.
    fn have_long_char_and_binary(mig: &Migration) -> bool {
        let v = &mig.target_version;
        v.major > 5
            || (v.major == 5 && v.minor >= 1)
            || (v.major == 5 && v.minor == 0 && v.release >= 3)
    }

    fn migrate_column_datatype(
        &self,
        mig: &mut Migration,
        source: &Column,
        target: &mut Column,
    ) {
        match source.datatype_name.as_str() {
            // FIXED(5,0) territory; unsigned has no MaxDB counterpart
            "SMALLINT" => {
                target.datatype_name = "SMALLINT".to_string();
            }
            "INTEGER" => {
                target.datatype_name = "INT".to_string();
            }
            "FLOAT" => {
                // FLOAT(p) is a floating point literal with 0<p<=38;
                // DECIMAL is the closest exact carrier
                target.datatype_name = "DECIMAL".to_string();

                let v = &mig.target_version;
                if v.major == 5 && v.minor == 0 && (3..=5).contains(&v.release) {
                    // 5.0.3 - 5.0.5 capped DECIMAL at 64 digits
                    target.precision = 64;
                } else {
                    target.precision = 65;
                }

                if source.length <= 30 {
                    target.scale = source.length;
                } else {
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
            }
            "FIXED" => {
                // FIXED(p,s) with 0<p<=38, s<=p; MySQL holds at most 30
                // decimals where MaxDB holds 37
                target.datatype_name = "DECIMAL".to_string();
                if source.scale <= 30 {
                    target.scale = source.scale;
                } else {
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
            }
            "VARCHAR" => {
                let have_long = Self::have_long_char_and_binary(mig);

                if source.code_type == "BYTE" {
                    if have_long {
                        target.datatype_name = "VARBINARY".to_string();
                    } else if source.length < 256 {
                        target.datatype_name = "TINYBLOB".to_string();
                    } else {
                        target.datatype_name = "BLOB".to_string();
                    }
                } else {
                    if source.length < 256 || have_long {
                        target.datatype_name = "VARCHAR".to_string();
                    } else {
                        target.datatype_name = "TEXT".to_string();
                    }
                    // ASCII uses the server default character set
                    if source.code_type == "UNICODE" {
                        target.character_set_name = "ucs2".to_string();
                    }
                }
            }
            "CHAR" => {
                let have_long = Self::have_long_char_and_binary(mig);

                if source.code_type == "BYTE" {
                    if have_long && source.length < 256 {
                        target.datatype_name = "BINARY".to_string();
                    } else if !have_long && source.length < 256 {
                        target.datatype_name = "TINYBLOB".to_string();
                    } else {
                        target.datatype_name = "BLOB".to_string();
                    }
                } else {
                    if source.length < 256 {
                        target.datatype_name = "CHAR".to_string();
                    } else {
                        target.datatype_name = "TEXT".to_string();
                    }
                    if source.code_type == "UNICODE" {
                        target.character_set_name = "ucs2".to_string();
                    }
                }
            }
            "LONG" => {
                // LONG holds up to 2 GB of character or byte data
                match source.code_type.as_str() {
                    "UNICODE" => {
                        target.datatype_name = "LONGTEXT".to_string();
                        target.character_set_name = "ucs2".to_string();
                    }
                    "BYTE" => {
                        target.datatype_name = "LONGBLOB".to_string();
                    }
                    _ => {
                        target.datatype_name = "LONGTEXT".to_string();
                    }
                }
            }
            "DATE" => {
                // MaxDB dates start at 0001-01-01, MySQL documents
                // 1001-01-01 as the floor; earlier values are untested
                target.datatype_name = "DATE".to_string();
            }
            "TIME" => {
                target.datatype_name = "TIME".to_string();
            }
            "TIMESTAMP" => {
                // MaxDB timestamps carry microseconds, MySQL drops them
                target.datatype_name = "DATETIME".to_string();
            }
            "BOOLEAN" => {
                target.datatype_name = "TINYINT".to_string();
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

impl DialectMigrator for MaxdbMigrator {
    fn module_name(&self) -> &'static str {
        "maxdb"
    }

    fn source_dialect(&self) -> Option<SourceDialect> {
        Some(SourceDialect::Maxdb)
    }

    fn methods(&self) -> Vec<Method> {
        vec![
            Method::new("maxdb", "migrate_schema", ObjectKind::Schema)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB schema to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_schema_params()),
            Method::new("maxdb", "migrate_table", ObjectKind::Table)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB table to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_table_params()),
            Method::new("maxdb", "migrate_column", ObjectKind::Column)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB column to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_column_params()),
            Method::new("maxdb", "migrate_foreign_key", ObjectKind::ForeignKey)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB foreign key to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_foreign_key_params()),
            Method::new("maxdb", "migrate_view", ObjectKind::View)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB view to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_view_params()),
            Method::new("maxdb", "migrate_routine", ObjectKind::Routine)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB routine to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_routine_params()),
            Method::new("maxdb", "migrate_synonym", ObjectKind::Synonym)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB synonym to a MySQL view.")
                .dialect(SourceDialect::Maxdb)
                .rating(1)
                .params(dialect::default_synonym_params()),
            Method::new("maxdb", "migrate_trigger", ObjectKind::Trigger)
                .caption("MaxDB Default")
                .describe("Default method to migrate a MaxDB trigger to MySQL.")
                .dialect(SourceDialect::Maxdb)
                .rating(1),
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
        if mig.cancelled {
            return Ok(target);
        }

        // synonyms
        let child_scope = SourceScope::schema(scope.catalog, source);
        let total = source.synonyms.len().max(1);
        for (i, source_synonym) in source.synonyms.iter().enumerate() {
            mig.progress(
                &format!("Migrating synonym {}", source_synonym.name),
                (i * 100 / total) as i32,
            );
            if mig.check_cancelled() {
                mig.message("Migration canceled by user.");
                return Ok(target);
            }

            if let Some(TargetObject::Synonym(synonym)) = disp.migrate_object(
                mig,
                &child_scope,
                TargetParent::None,
                SourceRef::Synonym(source_synonym),
            ) {
                target.synonyms.push(synonym);
            }
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
        let mut target = generic::migrate_table(self, disp, mig, scope, source, params)?;

        // table statistics and privileges have no MySQL counterpart;
        // keep whatever comment the source carried
        if !source.comment.is_empty() {
            target.comment = source.comment.clone();
        }

        let child_scope = SourceScope {
            catalog: scope.catalog,
            schema: scope.schema,
            table: Some(source),
        };
        for source_trigger in &source.triggers {
            if let Some(TargetObject::Trigger(trigger)) = disp.migrate_object(
                mig,
                &child_scope,
                TargetParent::None,
                SourceRef::Trigger(source_trigger),
            ) {
                target.triggers.push(trigger);
            }
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

        // DEFAULT SERIAL is sequence-backed; the value cannot carry over
        if source.default_value.starts_with("DEFAULT SERIAL") {
            target.default_value = String::new();
        }

        if !source.comment.is_empty() {
            target.comment = source.comment.clone();
        }

        let (column_params, unknown) = ColumnParams::from_params(params);
        generic::warn_unknown_params(mig, source.id, &source.name, &unknown);

        if !generic::apply_column_params(&mut target, &column_params) {
            self.migrate_column_datatype(mig, source, &mut target);
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
        // MaxDB does not require foreign key names to be unique within a
        // schema, InnoDB does; a run-scoped sequence number keeps the
        // migrated names apart
        let seq = mig.next_fk_seq();
        let name = resolve_target_name(
            params,
            self.migrate_identifier(&format!("{}{}", source.name, seq)),
        );

        let target = generic::migrate_foreign_key_named(self, mig, scope, source, params, name)?;

        if target.delete_rule.eq_ignore_ascii_case("SET NULL") {
            mig.log.add_message(
                source.id,
                &source.name,
                Some((target.id, &target.name)),
                "Currently MySQL does not support the foreign key DELETE rule SET NULL. \
                 The generated SQL statement will be invalid. Please correct the SQL statement.",
                Severity::Error,
            );
        }

        Ok(target)
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

    fn migrate_synonym(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Synonym,
        params: &ParamMap,
    ) -> Result<Option<Synonym>> {
        let (synonym_params, unknown) = SynonymParams::from_params(params);

        if synonym_params.skip_buildin_synonyms
            && BUILTIN_SYNONYMS.contains(&source.name.as_str())
        {
            return Ok(None);
        }

        // the synonym becomes a view over the referred table, so the
        // view name is the synonym name as-is
        let mut target = Synonym::new(source.name.clone());
        generic::register(mig, source.id, &source.name, target.id, &target.name);
        generic::warn_unknown_params(mig, source.id, &source.name, &unknown);
        target.old_name = source.name.clone();
        target.referred_object_name = source.referred_object_name.clone();
        target.referred_object = source.referred_object.and_then(|id| mig.target_of(id));

        Ok(Some(target))
    }

    fn migrate_trigger(
        &self,
        _disp: &Dispatcher,
        mig: &mut Migration,
        _scope: &SourceScope<'_>,
        _parent: TargetParent<'_>,
        source: &Trigger,
        _params: &ParamMap,
    ) -> Result<Trigger> {
        let mut target = Trigger::new(source.name.clone());
        generic::register(mig, source.id, &source.name, target.id, &target.name);
        target.old_name = source.name.clone();
        target.comment = source.comment.clone();
        target.timing = source.timing.clone();
        target.event = source.event.clone();
        target.statement = source.statement.clone();

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Catalog, Rdbms, Version};

    fn migrate_with_version(source: &Column, version: Option<Version>) -> (Migration, Column) {
        let mut mig = Migration::new(&Rdbms::mysql(), version);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("maxdb", SourceDialect::Maxdb);
        let scope = SourceScope::catalog(&catalog);
        let target = MaxdbMigrator
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

    fn migrate(source: &Column) -> (Migration, Column) {
        migrate_with_version(source, None)
    }

    fn column(datatype: &str, code_type: &str, length: i32) -> Column {
        let mut col = Column::new("C");
        col.datatype_name = datatype.to_string();
        col.code_type = code_type.to_string();
        col.length = length;
        col
    }

    #[test]
    fn test_float_becomes_decimal_with_clamped_scale() {
        let (mig, target) = migrate(&column("FLOAT", "", 38));
        assert_eq!(target.datatype_name, "DECIMAL");
        assert_eq!(target.precision, 65);
        assert_eq!(target.scale, 30);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_float_precision_is_64_on_mysql_503() {
        let (_, target) = migrate_with_version(&column("FLOAT", "", 10), Some(Version::new(5, 0, 3)));
        assert_eq!(target.precision, 64);
        assert_eq!(target.scale, 10);
    }

    #[test]
    fn test_fixed_scale_within_bounds_is_kept() {
        let mut col = column("FIXED", "", 0);
        col.precision = 12;
        col.scale = 6;
        let (mig, target) = migrate(&col);
        assert_eq!(target.datatype_name, "DECIMAL");
        assert_eq!(target.scale, 6);
        assert_eq!(mig.log.warning_count(), 0);
    }

    #[test]
    fn test_fixed_scale_clamped_with_warning() {
        let mut col = column("FIXED", "", 0);
        col.precision = 38;
        col.scale = 37;
        let (mig, target) = migrate(&col);
        assert_eq!(target.scale, 30);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_varchar_byte_becomes_varbinary_on_mysql5() {
        let (_, target) = migrate(&column("VARCHAR", "BYTE", 100));
        assert_eq!(target.datatype_name, "VARBINARY");
    }

    #[test]
    fn test_varchar_byte_becomes_blob_before_503() {
        let (_, target) =
            migrate_with_version(&column("VARCHAR", "BYTE", 100), Some(Version::new(4, 1, 0)));
        assert_eq!(target.datatype_name, "TINYBLOB");

        let (_, target) =
            migrate_with_version(&column("VARCHAR", "BYTE", 2000), Some(Version::new(4, 1, 0)));
        assert_eq!(target.datatype_name, "BLOB");
    }

    #[test]
    fn test_varchar_unicode_gets_ucs2() {
        let (_, target) = migrate(&column("VARCHAR", "UNICODE", 100));
        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.character_set_name, "ucs2");
    }

    #[test]
    fn test_char_byte_becomes_binary_on_mysql5() {
        let (_, target) = migrate(&column("CHAR", "BYTE", 100));
        assert_eq!(target.datatype_name, "BINARY");

        let (_, target) = migrate(&column("CHAR", "BYTE", 1000));
        assert_eq!(target.datatype_name, "BLOB");
    }

    #[test]
    fn test_long_by_code_type() {
        let (_, target) = migrate(&column("LONG", "ASCII", 0));
        assert_eq!(target.datatype_name, "LONGTEXT");

        let (_, target) = migrate(&column("LONG", "UNICODE", 0));
        assert_eq!(target.datatype_name, "LONGTEXT");
        assert_eq!(target.character_set_name, "ucs2");

        let (_, target) = migrate(&column("LONG", "BYTE", 0));
        assert_eq!(target.datatype_name, "LONGBLOB");
    }

    #[test]
    fn test_timestamp_becomes_datetime() {
        let (_, target) = migrate(&column("TIMESTAMP", "", 0));
        assert_eq!(target.datatype_name, "DATETIME");
    }

    #[test]
    fn test_default_serial_is_dropped() {
        let mut col = column("INTEGER", "", 0);
        col.default_value = "DEFAULT SERIAL".to_string();
        let (_, target) = migrate(&col);
        assert!(target.default_value.is_empty());
    }

    #[test]
    fn test_unknown_type_degrades_to_varchar_255_with_error() {
        let (mig, target) = migrate(&column("ROWID", "", 0));
        assert_eq!(target.datatype_name, "VARCHAR");
        assert_eq!(target.length, 255);
        assert_eq!(mig.log.error_count(), 1);
    }

    #[test]
    fn test_builtin_synonym_skipped_without_log_entry() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("maxdb", SourceDialect::Maxdb);
        let scope = SourceScope::catalog(&catalog);

        let source = Synonym::new("DUAL");
        let mut params = ParamMap::new();
        params.set("skipBuildinSynonyms", "yes");

        let target = MaxdbMigrator
            .migrate_synonym(&disp, &mut mig, &scope, TargetParent::None, &source, &params)
            .unwrap();
        assert!(target.is_none());
        assert!(mig.log.entries().is_empty());

        // the same synonym migrates when the filter is off
        params.set("skipBuildinSynonyms", "no");
        let target = MaxdbMigrator
            .migrate_synonym(&disp, &mut mig, &scope, TargetParent::None, &source, &params)
            .unwrap();
        assert_eq!(target.unwrap().name, "DUAL");
    }

    #[test]
    fn test_foreign_key_names_get_unique_suffixes() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("maxdb", SourceDialect::Maxdb);
        let scope = SourceScope::catalog(&catalog);

        let a = ForeignKey::new("FK_REF");
        let b = ForeignKey::new("FK_REF");

        let ta = MaxdbMigrator
            .migrate_foreign_key(&disp, &mut mig, &scope, TargetParent::None, &a, &ParamMap::new())
            .unwrap();
        let tb = MaxdbMigrator
            .migrate_foreign_key(&disp, &mut mig, &scope, TargetParent::None, &b, &ParamMap::new())
            .unwrap();

        assert_eq!(ta.name, "fk_ref0");
        assert_eq!(tb.name, "fk_ref1");
        assert_ne!(ta.name, tb.name);
    }

    #[test]
    fn test_set_null_delete_rule_logs_error_but_keeps_fk() {
        let mut mig = Migration::new(&Rdbms::mysql(), None);
        let disp = Dispatcher::new();
        let catalog = Catalog::new("maxdb", SourceDialect::Maxdb);
        let scope = SourceScope::catalog(&catalog);

        let mut fk = ForeignKey::new("FK_N");
        fk.delete_rule = "SET NULL".to_string();

        let target = MaxdbMigrator
            .migrate_foreign_key(&disp, &mut mig, &scope, TargetParent::None, &fk, &ParamMap::new())
            .unwrap();
        assert_eq!(target.delete_rule, "SET NULL");
        assert_eq!(mig.log.error_count(), 1);
    }
}
