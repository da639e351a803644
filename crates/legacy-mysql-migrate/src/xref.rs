//! Cross-reference resolution.
//!
//! Foreign keys are migrated while their referenced tables may not exist
//! yet, so they initially carry only the referenced schema/table/column
//! names. This pass runs once per catalog, after every schema has been
//! migrated, and rewires those names into object references by exact
//! name lookup. A referenced schema name that is empty or names the
//! foreign key's own schema resolves to that schema.
//!
//! References that cannot be resolved are reported as warnings on the
//! foreign key's log entry; the reference lists simply stay shorter than
//! the name lists.

use tracing::debug;

use crate::core::schema::{Catalog, ObjectId};
use crate::dispatch::Migration;
use crate::log::Severity;

struct FkResolution {
    schema_idx: usize,
    table_idx: usize,
    fk_idx: usize,
    referred_table: Option<ObjectId>,
    referred_columns: Vec<ObjectId>,
    warnings: Vec<String>,
}

/// Resolve every foreign key's referenced table and columns in `target`.
pub fn resolve_references(mig: &mut Migration, target: &mut Catalog) {
    let mut resolutions = Vec::new();

    for (schema_idx, schema) in target.schemata.iter().enumerate() {
        for (table_idx, table) in schema.tables.iter().enumerate() {
            for (fk_idx, fk) in table.foreign_keys.iter().enumerate() {
                let mut resolution = FkResolution {
                    schema_idx,
                    table_idx,
                    fk_idx,
                    referred_table: fk.referred_table,
                    referred_columns: Vec::new(),
                    warnings: Vec::new(),
                };

                // empty or self-referential schema names mean "this schema"
                let referred_schema = if fk.referred_table_schema_name.is_empty()
                    || fk.referred_table_schema_name == schema.name
                {
                    Some(schema)
                } else {
                    target.schema_by_name(&fk.referred_table_schema_name)
                };

                let referred_table =
                    referred_schema.and_then(|s| s.table_by_name(&fk.referred_table_name));

                match referred_table {
                    Some(t) => resolution.referred_table = Some(t.id),
                    None => {
                        // a reference the migrator resolved through the
                        // object map is still good; only a fully
                        // unresolved table is worth a warning
                        if resolution.referred_table.is_none() {
                            resolution.warnings.push(format!(
                                "The referenced table {}.{} could not be resolved.",
                                fk.referred_table_schema_name, fk.referred_table_name
                            ));
                        }
                    }
                }

                // columns resolve inside whichever table reference we have
                let column_home = resolution.referred_table.and_then(|id| {
                    target
                        .schemata
                        .iter()
                        .find_map(|s| s.table_by_id(id))
                });

                if let Some(home) = column_home {
                    for column_name in &fk.referred_column_names {
                        match home.column_by_name(column_name) {
                            Some(column) => resolution.referred_columns.push(column.id),
                            None => resolution.warnings.push(format!(
                                "The referenced column {}.{} could not be resolved.",
                                home.name, column_name
                            )),
                        }
                    }
                }

                // keep a resolution the migrator already produced rather
                // than dropping it for lack of names
                if resolution.referred_columns.is_empty() && !fk.referred_columns.is_empty() {
                    resolution.referred_columns = fk.referred_columns.clone();
                }

                resolutions.push(resolution);
            }
        }
    }

    let total = resolutions.len();
    let mut unresolved = 0;

    for resolution in resolutions {
        let schema = &mut target.schemata[resolution.schema_idx];
        let table = &mut schema.tables[resolution.table_idx];
        let fk = &mut table.foreign_keys[resolution.fk_idx];

        fk.referred_table = resolution.referred_table;
        fk.referred_columns = resolution.referred_columns;

        if !resolution.warnings.is_empty() {
            unresolved += 1;
            // log against the source object when the mapping knows it,
            // against the target foreign key otherwise
            let log_id = mig.source_of(fk.id).unwrap_or(fk.id);
            let fk_name = fk.old_name.clone();
            for warning in resolution.warnings {
                mig.log
                    .add_message(log_id, &fk_name, None, warning, Severity::Warning);
            }
        }
    }

    debug!(
        "cross-reference resolution: {} foreign keys, {} with unresolved references",
        total, unresolved
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, ForeignKey, Rdbms, Schema, SourceDialect, Table};

    fn target_with_fk(
        referred_schema_name: &str,
        referred_table_name: &str,
        referred_column_names: Vec<String>,
    ) -> Catalog {
        let mut catalog = Catalog::new("Standard", SourceDialect::Mysql);
        let mut schema = Schema::new("app");

        let mut parent = Table::new("customer");
        parent.columns.push(Column::new("id"));
        parent.columns.push(Column::new("region"));

        let mut child = Table::new("orders");
        child.columns.push(Column::new("customer_id"));
        let mut fk = ForeignKey::new("fk_orders_customer");
        fk.old_name = "fk_orders_customer".to_string();
        fk.referred_table_schema_name = referred_schema_name.to_string();
        fk.referred_table_name = referred_table_name.to_string();
        fk.referred_column_names = referred_column_names;
        child.foreign_keys.push(fk);

        schema.tables.push(parent);
        schema.tables.push(child);
        catalog.schemata.push(schema);
        catalog
    }

    #[test]
    fn test_resolves_table_and_columns_by_name() {
        let mut catalog = target_with_fk("app", "customer", vec!["id".to_string()]);
        let mut mig = Migration::new(&Rdbms::mysql(), None);

        resolve_references(&mut mig, &mut catalog);

        let parent_id = catalog.schemata[0].tables[0].id;
        let parent_col_id = catalog.schemata[0].tables[0].columns[0].id;
        let fk = &catalog.schemata[0].tables[1].foreign_keys[0];
        assert_eq!(fk.referred_table, Some(parent_id));
        assert_eq!(fk.referred_columns, vec![parent_col_id]);
        assert_eq!(mig.log.warning_count(), 0);
    }

    #[test]
    fn test_empty_schema_name_falls_back_to_own_schema() {
        let mut catalog = target_with_fk("", "customer", vec!["id".to_string()]);
        let mut mig = Migration::new(&Rdbms::mysql(), None);

        resolve_references(&mut mig, &mut catalog);

        let fk = &catalog.schemata[0].tables[1].foreign_keys[0];
        assert!(fk.referred_table.is_some());
    }

    #[test]
    fn test_unresolved_table_logs_warning() {
        let mut catalog = target_with_fk("app", "no_such_table", vec!["id".to_string()]);
        let mut mig = Migration::new(&Rdbms::mysql(), None);

        resolve_references(&mut mig, &mut catalog);

        let fk = &catalog.schemata[0].tables[1].foreign_keys[0];
        assert_eq!(fk.referred_table, None);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_unresolved_column_shortens_list_and_warns() {
        let mut catalog = target_with_fk(
            "app",
            "customer",
            vec!["id".to_string(), "no_such_column".to_string()],
        );
        let mut mig = Migration::new(&Rdbms::mysql(), None);

        resolve_references(&mut mig, &mut catalog);

        let fk = &catalog.schemata[0].tables[1].foreign_keys[0];
        assert_eq!(fk.referred_columns.len(), 1);
        assert_eq!(mig.log.warning_count(), 1);
    }

    #[test]
    fn test_cross_schema_reference_resolves() {
        let mut catalog = Catalog::new("Standard", SourceDialect::Mysql);

        let mut master = Schema::new("master");
        let mut accounts = Table::new("accounts");
        accounts.columns.push(Column::new("id"));
        master.tables.push(accounts);

        let mut app = Schema::new("app");
        let mut entries = Table::new("entries");
        entries.columns.push(Column::new("account_id"));
        let mut fk = ForeignKey::new("fk_entries_account");
        fk.referred_table_schema_name = "master".to_string();
        fk.referred_table_name = "accounts".to_string();
        fk.referred_column_names = vec!["id".to_string()];
        entries.foreign_keys.push(fk);
        app.tables.push(entries);

        catalog.schemata.push(master);
        catalog.schemata.push(app);

        let mut mig = Migration::new(&Rdbms::mysql(), None);
        resolve_references(&mut mig, &mut catalog);

        let accounts_id = catalog.schemata[0].tables[0].id;
        let fk = &catalog.schemata[1].tables[0].foreign_keys[0];
        assert_eq!(fk.referred_table, Some(accounts_id));
        assert_eq!(fk.referred_columns.len(), 1);
    }
}
