//! Catalog and schema object model.
//!
//! These types provide a database-agnostic, in-memory representation of a
//! database's schema metadata: a [`Catalog`] owns schemata, which own
//! tables, views, routines, sequences and synonyms. Ownership forms a
//! strict tree; cross-references (index columns, foreign key targets) are
//! stored as [`ObjectId`]s plus the textual names they were resolved from.
//!
//! The same model is used for both source catalogs (populated by a
//! reverse-engineering collaborator) and the target MySQL catalog produced
//! by a migration run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Run-unique identity of a catalog object.
///
/// Every object in a catalog tree carries one of these. The migration
/// engine keys its source→target lookup table on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Mint a fresh identity.
    pub fn new() -> Self {
        ObjectId(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Source RDBMS family a catalog was reverse-engineered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDialect {
    /// Unknown or plain-JDBC source; only generic migrators apply.
    Generic,
    /// MS Access.
    Access,
    /// Oracle 8i/9i.
    Oracle,
    /// Sybase ASE 12.x.
    Sybase,
    /// SAP MaxDB 7.5/7.6.
    Maxdb,
    /// MySQL (identity migration).
    Mysql,
}

impl std::fmt::Display for SourceDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceDialect::Generic => "generic",
            SourceDialect::Access => "access",
            SourceDialect::Oracle => "oracle",
            SourceDialect::Sybase => "sybase",
            SourceDialect::Maxdb => "maxdb",
            SourceDialect::Mysql => "mysql",
        };
        f.write_str(name)
    }
}

/// Closed set of migratable object kinds. The dispatcher and the method
/// registry are keyed on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Schema,
    Table,
    Column,
    Index,
    ForeignKey,
    View,
    Routine,
    Synonym,
    Trigger,
    Sequence,
}

impl ObjectKind {
    /// Leaf name used in ignore-list patterns (`"Table:SCOTT.EMP"`).
    pub fn leaf_name(&self) -> &'static str {
        match self {
            ObjectKind::Schema => "Schema",
            ObjectKind::Table => "Table",
            ObjectKind::Column => "Column",
            ObjectKind::Index => "Index",
            ObjectKind::ForeignKey => "ForeignKey",
            ObjectKind::View => "View",
            ObjectKind::Routine => "Routine",
            ObjectKind::Synonym => "Synonym",
            ObjectKind::Trigger => "Trigger",
            ObjectKind::Sequence => "Sequence",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.leaf_name())
    }
}

/// Database engine version (major/minor/release).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Version {
    pub major: i32,
    pub minor: i32,
    pub release: i32,
    pub name: String,
}

impl Version {
    pub fn new(major: i32, minor: i32, release: i32) -> Self {
        Version {
            major,
            minor,
            release,
            name: format!("{}.{}.{}", major, minor, release),
        }
    }
}

/// Classification of a simple datatype, driving index-prefix rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatatypeGroup {
    Numeric,
    String,
    Text,
    Blob,
    Datetime,
    Various,
}

/// A target dialect's canonical named type descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleDatatype {
    pub name: String,
    pub group: DatatypeGroup,
}

impl SimpleDatatype {
    pub fn new(name: impl Into<String>, group: DatatypeGroup) -> Self {
        SimpleDatatype {
            name: name.into(),
            group,
        }
    }
}

/// Target RDBMS descriptor: a name plus its simple-datatype catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rdbms {
    pub name: String,
    pub simple_datatypes: Vec<SimpleDatatype>,
}

impl Rdbms {
    /// The standard MySQL type catalog.
    pub fn mysql() -> Self {
        use DatatypeGroup::*;
        let types = [
            ("TINYINT", Numeric),
            ("SMALLINT", Numeric),
            ("MEDIUMINT", Numeric),
            ("INT", Numeric),
            ("INTEGER", Numeric),
            ("BIGINT", Numeric),
            ("FLOAT", Numeric),
            ("DOUBLE", Numeric),
            ("REAL", Numeric),
            ("DECIMAL", Numeric),
            ("NUMERIC", Numeric),
            ("BIT", Numeric),
            ("CHAR", String),
            ("VARCHAR", String),
            ("BINARY", String),
            ("VARBINARY", String),
            ("ENUM", String),
            ("SET", String),
            ("TINYTEXT", Text),
            ("TEXT", Text),
            ("MEDIUMTEXT", Text),
            ("LONGTEXT", Text),
            ("TINYBLOB", Blob),
            ("BLOB", Blob),
            ("MEDIUMBLOB", Blob),
            ("LONGBLOB", Blob),
            ("DATE", Datetime),
            ("TIME", Datetime),
            ("DATETIME", Datetime),
            ("TIMESTAMP", Datetime),
            ("YEAR", Datetime),
        ];

        Rdbms {
            name: "Mysql".to_string(),
            simple_datatypes: types
                .iter()
                .map(|(n, g)| SimpleDatatype::new(*n, *g))
                .collect(),
        }
    }
}

/// Top-level container for one database's full schema metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub version: Version,
    pub dialect: SourceDialect,
    pub schemata: Vec<Schema>,
    /// The target dialect's type catalog; populated on target catalogs.
    pub simple_datatypes: Vec<SimpleDatatype>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, dialect: SourceDialect) -> Self {
        let name = name.into();
        Catalog {
            id: ObjectId::new(),
            old_name: name.clone(),
            name,
            version: Version::default(),
            dialect,
            schemata: Vec::new(),
            simple_datatypes: Vec::new(),
        }
    }

    pub fn schema_by_name(&self, name: &str) -> Option<&Schema> {
        self.schemata.iter().find(|s| s.name == name)
    }
}

/// One schema: tables, views, routines, sequences and synonyms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub default_character_set_name: String,
    pub default_collation_name: String,
    pub tables: Vec<Table>,
    pub views: Vec<View>,
    pub routines: Vec<Routine>,
    pub sequences: Vec<Sequence>,
    pub synonyms: Vec<Synonym>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            default_character_set_name: String::new(),
            default_collation_name: String::new(),
            tables: Vec::new(),
            views: Vec::new(),
            routines: Vec::new(),
            sequences: Vec::new(),
            synonyms: Vec::new(),
        }
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_by_id(&self, id: ObjectId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_by_id_mut(&mut self, id: ObjectId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }
}

/// Table metadata: ordered columns, indices (at most one primary) and
/// foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub table_engine: String,
    pub default_character_set_name: String,
    pub default_collation_name: String,
    pub comment: String,
    pub columns: Vec<Column>,
    pub indices: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
    pub triggers: Vec<Trigger>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            table_engine: String::new(),
            default_character_set_name: String::new(),
            default_collation_name: String::new(),
            comment: String::new(),
            columns: Vec::new(),
            indices: Vec::new(),
            foreign_keys: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// The index flagged as primary key, if any.
    pub fn primary_key(&self) -> Option<&Index> {
        self.indices.iter().find(|i| i.primary)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_by_id(&self, id: ObjectId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_by_id_mut(&mut self, id: ObjectId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }
}

/// Column metadata.
///
/// `simple_type` is a weak link into the owning catalog's simple-datatype
/// list, matched by name; it is only populated on target columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub datatype_name: String,
    pub simple_type: Option<String>,
    /// Extra datatype text such as an ENUM value list.
    pub datatype_explicit_params: String,
    pub length: i32,
    pub precision: i32,
    pub scale: i32,
    pub is_nullable: bool,
    pub default_value: String,
    pub default_value_is_null: bool,
    pub character_set_name: String,
    pub collation_name: String,
    pub auto_increment: bool,
    /// MaxDB code type of character columns: ASCII, UNICODE or BYTE.
    pub code_type: String,
    pub comment: String,
    /// Column flags such as UNSIGNED or BINARY.
    pub flags: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            datatype_name: String::new(),
            simple_type: None,
            datatype_explicit_params: String::new(),
            length: 0,
            precision: 0,
            scale: 0,
            is_nullable: true,
            default_value: String::new(),
            default_value_is_null: false,
            character_set_name: String::new(),
            collation_name: String::new(),
            auto_increment: false,
            code_type: String::new(),
            comment: String::new(),
            flags: Vec::new(),
        }
    }

    /// Add a flag if not already present.
    pub fn add_flag(&mut self, flag: &str) {
        if !self.flags.iter().any(|f| f == flag) {
            self.flags.push(flag.to_string());
        }
    }
}

/// One column of an index, referencing a table column by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    pub referred_column: Option<ObjectId>,
    /// Index prefix length; zero means whole column.
    pub column_length: i32,
    pub descending: bool,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>) -> Self {
        IndexColumn {
            name: name.into(),
            referred_column: None,
            column_length: 0,
            descending: false,
        }
    }
}

/// Index metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub unique: bool,
    pub primary: bool,
    pub columns: Vec<IndexColumn>,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Index {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            unique: false,
            primary: false,
            columns: Vec::new(),
        }
    }
}

/// Foreign key metadata.
///
/// Referenced table and columns are carried both as names (filled during
/// migration) and as resolved identities (filled by the cross-reference
/// resolver once every table exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKey {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub delete_rule: String,
    pub update_rule: String,
    pub deferability: i32,
    pub columns: Vec<ObjectId>,
    pub column_names: Vec<String>,
    pub referred_table_schema_name: String,
    pub referred_table_name: String,
    pub referred_table: Option<ObjectId>,
    pub referred_columns: Vec<ObjectId>,
    pub referred_column_names: Vec<String>,
}

impl ForeignKey {
    pub fn new(name: impl Into<String>) -> Self {
        ForeignKey {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            delete_rule: String::new(),
            update_rule: String::new(),
            deferability: 0,
            columns: Vec::new(),
            column_names: Vec::new(),
            referred_table_schema_name: String::new(),
            referred_table_name: String::new(),
            referred_table: None,
            referred_columns: Vec::new(),
            referred_column_names: Vec::new(),
        }
    }
}

/// View metadata. `commented_out` marks SQL that needs manual review
/// before execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub query_expression: String,
    pub with_check_condition: bool,
    pub commented_out: bool,
    pub columns: Vec<String>,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        View {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            query_expression: String::new(),
            with_check_condition: false,
            commented_out: false,
            columns: Vec::new(),
        }
    }
}

/// Stored procedure or function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    /// PROCEDURE or FUNCTION.
    pub routine_type: String,
    pub routine_code: String,
    pub commented_out: bool,
}

impl Routine {
    pub fn new(name: impl Into<String>) -> Self {
        Routine {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            routine_type: String::new(),
            routine_code: String::new(),
            commented_out: false,
        }
    }
}

/// Synonym: an alternative name for another object, migrated to a
/// view-like reference on MySQL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synonym {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub referred_object_name: String,
    pub referred_object: Option<ObjectId>,
}

impl Synonym {
    pub fn new(name: impl Into<String>) -> Self {
        Synonym {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            referred_object_name: String::new(),
            referred_object: None,
        }
    }
}

/// Table trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
    pub comment: String,
    /// BEFORE or AFTER.
    pub timing: String,
    /// INSERT, UPDATE or DELETE.
    pub event: String,
    pub statement: String,
}

impl Trigger {
    pub fn new(name: impl Into<String>) -> Self {
        Trigger {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
            comment: String::new(),
            timing: String::new(),
            event: String::new(),
            statement: String::new(),
        }
    }
}

/// Sequence generator. MySQL has no counterpart; migrating one yields a
/// dispatch error log entry and no target object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub id: ObjectId,
    pub name: String,
    pub old_name: String,
}

impl Sequence {
    pub fn new(name: impl Into<String>) -> Self {
        Sequence {
            id: ObjectId::new(),
            name: name.into(),
            old_name: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids_are_unique() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mysql_rdbms_has_varchar() {
        let rdbms = Rdbms::mysql();
        let varchar = rdbms
            .simple_datatypes
            .iter()
            .find(|d| d.name == "VARCHAR")
            .unwrap();
        assert_eq!(varchar.group, DatatypeGroup::String);
    }

    #[test]
    fn test_table_primary_key_lookup() {
        let mut table = Table::new("emp");
        let mut pk = Index::new("PRIMARY");
        pk.primary = true;
        table.indices.push(Index::new("idx_name"));
        table.indices.push(pk);

        assert_eq!(table.primary_key().unwrap().name, "PRIMARY");
    }

    #[test]
    fn test_column_add_flag_deduplicates() {
        let mut col = Column::new("n");
        col.add_flag("UNSIGNED");
        col.add_flag("UNSIGNED");
        assert_eq!(col.flags, vec!["UNSIGNED".to_string()]);
    }

    #[test]
    fn test_catalog_roundtrips_through_json() {
        let mut catalog = Catalog::new("scott", SourceDialect::Oracle);
        catalog.schemata.push(Schema::new("SCOTT"));

        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "scott");
        assert_eq!(back.schemata.len(), 1);
        assert_eq!(back.dialect, SourceDialect::Oracle);
    }
}
