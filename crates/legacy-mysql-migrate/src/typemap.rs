//! Declarative datatype mapping tables.
//!
//! A [`DatatypeMapping`] row maps a source datatype name, optionally
//! constrained by length/precision/scale ranges, to a target datatype with
//! replacement parameters. The generic column migrator walks the table in
//! order and applies the first row whose name matches case-insensitively
//! and whose range conditions all hold; dialect-specific column migrators
//! bypass the table in favor of hardcoded rules.
//!
//! Range bounds of `0` mean "unbounded". Target length of `-1` (and
//! precision/scale of `-1`) mean "keep the column's current value".

use serde::{Deserialize, Serialize};

use crate::core::schema::Column;

/// One row of a declarative datatype mapping table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatatypeMapping {
    pub source_datatype_name: String,
    pub target_datatype_name: String,
    /// Source length must be >= this when positive.
    pub length_condition_from: i32,
    /// Source length must be <= this when positive.
    pub length_condition_to: i32,
    pub precision_condition_from: i32,
    pub precision_condition_to: i32,
    pub scale_condition_from: i32,
    pub scale_condition_to: i32,
    /// Target length; -1 keeps the column's value.
    pub length: i32,
    /// Target precision; -1 keeps the column's value.
    pub precision: i32,
    /// Target scale; -1 keeps the column's value.
    pub scale: i32,
    pub auto_increment: bool,
    pub unsigned: bool,
    pub character_set_name: String,
    pub collation_name: String,
}

impl DatatypeMapping {
    /// Unconditional mapping from `source` to `target` keeping all
    /// column parameters.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        DatatypeMapping {
            source_datatype_name: source.into(),
            target_datatype_name: target.into(),
            length_condition_from: 0,
            length_condition_to: 0,
            precision_condition_from: 0,
            precision_condition_to: 0,
            scale_condition_from: 0,
            scale_condition_to: 0,
            length: -1,
            precision: -1,
            scale: -1,
            auto_increment: false,
            unsigned: false,
            character_set_name: String::new(),
            collation_name: String::new(),
        }
    }

    /// Whether this row applies to the source column.
    fn matches(&self, source: &Column) -> bool {
        if !self
            .source_datatype_name
            .eq_ignore_ascii_case(source.datatype_name.trim())
        {
            return false;
        }

        in_range(
            source.length,
            self.length_condition_from,
            self.length_condition_to,
        ) && in_range(
            source.precision,
            self.precision_condition_from,
            self.precision_condition_to,
        ) && in_range(
            source.scale,
            self.scale_condition_from,
            self.scale_condition_to,
        )
    }

    /// Write this row's target datatype and parameters onto the column.
    fn apply(&self, target: &mut Column) {
        target.datatype_name = self.target_datatype_name.clone();

        if self.auto_increment {
            target.auto_increment = true;
            target.default_value = String::new();
            target.default_value_is_null = true;
        }

        if self.unsigned {
            target.add_flag("UNSIGNED");
        }

        if !self.character_set_name.is_empty() {
            target.character_set_name = self.character_set_name.clone();
        }
        if !self.collation_name.is_empty() {
            target.collation_name = self.collation_name.clone();
        }

        if self.length > -1 {
            target.length = self.length;
        }
        if self.precision != -1 {
            target.precision = self.precision;
        }
        if self.scale != -1 {
            target.scale = self.scale;
        }
    }
}

/// A bound of 0 is "unconstrained".
fn in_range(value: i32, from: i32, to: i32) -> bool {
    if from > 0 && value < from {
        return false;
    }
    if to > 0 && value > to {
        return false;
    }
    true
}

/// Apply the first matching mapping row; returns whether one matched.
pub fn apply_first_match(
    mappings: &[DatatypeMapping],
    source: &Column,
    target: &mut Column,
) -> bool {
    for mapping in mappings {
        if mapping.matches(source) {
            mapping.apply(target);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_column(datatype: &str, length: i32, precision: i32, scale: i32) -> Column {
        let mut col = Column::new("c");
        col.datatype_name = datatype.to_string();
        col.length = length;
        col.precision = precision;
        col.scale = scale;
        col
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let mapping = DatatypeMapping::new("varchar", "VARCHAR");
        let src = source_column("VarChar", 0, 0, 0);
        let mut tgt = Column::new("c");
        assert!(apply_first_match(&[mapping], &src, &mut tgt));
        assert_eq!(tgt.datatype_name, "VARCHAR");
    }

    #[test]
    fn test_range_conditions_gate_the_match() {
        let mut short = DatatypeMapping::new("VARCHAR", "VARCHAR");
        short.length_condition_to = 255;
        let mut long = DatatypeMapping::new("VARCHAR", "TEXT");
        long.length_condition_from = 256;
        let mappings = vec![short, long];

        let mut tgt = Column::new("c");
        let src = source_column("VARCHAR", 80, 0, 0);
        assert!(apply_first_match(&mappings, &src, &mut tgt));
        assert_eq!(tgt.datatype_name, "VARCHAR");

        let src = source_column("VARCHAR", 4000, 0, 0);
        assert!(apply_first_match(&mappings, &src, &mut tgt));
        assert_eq!(tgt.datatype_name, "TEXT");
    }

    #[test]
    fn test_zero_bound_means_unbounded() {
        let mapping = DatatypeMapping::new("INT", "INT");
        let src = source_column("INT", 0, 0, 0);
        let mut tgt = Column::new("c");
        assert!(apply_first_match(&[mapping], &src, &mut tgt));
    }

    #[test]
    fn test_minus_one_keeps_column_values() {
        let mapping = DatatypeMapping::new("NUMERIC", "DECIMAL");
        let src = source_column("NUMERIC", 0, 12, 4);
        let mut tgt = source_column("", 0, 12, 4);
        assert!(apply_first_match(&[mapping], &src, &mut tgt));
        assert_eq!(tgt.precision, 12);
        assert_eq!(tgt.scale, 4);
    }

    #[test]
    fn test_auto_increment_row_clears_default() {
        let mut mapping = DatatypeMapping::new("COUNTER", "INT");
        mapping.auto_increment = true;
        mapping.unsigned = true;

        let src = source_column("COUNTER", 0, 0, 0);
        let mut tgt = Column::new("c");
        tgt.default_value = "0".to_string();
        assert!(apply_first_match(&[mapping], &src, &mut tgt));
        assert!(tgt.auto_increment);
        assert!(tgt.default_value.is_empty());
        assert!(tgt.default_value_is_null);
        assert_eq!(tgt.flags, vec!["UNSIGNED".to_string()]);
    }

    #[test]
    fn test_first_match_wins() {
        let first = DatatypeMapping::new("MONEY", "DECIMAL");
        let second = DatatypeMapping::new("MONEY", "DOUBLE");
        let src = source_column("MONEY", 0, 0, 0);
        let mut tgt = Column::new("c");
        assert!(apply_first_match(&[first, second], &src, &mut tgt));
        assert_eq!(tgt.datatype_name, "DECIMAL");
    }
}
