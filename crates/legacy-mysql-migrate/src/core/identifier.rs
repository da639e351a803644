//! Per-dialect identifier folding.
//!
//! Every target name assignment runs the source identifier through the
//! owning dialect's policy before an explicit `targetName` parameter can
//! override it. The policies are pure functions; dialect migrators select
//! one via their `migrate_identifier` hook.

/// Keep the identifier as-is. Used by the generic and MySQL migrators.
pub fn pass_through(name: &str) -> String {
    name.to_string()
}

/// Lower-case the identifier. Oracle, MaxDB and Sybase fold unquoted
/// identifiers to a single case, so the migrated names are normalized
/// the same way.
pub fn lower_case(name: &str) -> String {
    name.to_lowercase()
}

/// Replace `/` with `_`. Access object names may contain path separators
/// that MySQL identifiers cannot carry.
pub fn slash_to_underscore(name: &str) -> String {
    name.replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        assert_eq!(pass_through("Employees"), "Employees");
        assert_eq!(pass_through(""), "");
    }

    #[test]
    fn test_lower_case() {
        assert_eq!(lower_case("SCOTT"), "scott");
        assert_eq!(lower_case("MixedCase"), "mixedcase");
    }

    #[test]
    fn test_slash_to_underscore() {
        assert_eq!(slash_to_underscore("Orders/2004"), "Orders_2004");
        assert_eq!(slash_to_underscore("plain"), "plain");
    }
}
