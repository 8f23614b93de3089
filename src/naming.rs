//! Naming deriver - external names computed from the intent's logical name

use regex::Regex;
use std::sync::LazyLock;

/// Storage account names: 3-24 lowercase alphanumeric characters
static ACCOUNT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{3,24}$").expect("valid account name pattern"));

/// Derive a downstream identifier from the intent's logical name
///
/// Logical names are lowercase alphanumeric separated by hyphens, so dropping
/// the hyphens gives a name storage accounts accept. Uniqueness is up to
/// whoever picked the logical name.
pub fn derive_identifier(logical_name: &str) -> String {
    logical_name.replace('-', "").to_lowercase()
}

/// Check a name against the storage account naming rules
pub fn satisfies_account_constraints(name: &str) -> bool {
    ACCOUNT_NAME.is_match(name)
}
