//! The contract every compatibility rule implements.

use buildcheck_models::{ComponentsMap, Product, ValidationIssue};

use crate::error::BuildCheckResult;

/// A single compatibility check over a (possibly partial) build.
///
/// Rules are stateless: they read the components map, return whatever issues
/// they find and keep nothing afterwards. A rule that returns an error or
/// panics is contained by the engine and reported as a warning.
pub trait ValidationRule: Send + Sync {
    /// Unique name used for registration and removal.
    fn name(&self) -> &str;

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>>;
}

/// First non-blank string value among `keys` in a product's specs.
pub(crate) fn spec_text(product: &Product, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| product.specs.text(key))
}
