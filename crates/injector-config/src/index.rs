use serde::{Deserialize, Serialize};

use crate::defaults::default_duplicate_policy;
use crate::policy::DuplicatePolicy;

/// Settings consumed while building a method index.
///
/// Missing fields fall back to their defaults, so an empty document
/// deserializes to [`IndexConfig::default`].
///
/// # Example
///
/// ```
/// use injector_config::{DuplicatePolicy, IndexConfig};
///
/// let config = IndexConfig::new().with_duplicate_policy(DuplicatePolicy::Overwrite);
/// assert_eq!(config.duplicate_policy(), DuplicatePolicy::Overwrite);
/// assert_eq!(config, IndexConfig::source_parity());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// How duplicate parameter types are handled.
    #[serde(default = "default_duplicate_policy")]
    duplicate_policy: DuplicatePolicy,
}

impl IndexConfig {
    /// Creates a configuration with every field at its default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duplicate_policy: default_duplicate_policy(),
        }
    }

    /// Configuration that keeps the last handler registered for a type,
    /// matching reflective indexers that silently overwrite.
    #[must_use]
    pub const fn source_parity() -> Self {
        Self::new().with_duplicate_policy(DuplicatePolicy::Overwrite)
    }

    /// Returns a copy with the given duplicate policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Configured duplicate policy.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
