use crate::policy::DuplicatePolicy;

/// Duplicate handling applied when no configuration overrides it.
pub const DEFAULT_DUPLICATE_POLICY: DuplicatePolicy = DuplicatePolicy::Reject;

/// Default duplicate policy, usable as a `serde(default = ...)` target.
#[must_use]
pub const fn default_duplicate_policy() -> DuplicatePolicy {
    DEFAULT_DUPLICATE_POLICY
}
