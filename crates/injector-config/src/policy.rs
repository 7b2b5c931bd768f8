use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Behaviour applied when a second handler is registered for a parameter
/// type that already has one.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    /// Refuse the second registration and report a configuration error.
    #[default]
    Reject,
    /// Replace the earlier handler with the later one ("last wins").
    Overwrite,
}

impl DuplicatePolicy {
    /// Returns `true` when later registrations replace earlier ones.
    #[must_use]
    pub const fn overwrites(self) -> bool {
        matches!(self, Self::Overwrite)
    }
}

/// Errors encountered while parsing a [`DuplicatePolicy`] from text.
pub type DuplicatePolicyParseError = strum::ParseError;
