//! Feature flag evaluation.

use std::collections::HashSet;

/// Flag that scopes the automatic-promotion toggles to a sales channel.
pub const AUTOMATIC_PROMOTIONS_FLAG: &str = "FEATURE_NEXT_10058";

/// Read-only view of which feature flags are active.
pub trait FeatureFlags: Send + Sync {
    /// Whether `flag` is active.
    fn is_active(&self, flag: &str) -> bool;
}

/// A fixed set of active flags, typically read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFeatureFlags {
    active: HashSet<String>,
}

impl StaticFeatureFlags {
    /// No flag active.
    pub fn none() -> Self {
        Self::default()
    }

    /// Activate an additional flag.
    pub fn with(mut self, flag: impl Into<String>) -> Self {
        self.active.insert(flag.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for StaticFeatureFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn is_active(&self, flag: &str) -> bool {
        self.active.contains(flag)
    }
}
