//! Configuration for the request validation engine.

use crate::domain::ParamSource;

/// Decides whether a value found in a container counts as provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresencePolicy {
    /// Only truthy values count: empty strings, `0`, `false` and `null` are
    /// treated as absent.
    #[default]
    Truthy,
    /// Every non-null value counts, including empty strings, `0` and `false`.
    Present,
}

/// Configuration for parameter resolution and failure reporting.
///
/// # Examples
///
/// ```
/// use paramguard::domain::ParamSource;
/// use paramguard::ports::{PresencePolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::default();
/// assert_eq!(config.presence, PresencePolicy::Truthy);
/// assert_eq!(config.source_priority.first(), Some(&ParamSource::Query));
///
/// let strict = ValidatorConfig::strict_presence();
/// assert_eq!(strict.presence, PresencePolicy::Present);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// How container values are judged present.
    pub presence: PresencePolicy,
    /// Containers searched for a field, highest priority first.
    pub source_priority: Vec<ParamSource>,
    /// Message for a required field that resolved to no value.
    pub required_message: String,
    /// Fallback message for rules and custom validators that fail silently.
    pub invalid_message: String,
    /// Text placed between the field name and the message of rule-chain
    /// failures.
    pub field_separator: String,
    /// Parsed-tree key holding values without a natural source path.
    pub default_bucket: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            presence: PresencePolicy::Truthy,
            source_priority: ParamSource::ALL.to_vec(),
            required_message: "field is required".to_owned(),
            invalid_message: "invalid parameter".to_owned(),
            field_separator: " ".to_owned(),
            default_bucket: "default".to_owned(),
        }
    }
}

impl ValidatorConfig {
    /// Creates a configuration where empty strings, `0` and `false` count as
    /// provided values.
    #[must_use]
    pub fn strict_presence() -> Self {
        Self {
            presence: PresencePolicy::Present,
            ..Self::default()
        }
    }

    /// Replaces the container search order.
    #[must_use]
    pub fn with_source_priority(mut self, order: impl IntoIterator<Item = ParamSource>) -> Self {
        self.source_priority = order.into_iter().collect();
        self
    }

    /// Replaces the required-field and invalid-parameter messages.
    #[must_use]
    pub fn with_messages(
        mut self,
        required_message: impl Into<String>,
        invalid_message: impl Into<String>,
    ) -> Self {
        self.required_message = required_message.into();
        self.invalid_message = invalid_message.into();
        self
    }

    /// Replaces the separator between field names and rule-chain messages.
    #[must_use]
    pub fn with_field_separator(mut self, separator: impl Into<String>) -> Self {
        self.field_separator = separator.into();
        self
    }
}
