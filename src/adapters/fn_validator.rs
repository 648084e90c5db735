//! Closure-backed custom validators.

use crate::{
    domain::{CustomValidatorError, RequestParams},
    ports::CustomValidator,
};
use async_trait::async_trait;

/// Adapts a synchronous closure into a [`CustomValidator`].
///
/// # Examples
///
/// ```
/// use paramguard::adapters::FnValidator;
/// use paramguard::domain::CustomValidatorError;
///
/// let passwords_match = FnValidator::new(|data| {
///     if data.get("body.password") == data.get("body.confirm") {
///         Ok(())
///     } else {
///         Err(CustomValidatorError::new("passwords do not match"))
///     }
/// });
/// # let _ = passwords_match;
/// ```
pub struct FnValidator<F> {
    check: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&RequestParams) -> Result<(), CustomValidatorError> + Send + Sync,
{
    /// Wraps `check`.
    #[must_use]
    pub const fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> CustomValidator for FnValidator<F>
where
    F: Fn(&RequestParams) -> Result<(), CustomValidatorError> + Send + Sync,
{
    async fn validate(&self, data: &RequestParams) -> Result<(), CustomValidatorError> {
        (self.check)(data)
    }
}
