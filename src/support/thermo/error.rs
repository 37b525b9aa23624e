use thiserror::Error;

/// Errors returned by property queries.
///
/// Providers must report an invalid query as an error rather than a `NaN` or
/// an extrapolated value. [`PropertyError::OutOfDomain`] is the
/// distinguishable "out of range" signal the marching solver reports when a
/// marched state leaves a fluid's valid region, most often because gas
/// pressure has fallen to zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is not defined for this fluid.
    ///
    /// For example, asking a liquid-water model about nitrogen.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The temperature or pressure is outside the model's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }

    pub(crate) fn undefined(context: impl Into<String>) -> Self {
        Self::Undefined {
            context: context.into(),
        }
    }
}
