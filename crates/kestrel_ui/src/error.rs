//! # UI Error Types
//!
//! Errors raised by the location index, the configuration loader, and the
//! internal tree helpers. The public `UserInterface` surface turns stale
//! references into logged no-ops instead of returning these.

use thiserror::Error;

/// Errors that can occur while addressing or configuring the UI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The id is not present in the location index.
    #[error("stale id: {0} is not present in the location index")]
    StaleId(u32),

    /// The reserved invalid sentinel was used as an id.
    #[error("the invalid id sentinel cannot be resolved")]
    InvalidId,

    /// The id resolves to a window where a widget was expected.
    #[error("id {0} refers to a window, not a widget")]
    NotAWidget(u32),

    /// The id resolves to a widget where a window was expected.
    #[error("id {0} refers to a widget, not a window")]
    NotAWindow(u32),

    /// An index in a path overruns its sequence.
    #[error("path index {index} out of bounds (sequence length {len})")]
    PathOutOfBounds {
        /// Offending index.
        index: usize,
        /// Length of the sequence it indexed.
        len: usize,
    },

    /// A path descends through a widget that has no children.
    #[error("path descends through non-container widget {0}")]
    NotAContainer(u32),

    /// Kind-specific data was requested from the wrong widget kind.
    #[error("widget {id} is a {actual}, expected {expected}")]
    WrongWidgetKind {
        /// Widget id.
        id: u32,
        /// Kind that was required.
        expected: &'static str,
        /// Kind the widget actually is.
        actual: &'static str,
    },

    /// A structural insert would duplicate an existing id.
    #[error("duplicate id: {0} is already present")]
    DuplicateId(u32),

    /// The location index was not rebuilt after a structural edit.
    #[error("location index is stale, rebuild required")]
    StaleIndex,

    /// Invalid configuration text or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UiError {
    /// Returns true for errors that indicate an internal consistency bug
    /// rather than a stale reference held by the caller.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::PathOutOfBounds { .. } | Self::NotAContainer(_) | Self::WrongWidgetKind { .. }
        )
    }
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;

/// Reports an internal consistency failure.
///
/// Panics in builds with debug assertions, logs a warning otherwise.
pub(crate) fn invariant_violation(err: &UiError) {
    debug_assert!(false, "ui invariant violated: {err}");
    tracing::warn!(error = %err, "ui invariant violated, operation skipped");
}

/// Logs a failed lookup at the appropriate severity.
pub(crate) fn report(err: &UiError, operation: &'static str) {
    if err.is_invariant_violation() {
        invariant_violation(err);
    } else {
        tracing::warn!(error = %err, operation, "lookup failed, operation skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UiError::PathOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "path index 4 out of bounds (sequence length 2)");
        assert!(err.is_invariant_violation());
        assert!(!UiError::StaleId(3).is_invariant_violation());
    }
}
