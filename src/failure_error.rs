use std::fmt;

use thiserror::Error;

use crate::{FailureCategory, FailureReport};

/// The location and explanation of a failed check, owned by a raised error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the library on whose behalf the check was made.
    pub library: String,
    /// Source text of the failed expression.
    pub expression: String,
    pub file: String,
    pub line: u32,
    /// Free-form explanation supplied by the caller; may be empty.
    pub explanation: String,
}

impl From<&FailureReport<'_>> for Violation {
    fn from(report: &FailureReport<'_>) -> Self {
        Violation {
            library: report.library.to_string(),
            expression: report.expression.to_string(),
            file: report.file.to_string(),
            line: report.line,
            explanation: report.explanation.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expr: {}\nFile: {}\nLine: {}",
            self.expression, self.file, self.line
        )?;
        if !self.explanation.is_empty() {
            write!(f, "\nExplanation: {}", self.explanation)?;
        }
        Ok(())
    }
}

/// A failed check raised back to the caller, tagged by category.
///
/// Returned by the dispatchers when the active behaviour resolves to
/// [`Disposition::Raise`](crate::Disposition::Raise). Callers recover by
/// matching on the variant or let it propagate with `?`.
///
/// A raised error cannot be dropped without a warning:
///
/// ```compile_fail
/// #![deny(unused_must_use)]
/// use failure_registry::FailureRegistry;
///
/// fn doubled(registry: &FailureRegistry, x: i32) -> i32 {
///     if x <= 0 {
///         registry.precondition_fail("x > 0", "geo.rs", 42, "x must be positive");
///     }
///     x * 2
/// }
///
/// fn main() {
///     doubled(&FailureRegistry::default(), -5);
/// }
/// ```
#[must_use = "a raised failure must be propagated or handled"]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureError {
    #[error("{} ERROR: assertion violation!\n{}", .0.library, .0)]
    Assertion(Violation),

    #[error("{} ERROR: precondition violation!\n{}", .0.library, .0)]
    Precondition(Violation),

    #[error("{} ERROR: postcondition violation!\n{}", .0.library, .0)]
    Postcondition(Violation),

    #[error("{} WARNING: warning violation!\n{}", .0.library, .0)]
    Warning(Violation),
}

impl FailureError {
    pub fn new(category: FailureCategory, violation: Violation) -> Self {
        match category {
            FailureCategory::Assertion => FailureError::Assertion(violation),
            FailureCategory::Precondition => FailureError::Precondition(violation),
            FailureCategory::Postcondition => FailureError::Postcondition(violation),
            FailureCategory::Warning => FailureError::Warning(violation),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            FailureError::Assertion(_) => FailureCategory::Assertion,
            FailureError::Precondition(_) => FailureCategory::Precondition,
            FailureError::Postcondition(_) => FailureCategory::Postcondition,
            FailureError::Warning(_) => FailureCategory::Warning,
        }
    }

    pub fn violation(&self) -> &Violation {
        match self {
            FailureError::Assertion(v)
            | FailureError::Precondition(v)
            | FailureError::Postcondition(v)
            | FailureError::Warning(v) => v,
        }
    }

    pub fn into_violation(self) -> Violation {
        match self {
            FailureError::Assertion(v)
            | FailureError::Precondition(v)
            | FailureError::Postcondition(v)
            | FailureError::Warning(v) => v,
        }
    }
}

/// Errors from managing the process-wide registry itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// [`install`](crate::install) was called after the process-wide registry
    /// had already been created.
    #[error("The process-wide failure registry is already installed")]
    AlreadyInstalled,
}
