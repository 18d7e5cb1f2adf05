//! Initial configuration of a failure registry.
//!
//! The configuration is read once, when a registry is created. Afterwards the
//! behaviours and handlers change only through the registration methods.
//!
//! With the `serde` feature an application can embed this in its own
//! configuration file:
//!
//! ```toml
//! [failures]
//! library = "IGIT"
//! error_behaviour = "abort"
//! warning_behaviour = "throw_exception"
//! ```

use crate::FailureBehavior;

pub const DEFAULT_LIBRARY: &str = "CGAL";
pub const DEFAULT_BUG_REPORT_URL: &str = "http://www.cgal.org/bug_report.html";

/// Settings a registry starts with.
///
/// # Examples
///
/// ```rust
/// use failure_registry::{FailureBehavior, FailureConfig, FailureRegistry};
///
/// let config = FailureConfig::new()
///     .with_library("IGIT")
///     .with_error_behaviour(FailureBehavior::Abort);
///
/// let registry = FailureRegistry::new(config);
/// assert_eq!(registry.error_behaviour(), FailureBehavior::Abort);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureConfig {
    /// Library name carried by reports and raised errors.
    pub library: String,
    /// Printed as the last line of the standard report.
    pub bug_report_url: String,
    pub error_behaviour: FailureBehavior,
    pub warning_behaviour: FailureBehavior,
    /// Makes the standard handlers stay silent for failures that are raised
    /// to the caller. Only useful where uncaught errors get printed anyway.
    pub suppress_duplicate_report: bool,
}

impl Default for FailureConfig {
    fn default() -> Self {
        FailureConfig {
            library: DEFAULT_LIBRARY.to_string(),
            bug_report_url: DEFAULT_BUG_REPORT_URL.to_string(),
            error_behaviour: FailureBehavior::ThrowException,
            warning_behaviour: FailureBehavior::Continue,
            suppress_duplicate_report: false,
        }
    }
}

impl FailureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    pub fn with_bug_report_url(mut self, url: impl Into<String>) -> Self {
        self.bug_report_url = url.into();
        self
    }

    pub fn with_error_behaviour(mut self, behavior: FailureBehavior) -> Self {
        self.error_behaviour = behavior;
        self
    }

    pub fn with_warning_behaviour(mut self, behavior: FailureBehavior) -> Self {
        self.warning_behaviour = behavior;
        self
    }

    pub fn with_suppress_duplicate_report(mut self, suppress: bool) -> Self {
        self.suppress_duplicate_report = suppress;
        self
    }
}
