//! The registry: one handler and one behaviour per failure group, and the
//! dispatchers that tie a failed check to them.
//!
//! A [`FailureRegistry`] is an ordinary value. Create one per policy domain
//! and pass it to the code that checks, or use the process-wide instance
//! behind the crate-root functions.
//!
//! # Examples
//!
//! ```
//! use failure_registry::{FailureError, FailureRegistry};
//!
//! let registry = FailureRegistry::default();
//!
//! let err = registry.precondition_fail("x > 0", "geo.rs", 42, "x must be positive");
//! assert!(matches!(err, FailureError::Precondition(_)));
//!
//! // Warnings continue by default.
//! assert!(registry.warning_fail("n < 1000", "geo.rs", 7, "slow path").is_ok());
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Disposition, FailureBehavior, FailureCategory, FailureConfig, FailureError, FailureGroup,
    FailureHandler, FailureReport, StandardHandler, Violation,
};

struct RegistryState {
    error_behaviour: FailureBehavior,
    warning_behaviour: FailureBehavior,
    error_handler: Arc<FailureHandler>,
    warning_handler: Arc<FailureHandler>,
}

impl RegistryState {
    fn behaviour(&self, group: FailureGroup) -> FailureBehavior {
        match group {
            FailureGroup::Error => self.error_behaviour,
            FailureGroup::Warning => self.warning_behaviour,
        }
    }

    fn handler(&self, group: FailureGroup) -> Arc<FailureHandler> {
        match group {
            FailureGroup::Error => self.error_handler.clone(),
            FailureGroup::Warning => self.warning_handler.clone(),
        }
    }
}

/// Handlers and behaviours for the error and warning groups.
///
/// All state sits behind one mutex. The mutex is released before a handler
/// runs, so handlers may call back into the registration methods.
pub struct FailureRegistry {
    config: FailureConfig,
    state: Mutex<RegistryState>,
}

impl Default for FailureRegistry {
    fn default() -> Self {
        Self::new(FailureConfig::default())
    }
}

impl fmt::Debug for FailureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("FailureRegistry")
            .field("library", &self.config.library)
            .field("error_behaviour", &state.error_behaviour)
            .field("warning_behaviour", &state.warning_behaviour)
            .finish_non_exhaustive()
    }
}

impl FailureRegistry {
    /// Creates a registry with the configured behaviours and the standard
    /// handler installed for both groups.
    pub fn new(config: FailureConfig) -> Self {
        let state = RegistryState {
            error_behaviour: config.error_behaviour,
            warning_behaviour: config.warning_behaviour,
            error_handler: StandardHandler::from_config(&config).into_handler(),
            warning_handler: StandardHandler::from_config(&config).into_handler(),
        };
        FailureRegistry {
            config,
            state: Mutex::new(state),
        }
    }

    /// The configuration this registry was created with.
    pub fn config(&self) -> &FailureConfig {
        &self.config
    }

    // Every write is a single field swap, so a poisoned state is still consistent.
    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    // ---------------------------------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------------------------------

    /// Reports an assertion failure and applies the error behaviour.
    ///
    /// Returns only when the failure is raised; terminating behaviours end
    /// the process before this returns.
    pub fn assertion_fail(
        &self,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> FailureError {
        self.hard_fail(FailureCategory::Assertion, expression, file, line, explanation)
    }

    /// Reports a precondition failure and applies the error behaviour.
    pub fn precondition_fail(
        &self,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> FailureError {
        self.hard_fail(FailureCategory::Precondition, expression, file, line, explanation)
    }

    /// Reports a postcondition failure and applies the error behaviour.
    pub fn postcondition_fail(
        &self,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> FailureError {
        self.hard_fail(FailureCategory::Postcondition, expression, file, line, explanation)
    }

    /// Reports a warning and applies the warning behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`FailureError::Warning`] only when the warning behaviour is
    /// [`FailureBehavior::ThrowException`].
    pub fn warning_fail(
        &self,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> Result<(), FailureError> {
        let category = FailureCategory::Warning;
        match self.report(category, expression, file, line, explanation) {
            Disposition::Continue => Ok(()),
            Disposition::Raise => Err(self.raise(category, expression, file, line, explanation)),
            Disposition::Terminate(termination) => {
                tracing::error!(%category, file, line, ?termination, "terminating after failed check");
                termination.terminate()
            }
        }
    }

    fn hard_fail(
        &self,
        category: FailureCategory,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> FailureError {
        match self.report(category, expression, file, line, explanation) {
            // The error group resolves `Continue` to `Raise`; both arms raise.
            Disposition::Raise | Disposition::Continue => {
                self.raise(category, expression, file, line, explanation)
            }
            Disposition::Terminate(termination) => {
                tracing::error!(%category, file, line, ?termination, "terminating after failed check");
                termination.terminate()
            }
        }
    }

    /// Runs the group's handler, then resolves the group's behaviour as it
    /// stands after the handler returned.
    fn report(
        &self,
        category: FailureCategory,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> Disposition {
        let group = category.group();
        let (handler, behavior) = {
            let state = self.state();
            (state.handler(group), state.behaviour(group))
        };

        tracing::trace!(%category, file, line, %behavior, "dispatching failed check");

        handler(&FailureReport {
            category,
            library: &self.config.library,
            expression,
            file,
            line,
            explanation,
            behavior,
        });

        self.state().behaviour(group).disposition(group)
    }

    fn raise(
        &self,
        category: FailureCategory,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> FailureError {
        FailureError::new(
            category,
            Violation {
                library: self.config.library.clone(),
                expression: expression.to_string(),
                file: file.to_string(),
                line,
                explanation: explanation.to_string(),
            },
        )
    }

    /// Dispatches a failure of any category.
    ///
    /// `Ok(())` is only possible for [`FailureCategory::Warning`].
    pub fn fail(
        &self,
        category: FailureCategory,
        expression: &str,
        file: &str,
        line: u32,
        explanation: &str,
    ) -> Result<(), FailureError> {
        match category {
            FailureCategory::Warning => self.warning_fail(expression, file, line, explanation),
            _ => Err(self.hard_fail(category, expression, file, line, explanation)),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------------------------------

    /// Installs the error-group handler and returns the one it replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use failure_registry::{FailureRegistry, FailureReport};
    /// use std::sync::Arc;
    ///
    /// let registry = FailureRegistry::default();
    /// let previous = registry.set_error_handler(Arc::new(|_: &FailureReport<'_>| {}));
    ///
    /// // ... checks reported silently ...
    ///
    /// registry.set_error_handler(previous);
    /// ```
    pub fn set_error_handler(&self, handler: Arc<FailureHandler>) -> Arc<FailureHandler> {
        self.swap_handler(FailureGroup::Error, handler)
    }

    /// Installs the warning-group handler and returns the one it replaced.
    pub fn set_warning_handler(&self, handler: Arc<FailureHandler>) -> Arc<FailureHandler> {
        self.swap_handler(FailureGroup::Warning, handler)
    }

    /// Selects the error-group behaviour and returns the previous one.
    pub fn set_error_behaviour(&self, behavior: FailureBehavior) -> FailureBehavior {
        self.swap_behaviour(FailureGroup::Error, behavior)
    }

    /// Selects the warning-group behaviour and returns the previous one.
    pub fn set_warning_behaviour(&self, behavior: FailureBehavior) -> FailureBehavior {
        self.swap_behaviour(FailureGroup::Warning, behavior)
    }

    pub fn error_handler(&self) -> Arc<FailureHandler> {
        self.state().handler(FailureGroup::Error)
    }

    pub fn warning_handler(&self) -> Arc<FailureHandler> {
        self.state().handler(FailureGroup::Warning)
    }

    pub fn error_behaviour(&self) -> FailureBehavior {
        self.state().behaviour(FailureGroup::Error)
    }

    pub fn warning_behaviour(&self) -> FailureBehavior {
        self.state().behaviour(FailureGroup::Warning)
    }

    /// Selects the error-group behaviour until the returned guard is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use failure_registry::{FailureBehavior, FailureRegistry};
    ///
    /// let registry = FailureRegistry::default();
    /// {
    ///     let _guard = registry.scoped_error_behaviour(FailureBehavior::Abort);
    ///     assert_eq!(registry.error_behaviour(), FailureBehavior::Abort);
    /// }
    /// assert_eq!(registry.error_behaviour(), FailureBehavior::ThrowException);
    /// ```
    pub fn scoped_error_behaviour(&self, behavior: FailureBehavior) -> BehaviourGuard<'_> {
        self.scoped_behaviour(FailureGroup::Error, behavior)
    }

    /// Selects the warning-group behaviour until the returned guard is dropped.
    pub fn scoped_warning_behaviour(&self, behavior: FailureBehavior) -> BehaviourGuard<'_> {
        self.scoped_behaviour(FailureGroup::Warning, behavior)
    }

    fn scoped_behaviour(&self, group: FailureGroup, behavior: FailureBehavior) -> BehaviourGuard<'_> {
        let previous = self.swap_behaviour(group, behavior);
        BehaviourGuard {
            registry: self,
            group,
            previous,
        }
    }

    fn swap_handler(&self, group: FailureGroup, handler: Arc<FailureHandler>) -> Arc<FailureHandler> {
        let previous = {
            let mut state = self.state();
            let slot = match group {
                FailureGroup::Error => &mut state.error_handler,
                FailureGroup::Warning => &mut state.warning_handler,
            };
            std::mem::replace(slot, handler)
        };
        tracing::debug!(%group, "failure handler replaced");
        previous
    }

    fn swap_behaviour(&self, group: FailureGroup, behavior: FailureBehavior) -> FailureBehavior {
        let previous = {
            let mut state = self.state();
            let slot = match group {
                FailureGroup::Error => &mut state.error_behaviour,
                FailureGroup::Warning => &mut state.warning_behaviour,
            };
            std::mem::replace(slot, behavior)
        };
        tracing::debug!(%group, %previous, current = %behavior, "failure behaviour replaced");
        previous
    }
}

/// Restores a group's previous behaviour when dropped.
///
/// Returned by [`FailureRegistry::scoped_error_behaviour`] and
/// [`FailureRegistry::scoped_warning_behaviour`].
#[must_use = "the previous behaviour is restored as soon as the guard is dropped"]
pub struct BehaviourGuard<'a> {
    registry: &'a FailureRegistry,
    group: FailureGroup,
    previous: FailureBehavior,
}

impl BehaviourGuard<'_> {
    /// The behaviour that will be restored.
    pub fn previous(&self) -> FailureBehavior {
        self.previous
    }
}

impl Drop for BehaviourGuard<'_> {
    fn drop(&mut self) {
        self.registry.swap_behaviour(self.group, self.previous);
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
