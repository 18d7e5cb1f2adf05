//! The process-wide failure registry.
//!
//! Library code that has no registry handed to it reports through these free
//! functions. The instance is created with [`FailureConfig::default`] on first
//! use, unless the application calls [`install`] before anything else.
//!
//! # Examples
//!
//! ```
//! use failure_registry::{precondition_fail, FailureError};
//!
//! fn sqrt(x: f64) -> Result<f64, FailureError> {
//!     if x < 0.0 {
//!         return Err(precondition_fail("x >= 0.0", file!(), line!(), "negative input"));
//!     }
//!     Ok(x.sqrt())
//! }
//!
//! assert!(sqrt(4.0).is_ok());
//! assert!(matches!(sqrt(-1.0), Err(FailureError::Precondition(_))));
//! ```

use std::sync::{Arc, OnceLock};

use crate::{
    BehaviourGuard, FailureBehavior, FailureConfig, FailureError, FailureHandler, FailureRegistry,
    RegistryError,
};

/// Lazily created process-wide registry.
static GLOBAL_REGISTRY: OnceLock<FailureRegistry> = OnceLock::new();

/// The process-wide registry, created with default settings if needed.
pub fn global() -> &'static FailureRegistry {
    GLOBAL_REGISTRY.get_or_init(FailureRegistry::default)
}

/// Creates the process-wide registry from `config`.
///
/// Call this once during startup, before any check can fire.
///
/// # Errors
///
/// [`RegistryError::AlreadyInstalled`] if the registry already exists, either
/// from an earlier `install` or because a failure was already dispatched.
/// The existing registry is left untouched.
pub fn install(config: FailureConfig) -> Result<&'static FailureRegistry, RegistryError> {
    let mut installed = false;
    let registry = GLOBAL_REGISTRY.get_or_init(|| {
        installed = true;
        FailureRegistry::new(config)
    });

    if installed {
        tracing::debug!(library = %registry.config().library, "failure registry installed");
        Ok(registry)
    } else {
        Err(RegistryError::AlreadyInstalled)
    }
}

// -------------------------------------------------------------------------------------------------
// Dispatch
// -------------------------------------------------------------------------------------------------

/// Reports an assertion failure through the process-wide registry.
pub fn assertion_fail(expression: &str, file: &str, line: u32, explanation: &str) -> FailureError {
    global().assertion_fail(expression, file, line, explanation)
}

/// Reports a precondition failure through the process-wide registry.
pub fn precondition_fail(expression: &str, file: &str, line: u32, explanation: &str) -> FailureError {
    global().precondition_fail(expression, file, line, explanation)
}

/// Reports a postcondition failure through the process-wide registry.
pub fn postcondition_fail(expression: &str, file: &str, line: u32, explanation: &str) -> FailureError {
    global().postcondition_fail(expression, file, line, explanation)
}

/// Reports a warning through the process-wide registry.
pub fn warning_fail(
    expression: &str,
    file: &str,
    line: u32,
    explanation: &str,
) -> Result<(), FailureError> {
    global().warning_fail(expression, file, line, explanation)
}

// -------------------------------------------------------------------------------------------------
// Registration
// -------------------------------------------------------------------------------------------------

/// Replaces the process-wide error handler and returns the one it replaced.
pub fn set_error_handler(handler: Arc<FailureHandler>) -> Arc<FailureHandler> {
    global().set_error_handler(handler)
}

/// Replaces the process-wide warning handler and returns the one it replaced.
pub fn set_warning_handler(handler: Arc<FailureHandler>) -> Arc<FailureHandler> {
    global().set_warning_handler(handler)
}

/// Sets the process-wide error behaviour and returns the previous one.
pub fn set_error_behaviour(behavior: FailureBehavior) -> FailureBehavior {
    global().set_error_behaviour(behavior)
}

/// Sets the process-wide warning behaviour and returns the previous one.
pub fn set_warning_behaviour(behavior: FailureBehavior) -> FailureBehavior {
    global().set_warning_behaviour(behavior)
}

/// The process-wide error behaviour.
pub fn error_behaviour() -> FailureBehavior {
    global().error_behaviour()
}

/// The process-wide warning behaviour.
pub fn warning_behaviour() -> FailureBehavior {
    global().warning_behaviour()
}

/// Sets the process-wide error behaviour until the returned guard is dropped.
pub fn scoped_error_behaviour(behavior: FailureBehavior) -> BehaviourGuard<'static> {
    global().scoped_error_behaviour(behavior)
}

/// Sets the process-wide warning behaviour until the returned guard is dropped.
pub fn scoped_warning_behaviour(behavior: FailureBehavior) -> BehaviourGuard<'static> {
    global().scoped_warning_behaviour(behavior)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureCategory, FailureReport};
    use serial_test::serial;
    use std::sync::Mutex;

    // Swaps in a recording error handler and returns what it replaced.
    fn record_errors() -> (Arc<FailureHandler>, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let previous = set_error_handler(Arc::new(move |r: &FailureReport<'_>| {
            sink.lock().unwrap().push(format!("{}:{}:{}", r.label(), r.file, r.line));
        }));
        (previous, seen)
    }

    #[test]
    #[serial]
    fn test_global_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
    }

    #[test]
    #[serial]
    fn test_install_after_first_use_fails() {
        let _ = global();
        assert_eq!(
            install(FailureConfig::default()).unwrap_err(),
            RegistryError::AlreadyInstalled
        );
    }

    #[test]
    #[serial]
    fn test_default_precondition_raises() {
        let (previous, seen) = record_errors();

        let err = precondition_fail("x > 0", "geo.cpp", 42, "x must be positive");
        assert_eq!(err.category(), FailureCategory::Precondition);
        assert_eq!(err.violation().expression, "x > 0");
        assert_eq!(err.violation().file, "geo.cpp");
        assert_eq!(err.violation().line, 42);
        assert_eq!(err.violation().explanation, "x must be positive");
        assert_eq!(*seen.lock().unwrap(), vec!["precondition:geo.cpp:42".to_string()]);

        set_error_handler(previous);
    }

    #[test]
    #[serial]
    fn test_behaviour_swap_returns_previous() {
        let original = set_error_behaviour(FailureBehavior::Exit);
        assert_eq!(set_error_behaviour(FailureBehavior::Abort), FailureBehavior::Exit);
        assert_eq!(set_error_behaviour(original), FailureBehavior::Abort);
        assert_eq!(error_behaviour(), original);
    }

    #[test]
    #[serial]
    fn test_scoped_warning_behaviour() {
        let previous = set_warning_handler(Arc::new(|_: &FailureReport<'_>| {}));
        {
            let _guard = scoped_warning_behaviour(FailureBehavior::ThrowException);
            assert!(warning_fail("w", "f.rs", 1, "").is_err());
        }
        assert_eq!(warning_behaviour(), FailureBehavior::Continue);
        assert!(warning_fail("w", "f.rs", 1, "").is_ok());
        set_warning_handler(previous);
    }

    #[test]
    #[serial]
    fn test_assertion_and_postcondition_labels() {
        let (previous, seen) = record_errors();

        let _ = assertion_fail("a", "a.rs", 1, "");
        let _ = postcondition_fail("b", "b.rs", 2, "");
        {
            let _guard = scoped_error_behaviour(FailureBehavior::Continue);
            let _ = assertion_fail("c", "c.rs", 3, "");
        }

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "assertion:a.rs:1".to_string(),
                "postcondition:b.rs:2".to_string(),
                "assertion:c.rs:3".to_string(),
            ]
        );
        set_error_handler(previous);
    }
}
