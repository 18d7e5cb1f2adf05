//! Macros for defining isolated registries and for writing checks.

/// Creates an isolated failure registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily created static [`FailureRegistry`](crate::FailureRegistry) (hidden)
/// - `registry()` returning it
/// - Free functions mirroring the crate-root API (`assertion_fail`,
///   `set_error_behaviour`, ...)
///
/// # Examples
///
/// ```rust
/// use failure_registry::{define_failure_registry, FailureError};
///
/// // Default configuration
/// define_failure_registry!(kernel);
///
/// // Custom configuration
/// define_failure_registry!(
///     mesher,
///     failure_registry::FailureConfig::new()
///         .with_library("MESHER")
///         .with_warning_behaviour(failure_registry::FailureBehavior::ThrowException)
/// );
///
/// let err = kernel::precondition_fail("n > 0", file!(), line!(), "empty input");
/// assert!(matches!(err, FailureError::Precondition(_)));
///
/// // Each registry keeps its own policy
/// assert!(kernel::warning_fail("w", file!(), line!(), "").is_ok());
/// assert!(mesher::warning_fail("w", file!(), line!(), "").is_err());
/// ```
#[macro_export]
macro_rules! define_failure_registry {
    ($name:ident) => {
        $crate::define_failure_registry!($name, $crate::FailureConfig::default());
    };
    ($name:ident, $config:expr) => {
        pub mod $name {
            // The configuration expression resolves against the invoking module.
            #[allow(unused_imports)]
            use super::*;
            use std::sync::{Arc, LazyLock};

            // Registry storage (module-private)
            static REGISTRY: LazyLock<$crate::FailureRegistry> =
                LazyLock::new(|| $crate::FailureRegistry::new($config));

            /// The registry behind this module's functions.
            pub fn registry() -> &'static $crate::FailureRegistry {
                &REGISTRY
            }

            /// Report an assertion failure.
            pub fn assertion_fail(
                expression: &str,
                file: &str,
                line: u32,
                explanation: &str,
            ) -> $crate::FailureError {
                REGISTRY.assertion_fail(expression, file, line, explanation)
            }

            /// Report a precondition failure.
            pub fn precondition_fail(
                expression: &str,
                file: &str,
                line: u32,
                explanation: &str,
            ) -> $crate::FailureError {
                REGISTRY.precondition_fail(expression, file, line, explanation)
            }

            /// Report a postcondition failure.
            pub fn postcondition_fail(
                expression: &str,
                file: &str,
                line: u32,
                explanation: &str,
            ) -> $crate::FailureError {
                REGISTRY.postcondition_fail(expression, file, line, explanation)
            }

            /// Report a warning.
            pub fn warning_fail(
                expression: &str,
                file: &str,
                line: u32,
                explanation: &str,
            ) -> Result<(), $crate::FailureError> {
                REGISTRY.warning_fail(expression, file, line, explanation)
            }

            /// Install the error handler, returning the previous one.
            pub fn set_error_handler(
                handler: Arc<$crate::FailureHandler>,
            ) -> Arc<$crate::FailureHandler> {
                REGISTRY.set_error_handler(handler)
            }

            /// Install the warning handler, returning the previous one.
            pub fn set_warning_handler(
                handler: Arc<$crate::FailureHandler>,
            ) -> Arc<$crate::FailureHandler> {
                REGISTRY.set_warning_handler(handler)
            }

            /// Select the error behaviour, returning the previous one.
            pub fn set_error_behaviour(
                behavior: $crate::FailureBehavior,
            ) -> $crate::FailureBehavior {
                REGISTRY.set_error_behaviour(behavior)
            }

            /// Select the warning behaviour, returning the previous one.
            pub fn set_warning_behaviour(
                behavior: $crate::FailureBehavior,
            ) -> $crate::FailureBehavior {
                REGISTRY.set_warning_behaviour(behavior)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check {
    ($registry:expr, $dispatch:ident, $cond:expr, $msg:expr) => {
        if $cond {
            ::core::result::Result::Ok(())
        } else {
            ::core::result::Result::Err($registry.$dispatch(
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!(),
                ::core::convert::AsRef::<str>::as_ref(&$msg),
            ))
        }
    };
}

/// Checks an assertion.
///
/// Evaluates to `Result<(), FailureError>`: `Ok(())` when the condition
/// holds, otherwise the failure is dispatched with the condition's source
/// text, `file!()` and `line!()`.
///
/// # Forms
///
/// ```ignore
/// assertion!(cond)?;
/// assertion!(cond, "explanation")?;
/// assertion!(in registry, cond, "explanation")?;
/// ```
///
/// # Examples
///
/// ```rust
/// use failure_registry::{assertion, FailureError};
///
/// fn midpoint(lo: i32, hi: i32) -> Result<i32, FailureError> {
///     assertion!(lo <= hi, "bounds out of order")?;
///     Ok(lo + (hi - lo) / 2)
/// }
///
/// assert_eq!(midpoint(2, 8), Ok(5));
/// assert!(midpoint(8, 2).is_err());
/// ```
#[macro_export]
macro_rules! assertion {
    (in $registry:expr, $cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($registry, assertion_fail, $cond, $msg)
    };
    (in $registry:expr, $cond:expr $(,)?) => {
        $crate::__check!($registry, assertion_fail, $cond, "")
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($crate::global(), assertion_fail, $cond, $msg)
    };
    ($cond:expr $(,)?) => {
        $crate::__check!($crate::global(), assertion_fail, $cond, "")
    };
}

/// Checks a precondition. Same forms as [`assertion!`].
#[macro_export]
macro_rules! precondition {
    (in $registry:expr, $cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($registry, precondition_fail, $cond, $msg)
    };
    (in $registry:expr, $cond:expr $(,)?) => {
        $crate::__check!($registry, precondition_fail, $cond, "")
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($crate::global(), precondition_fail, $cond, $msg)
    };
    ($cond:expr $(,)?) => {
        $crate::__check!($crate::global(), precondition_fail, $cond, "")
    };
}

/// Checks a postcondition. Same forms as [`assertion!`].
#[macro_export]
macro_rules! postcondition {
    (in $registry:expr, $cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($registry, postcondition_fail, $cond, $msg)
    };
    (in $registry:expr, $cond:expr $(,)?) => {
        $crate::__check!($registry, postcondition_fail, $cond, "")
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__check!($crate::global(), postcondition_fail, $cond, $msg)
    };
    ($cond:expr $(,)?) => {
        $crate::__check!($crate::global(), postcondition_fail, $cond, "")
    };
}

/// Checks a warning condition.
///
/// Evaluates to `Result<(), FailureError>`; under the default warning
/// behaviour a failed check is reported and still yields `Ok(())`.
///
/// ```rust
/// use failure_registry::warning;
///
/// let iterations = 5_000;
/// warning!(iterations < 1_000, "slow convergence").unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    (in $registry:expr, $cond:expr, $msg:expr $(,)?) => {
        if $cond {
            ::core::result::Result::Ok(())
        } else {
            $registry.warning_fail(
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!(),
                ::core::convert::AsRef::<str>::as_ref(&$msg),
            )
        }
    };
    (in $registry:expr, $cond:expr $(,)?) => {
        $crate::warning!(in $registry, $cond, "")
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::warning!(in $crate::global(), $cond, $msg)
    };
    ($cond:expr $(,)?) => {
        $crate::warning!(in $crate::global(), $cond, "")
    };
}
