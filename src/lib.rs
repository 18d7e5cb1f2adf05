//! # Failure Registry
//!
//! A single place where failed checks (assertions, preconditions,
//! postconditions) and warnings are reported and disposed of.
//!
//! A check that fails calls a dispatcher. The dispatcher runs the handler
//! installed for the check's group, which reports the failure, and then
//! applies the behaviour selected for that group: abort, exit, raise a
//! [`FailureError`] back to the caller, or (warnings only) continue. The code
//! doing the check never needs to know which policy is active.
//!
//! ## Quick Start
//!
//! ```rust
//! use failure_registry::{precondition, set_error_behaviour, FailureBehavior, FailureError};
//!
//! fn area(width: f64, height: f64) -> Result<f64, FailureError> {
//!     precondition!(width >= 0.0 && height >= 0.0, "negative extent")?;
//!     Ok(width * height)
//! }
//!
//! // Default: report on stderr, then raise.
//! assert!(matches!(area(-1.0, 2.0), Err(FailureError::Precondition(_))));
//!
//! // The application decides what a failure means.
//! let previous = set_error_behaviour(FailureBehavior::ThrowException);
//! assert_eq!(previous, FailureBehavior::ThrowException);
//! ```
//!
//! ## Behaviours
//!
//! | Behaviour         | Error group                     | Warning group              |
//! |-------------------|---------------------------------|----------------------------|
//! | `Abort`           | `std::process::abort`           | `std::process::abort`      |
//! | `Exit`            | `std::process::exit(1)`         | `std::process::exit(1)`    |
//! | `ExitWithSuccess` | `std::process::exit(0)`         | `std::process::exit(0)`    |
//! | `ThrowException`  | return the category error       | return `FailureError::Warning` |
//! | `Continue`        | return the category error       | return `Ok(())`            |
//!
//! Defaults are `ThrowException` for errors and `Continue` for warnings.
//!
//! ## Main Functions
//!
//! - [`assertion_fail`], [`precondition_fail`], [`postcondition_fail`], [`warning_fail`] - Dispatch a failure
//! - [`set_error_handler`], [`set_warning_handler`] - Swap the reporting handler
//! - [`set_error_behaviour`], [`set_warning_behaviour`] - Swap the behaviour
//! - [`install`] - Configure the process-wide registry at startup
//! - [`define_failure_registry!`] - Create an isolated registry
//!
//! ## Threads
//!
//! Registries are `Send + Sync`. Swaps are serialised by a mutex, but nothing
//! orders concurrent dispatches against each other or against a swap; a
//! failure racing a swap may see either the old or the new policy.

mod failure_behavior;
mod failure_category;
mod failure_config;
mod failure_error;
mod failure_registry;
mod failure_report;
mod macros;
mod registry;

// Re-export the main public API
pub use failure_behavior::{Disposition, FailureBehavior, Termination};
pub use failure_category::{FailureCategory, FailureGroup};
pub use failure_config::{FailureConfig, DEFAULT_BUG_REPORT_URL, DEFAULT_LIBRARY};
pub use failure_error::{FailureError, RegistryError, Violation};
pub use failure_registry::{BehaviourGuard, FailureRegistry};
pub use failure_report::{FailureHandler, FailureReport, StandardHandler};
pub use registry::{
    assertion_fail, error_behaviour, global, install, postcondition_fail, precondition_fail,
    scoped_error_behaviour, scoped_warning_behaviour, set_error_behaviour, set_error_handler,
    set_warning_behaviour, set_warning_handler, warning_behaviour, warning_fail,
};
