//! What happens after a failure has been reported.
//!
//! A [`FailureBehavior`] is selected per group. Resolving it against the group
//! yields a [`Disposition`]: terminate the process, raise the category error,
//! or continue.

use crate::FailureGroup;

/// Process-wide policy applied after the handler has reported a failure.
///
/// `ThrowException` and `Continue` are interpreted per group: the error group
/// raises in both cases (`Continue` is a legacy value kept only so a
/// misconfigured registry fails safe), while the warning group raises only on
/// `ThrowException` and returns normally on `Continue`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FailureBehavior {
    /// Abort the process without unwinding.
    Abort,
    /// Exit the process with a failure status.
    Exit,
    /// Exit the process with a success status.
    ExitWithSuccess,
    /// Raise the category-specific [`FailureError`](crate::FailureError).
    ThrowException,
    /// Warnings: return normally. Errors: same as `ThrowException`.
    Continue,
}

impl FailureBehavior {
    /// Resolves this behaviour for the given group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use failure_registry::{Disposition, FailureBehavior, FailureGroup};
    ///
    /// assert_eq!(
    ///     FailureBehavior::Continue.disposition(FailureGroup::Warning),
    ///     Disposition::Continue
    /// );
    /// assert_eq!(
    ///     FailureBehavior::Continue.disposition(FailureGroup::Error),
    ///     Disposition::Raise
    /// );
    /// ```
    pub const fn disposition(self, group: FailureGroup) -> Disposition {
        match self {
            FailureBehavior::Abort => Disposition::Terminate(Termination::Abort),
            FailureBehavior::Exit => Disposition::Terminate(Termination::Exit {
                code: EXIT_FAILURE,
            }),
            FailureBehavior::ExitWithSuccess => Disposition::Terminate(Termination::Exit {
                code: EXIT_SUCCESS,
            }),
            FailureBehavior::ThrowException => Disposition::Raise,
            FailureBehavior::Continue => match group {
                FailureGroup::Warning => Disposition::Continue,
                FailureGroup::Error => Disposition::Raise,
            },
        }
    }
}

impl std::fmt::Display for FailureBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureBehavior::Abort => "abort",
            FailureBehavior::Exit => "exit",
            FailureBehavior::ExitWithSuccess => "exit_with_success",
            FailureBehavior::ThrowException => "throw_exception",
            FailureBehavior::Continue => "continue",
        };
        f.write_str(name)
    }
}

const EXIT_FAILURE: i32 = 1;
const EXIT_SUCCESS: i32 = 0;

/// The concrete action a dispatcher takes for one failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// End the process; never returns to the caller.
    Terminate(Termination),
    /// Hand the category error back to the caller.
    Raise,
    /// Return normally (warnings only).
    Continue,
}

/// How a terminating disposition ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `std::process::abort`: no unwinding, no destructors.
    Abort,
    /// `std::process::exit` with the given status code.
    Exit { code: i32 },
}

impl Termination {
    /// Ends the process.
    pub fn terminate(self) -> ! {
        match self {
            Termination::Abort => std::process::abort(),
            Termination::Exit { code } => std::process::exit(code),
        }
    }
}
