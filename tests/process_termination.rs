//! Integration tests for the terminating behaviours.
//!
//! Abort and exit end the whole process, so each scenario re-runs this test
//! binary as a child restricted to one test. The child sees
//! `FAILURE_REGISTRY_CHILD` set, performs the failing call, and the parent
//! inspects the exit status and stderr.

use failure_registry::{
    assertion_fail, install, postcondition_fail, precondition_fail, set_error_behaviour,
    set_warning_behaviour, warning_fail, FailureBehavior, FailureConfig,
};
use std::process::{Command, Output};

const CHILD_ENV: &str = "FAILURE_REGISTRY_CHILD";
const AFTER_FAILURE: &str = "user code ran after the failure";

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test process")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(unix)]
fn assert_aborted(output: &Output) {
    use std::os::unix::process::ExitStatusExt;
    assert_eq!(output.status.signal(), Some(SIGABRT));
}

#[cfg(not(unix))]
fn assert_aborted(output: &Output) {
    assert!(!output.status.success());
}

#[cfg(unix)]
const SIGABRT: i32 = 6;

#[test]
fn test_error_abort_terminates() {
    if in_child() {
        set_error_behaviour(FailureBehavior::Abort);
        let _ = assertion_fail("a < b", "geo.cpp", 12, "ordering");
        eprintln!("{AFTER_FAILURE}");
        return;
    }

    let output = run_child("test_error_abort_terminates");
    assert_aborted(&output);

    let stderr = stderr_of(&output);
    assert!(stderr.contains("CGAL error: assertion violation!"), "{stderr}");
    assert!(stderr.contains("Line       : 12"), "{stderr}");
    assert!(!stderr.contains(AFTER_FAILURE), "{stderr}");
}

#[test]
fn test_error_exit_uses_failure_status() {
    if in_child() {
        set_error_behaviour(FailureBehavior::Exit);
        let _ = precondition_fail("x > 0", "geo.cpp", 42, "x must be positive");
        eprintln!("{AFTER_FAILURE}");
        return;
    }

    let output = run_child("test_error_exit_uses_failure_status");
    assert_eq!(output.status.code(), Some(1));

    let stderr = stderr_of(&output);
    assert!(stderr.contains("CGAL error: precondition violation!"), "{stderr}");
    assert!(!stderr.contains(AFTER_FAILURE), "{stderr}");
}

#[test]
fn test_error_exit_with_success_status() {
    if in_child() {
        set_error_behaviour(FailureBehavior::ExitWithSuccess);
        let _ = assertion_fail("done", "geo.cpp", 1, "");
        eprintln!("{AFTER_FAILURE}");
        return;
    }

    let output = run_child("test_error_exit_with_success_status");
    assert_eq!(output.status.code(), Some(0));
    assert!(!stderr_of(&output).contains(AFTER_FAILURE));
}

#[test]
fn test_warning_abort_terminates() {
    if in_child() {
        set_warning_behaviour(FailureBehavior::Abort);
        let _ = warning_fail("n < 100", "mesh.cpp", 77, "too many steps");
        eprintln!("{AFTER_FAILURE}");
        return;
    }

    let output = run_child("test_warning_abort_terminates");
    assert_aborted(&output);

    let stderr = stderr_of(&output);
    assert!(stderr.contains("CGAL warning: check violation!"), "{stderr}");
    assert!(stderr.contains("Explanation: too many steps"), "{stderr}");
    assert!(!stderr.contains(AFTER_FAILURE), "{stderr}");
}

#[test]
fn test_warning_exit_uses_failure_status() {
    if in_child() {
        set_warning_behaviour(FailureBehavior::Exit);
        let _ = warning_fail("w", "mesh.cpp", 2, "");
        eprintln!("{AFTER_FAILURE}");
        return;
    }

    let output = run_child("test_warning_exit_uses_failure_status");
    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr_of(&output).contains(AFTER_FAILURE));
}

#[test]
fn test_default_report_is_printed_for_raised_errors() {
    if in_child() {
        let err = precondition_fail("x > 0", "geo.cpp", 42, "x must be positive");
        eprintln!("raised: {:?}", err.category());
        return;
    }

    let output = run_child("test_default_report_is_printed_for_raised_errors");
    assert!(output.status.success());

    let stderr = stderr_of(&output);
    let expected = "CGAL error: precondition violation!\n\
                    Expression : x > 0\n\
                    File       : geo.cpp\n\
                    Line       : 42\n\
                    Explanation: x must be positive\n\
                    Refer to the bug-reporting instructions at http://www.cgal.org/bug_report.html\n";
    assert!(stderr.contains(expected), "{stderr}");
    assert!(stderr.contains("raised: Precondition"), "{stderr}");
}

#[test]
fn test_suppressed_report_writes_nothing_when_raising() {
    const RAISED: &str = "raised without a report";

    if in_child() {
        install(FailureConfig::new().with_suppress_duplicate_report(true))
            .expect("fresh child process");

        let _ = precondition_fail("x > 0", "geo.cpp", 42, "x must be positive");
        set_error_behaviour(FailureBehavior::Continue);
        let _ = postcondition_fail("y > 0", "geo.cpp", 43, "");
        set_warning_behaviour(FailureBehavior::ThrowException);
        assert!(warning_fail("n < 100", "mesh.cpp", 77, "").is_err());
        eprintln!("{RAISED}");

        set_warning_behaviour(FailureBehavior::Continue);
        assert!(warning_fail("n < 100", "mesh.cpp", 78, "").is_ok());
        return;
    }

    let output = run_child("test_suppressed_report_writes_nothing_when_raising");
    assert!(output.status.success());

    let stderr = stderr_of(&output);
    let (raised, continued) = stderr.split_once(RAISED).expect("child reached the marker");
    assert!(!raised.contains("violation!"), "{stderr}");
    assert!(continued.contains("CGAL warning: check violation!"), "{stderr}");
    assert!(continued.contains("Line       : 78"), "{stderr}");
}
