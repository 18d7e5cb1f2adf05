use std::io::{self, Write};
use std::sync::Arc;

use crate::{Disposition, FailureBehavior, FailureCategory, FailureConfig, FailureGroup};

/// A failed check as seen by a handler.
///
/// Handlers receive this by reference for every dispatched failure. The
/// fields borrow from the dispatcher's arguments; copy them out (e.g. with
/// [`Violation::from`](crate::Violation)) to keep them past the call.
///
/// # Examples
///
/// ```rust
/// use failure_registry::{FailureBehavior, FailureCategory, FailureReport};
///
/// let report = FailureReport {
///     category: FailureCategory::Precondition,
///     library: "CGAL",
///     expression: "x > 0",
///     file: "geo.rs",
///     line: 42,
///     explanation: "x must be positive",
///     behavior: FailureBehavior::ThrowException,
/// };
/// assert_eq!(report.label(), "precondition");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FailureReport<'a> {
    pub category: FailureCategory,
    pub library: &'a str,
    pub expression: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub explanation: &'a str,
    /// Behaviour active for the category's group when the report was made.
    pub behavior: FailureBehavior,
}

impl FailureReport<'_> {
    /// The category label ("assertion", "precondition", "postcondition", "warning").
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn group(&self) -> FailureGroup {
        self.category.group()
    }

    /// What the dispatcher will do once the handler returns, unless the
    /// handler changes the behaviour itself.
    pub fn disposition(&self) -> Disposition {
        self.behavior.disposition(self.group())
    }
}

/// Signature of a failure handler.
///
/// A handler only reports; it must not be relied upon to terminate the
/// process. It runs without the registry lock held, so it may call the
/// registration methods of the registry that invoked it.
pub type FailureHandler = dyn Fn(&FailureReport<'_>) + Send + Sync + 'static;

/// The built-in handler: a fixed six-line report on stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardHandler {
    pub bug_report_url: String,
    /// Skip the report when the failure is about to be raised, for
    /// environments that print uncaught errors themselves.
    pub suppress_duplicate_report: bool,
}

impl StandardHandler {
    pub fn from_config(config: &FailureConfig) -> Self {
        StandardHandler {
            bug_report_url: config.bug_report_url.clone(),
            suppress_duplicate_report: config.suppress_duplicate_report,
        }
    }

    /// Whether this report is printed at all.
    pub fn should_report(&self, report: &FailureReport<'_>) -> bool {
        !(self.suppress_duplicate_report && report.disposition() == Disposition::Raise)
    }

    /// Renders the report, one field per line.
    pub fn write_report<W: Write>(&self, out: &mut W, report: &FailureReport<'_>) -> io::Result<()> {
        let group = report.group();
        let subject = match group {
            FailureGroup::Error => report.label(),
            FailureGroup::Warning => "check",
        };
        writeln!(out, "{} {}: {} violation!", report.library, group.noun(), subject)?;
        writeln!(out, "Expression : {}", report.expression)?;
        writeln!(out, "File       : {}", report.file)?;
        writeln!(out, "Line       : {}", report.line)?;
        writeln!(out, "Explanation: {}", report.explanation)?;
        writeln!(
            out,
            "Refer to the bug-reporting instructions at {}",
            self.bug_report_url
        )
    }

    /// Writes the report to stderr, unless suppressed.
    pub fn handle(&self, report: &FailureReport<'_>) {
        if !self.should_report(report) {
            return;
        }

        // Render first so the report reaches stderr in one write.
        let mut buffer = Vec::with_capacity(256);
        if self.write_report(&mut buffer, report).is_err() {
            return;
        }
        let mut stderr = io::stderr().lock();
        // Nothing sensible is left to report to if stderr itself fails.
        let _ = stderr.write_all(&buffer);
        let _ = stderr.flush();
    }

    /// Wraps this handler for installation in a registry.
    pub fn into_handler(self) -> Arc<FailureHandler> {
        Arc::new(move |report: &FailureReport<'_>| self.handle(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(category: FailureCategory, behavior: FailureBehavior) -> FailureReport<'static> {
        FailureReport {
            category,
            library: "CGAL",
            expression: "x > 0",
            file: "geo.cpp",
            line: 42,
            explanation: "x must be positive",
            behavior,
        }
    }

    fn handler(suppress: bool) -> StandardHandler {
        StandardHandler {
            bug_report_url: "http://www.cgal.org/bug_report.html".to_string(),
            suppress_duplicate_report: suppress,
        }
    }

    fn render(handler: &StandardHandler, report: &FailureReport<'_>) -> String {
        let mut out = Vec::new();
        handler.write_report(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_error_report_format() {
        let text = render(
            &handler(false),
            &report(FailureCategory::Precondition, FailureBehavior::ThrowException),
        );
        assert_eq!(
            text,
            "CGAL error: precondition violation!\n\
             Expression : x > 0\n\
             File       : geo.cpp\n\
             Line       : 42\n\
             Explanation: x must be positive\n\
             Refer to the bug-reporting instructions at http://www.cgal.org/bug_report.html\n"
        );
    }

    #[test]
    fn test_warning_report_headline() {
        let text = render(
            &handler(false),
            &report(FailureCategory::Warning, FailureBehavior::Continue),
        );
        assert_eq!(text.lines().next(), Some("CGAL warning: check violation!"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_headline_names_group() {
        for (category, headline) in [
            (FailureCategory::Assertion, "CGAL error: assertion violation!"),
            (FailureCategory::Precondition, "CGAL error: precondition violation!"),
            (FailureCategory::Postcondition, "CGAL error: postcondition violation!"),
            (FailureCategory::Warning, "CGAL warning: check violation!"),
        ] {
            let text = render(&handler(false), &report(category, FailureBehavior::Abort));
            assert_eq!(text.lines().next(), Some(headline));
            assert!(headline.starts_with(&format!("CGAL {}:", category.group().noun())));
        }
    }

    #[test]
    fn test_suppression_only_when_raising() {
        let quiet = handler(true);
        assert!(!quiet.should_report(&report(
            FailureCategory::Assertion,
            FailureBehavior::ThrowException
        )));
        // Legacy `Continue` raises in the error group too.
        assert!(!quiet.should_report(&report(
            FailureCategory::Assertion,
            FailureBehavior::Continue
        )));
        assert!(quiet.should_report(&report(FailureCategory::Assertion, FailureBehavior::Abort)));
        assert!(quiet.should_report(&report(FailureCategory::Warning, FailureBehavior::Continue)));
        assert!(!quiet.should_report(&report(
            FailureCategory::Warning,
            FailureBehavior::ThrowException
        )));
    }

    #[test]
    fn test_no_suppression_by_default() {
        let loud = handler(false);
        for behavior in [FailureBehavior::ThrowException, FailureBehavior::Continue] {
            assert!(loud.should_report(&report(FailureCategory::Postcondition, behavior)));
            assert!(loud.should_report(&report(FailureCategory::Warning, behavior)));
        }
    }

    #[test]
    fn test_report_accessors() {
        let r = report(FailureCategory::Warning, FailureBehavior::Continue);
        assert_eq!(r.label(), "warning");
        assert_eq!(r.group(), FailureGroup::Warning);
        assert_eq!(r.disposition(), Disposition::Continue);
    }
}
