/// The kind of check that failed.
///
/// Assertions, preconditions and postconditions form the hard-failure
/// ("error") group; warnings form their own group. Each group has its own
/// handler and behaviour in the registry.
///
/// # Examples
///
/// ```rust
/// use failure_registry::{FailureCategory, FailureGroup};
///
/// assert_eq!(FailureCategory::Precondition.label(), "precondition");
/// assert_eq!(FailureCategory::Precondition.group(), FailureGroup::Error);
/// assert_eq!(FailureCategory::Warning.group(), FailureGroup::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    Assertion,
    Precondition,
    Postcondition,
    Warning,
}

impl FailureCategory {
    /// The literal label handed to handlers ("assertion", "precondition", ...).
    pub const fn label(self) -> &'static str {
        match self {
            FailureCategory::Assertion => "assertion",
            FailureCategory::Precondition => "precondition",
            FailureCategory::Postcondition => "postcondition",
            FailureCategory::Warning => "warning",
        }
    }

    /// The handler/behaviour axis this category is dispatched on.
    pub const fn group(self) -> FailureGroup {
        match self {
            FailureCategory::Warning => FailureGroup::Warning,
            _ => FailureGroup::Error,
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two independent handler/behaviour axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureGroup {
    /// Assertions, preconditions and postconditions.
    Error,
    /// Non-fatal anomalies.
    Warning,
}

impl FailureGroup {
    /// The noun used in the report headline (`"<library> error: ..."`).
    pub const fn noun(self) -> &'static str {
        match self {
            FailureGroup::Error => "error",
            FailureGroup::Warning => "warning",
        }
    }
}

impl std::fmt::Display for FailureGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(FailureCategory::Assertion.label(), "assertion");
        assert_eq!(FailureCategory::Precondition.label(), "precondition");
        assert_eq!(FailureCategory::Postcondition.label(), "postcondition");
        assert_eq!(FailureCategory::Warning.label(), "warning");
    }

    #[test]
    fn test_groups() {
        assert_eq!(FailureCategory::Assertion.group(), FailureGroup::Error);
        assert_eq!(FailureCategory::Precondition.group(), FailureGroup::Error);
        assert_eq!(FailureCategory::Postcondition.group(), FailureGroup::Error);
        assert_eq!(FailureCategory::Warning.group(), FailureGroup::Warning);
    }

    #[test]
    fn test_display() {
        assert_eq!(FailureCategory::Postcondition.to_string(), "postcondition");
        assert_eq!(FailureGroup::Error.to_string(), "error");
        assert_eq!(FailureGroup::Warning.to_string(), "warning");
    }
}
