//! Structured validation results attached to entities before persisting.

use std::fmt;

/// Machine-readable reason for a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    Blank,
    NumberTaken,
    LiabilityNeededForResult,
    CyclicParent,
    TooFewPostings,
    UnbalancedJournal,
    AmountNotPositive,
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationCode::Blank => "blank",
            ValidationCode::NumberTaken => "number_taken",
            ValidationCode::LiabilityNeededForResult => "liability_needed_for_result",
            ValidationCode::CyclicParent => "cyclic_parent",
            ValidationCode::TooFewPostings => "too_few_postings",
            ValidationCode::UnbalancedJournal => "unbalanced_journal",
            ValidationCode::AmountNotPositive => "amount_not_positive",
        };
        f.write_str(label)
    }
}

/// One validation failure. `field = None` marks an entity-level issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: Option<&'static str>,
    pub code: ValidationCode,
}

/// Ordered collection of validation failures for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Option<&'static str>, code: ValidationCode) {
        self.issues.push(ValidationIssue { field, code });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether a failure was recorded for the given field and code.
    pub fn contains(&self, field: Option<&'static str>, code: ValidationCode) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.field == field && issue.code == code)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Converts the collection into a result, `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match issue.field {
                Some(field) => write!(f, "{}: {}", field, issue.code)?,
                None => write!(f, "{}", issue.code)?,
            }
        }
        Ok(())
    }
}
