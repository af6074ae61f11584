use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Numeric component of a version, used to report which one overflowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("could not parse version {0:?}")]
    Invalid(String),

    #[error("could not parse {component} version {input:?}: {source}")]
    Overflow {
        component: Component,
        input: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("constraint is empty")]
    Empty,

    #[error("constraint has an empty alternative")]
    EmptyAlternative,

    #[error("invalid comparator: {0:?}")]
    InvalidComparator(String),

    #[error("invalid hyphen range: {0:?}")]
    InvalidHyphenRange(String),
}

/// Errors that end a selection run
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("invalid constraint: {constraint:?}")]
    InvalidConstraint {
        constraint: String,
        #[source]
        source: ConstraintError,
    },

    #[error("could not parse version {0:?}")]
    InvalidCandidate(String),

    #[error("could not parse {component} version {raw:?}")]
    NumericOverflow { raw: String, component: Component },

    #[error("no candidates provided")]
    NoCandidates,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectError {
    /// Map a candidate parse failure onto the run-level error for `raw`
    pub fn from_candidate(raw: &str, err: VersionError) -> Self {
        match err {
            VersionError::Overflow { component, .. } => SelectError::NumericOverflow {
                raw: raw.to_string(),
                component,
            },
            VersionError::Invalid(_) => SelectError::InvalidCandidate(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SelectError::InvalidCandidate("invalid".to_string()), r#"could not parse version "invalid""#)]
    #[case(SelectError::NoCandidates, "no candidates provided")]
    #[case(
        SelectError::InvalidConstraint {
            constraint: "1.invalid".to_string(),
            source: ConstraintError::InvalidComparator("1.invalid".to_string()),
        },
        r#"invalid constraint: "1.invalid""#
    )]
    #[case(
        SelectError::NumericOverflow { raw: "go1.99999999999999999999".to_string(), component: Component::Minor },
        r#"could not parse minor version "go1.99999999999999999999""#
    )]
    fn select_error_messages(#[case] err: SelectError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn from_candidate_keeps_overflowing_component() {
        let source = "18446744073709551616".parse::<u64>().unwrap_err();
        let err = SelectError::from_candidate(
            "go1.2.18446744073709551616",
            VersionError::Overflow {
                component: Component::Patch,
                input: "go1.2.18446744073709551616".to_string(),
                source,
            },
        );

        assert!(matches!(
            err,
            SelectError::NumericOverflow {
                component: Component::Patch,
                ..
            }
        ));
    }

    #[test]
    fn from_candidate_reports_raw_string_verbatim() {
        let err = SelectError::from_candidate("v1..2", VersionError::Invalid("v1..2".to_string()));
        assert_eq!(err.to_string(), r#"could not parse version "v1..2""#);
    }
}
