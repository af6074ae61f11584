//! Version range constraints
//!
//! Supports the range expressions used by Go-style tooling:
//! - `1.2.3` - exact match
//! - `1`, `1.2`, `1.x`, `1.2.*`, `*` - wildcard (x-)ranges
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `!=1.2.3` - comparison operators
//! - `1.2 - 1.4` - hyphen range (>=1.2.0 <1.5.0)
//! - `>=1.2, <2` or `>=1.2 <2` - AND, `^1 || ^3` - OR
//!
//! A pre-release version only satisfies a comparator whose own version
//! carries a pre-release, so `1.2.3-rc1` does not match `1` or `*`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::version::error::ConstraintError;
use crate::version::semver::Version;

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(!=|>=|=>|<=|=<|~>|=|>|<|~|\^)?v?(\*|x|X|[0-9]+)(?:\.(\*|x|X|[0-9]+))?(?:\.(\*|x|X|[0-9]+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .unwrap()
});

const OPERATOR_CHARS: &[char] = &['=', '!', '<', '>', '~', '^'];

/// A compiled range expression
#[derive(Debug, Clone)]
pub struct Constraint {
    expr: String,
    spec: VersionSpec,
}

impl Constraint {
    /// Parse and validate `expr`
    pub fn compile(expr: &str) -> Result<Self, ConstraintError> {
        let spec = VersionSpec::parse(expr)?;
        Ok(Self {
            expr: expr.to_string(),
            spec,
        })
    }

    /// Check whether `version` satisfies this constraint
    pub fn matches(&self, version: &Version) -> bool {
        self.spec.satisfies(version)
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Top-level expression tree
#[derive(Debug, Clone)]
enum VersionSpec {
    Single(VersionRange),
    /// All must satisfy (comma or space separated)
    And(Vec<VersionSpec>),
    /// Any must satisfy (`||` separated)
    Or(Vec<VersionSpec>),
}

impl VersionSpec {
    fn parse(expr: &str) -> Result<Self, ConstraintError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ConstraintError::Empty);
        }

        let mut alternatives = expr
            .split("||")
            .map(Self::parse_alternative)
            .collect::<Result<Vec<_>, _>>()?;

        if alternatives.len() == 1 {
            Ok(alternatives.remove(0))
        } else {
            Ok(VersionSpec::Or(alternatives))
        }
    }

    /// Parse one `||` branch: comma separated parts, each either a hyphen
    /// range or whitespace separated comparators
    fn parse_alternative(alternative: &str) -> Result<Self, ConstraintError> {
        let alternative = alternative.trim();
        if alternative.is_empty() {
            return Err(ConstraintError::EmptyAlternative);
        }

        let mut specs = Vec::new();
        for part in alternative.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(ConstraintError::InvalidComparator(alternative.to_string()));
            }

            if part.contains(" - ") {
                specs.push(Self::parse_hyphen(part)?);
                continue;
            }

            for comparator in split_comparators(part)? {
                specs.push(VersionSpec::Single(VersionRange::parse(&comparator)?));
            }
        }

        if specs.len() == 1 {
            Ok(specs.remove(0))
        } else {
            Ok(VersionSpec::And(specs))
        }
    }

    /// Parse hyphen range like "1.2 - 1.4"
    fn parse_hyphen(part: &str) -> Result<Self, ConstraintError> {
        let invalid = || ConstraintError::InvalidHyphenRange(part.to_string());

        let parts: Vec<&str> = part.split(" - ").collect();
        let [from, to] = parts[..] else {
            return Err(invalid());
        };
        let from = PartialVersion::parse_bare(from.trim()).ok_or_else(invalid)?;
        let to = PartialVersion::parse_bare(to.trim()).ok_or_else(invalid)?;

        Ok(VersionSpec::And(vec![
            VersionSpec::Single(VersionRange::from_operator(Operator::Gte, from)),
            VersionSpec::Single(VersionRange::from_operator(Operator::Lte, to)),
        ]))
    }

    fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.satisfies(version),
            VersionSpec::And(specs) => specs.iter().all(|s| s.satisfies(version)),
            VersionSpec::Or(specs) => specs.iter().any(|s| s.satisfies(version)),
        }
    }
}

/// Split on whitespace, gluing a detached operator to the version after it
/// (`>= 1.2` becomes `>=1.2`)
fn split_comparators(part: &str) -> Result<Vec<String>, ConstraintError> {
    let mut comparators = Vec::new();
    let mut pending: Option<&str> = None;

    for token in part.split_whitespace() {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            if pending.is_some() {
                return Err(ConstraintError::InvalidComparator(part.to_string()));
            }
            pending = Some(token);
            continue;
        }
        match pending.take() {
            Some(op) => comparators.push(format!("{op}{token}")),
            None => comparators.push(token.to_string()),
        }
    }

    if let Some(op) = pending {
        return Err(ConstraintError::InvalidComparator(op.to_string()));
    }
    Ok(comparators)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Tilde,
    Caret,
}

impl Operator {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "" | "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            ">" => Some(Operator::Gt),
            ">=" | "=>" => Some(Operator::Gte),
            "<" => Some(Operator::Lt),
            "<=" | "=<" => Some(Operator::Lte),
            "~" | "~>" => Some(Operator::Tilde),
            "^" => Some(Operator::Caret),
            _ => None,
        }
    }
}

/// A version as written in a constraint, where trailing components may be
/// missing or wildcards
#[derive(Debug, Clone, PartialEq, Eq)]
struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: String,
}

impl PartialVersion {
    /// Build from comparator captures; `None` when a component overflows or a
    /// number follows a wildcard (`1.x.3`)
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let mut components = [None; 3];
        let mut wildcard = false;
        for (slot, index) in components.iter_mut().zip(2..=4) {
            match caps.get(index).map(|m| m.as_str()) {
                None | Some("x" | "X" | "*") => wildcard = true,
                Some(digits) if !wildcard => *slot = Some(digits.parse::<u64>().ok()?),
                Some(_) => return None,
            }
        }

        Some(Self {
            major: components[0],
            minor: components[1],
            patch: components[2],
            pre: caps.get(5).map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// Parse a version with no operator in front of it
    fn parse_bare(text: &str) -> Option<Self> {
        let caps = COMPARATOR_RE.captures(text)?;
        if caps.get(1).is_some() {
            return None;
        }
        Self::from_captures(&caps)
    }

    /// Lowest version covered, with missing components as 0
    fn floor(&self, major: u64) -> Version {
        Version::new(major, self.minor.unwrap_or(0), self.patch.unwrap_or(0)).with_pre(&self.pre)
    }

    /// First version past the x-range (`1` -> 2.0.0, `1.2` -> 1.3.0)
    fn ceiling(&self, major: u64) -> Option<Version> {
        match self.minor {
            None => bump_major(major),
            Some(minor) => bump_minor(major, minor),
        }
    }
}

fn bump_major(major: u64) -> Option<Version> {
    Some(Version::new(major.checked_add(1)?, 0, 0))
}

fn bump_minor(major: u64, minor: u64) -> Option<Version> {
    Some(Version::new(major, minor.checked_add(1)?, 0))
}

fn bump_patch(major: u64, minor: u64, patch: u64) -> Option<Version> {
    Some(Version::new(major, minor, patch.checked_add(1)?))
}

/// A single comparator
#[derive(Debug, Clone)]
enum VersionRange {
    Exact(Version),
    NotEqual(Version),
    Gt(Version),
    Gte(Version),
    Lt(Version),
    Lte(Version),
    /// >= from, < to
    Between { from: Version, to: Version },
    /// < from or >= to
    Outside { from: Version, to: Version },
    Any,
    Nothing,
}

impl VersionRange {
    fn parse(comparator: &str) -> Result<Self, ConstraintError> {
        let invalid = || ConstraintError::InvalidComparator(comparator.to_string());

        let caps = COMPARATOR_RE.captures(comparator).ok_or_else(invalid)?;
        let op = Operator::parse(caps.get(1).map_or("", |m| m.as_str())).ok_or_else(invalid)?;
        let partial = PartialVersion::from_captures(&caps).ok_or_else(invalid)?;

        Ok(Self::from_operator(op, partial))
    }

    fn from_operator(op: Operator, partial: PartialVersion) -> Self {
        let Some(major) = partial.major else {
            return match op {
                Operator::Ne | Operator::Gt | Operator::Lt => VersionRange::Nothing,
                _ => VersionRange::Any,
            };
        };
        let floor = partial.floor(major);

        if let (Some(minor), Some(patch)) = (partial.minor, partial.patch) {
            return match op {
                Operator::Eq => VersionRange::Exact(floor),
                Operator::Ne => VersionRange::NotEqual(floor),
                Operator::Gt => VersionRange::Gt(floor),
                Operator::Gte => VersionRange::Gte(floor),
                Operator::Lt => VersionRange::Lt(floor),
                Operator::Lte => VersionRange::Lte(floor),
                Operator::Tilde => Self::between(floor, bump_minor(major, minor)),
                // ^1.2.3 -> <2.0.0, ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.0.4
                Operator::Caret => {
                    let to = if major > 0 {
                        bump_major(major)
                    } else if minor > 0 {
                        bump_minor(major, minor)
                    } else {
                        bump_patch(major, minor, patch)
                    };
                    Self::between(floor, to)
                }
            };
        }

        let ceiling = partial.ceiling(major);
        match op {
            Operator::Eq | Operator::Tilde => Self::between(floor, ceiling),
            Operator::Ne => match ceiling {
                Some(to) => VersionRange::Outside { from: floor, to },
                None => VersionRange::Lt(floor),
            },
            Operator::Gt => ceiling.map_or(VersionRange::Nothing, VersionRange::Gte),
            Operator::Gte => VersionRange::Gte(floor),
            Operator::Lt => VersionRange::Lt(floor),
            Operator::Lte => ceiling.map_or(VersionRange::Any, VersionRange::Lt),
            // ^1.2 -> <2.0.0, ^0 -> <1.0.0, ^0.2 -> <0.3.0
            Operator::Caret if major > 0 || partial.minor.is_none() => {
                Self::between(floor, bump_major(major))
            }
            Operator::Caret => Self::between(floor, ceiling),
        }
    }

    fn between(from: Version, to: Option<Version>) -> Self {
        match to {
            Some(to) => VersionRange::Between { from, to },
            None => VersionRange::Gte(from),
        }
    }

    /// Whether the comparator names a pre-release, opting in to pre-release candidates
    fn allows_prerelease(&self) -> bool {
        match self {
            VersionRange::Exact(v)
            | VersionRange::NotEqual(v)
            | VersionRange::Gt(v)
            | VersionRange::Gte(v)
            | VersionRange::Lt(v)
            | VersionRange::Lte(v) => v.is_prerelease(),
            VersionRange::Between { from, .. } | VersionRange::Outside { from, .. } => {
                from.is_prerelease()
            }
            VersionRange::Any | VersionRange::Nothing => false,
        }
    }

    fn satisfies(&self, version: &Version) -> bool {
        if version.is_prerelease() && !self.allows_prerelease() {
            return false;
        }

        match self {
            VersionRange::Exact(v) => version == v,
            VersionRange::NotEqual(v) => version != v,
            VersionRange::Gt(v) => version > v,
            VersionRange::Gte(v) => version >= v,
            VersionRange::Lt(v) => version < v,
            VersionRange::Lte(v) => version <= v,
            VersionRange::Between { from, to } => version >= from && version < to,
            VersionRange::Outside { from, to } => version < from || version >= to,
            VersionRange::Any => true,
            VersionRange::Nothing => false,
        }
    }
}
