//! Semantic version model shared by every grammar
//!
//! A [`Version`] orders by major, minor, patch and then pre-release identifiers.
//! Build metadata is kept for reference but never takes part in ordering,
//! equality or hashing, so `1.2.3+a` and `1.2.3+b` are the same version.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::{Match, Regex};

use crate::version::error::{Component, VersionError};

/// Partial form accepted after strict parsing fails: `v1`, `1.2`, `v1.2.3-rc.1+build`
static COERCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .unwrap()
});

#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated pre-release identifiers, as written
    pub pre: String,
    /// Build metadata, as written
    pub build: String,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: String::new(),
            build: String::new(),
        }
    }

    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = pre.into();
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Parse the SemVer 2.0 grammar: `MAJOR.MINOR.PATCH[-pre][+build]`
    ///
    /// All three numeric components are required and leading zeros are rejected.
    pub fn parse_strict(input: &str) -> Result<Self, VersionError> {
        ::semver::Version::parse(input)
            .map(Self::from)
            .map_err(|_| VersionError::Invalid(input.to_string()))
    }

    /// Parse a candidate with the standard grammar.
    ///
    /// Strict SemVer first, then the partial form where a leading `v` is allowed
    /// and omitted minor/patch components default to 0:
    /// - "1" -> 1.0.0
    /// - "v1.2" -> 1.2.0
    /// - "1.2.3-rc.1+build" -> 1.2.3-rc.1
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if let Ok(version) = Self::parse_strict(input) {
            return Ok(version);
        }

        let caps = COERCE_RE
            .captures(input)
            .ok_or_else(|| VersionError::Invalid(input.to_string()))?;

        let pre = caps.get(4).map_or("", |m| m.as_str());
        if pre.split('.').any(has_leading_zero) {
            return Err(VersionError::Invalid(input.to_string()));
        }

        Ok(Self {
            major: parse_component(caps.get(1), Component::Major, input)?,
            minor: parse_component(caps.get(2), Component::Minor, input)?,
            patch: parse_component(caps.get(3), Component::Patch, input)?,
            pre: pre.to_string(),
            build: caps.get(5).map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// Parse with the relaxed `go1.2rc1` grammar. See [`crate::version::lenient`].
    pub fn parse_lenient(input: &str) -> Result<Self, VersionError> {
        crate::version::lenient::parse(input)
    }

    /// Compare pre-release identifiers by SemVer precedence
    fn cmp_pre(&self, other: &Self) -> Ordering {
        match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, true) => Ordering::Equal,
            // A release sorts after any of its pre-releases
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let mut left = self.pre.split('.');
                let mut right = other.pre.split('.');
                loop {
                    match (left.next(), right.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some(a), Some(b)) => match compare_identifier(a, b) {
                            Ordering::Equal => continue,
                            ord => return ord,
                        },
                    }
                }
            }
        }
    }
}

/// Parse an optional numeric capture, defaulting to 0 when absent
pub(crate) fn parse_component(
    text: Option<Match<'_>>,
    component: Component,
    input: &str,
) -> Result<u64, VersionError> {
    match text {
        None => Ok(0),
        Some(m) => m
            .as_str()
            .parse::<u64>()
            .map_err(|source| VersionError::Overflow {
                component,
                input: input.to_string(),
                source,
            }),
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

fn has_leading_zero(identifier: &str) -> bool {
    is_numeric(identifier) && identifier.len() > 1 && identifier.starts_with('0')
}

fn strip_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Numeric identifiers compare by value (without overflowing on long digit runs)
/// and sort before alphanumeric ones, which compare in ASCII order.
fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            let (a, b) = (strip_zeros(a), strip_zeros(b));
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl From<::semver::Version> for Version {
    fn from(v: ::semver::Version) -> Self {
        Self::new(v.major, v.minor, v.patch)
            .with_pre(v.pre.as_str())
            .with_build(v.build.as_str())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.cmp_pre(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        if self.pre.is_empty() {
            return;
        }
        // Must agree with `cmp_pre`: "01" and "1" are the same identifier
        for identifier in self.pre.split('.') {
            if is_numeric(identifier) {
                0u8.hash(state);
                strip_zeros(identifier).hash(state);
            } else {
                1u8.hash(state);
                identifier.hash(state);
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}
