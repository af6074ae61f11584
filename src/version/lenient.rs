//! Relaxed version grammar for Go-style release names
//!
//! Go toolchain releases are published as `go1.20`, `go1.21rc2` or `1.15.2`.
//! This grammar accepts:
//! - an optional `go` prefix
//! - a required major and optional minor/patch (defaulting to 0)
//! - a bare suffix starting with a letter, kept verbatim as the pre-release
//!
//! Examples:
//! - "go1.15.2" -> 1.15.2
//! - "go1.15" -> 1.15.0
//! - "1.15rc1" -> 1.15.0-rc1

use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::{Component, VersionError};
use crate::version::semver::{Version, parse_component};

/// Prefix accepted in front of the major component
pub const LENIENT_PREFIX: &str = "go";

static LENIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{LENIENT_PREFIX})?([1-9][0-9]*)(?:\.(0|[1-9][0-9]*))?(?:\.(0|[1-9][0-9]*))?([a-zA-Z][a-zA-Z0-9.-]*)?$"
    ))
    .unwrap()
});

/// Parse `input` with the lenient grammar
pub fn parse(input: &str) -> Result<Version, VersionError> {
    let caps = LENIENT_RE
        .captures(input)
        .ok_or_else(|| VersionError::Invalid(input.to_string()))?;

    let mut version = Version::new(
        parse_component(caps.get(1), Component::Major, input)?,
        parse_component(caps.get(2), Component::Minor, input)?,
        parse_component(caps.get(3), Component::Patch, input)?,
    );
    if let Some(suffix) = caps.get(4) {
        version = version.with_pre(suffix.as_str());
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("go1.15.2", "1.15.2")]
    #[case("1.15.2", "1.15.2")]
    #[case("go1.15", "1.15.0")]
    #[case("1.15rc1", "1.15.0-rc1")]
    #[case("go1.2.3rc1", "1.2.3-rc1")]
    #[case("go1.21beta.2", "1.21.0-beta.2")]
    #[case("go1", "1.0.0")]
    #[case("1", "1.0.0")]
    fn parse_accepts_go_versions(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse(input).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("g1.15")]
    #[case(" ")]
    #[case(" 1")]
    #[case("")]
    #[case("go")]
    #[case("0.1.0")]
    #[case("1.01")]
    #[case("v1.2.3")]
    #[case("1.2.3.4")]
    #[case("1.2-rc1")]
    fn parse_rejects_other_forms(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.to_string(), format!("could not parse version {:?}", input));
    }

    #[rstest]
    #[case("go18446744073709551616.2.3", Component::Major)]
    #[case("go1.18446744073709551616.3", Component::Minor)]
    #[case("go1.2.18446744073709551616", Component::Patch)]
    fn parse_reports_overflowing_component(#[case] input: &str, #[case] expected: Component) {
        let err = parse(input).unwrap_err();

        assert!(
            err.to_string()
                .starts_with(&format!("could not parse {expected} version {input:?}")),
            "unexpected message: {err}"
        );
        assert!(matches!(
            err,
            VersionError::Overflow { component, .. } if component == expected
        ));
    }

    #[test]
    fn suffix_is_kept_verbatim() {
        let version = parse("go1.2rc.1-x").unwrap();
        assert_eq!(version.pre, "rc.1-x");
        assert!(version.is_prerelease());
    }

    #[test]
    fn lenient_pre_release_sorts_before_release() {
        assert!(parse("go1.2.3rc1").unwrap() < parse("go1.2.3").unwrap());
    }
}
