//! End-to-end selection scenarios driven through `app::run` with in-memory I/O

use std::io::Cursor;

use rstest::rstest;
use semver_select::app::run;
use semver_select::config::SelectConfig;
use semver_select::version::SelectError;

fn config(constraint: &str) -> SelectConfig {
    SelectConfig::new(constraint)
}

fn select_lines(
    config: &SelectConfig,
    candidates: &[&str],
    stdin: &str,
) -> Result<Vec<String>, SelectError> {
    let candidates: Vec<String> = candidates.iter().map(|s| s.to_string()).collect();
    let mut stdout = Vec::new();
    run(config, &candidates, Cursor::new(stdin), &mut stdout)?;
    Ok(String::from_utf8(stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect())
}

#[rstest]
#[case::matches_exact_version(
    config("1.2.3"),
    &["1.2.0", "1.2.3-rc1", "1.2.3", "1.2.4"],
    &["1.2.3"]
)]
#[case::outputs_canonical_version(
    config("1"),
    &["1.2", "1", "1.2.3", "1.2.4"],
    &["1.2.4", "1.2.3", "1.2.0", "1.0.0"]
)]
#[case::honors_max_results(
    SelectConfig { max_results: 2, ..config("1") },
    &["1.2", "1", "1.2.3", "1.2.4"],
    &["1.2.4", "1.2.3"]
)]
#[case::accepts_go_version(
    SelectConfig { lenient: true, ..config("1.2.3") },
    &["go1.2.0", "go1.2.3rc1", "go1.2.3", "go1.2.4"],
    &["1.2.3"]
)]
#[case::ignores_invalid_candidate(
    SelectConfig { ignore_invalid: true, ..config("1.2.3") },
    &["1.2.0", "1.2.3-rc1", "1.2.3", "1.2.4", "invalid"],
    &["1.2.3"]
)]
#[case::outputs_original_with_orig(
    SelectConfig { lenient: true, use_original: true, ..config("1.2.3") },
    &["go1.2.0", "go1.2.3rc1", "go1.2.3", "go1.2.4", "1.2.3"],
    &["go1.2.3", "1.2.3"]
)]
#[case::keeps_identical_duplicates_with_orig(
    SelectConfig { use_original: true, ..config("^1") },
    &["1.0.0", "v1.1", "1.0.0"],
    &["v1.1", "1.0.0", "1.0.0"]
)]
#[case::orig_honors_max_results_across_equal_versions(
    SelectConfig { lenient: true, use_original: true, max_results: 1, ..config("1.2.3") },
    &["go1.2.3", "1.2.3", "v1.2.3"],
    &["go1.2.3"]
)]
#[case::orig_truncates_inside_a_group_of_spellings(
    SelectConfig { lenient: true, use_original: true, max_results: 2, ..config("1.2") },
    &["1.2.2", "go1.2.3", "1.2.3", "v1.2.3"],
    &["go1.2.3", "1.2.3"]
)]
#[case::no_matches_is_empty(config(">=3"), &["1.0.0", "2.0.0"], &[])]
fn run_selects_expected_versions(
    #[case] config: SelectConfig,
    #[case] candidates: &[&str],
    #[case] expected: &[&str],
) {
    assert_eq!(select_lines(&config, candidates, "").unwrap(), expected);
}

#[test]
fn run_accepts_stdin() {
    let lines = select_lines(&config("1.2.3"), &["-"], "1.2.0\n1.2.3-rc1\n1.2.3\n1.2.4").unwrap();
    assert_eq!(lines, vec!["1.2.3"]);
}

#[test]
fn run_combines_arguments_and_stdin() {
    let lines = select_lines(&config("^1.2"), &["1.3.0", "-"], "1.2.0\n2.0.0\n").unwrap();
    assert_eq!(lines, vec!["1.3.0", "1.2.0"]);
}

#[test]
fn run_errors_on_invalid_candidate() {
    let err = select_lines(
        &config("1.2.3"),
        &["1.2.0", "1.2.3-rc1", "1.2.3", "1.2.4", "invalid"],
        "",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), r#"could not parse version "invalid""#);
}

#[test]
fn run_errors_on_invalid_stdin_line() {
    let err = select_lines(&config("1"), &["-"], "1.0.0\nnope\n1.1.0\n").unwrap_err();
    assert_eq!(err.to_string(), r#"could not parse version "nope""#);
}

#[test]
fn run_skips_non_utf8_stdin_line_with_ignore_invalid() {
    let config = SelectConfig {
        ignore_invalid: true,
        ..config("1")
    };
    let mut stdout = Vec::new();
    run(
        &config,
        &["-".to_string()],
        Cursor::new(&b"1.0.0\n\xff\xfe\n1.1.0\n"[..]),
        &mut stdout,
    )
    .unwrap();

    assert_eq!(stdout, b"1.1.0\n1.0.0\n");
}

#[test]
fn run_errors_on_non_utf8_stdin_line() {
    let mut stdout = Vec::new();
    let err = run(
        &config("1"),
        &["-".to_string()],
        Cursor::new(&b"1.0.0\n\xff\xfe\n"[..]),
        &mut stdout,
    )
    .unwrap_err();

    assert!(matches!(err, SelectError::InvalidCandidate(_)));
    assert!(stdout.is_empty());
}

#[test]
fn run_errors_on_no_candidates() {
    let err = select_lines(&config("1.2.3"), &[], "").unwrap_err();
    assert_eq!(err.to_string(), "no candidates provided");
}

#[test]
fn run_reports_overflowing_component() {
    let config = SelectConfig {
        lenient: true,
        ..config("1")
    };
    let err = select_lines(&config, &["go1.2.18446744073709551616"], "").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"could not parse patch version "go1.2.18446744073709551616""#
    );
}

#[rstest]
#[case("1.x", None)]
#[case(">= 1.2, < 2 || ^3", None)]
#[case("1.invalid", Some(r#"invalid constraint: "1.invalid""#))]
fn run_validate_constraint(#[case] constraint: &str, #[case] expected_err: Option<&str>) {
    let config = SelectConfig {
        validate_only: true,
        ..config(constraint)
    };
    let result = select_lines(&config, &[], "");

    match expected_err {
        None => assert_eq!(result.unwrap(), Vec::<String>::new()),
        Some(message) => assert_eq!(result.unwrap_err().to_string(), message),
    }
}
