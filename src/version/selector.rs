//! Filtering, ordering and rendering of matching candidates

use crate::version::constraint::Constraint;
use crate::version::registry::Registry;
use crate::version::semver::Version;

/// Select the registry's candidates that satisfy `constraint`, newest first
///
/// - `max_results`: emit at most this many lines, 0 means unlimited
/// - `use_original`: render each surviving candidate's own raw string instead
///   of its canonical form
pub fn select(
    registry: &Registry,
    constraint: &Constraint,
    max_results: usize,
    use_original: bool,
) -> Vec<String> {
    let mut matched: Vec<(&Version, &str)> = registry
        .entries()
        .filter(|(v, _)| constraint.matches(v))
        .collect();

    // Stable, so equal versions stay in input order
    matched.sort_by(|(a, _), (b, _)| b.cmp(a));

    if max_results > 0 {
        matched.truncate(max_results);
    }

    matched
        .into_iter()
        .map(|(version, raw)| {
            if use_original {
                raw.to_string()
            } else {
                version.to_string()
            }
        })
        .collect()
}
