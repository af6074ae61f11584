//! A single selection run
//!
//! Compiles the constraint, gathers candidates from the arguments (or the
//! input stream after the `-` sentinel), selects and writes one version per
//! line. All I/O handles are passed in, nothing reads process state here.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::{STDIN_SENTINEL, SelectConfig};
use crate::version::constraint::Constraint;
use crate::version::error::SelectError;
use crate::version::registry::{ParseOptions, Registry};
use crate::version::selector::select;

/// Run one selection and write the result lines to `stdout`
///
/// Nothing is written unless the whole run succeeds.
pub fn run<R: BufRead, W: Write>(
    config: &SelectConfig,
    candidates: &[String],
    stdin: R,
    stdout: &mut W,
) -> Result<(), SelectError> {
    let constraint = config
        .constraint
        .parse::<Constraint>()
        .map_err(|source| SelectError::InvalidConstraint {
            constraint: config.constraint.clone(),
            source,
        })?;

    if config.validate_only {
        info!("Constraint {:?} is valid", constraint.as_str());
        return Ok(());
    }

    if candidates.is_empty() {
        return Err(SelectError::NoCandidates);
    }

    let registry = load_candidates(config.parse_options(), candidates, stdin)?;
    let lines = select(
        &registry,
        &constraint,
        config.max_results,
        config.use_original,
    );
    debug!(
        "Selected {} of {} candidates for {:?}",
        lines.len(),
        registry.len(),
        constraint.as_str()
    );

    for line in &lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Parse candidates into a registry
///
/// Arguments are consumed in order until the `-` sentinel, after which the
/// remaining candidates are read line by line from `stdin`. A trailing `\r`
/// is stripped from each line.
pub fn load_candidates<R: BufRead>(
    options: ParseOptions,
    candidates: &[String],
    stdin: R,
) -> Result<Registry, SelectError> {
    let mut registry = Registry::new(options);

    let Some(index) = candidates.iter().position(|c| c == STDIN_SENTINEL) else {
        registry.add_many(candidates)?;
        return Ok(registry);
    };

    registry.add_many(&candidates[..index])?;
    if index + 1 < candidates.len() {
        debug!(
            "Ignoring {} candidate arguments after {:?}",
            candidates.len() - index - 1,
            STDIN_SENTINEL
        );
    }

    // Split on raw bytes so one non-UTF-8 line is a bad candidate, not a read error
    for line in stdin.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        registry.add_bytes(&line)?;
    }
    Ok(registry)
}
