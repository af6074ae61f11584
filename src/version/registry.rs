//! Registry of candidate versions parsed from raw strings

use indexmap::IndexMap;
use tracing::debug;

use crate::version::error::{SelectError, VersionError};
use crate::version::semver::Version;

/// How raw candidate strings are parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop unparseable candidates instead of failing
    pub tolerant: bool,
    /// Fall back to the lenient (Go-style) grammar
    pub lenient: bool,
}

/// Parsed candidates in input order, plus the raw spellings of each version
#[derive(Debug, Default)]
pub struct Registry {
    options: ParseOptions,
    versions: Vec<Version>,
    /// Raw string of each entry in `versions`, same index
    raws: Vec<String>,
    originals: IndexMap<Version, Vec<String>>,
}

impl Registry {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Parse and record one raw candidate
    ///
    /// Tries the standard grammar, then the lenient one when enabled. A
    /// candidate that fails every grammar is skipped in tolerant mode and
    /// reported otherwise.
    pub fn add(&mut self, raw: &str) -> Result<(), SelectError> {
        let parsed = match Version::parse(raw) {
            Err(_) if self.options.lenient => Version::parse_lenient(raw),
            result => result,
        };

        match parsed {
            Ok(version) => {
                self.originals
                    .entry(version.clone())
                    .or_default()
                    .push(raw.to_string());
                self.versions.push(version);
                self.raws.push(raw.to_string());
                Ok(())
            }
            Err(e) => self.reject(raw, e),
        }
    }

    /// Record one raw candidate read as bytes
    ///
    /// A candidate that is not valid UTF-8 is invalid under every grammar.
    pub fn add_bytes(&mut self, raw: &[u8]) -> Result<(), SelectError> {
        match std::str::from_utf8(raw) {
            Ok(raw) => self.add(raw),
            Err(_) => {
                let lossy = String::from_utf8_lossy(raw);
                self.reject(&lossy, VersionError::Invalid(lossy.to_string()))
            }
        }
    }

    fn reject(&self, raw: &str, err: VersionError) -> Result<(), SelectError> {
        if self.options.tolerant {
            debug!("Skipping invalid candidate: {}", err);
            return Ok(());
        }
        Err(SelectError::from_candidate(raw, err))
    }

    /// Add every candidate in order, stopping at the first reported failure
    pub fn add_many<I, S>(&mut self, raws: I) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raws.into_iter().try_for_each(|raw| self.add(raw.as_ref()))
    }

    /// Every parsed version, one per accepted raw string
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Every parsed version paired with the raw string it came from, in input order
    pub fn entries(&self) -> impl Iterator<Item = (&Version, &str)> {
        self.versions
            .iter()
            .zip(self.raws.iter().map(String::as_str))
    }

    /// Raw strings that parsed to `version`, in first-seen order
    pub fn originals_for(&self, version: &Version) -> &[String] {
        self.originals
            .get(version)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
