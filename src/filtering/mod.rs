use regex::Regex;
use thiserror::Error;
use tracing::trace;

/// Errors raised while compiling filter rule sets. These are configuration
/// errors and surface at startup, never during a poll cycle.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiled include/ignore rules deciding whether a named broker object
/// (queue or topic) should be reported.
///
/// Includes are checked first and override ignores: operators carve
/// exceptions out of a broad ignore list by adding includes. A name matched
/// by neither list is reported (default-allow). Patterns match the whole
/// name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct FilterRuleSet {
    includes: Vec<Regex>,
    ignores: Vec<Regex>,
}

impl FilterRuleSet {
    /// Compile a rule set from raw pattern lists. Pattern order is preserved.
    pub fn compile<S: AsRef<str>>(includes: &[S], ignores: &[S]) -> Result<Self, FilterError> {
        Ok(Self {
            includes: compile_patterns(includes)?,
            ignores: compile_patterns(ignores)?,
        })
    }

    /// Compile a rule set layering global lists under per-kind lists. The
    /// composition happens once, at configuration load; the result is
    /// immutable and shared across poll cycles.
    pub fn layered<S: AsRef<str>>(
        global_includes: &[S],
        global_ignores: &[S],
        includes: &[S],
        ignores: &[S],
    ) -> Result<Self, FilterError> {
        let mut compiled_includes = compile_patterns(global_includes)?;
        compiled_includes.extend(compile_patterns(includes)?);
        let mut compiled_ignores = compile_patterns(global_ignores)?;
        compiled_ignores.extend(compile_patterns(ignores)?);
        Ok(Self {
            includes: compiled_includes,
            ignores: compiled_ignores,
        })
    }

    /// Decide whether the named object should be reported.
    ///
    /// Blank names are never reported. Any matching include wins regardless
    /// of ignores; otherwise the first matching ignore drops the name.
    pub fn should_report(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        for include in &self.includes {
            if include.is_match(name) {
                return true;
            }
        }

        for ignore in &self.ignores {
            if ignore.is_match(name) {
                trace!("Skipping metrics for object: {}", name);
                return false;
            }
        }

        true
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, FilterError> {
    patterns
        .iter()
        .map(|p| {
            let trimmed = p.as_ref().trim();
            // Anchored full-match semantics, not substring search.
            Regex::new(&format!("(?i)^(?:{trimmed})$")).map_err(|source| {
                FilterError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    source,
                }
            })
        })
        .collect()
}
