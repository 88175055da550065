//! Evaluation policy knobs.
//!
//! The evaluator runs fail-fast by default. `ErrorPolicy::Lenient` keeps the
//! legacy behavior around for compatibility runs: argument and condition
//! errors are replaced with `Nil`, and a failing definition still writes
//! `Nil` under its name before the error is returned.

use std::env;
use std::str::FromStr;

pub const POLICY_VAR: &str = "LISP_EVAL_POLICY";
pub const MAX_DEPTH_VAR: &str = "LISP_EVAL_MAX_DEPTH";
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Strict,
    Lenient,
}

impl ErrorPolicy {
    #[inline]
    pub fn swallows_errors(self) -> bool {
        matches!(self, Self::Lenient)
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" | "compat" => Ok(Self::Lenient),
            other => Err(format!("unknown error policy `{other}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    pub error_policy: ErrorPolicy,
    /// Deepest nesting of `eval` calls before giving up.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalOptions {
    pub fn lenient() -> Self {
        Self::default().with_policy(ErrorPolicy::Lenient)
    }

    pub fn with_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reads `LISP_EVAL_POLICY` and `LISP_EVAL_MAX_DEPTH`, keeping defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(raw) = lookup(POLICY_VAR) {
            match raw.parse() {
                Ok(policy) => options.error_policy = policy,
                Err(err) => tracing::warn!("{POLICY_VAR}: {err}; using strict"),
            }
        }
        if let Some(raw) = lookup(MAX_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = depth,
                _ => tracing::warn!(
                    "{MAX_DEPTH_VAR}: `{raw}` is not a positive integer; using {DEFAULT_MAX_DEPTH}"
                ),
            }
        }
        options
    }
}
