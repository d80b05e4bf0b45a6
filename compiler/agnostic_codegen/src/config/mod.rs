//! Backend configuration.
//!
//! Backends are selected by name and constructed from string arguments, so a
//! driver can configure them from a command line or a config file without
//! knowing any backend type.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use agnostic_diagnostic::{CodegenError, Result};

use crate::contract::Backend;
use crate::golang::GoBackend;
use crate::typescript::TypeScriptBackend;

/// Construction arguments, ordered by key.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct BackendArgs {
    values: BTreeMap<String, String>,
}

impl BackendArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The value of `key`, or a configuration error naming `backend`.
    pub fn require(&self, backend: &'static str, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| CodegenError::missing_argument(backend, key))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `key=value` entries. Later entries overwrite earlier ones.
    pub fn parse<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    args.insert(key.trim(), value.trim());
                }
                _ => {
                    return Err(CodegenError::configuration(
                        "args",
                        format!("expected `key=value`, found `{entry}`"),
                    ));
                }
            }
        }
        Ok(args)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BackendArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut args = Self::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

/// The available target languages.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BackendKind {
    TypeScript,
    Go,
}

impl BackendKind {
    pub const ALL: &'static [BackendKind] = &[BackendKind::TypeScript, BackendKind::Go];

    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::TypeScript => "typescript",
            BackendKind::Go => "go",
        }
    }

    /// Construct a program backend of this kind.
    pub fn create(self, args: &BackendArgs) -> Result<Box<dyn Backend>> {
        tracing::debug!(backend = self.name(), "creating backend");
        Ok(match self {
            BackendKind::TypeScript => Box::new(TypeScriptBackend::from_args(args)?),
            BackendKind::Go => Box::new(GoBackend::from_args(args)?),
        })
    }
}

impl FromStr for BackendKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(BackendKind::TypeScript),
            "go" | "golang" => Ok(BackendKind::Go),
            _ => Err(CodegenError::configuration(
                "backend",
                format!("unknown backend `{s}`"),
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
