//! Error taxonomy for a generator run.
//!
//! Every error is fatal: the first one aborts the run and no further stage
//! executes. The `Display` form always leads with the failing stage so the
//! binary can report it verbatim.
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error surfaced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Policy,
    Write,
    Embed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Policy => "policy",
            Stage::Write => "write",
            Stage::Embed => "embed",
        };
        f.write_str(name)
    }
}

/// Deserialization failure annotated with the JSON path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at JSON path {path} → {message}")]
pub struct PathedError {
    pub path: String,
    pub message: String,
}

/// The API description is malformed or incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("malformed API description{}: {source}", record_suffix(.record))]
    Malformed {
        #[source]
        source: PathedError,
        /// Name of the enclosing record, when the path points inside one.
        record: Option<String>,
    },
    #[error("duplicate utility function `{name}`")]
    DuplicateFunction { name: String },
    #[error("invalid {what} `{value}` in `{record}`")]
    InvalidName {
        what: &'static str,
        value: String,
        record: String,
    },
}

fn record_suffix(record: &Option<String>) -> String {
    match record {
        Some(name) => format!(" (record `{name}`)"),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("{stage} stage: {source}", stage = Stage::Load)]
    Schema {
        #[from]
        source: SchemaError,
    },
    #[error("{stage} stage: {}: {source}", .path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} stage: {message}", stage = Stage::Config)]
    Config { message: String },
}

impl GenError {
    pub fn io(stage: Stage, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io { stage, path: path.into(), source }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GenError::Config { message: message.into() }
    }

    pub fn stage(&self) -> Stage {
        match self {
            GenError::Schema { .. } => Stage::Load,
            GenError::Io { stage, .. } => *stage,
            GenError::Config { .. } => Stage::Config,
        }
    }
}
