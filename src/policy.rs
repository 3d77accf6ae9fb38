//! Resolution policies: which utility functions get exposed, and under what
//! implementation symbol.
//!
//! Both policies are total. Anything they do not positively recognise
//! resolves to [`BindingDecision::Exclude`], so there is no ambiguity case.
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::GenError;
use crate::ir::BindingDecision;
use crate::path_de;
use crate::schema::{self, UtilityFunction};

pub trait ResolutionPolicy {
    fn resolve(&self, f: &UtilityFunction) -> BindingDecision;

    /// Short label for diagnostics.
    fn describe(&self) -> &'static str;
}

// ————————————————————————————————————————————————————————————————————————————
// EXPLICIT MAP
// ————————————————————————————————————————————————————————————————————————————

/// One entry of the explicit map file.
///
/// `true` binds under the API name, a string binds under that symbol;
/// `false` (and `null`, see [`ExplicitMapPolicy`]) excludes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MapEntry {
    Flag(bool),
    Symbol(String),
}

/// Closed allowlist keyed by API name.
#[derive(Debug, Clone, Default)]
pub struct ExplicitMapPolicy {
    table: IndexMap<String, Option<MapEntry>>,
}

impl ExplicitMapPolicy {
    pub fn new(table: IndexMap<String, Option<MapEntry>>) -> Result<Self, GenError> {
        for (name, entry) in &table {
            if let Some(MapEntry::Symbol(symbol)) = entry {
                if !schema::is_identifier(symbol) {
                    return Err(GenError::config(format!(
                        "map entry `{name}` names invalid symbol `{symbol}`"
                    )));
                }
            }
        }
        Ok(Self { table })
    }

    /// Parse a JSON object mapping API names to entries.
    pub fn from_json(bytes: &[u8]) -> Result<Self, GenError> {
        let table = path_de::from_slice_with_path::<IndexMap<String, Option<MapEntry>>>(bytes)
            .map_err(|err| GenError::config(format!("explicit map: {err}")))?;
        Self::new(table)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ResolutionPolicy for ExplicitMapPolicy {
    fn resolve(&self, f: &UtilityFunction) -> BindingDecision {
        match self.table.get(&f.name) {
            Some(Some(MapEntry::Flag(true))) => BindingDecision::Bind(f.name.clone()),
            Some(Some(MapEntry::Symbol(symbol))) => BindingDecision::Bind(symbol.clone()),
            Some(Some(MapEntry::Flag(false))) | Some(None) | None => BindingDecision::Exclude,
        }
    }

    fn describe(&self) -> &'static str {
        "explicit-map"
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REFERENCE TEXT
// ————————————————————————————————————————————————————————————————————————————

/// Substring-presence probe against reference source text, typically the
/// header of the native binding layer. Unrelated substrings produce false
/// positives; that imprecision is accepted.
#[derive(Debug, Clone)]
pub struct ReferenceTextPolicy {
    text: String,
}

impl ReferenceTextPolicy {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ResolutionPolicy for ReferenceTextPolicy {
    fn resolve(&self, f: &UtilityFunction) -> BindingDecision {
        if self.text.contains(f.name.as_str()) {
            BindingDecision::Bind(f.name.clone())
        } else {
            BindingDecision::Exclude
        }
    }

    fn describe(&self) -> &'static str {
        "reference-text"
    }
}
