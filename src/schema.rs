//! Typed model of the API description (`extension_api.json`).
//!
//! Only the two sections the generator consumes are modelled. Records inside
//! them reject unknown fields so upstream schema drift fails loudly here
//! instead of producing subtly wrong bindings downstream.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::SchemaError;
use crate::path_de;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

// `typedarray::int`, `enum::Side`, `bitfield::MouseButtonMask`, ...
static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_:.,]*$").expect("type name pattern"));

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

// `UtilityFunctions`, `godot::UtilityFunctions`
static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$").expect("qualified name pattern")
});

/// A C++ name made of identifiers joined by `::`.
pub fn is_qualified_name(s: &str) -> bool {
    QUALIFIED_NAME.is_match(s)
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Root of the API description. Other top-level sections (`header`,
/// `classes`, `builtin_classes`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDescription {
    pub utility_functions: Vec<UtilityFunction>,
    pub global_enums: Vec<GlobalEnum>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UtilityFunction {
    pub name: String,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub hash: Option<u64>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalEnum {
    pub name: String,
    #[serde(default)]
    pub is_bitfield: bool,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

// ————————————————————————————————————————————————————————————————————————————
// LOADING
// ————————————————————————————————————————————————————————————————————————————

/// Parse and validate raw API description bytes. Nothing is returned unless
/// the whole document is valid.
pub fn load_api(bytes: &[u8]) -> Result<ApiDescription, SchemaError> {
    let api = path_de::from_slice_with_path::<ApiDescription>(bytes).map_err(|source| {
        let record = path_de::record_name_at(bytes, &source.path);
        SchemaError::Malformed { source, record }
    })?;
    api.validate()?;
    Ok(api)
}

impl ApiDescription {
    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::<&str>::with_capacity(self.utility_functions.len());
        for f in &self.utility_functions {
            check(&IDENTIFIER, "function name", &f.name, &f.name)?;
            if !seen.insert(f.name.as_str()) {
                return Err(SchemaError::DuplicateFunction { name: f.name.clone() });
            }
            if let Some(ret) = f.return_type.as_deref() {
                check(&TYPE_NAME, "return type", ret, &f.name)?;
            }
            for arg in &f.arguments {
                check(&TYPE_NAME, "argument type", &arg.ty, &f.name)?;
            }
        }
        // value names share one flat namespace; uniqueness is the schema's job
        for e in &self.global_enums {
            check(&TYPE_NAME, "enum name", &e.name, &e.name)?;
            for v in &e.values {
                check(&IDENTIFIER, "enum value name", &v.name, &e.name)?;
            }
        }
        Ok(())
    }
}

fn check(rx: &Regex, what: &'static str, value: &str, record: &str) -> Result<(), SchemaError> {
    if rx.is_match(value) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            what,
            value: value.to_owned(),
            record: record.to_owned(),
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
