//! Statement emitter: ordered registration statements → text artifact.
//!
//! Rendering is a pure function of (statements, profile, form, target), so
//! artifacts can be committed and diffed. Statement order is taken as given.
use serde::Deserialize;

use crate::error::GenError;
use crate::ir::RegistrationStatement;
use crate::profile::{CommentStyle, Profile};
use crate::schema;

pub const FUNCTIONS_UNIT: &str = "register_utility_functions";
pub const ENUMS_UNIT: &str = "register_global_enums";
pub const DEFAULT_TARGET: &str = "state";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    /// one `target.set(...)` per line, pasted inside an existing routine body
    #[default]
    Flat,
    /// a guarded function-like macro taking the target as its parameter
    Parameterized,
}

pub struct Codegen<'p> {
    profile: &'p Profile,
    form: Form,
    target: String,
    lines: Vec<String>,
}

impl<'p> Codegen<'p> {
    /// Fails when the combination cannot render valid output: a `//` enum
    /// marker inside a continued macro body would swallow the next statement.
    pub fn new(profile: &'p Profile, form: Form, target: impl Into<String>) -> Result<Self, GenError> {
        let target = target.into();
        if !schema::is_identifier(&target) {
            return Err(GenError::config(format!("target `{target}` is not an identifier")));
        }
        if form == Form::Parameterized && profile.enum_comment == CommentStyle::Line {
            return Err(GenError::config(format!(
                "profile `{:?}` uses line comments, which cannot appear in the parameterized form",
                profile.name
            )));
        }
        Ok(Self { profile, form, target, lines: Vec::new() })
    }

    pub fn emit(&mut self, statements: &[RegistrationStatement]) {
        for stmt in statements {
            let line = self.render(stmt);
            self.lines.push(line);
        }
    }

    fn render(&self, stmt: &RegistrationStatement) -> String {
        let target = &self.target;
        match stmt {
            RegistrationStatement::Function { name, shape, target_symbol } => {
                let expr = self.profile.binding_expr(*shape, target_symbol);
                format!("{target}.set(\"{name}\", {expr});")
            }
            RegistrationStatement::EnumComment { enum_name } => self.profile.enum_comment(enum_name),
            RegistrationStatement::EnumValue { name, value, .. } => {
                format!("{target}.set(\"{name}\", {value});")
            }
        }
    }

    /// Finish the artifact. `unit` names the macro in parameterized form and
    /// is ignored in flat form.
    pub fn into_unit(self, unit: &str) -> String {
        match self.form {
            Form::Flat => {
                let mut out = self.lines.join("\n");
                if !out.is_empty() {
                    out.push('\n');
                }
                out
            }
            Form::Parameterized => {
                let mut out = String::new();
                out.push_str(&format!("#ifndef {unit}\n"));
                if self.lines.is_empty() {
                    out.push_str(&format!("#define {unit}({})\n", self.target));
                } else {
                    out.push_str(&format!("#define {unit}({}) \\\n", self.target));
                    out.push_str(&self.lines.iter()
                        .map(|l| format!("\t{l}"))
                        .collect::<Vec<_>>()
                        .join(" \\\n"));
                    out.push('\n');
                }
                out.push_str("#endif\n");
                out
            }
        }
    }
}
