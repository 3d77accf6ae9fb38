//! Naming and formatting conventions of the two generator variants.
//!
//! The variants disagree on how variadic functions reach their adapter and
//! on how enum markers are commented. Each is kept as its own named profile.
use serde::Deserialize;

use crate::ir::CallShape;

pub const DEFAULT_CLASS: &str = "UtilityFunctions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ProfileName {
    /// variadics bind `wrap_function(&Class::name_internal)`, enums get `// Name`
    Internal,
    /// variadics bind `wrap_variadic_function(&Class::name)`, enums get `/* Name */`
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// Name`
    Line,
    /// `/* Name */`
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: ProfileName,
    /// class qualifying every implementation symbol
    pub class_name: String,
    pub single_adapter: String,
    pub variadic_adapter: String,
    /// appended to the symbol of variadic bindings
    pub variadic_suffix: String,
    pub enum_comment: CommentStyle,
}

impl Profile {
    pub fn internal() -> Self {
        Self {
            name: ProfileName::Internal,
            class_name: DEFAULT_CLASS.into(),
            single_adapter: "wrap_function".into(),
            variadic_adapter: "wrap_function".into(),
            variadic_suffix: "_internal".into(),
            enum_comment: CommentStyle::Line,
        }
    }

    pub fn variadic() -> Self {
        Self {
            name: ProfileName::Variadic,
            class_name: DEFAULT_CLASS.into(),
            single_adapter: "wrap_function".into(),
            variadic_adapter: "wrap_variadic_function".into(),
            variadic_suffix: String::new(),
            enum_comment: CommentStyle::Block,
        }
    }

    pub fn named(name: ProfileName) -> Self {
        match name {
            ProfileName::Internal => Self::internal(),
            ProfileName::Variadic => Self::variadic(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Expression registered for a bound function.
    pub fn binding_expr(&self, shape: CallShape, symbol: &str) -> String {
        let class = &self.class_name;
        match shape {
            CallShape::DirectPrimitive => format!("&{class}::{symbol}"),
            CallShape::WrappedSingle => format!("{}(&{class}::{symbol})", self.single_adapter),
            CallShape::WrappedVariadic => format!(
                "{}(&{class}::{symbol}{})",
                self.variadic_adapter, self.variadic_suffix
            ),
        }
    }

    pub fn enum_comment(&self, enum_name: &str) -> String {
        match self.enum_comment {
            CommentStyle::Line => format!("// {enum_name}"),
            CommentStyle::Block => format!("/* {enum_name} */"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_profile_conventions() {
        let p = Profile::internal();
        assert_eq!(p.binding_expr(CallShape::DirectPrimitive, "sin"), "&UtilityFunctions::sin");
        assert_eq!(p.binding_expr(CallShape::WrappedSingle, "floor"), "wrap_function(&UtilityFunctions::floor)");
        assert_eq!(p.binding_expr(CallShape::WrappedVariadic, "print"), "wrap_function(&UtilityFunctions::print_internal)");
        assert_eq!(p.enum_comment("Side"), "// Side");
    }

    #[test]
    fn variadic_profile_conventions() {
        let p = Profile::variadic().with_class("godot::UtilityFunctions");
        assert_eq!(
            p.binding_expr(CallShape::WrappedVariadic, "print"),
            "wrap_variadic_function(&godot::UtilityFunctions::print)"
        );
        assert_eq!(p.enum_comment("Side"), "/* Side */");
    }

    #[test]
    fn named_matches_constructors() {
        assert_eq!(Profile::named(ProfileName::Internal), Profile::internal());
        assert_eq!(Profile::named(ProfileName::Variadic), Profile::variadic());
    }
}
