// Renderable registration units. Built fresh per run, never mutated after.

/// Outcome of a resolution policy for one utility function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingDecision {
    /// expose under this implementation symbol
    Bind(String),
    Exclude,
}

/// How a bound function crosses into the scripting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// every value crossing the boundary is a runtime scalar; bind the symbol as is
    DirectPrimitive,
    /// non-scalar argument or return; goes through the single-call adapter
    WrappedSingle,
    /// variable arity; goes through the variadic adapter
    WrappedVariadic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatement {
    Function {
        name: String,
        shape: CallShape,
        target_symbol: String,
    },
    /// leading marker naming the enum its following values belong to
    EnumComment { enum_name: String },
    EnumValue {
        name: String,
        value: i64,
        enum_name: String,
    },
}
