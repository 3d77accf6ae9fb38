use crate::ir::CallShape;
use crate::schema::UtilityFunction;

/// Types the scripting runtime represents natively on both sides of a call.
pub const PRIMITIVE_TYPES: [&str; 3] = ["bool", "int", "float"];

pub fn is_primitive(ty: &str) -> bool {
    PRIMITIVE_TYPES.contains(&ty)
}

/// Decide the binding strategy for a function that resolved to `Bind`.
///
/// Vararg wins over everything else. Otherwise the function binds directly
/// only when its return (if any) and every argument are primitive.
pub fn classify(f: &UtilityFunction) -> CallShape {
    if f.is_vararg {
        return CallShape::WrappedVariadic;
    }
    let ret_ok = f.return_type.as_deref().is_none_or(is_primitive);
    let args_ok = f.arguments.iter().all(|arg| is_primitive(&arg.ty));
    if ret_ok && args_ok {
        CallShape::DirectPrimitive
    } else {
        CallShape::WrappedSingle
    }
}
