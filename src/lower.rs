use tracing::{debug, info};

use crate::classify::classify;
use crate::ir::{BindingDecision, RegistrationStatement};
use crate::policy::ResolutionPolicy;
use crate::schema::ApiDescription;

/// Resolve and classify every utility function, in schema order.
pub fn lower_functions(api: &ApiDescription, policy: &dyn ResolutionPolicy) -> Vec<RegistrationStatement> {
    let mut out = Vec::with_capacity(api.utility_functions.len());
    let mut excluded = 0usize;
    for f in &api.utility_functions {
        match policy.resolve(f) {
            BindingDecision::Exclude => {
                debug!(name = %f.name, policy = policy.describe(), "excluded");
                excluded += 1;
            }
            BindingDecision::Bind(target_symbol) => {
                let shape = classify(f);
                debug!(name = %f.name, symbol = %target_symbol, ?shape, "bound");
                out.push(RegistrationStatement::Function {
                    name: f.name.clone(),
                    shape,
                    target_symbol,
                });
            }
        }
    }
    info!(
        policy = policy.describe(),
        bound = out.len(),
        excluded,
        "resolved utility functions"
    );
    out
}

/// Every enum value, unconditionally, each enum led by its comment marker.
pub fn lower_enums(api: &ApiDescription) -> Vec<RegistrationStatement> {
    let total = api.global_enums.iter().map(|e| e.values.len() + 1).sum();
    let mut out = Vec::with_capacity(total);
    for e in &api.global_enums {
        out.push(RegistrationStatement::EnumComment { enum_name: e.name.clone() });
        for v in &e.values {
            out.push(RegistrationStatement::EnumValue {
                name: v.name.clone(),
                value: v.value,
                enum_name: e.name.clone(),
            });
        }
    }
    info!(enums = api.global_enums.len(), values = total - api.global_enums.len(), "collected global enums");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::CallShape;
    use crate::policy::{ExplicitMapPolicy, ReferenceTextPolicy};
    use crate::schema::load_api;

    const API: &str = r#"{
        "utility_functions": [
            {"name": "typeof", "return_type": "int", "is_vararg": false,
             "arguments": [{"name": "variable", "type": "Variant"}]},
            {"name": "foo", "return_type": "int", "is_vararg": false,
             "arguments": [{"name": "a", "type": "bool"}, {"name": "b", "type": "int"}]},
            {"name": "str", "return_type": "String", "is_vararg": true},
            {"name": "get_stack", "return_type": "Array", "is_vararg": false}
        ],
        "global_enums": [
            {"name": "Side", "values": [{"name": "SIDE_LEFT", "value": 0}, {"name": "SIDE_RIGHT", "value": 1}]},
            {"name": "Corner", "values": [{"name": "CORNER_TOP_LEFT", "value": 0}]}
        ]
    }"#;

    #[test]
    fn explicit_map_lowering() {
        let api = load_api(API.as_bytes()).unwrap();
        let policy = ExplicitMapPolicy::from_json(br#"{"typeof": null, "foo": "foo_impl"}"#).unwrap();
        let stmts = lower_functions(&api, &policy);
        assert_eq!(
            stmts,
            vec![RegistrationStatement::Function {
                name: "foo".into(),
                shape: CallShape::DirectPrimitive,
                target_symbol: "foo_impl".into(),
            }]
        );
    }

    #[test]
    fn reference_text_lowering_keeps_schema_order() {
        let api = load_api(API.as_bytes()).unwrap();
        let policy = ReferenceTextPolicy::new("static String str_internal(...); static int foo(bool, int);");
        let names: Vec<_> = lower_functions(&api, &policy)
            .into_iter()
            .map(|s| match s {
                RegistrationStatement::Function { name, shape, .. } => (name, shape),
                other => panic!("unexpected statement: {other:?}"),
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("foo".to_string(), CallShape::DirectPrimitive),
                ("str".to_string(), CallShape::WrappedVariadic),
            ]
        );
    }

    #[test]
    fn enums_lead_with_comment_and_keep_order() {
        let api = load_api(API.as_bytes()).unwrap();
        let stmts = lower_enums(&api);
        assert_eq!(stmts.len(), 5);
        assert_eq!(stmts[0], RegistrationStatement::EnumComment { enum_name: "Side".into() });
        assert_eq!(
            stmts[1],
            RegistrationStatement::EnumValue { name: "SIDE_LEFT".into(), value: 0, enum_name: "Side".into() }
        );
        assert_eq!(
            stmts[2],
            RegistrationStatement::EnumValue { name: "SIDE_RIGHT".into(), value: 1, enum_name: "Side".into() }
        );
        assert_eq!(stmts[3], RegistrationStatement::EnumComment { enum_name: "Corner".into() });
    }
}
