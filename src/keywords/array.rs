//! Validators for the array keywords: `maxItems`, `minItems`, `uniqueItems`,
//! `contains`, `items` and `additionalItems`.
use crate::{
    error::{Branch, Subschemas, ValidationError},
    keywords::unique_items,
    paths::{InstancePath, JSONPointer},
    schema::Schema,
    validator::{self, EvalContext},
};
use serde_json::{Map, Value};

pub(crate) fn validate<'a>(
    scope: &'a Schema<'_>,
    object: &'a Map<String, Value>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let items_value = if let Value::Array(items) = instance {
        items
    } else {
        return;
    };
    if let Some(limit) = object.get("maxItems") {
        match limit.as_u64() {
            Some(limit_value) => {
                if items_value.len() as u64 > limit_value {
                    errors.push(ValidationError::max_items(
                        node,
                        instance_path.into(),
                        instance,
                        limit_value,
                    ));
                }
            }
            None => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    if let Some(limit) = object.get("minItems") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (items_value.len() as u64) < limit_value {
                    errors.push(ValidationError::min_items(
                        node,
                        instance_path.into(),
                        instance,
                        limit_value,
                    ));
                }
            }
            None => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    if let Some(Value::Bool(true)) = object.get("uniqueItems") {
        if !unique_items::is_unique(items_value) {
            errors.push(ValidationError::unique_items(
                node,
                instance_path.into(),
                instance,
            ));
        }
    }
    if scope.draft().supports_keyword("contains") {
        if let Some(contained) = object.get("contains") {
            if !items_value
                .iter()
                .any(|item| validator::is_valid_node(scope, contained, item, context))
            {
                let branches = items_value
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        let item_path = instance_path.push(idx);
                        Branch {
                            schema: contained,
                            instance: item,
                            instance_path: JSONPointer::from(&item_path),
                        }
                    })
                    .collect();
                errors.push(ValidationError::contains(
                    node,
                    instance_path.into(),
                    instance,
                    Subschemas::deferred(scope, context.scope(), context.depth(), branches),
                ));
            }
        }
    }
    match object.get("items") {
        Some(Value::Array(subschemas)) => {
            // Positional validation; elements beyond the tuple fall to `additionalItems`
            for (idx, item) in items_value.iter().enumerate() {
                let item_path = instance_path.push(idx);
                if let Some(subschema) = subschemas.get(idx) {
                    errors.extend(validator::validate_node(
                        scope, subschema, item, &item_path, context,
                    ));
                } else if let Some(additional) = object.get("additionalItems") {
                    errors.extend(validator::validate_node(
                        scope, additional, item, &item_path, context,
                    ));
                }
            }
        }
        Some(subschema) => {
            for (idx, item) in items_value.iter().enumerate() {
                let item_path = instance_path.push(idx);
                errors.extend(validator::validate_node(
                    scope, subschema, item, &item_path, context,
                ));
            }
        }
        None => {}
    }
}

pub(crate) fn is_valid(
    scope: &Schema<'_>,
    object: &Map<String, Value>,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    let items_value = if let Value::Array(items) = instance {
        items
    } else {
        return false;
    };
    if let Some(limit) = object.get("maxItems") {
        match limit.as_u64() {
            Some(limit_value) => {
                if items_value.len() as u64 > limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(limit) = object.get("minItems") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (items_value.len() as u64) < limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(Value::Bool(true)) = object.get("uniqueItems") {
        if !unique_items::is_unique(items_value) {
            return false;
        }
    }
    if scope.draft().supports_keyword("contains") {
        if let Some(contained) = object.get("contains") {
            if !items_value
                .iter()
                .any(|item| validator::is_valid_node(scope, contained, item, context))
            {
                return false;
            }
        }
    }
    match object.get("items") {
        Some(Value::Array(subschemas)) => {
            for (idx, item) in items_value.iter().enumerate() {
                let valid = if let Some(subschema) = subschemas.get(idx) {
                    validator::is_valid_node(scope, subschema, item, context)
                } else if let Some(additional) = object.get("additionalItems") {
                    validator::is_valid_node(scope, additional, item, context)
                } else {
                    true
                };
                if !valid {
                    return false;
                }
            }
        }
        Some(subschema) => {
            if !items_value
                .iter()
                .all(|item| validator::is_valid_node(scope, subschema, item, context))
            {
                return false;
            }
        }
        None => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::{error::ValidationErrorKind, tests_util, Schema};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"maxItems": 2}), &json!([1, 2]))]
    #[test_case(&json!({"minItems": 1}), &json!([1]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 2, "1"]))]
    #[test_case(&json!({"uniqueItems": false}), &json!([1, 1]))]
    #[test_case(&json!({"contains": {"minimum": 5}}), &json!([2, 7]))]
    #[test_case(&json!({"items": {"type": "integer"}}), &json!([1, 2, 3]))]
    #[test_case(&json!({"items": [{"type": "integer"}, {"type": "string"}]}), &json!([1, "a", true]); "elements beyond the tuple are unconstrained")]
    #[test_case(&json!({"items": [{}], "additionalItems": {"type": "integer"}}), &json!(["a", 2, 3]))]
    #[test_case(&json!({"minItems": 1}), &json!("ab"); "non-arrays are unconstrained")]
    fn array_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"maxItems": 2}), &json!([1, 2, 3]))]
    #[test_case(&json!({"minItems": 1}), &json!([]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1.0]); "numerically equal items are duplicates")]
    #[test_case(&json!({"uniqueItems": true}), &json!([{"a": 1}, {"a": 1}]))]
    #[test_case(&json!({"contains": {"minimum": 5}}), &json!([2, 3, 4]))]
    #[test_case(&json!({"contains": {"minimum": 5}}), &json!([]); "nothing is contained in an empty array")]
    #[test_case(&json!({"items": {"type": "integer"}}), &json!([1, "a"]))]
    #[test_case(&json!({"items": [{}], "additionalItems": {"type": "integer"}}), &json!([null, 2, "foo"]))]
    #[test_case(&json!({"items": [{}, {}, {}], "additionalItems": false}), &json!([1, 2, 3, 4]))]
    fn array_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn element_errors_carry_their_index() {
        let schema = json!({"items": {"type": "integer"}});
        let instance = json!([1, "a", 3.5]);
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].instance_path.to_string(), "/1");
        assert_eq!(errors[1].instance_path.to_string(), "/2");
    }

    #[test]
    fn contains_error_has_per_element_branches() {
        let schema = json!({"contains": {"minimum": 5}});
        let instance = json!([2, 3]);
        let compiled = Schema::new(&schema).unwrap();
        let mut errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 1);
        let error = errors.pop().unwrap();
        assert!(matches!(error.kind, ValidationErrorKind::Contains));
        let branches = error.subschemas.expect("A composite error").into_errors();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0][0].instance_path.to_string(), "/0");
        assert_eq!(branches[1][0].instance_path.to_string(), "/1");
    }

    #[test]
    fn contains_is_unknown_to_draft4() {
        let schema = json!({"contains": {"minimum": 5}});
        let compiled = Schema::draft4(&schema).unwrap();
        assert!(compiled.is_valid(&json!([1])));
    }
}
