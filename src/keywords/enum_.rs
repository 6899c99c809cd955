//! Validators for the `enum` and `const` keywords.
use crate::{error::ValidationError, keywords::helpers, paths::InstancePath};
use serde_json::Value;

pub(crate) fn validate_enum<'a>(
    node: &'a Value,
    options: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    if let Value::Array(items) = options {
        if !items.iter().any(|expected| helpers::equal(instance, expected)) {
            errors.push(ValidationError::enumeration(
                node,
                instance_path.into(),
                instance,
                options,
            ));
        }
    } else {
        errors.push(ValidationError::schema(node, instance_path.into(), instance));
    }
}

pub(crate) fn is_valid_enum(options: &Value, instance: &Value) -> bool {
    if let Value::Array(items) = options {
        items.iter().any(|expected| helpers::equal(instance, expected))
    } else {
        false
    }
}

pub(crate) fn validate_const<'a>(
    node: &'a Value,
    expected: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    if !helpers::equal(instance, expected) {
        errors.push(ValidationError::constant(
            node,
            instance_path.into(),
            instance,
            expected,
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    // enum: Number
    #[test_case(&json!({"enum": [0.0]}), &json!(0))]
    // enum: Array
    #[test_case(&json!({"enum": [[1.0]]}), &json!([1]))]
    // enum: Object
    #[test_case(&json!({"enum": [{"a": 1.0}]}), &json!({"a": 1}))]
    // const: Number
    #[test_case(&json!({"const": 0.0}), &json!(0))]
    // const: Object in Array
    #[test_case(&json!({"const": [{"b": 1.0}]}), &json!([{"b": 1}]))]
    // const: Array in Object
    #[test_case(&json!({"const": {"c": [1.0]}}), &json!({"c": [1]}))]
    fn numeric_equivalence(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"enum": [1, 2, 3]}), &json!(4))]
    #[test_case(&json!({"enum": []}), &json!(null))]
    #[test_case(&json!({"const": 2}), &json!(5))]
    fn rejected(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn const_is_unknown_to_draft4() {
        let schema = json!({"const": 2});
        let compiled = crate::Schema::draft4(&schema).unwrap();
        assert!(compiled.is_valid(&json!(5)));
    }

    #[test]
    fn error_message() {
        let schema = json!({"enum": [1, 2, 3]});
        let instance = json!(4);
        let error = tests_util::validate(&schema, &instance);
        assert_eq!(error.to_string(), "4 is not one of [1,2,3]");
    }
}
