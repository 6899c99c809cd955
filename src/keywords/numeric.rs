//! Validators for the numeric keywords: `maximum`, `minimum`,
//! `exclusiveMaximum`, `exclusiveMinimum` and `multipleOf`.
use crate::{error::ValidationError, keywords::helpers, paths::InstancePath, schema::Schema};
use fraction::{BigFraction, BigUint};
use serde_json::{Map, Number, Value};

pub(crate) fn validate<'a>(
    scope: &'a Schema<'_>,
    object: &'a Map<String, Value>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let number = if let Value::Number(number) = instance {
        number
    } else {
        return;
    };
    if scope.draft().has_boolean_exclusive_bounds() {
        validate_legacy_bounds(object, node, number, instance, instance_path, errors);
    } else {
        if let Some(limit) = object.get("maximum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_gt(number, limit_number) {
                        errors.push(ValidationError::maximum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_number.as_f64().expect("Always valid"),
                        ));
                    }
                }
                _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
            }
        }
        if let Some(limit) = object.get("minimum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_lt(number, limit_number) {
                        errors.push(ValidationError::minimum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_number.as_f64().expect("Always valid"),
                        ));
                    }
                }
                _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
            }
        }
        if let Some(limit) = object.get("exclusiveMaximum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_ge(number, limit_number) {
                        errors.push(ValidationError::exclusive_maximum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_number.as_f64().expect("Always valid"),
                        ));
                    }
                }
                _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
            }
        }
        if let Some(limit) = object.get("exclusiveMinimum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_le(number, limit_number) {
                        errors.push(ValidationError::exclusive_minimum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_number.as_f64().expect("Always valid"),
                        ));
                    }
                }
                _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
            }
        }
    }
    if let Some(multiple_of) = object.get("multipleOf") {
        match multiple_of {
            Value::Number(multiple_of_number) => {
                let multiple_of_value = multiple_of_number.as_f64().expect("Always valid");
                let item = number.as_f64().expect("Always valid");
                if !is_multiple_of(item, multiple_of_value) {
                    errors.push(ValidationError::multiple_of(
                        node,
                        instance_path.into(),
                        instance,
                        multiple_of_value,
                    ));
                }
            }
            _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
}

// Draft 4 reads `exclusiveMaximum` / `exclusiveMinimum` as boolean modifiers
// of `maximum` / `minimum`
fn validate_legacy_bounds<'a>(
    object: &'a Map<String, Value>,
    node: &'a Value,
    number: &Number,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    if let Some(limit) = object.get("maximum") {
        match limit {
            Value::Number(limit_number) => {
                let limit_value = limit_number.as_f64().expect("Always valid");
                let exclusive = object
                    .get("exclusiveMaximum")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if exclusive {
                    if helpers::num_ge(number, limit_number) {
                        errors.push(ValidationError::exclusive_maximum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_value,
                        ));
                    }
                } else if helpers::num_gt(number, limit_number) {
                    errors.push(ValidationError::maximum(
                        node,
                        instance_path.into(),
                        instance,
                        limit_value,
                    ));
                }
            }
            _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    if let Some(limit) = object.get("minimum") {
        match limit {
            Value::Number(limit_number) => {
                let limit_value = limit_number.as_f64().expect("Always valid");
                let exclusive = object
                    .get("exclusiveMinimum")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if exclusive {
                    if helpers::num_le(number, limit_number) {
                        errors.push(ValidationError::exclusive_minimum(
                            node,
                            instance_path.into(),
                            instance,
                            limit_value,
                        ));
                    }
                } else if helpers::num_lt(number, limit_number) {
                    errors.push(ValidationError::minimum(
                        node,
                        instance_path.into(),
                        instance,
                        limit_value,
                    ));
                }
            }
            _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
}

/// Exactness is decided by `f64` division where it is conclusive, with an
/// exact fraction fallback where it degenerates.
pub(crate) fn is_multiple_of(item: f64, multiple_of: f64) -> bool {
    if multiple_of.fract() == 0. && item.fract() == 0. {
        return (item % multiple_of) == 0.;
    }
    let remainder = (item / multiple_of) % 1.;
    if remainder.is_nan() {
        // Involves heap allocations via the underlying `BigUint` type
        let fraction = BigFraction::from(item) / BigFraction::from(multiple_of);
        if let Some(denom) = fraction.denom() {
            denom == &BigUint::from(1_u8)
        } else {
            false
        }
    } else {
        remainder < f64::EPSILON && remainder < (1. - f64::EPSILON)
    }
}

pub(crate) fn is_valid(scope: &Schema<'_>, object: &Map<String, Value>, instance: &Value) -> bool {
    let number = if let Value::Number(number) = instance {
        number
    } else {
        return false;
    };
    if scope.draft().has_boolean_exclusive_bounds() {
        if let Some(limit) = object.get("maximum") {
            match limit {
                Value::Number(limit_number) => {
                    let exclusive = object
                        .get("exclusiveMaximum")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    if exclusive {
                        if helpers::num_ge(number, limit_number) {
                            return false;
                        }
                    } else if helpers::num_gt(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        if let Some(limit) = object.get("minimum") {
            match limit {
                Value::Number(limit_number) => {
                    let exclusive = object
                        .get("exclusiveMinimum")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    if exclusive {
                        if helpers::num_le(number, limit_number) {
                            return false;
                        }
                    } else if helpers::num_lt(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    } else {
        if let Some(limit) = object.get("maximum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_gt(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        if let Some(limit) = object.get("minimum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_lt(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        if let Some(limit) = object.get("exclusiveMaximum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_ge(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        if let Some(limit) = object.get("exclusiveMinimum") {
            match limit {
                Value::Number(limit_number) => {
                    if helpers::num_le(number, limit_number) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
    if let Some(multiple_of) = object.get("multipleOf") {
        match multiple_of {
            Value::Number(multiple_of_number) => {
                let multiple_of_value = multiple_of_number.as_f64().expect("Always valid");
                let item = number.as_f64().expect("Always valid");
                if !is_multiple_of(item, multiple_of_value) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, Draft, Schema};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"maximum": 5}), &json!(5))]
    #[test_case(&json!({"maximum": 5}), &json!(4.999))]
    #[test_case(&json!({"minimum": 5}), &json!(5))]
    #[test_case(&json!({"exclusiveMaximum": 5}), &json!(4.999))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!(5.001))]
    #[test_case(&json!({"multipleOf": 2}), &json!(10))]
    #[test_case(&json!({"multipleOf": 2.5}), &json!(10))]
    #[test_case(&json!({"multipleOf": 0.25}), &json!(7.5))]
    #[test_case(&json!({"maximum": 10}), &json!("not a number"); "non-numbers are not bounded")]
    fn numeric_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"maximum": 5}), &json!(5.001))]
    #[test_case(&json!({"minimum": 5}), &json!(4))]
    #[test_case(&json!({"exclusiveMaximum": 5}), &json!(5))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!(5))]
    #[test_case(&json!({"multipleOf": 3}), &json!(10))]
    #[test_case(&json!({"multipleOf": 0.0001}), &json!(0.00751))]
    fn numeric_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test_case(&json!(4), true)]
    #[test_case(&json!(5), false; "draft 4 boolean pair makes the bound strict")]
    fn draft4_exclusive_maximum(instance: &Value, expected: bool) {
        let schema = json!({"maximum": 5, "exclusiveMaximum": true});
        let compiled = Schema::options()
            .with_draft(Draft::Draft4)
            .build(&schema)
            .unwrap();
        assert_eq!(compiled.is_valid(instance), expected);
        assert_eq!(compiled.validate(instance).is_ok(), expected);
    }

    #[test]
    fn standalone_exclusive_bound_is_inert_in_draft4() {
        let schema = json!({"exclusiveMaximum": 5});
        let compiled = Schema::draft4(&schema).unwrap();
        assert!(compiled.is_valid(&json!(100)));
    }

    #[test]
    fn error_messages() {
        let schema = json!({"maximum": 3.0});
        let instance = json!(3.5);
        let error = tests_util::validate(&schema, &instance);
        assert_eq!(error.to_string(), "3.5 is greater than the maximum of 3");
        let schema = json!({"multipleOf": 2});
        let instance = json!(7);
        let error = tests_util::validate(&schema, &instance);
        assert_eq!(error.to_string(), "7 is not a multiple of 2");
    }
}
