//! Validators for the object keywords: `dependencies`, `maxProperties`,
//! `minProperties`, `required`, `properties`, `patternProperties`,
//! `additionalProperties` and `propertyNames`.
use crate::{
    error::ValidationError,
    paths::InstancePath,
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
    let item = if let Value::Object(item) = instance {
        item
    } else {
        return;
    };
    if let Some(dependencies) = object.get("dependencies") {
        match dependencies {
            Value::Object(entries) => {
                for (key, dependency) in entries {
                    if !item.contains_key(key) {
                        continue;
                    }
                    match dependency {
                        // A list of property names stands for a `required` clause
                        Value::Array(required) => {
                            for property in required {
                                match property.as_str() {
                                    Some(property) => {
                                        if !item.contains_key(property) {
                                            errors.push(ValidationError::required(
                                                dependency,
                                                instance_path.into(),
                                                instance,
                                                property.to_string(),
                                            ));
                                        }
                                    }
                                    None => errors.push(ValidationError::schema(
                                        dependency,
                                        instance_path.into(),
                                        instance,
                                    )),
                                }
                            }
                        }
                        _ => errors.extend(validator::validate_node(
                            scope,
                            dependency,
                            instance,
                            instance_path,
                            context,
                        )),
                    }
                }
            }
            _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    if let Some(limit) = object.get("maxProperties") {
        match limit.as_u64() {
            Some(limit_value) => {
                if item.len() as u64 > limit_value {
                    errors.push(ValidationError::max_properties(
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
    if let Some(limit) = object.get("minProperties") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (item.len() as u64) < limit_value {
                    errors.push(ValidationError::min_properties(
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
    if let Some(required) = object.get("required") {
        match required {
            Value::Array(entries) => {
                for property in entries {
                    match property.as_str() {
                        Some(property) => {
                            if !item.contains_key(property) {
                                errors.push(ValidationError::required(
                                    node,
                                    instance_path.into(),
                                    instance,
                                    property.to_string(),
                                ));
                            }
                        }
                        None => errors.push(ValidationError::schema(
                            node,
                            instance_path.into(),
                            instance,
                        )),
                    }
                }
            }
            _ => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    let properties = match object.get("properties") {
        Some(Value::Object(properties)) => Some(properties),
        Some(_) => {
            errors.push(ValidationError::schema(node, instance_path.into(), instance));
            None
        }
        None => None,
    };
    let mut patterns = Vec::new();
    match object.get("patternProperties") {
        Some(Value::Object(pattern_properties)) => {
            for (pattern, subschema) in pattern_properties {
                match scope.pattern(pattern) {
                    Ok(compiled) => patterns.push((compiled, subschema)),
                    Err(_) => errors.push(ValidationError::schema(
                        subschema,
                        instance_path.into(),
                        instance,
                    )),
                }
            }
        }
        Some(_) => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        None => {}
    }
    let additional = object.get("additionalProperties");
    let property_names = if scope.draft().supports_keyword("propertyNames") {
        object.get("propertyNames")
    } else {
        None
    };
    for (key, value) in item {
        if let Some(names_schema) = property_names {
            // The property name is validated as a string instance at the
            // location of the object itself
            let name = Value::String(key.clone());
            let name_errors =
                validator::validate_node(scope, names_schema, &name, instance_path, context);
            for error in name_errors {
                errors.push(error.into_owned());
            }
        }
        let mut matched = false;
        let key_path = instance_path.push(key.as_str());
        if let Some(properties) = properties {
            if let Some(subschema) = properties.get(key) {
                matched = true;
                errors.extend(validator::validate_node(
                    scope, subschema, value, &key_path, context,
                ));
            }
        }
        for (compiled, subschema) in &patterns {
            if compiled.is_match(key).unwrap_or(false) {
                matched = true;
                errors.extend(validator::validate_node(
                    scope, *subschema, value, &key_path, context,
                ));
            }
        }
        if !matched {
            if let Some(additional) = additional {
                errors.extend(validator::validate_node(
                    scope, additional, value, &key_path, context,
                ));
            }
        }
    }
}

pub(crate) fn is_valid(
    scope: &Schema<'_>,
    object: &Map<String, Value>,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    let item = if let Value::Object(item) = instance {
        item
    } else {
        return false;
    };
    if let Some(dependencies) = object.get("dependencies") {
        match dependencies {
            Value::Object(entries) => {
                for (key, dependency) in entries {
                    if !item.contains_key(key) {
                        continue;
                    }
                    match dependency {
                        Value::Array(required) => {
                            for property in required {
                                match property.as_str() {
                                    Some(property) => {
                                        if !item.contains_key(property) {
                                            return false;
                                        }
                                    }
                                    None => return false,
                                }
                            }
                        }
                        _ => {
                            if !validator::is_valid_node(scope, dependency, instance, context) {
                                return false;
                            }
                        }
                    }
                }
            }
            _ => return false,
        }
    }
    if let Some(limit) = object.get("maxProperties") {
        match limit.as_u64() {
            Some(limit_value) => {
                if item.len() as u64 > limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(limit) = object.get("minProperties") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (item.len() as u64) < limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(required) = object.get("required") {
        match required {
            Value::Array(entries) => {
                for property in entries {
                    match property.as_str() {
                        Some(property) => {
                            if !item.contains_key(property) {
                                return false;
                            }
                        }
                        None => return false,
                    }
                }
            }
            _ => return false,
        }
    }
    let properties = match object.get("properties") {
        Some(Value::Object(properties)) => Some(properties),
        Some(_) => return false,
        None => None,
    };
    let mut patterns = Vec::new();
    match object.get("patternProperties") {
        Some(Value::Object(pattern_properties)) => {
            for (pattern, subschema) in pattern_properties {
                match scope.pattern(pattern) {
                    Ok(compiled) => patterns.push((compiled, subschema)),
                    Err(_) => return false,
                }
            }
        }
        Some(_) => return false,
        None => {}
    }
    let additional = object.get("additionalProperties");
    let property_names = if scope.draft().supports_keyword("propertyNames") {
        object.get("propertyNames")
    } else {
        None
    };
    for (key, value) in item {
        if let Some(names_schema) = property_names {
            let name = Value::String(key.clone());
            if !validator::is_valid_node(scope, names_schema, &name, context) {
                return false;
            }
        }
        let mut matched = false;
        if let Some(properties) = properties {
            if let Some(subschema) = properties.get(key) {
                matched = true;
                if !validator::is_valid_node(scope, subschema, value, context) {
                    return false;
                }
            }
        }
        for (compiled, subschema) in &patterns {
            if compiled.is_match(key).unwrap_or(false) {
                matched = true;
                if !validator::is_valid_node(scope, *subschema, value, context) {
                    return false;
                }
            }
        }
        if !matched {
            if let Some(additional) = additional {
                if !validator::is_valid_node(scope, additional, value, context) {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::{error::ValidationErrorKind, tests_util, Schema};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"maxProperties": 1}), &json!({"a": 1}))]
    #[test_case(&json!({"minProperties": 1}), &json!({"a": 1}))]
    #[test_case(&json!({"required": ["a"]}), &json!({"a": null}))]
    #[test_case(&json!({"properties": {"a": {"type": "integer"}}}), &json!({"a": 1, "b": "x"}))]
    #[test_case(&json!({"patternProperties": {"^f": {"type": "integer"}}}), &json!({"foo": 1, "bar": "x"}))]
    #[test_case(&json!({"additionalProperties": false, "properties": {"a": {}}}), &json!({"a": 1}))]
    #[test_case(&json!({"propertyNames": {"maxLength": 3}}), &json!({"abc": 1}))]
    #[test_case(&json!({"dependencies": {"a": ["b"]}}), &json!({"a": 1, "b": 2}))]
    #[test_case(&json!({"dependencies": {"a": ["b"]}}), &json!({"c": 1}); "absent trigger key")]
    #[test_case(&json!({"dependencies": {"a": {"minProperties": 2}}}), &json!({"a": 1, "b": 2}))]
    #[test_case(&json!({"required": ["a"]}), &json!([1]); "non-objects are unconstrained")]
    fn object_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"maxProperties": 1}), &json!({"a": 1, "b": 2}))]
    #[test_case(&json!({"minProperties": 2}), &json!({"a": 1}))]
    #[test_case(&json!({"required": ["a"]}), &json!({"b": 1}))]
    #[test_case(&json!({"properties": {"a": {"type": "integer"}}}), &json!({"a": "x"}))]
    #[test_case(&json!({"patternProperties": {"^f": {"type": "integer"}}}), &json!({"foo": "x"}))]
    #[test_case(&json!({"additionalProperties": false, "properties": {"a": {}}}), &json!({"a": 1, "b": 2}))]
    #[test_case(&json!({"additionalProperties": {"type": "string"}}), &json!({"a": 1}))]
    #[test_case(&json!({"propertyNames": {"maxLength": 2}}), &json!({"abc": 1}))]
    #[test_case(&json!({"propertyNames": false}), &json!({"a": 1}))]
    #[test_case(&json!({"dependencies": {"a": ["b"]}}), &json!({"a": 1}))]
    #[test_case(&json!({"dependencies": {"a": {"minProperties": 2}}}), &json!({"a": 1}))]
    fn object_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn required_reports_every_missing_property() {
        let schema = json!({"required": ["foo", "bar"]});
        let instance = json!({});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), r#""foo" is a required property"#);
        assert_eq!(errors[1].to_string(), r#""bar" is a required property"#);
    }

    #[test]
    fn property_errors_carry_the_key() {
        let schema = json!({"properties": {"foo": {"type": "integer"}}});
        let instance = json!({"foo": "x"});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors[0].instance_path.to_string(), "/foo");
    }

    #[test]
    fn property_keys_are_escaped_in_pointers() {
        let schema = json!({"additionalProperties": {"type": "string"}});
        let instance = json!({"a/b": 1});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors[0].instance_path.to_string(), "/a~1b");
    }

    #[test]
    fn matched_properties_are_not_additional() {
        // `three` fails `additionalProperties`, everything else is covered by
        // `properties`, `patternProperties` or the dependency clauses
        let schema = json!({
            "properties": {
                "one": {"type": "string", "maxLength": 5, "minLength": 3, "pattern": "\\w+"},
                "two": {"type": "integer", "minimum": 10, "maximum": 100, "multipleOf": 5}
            },
            "required": ["one"],
            "additionalProperties": {"type": "string"},
            "propertyNames": {"pattern": "\\w+"},
            "dependencies": {"one": ["two"], "two": {"minProperties": 1}}
        });
        let instance = json!({"one": "value", "two": 100, "three": [1, 2], "123": "x"});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0].kind,
            ValidationErrorKind::Type { .. }
        ));
        assert_eq!(errors[0].instance_path.to_string(), "/three");
        assert!(!compiled.is_valid(&instance));
    }

    #[test]
    fn property_names_receive_the_key_as_instance() {
        let schema = json!({"propertyNames": {"pattern": "^a"}});
        let instance = json!({"b": 1});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(*errors[0].instance, json!("b"));
    }

    #[test]
    fn property_names_are_unknown_to_draft4() {
        let schema = json!({"propertyNames": {"maxLength": 1}});
        let compiled = Schema::draft4(&schema).unwrap();
        assert!(compiled.is_valid(&json!({"long-key": 1})));
    }
}
