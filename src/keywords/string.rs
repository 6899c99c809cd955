//! Validators for the string keywords: `maxLength`, `minLength`, `pattern`,
//! `contentEncoding` and `contentMediaType`.
use crate::{
    content_encoding, content_media_type, error::ValidationError, paths::InstancePath,
    schema::Schema,
};
use serde_json::{Map, Value};

pub(crate) fn validate<'a>(
    scope: &'a Schema<'_>,
    object: &'a Map<String, Value>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let item = if let Value::String(item) = instance {
        item
    } else {
        return;
    };
    if let Some(limit) = object.get("maxLength") {
        match limit.as_u64() {
            Some(limit_value) => {
                // Lengths are measured in code points, not bytes
                if item.chars().count() as u64 > limit_value {
                    errors.push(ValidationError::max_length(
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
    if let Some(limit) = object.get("minLength") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (item.chars().count() as u64) < limit_value {
                    errors.push(ValidationError::min_length(
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
    if let Some(pattern) = object.get("pattern") {
        match pattern.as_str() {
            Some(pattern_str) => match scope.pattern(pattern_str) {
                Ok(compiled) => match compiled.is_match(item) {
                    Ok(true) => {}
                    Ok(false) => errors.push(ValidationError::pattern(
                        node,
                        instance_path.into(),
                        instance,
                        pattern_str.to_string(),
                    )),
                    Err(error) => errors.push(ValidationError::backtrack_limit(
                        node,
                        instance_path.into(),
                        instance,
                        error,
                    )),
                },
                Err(_) => {
                    errors.push(ValidationError::schema(node, instance_path.into(), instance))
                }
            },
            None => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
    if scope.draft().supports_keyword("contentEncoding") {
        validate_content(object, node, item, instance, instance_path, errors);
    }
}

fn validate_content<'a>(
    object: &'a Map<String, Value>,
    node: &'a Value,
    item: &str,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let mut decoded = None;
    if let Some(encoding) = object.get("contentEncoding") {
        match encoding.as_str() {
            Some("base64") => match content_encoding::from_base64(item) {
                Ok(Some(value)) => decoded = Some(value),
                Ok(None) => {
                    errors.push(ValidationError::content_encoding(
                        node,
                        instance_path.into(),
                        instance,
                        "base64",
                    ));
                    return;
                }
                Err(error) => {
                    errors.push(ValidationError::from_utf8(
                        node,
                        instance_path.into(),
                        instance,
                        error,
                    ));
                    return;
                }
            },
            Some(other) => {
                errors.push(ValidationError::not_implemented(
                    node,
                    instance_path.into(),
                    instance,
                    format!("contentEncoding: {}", other),
                ));
                return;
            }
            None => {
                errors.push(ValidationError::schema(node, instance_path.into(), instance));
                return;
            }
        }
    }
    if let Some(media_type) = object.get("contentMediaType") {
        match media_type.as_str() {
            Some("application/json") => {
                let content = decoded.as_deref().unwrap_or(item);
                if !content_media_type::is_json(content) {
                    errors.push(ValidationError::content_media_type(
                        node,
                        instance_path.into(),
                        instance,
                        "application/json",
                    ));
                }
            }
            Some(other) => errors.push(ValidationError::not_implemented(
                node,
                instance_path.into(),
                instance,
                format!("contentMediaType: {}", other),
            )),
            None => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        }
    }
}

pub(crate) fn is_valid(scope: &Schema<'_>, object: &Map<String, Value>, instance: &Value) -> bool {
    let item = if let Value::String(item) = instance {
        item
    } else {
        return false;
    };
    if let Some(limit) = object.get("maxLength") {
        match limit.as_u64() {
            Some(limit_value) => {
                if item.chars().count() as u64 > limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(limit) = object.get("minLength") {
        match limit.as_u64() {
            Some(limit_value) => {
                if (item.chars().count() as u64) < limit_value {
                    return false;
                }
            }
            None => return false,
        }
    }
    if let Some(pattern) = object.get("pattern") {
        match pattern.as_str() {
            Some(pattern_str) => match scope.pattern(pattern_str) {
                Ok(compiled) => {
                    if !compiled.is_match(item).unwrap_or(false) {
                        return false;
                    }
                }
                Err(_) => return false,
            },
            None => return false,
        }
    }
    if scope.draft().supports_keyword("contentEncoding") {
        let mut decoded = None;
        if let Some(encoding) = object.get("contentEncoding") {
            match encoding.as_str() {
                Some("base64") => match content_encoding::from_base64(item) {
                    Ok(Some(value)) => decoded = Some(value),
                    Ok(None) | Err(_) => return false,
                },
                _ => return false,
            }
        }
        if let Some(media_type) = object.get("contentMediaType") {
            match media_type.as_str() {
                Some("application/json") => {
                    let content = decoded.as_deref().unwrap_or(item);
                    if !content_media_type::is_json(content) {
                        return false;
                    }
                }
                _ => return false,
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

    #[test_case(&json!({"maxLength": 2}), &json!("ab"))]
    #[test_case(&json!({"maxLength": 2}), &json!("пы"); "length is measured in code points")]
    #[test_case(&json!({"minLength": 2}), &json!("abc"))]
    #[test_case(&json!({"pattern": "ab+c"}), &json!("xabbbcx"); "matching is substring match")]
    #[test_case(&json!({"maxLength": 2}), &json!(12345); "non-strings are unbounded")]
    fn string_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"maxLength": 2}), &json!("abc"))]
    #[test_case(&json!({"minLength": 2}), &json!("a"))]
    #[test_case(&json!({"pattern": "^a*$"}), &json!("abc"))]
    fn string_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn uncompilable_pattern_is_a_schema_error() {
        let schema = json!({"pattern": "\\u"});
        let instance = json!("anything");
        let error = tests_util::validate(&schema, &instance);
        assert!(matches!(error.kind, ValidationErrorKind::Schema));
    }

    #[test_case(&json!({"contentEncoding": "base64"}), &json!("aGVsbG8="), true)]
    #[test_case(&json!({"contentEncoding": "base64"}), &json!("not base64!"), false)]
    #[test_case(&json!({"contentMediaType": "application/json"}), &json!("{\"a\": 1}"), true)]
    #[test_case(&json!({"contentMediaType": "application/json"}), &json!("{invalid"), false)]
    #[test_case(
        &json!({"contentEncoding": "base64", "contentMediaType": "application/json"}),
        &json!("eyJhIjogMX0="),
        true;
        "decoded content is checked against the media type"
    )]
    #[test_case(
        &json!({"contentEncoding": "base64", "contentMediaType": "application/json"}),
        &json!("aGVsbG8="),
        false;
        "decoded content is not JSON"
    )]
    fn content(schema: &Value, instance: &Value, expected: bool) {
        if expected {
            tests_util::is_valid(schema, instance)
        } else {
            tests_util::is_not_valid(schema, instance)
        }
    }

    #[test]
    fn unknown_content_encoding_is_not_implemented() {
        let schema = json!({"contentEncoding": "quoted-printable"});
        let instance = json!("anything");
        let error = tests_util::validate(&schema, &instance);
        assert!(matches!(
            error.kind,
            ValidationErrorKind::NotImplemented { .. }
        ));
    }

    #[test]
    fn content_keywords_are_unknown_to_draft4() {
        let schema = json!({"contentEncoding": "base64"});
        let compiled = Schema::draft4(&schema).unwrap();
        assert!(compiled.is_valid(&json!("not base64!")));
    }
}
