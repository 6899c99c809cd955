//! Dispatch of user-defined keywords.
use crate::{
    error::ValidationError,
    options::KeywordResult,
    paths::{InstancePath, JSONPointer},
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
    for (keyword, subschema) in object {
        if let Some(check) = scope.config().keyword(keyword) {
            let pointer: JSONPointer = instance_path.into();
            match check.as_ref()(instance, subschema, &pointer) {
                KeywordResult::Valid => {}
                KeywordResult::Invalid => {
                    errors.push(ValidationError::custom(
                        keyword.clone(),
                        pointer,
                        instance,
                        node,
                    ));
                }
                KeywordResult::Errors(keyword_errors) => {
                    for error in keyword_errors {
                        errors.push(error);
                    }
                }
            }
        }
    }
}

pub(crate) fn is_valid(scope: &Schema<'_>, object: &Map<String, Value>, instance: &Value) -> bool {
    for (keyword, subschema) in object {
        if let Some(check) = scope.config().keyword(keyword) {
            // The boolean mode does not track the instance location
            match check.as_ref()(instance, subschema, &JSONPointer::default()) {
                KeywordResult::Valid => {}
                KeywordResult::Invalid => return false,
                KeywordResult::Errors(keyword_errors) => {
                    if !keyword_errors.is_empty() {
                        return false;
                    }
                }
            }
        }
    }
    true
}
