//! Validators for the logical keywords: `allOf`, `anyOf`, `oneOf`, `not`
//! and `if`/`then`/`else`.
use crate::{
    error::{Branch, Subschemas, ValidationError},
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
    if let Some(all_of) = object.get("allOf") {
        if let Value::Array(branches) = all_of {
            if branches
                .iter()
                .any(|branch| !validator::is_valid_node(scope, branch, instance, context))
            {
                errors.push(ValidationError::all_of(
                    node,
                    instance_path.into(),
                    instance,
                    defer(scope, branches, instance, instance_path, context),
                ));
            }
        } else {
            errors.push(ValidationError::schema(node, instance_path.into(), instance));
        }
    }
    if let Some(any_of) = object.get("anyOf") {
        if let Value::Array(branches) = any_of {
            if !branches
                .iter()
                .any(|branch| validator::is_valid_node(scope, branch, instance, context))
            {
                errors.push(ValidationError::any_of(
                    node,
                    instance_path.into(),
                    instance,
                    defer(scope, branches, instance, instance_path, context),
                ));
            }
        } else {
            errors.push(ValidationError::schema(node, instance_path.into(), instance));
        }
    }
    if let Some(one_of) = object.get("oneOf") {
        if let Value::Array(branches) = one_of {
            let matches = branches
                .iter()
                .filter(|branch| validator::is_valid_node(scope, branch, instance, context))
                .count();
            if matches != 1 {
                errors.push(ValidationError::one_of(
                    node,
                    instance_path.into(),
                    instance,
                    defer(scope, branches, instance, instance_path, context),
                ));
            }
        } else {
            errors.push(ValidationError::schema(node, instance_path.into(), instance));
        }
    }
    if let Some(subschema) = object.get("not") {
        if validator::is_valid_node(scope, subschema, instance, context) {
            errors.push(ValidationError::not(
                subschema,
                instance_path.into(),
                instance,
            ));
        }
    }
    if scope.draft().supports_keyword("if") {
        if let Some(if_schema) = object.get("if") {
            // Failures of `if` itself are not user-visible
            if validator::is_valid_node(scope, if_schema, instance, context) {
                if let Some(then_schema) = object.get("then") {
                    errors.extend(validator::validate_node(
                        scope,
                        then_schema,
                        instance,
                        instance_path,
                        context,
                    ));
                }
            } else if let Some(else_schema) = object.get("else") {
                errors.extend(validator::validate_node(
                    scope,
                    else_schema,
                    instance,
                    instance_path,
                    context,
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
    if let Some(all_of) = object.get("allOf") {
        match all_of {
            Value::Array(branches) => {
                if !branches
                    .iter()
                    .all(|branch| validator::is_valid_node(scope, branch, instance, context))
                {
                    return false;
                }
            }
            _ => return false,
        }
    }
    if let Some(any_of) = object.get("anyOf") {
        match any_of {
            Value::Array(branches) => {
                if !branches
                    .iter()
                    .any(|branch| validator::is_valid_node(scope, branch, instance, context))
                {
                    return false;
                }
            }
            _ => return false,
        }
    }
    if let Some(one_of) = object.get("oneOf") {
        match one_of {
            Value::Array(branches) => {
                let matches = branches
                    .iter()
                    .filter(|branch| validator::is_valid_node(scope, branch, instance, context))
                    .count();
                if matches != 1 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    if let Some(subschema) = object.get("not") {
        if validator::is_valid_node(scope, subschema, instance, context) {
            return false;
        }
    }
    if scope.draft().supports_keyword("if") {
        if let Some(if_schema) = object.get("if") {
            if validator::is_valid_node(scope, if_schema, instance, context) {
                if let Some(then_schema) = object.get("then") {
                    if !validator::is_valid_node(scope, then_schema, instance, context) {
                        return false;
                    }
                }
            } else if let Some(else_schema) = object.get("else") {
                if !validator::is_valid_node(scope, else_schema, instance, context) {
                    return false;
                }
            }
        }
    }
    true
}

/// A deferred computation that re-validates each branch on demand with the
/// context the composite keyword saw.
fn defer<'a>(
    scope: &'a Schema<'a>,
    branches: &'a [Value],
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
) -> Subschemas<'a> {
    let pointer: JSONPointer = instance_path.into();
    Subschemas::deferred(
        scope,
        context.scope(),
        context.depth(),
        branches
            .iter()
            .map(|branch| Branch {
                schema: branch,
                instance,
                instance_path: pointer.clone(),
            })
            .collect(),
    )
}
