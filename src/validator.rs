//! The validator core: keyword-driven recursive validation of an instance
//! against a schema node.
use crate::{
    error::ValidationError,
    keywords,
    paths::InstancePath,
    primitive_type::{is_instance_of, PrimitiveType},
    resolver,
    schema::Schema,
    schemas::{self, Draft},
};
use serde_json::{Map, Value};
use std::{borrow::Cow, convert::TryFrom};
use url::Url;

/// Context of one validation pass: the current base URI for reference
/// resolution and the number of reference hops taken so far.
#[derive(Debug)]
pub(crate) struct EvalContext<'a> {
    scope: Cow<'a, Url>,
    depth: usize,
}

impl<'a> EvalContext<'a> {
    pub(crate) fn new(scope: &'a Url) -> Self {
        EvalContext {
            scope: Cow::Borrowed(scope),
            depth: 0,
        }
    }

    pub(crate) fn with_scope(scope: &'a Url, depth: usize) -> Self {
        EvalContext {
            scope: Cow::Borrowed(scope),
            depth,
        }
    }

    #[allow(clippy::doc_markdown)]
    /// Push a new scope. All URLs built from the new context will have this scope in them.
    /// Before push:
    ///    scope = http://example.com/
    ///    build_url("#/definitions/foo") -> "http://example.com/#/definitions/foo"
    /// After push this schema - {"$id": "folder/", ...}
    ///    scope = http://example.com/folder/
    ///    build_url("#/definitions/foo") -> "http://example.com/folder/#/definitions/foo"
    ///
    /// In other words it keeps track of sub-folders during validation.
    #[inline]
    pub(crate) fn push(&'a self, draft: Draft, schema: &Value) -> Result<Self, url::ParseError> {
        if let Some(id) = schemas::id_of(draft, schema) {
            let scope = Url::options().base_url(Some(&self.scope)).parse(id)?;
            Ok(EvalContext {
                scope: Cow::Owned(scope),
                depth: self.depth,
            })
        } else {
            Ok(EvalContext {
                scope: Cow::Borrowed(self.scope.as_ref()),
                depth: self.depth,
            })
        }
    }

    /// A context for the subtree a reference resolved to.
    pub(crate) fn rebase(&self, scope: Url) -> EvalContext<'static> {
        EvalContext {
            scope: Cow::Owned(scope),
            depth: self.depth + 1,
        }
    }

    /// Build a new URL. Used for `$ref` resolution to keep full paths.
    pub(crate) fn build_url(&self, reference: &str) -> Result<Url, url::ParseError> {
        Url::options().base_url(Some(&self.scope)).parse(reference)
    }

    pub(crate) const fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn scope(&self) -> Url {
        self.scope.as_ref().clone()
    }
}

/// Validate `instance` against the schema `node`, collecting every failure.
pub(crate) fn validate_node<'a>(
    scope: &'a Schema<'_>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
) -> Vec<ValidationError<'a>> {
    match node {
        Value::Bool(true) => vec![],
        Value::Bool(false) => vec![ValidationError::false_schema(
            node,
            instance_path.into(),
            instance,
        )],
        Value::Object(object) => {
            let context = match context.push(scope.draft(), node) {
                Ok(context) => context,
                Err(error) => {
                    return vec![ValidationError::invalid_url(
                        node,
                        instance_path.into(),
                        instance,
                        error,
                    )]
                }
            };
            // `$ref` suppresses all sibling keywords in the supported drafts
            if let Some(reference) = object.get("$ref") {
                return match reference.as_str() {
                    Some(reference) => resolver::validate_reference(
                        scope,
                        node,
                        reference,
                        instance,
                        instance_path,
                        &context,
                    ),
                    None => vec![ValidationError::schema(node, instance_path.into(), instance)],
                };
            }
            let mut errors = Vec::new();
            if scope.config().validate_formats() {
                if let Some(format) = object.get("format") {
                    keywords::format::validate(
                        scope,
                        node,
                        format,
                        instance,
                        instance_path,
                        &mut errors,
                    );
                }
            }
            keywords::custom::validate(scope, object, node, instance, instance_path, &mut errors);
            if let Some(options) = object.get("enum") {
                keywords::enum_::validate_enum(node, options, instance, instance_path, &mut errors);
            }
            if scope.draft().supports_keyword("const") {
                if let Some(expected) = object.get("const") {
                    keywords::enum_::validate_const(
                        node,
                        expected,
                        instance,
                        instance_path,
                        &mut errors,
                    );
                }
            }
            keywords::logic::validate(
                scope,
                object,
                node,
                instance,
                instance_path,
                &context,
                &mut errors,
            );
            validate_type(
                scope,
                object,
                node,
                instance,
                instance_path,
                &context,
                &mut errors,
            );
            errors
        }
        _ => vec![ValidationError::schema(node, instance_path.into(), instance)],
    }
}

/// Type-specific validation, selected from the `type` keyword or, in its
/// absence, from the runtime class of the instance.
fn validate_type<'a>(
    scope: &'a Schema<'_>,
    object: &'a Map<String, Value>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
    errors: &mut Vec<ValidationError<'a>>,
) {
    match object.get("type") {
        None => match instance {
            Value::Number(_) => {
                keywords::numeric::validate(scope, object, node, instance, instance_path, errors)
            }
            Value::String(_) => {
                keywords::string::validate(scope, object, node, instance, instance_path, errors)
            }
            Value::Array(_) => keywords::array::validate(
                scope,
                object,
                node,
                instance,
                instance_path,
                context,
                errors,
            ),
            Value::Object(_) => keywords::object::validate(
                scope,
                object,
                node,
                instance,
                instance_path,
                context,
                errors,
            ),
            Value::Null | Value::Bool(_) => {}
        },
        Some(Value::String(name)) => match PrimitiveType::try_from(name.as_str()) {
            Ok(type_) => validate_as(
                scope,
                object,
                node,
                instance,
                instance_path,
                context,
                type_,
                errors,
            ),
            Err(()) => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
        },
        Some(Value::Array(names)) => {
            let mut types = Vec::with_capacity(names.len());
            for name in names {
                match name.as_str().map(PrimitiveType::try_from) {
                    Some(Ok(type_)) => types.push(type_),
                    _ => {
                        errors.push(ValidationError::schema(node, instance_path.into(), instance));
                        return;
                    }
                }
            }
            let strict_integers = scope.draft() == Draft::Draft4;
            match types
                .iter()
                .copied()
                .find(|type_| is_instance_of(instance, *type_, strict_integers))
            {
                Some(matched) => validate_as(
                    scope,
                    object,
                    node,
                    instance,
                    instance_path,
                    context,
                    matched,
                    errors,
                ),
                None => errors.push(ValidationError::multiple_type_error(
                    node,
                    instance_path.into(),
                    instance,
                    types,
                )),
            }
        }
        Some(_) => errors.push(ValidationError::schema(node, instance_path.into(), instance)),
    }
}

#[allow(clippy::too_many_arguments)]
fn validate_as<'a>(
    scope: &'a Schema<'_>,
    object: &'a Map<String, Value>,
    node: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
    type_: PrimitiveType,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let strict_integers = scope.draft() == Draft::Draft4;
    if !is_instance_of(instance, type_, strict_integers) {
        errors.push(ValidationError::single_type_error(
            node,
            instance_path.into(),
            instance,
            type_,
        ));
        return;
    }
    match type_ {
        PrimitiveType::Integer | PrimitiveType::Number => {
            keywords::numeric::validate(scope, object, node, instance, instance_path, errors)
        }
        PrimitiveType::String => {
            keywords::string::validate(scope, object, node, instance, instance_path, errors)
        }
        PrimitiveType::Array => keywords::array::validate(
            scope,
            object,
            node,
            instance,
            instance_path,
            context,
            errors,
        ),
        PrimitiveType::Object => keywords::object::validate(
            scope,
            object,
            node,
            instance,
            instance_path,
            context,
            errors,
        ),
        PrimitiveType::Null | PrimitiveType::Boolean => {}
    }
}

/// The boolean twin of [`validate_node`]. It is faster for cases when the
/// result is not needed (like `anyOf`), since errors are not constructed.
pub(crate) fn is_valid_node(
    scope: &Schema<'_>,
    node: &Value,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    match node {
        Value::Bool(value) => *value,
        Value::Object(object) => {
            let context = match context.push(scope.draft(), node) {
                Ok(context) => context,
                Err(_) => return false,
            };
            if let Some(reference) = object.get("$ref") {
                return match reference.as_str() {
                    Some(reference) => {
                        resolver::is_valid_reference(scope, reference, instance, &context)
                    }
                    None => false,
                };
            }
            if scope.config().validate_formats() {
                if let Some(format) = object.get("format") {
                    if !keywords::format::is_valid(scope, format, instance) {
                        return false;
                    }
                }
            }
            if !keywords::custom::is_valid(scope, object, instance) {
                return false;
            }
            if let Some(options) = object.get("enum") {
                if !keywords::enum_::is_valid_enum(options, instance) {
                    return false;
                }
            }
            if scope.draft().supports_keyword("const") {
                if let Some(expected) = object.get("const") {
                    if !keywords::helpers::equal(instance, expected) {
                        return false;
                    }
                }
            }
            if !keywords::logic::is_valid(scope, object, instance, &context) {
                return false;
            }
            is_valid_type(scope, object, instance, &context)
        }
        _ => false,
    }
}

fn is_valid_type(
    scope: &Schema<'_>,
    object: &Map<String, Value>,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    match object.get("type") {
        None => match instance {
            Value::Number(_) => keywords::numeric::is_valid(scope, object, instance),
            Value::String(_) => keywords::string::is_valid(scope, object, instance),
            Value::Array(_) => keywords::array::is_valid(scope, object, instance, context),
            Value::Object(_) => keywords::object::is_valid(scope, object, instance, context),
            Value::Null | Value::Bool(_) => true,
        },
        Some(Value::String(name)) => match PrimitiveType::try_from(name.as_str()) {
            Ok(type_) => is_valid_as(scope, object, instance, context, type_),
            Err(()) => false,
        },
        Some(Value::Array(names)) => {
            let strict_integers = scope.draft() == Draft::Draft4;
            let mut types = Vec::with_capacity(names.len());
            for name in names {
                match name.as_str().map(PrimitiveType::try_from) {
                    Some(Ok(type_)) => types.push(type_),
                    _ => return false,
                }
            }
            types
                .into_iter()
                .find(|type_| is_instance_of(instance, *type_, strict_integers))
                .map_or(false, |matched| {
                    is_valid_as(scope, object, instance, context, matched)
                })
        }
        Some(_) => false,
    }
}

fn is_valid_as(
    scope: &Schema<'_>,
    object: &Map<String, Value>,
    instance: &Value,
    context: &EvalContext,
    type_: PrimitiveType,
) -> bool {
    let strict_integers = scope.draft() == Draft::Draft4;
    if !is_instance_of(instance, type_, strict_integers) {
        return false;
    }
    match type_ {
        PrimitiveType::Integer | PrimitiveType::Number => {
            keywords::numeric::is_valid(scope, object, instance)
        }
        PrimitiveType::String => keywords::string::is_valid(scope, object, instance),
        PrimitiveType::Array => keywords::array::is_valid(scope, object, instance, context),
        PrimitiveType::Object => keywords::object::is_valid(scope, object, instance, context),
        PrimitiveType::Null | PrimitiveType::Boolean => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"type": "integer"}), &json!(1))]
    #[test_case(&json!({"type": "integer"}), &json!(1.0); "a float with zero fraction is an integer")]
    #[test_case(&json!({"type": "number"}), &json!(42))]
    #[test_case(&json!({"type": ["number", "null"]}), &json!(42))]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!("abc"))]
    #[test_case(&json!({"type": "string", "minimum": 100}), &json!("abc"); "non-selected family keywords are ignored")]
    fn type_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"type": "integer"}), &json!(1.5))]
    #[test_case(&json!({"type": "integer"}), &json!("1"))]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!(null))]
    #[test_case(&json!({"type": "unknown"}), &json!(1); "unknown type names are schema errors")]
    fn type_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn keywords_of_other_families_are_ignored() {
        // `maxLength` applies to strings only, the instance is a number
        tests_util::is_valid(&json!({"maxLength": 2}), &json!(12345));
    }

    #[test]
    fn draft4_integers_are_strict() {
        let schema = json!({"type": "integer"});
        let compiled = crate::Schema::draft4(&schema).unwrap();
        assert!(!compiled.is_valid(&json!(1.0)));
        assert!(compiled.is_valid(&json!(1)));
    }

    #[test]
    fn ref_siblings_are_ignored() {
        // `maximum` next to `$ref` has no effect in draft 7
        let schema = json!({
            "definitions": {"any": true},
            "properties": {"foo": {"$ref": "#/definitions/any", "maximum": 1}}
        });
        tests_util::is_valid(&schema, &json!({"foo": 100}));
    }
}
