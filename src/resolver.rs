//! Reference resolver. Implements the logic required by the `$ref` keyword:
//! classification of references, `$id` indexing and retrieval of external
//! documents through a pluggable hook.
use crate::{
    error::ValidationError,
    paths::InstancePath,
    schema::Schema,
    schemas::{self, Draft},
    validator::{self, EvalContext},
};
use ahash::AHashMap;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use url::Url;

/// The error type the reference-resolving hook may return.
pub type SchemaResolverError = anyhow::Error;

/// A resolver for references that point outside the root schema document.
///
/// The resolver may perform I/O; the engine imposes no timeout. Results are
/// memoized per validation, so a document is fetched at most once however
/// many references lead to it.
pub trait SchemaResolver: Send + Sync {
    /// Fetch the schema document identified by `url`.
    fn resolve(&self, url: &Url) -> Result<Value, SchemaResolverError>;
}

/// The default resolver fails every reference it is asked for.
#[derive(Debug, Default)]
pub struct DefaultResolver;

impl SchemaResolver for DefaultResolver {
    fn resolve(&self, url: &Url) -> Result<Value, SchemaResolverError> {
        Err(anyhow::anyhow!("Unknown reference: {}", url))
    }
}

/// A resolver that loads `http(s)` documents with a blocking GET request.
#[cfg(feature = "resolve-http")]
#[derive(Debug, Default)]
pub struct HttpResolver;

#[cfg(feature = "resolve-http")]
impl SchemaResolver for HttpResolver {
    fn resolve(&self, url: &Url) -> Result<Value, SchemaResolverError> {
        match url.scheme() {
            "http" | "https" => Ok(reqwest::blocking::get(url.as_str())?.json()?),
            scheme => Err(anyhow::anyhow!("Unknown scheme: {}", scheme)),
        }
    }
}

/// How many `$ref` hops a single validation may take before it is aborted.
pub(crate) const RESOLUTION_DEPTH_LIMIT: usize = 64;

/// Collect named subschemas of `schema` under their canonical ids, mapped
/// to their locations within the document.
///
/// The walk descends into `definitions` only; applicator subschemas are
/// resolved on demand through pointer evaluation, so indexing them eagerly
/// would be duplicative work.
pub(crate) fn collect_ids(
    draft: Draft,
    schema: &Value,
    base: &Url,
    location: &str,
    ids: &mut AHashMap<String, String>,
) -> Result<(), url::ParseError> {
    match schema {
        Value::Object(object) => {
            let mut scope = None;
            if let Some(id) = schemas::id_of(draft, schema) {
                let mut new_base = Url::options().base_url(Some(base)).parse(id)?;
                // Empty fragments are not distinguishable from absent fragments
                if new_base.fragment() == Some("") {
                    new_base.set_fragment(None);
                }
                if &new_base != base {
                    ids.insert(new_base.to_string(), location.to_string());
                }
                scope = Some(new_base);
            }
            let scope = scope.as_ref().unwrap_or(base);
            if let Some(definitions) = object.get("definitions") {
                if let Value::Object(entries) = definitions {
                    for (key, subschema) in entries {
                        let location =
                            format!("{}/definitions/{}", location, escape_token(key));
                        collect_ids(draft, subschema, scope, &location, ids)?;
                    }
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let location = format!("{}/{}", location, index);
                collect_ids(draft, item, base, &location, ids)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Based on `serde_json` pointer evaluation, but tracks `$id`s of the
/// traversed nodes so the caller can re-base subsequent resolution.
///
/// The starting document's own identifier is excluded: it is already part of
/// the base URI the caller resolves against. The target's identifier is
/// excluded as well: it is applied when the target is validated.
pub(crate) fn pointer<'a>(
    draft: Draft,
    document: &'a Value,
    pointer: &str,
) -> Option<(Vec<&'a str>, &'a Value)> {
    if pointer.is_empty() {
        return Some((vec![], document));
    }
    if !pointer.starts_with('/') {
        return None;
    }
    let tokens = pointer
        .split('/')
        .skip(1)
        .map(|x| x.replace("~1", "/").replace("~0", "~"));
    let mut target = document;
    let mut folders = vec![];
    let mut is_root = true;
    for token in tokens {
        let target_opt = match *target {
            Value::Object(ref map) => {
                if !is_root {
                    if let Some(id) = schemas::id_of(draft, target) {
                        folders.push(id);
                    }
                }
                map.get(&token)
            }
            Value::Array(ref list) => parse_index(&token).and_then(|x| list.get(x)),
            _ => return None,
        };
        is_root = false;
        if let Some(t) = target_opt {
            target = t;
        } else {
            return None;
        }
    }
    Some((folders, target))
}

fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        None
    } else {
        s.parse().ok()
    }
}

pub(crate) fn join_folders(mut resource: Url, folders: &[&str]) -> Result<Url, url::ParseError> {
    for folder in folders {
        resource = resource.join(folder)?;
    }
    Ok(resource)
}

/// Validate `instance` against the schema a reference leads to.
///
/// A reference either selects a location in the current document (pointer
/// fragments of same-document references), a named subschema from the `$id`
/// index, or an external document pulled through the resolver hook.
pub(crate) fn validate_reference<'a>(
    scope: &'a Schema<'_>,
    node: &'a Value,
    reference: &str,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
) -> Vec<ValidationError<'a>> {
    if context.depth() >= RESOLUTION_DEPTH_LIMIT {
        return vec![ValidationError::ref_cycle(
            node,
            instance_path.into(),
            instance,
            RESOLUTION_DEPTH_LIMIT,
        )];
    }
    let reference_url = match context.build_url(reference) {
        Ok(url) => url,
        Err(error) => {
            return vec![ValidationError::invalid_url(
                node,
                instance_path.into(),
                instance,
                error,
            )]
        }
    };
    if let Some(fragment) = reference_url.fragment() {
        let decoded = match percent_decode_str(fragment).decode_utf8() {
            Ok(decoded) => decoded,
            Err(_) => {
                return vec![ValidationError::invalid_reference(
                    node,
                    instance_path.into(),
                    instance,
                    reference_url.to_string(),
                )]
            }
        };
        if decoded.is_empty() || decoded.starts_with('/') {
            return if reference.starts_with('#') {
                validate_local_pointer(
                    scope,
                    node,
                    &reference_url,
                    &decoded,
                    instance,
                    instance_path,
                    context,
                )
            } else {
                validate_external(
                    scope,
                    node,
                    &reference_url,
                    Some(&decoded),
                    instance,
                    instance_path,
                    context,
                )
            };
        }
    }
    // Location-independent identifier or a plain document reference
    let mut lookup = reference_url.clone();
    if lookup.fragment() == Some("") {
        lookup.set_fragment(None);
    }
    match scope.ids() {
        Ok(ids) => {
            if let Some(location) = ids.get(lookup.as_str()) {
                return match scope.root().pointer(location) {
                    Some(target) => {
                        let context = context.rebase(reference_url);
                        validator::validate_node(scope, target, instance, instance_path, &context)
                    }
                    None => vec![ValidationError::invalid_reference(
                        node,
                        instance_path.into(),
                        instance,
                        reference_url.to_string(),
                    )],
                };
            }
        }
        Err(error) => {
            return vec![ValidationError::invalid_url(
                node,
                instance_path.into(),
                instance,
                error,
            )]
        }
    }
    validate_external(
        scope,
        node,
        &reference_url,
        None,
        instance,
        instance_path,
        context,
    )
}

fn validate_local_pointer<'a>(
    scope: &'a Schema<'_>,
    node: &'a Value,
    reference_url: &Url,
    pointer_str: &str,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
) -> Vec<ValidationError<'a>> {
    match pointer(scope.draft(), scope.root(), pointer_str) {
        Some((folders, target)) => {
            match join_folders(scope.base_uri().clone(), &folders) {
                Ok(base) => {
                    let context = context.rebase(base);
                    validator::validate_node(scope, target, instance, instance_path, &context)
                }
                Err(error) => vec![ValidationError::invalid_url(
                    node,
                    instance_path.into(),
                    instance,
                    error,
                )],
            }
        }
        None => vec![ValidationError::invalid_reference(
            node,
            instance_path.into(),
            instance,
            reference_url.to_string(),
        )],
    }
}

fn validate_external<'a>(
    scope: &'a Schema<'_>,
    node: &'a Value,
    reference_url: &Url,
    fragment: Option<&str>,
    instance: &'a Value,
    instance_path: &InstancePath,
    context: &EvalContext,
) -> Vec<ValidationError<'a>> {
    let mut resource = reference_url.clone();
    resource.set_fragment(None);
    let document = match scope.fetch(&resource) {
        Ok(document) => document,
        Err(error) => {
            return vec![ValidationError::resolver(
                node,
                instance_path.into(),
                instance,
                resource,
                error,
            )]
        }
    };
    let external = match Schema::wrap(&document, &resource, scope.config_arc(), scope.store_arc())
    {
        Ok(external) => external,
        Err(error) => {
            return vec![ValidationError::invalid_url(
                node,
                instance_path.into(),
                instance,
                error,
            )]
        }
    };
    // Errors are untied from the external document before it is dropped
    let errors = if let Some(pointer_str) = fragment {
        match pointer(external.draft(), external.root(), pointer_str) {
            Some((folders, target)) => {
                match join_folders(external.base_uri().clone(), &folders) {
                    Ok(base) => {
                        let context = context.rebase(base);
                        validator::validate_node(&external, target, instance, instance_path, &context)
                    }
                    Err(error) => {
                        return vec![ValidationError::invalid_url(
                            node,
                            instance_path.into(),
                            instance,
                            error,
                        )]
                    }
                }
            }
            None => {
                return vec![ValidationError::invalid_reference(
                    node,
                    instance_path.into(),
                    instance,
                    reference_url.to_string(),
                )]
            }
        }
    } else {
        let target = match external.ids() {
            Ok(ids) => match ids.get(reference_url.as_str()) {
                Some(location) => match external.root().pointer(location) {
                    Some(target) => target,
                    None => {
                        return vec![ValidationError::invalid_reference(
                            node,
                            instance_path.into(),
                            instance,
                            reference_url.to_string(),
                        )]
                    }
                },
                None => external.root(),
            },
            Err(error) => {
                return vec![ValidationError::invalid_url(
                    node,
                    instance_path.into(),
                    instance,
                    error,
                )]
            }
        };
        let context = context.rebase(reference_url.clone());
        validator::validate_node(&external, target, instance, instance_path, &context)
    };
    let errors: Vec<ValidationError<'static>> = errors
        .into_iter()
        .map(ValidationError::into_owned)
        .collect();
    errors
}

/// The boolean twin of [`validate_reference`]; resolution failures reject.
pub(crate) fn is_valid_reference(
    scope: &Schema<'_>,
    reference: &str,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    if context.depth() >= RESOLUTION_DEPTH_LIMIT {
        return false;
    }
    let reference_url = match context.build_url(reference) {
        Ok(url) => url,
        Err(_) => return false,
    };
    if let Some(fragment) = reference_url.fragment() {
        let decoded = match percent_decode_str(fragment).decode_utf8() {
            Ok(decoded) => decoded,
            Err(_) => return false,
        };
        if decoded.is_empty() || decoded.starts_with('/') {
            return if reference.starts_with('#') {
                match pointer(scope.draft(), scope.root(), &decoded) {
                    Some((folders, target)) => {
                        match join_folders(scope.base_uri().clone(), &folders) {
                            Ok(base) => {
                                let context = context.rebase(base);
                                validator::is_valid_node(scope, target, instance, &context)
                            }
                            Err(_) => false,
                        }
                    }
                    None => false,
                }
            } else {
                is_valid_external(scope, &reference_url, Some(&decoded), instance, context)
            };
        }
    }
    let mut lookup = reference_url.clone();
    if lookup.fragment() == Some("") {
        lookup.set_fragment(None);
    }
    match scope.ids() {
        Ok(ids) => {
            if let Some(location) = ids.get(lookup.as_str()) {
                return match scope.root().pointer(location) {
                    Some(target) => {
                        let context = context.rebase(reference_url);
                        validator::is_valid_node(scope, target, instance, &context)
                    }
                    None => false,
                };
            }
        }
        Err(_) => return false,
    }
    is_valid_external(scope, &reference_url, None, instance, context)
}

fn is_valid_external(
    scope: &Schema<'_>,
    reference_url: &Url,
    fragment: Option<&str>,
    instance: &Value,
    context: &EvalContext,
) -> bool {
    let mut resource = reference_url.clone();
    resource.set_fragment(None);
    let document = match scope.fetch(&resource) {
        Ok(document) => document,
        Err(_) => return false,
    };
    let external = match Schema::wrap(&document, &resource, scope.config_arc(), scope.store_arc())
    {
        Ok(external) => external,
        Err(_) => return false,
    };
    if let Some(pointer_str) = fragment {
        match pointer(external.draft(), external.root(), pointer_str) {
            Some((folders, target)) => match join_folders(external.base_uri().clone(), &folders) {
                Ok(base) => {
                    let context = context.rebase(base);
                    validator::is_valid_node(&external, target, instance, &context)
                }
                Err(_) => false,
            },
            None => false,
        }
    } else {
        let target = match external.ids() {
            Ok(ids) => match ids.get(reference_url.as_str()) {
                Some(location) => match external.root().pointer(location) {
                    Some(target) => target,
                    None => return false,
                },
                None => external.root(),
            },
            Err(_) => return false,
        };
        let context = context.rebase(reference_url.clone());
        validator::is_valid_node(&external, target, instance, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::{collect_ids, pointer};
    use crate::schemas::Draft;
    use ahash::AHashMap;
    use serde_json::{json, Value};
    use url::Url;

    fn make_index(schema: &Value) -> AHashMap<String, String> {
        let mut ids = AHashMap::new();
        collect_ids(
            Draft::Draft7,
            schema,
            &Url::parse("json-schema:///").unwrap(),
            "",
            &mut ids,
        )
        .unwrap();
        ids
    }

    #[test]
    fn only_keyword() {
        // When only one keyword is specified
        let schema = json!({"type": "string"});
        // Then there should be no indexed schemas
        assert_eq!(make_index(&schema).len(), 0);
    }

    #[test]
    fn named_subschema_in_definitions() {
        let schema = json!({
            "allOf": [{"$ref": "#foo"}],
            "definitions": {
                "A": {"$id": "#foo", "type": "integer"}
            }
        });
        let ids = make_index(&schema);
        assert_eq!(ids.len(), 1);
        assert_eq!(
            ids.get("json-schema:///#foo").map(String::as_str),
            Some("/definitions/A")
        );
    }

    #[test]
    fn named_subschemas_in_array() {
        let schema = json!({
            "definitions": {
                "A": [
                    {"$id": "#foo", "type": "integer"},
                    {"$id": "#bar", "type": "string"},
                ]
            }
        });
        let ids = make_index(&schema);
        assert_eq!(ids.len(), 2);
        assert_eq!(
            ids.get("json-schema:///#foo").map(String::as_str),
            Some("/definitions/A/0")
        );
        assert_eq!(
            ids.get("json-schema:///#bar").map(String::as_str),
            Some("/definitions/A/1")
        );
    }

    #[test]
    fn root_schema_id() {
        let schema = json!({
            "$id": "http://localhost:1234/tree",
            "definitions": {
                "node": {
                    "$id": "http://localhost:1234/node",
                    "type": "object"
                }
            }
        });
        let ids = make_index(&schema);
        assert_eq!(ids.len(), 2);
        assert_eq!(
            ids.get("http://localhost:1234/tree").map(String::as_str),
            Some("")
        );
        assert_eq!(
            ids.get("http://localhost:1234/node").map(String::as_str),
            Some("/definitions/node")
        );
    }

    #[test]
    fn relative_id_is_resolved_against_enclosing_base() {
        let schema = json!({
            "$id": "http://localhost:1234/root",
            "definitions": {
                "A": {
                    "$id": "nested.json",
                    "definitions": {
                        "B": {"$id": "#foo", "type": "integer"}
                    }
                }
            }
        });
        let ids = make_index(&schema);
        assert_eq!(ids.len(), 3);
        assert_eq!(
            ids.get("http://localhost:1234/nested.json").map(String::as_str),
            Some("/definitions/A")
        );
        assert_eq!(
            ids.get("http://localhost:1234/nested.json#foo").map(String::as_str),
            Some("/definitions/A/definitions/B")
        );
    }

    #[test]
    fn empty_fragment_is_cleaned() {
        let schema = json!({
            "$id": "http://foo.com/schema.json#",
            "definitions": {"Bar": {"const": 42}}
        });
        let ids = make_index(&schema);
        assert!(ids.contains_key("http://foo.com/schema.json"));
    }

    #[test]
    fn applicators_are_not_indexed() {
        let schema = json!({
            "$id": "http://localhost:1234/",
            "items": {"$id": "folder/", "type": "integer"}
        });
        let ids = make_index(&schema);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains_key("http://localhost:1234/"));
    }

    #[test]
    fn pointer_evaluation() {
        let document = json!({"definitions": {"a": {"type": "integer"}, "b": [1, 2]}});
        let (folders, target) =
            pointer(Draft::Draft7, &document, "/definitions/a").expect("Valid pointer");
        assert!(folders.is_empty());
        assert_eq!(target, document.pointer("/definitions/a").unwrap());
        let (_, element) = pointer(Draft::Draft7, &document, "/definitions/b/1").unwrap();
        assert_eq!(element, &json!(2));
        assert!(pointer(Draft::Draft7, &document, "/definitions/missing").is_none());
        assert!(pointer(Draft::Draft7, &document, "/definitions/b/01").is_none());
    }

    #[test]
    fn pointer_collects_intermediate_ids() {
        let document = json!({
            "$id": "http://localhost:1234/root",
            "definitions": {
                "baz": {
                    "$id": "folder/",
                    "definitions": {"leaf": {"type": "integer"}}
                }
            }
        });
        let (folders, _) = pointer(
            Draft::Draft7,
            &document,
            "/definitions/baz/definitions/leaf",
        )
        .expect("Valid pointer");
        // The root's own `$id` is excluded, the traversed one is kept
        assert_eq!(folders, vec!["folder/"]);
    }

    #[test]
    fn escaped_tokens() {
        let document = json!({"a/b": {"c~d": 1}});
        let (_, target) = pointer(Draft::Draft7, &document, "/a~1b/c~0d").unwrap();
        assert_eq!(target, &json!(1));
    }
}
