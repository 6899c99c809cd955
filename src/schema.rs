//! The schema handle: a root schema document bound to a configuration.
use crate::{
    ecma,
    error::{ErrorIterator, ValidationError},
    options::SchemaOptions,
    paths::InstancePath,
    resolver::{self, SchemaResolverError},
    schemas::{self, Draft},
    validator::{self, EvalContext},
};
use ahash::AHashMap;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

pub(crate) static DEFAULT_SCOPE: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_ROOT_URL).expect("Is a valid URL"));

/// External documents fetched through the resolver, keyed by their URL.
pub(crate) type Store = AHashMap<String, Arc<Value>>;

/// A schema document bound to a validation configuration.
///
/// The handle is cheap to construct: nothing of the schema is inspected until
/// the first validation. It is immutable after construction except for three
/// memoized caches (the `$id` index, fetched external documents and compiled
/// regular expressions) and may be shared freely between threads.
#[derive(Debug)]
pub struct Schema<'s> {
    root: &'s Value,
    /// The URL the document was loaded from (or the default scope).
    origin: Url,
    /// `origin` joined with the root's `$id`, if any.
    scope: Url,
    config: Arc<SchemaOptions>,
    /// Canonical id -> JSON pointer of the identified subschema.
    ids: OnceCell<AHashMap<String, String>>,
    store: Arc<RwLock<Store>>,
    patterns: RwLock<AHashMap<String, Arc<fancy_regex::Regex>>>,
}

impl<'s> Schema<'s> {
    /// Return a default [`SchemaOptions`] that can configure a `Schema`.
    ///
    /// Example of usage:
    /// ```rust
    /// # use jsonschemer::{Draft, Schema};
    /// # let document = serde_json::json!({});
    /// let maybe_schema: Result<Schema, _> = Schema::options()
    ///     .with_draft(Draft::Draft7)
    ///     .build(&document);
    /// ```
    #[must_use]
    pub fn options() -> SchemaOptions {
        SchemaOptions::default()
    }

    /// Bind the given document with default options. The draft is detected
    /// from `$schema`, falling back to draft 7.
    pub fn new(schema: &'s Value) -> Result<Schema<'s>, ValidationError<'s>> {
        Self::options().build(schema)
    }

    /// Bind the given document as a draft 4 schema.
    pub fn draft4(schema: &'s Value) -> Result<Schema<'s>, ValidationError<'s>> {
        Self::options().with_draft(Draft::Draft4).build(schema)
    }

    /// Bind the given document as a draft 6 schema.
    pub fn draft6(schema: &'s Value) -> Result<Schema<'s>, ValidationError<'s>> {
        Self::options().with_draft(Draft::Draft6).build(schema)
    }

    /// Bind the given document as a draft 7 schema.
    pub fn draft7(schema: &'s Value) -> Result<Schema<'s>, ValidationError<'s>> {
        Self::options().with_draft(Draft::Draft7).build(schema)
    }

    pub(crate) fn wrap(
        root: &'s Value,
        base: &Url,
        config: Arc<SchemaOptions>,
        store: Arc<RwLock<Store>>,
    ) -> Result<Schema<'s>, url::ParseError> {
        let scope = match schemas::id_of(config.draft(), root) {
            Some(id) => Url::options().base_url(Some(base)).parse(id)?,
            None => base.clone(),
        };
        Ok(Schema {
            root,
            origin: base.clone(),
            scope,
            config,
            ids: OnceCell::new(),
            store,
            patterns: RwLock::new(AHashMap::new()),
        })
    }

    /// Run validation against `instance` and return an iterator over
    /// [`ValidationError`] in the error case.
    ///
    /// The stream is not short-circuiting: every independently failing
    /// keyword contributes an error.
    #[inline]
    pub fn validate<'a>(&'a self, instance: &'a Value) -> Result<(), ErrorIterator<'a>> {
        let instance_path = InstancePath::new();
        let context = EvalContext::new(&self.scope);
        let errors = validator::validate_node(self, self.root, instance, &instance_path, &context);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Box::new(errors.into_iter()))
        }
    }

    /// Run validation against `instance` but return a boolean result instead
    /// of an iterator. It is useful for cases where it is important to only
    /// know the fact if the data is valid or not. This approach is much
    /// faster than `validate`, as no errors are constructed.
    #[must_use]
    #[inline]
    pub fn is_valid(&self, instance: &Value) -> bool {
        let context = EvalContext::new(&self.scope);
        validator::is_valid_node(self, self.root, instance, &context)
    }

    /// The [`Draft`] this schema is interpreted under.
    #[must_use]
    pub fn draft(&self) -> Draft {
        self.config.draft()
    }

    pub(crate) fn root(&self) -> &'s Value {
        self.root
    }

    pub(crate) fn base_uri(&self) -> &Url {
        &self.scope
    }

    pub(crate) fn config(&self) -> &SchemaOptions {
        &self.config
    }

    pub(crate) fn config_arc(&self) -> Arc<SchemaOptions> {
        Arc::clone(&self.config)
    }

    pub(crate) fn store_arc(&self) -> Arc<RwLock<Store>> {
        Arc::clone(&self.store)
    }

    /// The `$id` index of this document, built on first use. Identified
    /// subschemas are addressed by their location and looked up live, so the
    /// index never borrows into the document.
    pub(crate) fn ids(&self) -> Result<&AHashMap<String, String>, url::ParseError> {
        self.ids.get_or_try_init(|| {
            let mut ids = AHashMap::new();
            resolver::collect_ids(self.draft(), self.root, &self.origin, "", &mut ids)?;
            Ok(ids)
        })
    }

    /// Fetch an external document through the resolver hook, memoized.
    pub(crate) fn fetch(&self, url: &Url) -> Result<Arc<Value>, SchemaResolverError> {
        if let Some(cached) = self.store.read().get(url.as_str()) {
            return Ok(Arc::clone(cached));
        }
        let document = Arc::new(self.config.resolver().resolve(url)?);
        self.store
            .write()
            .insert(url.as_str().to_string(), Arc::clone(&document));
        Ok(document)
    }

    /// Compile an ECMA 262 pattern, memoized per handle.
    ///
    /// Compilation errors are not cached; an uncompilable pattern fails
    /// every time the keyword is evaluated.
    pub(crate) fn pattern(&self, pattern: &str) -> Result<Arc<fancy_regex::Regex>, fancy_regex::Error> {
        if let Some(compiled) = self.patterns.read().get(pattern) {
            return Ok(Arc::clone(compiled));
        }
        let compiled = Arc::new(ecma::convert_regex(pattern)?);
        self.patterns
            .write()
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::Schema;
    use crate::{
        error::ValidationErrorKind, options::KeywordResult, paths::JSONPointer, ValidationError,
    };
    use serde_json::{json, Value};
    use std::borrow::Cow;

    #[test]
    fn boolean_schemas() {
        let truthy = json!(true);
        let falsy = json!(false);
        let value = json!("anything");
        assert!(Schema::new(&truthy).unwrap().is_valid(&value));
        assert!(!Schema::new(&falsy).unwrap().is_valid(&value));
    }

    #[test]
    fn empty_schema_is_vacuously_valid() {
        let schema = json!({});
        let compiled = Schema::new(&schema).unwrap();
        for value in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
            assert!(compiled.is_valid(&value));
        }
    }

    #[test]
    fn multiple_errors() {
        let schema = json!({"minProperties": 2, "propertyNames": {"minLength": 3}});
        let value = json!({"a": 3});
        let compiled = Schema::new(&schema).unwrap();
        let errors: Vec<ValidationError> = compiled.validate(&value).unwrap_err().collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].to_string(),
            r#"{"a":3} has less than 2 properties"#
        );
        assert_eq!(errors[1].to_string(), r#""a" is shorter than 3 characters"#);
    }

    #[test]
    fn custom_keyword() {
        // A keyword that verifies the object's keys consist of ASCII characters only
        let mut options = Schema::options();
        options.with_keyword("ascii-keys", |instance, _, pointer| {
            if let Value::Object(object) = instance {
                let errors: Vec<_> = object
                    .keys()
                    .filter(|key| !key.is_ascii())
                    .map(|key| ValidationError {
                        instance: Cow::Owned(Value::String(key.clone())),
                        schema: Cow::Owned(json!("ascii-keys")),
                        instance_path: pointer.clone(),
                        kind: ValidationErrorKind::Format {
                            format: "ASCII".to_string(),
                        },
                        subschemas: None,
                    })
                    .collect();
                KeywordResult::Errors(errors)
            } else {
                KeywordResult::Valid
            }
        });
        let schema = json!({"ascii-keys": true, "type": "object"});
        let compiled = options.build(&schema).unwrap();
        let valid = json!({"a": 1});
        let invalid = json!({"å": 1});
        assert!(compiled.is_valid(&valid));
        assert!(compiled.validate(&valid).is_ok());
        assert!(!compiled.is_valid(&invalid));
        assert!(compiled.validate(&invalid).is_err());
    }

    #[test]
    fn custom_keyword_boolean_verdict() {
        let mut options = Schema::options();
        options.with_keyword("even", |instance, _, _| {
            instance
                .as_u64()
                .map_or(true, |value| value % 2 == 0)
                .into()
        });
        let schema = json!({"even": true});
        let compiled = options.build(&schema).unwrap();
        assert!(compiled.is_valid(&json!(2)));
        let instance = json!(3);
        let errors: Vec<_> = compiled.validate(&instance).unwrap_err().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0].kind,
            ValidationErrorKind::Custom { keyword } if keyword == "even"
        ));
    }

    #[test]
    fn custom_format() {
        let mut options = Schema::options();
        options.with_format("parens", |value: &str| {
            value.starts_with('(') && value.ends_with(')')
        });
        let schema = json!({"format": "parens", "type": "string"});
        let compiled = options.build(&schema).unwrap();
        assert!(compiled.is_valid(&json!("(yes)")));
        assert!(!compiled.is_valid(&json!("no")));
    }

    #[test]
    fn disabled_format() {
        let mut options = Schema::options();
        options.without_format("ipv4");
        let schema = json!({"format": "ipv4"});
        let compiled = options.build(&schema).unwrap();
        assert!(compiled.is_valid(&json!("not an address")));
    }

    #[test]
    fn format_policy_off() {
        let mut options = Schema::options();
        options.should_validate_formats(false);
        let schema = json!({"format": "ipv4"});
        let compiled = options.build(&schema).unwrap();
        assert!(compiled.is_valid(&json!("not an address")));
    }

    #[test]
    fn keyword_receives_pointer() {
        let mut options = Schema::options();
        options.with_keyword("never", |_, _, pointer: &JSONPointer| {
            assert_eq!(pointer.to_string(), "/inner");
            KeywordResult::Invalid
        });
        let schema = json!({"properties": {"inner": {"never": true}}});
        let compiled = options.build(&schema).unwrap();
        let value = json!({"inner": 1});
        assert!(!compiled.is_valid(&value));
    }
}
