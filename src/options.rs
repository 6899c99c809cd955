//! Configuration of a [`Schema`] handle.
use crate::{
    error::ValidationError,
    paths::JSONPointer,
    resolver::{DefaultResolver, SchemaResolver},
    schema::{Schema, DEFAULT_SCOPE},
    schemas::{self, Draft},
};
use ahash::AHashMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

pub(crate) type FormatCheck = dyn Fn(&str) -> bool + Send + Sync;
pub(crate) type KeywordCheck =
    dyn Fn(&Value, &Value, &JSONPointer) -> KeywordResult + Send + Sync;

/// The outcome of a user-defined keyword check.
///
/// A plain verdict synthesizes one error named after the keyword on failure;
/// an explicit error list is streamed verbatim.
pub enum KeywordResult {
    /// The instance is accepted.
    Valid,
    /// The instance is rejected; one error named after the keyword is produced.
    Invalid,
    /// The instance is rejected with the given errors (or accepted, if empty).
    Errors(Vec<ValidationError<'static>>),
}

impl From<bool> for KeywordResult {
    fn from(verdict: bool) -> Self {
        if verdict {
            KeywordResult::Valid
        } else {
            KeywordResult::Invalid
        }
    }
}

#[derive(Clone)]
pub(crate) enum FormatBehavior {
    Disabled,
    Check(Arc<FormatCheck>),
}

/// Full configuration to guide validation against a schema.
///
/// Using a `SchemaOptions` instance you can configure the draft, the format
/// policy, user-defined formats and keywords and the reference resolver.
#[derive(Clone)]
pub struct SchemaOptions {
    draft: Option<Draft>,
    validate_formats: bool,
    formats: AHashMap<String, FormatBehavior>,
    keywords: AHashMap<String, Arc<KeywordCheck>>,
    resolver: Arc<dyn SchemaResolver>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        SchemaOptions {
            draft: None,
            validate_formats: true,
            formats: AHashMap::default(),
            keywords: AHashMap::default(),
            resolver: Arc::new(DefaultResolver),
        }
    }
}

impl SchemaOptions {
    /// Bind these options to a root schema document.
    ///
    /// Draft is detected in the following precedence order:
    ///   - Explicitly specified;
    ///   - `$schema` field in the document;
    ///   - `Draft::default()`
    pub fn build<'s>(&self, schema: &'s Value) -> Result<Schema<'s>, ValidationError<'s>> {
        let mut config = self.clone();
        if config.draft.is_none() {
            config.draft = schemas::draft_from_schema(schema);
        }
        Schema::wrap(schema, &DEFAULT_SCOPE, Arc::new(config), Arc::default())
            .map_err(|error| ValidationError::invalid_schema_url(schema, error))
    }

    /// Ensure that the schema is interpreted using the given draft.
    ///
    /// ```rust
    /// # use jsonschemer::{Draft, SchemaOptions};
    /// # let mut options = SchemaOptions::default();
    /// options.with_draft(Draft::Draft4);
    /// ```
    #[inline]
    pub fn with_draft(&mut self, draft: Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// Toggle `format` validation. It is on by default.
    #[inline]
    pub fn should_validate_formats(&mut self, validate_formats: bool) -> &mut Self {
        self.validate_formats = validate_formats;
        self
    }

    /// Register a custom format checker, replacing any built-in one of the
    /// same name. Non-string instances always pass format validation.
    ///
    /// ```rust
    /// # use jsonschemer::SchemaOptions;
    /// # let mut options = SchemaOptions::default();
    /// options.with_format("parens", |value| value.starts_with('(') && value.ends_with(')'));
    /// ```
    pub fn with_format(
        &mut self,
        name: impl Into<String>,
        format: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.formats
            .insert(name.into(), FormatBehavior::Check(Arc::new(format)));
        self
    }

    /// Disable a format by name, including built-in ones.
    pub fn without_format(&mut self, name: impl Into<String>) -> &mut Self {
        self.formats.insert(name.into(), FormatBehavior::Disabled);
        self
    }

    /// Register a user-defined keyword.
    ///
    /// The callback receives the instance, the keyword's value within the
    /// schema and the instance location, and returns a [`KeywordResult`].
    pub fn with_keyword(
        &mut self,
        name: impl Into<String>,
        keyword: impl Fn(&Value, &Value, &JSONPointer) -> KeywordResult + Send + Sync + 'static,
    ) -> &mut Self {
        self.keywords.insert(name.into(), Arc::new(keyword));
        self
    }

    /// Use the given resolver for references that point outside the root
    /// schema document. The default resolver fails every reference.
    pub fn with_resolver(&mut self, resolver: impl SchemaResolver + 'static) -> &mut Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub(crate) fn draft(&self) -> Draft {
        self.draft.unwrap_or_default()
    }

    pub(crate) const fn validate_formats(&self) -> bool {
        self.validate_formats
    }

    pub(crate) fn format(&self, name: &str) -> Option<&FormatBehavior> {
        self.formats.get(name)
    }

    pub(crate) fn keyword(&self, name: &str) -> Option<&Arc<KeywordCheck>> {
        self.keywords.get(name)
    }

    pub(crate) fn resolver(&self) -> &dyn SchemaResolver {
        self.resolver.as_ref()
    }
}

impl fmt::Debug for SchemaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaOptions")
            .field("draft", &self.draft)
            .field("validate_formats", &self.validate_formats)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .field("keywords", &self.keywords.keys().collect::<Vec<_>>())
            .finish()
    }
}
