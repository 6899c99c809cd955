//! Error types
use crate::{
    paths::{InstancePath, JSONPointer},
    primitive_type::PrimitiveType,
    resolver::SchemaResolverError,
    schema::Schema,
    validator::{self, EvalContext},
};
use serde_json::Value;
use std::{borrow::Cow, error, fmt, string::FromUtf8Error};
use url::Url;

/// An error that happened during validation.
///
/// Every record points at the instance value that failed (`instance`), the
/// schema node that rejected it (`schema`), the location of the value within
/// the validated document (`instance_path`) and the kind of failure. Errors
/// produced by the composite keywords (`allOf` / `anyOf` / `oneOf` /
/// `contains`) additionally carry [`Subschemas`] with the per-branch failures.
#[derive(Debug)]
pub struct ValidationError<'a> {
    /// Value of the property that failed validation.
    pub instance: Cow<'a, Value>,
    /// Schema node that produced the error.
    pub schema: Cow<'a, Value>,
    /// Path to the value that failed validation.
    pub instance_path: JSONPointer,
    /// Type of validation error.
    pub kind: ValidationErrorKind,
    /// Per-branch errors of a composite keyword. `None` for all other errors.
    pub subschemas: Option<Subschemas<'a>>,
}

/// An iterator over instances of [`ValidationError`] that represent validation
/// errors for the input instance.
///
/// # Examples
///
/// ```rust
/// use jsonschemer::Schema;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foobar");
/// if let Ok(schema) = Schema::new(&schema) {
///     if let Err(errors) = schema.validate(&instance) {
///         for error in errors {
///             println!("Validation error: {}", error)
///         }
///     }
/// }
/// ```
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError<'a>> + Sync + Send + 'a>;

/// Kinds of errors that may happen during validation
#[derive(Debug)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    /// At least one of the `allOf` branches rejected the input value.
    AllOf,
    /// The input value is not valid under any of the given schemas.
    AnyOf,
    /// A regular expression overflowed its backtracking limit during matching.
    BacktrackLimitExceeded { error: fancy_regex::Error },
    /// The input value doesn't match the expected constant.
    Constant { expected_value: Value },
    /// The input array doesn't contain items conforming to the specified schema.
    Contains,
    /// The input value does not respect the defined `contentEncoding`.
    ContentEncoding { content_encoding: String },
    /// The input value does not respect the defined `contentMediaType`.
    ContentMediaType { content_media_type: String },
    /// A user-defined keyword rejected the input value.
    Custom { keyword: String },
    /// The input value doesn't match any of the specified options.
    Enum { options: Value },
    /// Value is too large.
    ExclusiveMaximum { limit: f64 },
    /// Value is too small.
    ExclusiveMinimum { limit: f64 },
    /// Everything is invalid for the `false` schema.
    FalseSchema,
    /// The input value doesn't match the specified format.
    Format { format: String },
    /// Decoded content is not a valid UTF-8 string.
    FromUtf8 { error: FromUtf8Error },
    /// A JSON pointer inside a reference did not resolve.
    InvalidReference { reference: String },
    /// A reference or identifier is not a valid URL.
    InvalidURL { error: url::ParseError },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// Value is too large.
    Maximum { limit: f64 },
    /// String is too long.
    MaxLength { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Value is too small.
    Minimum { limit: f64 },
    /// String is too short.
    MinLength { limit: u64 },
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// Number is not a multiple of another number.
    MultipleOf { multiple_of: f64 },
    /// Negated schema accepted the input value.
    Not,
    /// A schema construct this engine does not evaluate.
    NotImplemented { detail: String },
    /// The input value is not valid under exactly one of the given schemas.
    OneOf,
    /// The input value doesn't match the given pattern.
    Pattern { pattern: String },
    /// Too many reference hops; the schema is likely cyclic.
    RefCycle { limit: usize },
    /// A required property is missing.
    Required { property: String },
    /// A reference could not be resolved to a schema document.
    Resolver { url: Url, error: SchemaResolverError },
    /// Malformed schema construct, e.g. an uncompilable regular expression.
    Schema,
    /// The input value doesn't match one or multiple required types.
    Type { kind: TypeKind },
    /// The input array has non-unique elements.
    UniqueItems,
}

#[derive(Debug)]
#[allow(missing_docs)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple(Vec<PrimitiveType>),
}

/// Per-branch errors of a composite keyword.
///
/// Branch errors are not computed when the composite error is produced.
/// [`Subschemas::into_errors`] re-validates each branch with the context the
/// composite keyword saw, so most callers that only count failures never pay
/// for the branch details. Errors that cross an external document boundary
/// are collected eagerly, because the transient document cannot be borrowed
/// past it.
pub struct Subschemas<'a>(Inner<'a>);

enum Inner<'a> {
    Deferred {
        scope: &'a Schema<'a>,
        base: Url,
        depth: usize,
        branches: Vec<Branch<'a>>,
    },
    Collected(Vec<Vec<ValidationError<'a>>>),
}

/// One branch of a composite keyword: the subschema, the instance value it
/// was applied to and the location of that value.
pub(crate) struct Branch<'a> {
    pub(crate) schema: &'a Value,
    pub(crate) instance: &'a Value,
    pub(crate) instance_path: JSONPointer,
}

impl<'a> Subschemas<'a> {
    pub(crate) fn deferred(
        scope: &'a Schema<'a>,
        base: Url,
        depth: usize,
        branches: Vec<Branch<'a>>,
    ) -> Subschemas<'a> {
        Subschemas(Inner::Deferred {
            scope,
            base,
            depth,
            branches,
        })
    }

    /// The number of branches the composite keyword evaluated.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            Inner::Deferred { branches, .. } => branches.len(),
            Inner::Collected(errors) => errors.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every branch and return its errors, in branch order.
    ///
    /// Branches that accepted the instance contribute an empty vector.
    #[must_use]
    pub fn into_errors(self) -> Vec<Vec<ValidationError<'a>>> {
        match self.0 {
            Inner::Deferred {
                scope,
                base,
                depth,
                branches,
            } => branches
                .into_iter()
                .map(|branch| {
                    let instance_path = InstancePath::with_base(&branch.instance_path);
                    let context = EvalContext::with_scope(&base, depth);
                    validator::validate_node(
                        scope,
                        branch.schema,
                        branch.instance,
                        &instance_path,
                        &context,
                    )
                })
                .collect(),
            Inner::Collected(errors) => errors,
        }
    }

    fn into_owned(self) -> Subschemas<'static> {
        Subschemas(Inner::Collected(
            self.into_errors()
                .into_iter()
                .map(|branch| branch.into_iter().map(ValidationError::into_owned).collect())
                .collect(),
        ))
    }
}

impl fmt::Debug for Subschemas<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subschemas")
            .field("branches", &self.len())
            .finish()
    }
}

/// Shortcuts for creation of specific error kinds.
impl<'a> ValidationError<'a> {
    fn new(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        kind: ValidationErrorKind,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            schema: Cow::Borrowed(schema),
            instance_path,
            kind,
            subschemas: None,
        }
    }

    /// Convert the error into its owned counterpart, untying it from the
    /// schema and instance it borrows. Branch errors of composite keywords
    /// are evaluated in the process.
    #[must_use]
    pub fn into_owned(self) -> ValidationError<'static> {
        ValidationError {
            instance: Cow::Owned(self.instance.into_owned()),
            schema: Cow::Owned(self.schema.into_owned()),
            instance_path: self.instance_path,
            kind: self.kind,
            subschemas: self.subschemas.map(Subschemas::into_owned),
        }
    }

    /// An error produced by a user-defined keyword.
    #[must_use]
    pub fn custom(
        keyword: impl Into<String>,
        instance_path: JSONPointer,
        instance: &'a Value,
        schema: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Custom {
                keyword: keyword.into(),
            },
        )
    }

    pub(crate) fn all_of(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        subschemas: Subschemas<'a>,
    ) -> ValidationError<'a> {
        ValidationError {
            subschemas: Some(subschemas),
            ..ValidationError::new(schema, instance_path, instance, ValidationErrorKind::AllOf)
        }
    }
    pub(crate) fn any_of(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        subschemas: Subschemas<'a>,
    ) -> ValidationError<'a> {
        ValidationError {
            subschemas: Some(subschemas),
            ..ValidationError::new(schema, instance_path, instance, ValidationErrorKind::AnyOf)
        }
    }
    pub(crate) fn one_of(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        subschemas: Subschemas<'a>,
    ) -> ValidationError<'a> {
        ValidationError {
            subschemas: Some(subschemas),
            ..ValidationError::new(schema, instance_path, instance, ValidationErrorKind::OneOf)
        }
    }
    pub(crate) fn contains(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        subschemas: Subschemas<'a>,
    ) -> ValidationError<'a> {
        ValidationError {
            subschemas: Some(subschemas),
            ..ValidationError::new(schema, instance_path, instance, ValidationErrorKind::Contains)
        }
    }
    pub(crate) fn backtrack_limit(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        error: fancy_regex::Error,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::BacktrackLimitExceeded { error },
        )
    }
    pub(crate) fn constant(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        expected_value: &Value,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Constant {
                expected_value: expected_value.clone(),
            },
        )
    }
    pub(crate) fn content_encoding(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        encoding: &str,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::ContentEncoding {
                content_encoding: encoding.to_string(),
            },
        )
    }
    pub(crate) fn content_media_type(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        media_type: &str,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::ContentMediaType {
                content_media_type: media_type.to_string(),
            },
        )
    }
    pub(crate) fn enumeration(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        options: &Value,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Enum {
                options: options.clone(),
            },
        )
    }
    pub(crate) fn exclusive_maximum(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::ExclusiveMaximum { limit },
        )
    }
    pub(crate) fn exclusive_minimum(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::ExclusiveMinimum { limit },
        )
    }
    pub(crate) fn false_schema(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::FalseSchema,
        )
    }
    pub(crate) fn format(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        format: &str,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Format {
                format: format.to_string(),
            },
        )
    }
    pub(crate) fn from_utf8(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        error: FromUtf8Error,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::FromUtf8 { error },
        )
    }
    pub(crate) fn invalid_reference(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        reference: String,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::InvalidReference { reference },
        )
    }
    pub(crate) fn invalid_url(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        error: url::ParseError,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::InvalidURL { error },
        )
    }
    pub(crate) fn invalid_schema_url(
        schema: &'a Value,
        error: url::ParseError,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Owned(Value::Null),
            schema: Cow::Borrowed(schema),
            instance_path: JSONPointer::default(),
            kind: ValidationErrorKind::InvalidURL { error },
            subschemas: None,
        }
    }
    pub(crate) fn max_items(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MaxItems { limit },
        )
    }
    pub(crate) fn maximum(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Maximum { limit },
        )
    }
    pub(crate) fn max_length(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MaxLength { limit },
        )
    }
    pub(crate) fn max_properties(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MaxProperties { limit },
        )
    }
    pub(crate) fn min_items(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MinItems { limit },
        )
    }
    pub(crate) fn minimum(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Minimum { limit },
        )
    }
    pub(crate) fn min_length(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MinLength { limit },
        )
    }
    pub(crate) fn min_properties(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MinProperties { limit },
        )
    }
    pub(crate) fn multiple_of(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        multiple_of: f64,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::MultipleOf { multiple_of },
        )
    }
    pub(crate) fn not(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError::new(schema, instance_path, instance, ValidationErrorKind::Not)
    }
    pub(crate) fn not_implemented(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        detail: impl Into<String>,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::NotImplemented {
                detail: detail.into(),
            },
        )
    }
    pub(crate) fn pattern(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        pattern: String,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Pattern { pattern },
        )
    }
    pub(crate) fn ref_cycle(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        limit: usize,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::RefCycle { limit },
        )
    }
    pub(crate) fn required(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        property: String,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Required { property },
        )
    }
    pub(crate) fn resolver(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        url: Url,
        error: SchemaResolverError,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Resolver { url, error },
        )
    }
    pub(crate) fn schema(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError::new(schema, instance_path, instance, ValidationErrorKind::Schema)
    }
    pub(crate) fn single_type_error(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        type_name: PrimitiveType,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Type {
                kind: TypeKind::Single(type_name),
            },
        )
    }
    pub(crate) fn multiple_type_error(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
        types: Vec<PrimitiveType>,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            },
        )
    }
    pub(crate) fn unique_items(
        schema: &'a Value,
        instance_path: JSONPointer,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError::new(
            schema,
            instance_path,
            instance,
            ValidationErrorKind::UniqueItems,
        )
    }
}

impl error::Error for ValidationError<'_> {}

/// Textual representation of various validation errors.
impl fmt::Display for ValidationError<'_> {
    #[allow(clippy::too_many_lines)] // The function is long but it does formatting only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::AllOf => write!(
                f,
                "{} is not valid under all of the given schemas",
                self.instance
            ),
            ValidationErrorKind::AnyOf => write!(
                f,
                "{} is not valid under any of the given schemas",
                self.instance
            ),
            ValidationErrorKind::BacktrackLimitExceeded { error } => write!(f, "{}", error),
            ValidationErrorKind::Constant { expected_value } => {
                write!(f, "{} was expected", expected_value)
            }
            ValidationErrorKind::Contains => write!(
                f,
                "None of {} are valid under the given schema",
                self.instance
            ),
            ValidationErrorKind::ContentEncoding { content_encoding } => write!(
                f,
                "{} is not compliant with \"{}\" content encoding",
                self.instance, content_encoding
            ),
            ValidationErrorKind::ContentMediaType { content_media_type } => write!(
                f,
                "{} is not compliant with \"{}\" media type",
                self.instance, content_media_type
            ),
            ValidationErrorKind::Custom { keyword } => write!(
                f,
                "{} is not valid under the \"{}\" keyword",
                self.instance, keyword
            ),
            ValidationErrorKind::Enum { options } => {
                write!(f, "{} is not one of {}", self.instance, options)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => write!(
                f,
                "{} is greater than or equal to the maximum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::ExclusiveMinimum { limit } => write!(
                f,
                "{} is less than or equal to the minimum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::FalseSchema => {
                write!(f, "False schema does not allow {}", self.instance)
            }
            ValidationErrorKind::Format { format } => {
                write!(f, "{} is not a \"{}\"", self.instance, format)
            }
            ValidationErrorKind::FromUtf8 { error } => write!(f, "{}", error),
            ValidationErrorKind::InvalidReference { reference } => {
                write!(f, "Invalid reference: {}", reference)
            }
            ValidationErrorKind::InvalidURL { error } => write!(f, "{}", error),
            ValidationErrorKind::MaxItems { limit } => write!(
                f,
                "{} has more than {} item{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::Maximum { limit } => write!(
                f,
                "{} is greater than the maximum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::MaxLength { limit } => write!(
                f,
                "{} is longer than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{} has more than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MinItems { limit } => write!(
                f,
                "{} has less than {} item{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "{} is less than the minimum of {}", self.instance, limit)
            }
            ValidationErrorKind::MinLength { limit } => write!(
                f,
                "{} is shorter than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{} has less than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.instance, multiple_of)
            }
            ValidationErrorKind::Not => {
                write!(f, "{} is not allowed for {}", self.schema, self.instance)
            }
            ValidationErrorKind::NotImplemented { detail } => {
                write!(f, "Not implemented: {}", detail)
            }
            ValidationErrorKind::OneOf => write!(
                f,
                "{} is not valid under exactly one of the given schemas",
                self.instance
            ),
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "{} does not match \"{}\"", self.instance, pattern)
            }
            ValidationErrorKind::RefCycle { limit } => write!(
                f,
                "More than {} reference hops; the schema is likely cyclic",
                limit
            ),
            ValidationErrorKind::Required { property } => {
                write!(f, "\"{}\" is a required property", property)
            }
            ValidationErrorKind::Resolver { url, error } => {
                write!(f, "Failed to resolve {}: {}", url, error)
            }
            ValidationErrorKind::Schema => write!(f, "Schema error"),
            ValidationErrorKind::Type {
                kind: TypeKind::Single(type_),
            } => write!(f, "{} is not of type \"{}\"", self.instance, type_),
            ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            } => write!(
                f,
                "{} is not of types {}",
                self.instance,
                types
                    .iter()
                    .map(|t| format!("\"{}\"", t))
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            ValidationErrorKind::UniqueItems => {
                write!(f, "{} has non-unique elements", self.instance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_type_error() {
        let instance = json!(42);
        let schema = json!({"type": "string"});
        let err = ValidationError::single_type_error(
            &schema,
            JSONPointer::default(),
            &instance,
            PrimitiveType::String,
        );
        assert_eq!(err.to_string(), "42 is not of type \"string\"")
    }

    #[test]
    fn multiple_types_error() {
        let instance = json!(42);
        let schema = json!({"type": ["string", "null"]});
        let err = ValidationError::multiple_type_error(
            &schema,
            JSONPointer::default(),
            &instance,
            vec![PrimitiveType::String, PrimitiveType::Null],
        );
        assert_eq!(err.to_string(), "42 is not of types \"string\", \"null\"")
    }
}
