//! # jsonschemer
//!
//! A crate for JSON Schema validation with complete error reporting. Schema
//! and instance are walked together at validation time: references are
//! resolved lazily, every independently failing keyword produces an error
//! and composite keywords expose the failures of their branches.
//!
//! Supports:
//!   - JSON Schema drafts 4, 6, 7;
//!   - Loading remote documents through a pluggable resolver;
//!   - User-defined formats and keywords;
//!
//! ## Usage Examples:
//! A schema can be bound with two main flavours:
//!  * using default configuration (the draft is detected from `$schema`)
//! ```rust
//! # use jsonschemer::Schema;
//! # use serde_json::json;
//! # fn foo() {
//! # let schema = json!({"maxLength": 5});
//! let schema = Schema::new(&schema).expect("A valid schema");
//! # }
//! ```
//!  * using custom configuration (such as defining a draft version)
//! ```rust
//! # use jsonschemer::{Draft, Schema};
//! # use serde_json::json;
//! # fn foo() {
//! # let schema = json!({"maxLength": 5});
//! let schema = Schema::options()
//!     .with_draft(Draft::Draft7)
//!     .build(&schema)
//!     .expect("A valid schema");
//! # }
//! ```
//!
//! ## Example (printing errors)
//! ```rust
//! use jsonschemer::Schema;
//! use serde_json::json;
//!
//! let schema = json!({"maxLength": 5});
//! let instance = json!("foo bar baz");
//! let schema = Schema::new(&schema).expect("A valid schema");
//! if let Err(errors) = schema.validate(&instance) {
//!     for error in errors {
//!         println!("Validation error: {}", error);
//!         println!("Instance path: {}", error.instance_path);
//!     }
//! }
//! ```
//! Each error has an `instance_path` attribute that indicates the path to the
//! erroneous part within the validated instance. It could be transformed to
//! a JSON Pointer via `.to_string()` or to `Vec<String>` via `.into_vec()`.
#![warn(
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unreachable_pub,
    variant_size_differences
)]
#![allow(clippy::unnecessary_wraps, clippy::upper_case_acronyms)]
mod content_encoding;
mod content_media_type;
mod ecma;
pub mod error;
mod keywords;
mod options;
pub mod paths;
pub mod primitive_type;
mod resolver;
mod schema;
mod schemas;
mod validator;

pub use error::{ErrorIterator, Subschemas, TypeKind, ValidationError, ValidationErrorKind};
pub use options::{KeywordResult, SchemaOptions};
pub use paths::JSONPointer;
pub use primitive_type::PrimitiveType;
#[cfg(feature = "resolve-http")]
pub use resolver::HttpResolver;
pub use resolver::{DefaultResolver, SchemaResolver, SchemaResolverError};
pub use schema::Schema;
pub use schemas::Draft;

use serde_json::Value;

/// A shortcut for validating `instance` against `schema`. The draft version
/// is detected automatically.
/// ```rust
/// use jsonschemer::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// This function panics if an invalid schema is passed.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let schema = Schema::new(schema).expect("Invalid schema");
    schema.is_valid(instance)
}

#[cfg(test)]
pub(crate) mod tests_util {
    use super::Schema;
    use crate::ValidationError;
    use serde_json::Value;

    pub(crate) fn is_not_valid(schema: &Value, instance: &Value) {
        let compiled = Schema::new(schema).unwrap();
        assert!(
            !compiled.is_valid(instance),
            "{} should not be valid (via is_valid)",
            instance
        );
        assert!(
            compiled.validate(instance).is_err(),
            "{} should not be valid (via validate)",
            instance
        );
    }

    pub(crate) fn is_valid(schema: &Value, instance: &Value) {
        let compiled = Schema::new(schema).unwrap();
        assert!(
            compiled.is_valid(instance),
            "{} should be valid (via is_valid)",
            instance
        );
        assert!(
            compiled.validate(instance).is_ok(),
            "{} should be valid (via validate)",
            instance
        );
    }

    pub(crate) fn validate(schema: &Value, instance: &Value) -> ValidationError<'static> {
        let compiled = Schema::new(schema).unwrap();
        let error = compiled
            .validate(instance)
            .expect_err("Should be an error")
            .next()
            .expect("Should be an error")
            .into_owned();
        error
    }
}
