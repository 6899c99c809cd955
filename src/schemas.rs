use serde_json::Value;

/// JSON Schema Draft version
#[non_exhaustive]
#[derive(Debug, PartialEq, Copy, Clone, Hash, Eq)]
pub enum Draft {
    /// JSON Schema Draft 4
    Draft4,
    /// JSON Schema Draft 6
    Draft6,
    /// JSON Schema Draft 7
    Draft7,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Draft7
    }
}

impl Draft {
    /// Whether the given keyword is part of this draft's vocabulary.
    ///
    /// Keywords unknown to a draft are ignored there, matching how
    /// each draft of the specification treats unrecognized keywords.
    pub(crate) fn supports_keyword(self, keyword: &str) -> bool {
        match keyword {
            "const" | "contains" | "propertyNames" => self != Draft::Draft4,
            "contentEncoding" | "contentMediaType" => {
                matches!(self, Draft::Draft6 | Draft::Draft7)
            }
            "if" => self == Draft::Draft7,
            _ => true,
        }
    }

    /// Draft 4 pairs boolean `exclusiveMaximum` / `exclusiveMinimum` with
    /// `maximum` / `minimum`; later drafts use standalone numeric forms.
    pub(crate) const fn has_boolean_exclusive_bounds(self) -> bool {
        matches!(self, Draft::Draft4)
    }
}

/// Get the `Draft` from a JSON Schema URL.
#[inline]
pub(crate) fn draft_from_url(url: &str) -> Option<Draft> {
    match url {
        "http://json-schema.org/draft-07/schema#" => Some(Draft::Draft7),
        "http://json-schema.org/draft-06/schema#" => Some(Draft::Draft6),
        "http://json-schema.org/draft-04/schema#" => Some(Draft::Draft4),
        _ => None,
    }
}

/// Get the `Draft` from a JSON Schema.
#[inline]
pub(crate) fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema
        .get("$schema")
        .and_then(Value::as_str)
        .and_then(draft_from_url)
}

/// The identifier of a schema node. Draft 4 spells it `id`, later drafts `$id`.
#[inline]
pub(crate) fn id_of(draft: Draft, schema: &Value) -> Option<&str> {
    if let Value::Object(object) = schema {
        if draft == Draft::Draft4 {
            object.get("id")
        } else {
            object.get("$id")
        }
        .and_then(Value::as_str)
    } else {
        None
    }
}
