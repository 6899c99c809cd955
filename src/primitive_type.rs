//! Primitive types of JSON values, as used by the `type` keyword.
use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// For faster matching in the `type` keyword we use this enum instead of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

/// Whether `instance` belongs to the given primitive type.
///
/// Draft 4 requires integers to be mathematical integers at the lexical level,
/// later drafts also accept floats with a zero fractional part (`1.0`).
pub(crate) fn is_instance_of(
    instance: &Value,
    type_: PrimitiveType,
    strict_integers: bool,
) -> bool {
    match type_ {
        PrimitiveType::Array => instance.is_array(),
        PrimitiveType::Boolean => instance.is_boolean(),
        PrimitiveType::Integer => match instance {
            Value::Number(number) => {
                number.is_u64()
                    || number.is_i64()
                    || (!strict_integers
                        && number.as_f64().expect("Always valid").fract() == 0.)
            }
            _ => false,
        },
        PrimitiveType::Null => instance.is_null(),
        PrimitiveType::Number => instance.is_number(),
        PrimitiveType::Object => instance.is_object(),
        PrimitiveType::String => instance.is_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{is_instance_of, PrimitiveType};
    use serde_json::json;

    #[test]
    fn zero_fraction_floats_are_integers() {
        assert!(is_instance_of(&json!(1.0), PrimitiveType::Integer, false));
        assert!(!is_instance_of(&json!(1.5), PrimitiveType::Integer, false));
    }

    #[test]
    fn strict_integers_reject_floats() {
        assert!(!is_instance_of(&json!(1.0), PrimitiveType::Integer, true));
        assert!(is_instance_of(&json!(1), PrimitiveType::Integer, true));
    }
}
