//! Validator for the `format` keyword.
use crate::{
    ecma,
    error::ValidationError,
    options::FormatBehavior,
    paths::InstancePath,
    schema::Schema,
    schemas::Draft,
};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Url;

// RFC 3339 `full-date` is exactly `YYYY-MM-DD`; the parser alone would also
// accept unpadded fields
fn is_valid_date(item: &str) -> bool {
    let bytes = item.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| {
            if idx == 4 || idx == 7 {
                *byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
        && NaiveDate::parse_from_str(item, "%Y-%m-%d").is_ok()
}

fn is_valid_datetime(item: &str) -> bool {
    DateTime::parse_from_rfc3339(item).is_ok()
}

fn two_digits(bytes: &[u8]) -> Option<u8> {
    match bytes {
        &[tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

// RFC 3339 `full-time`: `HH:MM:SS`, an optional fraction and a zone
fn is_valid_time(item: &str) -> bool {
    match item.find(|ch: char| matches!(ch, 'Z' | 'z' | '+' | '-')) {
        Some(at) => {
            let (time, offset) = item.split_at(at);
            is_valid_partial_time(time) && is_valid_offset(offset)
        }
        None => false,
    }
}

fn is_valid_partial_time(time: &str) -> bool {
    let hms = match time.split_once('.') {
        Some((hms, fraction)) => {
            if fraction.is_empty() || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
                return false;
            }
            hms
        }
        None => time,
    };
    let bytes = hms.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return false;
    }
    match (
        two_digits(&bytes[..2]),
        two_digits(&bytes[3..5]),
        two_digits(&bytes[6..]),
    ) {
        // 60 covers leap seconds
        (Some(hours), Some(minutes), Some(seconds)) => {
            hours <= 23 && minutes <= 59 && seconds <= 60
        }
        _ => false,
    }
}

fn is_valid_offset(offset: &str) -> bool {
    if offset == "Z" || offset == "z" {
        return true;
    }
    let bytes = offset.as_bytes();
    bytes.len() == 6
        && (bytes[0] == b'+' || bytes[0] == b'-')
        && bytes[3] == b':'
        && matches!(
            (two_digits(&bytes[1..3]), two_digits(&bytes[4..])),
            (Some(hours), Some(minutes)) if hours <= 23 && minutes <= 59
        )
}

fn is_valid_email(item: &str) -> bool {
    item.contains('@')
}

fn is_valid_hostname(item: &str) -> bool {
    !(item.ends_with('-')
        || item.starts_with('-')
        || item.is_empty()
        || item.chars().count() > 255
        || item
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
        || item.split('.').any(|part| part.chars().count() > 63))
}

fn is_valid_idn_hostname(item: &str) -> bool {
    !(item.ends_with('-')
        || item.starts_with('-')
        || item.is_empty()
        || item.chars().count() > 255
        || item
            .chars()
            .any(|c| !(c.is_alphanumeric() || c == '-' || c == '.'))
        || item.split('.').any(|part| part.chars().count() > 63))
}

fn is_valid_ipv4(item: &str) -> bool {
    item.parse::<Ipv4Addr>().is_ok()
}

fn is_valid_ipv6(item: &str) -> bool {
    item.parse::<Ipv6Addr>().is_ok()
}

fn is_valid_json_pointer(item: &str) -> bool {
    if item.is_empty() {
        return true;
    }
    item.starts_with('/') && has_valid_escapes(item)
}

// RFC 6901 allows `~` only in the `~0` / `~1` escapes
fn has_valid_escapes(item: &str) -> bool {
    let mut chars = item.chars();
    while let Some(current) = chars.next() {
        if current == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return false;
        }
    }
    true
}

// A non-negative integer without leading zeros, then `#` or a pointer
fn is_valid_relative_json_pointer(item: &str) -> bool {
    let digits = item.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || (digits > 1 && item.starts_with('0')) {
        return false;
    }
    let rest = &item[digits..];
    rest == "#" || is_valid_json_pointer(rest)
}

fn is_valid_regex(item: &str) -> bool {
    ecma::convert_regex(item).is_ok()
}

fn is_valid_uri(item: &str) -> bool {
    Url::parse(item).is_ok()
}

// The reference repertoires of RFC 3986 / RFC 3987. Component structure is
// checked loosely; the character set and the single-fragment rule are not.
fn is_reference(item: &str, unicode: bool) -> bool {
    let mut seen_fragment = false;
    for ch in item.chars() {
        match ch {
            '#' if seen_fragment => return false,
            '#' => seen_fragment = true,
            'A'..='Z' | 'a'..='z' | '0'..='9' => {}
            '-' | '.' | '_' | '~' | ':' | '/' | '?' | '[' | ']' | '@' | '!' | '$' | '&'
            | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%' => {}
            _ if unicode && !ch.is_ascii() && !ch.is_control() => {}
            _ => return false,
        }
    }
    true
}

fn is_valid_uri_reference(item: &str) -> bool {
    is_reference(item, false)
}

fn is_valid_iri_reference(item: &str) -> bool {
    is_reference(item, true)
}

// RFC 6570: literals interleaved with `{...}` expressions
fn is_valid_uri_template(item: &str) -> bool {
    let mut chars = item.chars();
    while let Some(current) = chars.next() {
        if current == '{' {
            let mut expression = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(ch) => expression.push(ch),
                    None => return false,
                }
            }
            if !is_valid_template_expression(&expression) {
                return false;
            }
        } else if !is_valid_template_literal(current) {
            return false;
        }
    }
    true
}

// Template literals: printable characters minus the ones the grammar reserves
fn is_valid_template_literal(ch: char) -> bool {
    !ch.is_control()
        && !matches!(
            ch,
            ' ' | '"' | '\'' | '<' | '>' | '\\' | '^' | '`' | '{' | '}' | '|'
        )
}

fn is_valid_template_expression(expression: &str) -> bool {
    let rest = match expression.chars().next() {
        Some(operator) if "+#./;?&=,!@|".contains(operator) => {
            &expression[operator.len_utf8()..]
        }
        _ => expression,
    };
    !rest.is_empty() && rest.split(',').all(is_valid_template_variable)
}

fn is_valid_template_variable(variable: &str) -> bool {
    let name = variable.strip_suffix('*').unwrap_or(variable);
    let name = match name.split_once(':') {
        // The prefix length is 1-4 digits, not zero-padded
        Some((prefix, length)) => {
            if length.is_empty()
                || length.len() > 4
                || length.starts_with('0')
                || !length.bytes().all(|byte| byte.is_ascii_digit())
            {
                return false;
            }
            prefix
        }
        None => name,
    };
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '%'))
}

/// The built-in format table. Names a draft does not know are absent for it;
/// unknown names always pass.
fn default_format(draft: Draft, name: &str) -> Option<fn(&str) -> bool> {
    match name {
        "date-time" => Some(is_valid_datetime),
        "email" => Some(is_valid_email),
        "hostname" => Some(is_valid_hostname),
        "ipv4" => Some(is_valid_ipv4),
        "ipv6" => Some(is_valid_ipv6),
        "uri" => Some(is_valid_uri),
        "json-pointer" if draft != Draft::Draft4 => Some(is_valid_json_pointer),
        "uri-reference" if draft != Draft::Draft4 => Some(is_valid_uri_reference),
        "uri-template" if draft != Draft::Draft4 => Some(is_valid_uri_template),
        "date" if draft == Draft::Draft7 => Some(is_valid_date),
        "idn-email" if draft == Draft::Draft7 => Some(is_valid_email),
        "idn-hostname" if draft == Draft::Draft7 => Some(is_valid_idn_hostname),
        "iri" if draft == Draft::Draft7 => Some(is_valid_uri),
        "iri-reference" if draft == Draft::Draft7 => Some(is_valid_iri_reference),
        "regex" if draft == Draft::Draft7 => Some(is_valid_regex),
        "relative-json-pointer" if draft == Draft::Draft7 => Some(is_valid_relative_json_pointer),
        "time" if draft == Draft::Draft7 => Some(is_valid_time),
        _ => None,
    }
}

pub(crate) fn validate<'a>(
    scope: &'a Schema<'_>,
    node: &'a Value,
    format: &'a Value,
    instance: &'a Value,
    instance_path: &InstancePath,
    errors: &mut Vec<ValidationError<'a>>,
) {
    let name = match format.as_str() {
        Some(name) => name,
        None => {
            errors.push(ValidationError::schema(node, instance_path.into(), instance));
            return;
        }
    };
    let item = if let Value::String(item) = instance {
        item
    } else {
        return;
    };
    match scope.config().format(name) {
        Some(FormatBehavior::Disabled) => {}
        Some(FormatBehavior::Check(check)) => {
            if !check.as_ref()(item) {
                errors.push(ValidationError::format(
                    node,
                    instance_path.into(),
                    instance,
                    name,
                ));
            }
        }
        None => {
            if let Some(check) = default_format(scope.draft(), name) {
                if !check(item) {
                    errors.push(ValidationError::format(
                        node,
                        instance_path.into(),
                        instance,
                        name,
                    ));
                }
            }
        }
    }
}

pub(crate) fn is_valid(scope: &Schema<'_>, format: &Value, instance: &Value) -> bool {
    let name = match format.as_str() {
        Some(name) => name,
        None => return false,
    };
    let item = if let Value::String(item) = instance {
        item
    } else {
        return true;
    };
    match scope.config().format(name) {
        Some(FormatBehavior::Disabled) => true,
        Some(FormatBehavior::Check(check)) => check.as_ref()(item),
        None => default_format(scope.draft(), name).map_or(true, |check| check(item)),
    }
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, Schema};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"format": "date"}), &json!("2023-01-02"))]
    #[test_case(&json!({"format": "date-time"}), &json!("2023-01-02T03:04:05Z"))]
    #[test_case(&json!({"format": "time"}), &json!("12:00:00Z"))]
    #[test_case(&json!({"format": "time"}), &json!("12:00:00.123+05:30"))]
    #[test_case(&json!({"format": "time"}), &json!("23:59:60Z"); "leap second")]
    #[test_case(&json!({"format": "email"}), &json!("user@example.com"))]
    #[test_case(&json!({"format": "hostname"}), &json!("example.com"))]
    #[test_case(&json!({"format": "ipv4"}), &json!("127.0.0.1"))]
    #[test_case(&json!({"format": "ipv6"}), &json!("::1"))]
    #[test_case(&json!({"format": "uri"}), &json!("http://example.com/a"))]
    #[test_case(&json!({"format": "uri-reference"}), &json!("/relative/path"))]
    #[test_case(&json!({"format": "uri-template"}), &json!("http://example.com/~{username:4}/"))]
    #[test_case(&json!({"format": "uri-template"}), &json!("/map?{x,y}"))]
    #[test_case(&json!({"format": "uri-template"}), &json!("{+path}/here"))]
    #[test_case(&json!({"format": "json-pointer"}), &json!("/foo/0"))]
    #[test_case(&json!({"format": "relative-json-pointer"}), &json!("1/foo"))]
    #[test_case(&json!({"format": "relative-json-pointer"}), &json!("0#"))]
    #[test_case(&json!({"format": "regex"}), &json!("^a+$"))]
    #[test_case(&json!({"format": "no-such-format"}), &json!("anything"); "unknown formats pass")]
    #[test_case(&json!({"format": "ipv4"}), &json!(42); "non-strings pass")]
    fn format_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"format": "date"}), &json!("2023-1-2"))]
    #[test_case(&json!({"format": "date-time"}), &json!("not a timestamp"))]
    #[test_case(&json!({"format": "time"}), &json!("25:00:00Z"))]
    #[test_case(&json!({"format": "time"}), &json!("12:00:00"); "offset is required")]
    #[test_case(&json!({"format": "email"}), &json!("no-at-sign"))]
    #[test_case(&json!({"format": "hostname"}), &json!("-leading.dash"))]
    #[test_case(&json!({"format": "ipv4"}), &json!("2001:0db8:85a3:0000:0000:8a2e:0370:7334"))]
    #[test_case(&json!({"format": "ipv6"}), &json!("127.0.0.1"))]
    #[test_case(&json!({"format": "uri"}), &json!("not absolute"))]
    #[test_case(&json!({"format": "uri-reference"}), &json!("\\\\WORKGROUP\\share"))]
    #[test_case(&json!({"format": "uri-template"}), &json!("http://example.com/{unclosed"))]
    #[test_case(&json!({"format": "uri-template"}), &json!("with space/{x}"))]
    #[test_case(&json!({"format": "json-pointer"}), &json!("missing/slash"))]
    #[test_case(&json!({"format": "json-pointer"}), &json!("/foo/~2"))]
    #[test_case(&json!({"format": "relative-json-pointer"}), &json!("01/a"))]
    #[test_case(&json!({"format": "regex"}), &json!("[unclosed"))]
    fn format_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn date_is_unknown_to_draft6() {
        let schema = json!({"format": "date"});
        let compiled = Schema::draft6(&schema).unwrap();
        assert!(compiled.is_valid(&json!("not a date")));
    }

    #[test]
    fn error_message() {
        let schema = json!({"format": "ipv4"});
        let instance = json!("300.1.1.1");
        let error = tests_util::validate(&schema, &instance);
        assert_eq!(error.to_string(), "\"300.1.1.1\" is not a \"ipv4\"");
    }
}
