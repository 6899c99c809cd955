use std::string::FromUtf8Error;

pub(crate) fn is_base64(instance_string: &str) -> bool {
    base64::decode(instance_string).is_ok()
}

/// Decode a base64 string. `Ok(None)` means the input is not valid base64,
/// which is a validation failure rather than an engine failure.
pub(crate) fn from_base64(instance_string: &str) -> Result<Option<String>, FromUtf8Error> {
    match base64::decode(instance_string) {
        Ok(value) => Ok(Some(String::from_utf8(value)?)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{from_base64, is_base64};

    #[test]
    fn valid_base64() {
        assert!(is_base64("aGVsbG8="));
        assert_eq!(from_base64("aGVsbG8=").unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(!is_base64("a*GVsbG8="));
        assert_eq!(from_base64("a*GVsbG8=").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_propagates() {
        // 0xFF is not valid UTF-8
        assert!(from_base64("/w==").is_err());
    }
}
