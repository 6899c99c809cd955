pub(crate) fn is_json(instance_string: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(instance_string).is_ok()
}

#[cfg(test)]
mod tests {
    use super::is_json;

    #[test]
    fn json_media_type() {
        assert!(is_json(r#"{"valid": true}"#));
        assert!(!is_json("{invalid"));
    }
}
