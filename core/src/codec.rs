//! Query-string assembly and the JSON codec boundary.

use serde_json::Value;

use crate::error::ApiError;

/// Join query pairs into a query string: empty input yields `""`, otherwise
/// `"?k=v&k2=v2"` in input order.
///
/// Known gap, kept deliberately: keys and values are emitted verbatim with
/// no percent-encoding. Callers whose keys or values contain reserved URL
/// characters must pre-encode them.
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("?{}", joined.join("&"))
}

/// Serialize a JSON value to a request body.
///
/// serde_json never escapes forward slashes, which matters because bodies
/// frequently embed URLs.
pub fn encode_json(value: &Value) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Parse a response body as JSON.
pub fn decode_json(text: &str) -> Result<Value, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_pairs_yield_empty_string() {
        assert_eq!(build_query_string(&[]), "");
    }

    #[test]
    fn pairs_join_in_input_order() {
        let pairs = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ];
        assert_eq!(build_query_string(&pairs), "?a=1&b=2");
    }

    #[test]
    fn duplicate_keys_are_preserved() {
        let pairs = vec![
            ("tag".to_string(), "x".to_string()),
            ("tag".to_string(), "y".to_string()),
        ];
        assert_eq!(build_query_string(&pairs), "?tag=x&tag=y");
    }

    #[test]
    fn values_are_not_percent_encoded() {
        let pairs = vec![("q".to_string(), "a b&c".to_string())];
        assert_eq!(build_query_string(&pairs), "?q=a b&c");
    }

    #[test]
    fn encode_leaves_slashes_unescaped() {
        let body = encode_json(&json!({"url": "http://example.com/a/b"})).unwrap();
        assert!(body.contains("http://example.com/a/b"));
        assert!(!body.contains("\\/"));
    }

    #[test]
    fn json_roundtrip() {
        let value = json!({
            "name": "x",
            "nested": {"list": [1, 2.5, true, null], "s": "hi"}
        });
        let text = encode_json(&value).unwrap();
        assert_eq!(decode_json(&text).unwrap(), value);
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let err = decode_json("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
