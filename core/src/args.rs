//! Call-time argument classification.
//!
//! # Design
//! An endpoint call carries a flat argument list: first the positional URL
//! values (one per template placeholder, in template order), then an
//! alternating key/value tail. A key equal to [`JSON_KEY`] routes its paired
//! value into the JSON body slot; every other pair becomes a query
//! parameter, kept in encounter order with duplicates preserved. No schema
//! validation happens here — any key/value shape is accepted.

use serde_json::Value;

use crate::error::ApiError;

/// The reserved key marking a trailing pair as the JSON payload rather than
/// a query parameter.
pub const JSON_KEY: &str = "json";

/// One call-time argument.
///
/// A thin wrapper over [`serde_json::Value`] so call sites can mix strings,
/// numbers, booleans, and structured payloads in one flat list:
///
/// ```
/// use endpoint_core::Arg;
/// let args: Vec<Arg> = vec!["42".into(), "verbose".into(), true.into()];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arg(pub Value);

impl Arg {
    /// Render this argument as plain text, the form used for URL values and
    /// query keys/values. Strings are taken verbatim (no added quotes);
    /// everything else is rendered as compact JSON.
    pub fn as_text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg(Value::String(value.to_string()))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg(Value::String(value))
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg(Value::from(value))
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg(Value::from(value))
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg(Value::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg(Value::from(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg(Value::Bool(value))
    }
}

/// The classified form of a call's argument list.
#[derive(Debug, Clone, Default)]
pub struct CallArguments {
    /// Positional URL values, one per placeholder, in template order.
    pub url_values: Vec<String>,
    /// Query parameters in encounter order. Duplicate keys are all kept.
    pub query_pairs: Vec<(String, String)>,
    /// The value paired with the reserved [`JSON_KEY`], if any. When the
    /// key appears more than once, the last occurrence wins.
    pub json_payload: Option<Value>,
}

/// Split a flat argument list into URL values, query pairs, and an optional
/// JSON payload.
///
/// Exactly `param_count` leading arguments are consumed as URL values; too
/// few is an [`ApiError::Arity`] error. The remainder is iterated pairwise.
/// A trailing key with no paired value is also an arity error (`expected`
/// reports the argument count that would have completed the pair).
pub fn classify(args: &[Arg], param_count: usize) -> Result<CallArguments, ApiError> {
    if args.len() < param_count {
        return Err(ApiError::Arity {
            expected: param_count,
            supplied: args.len(),
        });
    }

    let (positional, trailing) = args.split_at(param_count);
    if trailing.len() % 2 != 0 {
        return Err(ApiError::Arity {
            expected: args.len() + 1,
            supplied: args.len(),
        });
    }

    let mut classified = CallArguments {
        url_values: positional.iter().map(Arg::as_text).collect(),
        ..Default::default()
    };

    for pair in trailing.chunks_exact(2) {
        let key = pair[0].as_text();
        if key == JSON_KEY {
            classified.json_payload = Some(pair[1].0.clone());
        } else {
            classified.query_pairs.push((key, pair[1].as_text()));
        }
    }

    Ok(classified)
}
