//! URL template parsing and interpolation.
//!
//! # Design
//! A template like `"users/$id/$avatar.png"` is parsed once, when the
//! endpoint is declared, into an ordered segment list. Placeholder order is
//! the positional-parameter order of the generated endpoint: the first `$`
//! token binds the first URL value, and so on. A placeholder token keeps
//! everything from its first `.` onwards as a literal suffix, so
//! `$name.json` binds parameter `name` and re-emits `.json` after the
//! substituted value.

use crate::error::ApiError;

/// One piece of a parsed template: either literal text or a positional
/// placeholder with an optional preserved suffix (leading `.` included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder { name: String, suffix: Option<String> },
}

/// A URL template parsed into ordered segments. Immutable after parsing.
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
    param_count: usize,
}

impl UrlTemplate {
    /// Parse a template string.
    ///
    /// Tokens are produced by splitting on `/`. A token is a placeholder
    /// only if its *first* character is `$`; sigils elsewhere in a token
    /// are literal. A `$` token with no name (`"$"` or `"$.json"`) is a
    /// [`ApiError::Template`] error.
    pub fn parse(template: &str) -> Result<Self, ApiError> {
        let mut segments = Vec::new();
        let mut param_count = 0;

        for token in template.split('/') {
            match token.strip_prefix('$') {
                Some(rest) => {
                    let (name, suffix) = match rest.find('.') {
                        Some(dot) => (&rest[..dot], Some(rest[dot..].to_string())),
                        None => (rest, None),
                    };
                    if name.is_empty() {
                        return Err(ApiError::Template {
                            token: token.to_string(),
                        });
                    }
                    param_count += 1;
                    segments.push(Segment::Placeholder {
                        name: name.to_string(),
                        suffix,
                    });
                }
                None => segments.push(Segment::Literal(token.to_string())),
            }
        }

        Ok(Self {
            segments,
            param_count,
        })
    }

    /// Number of placeholders, which is the endpoint's positional arity.
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Placeholder names in left-to-right order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Placeholder { name, .. } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `values` into the placeholders, in order, and rejoin the
    /// segments with `/`. Supplying fewer values than placeholders is an
    /// [`ApiError::Arity`] error.
    pub fn interpolate(&self, values: &[String]) -> Result<String, ApiError> {
        if values.len() < self.param_count {
            return Err(ApiError::Arity {
                expected: self.param_count,
                supplied: values.len(),
            });
        }

        let mut next = values.iter();
        let rendered: Vec<String> = self
            .segments
            .iter()
            .map(|seg| match seg {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder { suffix, .. } => {
                    // Arity was checked above, so the iterator cannot run dry.
                    let value = next.next().map(String::as_str).unwrap_or_default();
                    match suffix {
                        Some(suffix) => format!("{value}{suffix}"),
                        None => value.to_string(),
                    }
                }
            })
            .collect();

        Ok(rendered.join("/"))
    }
}
