// src/aot/signature.rs
//
// Signature keys and the metadata signature parser
//
// A signature key is `name(Type1,Type2)` with every parameter type reduced
// to its simple (last `.`-separated) name and its type arguments erased.
// Declared methods and processed metadata records are compared by key only.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Canonical identity of a method: name plus simple parameter type names in
/// declaration order. Overloads get distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureKey(String);

impl SignatureKey {
    /// Build a key, simplifying every parameter type.
    pub fn new<I, S>(name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let params = params
            .into_iter()
            .map(|p| simple_type_name(p.as_ref().trim()).to_string())
            .collect::<Vec<_>>()
            .join(",");
        SignatureKey(format!("{}({})", name, params))
    }

    /// Key for a processed-method record: the record's method name plus the
    /// parameter list parsed out of its full signature string.
    pub fn from_record(name: &str, signature: &str) -> Result<Self, SignatureError> {
        let params = parameter_types(signature)?;
        Ok(Self::new(name, params))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `java.math.BigDecimal` -> `BigDecimal`; names without a dot are returned as-is.
/// Type arguments are erased: `java.util.Collection<java.lang.Long>` -> `Collection`.
pub fn simple_type_name(qualified: &str) -> Cow<'_, str> {
    let (raw, suffix) = match (qualified.find('<'), qualified.rfind('>')) {
        (Some(open), Some(close)) if open < close => (&qualified[..open], &qualified[close + 1..]),
        _ => (qualified, ""),
    };

    let simple = match raw.rfind('.') {
        Some(idx) => &raw[idx + 1..],
        None => raw,
    };

    if suffix.is_empty() {
        Cow::Borrowed(simple)
    } else {
        Cow::Owned(format!("{}{}", simple, suffix))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("parameter list opened at byte {open} is never closed in '{signature}'")]
    Unterminated { signature: String, open: usize },

    #[error("empty parameter type at position {position} in '{signature}'")]
    EmptyType { signature: String, position: usize },
}

/// Parameter types of a full signature string such as
/// `public abstract java.util.List a.b.CoffeeRepository.findByName(java.lang.String)`.
///
/// Grammar of the tail: `name '(' (type (',' type)*)? ')'`. A signature with no
/// `(` at all, or with `()`, has no parameters. Commas inside `<...>` do not
/// separate parameters. Types are returned trimmed and still qualified.
pub fn parameter_types(signature: &str) -> Result<Vec<&str>, SignatureError> {
    let Some(open) = signature.find('(') else {
        return Ok(Vec::new());
    };

    let rest = &signature[open + 1..];
    let close = rest.find(')').ok_or_else(|| SignatureError::Unterminated {
        signature: signature.to_string(),
        open,
    })?;

    let list = rest[..close].trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(list)
        .into_iter()
        .map(str::trim)
        .enumerate()
        .map(|(position, ty)| {
            if ty.is_empty() {
                Err(SignatureError::EmptyType {
                    signature: signature.to_string(),
                    position,
                })
            } else {
                Ok(ty)
            }
        })
        .collect()
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(&list[start..]);
    parts
}
