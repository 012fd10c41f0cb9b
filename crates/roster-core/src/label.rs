//! Normalizing caller-supplied options into a key and a label.

/// An option value of unknown shape, as a widget receives it from its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Text(String),
    Integer(i64),
    Number(f64),
    /// A structured option carrying `key` and/or `label` fields.
    Record {
        key: Option<String>,
        label: Option<String>,
    },
    /// Anything else.
    Unknown,
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::Text(s.to_string())
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Candidate::Text(s)
    }
}

impl From<i64> for Candidate {
    fn from(n: i64) -> Self {
        Candidate::Integer(n)
    }
}

impl From<f64> for Candidate {
    fn from(n: f64) -> Self {
        Candidate::Number(n)
    }
}

/// The normalized form of a [`Candidate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyLabel {
    pub key: String,
    pub label: String,
}

/// Derive a `{key, label}` pair from an option of unknown shape.
///
/// Primitives use their text for both fields. Records use whichever of
/// `key`/`label` they carry for the missing one. Unrecognized shapes, and
/// records with neither field, yield empty strings.
///
/// ```
/// use roster_core::label::{derive_key_and_label, Candidate, KeyLabel};
///
/// assert_eq!(
///     derive_key_and_label(42.into()),
///     KeyLabel { key: "42".into(), label: "42".into() },
/// );
/// let record = Candidate::Record { key: Some("us".into()), label: Some("United States".into()) };
/// assert_eq!(derive_key_and_label(record).label, "United States");
/// assert_eq!(derive_key_and_label(Candidate::Unknown), KeyLabel::default());
/// ```
pub fn derive_key_and_label(candidate: Candidate) -> KeyLabel {
    match candidate {
        Candidate::Text(s) => KeyLabel {
            key: s.clone(),
            label: s,
        },
        Candidate::Integer(n) => {
            let s = n.to_string();
            KeyLabel {
                key: s.clone(),
                label: s,
            }
        }
        Candidate::Number(n) => {
            let s = n.to_string();
            KeyLabel {
                key: s.clone(),
                label: s,
            }
        }
        Candidate::Record {
            key: Some(key),
            label,
        } => KeyLabel {
            label: label.unwrap_or_else(|| key.clone()),
            key,
        },
        Candidate::Record {
            key: None,
            label: Some(label),
        } => KeyLabel {
            key: label.clone(),
            label,
        },
        Candidate::Record {
            key: None,
            label: None,
        }
        | Candidate::Unknown => KeyLabel::default(),
    }
}
