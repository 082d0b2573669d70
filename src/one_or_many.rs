use serde::{Deserialize, Serialize};

/// A property that holds either a single value or a sequence of values.
///
/// Status list documents use this shape for `type` and `credentialStatus`.
/// Consumers normalize it with [`OneOrMany::into_vec`] right away.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(values) => values.is_empty(),
        }
    }

    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        match self {
            Self::One(value) => x == value,
            Self::Many(values) => values.contains(x),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl<'a> OneOrMany<&'a serde_json::Value> {
    /// Views a JSON value as a single object or an array of values.
    ///
    /// Returns `None` for anything else (absent, `null`, strings, numbers).
    pub fn from_json(value: &'a serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(values) => Some(Self::Many(values.iter().collect())),
            serde_json::Value::Object(_) => Some(Self::One(value)),
            _ => None,
        }
    }
}
