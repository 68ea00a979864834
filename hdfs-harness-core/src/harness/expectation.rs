use std::fmt;

/// What a case's scalar value must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The value must equal this text.
    Exact(String),
    /// The value must start with this text; anything after it is unchecked.
    Prefix(String),
}

impl Expectation {
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    pub fn prefix(text: impl Into<String>) -> Self {
        Self::Prefix(text.into())
    }

    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::Exact(expected) => actual == expected,
            Self::Prefix(prefix) => actual.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(expected) => write!(f, "{expected:?}"),
            Self::Prefix(prefix) => write!(f, "a value starting with {prefix:?}"),
        }
    }
}
