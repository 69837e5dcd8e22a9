//! Ordered placeholder sets.
//!
//! A [`PlaceholderSet`] is an ordered list of `(token, value)` pairs. It is
//! assembled with a [`PlaceholderSetBuilder`] and frozen by `build()`.
//!
//! Substitution is pass-by-pass: the first pair is applied to the whole
//! text, then the second pair to the result, and so on. A later token may
//! therefore match text introduced by an earlier value.

use crate::error::{PacksmithError, Result};

/// An immutable, ordered set of placeholder substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    pairs: Vec<(String, String)>,
}

impl PlaceholderSet {
    /// Start building a new set.
    pub fn builder() -> PlaceholderSetBuilder {
        PlaceholderSetBuilder::default()
    }

    /// The `(token, value)` pairs in application order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the set has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Check if any token occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pairs
            .iter()
            .any(|(token, _)| !token.is_empty() && text.contains(token.as_str()))
    }

    /// Apply every pair to `text`, one pass per pair, in order.
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .fold(text.to_string(), |acc, (token, value)| {
                if acc.contains(token.as_str()) {
                    acc.replace(token.as_str(), value)
                } else {
                    acc
                }
            })
    }
}

/// Accumulates placeholder pairs before they are frozen into a set.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSetBuilder {
    pairs: Vec<(String, String)>,
}

impl PlaceholderSetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tokens[i] -> values[i]` for every `i`, keeping order.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedArity` if the slices differ in length; nothing is
    /// appended in that case.
    pub fn replace<T, V>(&mut self, tokens: &[T], values: &[V]) -> Result<&mut Self>
    where
        T: AsRef<str>,
        V: AsRef<str>,
    {
        if tokens.len() != values.len() {
            return Err(PacksmithError::MismatchedArity {
                tokens: tokens.len(),
                values: values.len(),
            });
        }

        self.pairs.extend(
            tokens
                .iter()
                .zip(values)
                .map(|(t, v)| (t.as_ref().to_string(), v.as_ref().to_string())),
        );
        Ok(self)
    }

    /// Append a single pair.
    pub fn pair(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((token.into(), value.into()));
        self
    }

    /// Number of pending pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pairs are pending.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Freeze the pending pairs into a [`PlaceholderSet`].
    pub fn build(&self) -> PlaceholderSet {
        PlaceholderSet {
            pairs: self.pairs.clone(),
        }
    }
}
