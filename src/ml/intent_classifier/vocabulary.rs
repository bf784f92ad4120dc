//! Token vocabulary with stable first-seen indexes.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated tokens observed across the training documents.
///
/// Indexes are assigned in first-seen order and never change after
/// construction. Serialized as the plain token list; the lookup table is
/// rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `token` if unseen and return its index.
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&idx) = self.index.get(token) {
            return idx;
        }
        let idx = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), idx);
        idx
    }

    /// Index of `token`, or `None` when out of vocabulary.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Token stored at `idx`.
    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(tokens: Vec<String>) -> Self {
        let mut vocabulary = Vocabulary::new();
        for token in &tokens {
            vocabulary.insert(token);
        }
        vocabulary
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.tokens
    }
}

/// Build a vocabulary from token sequences, assigning indexes in first-seen order.
pub fn build_vocabulary<I, D, S>(documents: I) -> Vocabulary
where
    I: IntoIterator<Item = D>,
    D: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vocabulary = Vocabulary::new();
    for tokens in documents {
        for token in tokens {
            vocabulary.insert(token.as_ref());
        }
    }
    vocabulary
}
