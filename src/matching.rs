//! Term matching shared by every component.
//!
//! Two terms match when either one contains the other, ignoring case.
//! Loose by nature: "pepper" matches "peppermint". Every lookup and safety
//! check goes through [`matches`].

use serde::{Deserialize, Serialize};

/// Case-insensitive bidirectional substring containment.
///
/// A term that is empty after trimming matches nothing.
pub fn matches(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Insertion-ordered set of terms, deduplicated case-insensitively.
///
/// The first spelling inserted is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TermSet {
    terms: Vec<String>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term. Returns `false` if an equal term (ignoring case) was already present.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Exact membership, ignoring case.
    pub fn contains(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        self.terms.iter().any(|t| t.to_lowercase() == lower)
    }

    /// True if any member [`matches`] `term`.
    pub fn any_match(&self, term: &str) -> bool {
        self.terms.iter().any(|t| matches(t, term))
    }

    pub fn union(&mut self, other: &TermSet) {
        for term in &other.terms {
            self.insert(term.clone());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TermSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for TermSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term);
        }
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl IntoIterator for TermSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl From<Vec<String>> for TermSet {
    fn from(terms: Vec<String>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<TermSet> for Vec<String> {
    fn from(set: TermSet) -> Self {
        set.terms
    }
}
