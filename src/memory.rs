//! In-session memory store
//!
//! Keeps a seeded set of shared-history snippets plus everything said
//! this session, and retrieves the top-k snippets by word overlap with
//! the query. Purely in-memory; nothing is persisted across runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A retrieved fragment of prior context, supplied to the generator for
/// continuity. Opaque text, no internal structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySnippet {
    pub text: String,
}

/// Shared history the persona "remembers" from before this session.
const SEED_MEMORIES: &[&str] = &[
    "She loves sunflowers more than roses.",
    "Our first date was a rainy picnic we refused to cancel.",
    "She gets stressed before big reviews at work and needs reassurance, not advice.",
    "Stargazing on the rooftop is our thing.",
    "She laughs hardest at my worst puns.",
    "We watch movies in sync on Friday nights when we're apart.",
];

/// Memory store collaborator.
pub struct MemoryStore {
    snippets: Mutex<Vec<String>>,
    retrievals: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            snippets: Mutex::new(SEED_MEMORIES.iter().map(|s| s.to_string()).collect()),
            retrievals: AtomicUsize::new(0),
        }
    }

    /// How many retrievals ran this session. Session stat; also lets
    /// callers check that the retrieval gate behaved.
    pub fn retrievals(&self) -> usize {
        self.retrievals.load(Ordering::Relaxed)
    }

    /// Record a message so later retrievals can surface it.
    pub fn remember(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.snippets.lock().unwrap().push(text.to_string());
    }

    /// Return up to `k` snippets relevant to the query, best first.
    /// Relevance is lowercase word overlap; snippets with no overlap are
    /// never returned.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<MemorySnippet> {
        self.retrievals.fetch_add(1, Ordering::Relaxed);

        let query_words: Vec<String> = significant_words(query);
        if query_words.is_empty() {
            return Vec::new();
        }

        let snippets = self.snippets.lock().unwrap();
        let mut scored: Vec<(usize, &String)> = snippets
            .iter()
            .filter(|s| s.trim() != query.trim())
            .map(|s| (overlap(&query_words, s), s))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(k)
            .map(|(_, s)| MemorySnippet { text: s.clone() })
            .collect()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.snippets.lock().unwrap().len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn significant_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| w.len() >= 3)
        .collect()
}

fn overlap(query_words: &[String], snippet: &str) -> usize {
    let snippet_words = significant_words(snippet);
    query_words
        .iter()
        .filter(|w| snippet_words.contains(w))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_ranks_by_overlap() {
        let store = MemoryStore::new();
        let results = store.retrieve("I'm stressed about work again", 2);
        assert!(!results.is_empty());
        assert!(results.len() <= 2);
        assert!(results[0].text.contains("stressed"));
    }

    #[test]
    fn test_retrieve_no_overlap_returns_empty() {
        let store = MemoryStore::new();
        let results = store.retrieve("zzz qqq xyzzy", 2);
        assert!(results.is_empty());
    }

    #[test]
    fn test_retrieve_respects_k() {
        let store = MemoryStore::new();
        store.remember("work was rough today");
        store.remember("work work work");
        let results = store.retrieve("how was work", 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_remember_and_retrieve() {
        let store = MemoryStore::new();
        store.remember("we booked the cabin trip for October");
        let results = store.retrieve("excited about the cabin trip", 2);
        assert!(results.iter().any(|m| m.text.contains("cabin")));
    }

    #[test]
    fn test_remember_skips_empty() {
        let store = MemoryStore::new();
        let before = store.len();
        store.remember("   ");
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_retrievals_counted() {
        let store = MemoryStore::new();
        assert_eq!(store.retrievals(), 0);
        store.retrieve("stressed about work", 2);
        store.retrieve("zzz qqq", 2);
        assert_eq!(store.retrievals(), 2);
    }

    #[test]
    fn test_retrieve_skips_exact_query() {
        let store = MemoryStore::new();
        store.remember("thinking about the rooftop");
        let results = store.retrieve("thinking about the rooftop", 3);
        assert!(results.iter().all(|m| m.text != "thinking about the rooftop"));
    }
}
