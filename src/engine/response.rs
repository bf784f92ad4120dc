//! Response selection and the classification response type.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How a template or fallback is picked from its pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Uniformly at random from the thread-local generator.
    #[default]
    Random,
    /// Uniformly at random from a generator seeded once with `seed`.
    Seeded { seed: u64 },
    /// Always the first usable entry.
    First,
}

/// Picks one non-blank entry from a pool of candidate texts.
pub struct ResponseSelector {
    strategy: SelectionStrategy,
    seeded: Option<Mutex<StdRng>>,
}

impl ResponseSelector {
    pub fn new(strategy: &SelectionStrategy) -> Self {
        let seeded = match strategy {
            SelectionStrategy::Seeded { seed } => Some(Mutex::new(StdRng::seed_from_u64(*seed))),
            _ => None,
        };
        ResponseSelector {
            strategy: strategy.clone(),
            seeded,
        }
    }

    pub fn strategy(&self) -> &SelectionStrategy {
        &self.strategy
    }

    /// Select a non-blank candidate, or `None` if there is none.
    pub fn select<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        let usable: Vec<&'a str> = candidates
            .iter()
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
            .collect();
        if usable.is_empty() {
            return None;
        }

        let idx = match (&self.strategy, &self.seeded) {
            (SelectionStrategy::First, _) => 0,
            (SelectionStrategy::Seeded { .. }, Some(rng)) => {
                rng.lock().random_range(0..usable.len())
            }
            _ => rand::rng().random_range(0..usable.len()),
        };
        Some(usable[idx])
    }
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// What a caller receives for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    /// Template for the recognized intent, or a fallback reply.
    pub response_text: String,
    /// Recognized intent, `None` when a fallback was returned.
    pub intent: Option<String>,
    /// Score of the top intent, `0.0` when nothing could be scored.
    pub confidence: f64,
    /// Wall-clock time spent answering.
    pub elapsed_ms: f64,
}

impl ClassifyResponse {
    pub fn is_fallback(&self) -> bool {
        self.intent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_first_skips_blank_entries() {
        let selector = ResponseSelector::new(&SelectionStrategy::First);

        assert_eq!(selector.select(&pool(&["  ", "one", "two"])), Some("one"));
        assert_eq!(selector.select(&pool(&["", " \n"])), None);
        assert_eq!(selector.select(&[]), None);
    }

    #[test]
    fn test_random_stays_in_pool() {
        let selector = ResponseSelector::new(&SelectionStrategy::Random);
        let candidates = pool(&["a", "b", "c"]);

        for _ in 0..50 {
            let picked = selector.select(&candidates).unwrap();
            assert!(candidates.iter().any(|c| c == picked));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let candidates = pool(&["a", "b", "c", "d", "e"]);
        let first = ResponseSelector::new(&SelectionStrategy::Seeded { seed: 7 });
        let second = ResponseSelector::new(&SelectionStrategy::Seeded { seed: 7 });

        let a: Vec<_> = (0..20).map(|_| first.select(&candidates).unwrap()).collect();
        let b: Vec<_> = (0..20).map(|_| second.select(&candidates).unwrap()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_strategy_serde() {
        let strategy: SelectionStrategy =
            serde_json::from_str(r#"{"strategy": "seeded", "seed": 42}"#).unwrap();
        assert_eq!(strategy, SelectionStrategy::Seeded { seed: 42 });

        let strategy: SelectionStrategy = serde_json::from_str(r#"{"strategy": "first"}"#).unwrap();
        assert_eq!(strategy, SelectionStrategy::First);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ClassifyResponse {
            response_text: "hi".to_string(),
            intent: None,
            confidence: 0.0,
            elapsed_ms: 1.5,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["responseText"], "hi");
        assert!(json["intent"].is_null());
        assert_eq!(json["elapsedMs"], 1.5);
        assert!(response.is_fallback());
    }
}
