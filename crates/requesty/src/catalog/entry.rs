//! Normalized catalog entries and the naming/ordering rules applied to them.

use std::cmp::Ordering;

use serde::Serialize;

/// Providers in listing order. Anything else sorts after these.
const PROVIDER_ORDER: [&str; 5] = ["anthropic", "openai", "google", "deepinfra", "together"];

/// Provider whose model names carry a path that is elided for display.
const TOGETHER: &str = "together";

/// One validated catalog row. Prices are per million tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub provider: String,
    pub model: String,
    pub input_price_per_million: f64,
    pub output_price_per_million: f64,
    /// Upstream timestamp, carried verbatim.
    pub updated_at: String,
}

/// Per-million-token prices for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pricing {
    pub input: f64,
    pub output: f64,
}

impl ModelEntry {
    /// Model name as shown to callers.
    ///
    /// Together models are reduced to their last path segment; every other
    /// provider keeps the raw name.
    pub fn display_model(&self) -> &str {
        if self.provider == TOGETHER {
            last_segment(&self.model)
        } else {
            &self.model
        }
    }

    /// Public `provider/model` identifier.
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.provider, self.display_model())
    }

    /// Whether both prices are strictly positive.
    pub fn is_purchasable(&self) -> bool {
        self.input_price_per_million > 0.0 && self.output_price_per_million > 0.0
    }

    pub fn pricing(&self) -> Pricing {
        Pricing {
            input: self.input_price_per_million,
            output: self.output_price_per_million,
        }
    }
}

/// Everything after the final `/`, or the whole string if there is none.
pub fn last_segment(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, tail)| tail)
}

fn provider_rank(provider: &str) -> usize {
    PROVIDER_ORDER
        .iter()
        .position(|p| *p == provider)
        .unwrap_or(PROVIDER_ORDER.len())
}

/// Listing order: provider priority, then model name (case-sensitive).
///
/// Unknown providers that share a model name fall back to provider name so the
/// result never depends on input order.
pub fn compare_entries(a: &ModelEntry, b: &ModelEntry) -> Ordering {
    provider_rank(&a.provider)
        .cmp(&provider_rank(&b.provider))
        .then_with(|| a.model.cmp(&b.model))
        .then_with(|| a.provider.cmp(&b.provider))
}

pub fn sort_entries(entries: &mut [ModelEntry]) {
    entries.sort_by(compare_entries);
}

#[cfg(test)]
pub(crate) fn entry(provider: &str, model: &str, input: f64, output: f64) -> ModelEntry {
    ModelEntry {
        provider: provider.to_string(),
        model: model.to_string(),
        input_price_per_million: input,
        output_price_per_million: output,
        updated_at: "2024-11-01T00:00:00Z".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_rules() {
        assert_eq!(last_segment("meta-llama/Llama-3-70b"), "Llama-3-70b");
        assert_eq!(last_segment("a/b/c"), "c");
        assert_eq!(last_segment("gpt-4o"), "gpt-4o");
        assert_eq!(last_segment(""), "");
    }

    #[test]
    fn together_identifier_uses_last_segment() {
        let e = entry("together", "meta-llama/Meta-Llama-3.1-8B", 0.2, 0.2);
        assert_eq!(e.identifier(), "together/Meta-Llama-3.1-8B");
    }

    #[test]
    fn other_providers_keep_full_model() {
        let e = entry("deepinfra", "meta-llama/Meta-Llama-3.1-8B", 0.1, 0.1);
        assert_eq!(e.identifier(), "deepinfra/meta-llama/Meta-Llama-3.1-8B");

        let e = entry("anthropic", "claude-3-5-sonnet-latest", 3.0, 15.0);
        assert_eq!(e.identifier(), "anthropic/claude-3-5-sonnet-latest");
    }

    #[test]
    fn purchasable_requires_both_prices() {
        assert!(entry("openai", "gpt-4o", 2.5, 10.0).is_purchasable());
        assert!(!entry("openai", "gpt-4o", 0.0, 10.0).is_purchasable());
        assert!(!entry("openai", "gpt-4o", 2.5, 0.0).is_purchasable());
    }

    #[test]
    fn sort_by_priority_then_model() {
        let mut entries = vec![
            entry("mistral", "large", 1.0, 1.0),
            entry("together", "x/b", 1.0, 1.0),
            entry("openai", "gpt-4o", 1.0, 1.0),
            entry("anthropic", "claude-3-opus", 1.0, 1.0),
            entry("google", "gemini-pro", 1.0, 1.0),
            entry("deepinfra", "llama", 1.0, 1.0),
            entry("anthropic", "claude-3-haiku", 1.0, 1.0),
            entry("openai", "GPT-legacy", 1.0, 1.0),
        ];
        sort_entries(&mut entries);

        let ids: Vec<String> = entries.iter().map(ModelEntry::identifier).collect();
        assert_eq!(
            ids,
            vec![
                "anthropic/claude-3-haiku",
                "anthropic/claude-3-opus",
                "openai/GPT-legacy", // uppercase sorts before lowercase
                "openai/gpt-4o",
                "google/gemini-pro",
                "deepinfra/llama",
                "together/b",
                "mistral/large",
            ]
        );
    }

    #[test]
    fn sort_is_independent_of_input_order() {
        let forward = vec![
            entry("zeta", "same", 1.0, 1.0),
            entry("alpha", "same", 1.0, 1.0),
            entry("together", "a/m", 1.0, 1.0),
            entry("openai", "o1", 1.0, 1.0),
        ];
        let mut a = forward.clone();
        let mut b: Vec<ModelEntry> = forward.into_iter().rev().collect();
        sort_entries(&mut a);
        sort_entries(&mut b);
        assert_eq!(a, b);
        assert_eq!(a[2].provider, "alpha");
        assert_eq!(a[3].provider, "zeta");
    }
}
