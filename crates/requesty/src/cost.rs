//! Cost estimates for a prompt/response pair.
//!
//! Token counts are approximated as one token per four characters. No real
//! tokenizer is involved, so figures are indicative only.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::ModelCatalog;

const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

/// Estimated cost of one exchange. `total` is always `input_cost + output_cost`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total: f64,
}

/// Approximate token count: `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

/// Prices exchanges using the cached catalog.
pub struct CostEstimator {
    catalog: Arc<ModelCatalog>,
}

impl CostEstimator {
    pub fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self { catalog }
    }

    /// Estimate the cost of sending `input` and receiving `output` on `model`.
    ///
    /// Unknown or unpriced models cost zero rather than failing.
    pub fn estimate(&self, input: &str, output: &str, model: &str) -> CostBreakdown {
        let Some(pricing) = self.catalog.get_pricing(model) else {
            debug!(model = %model, "No pricing for model, reporting zero cost");
            return CostBreakdown::default();
        };

        let input_tokens = estimate_tokens(input) as f64;
        let output_tokens = estimate_tokens(output) as f64;

        let input_cost = (input_tokens / TOKENS_PER_PRICE_UNIT) * pricing.input;
        let output_cost = (output_tokens / TOKENS_PER_PRICE_UNIT) * pricing.output;

        CostBreakdown {
            input_cost,
            output_cost,
            total: input_cost + output_cost,
        }
    }
}
