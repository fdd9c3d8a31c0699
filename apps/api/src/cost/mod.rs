//! Cost tracking for chat model usage.
//!
//! Converts reported token counts into money at configured per-million rates
//! and keeps process-lifetime totals plus a snapshot of the most recent call.
//! Each pool is rounded half-up to four decimals before summing, matching the
//! published pricing granularity; totals accumulate in integer
//! ten-thousandths of a currency unit so repeated additions stay exact.

pub mod handlers;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;

use crate::config::PricingConfig;

/// Fixed-point scale: 1 unit = 0.0001 of the configured currency.
const COST_SCALE: f64 = 10_000.0;

/// Snapshot of the most recent chat call. Overwritten on every call,
/// no history is kept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestCall {
    pub timestamp: DateTime<Utc>,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_cost: f64,
    pub input_cost: f64,
    pub output_cost: f64,
}

/// Process-lifetime usage accumulator. Shared behind an `Arc`; all methods
/// take `&self` so recording never blocks concurrent readers for long.
pub struct CostTracker {
    pricing: PricingConfig,
    total_input_tokens: AtomicU64,
    total_output_tokens: AtomicU64,
    total_cost_scaled: AtomicU64,
    latest: RwLock<Option<LatestCall>>,
}

impl CostTracker {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            pricing,
            total_input_tokens: AtomicU64::new(0),
            total_output_tokens: AtomicU64::new(0),
            total_cost_scaled: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Records the usage of one completed call and returns that call's total
    /// cost. Also feeds the Prometheus counters; the cost counter counts
    /// ten-thousandths of a currency unit.
    pub fn record(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_scaled = scaled_cost(input_tokens, self.pricing.input_per_million);
        let output_scaled = scaled_cost(output_tokens, self.pricing.output_per_million);
        let total_scaled = input_scaled + output_scaled;

        self.total_input_tokens
            .fetch_add(input_tokens, Ordering::Relaxed);
        self.total_output_tokens
            .fetch_add(output_tokens, Ordering::Relaxed);
        self.total_cost_scaled
            .fetch_add(total_scaled, Ordering::Relaxed);

        let call = LatestCall {
            timestamp: Utc::now(),
            input_tokens,
            output_tokens,
            total_cost: to_currency(total_scaled),
            input_cost: to_currency(input_scaled),
            output_cost: to_currency(output_scaled),
        };
        let call_cost = call.total_cost;

        counter!("gen_ai_client_tokens_input_total").increment(input_tokens);
        counter!("gen_ai_client_tokens_output_total").increment(output_tokens);
        counter!("gen_ai_client_cost_total").increment(total_scaled);

        *self.latest.write().expect("latest call lock poisoned") = Some(call);

        call_cost
    }

    pub fn total_cost(&self) -> f64 {
        to_currency(self.total_cost_scaled.load(Ordering::Relaxed))
    }

    pub fn total_input_tokens(&self) -> u64 {
        self.total_input_tokens.load(Ordering::Relaxed)
    }

    pub fn total_output_tokens(&self) -> u64 {
        self.total_output_tokens.load(Ordering::Relaxed)
    }

    pub fn latest_call(&self) -> Option<LatestCall> {
        self.latest
            .read()
            .expect("latest call lock poisoned")
            .clone()
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }
}

/// Cost of `tokens` at `rate_per_million`, in ten-thousandths of a currency
/// unit, rounded half-up. Zero tokens cost zero.
fn scaled_cost(tokens: u64, rate_per_million: f64) -> u64 {
    if tokens == 0 {
        return 0;
    }
    (tokens as f64 * rate_per_million / 100.0).round() as u64
}

fn to_currency(scaled: u64) -> f64 {
    scaled as f64 / COST_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> CostTracker {
        CostTracker::new(PricingConfig {
            input_per_million: 2.50,
            output_per_million: 10.00,
            currency: "USD".to_string(),
        })
    }

    #[test]
    fn test_million_tokens_each_pool() {
        let costs = tracker();
        let call_cost = costs.record(1_000_000, 1_000_000);

        assert_eq!(call_cost, 12.5);
        assert_eq!(costs.total_cost(), 12.5);
        assert_eq!(costs.total_input_tokens(), 1_000_000);
        assert_eq!(costs.total_output_tokens(), 1_000_000);
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        let costs = tracker();
        assert_eq!(costs.record(0, 0), 0.0);
        assert_eq!(costs.total_cost(), 0.0);

        let latest = costs.latest_call().unwrap();
        assert_eq!(latest.input_cost, 0.0);
        assert_eq!(latest.output_cost, 0.0);
    }

    #[test]
    fn test_costs_accumulate_exactly() {
        let costs = tracker();
        costs.record(1_000_000, 0);
        costs.record(1_000_000, 0);
        costs.record(1_000_000, 0);

        assert_eq!(costs.total_cost(), 7.5);
        assert_eq!(costs.total_input_tokens(), 3_000_000);
    }

    #[test]
    fn test_rounding_is_half_up_at_four_decimals() {
        let costs = tracker();
        // 20 input tokens at 2.50/M is exactly 0.00005, which rounds up
        let call_cost = costs.record(20, 0);
        assert_eq!(call_cost, 0.0001);
    }

    #[test]
    fn test_pools_round_independently_then_sum() {
        let costs = tracker();
        // input: 60 * 2.50 / 1M = 0.00015 -> 0.0002
        // output: 30 * 10.00 / 1M = 0.0003 -> 0.0003
        let call_cost = costs.record(60, 30);
        assert_eq!(call_cost, 0.0005);

        let latest = costs.latest_call().unwrap();
        assert_eq!(latest.input_cost, 0.0002);
        assert_eq!(latest.output_cost, 0.0003);
        assert_eq!(latest.total_cost, 0.0005);
    }

    #[test]
    fn test_record_returns_per_call_cost_not_running_total() {
        let costs = tracker();
        costs.record(1_000_000, 0);
        let second = costs.record(1_000_000, 0);

        assert_eq!(second, 2.5);
        assert_eq!(costs.total_cost(), 5.0);
    }

    #[test]
    fn test_latest_call_starts_empty_and_gets_overwritten() {
        let costs = tracker();
        assert!(costs.latest_call().is_none());

        costs.record(100, 10);
        costs.record(2_000_000, 500);

        let latest = costs.latest_call().unwrap();
        assert_eq!(latest.input_tokens, 2_000_000);
        assert_eq!(latest.output_tokens, 500);
        assert_eq!(latest.total_cost, 5.005);
    }
}
