use serde::{Deserialize, Serialize};

/// Default display rate, in USD per 1000 tokens.
pub const DEFAULT_USD_PER_1K_TOKENS: f64 = 0.06;

/// Running token counters for one session.
///
/// `total_tokens` only grows until [`UsageAccumulator::reset`] is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAccumulator {
    /// Tokens consumed by the most recent successful turn.
    pub last_turn_tokens: u64,
    /// Tokens consumed since the session started.
    pub total_tokens: u64,
}

impl UsageAccumulator {
    /// Creates a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the usage of one completion call into the counters.
    pub fn record(&mut self, tokens: u64) {
        self.last_turn_tokens = tokens;
        self.total_tokens = self.total_tokens.saturating_add(tokens);
    }

    /// Zeroes both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Estimated cost of `total_tokens` at `usd_per_1k` dollars per 1000
    /// tokens. Display only.
    pub fn estimated_cost(&self, usd_per_1k: f64) -> f64 {
        self.total_tokens as f64 * usd_per_1k / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut usage = UsageAccumulator::new();
        usage.record(120);
        usage.record(80);
        assert_eq!(usage.last_turn_tokens, 80);
        assert_eq!(usage.total_tokens, 200);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut usage = UsageAccumulator::new();
        usage.record(5000);
        usage.reset();
        assert_eq!(usage, UsageAccumulator::default());
    }

    #[test]
    fn test_record_saturates() {
        let mut usage = UsageAccumulator::new();
        usage.record(u64::MAX);
        usage.record(10);
        assert_eq!(usage.total_tokens, u64::MAX);
        assert_eq!(usage.last_turn_tokens, 10);
    }

    #[test]
    fn test_estimated_cost() {
        let mut usage = UsageAccumulator::new();
        usage.record(1000);
        let cost = usage.estimated_cost(DEFAULT_USD_PER_1K_TOKENS);
        assert!((cost - 0.06).abs() < f64::EPSILON);
    }
}
