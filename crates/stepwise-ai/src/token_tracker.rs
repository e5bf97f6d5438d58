//! Token usage accounting for a session.

use std::collections::BTreeMap;

use crate::TokenUsage;

/// Cumulative token usage, overall and per provider.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_provider: BTreeMap<String, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage reported for one model call.
    pub fn record(&mut self, provider: &str, usage: &TokenUsage) {
        add(&mut self.total, usage);
        add(
            self.by_provider.entry(provider.to_string()).or_default(),
            usage,
        );
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_provider(&self, provider: &str) -> Option<&TokenUsage> {
        self.by_provider.get(provider)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// One line per provider, e.g. `gemini: 3 calls, 120 in / 45 out`.
    pub fn summary(&self) -> String {
        if self.call_count == 0 {
            return "no model calls yet".to_string();
        }
        let providers = self
            .by_provider
            .iter()
            .map(|(name, usage)| {
                format!(
                    "{name}: {} in / {} out",
                    usage.input_tokens, usage.output_tokens
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "{} calls, {} tokens ({providers})",
            self.call_count,
            self.total_tokens()
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn add(acc: &mut TokenUsage, usage: &TokenUsage) {
    acc.input_tokens = acc.input_tokens.saturating_add(usage.input_tokens);
    acc.output_tokens = acc.output_tokens.saturating_add(usage.output_tokens);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn records_per_provider_and_total() {
        let mut tracker = TokenTracker::new();
        tracker.record("gemini", &usage(100, 20));
        tracker.record("gemini", &usage(50, 10));
        tracker.record("scripted", &usage(1, 1));

        assert_eq!(tracker.call_count(), 3);
        assert_eq!(tracker.total_tokens(), 182);
        let gemini = tracker.for_provider("gemini").unwrap();
        assert_eq!(gemini.input_tokens, 150);
        assert_eq!(gemini.output_tokens, 30);
        assert!(tracker.for_provider("claude").is_none());
    }

    #[test]
    fn summary_mentions_each_provider() {
        let mut tracker = TokenTracker::new();
        assert_eq!(tracker.summary(), "no model calls yet");

        tracker.record("gemini", &usage(10, 5));
        assert_eq!(tracker.summary(), "1 calls, 15 tokens (gemini: 10 in / 5 out)");
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = TokenTracker::new();
        tracker.record("gemini", &usage(10, 5));
        tracker.reset();
        assert_eq!(tracker.call_count(), 0);
        assert_eq!(tracker.total_tokens(), 0);
        assert!(tracker.for_provider("gemini").is_none());
    }
}
