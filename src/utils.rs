//! # Utilities Module
//!
//! ## Purpose
//! Common utility functions used throughout the analyzer for text
//! presentation, performance monitoring, and validation.
//!
//! ## Key Features
//! - Text truncation and preview helpers backing clause summaries
//! - Word counting used by the clause retention filter
//! - Performance measurement helpers
//! - Name sanitization for store keys

use std::time::Instant;

/// Performance timer for measuring operation duration
pub struct Timer {
    start: Instant,
    name: String,
}

/// Text presentation utilities
pub struct TextUtils;

impl Timer {
    /// Start a new timer with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop timer and log duration
    pub fn stop(self) -> u64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!("Timer '{}' completed in {}ms", self.name, elapsed);
        elapsed
    }
}

impl TextUtils {
    /// Truncate text to specified length with ellipsis.
    /// Splits on a character boundary so multi-byte text stays valid.
    pub fn truncate(text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
            format!("{}...", cut.trim_end())
        }
    }

    /// Extract a preview of the first `max_words` words
    pub fn extract_preview(text: &str, max_words: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().take(max_words).collect();
        let preview = words.join(" ");

        if words.len() >= max_words {
            format!("{}...", preview)
        } else {
            preview
        }
    }

    /// Count whitespace-separated words in text
    pub fn word_count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Sanitize text for safe display
    pub fn sanitize(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect()
    }

    /// Sanitize a generated name for use as a store key
    pub fn sanitize_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// Macro for timing code blocks
#[macro_export]
macro_rules! time_block {
    ($name:expr, $block:block) => {{
        let timer = $crate::utils::Timer::new($name);
        let result = $block;
        timer.stop();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(TextUtils::truncate("Hello world", 20), "Hello world");
        assert_eq!(TextUtils::truncate("This is a very long text", 10), "This is...");
    }

    #[test]
    fn test_extract_preview() {
        assert_eq!(TextUtils::extract_preview("one two three", 5), "one two three");
        assert_eq!(TextUtils::extract_preview("one two three four", 2), "one two...");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(TextUtils::word_count("the party shall  pay"), 4);
        assert_eq!(TextUtils::word_count("   "), 0);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(TextUtils::sanitize_name("SECTION 1."), "SECTION_1.");
        assert_eq!(TextUtils::sanitize_name("a/b:c"), "a_b_c");
    }
}
