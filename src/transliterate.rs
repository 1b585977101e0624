/*!
 * Transliteration engine: applies an ordered rule table to a string.
 *
 * The engine itself is deliberately dumb. Every rule performs one full
 * left-to-right pass over the current buffer, replacing all non-overlapping
 * occurrences, before the next rule runs. All disambiguation (longer
 * patterns before shorter ones, protect before restore) lives in the table
 * order, not here, which keeps table maintenance data-driven and lets the
 * engine be tested against synthetic tables.
 */

use crate::rule_table::{Rule, RULE_TABLE};

/// Applies a rule table in order. Borrow a synthetic slice for tests, or
/// use [`Transliterator::default`] for the full legacy-font table.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'a> {
    rules: &'a [Rule],
}

impl<'a> Transliterator<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        Transliterator { rules }
    }

    /// Run the cascade over `input`.
    ///
    /// O(rules × text length): each rule scans the whole buffer. Fine at
    /// subtitle-line granularity. Text matching no rule comes back
    /// unchanged; the transformation is not idempotent and re-running it on
    /// already-converted text is unspecified.
    pub fn transliterate(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        let mut result = input.to_string();
        for rule in self.rules {
            if result.contains(rule.find.as_str()) {
                result = result.replace(rule.find.as_str(), &rule.replace);
            }
        }
        result
    }
}

impl Default for Transliterator<'static> {
    fn default() -> Self {
        Transliterator::new(&RULE_TABLE)
    }
}

/// Convenience wrapper over the process-wide table.
pub fn transliterate(input: &str) -> String {
    Transliterator::default().transliterate(input)
}
