//! Fixed regex normalization stage
//!
//! Every text entry goes through the same four substitutions, in a fixed
//! order, before the dataset-specific [`TextCleaner`](crate::clean) runs:
//!
//! 1. Sentence punctuation (`. , ! ? ( ) -`) is surrounded with spaces so it
//!    tokenizes separately from the adjacent words.
//! 2. A fixed set of symbol characters is removed outright. Apostrophes are
//!    deliberately not in that set: contractions and possessives must survive
//!    as single tokens.
//! 3. Stray whitespace between an apostrophe and the following word is
//!    collapsed, rejoining possessives that step 1 may have split.
//! 4. Whitespace runs are squeezed to a single space.
//!
//! The output is lowercased and trimmed. Re-running the stage on its own
//! output yields the same string.

use regex::Regex;

/// Precompiled regex pipeline for the fixed normalization stage
#[derive(Debug)]
pub struct Normalizer {
    /// Symbol characters that are stripped from the text
    strip_symbols: Regex,

    /// Punctuation that gets isolated into its own token
    isolate_punctuation: Regex,

    /// Whitespace between an apostrophe and the following word
    rejoin_apostrophe: Regex,

    /// Runs of 2+ whitespace characters
    squeeze_whitespace: Regex,
}
//
impl Normalizer {
    /// Compile the normalization patterns
    ///
    /// Compilation happens once per pipeline, not once per row.
    pub fn new() -> Self {
        Self {
            strip_symbols: Regex::new(r##"[#"$%&()*+/:;<=>@\[\]^_`{|}~]"##)
                .expect("the symbol-stripping pattern should be a valid regex"),
            isolate_punctuation: Regex::new(r"([.,!?()-])")
                .expect("the punctuation-isolation pattern should be a valid regex"),
            rejoin_apostrophe: Regex::new(r"\b'\s+\b")
                .expect("the apostrophe-rejoining pattern should be a valid regex"),
            squeeze_whitespace: Regex::new(r"\s{2,}")
                .expect("the whitespace-squeezing pattern should be a valid regex"),
        }
    }

    /// Normalize one text entry
    pub fn apply(&self, entry: &str) -> String {
        let entry = self.isolate_punctuation.replace_all(entry, " ${1} ");
        let entry = self.strip_symbols.replace_all(&entry, "");
        let entry = self.rejoin_apostrophe.replace_all(&entry, "'");
        let entry = self.squeeze_whitespace.replace_all(&entry, " ");
        entry.to_lowercase().trim().to_owned()
    }
}
//
impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolates_punctuation_and_lowercases() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.apply("Hello, World!"), "hello , world !");
    }

    #[test]
    fn is_idempotent_on_its_own_output() {
        let normalizer = Normalizer::new();
        let once = normalizer.apply("Hello, World!");
        assert_eq!(normalizer.apply(&once), once);
    }

    #[test]
    fn keeps_contractions_whole() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.apply("I can't believe it!"), "i can't believe it !");
    }

    #[test]
    fn strips_symbol_characters() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.apply("rated #1 @home [truly] 100% great"),
            "rated 1 home truly 100 great"
        );
    }

    #[test]
    fn rejoins_spaced_possessives() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.apply("John' s book"), "john's book");
    }

    #[test]
    fn squeezes_whitespace_runs() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.apply("  so \t much\n\nspace  "), "so much space");
    }
}
