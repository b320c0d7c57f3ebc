//! Frequency-ranked vocabulary over the cleaned text column
//!
//! The vocabulary maps each retained token to a unique non-negative index.
//! Three reserved tokens (padding, unknown, end-of-sequence) always occupy
//! indices 0, 1 and 2; the rest of the index space goes to the most frequent
//! corpus tokens, in decreasing frequency order, until the configured cap is
//! reached. The same ordered token list, with a `-1` frequency sentinel on
//! the reserved entries, is what the metadata artifact records.

use crate::Token;
use serde::Serialize;
use std::{cmp::Reverse, collections::HashMap};

/// Frequency as recorded in the metadata artifact
///
/// True occurrence counts for corpus tokens, [`RESERVED_FREQUENCY`] for the
/// reserved entries.
pub type TokenFrequency = i64;

/// Sentinel frequency of the reserved tokens
pub const RESERVED_FREQUENCY: TokenFrequency = -1;

/// Number of reserved tokens at the bottom of the index space
pub const NUM_RESERVED_TOKENS: usize = 3;

/// Token-to-index mapping over a cleaned corpus
#[derive(Clone, Debug)]
pub struct Vocabulary {
    /// Index of each retained token
    ///
    /// Indices are dense: every value in `0..indices.len()` is used exactly
    /// once, and a token keeps the first index it was assigned.
    indices: HashMap<Token, usize>,

    /// Ordered (token, frequency) list behind the metadata artifact
    ///
    /// Reserved tokens first, then corpus tokens by decreasing frequency.
    /// Unlike `indices`, this list is not deduplicated: a corpus token that
    /// collides with a reserved literal appears twice, as the original
    /// counting wrote it.
    entries: Vec<(Token, TokenFrequency)>,
}
//
impl Vocabulary {
    /// Build the vocabulary from the cleaned text column
    ///
    /// Tokenization is plain whitespace splitting. Equally frequent tokens
    /// rank in first-seen corpus order, which makes repeated runs over the
    /// same input produce identical artifacts.
    pub fn build<'c>(
        texts: impl IntoIterator<Item = &'c str>,
        reserved: [&str; NUM_RESERVED_TOKENS],
        cap: usize,
    ) -> Self {
        // Count token frequencies, remembering when each token first showed up
        let mut counts = HashMap::<&'c str, TokenCount>::new();
        for text in texts {
            for word in text.split_whitespace() {
                let first_seen = counts.len();
                counts
                    .entry(word)
                    .or_insert(TokenCount {
                        frequency: 0,
                        first_seen,
                    })
                    .frequency += 1;
            }
        }

        // Rank by decreasing frequency and keep whatever fits under the cap
        // once the reserved tokens have taken their slots
        let mut ranked = counts.into_iter().collect::<Vec<_>>();
        ranked.sort_unstable_by_key(|&(_word, count)| (Reverse(count.frequency), count.first_seen));
        ranked.truncate(cap.saturating_sub(NUM_RESERVED_TOKENS));

        // Lay out the ordered token list: reserved sentinels, then the corpus
        let mut entries = reserved
            .iter()
            .map(|token| (Token::from(*token), RESERVED_FREQUENCY))
            .collect::<Vec<_>>();
        entries.extend(ranked.into_iter().map(|(word, count)| {
            let frequency = TokenFrequency::try_from(count.frequency)
                .expect("token frequencies should fit in the metadata column");
            (Token::from(word), frequency)
        }));

        // Assign indices in list order, first index wins
        let mut indices = HashMap::with_capacity(entries.len());
        for (token, _frequency) in &entries {
            if !indices.contains_key(token) {
                indices.insert(token.clone(), indices.len());
            }
        }
        Self { indices, entries }
    }

    /// Number of distinct tokens in the mapping
    ///
    /// This is the effective vocabulary size, which may end up below the
    /// configured cap when the corpus has few distinct tokens.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index assigned to a token, if it was retained
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.indices.get(token).copied()
    }

    /// Rows of the metadata artifact, in file order
    pub fn metadata(&self) -> impl Iterator<Item = MetadataRow<'_>> + '_ {
        self.entries.iter().map(|(token, frequency)| MetadataRow {
            word: token,
            frequency: *frequency,
        })
    }
}

/// Row of the vocabulary metadata artifact
#[derive(Debug, Serialize)]
pub struct MetadataRow<'vocab> {
    /// Retained token
    #[serde(rename = "Word")]
    pub word: &'vocab str,

    /// True occurrence count, or -1 for reserved tokens
    #[serde(rename = "Frequency")]
    pub frequency: TokenFrequency,
}

/// Accumulated knowledge about one distinct token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct TokenCount {
    /// Occurrences across the whole cleaned column
    frequency: u64,

    /// How many distinct tokens were seen before this one
    first_seen: usize,
}
