//! Word-window text chunking

use crate::types::Chunk;

/// Splits text into bounded word-count windows suitable for embedding
pub struct Chunker {
    min_words: usize,
    max_words: usize,
}

impl Chunker {
    /// Create a chunker with the given word-count bounds
    pub fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
        }
    }

    /// Split `text` into chunks covering every word exactly once, in
    /// order, with no overlap.
    ///
    /// Every chunk except the last holds between `min_words` and
    /// `max_words` words. When the tail would otherwise fall below
    /// `min_words`, the final two windows are balanced: 1200 words
    /// with 500/800 bounds becomes 600 + 600 rather than 800 + 400.
    /// The final chunk may be shorter than `min_words` only when no
    /// balanced split exists. Empty input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let remaining = words.len() - start;
            let take = if remaining <= self.max_words {
                remaining
            } else if remaining >= self.max_words + self.min_words {
                self.max_words
            } else if remaining >= 2 * self.min_words {
                // Balance the final two windows
                remaining / 2
            } else {
                // No balanced split stays above the minimum; accept a
                // short final chunk
                self.min_words
            };

            chunks.push(Chunk {
                index: chunks.len() as u32,
                text: words[start..start + take].join(" "),
            });
            start += take;
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(500, 800)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = Chunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t  ").is_empty());
    }

    #[test]
    fn short_input_is_a_single_chunk() {
        let chunker = Chunker::default();
        let chunks = chunker.chunk(&words(100));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].word_count(), 100);
    }

    #[test]
    fn twelve_hundred_words_split_evenly() {
        let chunker = Chunker::default();
        let chunks = chunker.chunk(&words(1200));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count(), 600);
        assert_eq!(chunks[1].word_count(), 600);
    }

    #[test]
    fn all_chunks_respect_the_bounds() {
        let chunker = Chunker::default();
        for n in [500, 799, 800, 801, 900, 1000, 1299, 1300, 2000, 5000] {
            let chunks = chunker.chunk(&words(n));
            let (body, last) = chunks.split_at(chunks.len() - 1);
            for chunk in body {
                let count = chunk.word_count();
                assert!(
                    (500..=800).contains(&count),
                    "{} words: non-final chunk of {} words",
                    n,
                    count
                );
            }
            let count = last[0].word_count();
            assert!(count > 0 && count <= 800, "{} words: final chunk of {} words", n, count);
        }
    }

    #[test]
    fn concatenation_reconstructs_the_word_sequence() {
        let chunker = Chunker::default();
        for n in [1, 13, 800, 801, 1200, 1999, 4321] {
            let text = words(n);
            let original: Vec<&str> = text.split_whitespace().collect();
            let chunks = chunker.chunk(&text);
            let reconstructed: Vec<String> = chunks
                .iter()
                .flat_map(|c| c.text.split_whitespace().map(str::to_string))
                .collect();
            assert_eq!(reconstructed, original, "{} words", n);
        }
    }

    #[test]
    fn indexes_are_sequential() {
        let chunker = Chunker::default();
        let chunks = chunker.chunk(&words(3000));
        let indexes: Vec<u32> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, (0..chunks.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn tail_below_the_balance_point_stays_short() {
        // 900 words cannot be split into two chunks of at least 500, so
        // the final chunk falls below the minimum.
        let chunker = Chunker::default();
        let chunks = chunker.chunk(&words(900));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count(), 500);
        assert_eq!(chunks[1].word_count(), 400);
    }
}
