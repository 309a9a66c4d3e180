//! Greedy sentence packing with whole-sentence overlap.

use super::sentences::count_words;
use super::types::{ChunkConfig, ChunkSpan};

/// Pack consecutive sentences into spans of at most `config.chunk_size()` words.
///
/// A sentence that alone exceeds the budget becomes its own span; that is the
/// only way a span can go over size. After each span the builder backs off over
/// trailing sentences until the overlap budget is reached, then advances to
/// `max(candidate, end)`. The next span therefore never starts before the
/// first sentence the previous span left out, and the loop runs at most once
/// per sentence.
pub fn build_chunks(sentences: &[&str], config: &ChunkConfig) -> Vec<ChunkSpan> {
    let words: Vec<usize> = sentences.iter().map(|s| count_words(s)).collect();
    let total = sentences.len();
    let chunk_size = config.chunk_size();
    let mut spans = Vec::new();
    let mut start = 0;

    while start < total {
        // Greedy pack.
        let mut end = start;
        let mut word_count = 0;
        while end < total && word_count + words[end] <= chunk_size {
            word_count += words[end];
            end += 1;
        }
        // Forced inclusion of an oversized sentence.
        if end == start {
            end += 1;
        }

        spans.push(ChunkSpan {
            start,
            end: end - 1,
            text: join_sentences(&sentences[start..end]),
        });

        let next_start = advance(&words, start, end, config.overlap());
        if next_start <= start {
            tracing::warn!(start, next_start, "chunk builder made no progress, stopping");
            break;
        }
        start = next_start;
    }

    spans
}

/// Start of the next span.
///
/// Walks back from `end - 1` toward `start`, adding sentence word counts until
/// they reach `overlap`; the candidate is one past the last absorbed sentence.
/// The result is clamped to `end`.
fn advance(words: &[usize], start: usize, end: usize, overlap: usize) -> usize {
    let mut overlap_words = 0;
    let mut new_start = end - 1;
    while new_start > start && overlap_words < overlap {
        overlap_words += words[new_start];
        new_start -= 1;
    }
    (new_start + 1).max(end)
}

fn join_sentences(sentences: &[&str]) -> String {
    sentences.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: i64, overlap: i64) -> ChunkConfig {
        ChunkConfig::new(chunk_size, overlap).unwrap()
    }

    fn ranges(spans: &[ChunkSpan]) -> Vec<(usize, usize)> {
        spans.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn no_sentences_no_spans() {
        assert!(build_chunks(&[], &config(5, 1)).is_empty());
    }

    #[test]
    fn everything_fits_in_one_span() {
        let sentences = ["One two.", "Three four."];
        let spans = build_chunks(&sentences, &config(10, 2));
        assert_eq!(ranges(&spans), vec![(0, 1)]);
        assert_eq!(spans[0].text, "One two. Three four.");
    }

    #[test]
    fn zero_overlap_tiles_sentences() {
        let sentences = ["a b.", "c d.", "e f.", "g h."];
        let spans = build_chunks(&sentences, &config(4, 0));
        assert_eq!(ranges(&spans), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn backoff_never_restarts_inside_previous_span() {
        // 2 words each, budget 6: the walk absorbs "e f." but the advance is
        // clamped to the first sentence the span left out.
        let sentences = ["a b.", "c d.", "e f.", "g h.", "i j."];
        let spans = build_chunks(&sentences, &config(6, 2));
        assert_eq!(ranges(&spans), vec![(0, 2), (3, 4)]);
        assert_eq!(spans[1].text, "g h. i j.");
    }

    #[test]
    fn mixed_lengths_with_overlap() {
        let sentences = ["a b c.", "d e.", "f.", "g h i j.", "k l."];
        let spans = build_chunks(&sentences, &config(5, 3));
        assert_eq!(ranges(&spans), vec![(0, 1), (2, 3), (4, 4)]);
    }

    #[test]
    fn one_word_sentences_pack_in_pairs() {
        let sentences = ["a.", "b.", "c."];
        let spans = build_chunks(&sentences, &config(2, 1));
        assert_eq!(ranges(&spans), vec![(0, 1), (2, 2)]);
    }

    #[test]
    fn advance_is_clamped_to_end() {
        let words = [2, 2, 2, 2];
        assert_eq!(advance(&words, 0, 3, 2), 3);
        assert_eq!(advance(&words, 0, 3, 100), 3);
        assert_eq!(advance(&words, 2, 3, 5), 3);
        assert_eq!(advance(&words, 0, 3, 0), 3);
    }

    #[test]
    fn oversized_sentence_is_forced_alone() {
        let sentences = ["a b.", "c d e f g h.", "i j."];
        let spans = build_chunks(&sentences, &config(3, 1));
        assert_eq!(ranges(&spans), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(spans[1].text, "c d e f g h.");
    }

    #[test]
    fn span_text_is_trimmed() {
        let sentences = ["  leading space.", "tail."];
        let spans = build_chunks(&sentences, &config(10, 0));
        assert_eq!(spans[0].text, "leading space. tail.");
    }

    #[test]
    fn iterations_bounded_by_sentence_count() {
        let sentences: Vec<String> = (0..200).map(|i| format!("w{i} x{i}.")).collect();
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        for (size, overlap) in [(1, 0), (2, 1), (3, 2), (7, 6), (50, 49), (4, 100)] {
            let spans = build_chunks(&refs, &config(size, overlap));
            assert!(spans.len() <= refs.len(), "size={size} overlap={overlap}");
            assert_eq!(spans.last().map(|s| s.end), Some(refs.len() - 1));
        }
    }
}
