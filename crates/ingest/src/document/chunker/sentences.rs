//! Punctuation-based sentence splitting.
//!
//! A boundary is one of `.`, `!` or `?` followed by at least one whitespace
//! character. The terminator stays with the sentence it ends; the whitespace
//! run after it is dropped. Abbreviations, decimals and quotes are not
//! special-cased.

/// Lazily split `text` into sentences.
///
/// Empty and whitespace-only input yields no sentences at all. The iterator is
/// `Clone`, so a caller can walk the same split more than once.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    let rest = if text.trim().is_empty() { "" } else { text };
    Sentences { rest }
}

/// Number of whitespace-delimited words in `sentence`.
pub fn count_words(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Iterator returned by [`split_sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut chars = self.rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !is_terminator(c) {
                continue;
            }
            let sentence_end = i + c.len_utf8();
            let followed_by_space = chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
            if followed_by_space {
                let sentence = &self.rest[..sentence_end];
                self.rest = self.rest[sentence_end..].trim_start();
                return Some(sentence);
            }
        }

        let sentence = self.rest;
        self.rest = "";
        Some(sentence)
    }
}
