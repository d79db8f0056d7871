//! Word tokenization.
//!
//! A word is a maximal run of non-whitespace characters, where whitespace is
//! the Unicode `White_Space` property (the same definition
//! [`str::split_whitespace`] uses). Runs of whitespace of any length separate
//! words and zero-length tokens never occur.
//!
//! ```text
//! "  The quick\n\nbrown   fox "
//!    ^^^ ^^^^^    ^^^^^   ^^^
//!    [2..5] [6..11] [13..18] [21..24]
//! ```
//!
//! This is the only definition of "word" in the crate: chunk budgets, word
//! counts, and document statistics all go through [`words`].

/// A word and its byte span in the text it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// The word text.
    pub text: &'a str,
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

/// Iterator over the words of a text. Created by [`words`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = Word<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let lead = rest.len() - rest.trim_start().len();
        let start = self.pos + lead;
        if start >= self.text.len() {
            self.pos = self.text.len();
            return None;
        }

        let len = self.text[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.text.len() - start);
        let end = start + len;
        self.pos = end;

        Some(Word {
            text: &self.text[start..end],
            start,
            end,
        })
    }
}

/// Split `text` into words with their byte spans.
///
/// ```rust
/// let spans: Vec<_> = quire::words("a  bc\nd").map(|w| (w.text, w.start)).collect();
/// assert_eq!(spans, [("a", 0), ("bc", 3), ("d", 6)]);
/// ```
pub fn words(text: &str) -> Words<'_> {
    Words { text, pos: 0 }
}

/// Number of words in `text`.
pub fn count_words(text: &str) -> usize {
    words(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_split_whitespace() {
        let text = " one\ttwo \n\n three\u{a0}four\u{3000}five  ";
        let ours: Vec<&str> = words(text).map(|w| w.text).collect();
        let std: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(ours, std);
    }

    #[test]
    fn test_spans_index_original() {
        let text = "  Hello,\n世界  again ";
        for word in words(text) {
            assert_eq!(&text[word.start..word.end], word.text);
        }
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t  "), 0);
        assert_eq!(words("   ").next(), None);
    }

    #[test]
    fn test_single_word_no_whitespace() {
        let all: Vec<Word<'_>> = words("word").collect();
        assert_eq!(
            all,
            [Word {
                text: "word",
                start: 0,
                end: 4
            }]
        );
    }
}
