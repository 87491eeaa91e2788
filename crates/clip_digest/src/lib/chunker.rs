//! # Chunker
//!
//! Splits raw transcript text into bounded-size pieces for submission to the
//! generative-text service, cutting on sentence or line boundaries where
//! possible so each piece reads as coherent prose.

/// An ordered, 0-indexed piece of the source text.
///
/// Concatenating all chunks' content in index order reproduces the original
/// text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub content: String,
}

impl Chunk {
    /// Content size in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Splits `text` into chunks of at most `max_chunk_size` bytes.
///
/// Each cut prefers the position just after the last sentence terminator
/// (`.`, `!`, `?`) or newline within the allowed slice; when no such boundary
/// exists the cut lands at the size limit, snapped back to a `char` boundary.
/// A chunk exceeds the byte budget only when a single character is wider than
/// the budget itself.
///
/// The empty string yields no chunks; text within the budget yields exactly
/// one.
pub fn split_text(text: &str, max_chunk_size: usize) -> Vec<Chunk> {
    let max = max_chunk_size.max(1);

    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= max {
        return vec![Chunk {
            index: 0,
            content: text.to_string(),
        }];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.len() <= max {
            chunks.push(Chunk {
                index: chunks.len(),
                content: rest.to_string(),
            });
            break;
        }

        let cut = cut_point(rest, max);
        let (head, tail) = rest.split_at(cut);
        chunks.push(Chunk {
            index: chunks.len(),
            content: head.to_string(),
        });
        rest = tail;
    }

    chunks
}

/// Byte position to cut `text` at, at most `max` bytes in. Always lands on a
/// `char` boundary and always advances by at least one character.
fn cut_point(text: &str, max: usize) -> usize {
    let mut limit = max;
    while limit > 0 && !text.is_char_boundary(limit) {
        limit -= 1;
    }

    // a budget narrower than the first character still has to make progress
    if limit == 0 {
        return text.chars().next().map_or(text.len(), char::len_utf8);
    }

    match text[..limit].rfind(['.', '!', '?', '\n']) {
        Some(pos) => pos + 1,
        None => limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(chunks: &[Chunk]) -> String {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    /// `count` sentences of exactly `len` bytes each, ending in periods.
    fn sentences(count: usize, len: usize) -> String {
        assert!(len >= 2);
        let body = "a".repeat(len - 2);
        (0..count).map(|_| format!("{body}. ")).collect::<String>()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text("", 100).is_empty());
    }

    #[test]
    fn text_within_budget_yields_single_chunk() {
        let chunks = split_text("A short transcript.", 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content, "A short transcript.");
    }

    #[test]
    fn text_exactly_at_budget_yields_single_chunk() {
        let text = "a".repeat(50);
        let chunks = split_text(&text, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
    }

    #[test]
    fn concatenation_reproduces_original_exactly() {
        let inputs = [
            sentences(40, 30),
            "no terminators here just one long unbroken run of words ".repeat(20),
            "Mixed. Content! With? Newlines\nand periods. ".repeat(15),
            "Über älteren Bäumen. Später näherte sich der Igel. ".repeat(10),
        ];

        for text in &inputs {
            for max in [7, 50, 128, 1000] {
                let chunks = split_text(text, max);
                assert_eq!(
                    reassemble(&chunks),
                    *text,
                    "reconstruction must be exact for max={max}"
                );
            }
        }
    }

    #[test]
    fn chunks_are_never_empty_and_indices_are_sequential() {
        let text = sentences(25, 20);
        let chunks = split_text(&text, 64);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i, "indices must be assigned in order");
            assert!(!chunk.is_empty(), "chunk {i} must not be empty");
        }
    }

    #[test]
    fn chunks_respect_byte_budget() {
        let text = sentences(30, 25);
        for max in [10, 40, 100] {
            for chunk in split_text(&text, max) {
                assert!(
                    chunk.len() <= max,
                    "chunk of {} bytes exceeds budget {max}",
                    chunk.len()
                );
            }
        }
    }

    #[test]
    fn cuts_fall_after_sentence_terminators() {
        // sentences of 7 bytes each; a 10-byte budget forces a cut inside
        // the second sentence, which should snap back to the period
        let text = "abcdef. ghijkl. mnopqr. stuvwx.";
        let chunks = split_text(text, 10);

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.content.ends_with('.'),
                "non-final chunk {:?} should end at a sentence boundary",
                chunk.content
            );
        }
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn newline_counts_as_a_boundary() {
        let text = "first line\nsecond line without any terminator at all";
        let chunks = split_text(text, 16);

        assert!(chunks[0].content.ends_with('\n'));
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn cuts_at_limit_when_no_boundary_exists() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = split_text(text, 10);

        assert_eq!(chunks[0].content, "abcdefghij");
        assert_eq!(chunks[1].content, "klmnopqrst");
        assert_eq!(chunks[2].content, "uvwxyz");
    }

    #[test]
    fn never_cuts_inside_a_multibyte_character() {
        // each character is 3 bytes; a 7-byte budget cannot fit three
        let text = "日本語の文章です";
        let chunks = split_text(text, 7);

        for chunk in &chunks {
            assert!(chunk.content.chars().count() > 0);
            assert!(chunk.len() <= 7);
        }
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn budget_narrower_than_one_character_still_advances() {
        let text = "日本語";
        let chunks = split_text(text, 1);

        assert_eq!(chunks.len(), 3);
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn transcript_sized_input_splits_into_expected_chunks() {
        // 12 sentences of 1000 bytes: two full 5000-byte chunks plus the tail
        let text = sentences(12, 1000);
        assert_eq!(text.len(), 12_000);

        let chunks = split_text(&text, 5000);

        assert_eq!(chunks.len(), 3);
        assert_eq!(reassemble(&chunks), text);
    }
}
