//! Greedy word-boundary chunking.

use super::Chunk;

/// Split text into chunks of at most `chunk_size` characters.
///
/// Words are whitespace-delimited and joined with a single space. A word longer than
/// `chunk_size` is never broken and ends up alone in an oversized chunk.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > chunk_size {
            chunks.push(Chunk::new(chunks.len() + 1, std::mem::take(&mut current)));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(Chunk::new(chunks.len() + 1, current));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::join_chunks;

    #[test]
    fn test_empty_text() {
        assert!(split_into_chunks("", 10).is_empty());
        assert!(split_into_chunks("   \n\t ", 10).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = split_into_chunks("hello world", 4000);
        assert_eq!(chunks, vec![Chunk::new(1, "hello world".to_string())]);
    }

    #[test]
    fn test_greedy_packing() {
        let chunks = split_into_chunks("aa bb cc dd", 5);
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["aa bb", "cc dd"]);
        assert_eq!(chunks[0].position, 1);
        assert_eq!(chunks[1].position, 2);
    }

    #[test]
    fn test_long_word_gets_own_chunk() {
        let chunks = split_into_chunks("a supercalifragilistic b", 5);
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_bound_respected_except_long_words() {
        let text = "The quick brown fox jumps over the lazy dog while an extraordinarily \
                    longwordthatdoesnotfitanywhere sits quietly in the middle of it all";
        for size in 1..40 {
            for chunk in split_into_chunks(text, size) {
                let single_word = !chunk.content.contains(' ');
                assert!(chunk.char_len() <= size || single_word, "size {}: {:?}", size, chunk);
            }
        }
    }

    #[test]
    fn test_coverage_preserves_word_sequence() {
        let text = "  Một đoạn văn\nbằng tiếng Việt,\t with mixed   whitespace and words.  ";
        for size in [1, 3, 8, 20, 1000] {
            let chunks = split_into_chunks(text, size);
            let rejoined = join_chunks(&chunks);
            let original: Vec<_> = text.split_whitespace().collect();
            let restored: Vec<_> = rejoined.split_whitespace().collect();
            assert_eq!(original, restored, "size {}", size);
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "việt nam" is 8 characters but 10 bytes.
        let chunks = split_into_chunks("việt nam ơi", 8);
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["việt nam", "ơi"]);
    }

    #[test]
    fn test_nine_thousand_chars_make_three_chunks() {
        let text = vec!["word"; 1800].join(" ");
        assert_eq!(text.chars().count(), 8999);

        let chunks = split_into_chunks(&text, 4000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].char_len(), 3999);
        assert_eq!(chunks[1].char_len(), 3999);
        assert_eq!(chunks[2].char_len(), 999);
    }

    #[test]
    fn test_zero_chunk_size_treated_as_one() {
        let chunks = split_into_chunks("a b", 0);
        assert_eq!(chunks.len(), 2);
    }
}
