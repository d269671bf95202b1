//! # Whitespace Tokenizer
//!
//! Splits a sentence into whitespace-delimited tokens with exact character
//! offsets. Punctuation stays attached to its word, so `"city,"` is a single
//! token. Offsets count Unicode scalar values, matching the offsets used in
//! annotation documents.

/// A token cut from a sentence, with its position in that sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, exactly as it appears in the sentence
    pub text: String,
    /// Start character offset in the sentence
    pub start: usize,
    /// End character offset (exclusive) in the sentence
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Whitespace tokenizer for story sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a sentence into a sequence of tokens.
    ///
    /// Whitespace (including U+001C..=U+001F) ends the current token and is
    /// dropped. Empty and whitespace-only sentences yield no tokens, and no
    /// token is ever empty.
    ///
    /// # Examples
    /// ```
    /// use softner_core::merge::tokenizer::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("Ann's  city, downtown");
    /// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["Ann's", "city,", "downtown"]);
    /// assert_eq!((tokens[1].start, tokens[1].end), (7, 12));
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_start = 0;
        let mut position = 0;

        for c in input.chars() {
            if is_separator(c) {
                if !current.is_empty() {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        start: current_start,
                        end: position,
                        index: tokens.len(),
                    });
                }
                current_start = position + 1;
            } else {
                current.push(c);
            }
            position += 1;
        }

        // Emit final token if non-empty
        if !current.is_empty() {
            tokens.push(Token {
                text: current,
                start: current_start,
                end: position,
                index: tokens.len(),
            });
        }

        tokens
    }
}

/// Unicode whitespace plus the information separators U+001C..=U+001F, which
/// the annotation tools also split on.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
