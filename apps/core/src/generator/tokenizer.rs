//! Word tokenization, the substrate all analysis stages read.
//!
//! Case is preserved on purpose: capitalization is the signal the
//! participant detector works from.

use serde::{Deserialize, Serialize};

/// A single word token with its position in the token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: usize,
}

/// Splits raw text into word tokens.
///
/// Tokens are separated at whitespace; surrounding punctuation is stripped
/// while word-internal hyphens and apostrophes survive ("Budget-Review",
/// "don't"). A leading `#` is kept so hashtags stay recognizable downstream.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for raw in text.split_whitespace() {
        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '#');
        if trimmed.is_empty() {
            continue;
        }
        tokens.push(Token {
            text: trimmed.to_string(),
            position: tokens.len(),
        });
    }
    tokens
}

/// Joins a token window back into a text span.
pub fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_strips_punctuation() {
        let tokens = tokenize("Bitte erledige das, sofort!");
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Bitte", "erledige", "das", "sofort"]);
    }

    #[test]
    fn keeps_word_internal_hyphens_and_apostrophes() {
        let tokens = tokenize("Budget-Review don't");
        assert_eq!(tokens[0].text, "Budget-Review");
        assert_eq!(tokens[1].text, "don't");
    }

    #[test]
    fn keeps_hashtag_prefix() {
        let tokens = tokenize("check #urgent now");
        assert_eq!(tokens[1].text, "#urgent");
    }

    #[test]
    fn preserves_case() {
        let tokens = tokenize("Maria prüft");
        assert_eq!(tokens[0].text, "Maria");
    }

    #[test]
    fn positions_are_sequential() {
        let tokens = tokenize("eins ,, zwei drei");
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("?! ...").is_empty());
    }
}
