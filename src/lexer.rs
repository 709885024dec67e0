//! Lexical analysis for one pipeline segment: whitespace-separated tokens
//! with single- and double-quoted runs preserved verbatim.

use std::fmt;

/// Errors that can occur while tokenizing a segment.
#[derive(Debug, PartialEq, Eq)]
pub enum LexingError {
    /// A closing quote (single or double) was not found.
    UnfinishedQuote,
}

impl fmt::Display for LexingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexingError::UnfinishedQuote => write!(f, "unterminated quote"),
        }
    }
}

impl std::error::Error for LexingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
    in_word: bool,
}

impl LexingFSM {
    fn new(segment: &str) -> Self {
        LexingFSM {
            input: segment.chars().collect(),
            pos: 0,
            state: LexingState::Start,
            buffer: String::new(),
            in_word: false,
        }
    }

    fn make_tokens(mut self) -> Result<Vec<String>, LexingError> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
                LexingState::ReadingSingleQuote => self.handle_quote(ch, '\''),
                LexingState::ReadingDoubleQuote => self.handle_quote(ch, '"'),
            }
        }

        match self.state {
            LexingState::ReadingSingleQuote | LexingState::ReadingDoubleQuote => {
                return Err(LexingError::UnfinishedQuote);
            }
            _ => {}
        }

        if self.in_word {
            out.push(std::mem::take(&mut self.buffer));
        }

        Ok(out)
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '\'' => {
                self.in_word = true;
                self.state = LexingState::ReadingSingleQuote;
            }
            '"' => {
                self.in_word = true;
                self.state = LexingState::ReadingDoubleQuote;
            }
            c => {
                self.buffer.push(c);
                self.in_word = true;
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            c if c.is_whitespace() => {
                out.push(std::mem::take(&mut self.buffer));
                self.in_word = false;
                self.state = LexingState::Start;
            }
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            c => self.buffer.push(c),
        }
    }

    fn handle_quote(&mut self, ch: char, closing: char) {
        if ch == closing {
            self.state = LexingState::ReadingWord;
        } else {
            self.buffer.push(ch);
        }
    }
}

/// Split one pipeline segment into shell-style tokens.
///
/// Whitespace delimits tokens; quoted runs keep interior whitespace and may
/// sit mid-word, so `a"b c"d` lexes as the single token `ab cd`. An empty
/// quoted pair yields an empty token.
pub fn split_into_tokens(segment: &str) -> Result<Vec<String>, LexingError> {
    LexingFSM::new(segment).make_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        split_into_tokens(s).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(tokens("echo hello world"), vec!["echo", "hello", "world"]);
        assert_eq!(tokens("  spaced \t out  "), vec!["spaced", "out"]);
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(tokens(""), Vec::<String>::new());
        assert_eq!(tokens("   "), Vec::<String>::new());
    }

    #[test]
    fn test_quotes_preserve_whitespace() {
        assert_eq!(tokens("echo 'hello world'"), vec!["echo", "hello world"]);
        assert_eq!(tokens("echo \"a  b\""), vec!["echo", "a  b"]);
    }

    #[test]
    fn test_quotes_join_mid_word() {
        assert_eq!(tokens("a\"b c\"d"), vec!["ab cd"]);
        assert_eq!(tokens("pre'fix'"), vec!["prefix"]);
    }

    #[test]
    fn test_empty_quoted_token() {
        assert_eq!(tokens("echo ''"), vec!["echo", ""]);
    }

    #[test]
    fn test_other_quote_kind_is_literal() {
        assert_eq!(tokens("\"it's\""), vec!["it's"]);
    }

    #[test]
    fn test_unfinished_quote() {
        assert_eq!(
            split_into_tokens("echo 'oops"),
            Err(LexingError::UnfinishedQuote)
        );
        assert_eq!(
            split_into_tokens("echo \"oops"),
            Err(LexingError::UnfinishedQuote)
        );
    }
}
