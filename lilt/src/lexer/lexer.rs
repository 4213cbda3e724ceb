// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::SourceLocation;

use super::{lookup_identifier, Token, TokenKind};

/// Byte-stream lexer with one-byte lookahead.
///
/// Rows and columns are 1-based and point at a token's first byte. A newline
/// is accounted for *after* the token preceding it has been emitted, which is
/// what makes the back-computation in [`Self::token_location`] line up.
pub struct Lexer {
    input: Vec<u8>,
    cursor: usize,

    char: u8,
    row: usize,
    column: usize,
    pending_newline: bool,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.as_bytes().to_vec(),
            cursor: 0,
            char: 0,
            row: 1,
            column: 1,
            pending_newline: false,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (kind, literal) = match self.char {
            b'"' => (TokenKind::Str, self.read_string()),

            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenKind::Eq, "==".to_string())
                } else {
                    (TokenKind::Assign, "=".to_string())
                }
            }

            b'+' => (TokenKind::Plus, "+".to_string()),
            b'-' => (TokenKind::Minus, "-".to_string()),
            b'*' => (TokenKind::Asterisk, "*".to_string()),

            b'/' => {
                if self.peek_char() == b'/' {
                    self.skip_comment();
                    return self.next_token();
                } else {
                    (TokenKind::Slash, "/".to_string())
                }
            }

            b'^' => (TokenKind::Caret, "^".to_string()),

            b'>' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenKind::Ge, ">=".to_string())
                } else {
                    (TokenKind::Gt, ">".to_string())
                }
            }

            b'<' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenKind::Le, "<=".to_string())
                } else {
                    (TokenKind::Lt, "<".to_string())
                }
            }

            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenKind::NotEq, "!=".to_string())
                } else {
                    (TokenKind::Bang, "!".to_string())
                }
            }

            // A lone `|` or `&` is taken as the doubled operator and eats
            // the byte after it.
            b'|' => {
                self.read_char();
                (TokenKind::Or, "||".to_string())
            }

            b'&' => {
                self.read_char();
                (TokenKind::And, "&&".to_string())
            }

            b'%' => (TokenKind::Percent, "%".to_string()),

            b'(' => (TokenKind::LeftParen, "(".to_string()),
            b')' => (TokenKind::RightParen, ")".to_string()),
            b'{' => (TokenKind::LeftBrace, "{".to_string()),
            b'}' => (TokenKind::RightBrace, "}".to_string()),
            b'[' => (TokenKind::LeftBracket, "[".to_string()),
            b']' => (TokenKind::RightBracket, "]".to_string()),
            b';' => (TokenKind::Semicolon, ";".to_string()),
            b',' => (TokenKind::Comma, ",".to_string()),
            b':' => (TokenKind::Colon, ":".to_string()),

            b'.' => {
                if is_digit(self.peek_char(), false) {
                    self.read_number()
                } else {
                    (TokenKind::Dot, ".".to_string())
                }
            }

            0 => (TokenKind::EndOfFile, "\u{0}".to_string()),

            ch if is_letter(ch) => {
                let word = self.read_identifier();
                (lookup_identifier(&word), word)
            }

            ch if is_digit(ch, true) => self.read_number(),

            ch => (TokenKind::Illegal, (ch as char).to_string()),
        };

        self.read_char();
        let location = self.token_location(literal.len());
        Token::new(kind, literal, location)
    }

    fn read_char(&mut self) {
        if self.pending_newline {
            self.row += 1;
            self.column = 1;
            self.pending_newline = false;
        }

        self.char = self.input.get(self.cursor).copied().unwrap_or(0);
        if self.char == b'\n' {
            self.pending_newline = true;
        }

        self.cursor += 1;
        self.column += 1;
    }

    fn peek_char(&self) -> u8 {
        self.input.get(self.cursor).copied().unwrap_or(0)
    }

    fn read_identifier(&mut self) -> String {
        let mut out = vec![self.char];

        while is_alphanumeric(self.peek_char()) {
            self.read_char();
            out.push(self.char);
        }

        String::from_utf8_lossy(&out).into_owned()
    }

    fn read_number(&mut self) -> (TokenKind, String) {
        let mut out = vec![self.char];
        let mut kind = TokenKind::Int;
        let mut expect_float = true;

        while is_digit(self.peek_char(), expect_float) {
            if self.char == b'.' {
                kind = TokenKind::Float;
                expect_float = false;
            }

            self.read_char();
            out.push(self.char);
        }

        (kind, String::from_utf8_lossy(&out).into_owned())
    }

    fn read_string(&mut self) -> String {
        let mut out = Vec::new();

        self.read_char();
        while self.char != b'"' && self.char != 0 {
            out.push(self.char);
            self.read_char();
        }

        String::from_utf8_lossy(&out).into_owned()
    }

    /// The column counter sits one past the byte after the token by the time
    /// the token is done, so the first byte sits `len + 1` places back.
    fn token_location(&self, literal_len: usize) -> SourceLocation {
        SourceLocation::new(self.row, self.column.saturating_sub(literal_len + 1))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.char, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn skip_comment(&mut self) {
        while self.char != b'\n' && self.char != 0 {
            self.read_char();
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            self.finished = true;
        }

        Some(token)
    }
}

const fn is_letter(char: u8) -> bool {
    char.is_ascii_lowercase() || char.is_ascii_uppercase() || char == b'_'
}

const fn is_digit(char: u8, expect_float: bool) -> bool {
    if expect_float {
        char.is_ascii_digit() || char == b'.'
    } else {
        char.is_ascii_digit()
    }
}

const fn is_alphanumeric(char: u8) -> bool {
    is_letter(char) || is_digit(char, false)
}
