use crate::{
    error::{Error, Result},
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::Chars;
use tracing::{debug, trace};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Everything a full scan produced. Tokens always end with `EndOfFile`.
#[derive(Debug, Default, PartialEq)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<Error>,
}

impl Scanned {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Walks the whole source as one character stream. Yields every token in
/// order, then a single `EndOfFile`, with lexical errors interleaved where
/// they occur.
pub struct Scanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    line: usize,
    start_line: usize,
    reached_end: bool,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.lexeme_buffer.clear();
            self.start_line = self.line;

            let kind = match self.advance() {
                Some(c) => self.next_token_kind(c),
                None if self.reached_end => return None,
                None => {
                    self.reached_end = true;
                    Some(Ok(TokenKind::EndOfFile))
                }
            };

            match kind {
                None => continue,
                Some(Ok(kind)) => {
                    let token = Token {
                        kind,
                        lexeme: self.lexeme_buffer.clone(),
                        line: self.start_line,
                    };
                    trace!(line = token.line, kind = %token.kind, lexeme = %token.lexeme, "token");
                    return Some(Ok(token));
                }
                Some(Err(e)) => {
                    debug!(line = e.line(), "{}", e.kind());
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            line: 1,
            start_line: 1,
            reached_end: false,
        }
    }

    pub fn scan_tokens(self) -> Scanned {
        let mut scanned = Scanned::default();
        for result in self {
            match result {
                Ok(token) => scanned.tokens.push(token),
                Err(e) => scanned.errors.push(e),
            }
        }
        debug!(
            tokens = scanned.tokens.len(),
            errors = scanned.errors.len(),
            "scan finished"
        );
        scanned
    }

    /// `None` means the character was consumed without producing a token.
    fn next_token_kind(&mut self, c: char) -> Option<Result<TokenKind>> {
        use TokenKind::*;
        match c {
            '(' => Some(Ok(LeftParen)),
            ')' => Some(Ok(RightParen)),
            '{' => Some(Ok(LeftBrace)),
            '}' => Some(Ok(RightBrace)),
            ',' => Some(Ok(Comma)),
            '.' => Some(Ok(Dot)),
            '-' => Some(Ok(Minus)),
            '+' => Some(Ok(Plus)),
            ';' => Some(Ok(Semicolon)),
            '*' => Some(Ok(Star)),
            '!' => Some(Ok(if self.advance_if('=') { BangEqual } else { Bang })),
            '=' => Some(Ok(if self.advance_if('=') { EqualEqual } else { Equal })),
            '<' => Some(Ok(if self.advance_if('=') { LessEqual } else { Less })),
            '>' => Some(Ok(if self.advance_if('=') { GreaterEqual } else { Greater })),
            '/' => {
                if self.advance_if('/') {
                    // the newline itself is left for dispatch
                    self.advance_while(|n| n != '\n');
                    None
                } else {
                    Some(Ok(Slash))
                }
            }
            ' ' | '\r' | '\t' | '\n' => None,
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => Some(self.extract_number()),
            c if can_start_identifier(c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::unexpected_character(self.start_line, c))),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.peek_nth(0)
    }

    fn peek_nth(&mut self, n: usize) -> Option<char> {
        self.src.peek_nth(n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.src.next()?;
        if c == '\n' {
            self.line += 1;
        }
        self.lexeme_buffer.push(c);
        Some(c)
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance_while(&mut self, should_continue: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &should_continue) {
            self.advance();
        }
    }

    fn extract_string(&mut self) -> Result<TokenKind> {
        self.advance_while(|n| n != '"');
        match self.advance() {
            None => Err(Error::unterminated_string(self.start_line)),
            Some(_) => {
                // both quotes are single bytes
                let contents = &self.lexeme_buffer[1..self.lexeme_buffer.len() - 1];
                Ok(TokenKind::String(contents.to_string()))
            }
        }
    }

    fn extract_number(&mut self) -> Result<TokenKind> {
        self.advance_while(|n| n.is_ascii_digit());

        let has_fraction = self.peek() == Some('.')
            && self.peek_nth(1).map_or(false, |n| n.is_ascii_digit());
        if has_fraction {
            self.advance();
            self.advance_while(|n| n.is_ascii_digit());
        }

        match self.lexeme_buffer.parse() {
            Err(_) => Err(Error::invalid_number(self.start_line, self.lexeme_buffer.clone())),
            Ok(number) => Ok(TokenKind::Number(number)),
        }
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_while(is_part_of_valid_identifier);

        match KEYWORDS.get(self.lexeme_buffer.as_str()) {
            Some(kind) => kind.clone(),
            None => TokenKind::Identifier,
        }
    }
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
