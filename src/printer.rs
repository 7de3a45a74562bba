use crate::token::{Token, TokenKind};

/// Renders a token as `<KIND> <lexeme> <literal>`.
pub fn print(token: &Token) -> String {
    format!("{} {} {}", token.kind, token.lexeme, literal(token))
}

pub fn literal(token: &Token) -> String {
    match &token.kind {
        TokenKind::String(s) => s.clone(),
        TokenKind::Number(n) => number(*n),
        _ => "null".to_string(),
    }
}

// Whole numbers keep one fractional digit, so `123` reads back as `123.0`.
fn number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token { kind, lexeme: lexeme.into(), line: 1 }
    }

    #[test]
    fn punctuation_has_null_literal() {
        assert_eq!("LEFT_PAREN ( null", print(&token(TokenKind::LeftParen, "(")));
    }

    #[test]
    fn two_character_operator() {
        assert_eq!("LESS_EQUAL <= null", print(&token(TokenKind::LessEqual, "<=")));
    }

    #[test]
    fn string_is_quoted_only_in_the_lexeme() {
        let t = token(TokenKind::String("hello".into()), "\"hello\"");
        assert_eq!("STRING \"hello\" hello", print(&t));
    }

    #[test]
    fn whole_number_gets_a_fractional_digit() {
        assert_eq!("NUMBER 123 123.0", print(&token(TokenKind::Number(123.0), "123")));
        assert_eq!("NUMBER 200.00 200.0", print(&token(TokenKind::Number(200.0), "200.00")));
    }

    #[test]
    fn fractional_number_is_printed_as_is() {
        assert_eq!("NUMBER 45.67 45.67", print(&token(TokenKind::Number(45.67), "45.67")));
    }

    #[test]
    fn identifier() {
        assert_eq!("IDENTIFIER foo null", print(&token(TokenKind::Identifier, "foo")));
    }

    #[test]
    fn end_of_file_has_an_empty_lexeme() {
        assert_eq!("EOF  null", print(&token(TokenKind::EndOfFile, "")));
    }
}
