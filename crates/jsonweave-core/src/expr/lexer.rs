//! Tokenization for expression snippets
//!
//! Single forward pass over the source; every token records the byte offset
//! where it starts so parse errors can point at it.

use super::ExpressionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Punct {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Colon,
    Question,
    QuestionQuestion,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    AndAnd,
    OrOr,
}

impl Punct {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
            Punct::Comma => ",",
            Punct::Dot => ".",
            Punct::Colon => ":",
            Punct::Question => "?",
            Punct::QuestionQuestion => "??",
            Punct::Plus => "+",
            Punct::Minus => "-",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::Percent => "%",
            Punct::Bang => "!",
            Punct::Lt => "<",
            Punct::Le => "<=",
            Punct::Gt => ">",
            Punct::Ge => ">=",
            Punct::EqEq => "==",
            Punct::NotEq => "!=",
            Punct::EqEqEq => "===",
            Punct::NotEqEq => "!==",
            Punct::AndAnd => "&&",
            Punct::OrOr => "||",
        }
    }
}

/// Operators, longest first so `===` wins over `==` and `=`
const PUNCTS: &[(&str, Punct)] = &[
    ("===", Punct::EqEqEq),
    ("!==", Punct::NotEqEq),
    ("==", Punct::EqEq),
    ("!=", Punct::NotEq),
    ("<=", Punct::Le),
    (">=", Punct::Ge),
    ("&&", Punct::AndAnd),
    ("||", Punct::OrOr),
    ("??", Punct::QuestionQuestion),
    ("(", Punct::LParen),
    (")", Punct::RParen),
    ("[", Punct::LBracket),
    ("]", Punct::RBracket),
    ("{", Punct::LBrace),
    ("}", Punct::RBrace),
    (",", Punct::Comma),
    (".", Punct::Dot),
    (":", Punct::Colon),
    ("?", Punct::Question),
    ("+", Punct::Plus),
    ("-", Punct::Minus),
    ("*", Punct::Star),
    ("/", Punct::Slash),
    ("%", Punct::Percent),
    ("!", Punct::Bang),
    ("<", Punct::Lt),
    (">", Punct::Gt),
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),
    Punct(Punct),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token
    pub offset: usize,
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut lexer = Lexer { source, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ExpressionError {
        ExpressionError::malformed(self.source, offset, message)
    }

    fn next_token(&mut self) -> Result<Token, ExpressionError> {
        let trimmed = self.rest().trim_start();
        self.pos = self.source.len() - trimmed.len();
        let offset = self.pos;

        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = if c.is_ascii_digit() {
            self.number()?
        } else if c == '"' || c == '\'' {
            self.string(c)?
        } else if is_ident_start(c) {
            let len = self
                .rest()
                .char_indices()
                .find(|&(_, ch)| !is_ident_continue(ch))
                .map(|(i, _)| i)
                .unwrap_or(self.rest().len());
            let ident = self.rest()[..len].to_string();
            self.pos += len;
            TokenKind::Ident(ident)
        } else {
            let (text, punct) = PUNCTS
                .iter()
                .find(|(text, _)| self.rest().starts_with(text))
                .ok_or_else(|| self.error(offset, format!("unexpected character '{}'", c)))?;
            self.pos += text.len();
            TokenKind::Punct(*punct)
        };

        Ok(Token { kind, offset })
    }

    fn number(&mut self) -> Result<TokenKind, ExpressionError> {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                    exp += 1;
                }
                end = exp;
            }
        }

        let text = &self.source[start..end];
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(start, format!("invalid number '{}'", text)))?;
        self.pos = end;
        Ok(TokenKind::Number(value))
    }

    fn string(&mut self, quote: char) -> Result<TokenKind, ExpressionError> {
        let start = self.pos;
        let mut out = String::new();
        let mut chars = self.rest().char_indices().skip(1);

        while let Some((i, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.pos = start + i + c.len_utf8();
                    return Ok(TokenKind::Str(out));
                }
                '\\' => {
                    let Some((j, escaped)) = chars.next() else {
                        break;
                    };
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'u' => {
                            let hex: String = chars.by_ref().take(4).map(|(_, h)| h).collect();
                            let ch = u32::from_str_radix(&hex, 16)
                                .ok()
                                .and_then(char::from_u32)
                                .ok_or_else(|| {
                                    self.error(start + j, format!("invalid unicode escape '\\u{}'", hex))
                                })?;
                            out.push(ch);
                        }
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }

        Err(self.error(start, "unterminated string literal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_bindings() {
        assert_eq!(
            kinds("$ $$ $keys"),
            vec![
                TokenKind::Ident("$".to_string()),
                TokenKind::Ident("$$".to_string()),
                TokenKind::Ident("$keys".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_longest_operator_first() {
        assert_eq!(
            kinds("a === b !== c <= d"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Punct(Punct::EqEqEq),
                TokenKind::Ident("b".to_string()),
                TokenKind::Punct(Punct::NotEqEq),
                TokenKind::Ident("c".to_string()),
                TokenKind::Punct(Punct::Le),
                TokenKind::Ident("d".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            kinds("1 2.5 3e2"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(2.5),
                TokenKind::Number(300.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_member_access_on_number_is_not_decimal() {
        // `1.x` is not a decimal; the dot stays a separate token
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Punct(Punct::Dot),
                TokenKind::Ident("x".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_strings_with_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "a\nb" "A""#),
            vec![
                TokenKind::Str("it's".to_string()),
                TokenKind::Str("a\nb".to_string()),
                TokenKind::Str("A".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_offsets() {
        let tokens = tokenize("  $ + 10").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("'abc").unwrap_err();
        assert!(matches!(err, ExpressionError::Malformed { offset: 0, .. }));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("$ # 1").unwrap_err();
        assert!(matches!(err, ExpressionError::Malformed { offset: 2, .. }));
    }
}
