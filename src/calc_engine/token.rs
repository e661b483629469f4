use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    LeftParen,
    RightParen,
    Comma,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token { kind, text: text.into() }
    }

    /// Numeric literal with a trailing `i` denotes a pure-imaginary value.
    pub fn is_imaginary(&self) -> bool {
        self.kind == TokenKind::Number && self.text.ends_with('i')
    }
}

/// Splits a line into tokens. Unknown characters are dropped, so this never
/// fails; the result always ends with a single `End` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            _ if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        num_str.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if chars.peek() == Some(&'i') {
                    num_str.push('i');
                    chars.next();
                }
                tokens.push(Token::new(TokenKind::Number, num_str));
            }
            _ if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphabetic() {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::new(TokenKind::Identifier, ident));
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push(Token::new(TokenKind::Operator, c.to_string()));
                chars.next();
            }
            '(' => {
                tokens.push(Token::new(TokenKind::LeftParen, "("));
                chars.next();
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RightParen, ")"));
                chars.next();
            }
            ',' => {
                tokens.push(Token::new(TokenKind::Comma, ","));
                chars.next();
            }
            _ => {
                trace!(character = %c, "skipping unrecognized character");
                chars.next();
            }
        }
    }

    tokens.push(Token::new(TokenKind::End, ""));
    tokens
}
