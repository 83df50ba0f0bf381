use limbo_source::{CompileError, Position, Source};
use logos::Logos;
use std::fmt;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse())]
    NumberLit(f64),
    #[regex(r#""(\\.|[^"\\])*""#, |lex| lex.slice()[1..lex.slice().len() - 1].to_string())]
    StringLit(String),

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // compound assignment operators
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    AsteriskEquals,
    #[token("/=")]
    SlashEquals,

    // crement operators (postfix, statement position only)
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("**")]
    AsteriskAsterisk,
    #[token("//")]
    SlashSlash,
    // - assignment
    #[token("=")]
    Equals,
    // - comparison (condition position only)
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"#[^\n]*", logos::skip)] // line comments
    #[regex(r"/\*([^*]|\*[^/])*\*+/", logos::skip)] // block comments
    #[error]
    Error,

    /// Appended to the end of the token sequence by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// All multiplicative operators (including `**` and `//`) share one tier.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some((8, 9)),
            /* Multiplicative */
            TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::AsteriskAsterisk
            | TokenKind::SlashSlash => Some((10, 11)),
            _ => None,
        }
    }

    /// Returns `true` for the comparison operators accepted in condition position.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::EqualsEquals
                | TokenKind::NotEquals
                | TokenKind::GreaterThan
                | TokenKind::GreaterThanEquals
                | TokenKind::LessThan
                | TokenKind::LessThanEquals
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::NumberLit(_) => "number",
            TokenKind::StringLit(_) => "string",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::PlusEquals => "`+=`",
            TokenKind::MinusEquals => "`-=`",
            TokenKind::AsteriskEquals => "`*=`",
            TokenKind::SlashEquals => "`/=`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Asterisk => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::AsteriskAsterisk => "`**`",
            TokenKind::SlashSlash => "`//`",
            TokenKind::Equals => "`=`",
            TokenKind::EqualsEquals => "`==`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::GreaterThan => "`>`",
            TokenKind::GreaterThanEquals => "`>=`",
            TokenKind::LessThan => "`<`",
            TokenKind::LessThanEquals => "`<=`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Error => "unrecognized input",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

/// A classified lexical unit with its raw text and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Position,
}

/// Tracks line/column bookkeeping while walking the raw source in span order.
struct LineTracker {
    line: usize,
    line_start: usize,
    scanned: usize,
}

impl LineTracker {
    fn new() -> Self {
        Self {
            line: 1,
            line_start: 0,
            scanned: 0,
        }
    }

    /// Advances over `content` up to byte offset `target`, counting newlines.
    /// Skipped whitespace and comments pass through here as well, so embedded
    /// newlines still update the bookkeeping.
    fn advance_to(&mut self, content: &str, target: usize) {
        for (i, byte) in content.as_bytes()[self.scanned..target].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = self.scanned + i + 1;
            }
        }
        self.scanned = target;
    }

    fn position(&self, offset: usize) -> Position {
        Position {
            line: self.line,
            col: offset - self.line_start,
        }
    }
}

/// Tokenizes the entire source into an ordered sequence of [`Token`]s,
/// terminated by a single [`TokenKind::Eof`].
///
/// Whitespace and comments are recognized but not emitted. The first
/// unrecognized character sequence aborts tokenization with a lexical error.
pub fn tokenize(source: &Source) -> Result<Vec<Token>, CompileError> {
    let mut lexer = TokenKind::lexer(source.content);
    let mut tracker = LineTracker::new();
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        tracker.advance_to(source.content, span.start);
        let pos = tracker.position(span.start);

        if kind == TokenKind::Error {
            return Err(CompileError::lexical(
                format!("unrecognized character sequence `{}`", lexer.slice()),
                pos,
            ));
        }

        tokens.push(Token {
            kind,
            lexeme: lexer.slice().to_string(),
            pos,
        });
        tracker.advance_to(source.content, span.end);
    }

    tracker.advance_to(source.content, source.content.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        pos: tracker.position(source.content.len()),
    });

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let source = source.into();
        tokenize(&source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn classifies_literals_and_identifiers() {
        assert_eq!(
            kinds(r#"let pos = 1.5; say("hi");"#),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("pos".to_string()),
                TokenKind::Equals,
                TokenKind::NumberLit(1.5),
                TokenKind::Semi,
                TokenKind::Identifier("say".to_string()),
                TokenKind::OpenParen,
                TokenKind::StringLit("hi".to_string()),
                TokenKind::CloseParen,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_operators_win_over_prefixes() {
        // A first-match-wins scan over single characters would see `=` `=` here.
        assert_eq!(
            kinds("== != <= >= ++ -- += -= *= /= ** //"),
            vec![
                TokenKind::EqualsEquals,
                TokenKind::NotEquals,
                TokenKind::LessThanEquals,
                TokenKind::GreaterThanEquals,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::PlusEquals,
                TokenKind::MinusEquals,
                TokenKind::AsteriskEquals,
                TokenKind::SlashEquals,
                TokenKind::AsteriskAsterisk,
                TokenKind::SlashSlash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(
            kinds("while whilex"),
            vec![
                TokenKind::While,
                TokenKind::Identifier("whilex".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped_but_counted() {
        let source = "let x = 1; # trailing\n/* a\nblock */ x++;".into();
        let tokens = tokenize(&source).unwrap();

        let x = &tokens[5];
        assert_eq!(x.kind, TokenKind::Identifier("x".to_string()));
        // The line comment and the two-line block comment both advanced the line count.
        assert_eq!(x.pos, Position { line: 3, col: 9 });
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let source = "let x = 1;\n  x += 2;".into();
        let tokens = tokenize(&source).unwrap();

        assert_eq!(tokens[0].pos, Position { line: 1, col: 0 }); // let
        assert_eq!(tokens[3].pos, Position { line: 1, col: 8 }); // 1
        assert_eq!(tokens[5].pos, Position { line: 2, col: 2 }); // x
        assert_eq!(tokens[6].pos, Position { line: 2, col: 4 }); // +=
    }

    #[test]
    fn unrecognized_input_is_a_lexical_error() {
        let source = "let x = @;".into();
        let err = tokenize(&source).unwrap_err();
        assert_eq!(err.kind(), limbo_source::ErrorKind::Lexical);
        assert_eq!(err.pos(), Some(Position { line: 1, col: 8 }));
    }

    #[test]
    fn lexemes_reconstruct_the_significant_input() {
        let source_text = "let x = 1 ; # comment\nx += 2 ;";
        let source = source_text.into();
        let rebuilt: String = tokenize(&source)
            .unwrap()
            .iter()
            .map(|token| token.lexeme.as_str())
            .collect();

        let significant: String = source_text
            .replace("# comment", "")
            .split_whitespace()
            .collect();
        assert_eq!(rebuilt, significant);
    }
}
