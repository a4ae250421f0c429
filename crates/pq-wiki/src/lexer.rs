use logos::Logos;
use std::fmt;

/// Token type for wiki markup.
///
/// The lexer is deliberately coarse — it only distinguishes the delimiters
/// that matter for template structure. Everything else is a `Text` run.
/// Pipes and equals signs are emitted as their own tokens; the parser
/// decides whether they separate parameters or belong to surrounding text
/// (e.g. inside a `[[...]]` link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Template opener `{{`.
    TemplateOpen,
    /// Template closer `}}`.
    TemplateClose,
    /// Link opener `[[`.
    LinkOpen,
    /// Link closer `]]`.
    LinkClose,
    /// Parameter separator `|`.
    Pipe,
    /// Key/value separator `=`.
    Eq,
    /// A run of ordinary text.
    Text(String),
}

impl Token {
    /// The verbatim source text of this token, used to reconstruct nested
    /// template content inside parameter values.
    pub fn as_source(&self) -> &str {
        match self {
            Token::TemplateOpen => "{{",
            Token::TemplateClose => "}}",
            Token::LinkOpen => "[[",
            Token::LinkClose => "]]",
            Token::Pipe => "|",
            Token::Eq => "=",
            Token::Text(s) => s,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_source())
    }
}

/// Internal logos token — borrows from source, converted to owned `Token`
/// after lexing.
#[derive(Logos, Debug)]
enum RawToken {
    #[token("{{")]
    TemplateOpen,

    #[token("}}")]
    TemplateClose,

    #[token("[[")]
    LinkOpen,

    #[token("]]")]
    LinkClose,

    #[token("|")]
    Pipe,

    #[token("=")]
    Eq,

    #[regex(r"[^{}\[\]|=]+")]
    Text,

    // A lone brace or bracket is ordinary text.
    #[regex(r"[{}\[\]]")]
    Stray,
}

/// Lex raw markup into tokens.
///
/// Total over all inputs: every byte belongs to some token, so there is no
/// error channel. Adjacent text runs (including stray single braces) are
/// merged into one `Text` token.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut lexer = RawToken::lexer(source);

    let mut push_text = |tokens: &mut Vec<Token>, slice: &str| {
        if let Some(Token::Text(prev)) = tokens.last_mut() {
            prev.push_str(slice);
        } else {
            tokens.push(Token::Text(slice.to_string()));
        }
    };

    while let Some(result) = lexer.next() {
        match result {
            Ok(RawToken::TemplateOpen) => tokens.push(Token::TemplateOpen),
            Ok(RawToken::TemplateClose) => tokens.push(Token::TemplateClose),
            Ok(RawToken::LinkOpen) => tokens.push(Token::LinkOpen),
            Ok(RawToken::LinkClose) => tokens.push(Token::LinkClose),
            Ok(RawToken::Pipe) => tokens.push(Token::Pipe),
            Ok(RawToken::Eq) => tokens.push(Token::Eq),
            Ok(RawToken::Text) | Ok(RawToken::Stray) | Err(()) => {
                push_text(&mut tokens, lexer.slice());
            }
        }
    }

    tokens
}
