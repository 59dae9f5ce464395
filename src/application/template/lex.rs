//! Template lexer: splits source into text runs and tokenized actions

use super::{TemplateError, TemplateResult};

const LEFT_DELIM: &str = "{{";
const RIGHT_DELIM: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    /// `.`
    Dot,
    /// `.A.B`
    Field(Vec<String>),
    /// Function name or keyword
    Ident(String),
    Str(String),
    Int(i64),
    Bool(bool),
    Pipe,
}

#[derive(Debug)]
pub(super) enum Item {
    Text(String),
    Action { line: usize, tokens: Vec<Token> },
}

/// Lex the whole template into items.
pub(super) fn lex(name: &str, src: &str) -> TemplateResult<Vec<Item>> {
    let mut items = Vec::new();
    let mut rest = src;
    let mut line = 1;
    let mut trim_next = false;

    loop {
        let Some(open) = rest.find(LEFT_DELIM) else {
            push_text(&mut items, rest, trim_next, false);
            break;
        };
        let text = &rest[..open];
        line += text.matches('\n').count();

        let mut body = &rest[open + LEFT_DELIM.len()..];
        let trim_prev = match body.strip_prefix('-') {
            Some(after) if after.starts_with(|c: char| c.is_ascii_whitespace()) => {
                body = after;
                true
            }
            _ => false,
        };
        push_text(&mut items, text, trim_next, trim_prev);

        let action = lex_action(name, line, body)?;
        line += body[..action.consumed].matches('\n').count();
        if !action.comment {
            if action.tokens.is_empty() {
                return Err(parse_error(name, line, "missing value for command"));
            }
            items.push(Item::Action {
                line,
                tokens: action.tokens,
            });
        }
        rest = &body[action.consumed..];
        trim_next = action.trim_next;
    }

    Ok(items)
}

fn push_text(items: &mut Vec<Item>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    if !text.is_empty() {
        items.push(Item::Text(text.to_string()));
    }
}

struct Action {
    tokens: Vec<Token>,
    /// Bytes of the body up to and including the closing delimiter
    consumed: usize,
    trim_next: bool,
    comment: bool,
}

fn lex_action(name: &str, line: usize, body: &str) -> TemplateResult<Action> {
    let bytes = body.as_bytes();
    let mut tokens = Vec::new();
    let mut comment = false;
    let mut i = 0;

    loop {
        let ws_start = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let rest = &body[i..];

        if rest.is_empty() {
            return Err(parse_error(name, line, "unclosed action"));
        }
        if i > ws_start && rest.starts_with("-}}") {
            return Ok(Action {
                tokens,
                consumed: i + 1 + RIGHT_DELIM.len(),
                trim_next: true,
                comment,
            });
        }
        if rest.starts_with(RIGHT_DELIM) {
            return Ok(Action {
                tokens,
                consumed: i + RIGHT_DELIM.len(),
                trim_next: false,
                comment,
            });
        }
        if rest.starts_with("/*") {
            if !tokens.is_empty() || comment {
                return Err(parse_error(name, line, "comment must be the whole action"));
            }
            let end = rest
                .find("*/")
                .ok_or_else(|| parse_error(name, line, "unclosed comment"))?;
            comment = true;
            i += end + 2;
            continue;
        }
        if comment {
            return Err(parse_error(name, line, "comment must be the whole action"));
        }

        let (token, len) = lex_token(rest).map_err(|m| parse_error(name, line, &m))?;
        tokens.push(token);
        i += len;
    }
}

/// Lex a single token at the start of `s`, returning it and its byte length.
fn lex_token(s: &str) -> Result<(Token, usize), String> {
    let mut chars = s.char_indices();
    let Some((_, c)) = chars.next() else {
        return Err("unexpected end of action".into());
    };

    match c {
        '|' => Ok((Token::Pipe, 1)),
        '.' => {
            let mut path = Vec::new();
            let mut end = 0;
            while s[end..].starts_with('.') {
                let ident_len = ident_len(&s[end + 1..]);
                if ident_len == 0 {
                    break;
                }
                path.push(s[end + 1..end + 1 + ident_len].to_string());
                end += 1 + ident_len;
            }
            if path.is_empty() {
                Ok((Token::Dot, 1))
            } else {
                Ok((Token::Field(path), end))
            }
        }
        '"' => lex_quoted(s),
        '`' => {
            let end = s[1..]
                .find('`')
                .ok_or_else(|| "unterminated raw quoted string".to_string())?;
            Ok((Token::Str(s[1..1 + end].to_string()), end + 2))
        }
        '-' | '0'..='9' => {
            let digits_start = usize::from(c == '-');
            let len = digits_start
                + s[digits_start..]
                    .bytes()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
            if len == digits_start {
                return Err(format!("bad number syntax: {:?}", &s[..1]));
            }
            let n = s[..len]
                .parse::<i64>()
                .map_err(|e| format!("bad number syntax: {}: {e}", &s[..len]))?;
            Ok((Token::Int(n), len))
        }
        c if c.is_alphabetic() || c == '_' => {
            let len = ident_len(s);
            let word = &s[..len];
            let token = match word {
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                _ => Token::Ident(word.to_string()),
            };
            Ok((token, len))
        }
        other => Err(format!("unexpected {other:?} in command")),
    }
}

fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn lex_quoted(s: &str) -> Result<(Token, usize), String> {
    let mut out = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((Token::Str(out), i + 1)),
            '\n' => break,
            '\\' => {
                let (_, escaped) = chars
                    .next()
                    .ok_or_else(|| "unterminated quoted string".to_string())?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    other => return Err(format!("unknown escape sequence: \\{other}")),
                });
            }
            c => out.push(c),
        }
    }
    Err("unterminated quoted string".into())
}

fn parse_error(name: &str, line: usize, message: &str) -> TemplateError {
    TemplateError::Parse {
        name: name.to_string(),
        line,
        message: message.to_string(),
    }
}
