//! Template parser: builds the node tree from lexed items

use super::funcs::FuncMap;
use super::lex::{Item, Token};
use super::{TemplateError, TemplateResult};

#[derive(Debug, Clone)]
pub(super) enum Node {
    Text(String),
    Action(Pipeline),
    If {
        cond: Pipeline,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Range {
        over: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// Commands joined by `|`; each stage receives the previous result as its
/// last argument.
#[derive(Debug, Clone)]
pub(super) struct Pipeline {
    pub line: usize,
    pub stages: Vec<Stage>,
}

#[derive(Debug, Clone)]
pub(super) enum Stage {
    Call { func: String, args: Vec<Operand> },
    Value(Operand),
}

#[derive(Debug, Clone)]
pub(super) enum Operand {
    Dot,
    Field(Vec<String>),
    Str(String),
    Int(i64),
    Bool(bool),
}

/// What ended a node list.
enum Terminator {
    End,
    Else(Vec<Token>),
}

struct Parser<'a> {
    name: &'a str,
    funcs: &'a FuncMap,
    items: std::vec::IntoIter<Item>,
}

pub(super) fn parse(name: &str, items: Vec<Item>, funcs: &FuncMap) -> TemplateResult<Vec<Node>> {
    let mut parser = Parser {
        name,
        funcs,
        items: items.into_iter(),
    };
    match parser.list()? {
        (nodes, None) => Ok(nodes),
        (_, Some((line, Terminator::End))) => Err(parser.error(line, "unexpected {{end}}")),
        (_, Some((line, Terminator::Else(_)))) => Err(parser.error(line, "unexpected {{else}}")),
    }
}

impl Parser<'_> {
    /// Parse nodes until `{{end}}`, `{{else}}` or end of input.
    fn list(&mut self) -> TemplateResult<(Vec<Node>, Option<(usize, Terminator)>)> {
        let mut nodes = Vec::new();
        while let Some(item) = self.items.next() {
            let (line, tokens) = match item {
                Item::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Item::Action { line, tokens } => (line, tokens),
            };

            match tokens.first() {
                Some(Token::Ident(word)) if word == "end" => {
                    if tokens.len() > 1 {
                        return Err(self.error(line, "unexpected tokens after end"));
                    }
                    return Ok((nodes, Some((line, Terminator::End))));
                }
                Some(Token::Ident(word)) if word == "else" => {
                    let rest = tokens[1..].to_vec();
                    return Ok((nodes, Some((line, Terminator::Else(rest)))));
                }
                Some(Token::Ident(word)) if word == "if" => {
                    nodes.push(self.if_node(line, &tokens[1..])?);
                }
                Some(Token::Ident(word)) if word == "range" => {
                    nodes.push(self.range_node(line, &tokens[1..])?);
                }
                _ => nodes.push(Node::Action(self.pipeline(line, &tokens)?)),
            }
        }
        Ok((nodes, None))
    }

    fn if_node(&mut self, line: usize, cond: &[Token]) -> TemplateResult<Node> {
        let cond = self.pipeline(line, cond)?;
        let (then, terminator) = self.list()?;
        let otherwise = match terminator {
            Some((_, Terminator::End)) => Vec::new(),
            Some((_, Terminator::Else(rest))) if rest.is_empty() => self.closing_list(line)?,
            Some((else_line, Terminator::Else(rest)))
                if matches!(rest.first(), Some(Token::Ident(w)) if w == "if") =>
            {
                // `else if` shares the closing `end` of the outer `if`
                vec![self.if_node(else_line, &rest[1..])?]
            }
            Some((else_line, Terminator::Else(_))) => {
                return Err(self.error(else_line, "unexpected tokens after else"))
            }
            None => return Err(self.error(line, "unexpected EOF: missing {{end}} for if")),
        };
        Ok(Node::If {
            cond,
            then,
            otherwise,
        })
    }

    fn range_node(&mut self, line: usize, over: &[Token]) -> TemplateResult<Node> {
        let over = self.pipeline(line, over)?;
        let (body, terminator) = self.list()?;
        let otherwise = match terminator {
            Some((_, Terminator::End)) => Vec::new(),
            Some((_, Terminator::Else(rest))) if rest.is_empty() => self.closing_list(line)?,
            Some((else_line, Terminator::Else(_))) => {
                return Err(self.error(else_line, "unexpected tokens after else"))
            }
            None => return Err(self.error(line, "unexpected EOF: missing {{end}} for range")),
        };
        Ok(Node::Range {
            over,
            body,
            otherwise,
        })
    }

    /// The `else` branch: must be closed by `end`.
    fn closing_list(&mut self, line: usize) -> TemplateResult<Vec<Node>> {
        match self.list()? {
            (nodes, Some((_, Terminator::End))) => Ok(nodes),
            (_, Some((else_line, Terminator::Else(_)))) => {
                Err(self.error(else_line, "expected {{end}}, found {{else}}"))
            }
            (_, None) => Err(self.error(line, "unexpected EOF: missing {{end}}")),
        }
    }

    fn pipeline(&self, line: usize, tokens: &[Token]) -> TemplateResult<Pipeline> {
        if tokens.is_empty() {
            return Err(self.error(line, "missing value for command"));
        }
        let mut stages = Vec::new();
        for (index, segment) in tokens.split(|t| *t == Token::Pipe).enumerate() {
            let stage = self.stage(line, segment)?;
            if index > 0 && matches!(stage, Stage::Value(_)) {
                return Err(self.error(
                    line,
                    &format!("non executable command in pipeline stage {}", index + 1),
                ));
            }
            stages.push(stage);
        }
        Ok(Pipeline { line, stages })
    }

    fn stage(&self, line: usize, tokens: &[Token]) -> TemplateResult<Stage> {
        match tokens {
            [] => Err(self.error(line, "missing command in pipeline")),
            [Token::Ident(func), args @ ..] => {
                if is_keyword(func) {
                    return Err(self.error(line, &format!("unexpected keyword {func:?}")));
                }
                if !self.funcs.contains(func) {
                    return Err(self.error(line, &format!("function {func:?} not defined")));
                }
                let args = args
                    .iter()
                    .map(|t| self.operand(line, t))
                    .collect::<TemplateResult<Vec<_>>>()?;
                Ok(Stage::Call {
                    func: func.clone(),
                    args,
                })
            }
            [single] => Ok(Stage::Value(self.operand(line, single)?)),
            [_, ..] => Err(self.error(line, "can't give argument to non-function")),
        }
    }

    fn operand(&self, line: usize, token: &Token) -> TemplateResult<Operand> {
        match token {
            Token::Dot => Ok(Operand::Dot),
            Token::Field(path) => Ok(Operand::Field(path.clone())),
            Token::Str(s) => Ok(Operand::Str(s.clone())),
            Token::Int(n) => Ok(Operand::Int(*n)),
            Token::Bool(b) => Ok(Operand::Bool(*b)),
            Token::Ident(word) => Err(self.error(
                line,
                &format!("{word:?} can only be called at the start of a command"),
            )),
            Token::Pipe => Err(self.error(line, "unexpected |")),
        }
    }

    fn error(&self, line: usize, message: &str) -> TemplateError {
        TemplateError::Parse {
            name: self.name.to_string(),
            line,
            message: message.to_string(),
        }
    }
}

fn is_keyword(word: &str) -> bool {
    matches!(word, "if" | "else" | "end" | "range")
}
