//! Template execution over `serde_json::Value` data

use serde_json::Value;

use super::parse::{Node, Operand, Pipeline, Stage};
use super::{Template, TemplateError, TemplateResult};

/// Printed for a missing (null) value.
const NO_VALUE: &str = "<no value>";

pub(super) fn execute(tmpl: &Template, data: &Value) -> TemplateResult<String> {
    let mut state = State {
        tmpl,
        out: String::new(),
    };
    state.walk(data, &tmpl.root)?;
    Ok(state.out)
}

struct State<'a> {
    tmpl: &'a Template,
    out: String,
}

impl State<'_> {
    fn walk(&mut self, dot: &Value, nodes: &[Node]) -> TemplateResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Action(pipeline) => {
                    let value = self.pipeline(dot, pipeline)?;
                    print_value(&mut self.out, &value);
                }
                Node::If {
                    cond,
                    then,
                    otherwise,
                } => {
                    if is_true(&self.pipeline(dot, cond)?) {
                        self.walk(dot, then)?;
                    } else {
                        self.walk(dot, otherwise)?;
                    }
                }
                Node::Range {
                    over,
                    body,
                    otherwise,
                } => match self.pipeline(dot, over)? {
                    Value::Array(items) if !items.is_empty() => {
                        for item in &items {
                            self.walk(item, body)?;
                        }
                    }
                    Value::Object(map) if !map.is_empty() => {
                        for item in map.values() {
                            self.walk(item, body)?;
                        }
                    }
                    Value::Array(_) | Value::Object(_) | Value::Null => {
                        self.walk(dot, otherwise)?;
                    }
                    other => {
                        return Err(self.error(
                            over.line,
                            format!("range can't iterate over {}", kind(&other)),
                        ))
                    }
                },
            }
        }
        Ok(())
    }

    fn pipeline(&self, dot: &Value, pipeline: &Pipeline) -> TemplateResult<Value> {
        let mut piped: Option<Value> = None;
        for stage in &pipeline.stages {
            let value = match stage {
                Stage::Value(operand) => self.operand(dot, operand, pipeline.line)?,
                Stage::Call { func, args } => {
                    let mut values = args
                        .iter()
                        .map(|a| self.operand(dot, a, pipeline.line))
                        .collect::<TemplateResult<Vec<_>>>()?;
                    values.extend(piped.take());
                    let f = self.tmpl.funcs.get(func).ok_or_else(|| {
                        self.error(pipeline.line, format!("function {func:?} not defined"))
                    })?;
                    f(&values).map_err(|m| {
                        self.error(pipeline.line, format!("error calling {func}: {m}"))
                    })?
                }
            };
            piped = Some(value);
        }
        Ok(piped.unwrap_or(Value::Null))
    }

    fn operand(&self, dot: &Value, operand: &Operand, line: usize) -> TemplateResult<Value> {
        match operand {
            Operand::Dot => Ok(dot.clone()),
            Operand::Str(s) => Ok(Value::String(s.clone())),
            Operand::Int(n) => Ok(Value::from(*n)),
            Operand::Bool(b) => Ok(Value::Bool(*b)),
            Operand::Field(path) => {
                let mut current = dot;
                for field in path {
                    current = match current {
                        Value::Object(map) => map.get(field).ok_or_else(|| {
                            self.error(line, format!("can't evaluate field {field}"))
                        })?,
                        Value::Null => {
                            return Err(self.error(
                                line,
                                format!("nil pointer evaluating field {field}"),
                            ))
                        }
                        other => {
                            return Err(self.error(
                                line,
                                format!("can't evaluate field {field} in type {}", kind(other)),
                            ))
                        }
                    };
                }
                Ok(current.clone())
            }
        }
    }

    fn error(&self, line: usize, message: String) -> TemplateError {
        TemplateError::Exec {
            name: self.tmpl.name.clone(),
            message: format!("line {line}: {message}"),
        }
    }
}

/// Go truthiness: false, 0, null and empty strings/lists/maps are false.
pub(super) fn is_true(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(m) => !m.is_empty(),
    }
}

pub(super) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Print a value the way Go's `fmt` prints it with `%v`.
fn print_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str(NO_VALUE),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                print_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push_str("map[");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(key);
                out.push(':');
                print_value(out, item);
            }
            out.push(']');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(""), false)]
    #[case(json!([]), false)]
    #[case(json!({}), false)]
    #[case(json!(true), true)]
    #[case(json!(-1), true)]
    #[case(json!(" "), true)]
    #[case(json!([0]), true)]
    #[case(json!({"a": null}), true)]
    fn test_is_true(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_true(&value), expected);
    }

    #[test]
    fn given_composite_values_when_printed_then_go_style() {
        let mut out = String::new();
        print_value(&mut out, &json!({"a": [1, "x"], "b": null}));
        assert_eq!(out, "map[a:[1 x] b:<no value>]");
    }

    #[test]
    fn given_range_over_string_when_render_then_exec_error() {
        let tmpl = Template::parse("t", "{{range .}}x{{end}}").unwrap();
        let err = tmpl.render(&json!("abc")).unwrap_err();
        assert!(err.to_string().contains("range can't iterate over string"));
    }
}
