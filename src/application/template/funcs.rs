//! Functions callable from templates

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

/// A template function: receives evaluated arguments (piped value last).
pub type TemplateFn = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Named functions available to a template.
#[derive(Clone, Default)]
pub struct FuncMap {
    funcs: HashMap<String, TemplateFn>,
}

impl FuncMap {
    /// Empty map without built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding `trim` and `capitalize`.
    pub fn builtin() -> Self {
        let mut funcs = Self::new();
        funcs.insert("trim", |args: &[Value]| {
            string_arg("trim", args).map(|s| Value::String(s.trim().to_string()))
        });
        funcs.insert("capitalize", |args: &[Value]| {
            string_arg("capitalize", args).map(|s| Value::String(capitalize(s)))
        });
        funcs
    }

    /// Register or replace a function.
    pub fn insert<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.funcs.insert(name.to_string(), Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFn> {
        self.funcs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }
}

/// Uppercase the first character of `s`, leaving the rest untouched.
///
/// Works on decoded characters, so multi-byte first characters are handled.
/// A character whose uppercase form is longer (`ß` → `SS`) expands.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
    }
}

fn string_arg<'a>(func: &str, args: &'a [Value]) -> Result<&'a str, String> {
    match args {
        [Value::String(s)] => Ok(s.as_str()),
        [other] => Err(format!(
            "{func}: expected string argument, got {}",
            super::exec::kind(other)
        )),
        _ => Err(format!(
            "wrong number of args for {func}: want 1 got {}",
            args.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("go", "Go")]
    #[case("Go", "Go")]
    #[case("éclair", "Éclair")]
    #[case("über alles", "Über alles")]
    #[case("日本語", "日本語")]
    #[case("1st", "1st")]
    fn test_capitalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[test]
    fn given_multibyte_first_char_when_capitalize_then_rest_bytes_intact() {
        let input = "ñandú";
        let out = capitalize(input);
        assert_eq!(out, "Ñandú");
        assert!(out.ends_with(&input['ñ'.len_utf8()..]));
    }

    #[test]
    fn given_two_args_when_trim_then_arity_error() {
        let funcs = FuncMap::builtin();
        let trim = funcs.get("trim").unwrap();
        let err = trim(&[Value::from("a"), Value::from("b")]).unwrap_err();
        assert!(err.contains("wrong number of args"));
    }

    #[test]
    fn given_number_when_capitalize_then_type_error() {
        let funcs = FuncMap::builtin();
        let capitalize = funcs.get("capitalize").unwrap();
        let err = capitalize(&[Value::from(3)]).unwrap_err();
        assert!(err.contains("expected string"));
    }
}
