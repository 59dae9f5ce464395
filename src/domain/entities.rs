//! Domain entities: command names and localized usage texts

use crate::domain::error::{DomainError, DomainResult};

/// Separator between the short and the long description in a usage file.
pub const USAGE_DELIMITER: &str = "|||";

/// Derive a command name from its usage line: the first word.
///
/// `"build [flags] <pkg>"` → `"build"`, `"foo"` → `"foo"`.
/// Only a space separates the name; no other normalization happens.
pub fn derive_name(usage_line: &str) -> &str {
    match usage_line.find(' ') {
        Some(i) => &usage_line[..i],
        None => usage_line,
    }
}

/// Localized descriptions of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageText {
    /// One-liner shown in the command listing
    pub short: String,
    /// Full text shown by `help <command>`
    pub long: String,
}

/// Split a usage blob into short and long description.
///
/// The blob must contain at least one [`USAGE_DELIMITER`]. Anything after a
/// second delimiter is ignored. Texts are kept verbatim; templates trim them.
pub fn split_usage_text(name: &str, blob: &str) -> DomainResult<UsageText> {
    let mut parts = blob.split(USAGE_DELIMITER);
    match (parts.next(), parts.next()) {
        (Some(short), Some(long)) => Ok(UsageText {
            short: short.to_string(),
            long: long.to_string(),
        }),
        _ => Err(DomainError::MalformedUsage {
            name: name.to_string(),
        }),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Uses shellexpand crate for robust expansion. Undefined variables leave
/// the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_usage_line_with_flags_when_deriving_then_returns_first_word() {
        assert_eq!(derive_name("build [flags] <pkg>"), "build");
    }

    #[test]
    fn given_single_word_when_deriving_then_returns_whole_line() {
        assert_eq!(derive_name("foo"), "foo");
    }

    #[test]
    fn given_derived_name_when_deriving_again_then_unchanged() {
        let once = derive_name("install -v pkg");
        assert_eq!(derive_name(once), once);
    }

    #[test]
    fn given_tab_separated_line_when_deriving_then_tab_is_not_a_separator() {
        assert_eq!(derive_name("run\tnow"), "run\tnow");
    }

    #[test]
    fn given_blob_with_extra_delimiters_when_split_then_keeps_first_two_parts() {
        let text = split_usage_text("build", "short|||long|||ignored").unwrap();
        assert_eq!(text.short, "short");
        assert_eq!(text.long, "long");
    }

    #[test]
    fn given_blob_without_delimiter_when_split_then_malformed() {
        let err = split_usage_text("build", "only a short text").unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedUsage {
                name: "build".into()
            }
        );
    }
}
