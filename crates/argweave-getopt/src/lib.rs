//! Minimal getopt-style splitting of an argument vector.
//!
//! This crate is intentionally small and dependency-light so the schema
//! layer in `argweave` can treat it as a black box: it knows nothing about
//! types, defaults, or required parameters. It only separates an ordered
//! token sequence into
//! - an option map (`--name value`, `--name=value`, `-x value`, clustered
//!   boolean shorts), and
//! - a residual ordered list of positional tokens.
//!
//! The output is never mutated by the consumer; claiming of options is the
//! consumer's bookkeeping.

use indexmap::IndexMap;
use std::collections::HashSet;

/// Declares which option names take a value and which are pure switches.
///
/// Splitting cannot reliably distinguish a switch followed by a positional
/// (`--verbose file.txt`) from a value option and its value
/// (`--output out.txt`) without this. Names are stored bare, without
/// leading dashes; short options are single-character names.
///
/// Undeclared names follow the permissive convention of classic argv
/// splitters: a trailing `--name value` pair binds `value` to `name` when
/// the next token does not look like an option.
#[derive(Debug, Clone, Default)]
pub struct SplitSpec {
    value_names: HashSet<String>,
    switch_names: HashSet<String>,
}

impl SplitSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option that takes a value (e.g. `output`, `o`).
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_names.insert(name.into());
        self
    }

    /// Declare an option that is a pure switch and never consumes a value.
    pub fn switch_name(mut self, name: impl Into<String>) -> Self {
        self.switch_names.insert(name.into());
        self
    }

    fn takes_value(&self, name: &str) -> bool {
        self.value_names.contains(name)
    }

    fn is_switch(&self, name: &str) -> bool {
        self.switch_names.contains(name)
    }
}

/// Split output: bound options plus leftover positionals.
///
/// The option map preserves encounter order; re-binding an already-seen
/// name overwrites its value but keeps its original position. Switch
/// presence is recorded as the raw value `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    options: IndexMap<String, String>,
    positionals: Vec<String>,
}

impl RawArgs {
    /// Raw value bound to an option name, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Whether an option name was bound at all.
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Bound option names in encounter order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Residual positional tokens in input order.
    pub fn positionals(&self) -> &[String] {
        self.positionals.as_slice()
    }

    fn bind(&mut self, name: &str, value: String) {
        // IndexMap keeps the original slot on overwrite, so encounter
        // order of first occurrence is preserved.
        self.options.insert(name.to_string(), value);
    }
}

fn looks_like_value(tokens: &[String], idx: usize) -> bool {
    match tokens.get(idx + 1) {
        Some(next) => next == "-" || !next.starts_with('-'),
        None => false,
    }
}

/// Split `tokens` into options and positionals according to `spec`.
///
/// Recognized forms: `--name=value`, `--name value`, `-x value`, attached
/// short values (`-ofile`), clustered switches (`-abc`), and a literal
/// `--` after which everything is positional.
pub fn split(tokens: &[String], spec: &SplitSpec) -> RawArgs {
    let mut raw = RawArgs::default();
    let mut i = 0usize;
    let mut after_separator = false;

    while i < tokens.len() {
        let tok = tokens[i].as_str();

        if !after_separator && tok == "--" {
            after_separator = true;
            i += 1;
            continue;
        }

        if !after_separator && tok.starts_with("--") {
            let body = &tok[2..];
            if let Some((name, value)) = body.split_once('=') {
                raw.bind(name, value.to_string());
                i += 1;
                continue;
            }
            if !spec.is_switch(body) && looks_like_value(tokens, i) {
                raw.bind(body, tokens[i + 1].clone());
                i += 2;
                continue;
            }
            raw.bind(body, "true".to_string());
            i += 1;
            continue;
        }

        if !after_separator && tok.starts_with('-') && tok != "-" {
            let body = &tok[1..];
            let mut consumed_next = false;
            let mut chars = body.char_indices();
            while let Some((pos, c)) = chars.next() {
                let name = c.to_string();
                let rest = &body[pos + c.len_utf8()..];
                if spec.takes_value(&name) {
                    if !rest.is_empty() {
                        // Attached value: -ofile
                        raw.bind(&name, rest.to_string());
                    } else if looks_like_value(tokens, i) {
                        raw.bind(&name, tokens[i + 1].clone());
                        consumed_next = true;
                    } else {
                        raw.bind(&name, "true".to_string());
                    }
                    break;
                }
                if rest.is_empty() && !spec.is_switch(&name) && looks_like_value(tokens, i) {
                    // Undeclared trailing short may still take the next token.
                    raw.bind(&name, tokens[i + 1].clone());
                    consumed_next = true;
                    break;
                }
                raw.bind(&name, "true".to_string());
            }
            i += if consumed_next { 2 } else { 1 };
            continue;
        }

        raw.positionals.push(tok.to_string());
        i += 1;
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn long_equals_and_space_forms() {
        let spec = SplitSpec::new().value_name("output");
        let raw = split(&argv(&["--output=a.txt", "--output", "b.txt"]), &spec);
        assert_eq!(raw.value("output"), Some("b.txt"));
        assert!(raw.positionals().is_empty());
    }

    #[test]
    fn declared_switch_never_consumes() {
        let spec = SplitSpec::new().switch_name("verbose");
        let raw = split(&argv(&["--verbose", "file.txt"]), &spec);
        assert_eq!(raw.value("verbose"), Some("true"));
        assert_eq!(raw.positionals(), ["file.txt"]);
    }

    #[test]
    fn undeclared_long_takes_next_token() {
        let spec = SplitSpec::new();
        let raw = split(&argv(&["--fruit", "apple"]), &spec);
        assert_eq!(raw.value("fruit"), Some("apple"));
        assert!(raw.positionals().is_empty());
    }

    #[test]
    fn undeclared_long_before_flag_is_presence() {
        let spec = SplitSpec::new();
        let raw = split(&argv(&["--fruit", "--other"]), &spec);
        assert_eq!(raw.value("fruit"), Some("true"));
        assert_eq!(raw.value("other"), Some("true"));
    }

    #[test]
    fn short_value_and_cluster() {
        let spec = SplitSpec::new()
            .value_name("o")
            .switch_name("v")
            .switch_name("x");
        let raw = split(&argv(&["-vx", "-o", "out.txt", "in.txt"]), &spec);
        assert_eq!(raw.value("v"), Some("true"));
        assert_eq!(raw.value("x"), Some("true"));
        assert_eq!(raw.value("o"), Some("out.txt"));
        assert_eq!(raw.positionals(), ["in.txt"]);
    }

    #[test]
    fn attached_short_value() {
        let spec = SplitSpec::new().value_name("o").switch_name("v");
        let raw = split(&argv(&["-voout.txt"]), &spec);
        assert_eq!(raw.value("v"), Some("true"));
        assert_eq!(raw.value("o"), Some("out.txt"));
    }

    #[test]
    fn separator_stops_option_parsing() {
        let spec = SplitSpec::new().switch_name("verbose");
        let raw = split(&argv(&["--verbose", "--", "--not-an-option"]), &spec);
        assert_eq!(raw.value("verbose"), Some("true"));
        assert_eq!(raw.positionals(), ["--not-an-option"]);
    }

    #[test]
    fn encounter_order_survives_rebinding() {
        let spec = SplitSpec::new().value_name("a").value_name("b");
        let raw = split(&argv(&["--a", "1", "--b", "2", "--a", "3"]), &spec);
        let names: Vec<&str> = raw.option_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(raw.value("a"), Some("3"));
    }

    #[test]
    fn lone_dash_is_positional() {
        let spec = SplitSpec::new();
        let raw = split(&argv(&["-"]), &spec);
        assert_eq!(raw.positionals(), ["-"]);
    }
}
