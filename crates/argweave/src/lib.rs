//! Schema-driven command-line argument parsing.
//!
//! Given a schema of parameter declarations and an input — either a
//! single shell-like command string or an already-split token vector —
//! [`parse`] produces either fully typed values or a structured error
//! report, plus a generated help listing either way:
//!
//! ```
//! use argweave::{parse, Coercion, Param, Schema, Value};
//!
//! let schema = Schema::builder()
//!     .param("fruit", Param::string())
//!     .param("count", Param::value(Coercion::integer()).long("count").default_value("1"))
//!     .param("verbose", Param::flag().short('v').long("verbose"))
//!     .build()
//!     .unwrap();
//!
//! let parsed = parse("apple --count 3 -v", &schema);
//! let values = parsed.outcome.unwrap();
//! assert_eq!(values["fruit"], Value::Str("apple".into()));
//! assert_eq!(values["count"], Value::Int(3));
//! assert_eq!(values["verbose"], Value::Bool(true));
//! ```
//!
//! Parsing is a pure computation: no I/O, no state shared between calls,
//! and every call allocates its own working state, so concurrent use is
//! safe as long as the schema itself is not mutated mid-call.

pub mod coerce;
pub mod descriptor;
pub mod help;
mod resolve;
pub mod schema;
pub mod tokenize;

pub use coerce::{CoerceError, Coercion, Value};
pub use help::Help;
pub use resolve::{ErrorReport, Values};
pub use schema::{Kind, Param, Presence, Schema, SchemaBuilder, SchemaError};
pub use tokenize::tokenize;

use argweave_getopt::{SplitSpec, split};

/// Parse input: a single command-line string (tokenized first) or an
/// already-split token sequence.
#[derive(Debug, Clone)]
pub enum Input<'a> {
    Line(&'a str),
    Argv(&'a [String]),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(line: &'a str) -> Self {
        Self::Line(line)
    }
}

impl<'a> From<&'a [String]> for Input<'a> {
    fn from(argv: &'a [String]) -> Self {
        Self::Argv(argv)
    }
}

impl<'a> From<&'a Vec<String>> for Input<'a> {
    fn from(argv: &'a Vec<String>) -> Self {
        Self::Argv(argv.as_slice())
    }
}

/// One parse call's output. `outcome` is a strict either/or: typed values
/// or a non-empty error report. `help` is always populated.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub outcome: Result<Values, ErrorReport>,
    pub help: Help,
}

/// Parse `input` against `schema`.
///
/// Every error in the input is reported in one pass; resolution never
/// stops at the first problem.
pub fn parse<'a>(input: impl Into<Input<'a>>, schema: &Schema) -> Parsed {
    let tokens: Vec<String> = match input.into() {
        Input::Line(line) => tokenize::tokenize(line),
        Input::Argv(argv) => argv.to_vec(),
    };
    tracing::debug!(tokens = tokens.len(), params = schema.len(), "parsing arguments");

    let mut spec = SplitSpec::new();
    for (_, param) in schema.iter() {
        let is_switch = param.kind().is_flag();
        if let Some(short) = param.short_alias() {
            spec = declare(spec, short.to_string(), is_switch);
        }
        for long in param.long_aliases() {
            spec = declare(spec, long.clone(), is_switch);
        }
    }

    let raw = split(&tokens, &spec);
    Parsed {
        outcome: resolve::resolve(&raw, schema),
        help: help::describe(schema),
    }
}

fn declare(spec: SplitSpec, name: String, is_switch: bool) -> SplitSpec {
    if is_switch {
        spec.switch_name(name)
    } else {
        spec.value_name(name)
    }
}
