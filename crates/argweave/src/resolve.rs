//! Matching split input onto the schema.
//!
//! Resolution walks parameters in declaration order and layers value
//! sources, later sources overriding earlier ones: default, then the
//! short alias, then each long alias, then (for purely positional
//! parameters) the next unconsumed positional token. Flags OR across
//! every bound alias instead of overwriting.
//!
//! All three error categories are accumulated across the full pass; a
//! single call reports every problem at once.

use indexmap::IndexMap;
use std::collections::HashSet;

use argweave_getopt::RawArgs;
use serde::Serialize;

use crate::coerce::{CoerceError, Value};
use crate::schema::{Presence, Schema};

/// Resolved values, keyed by parameter name in declaration order.
/// Optional parameters that never resolved are simply absent.
pub type Values = IndexMap<String, Value>;

/// Everything that went wrong in one parse call.
///
/// Never constructed empty: a parse either succeeds with [`Values`] or
/// fails with a report where at least one list is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Per-parameter coercion failures.
    pub invalid: IndexMap<String, CoerceError>,
    /// Required parameters that never resolved, in declaration order.
    pub missing: Vec<String>,
    /// Input tokens and option names no parameter claimed, in encounter
    /// order (leftover positionals first, then unclaimed option names).
    pub unexpected: Vec<String>,
}

impl ErrorReport {
    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty() && self.missing.is_empty() && self.unexpected.is_empty()
    }
}

pub(crate) fn resolve(raw: &RawArgs, schema: &Schema) -> Result<Values, ErrorReport> {
    let mut values = Values::new();
    let mut report = ErrorReport::default();
    // Claiming is a side set plus a cursor; the splitter output itself is
    // never edited.
    let mut claimed: HashSet<String> = HashSet::new();
    let mut cursor = 0usize;

    for (name, param) in schema.iter() {
        let mut resolved: Option<Value> = None;

        if let Presence::Default(default) = param.presence() {
            match param.kind().coerce(default) {
                Ok(v) => resolved = Some(v),
                Err(err) => {
                    report.invalid.insert(name.to_string(), err);
                }
            }
        }

        if let Some(short) = param.short_alias() {
            let alias = short.to_string();
            if let Some(rawval) = raw.value(&alias) {
                claimed.insert(alias);
                if let Err(err) =
                    apply(param.kind().is_flag(), param.kind().coerce(rawval), &mut resolved)
                {
                    report.invalid.insert(name.to_string(), err);
                }
            }
        }

        for long in param.long_aliases() {
            if let Some(rawval) = raw.value(long) {
                claimed.insert(long.clone());
                if let Err(err) =
                    apply(param.kind().is_flag(), param.kind().coerce(rawval), &mut resolved)
                {
                    report.invalid.insert(name.to_string(), err);
                }
            }
        }

        if param.is_positional() {
            if let Some(token) = raw.positionals().get(cursor) {
                // The token is consumed even when its coercion fails.
                cursor += 1;
                match param.kind().coerce(token) {
                    Ok(v) => resolved = Some(v),
                    Err(err) => {
                        report.invalid.insert(name.to_string(), err);
                    }
                }
            }
        }

        tracing::trace!(param = name, resolved = resolved.is_some(), "resolved parameter");

        match resolved {
            Some(v) => {
                values.insert(name.to_string(), v);
            }
            None if param.kind().is_flag() => {
                values.insert(name.to_string(), Value::Bool(false));
            }
            None => match param.presence() {
                // A parameter whose bound value failed coercion was
                // supplied, not missing; the failure already sits under
                // `invalid`. The same goes for a failed default coercion.
                Presence::Required if !report.invalid.contains_key(name) => {
                    report.missing.push(name.to_string());
                }
                Presence::Required | Presence::Optional | Presence::Default(_) => {}
            },
        }
    }

    for token in &raw.positionals()[cursor..] {
        report.unexpected.push(token.clone());
    }
    for option in raw.option_names() {
        if !claimed.contains(option) {
            report.unexpected.push(option.to_string());
        }
    }

    if report.is_empty() {
        Ok(values)
    } else {
        tracing::debug!(
            invalid = report.invalid.len(),
            missing = report.missing.len(),
            unexpected = report.unexpected.len(),
            "argument resolution failed"
        );
        Err(report)
    }
}

/// Layer one coerced source onto the running value. Flags OR with what is
/// already there; every other kind overwrites.
fn apply(
    is_flag: bool,
    coerced: Result<Value, CoerceError>,
    resolved: &mut Option<Value>,
) -> Result<(), CoerceError> {
    let value = coerced?;
    if is_flag {
        let prev = resolved.as_ref().and_then(Value::as_bool).unwrap_or(false);
        let next = value.as_bool().unwrap_or(false);
        *resolved = Some(Value::Bool(prev || next));
    } else {
        *resolved = Some(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::Coercion;
    use crate::schema::Param;
    use argweave_getopt::{SplitSpec, split};

    fn raw(tokens: &[&str], spec: &SplitSpec) -> RawArgs {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        split(&tokens, spec)
    }

    #[test]
    fn splitter_output_is_untouched_by_resolution() {
        let schema = Schema::builder()
            .param("fruit", Param::string().long("fruit"))
            .build()
            .unwrap();
        let spec = SplitSpec::new().value_name("fruit");
        let raw = raw(&["--fruit", "apple"], &spec);
        let before = raw.clone();

        assert!(resolve(&raw, &schema).is_ok());
        assert_eq!(raw, before);
        // A second resolution over the same input sees the same world.
        assert!(resolve(&raw, &schema).is_ok());
    }

    #[test]
    fn failed_positional_coercion_still_consumes_the_token() {
        let schema = Schema::builder()
            .param("count", Param::value(Coercion::integer()))
            .param("label", Param::string())
            .build()
            .unwrap();
        let raw = raw(&["apple", "tag"], &SplitSpec::new());

        let report = resolve(&raw, &schema).unwrap_err();
        assert!(report.invalid.contains_key("count"));
        // "apple" was dequeued for count, so label still got "tag" and
        // nothing is unexpected.
        assert!(report.unexpected.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn unexpected_lists_positionals_before_options() {
        let schema = Schema::builder().build().unwrap();
        let spec = SplitSpec::new().switch_name("verbose");
        let raw = raw(&["stray", "--verbose", "tail"], &spec);

        let report = resolve(&raw, &schema).unwrap_err();
        assert_eq!(report.unexpected, ["stray", "tail", "verbose"]);
    }

    #[test]
    fn short_alias_overrides_default_and_is_claimed() {
        let schema = Schema::builder()
            .param(
                "count",
                Param::value(Coercion::integer()).short('c').default_value("1"),
            )
            .build()
            .unwrap();
        let spec = SplitSpec::new().value_name("c");
        let raw = raw(&["-c", "5"], &spec);

        let values = resolve(&raw, &schema).unwrap();
        assert_eq!(values["count"], Value::Int(5));
    }
}
