//! Parameter declarations and the schema they form.

use indexmap::IndexMap;
use thiserror::Error;

use crate::coerce::{CoerceError, Coercion, Value};

/// How a parameter's raw string becomes a typed value.
#[derive(Debug, Clone)]
pub enum Kind {
    /// Presence-is-true switch. Any non-empty raw value (including the
    /// string `"false"`) reads as `true`; this is presence detection, not
    /// boolean parsing. Never missing from a successful result.
    Flag,
    /// Raw string passed through unchanged.
    Str,
    /// Coerced through the given function.
    Value(Coercion),
}

impl Kind {
    pub(crate) fn coerce(&self, raw: &str) -> Result<Value, CoerceError> {
        match self {
            Self::Flag => Ok(Value::Bool(!raw.is_empty())),
            Self::Str => Ok(Value::Str(raw.to_string())),
            Self::Value(c) => c.apply(raw),
        }
    }

    pub(crate) fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

/// Exactly one presence rule applies per parameter: required (absence is
/// an error), optional (absence is fine), or defaulted (always present).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Presence {
    #[default]
    Required,
    Optional,
    Default(String),
}

/// One declared parameter: aliases, kind, and presence rule.
///
/// A parameter with neither a short nor a long alias is positional and
/// consumes input tokens by order instead of by name.
#[derive(Debug, Clone)]
pub struct Param {
    short: Option<char>,
    longs: Vec<String>,
    kind: Kind,
    presence: Presence,
}

impl Param {
    fn with_kind(kind: Kind) -> Self {
        Self {
            short: None,
            longs: Vec::new(),
            kind,
            presence: Presence::Required,
        }
    }

    /// A presence-is-true switch.
    pub fn flag() -> Self {
        Self::with_kind(Kind::Flag)
    }

    /// A plain string parameter.
    pub fn string() -> Self {
        Self::with_kind(Kind::Str)
    }

    /// A parameter coerced through `coercion`.
    pub fn value(coercion: Coercion) -> Self {
        Self::with_kind(Kind::Value(coercion))
    }

    /// Bind a single-character alias (`-x`).
    pub fn short(mut self, alias: char) -> Self {
        self.short = Some(alias);
        self
    }

    /// Bind a long alias (`--name`). May be called repeatedly; every long
    /// alias binds the same field.
    pub fn long(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.longs.contains(&alias) {
            self.longs.push(alias);
        }
        self
    }

    /// Absence is not an error; the field is simply missing.
    ///
    /// Replaces any previously set presence rule.
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Seed the field from `raw` (coerced once per parse) before any
    /// input-driven override. Implies the field is always present.
    ///
    /// Replaces any previously set presence rule.
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.presence = Presence::Default(raw.into());
        self
    }

    pub fn short_alias(&self) -> Option<char> {
        self.short
    }

    pub fn long_aliases(&self) -> &[String] {
        self.longs.as_slice()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Whether this parameter is bound by input order rather than alias.
    pub fn is_positional(&self) -> bool {
        self.short.is_none() && self.longs.is_empty()
    }
}

/// Invalid schema construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate parameter '{0}'")]
    DuplicateParam(String),
    #[error("alias '{alias}' is bound to both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },
    #[error("parameter '{0}' cannot be both optional and defaulted")]
    OptionalWithDefault(String),
}

/// An ordered set of parameter declarations. Declaration order drives
/// resolution order, positional consumption, and help listing order.
///
/// Immutable once built; a parse call only reads it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    params: IndexMap<String, Param>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.params.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }
}

/// Collects parameter declarations and validates alias bindings.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    params: Vec<(String, Param)>,
}

impl SchemaBuilder {
    /// Declare a parameter. Declaration order is significant.
    pub fn param(mut self, name: impl Into<String>, param: Param) -> Self {
        self.params.push((name.into(), param));
        self
    }

    /// Validate and produce the schema. Duplicate parameter names and
    /// aliases bound to more than one parameter are rejected here, not at
    /// parse time.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut params: IndexMap<String, Param> = IndexMap::with_capacity(self.params.len());
        let mut alias_owner: IndexMap<String, String> = IndexMap::new();

        for (name, param) in self.params {
            if params.contains_key(&name) {
                return Err(SchemaError::DuplicateParam(name));
            }

            let mut aliases: Vec<String> = Vec::new();
            if let Some(short) = param.short {
                aliases.push(short.to_string());
            }
            aliases.extend(param.longs.iter().cloned());

            for alias in aliases {
                if let Some(first) = alias_owner.get(&alias) {
                    return Err(SchemaError::AliasConflict {
                        alias,
                        first: first.clone(),
                        second: name,
                    });
                }
                alias_owner.insert(alias, name.clone());
            }

            params.insert(name, param);
        }

        Ok(Schema { params })
    }
}
