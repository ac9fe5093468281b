//! Plain-data schema encoding.
//!
//! [`SchemaDescriptor`] is the serializable form of a schema: built-in
//! coercions are named by tag, so anything expressible here round-trips
//! through JSON. User-supplied coercion functions are deliberately not
//! expressible; build those schemas through [`Schema::builder`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::coerce::Coercion;
use crate::schema::{Param, Schema, SchemaError};

/// Built-in coercion named by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KindTag {
    /// Presence-is-true switch.
    Flag,
    /// Raw string, unchanged.
    #[default]
    String,
    /// Finite floating-point number.
    Float,
    /// Exactly-representable whole number.
    Integer,
}

/// One or many long aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LongAliases {
    One(String),
    Many(Vec<String>),
}

impl LongAliases {
    fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::One(s) => std::slice::from_ref(s).iter().map(String::as_str),
            Self::Many(v) => v.as_slice().iter().map(String::as_str),
        }
    }
}

/// Serializable form of one parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ParamDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<LongAliases>,
    #[serde(default)]
    pub kind: KindTag,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Serializable form of a whole schema, keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SchemaDescriptor {
    pub params: IndexMap<String, ParamDescriptor>,
}

impl SchemaDescriptor {
    /// Convert into a live [`Schema`].
    ///
    /// Declaring a parameter both `optional` and defaulted is rejected:
    /// a default already guarantees presence, so the combination has no
    /// coherent meaning.
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder();
        for (name, d) in self.params {
            if d.optional && d.default.is_some() {
                return Err(SchemaError::OptionalWithDefault(name));
            }

            let mut param = match d.kind {
                KindTag::Flag => Param::flag(),
                KindTag::String => Param::string(),
                KindTag::Float => Param::value(Coercion::float()),
                KindTag::Integer => Param::value(Coercion::integer()),
            };
            if let Some(short) = d.short {
                param = param.short(short);
            }
            if let Some(longs) = &d.long {
                for alias in longs.iter() {
                    param = param.long(alias);
                }
            }
            if d.optional {
                param = param.optional();
            }
            if let Some(default) = d.default {
                param = param.default_value(default);
            }
            builder = builder.param(name, param);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Presence;

    #[test]
    fn json_deserializes_into_schema() {
        let json = r#"{
            "fruit": { "long": "fruit", "default": "banana" },
            "count": { "short": "c", "long": ["count", "num"], "kind": "integer" },
            "verbose": { "short": "v", "kind": "flag" },
            "note": { "optional": true }
        }"#;
        let descriptor: SchemaDescriptor = serde_json::from_str(json).unwrap();
        let schema = descriptor.into_schema().unwrap();

        assert_eq!(schema.len(), 4);
        let fruit = schema.get("fruit").unwrap();
        assert_eq!(fruit.presence(), &Presence::Default("banana".into()));
        let count = schema.get("count").unwrap();
        assert_eq!(count.short_alias(), Some('c'));
        assert_eq!(count.long_aliases(), ["count", "num"]);
        let note = schema.get("note").unwrap();
        assert!(note.is_positional());
        assert_eq!(note.presence(), &Presence::Optional);
    }

    #[test]
    fn optional_with_default_rejected() {
        let json = r#"{ "fruit": { "optional": true, "default": "banana" } }"#;
        let descriptor: SchemaDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            descriptor.into_schema().unwrap_err(),
            SchemaError::OptionalWithDefault("fruit".into())
        );
    }

    #[test]
    fn round_trips_through_json() {
        let mut params = IndexMap::new();
        params.insert(
            "limit".to_string(),
            ParamDescriptor {
                long: Some(LongAliases::One("limit".into())),
                kind: KindTag::Integer,
                default: Some("10".into()),
                ..Default::default()
            },
        );
        let descriptor = SchemaDescriptor { params };
        let json = serde_json::to_string(&descriptor).unwrap();
        let back: SchemaDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }
}
