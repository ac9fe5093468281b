//! Help listing assembly.

use serde::Serialize;

use crate::schema::{Presence, Schema};

/// Generated help listing: positional parameters and aliased options, each
/// in declaration order. Computed from the schema alone, so it is
/// available whether or not a parse succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Help {
    /// Positional parameters, rendered `<name>` or `<name=default>`.
    pub params: Vec<String>,
    /// Aliased parameters, rendered as space-joined alias tokens followed
    /// by a value placeholder for non-flag kinds.
    pub options: Vec<String>,
}

pub(crate) fn describe(schema: &Schema) -> Help {
    let mut help = Help::default();

    for (name, param) in schema.iter() {
        if param.is_positional() {
            let entry = match param.presence() {
                Presence::Default(default) => format!("<{name}={default}>"),
                _ => format!("<{name}>"),
            };
            help.params.push(entry);
            continue;
        }

        let mut parts: Vec<String> = Vec::new();
        if let Some(short) = param.short_alias() {
            parts.push(format!("-{short}"));
        }
        for long in param.long_aliases() {
            parts.push(format!("--{long}"));
        }
        if !param.kind().is_flag() {
            parts.push(format!("<{name}>"));
        }
        help.options.push(parts.join(" "));
    }

    help
}

impl Help {
    /// Render a usage block in the conventional two-section layout.
    pub fn render(&self, program: &str) -> String {
        let mut out = String::new();

        out.push_str("Usage: ");
        out.push_str(program);
        if !self.options.is_empty() {
            out.push_str(" [OPTIONS]");
        }
        for param in &self.params {
            out.push(' ');
            out.push_str(param);
        }
        out.push('\n');

        if !self.params.is_empty() {
            out.push_str("\nArguments:\n");
            for param in &self.params {
                out.push_str("  ");
                out.push_str(param);
                out.push('\n');
            }
        }

        if !self.options.is_empty() {
            out.push_str("\nOptions:\n");
            for option in &self.options {
                out.push_str("  ");
                out.push_str(option);
                out.push('\n');
            }
        }

        out
    }
}
