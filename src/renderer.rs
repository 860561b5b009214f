//! Template renderer and rendering functionality for Kiln.
//! Renders the bundled MiniJinja templates with an inspection-style
//! escaping policy.
use crate::assets;
use crate::error::{Error, Result};
use log::debug;
use minijinja::{
    escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, UndefinedBehavior, Value,
};
use std::fmt::Write;
use std::path::PathBuf;

/// Auto-escape mode applied to every bundled template.
const INSPECT: AutoEscape = AutoEscape::Custom("inspect");

/// A single unit of rendering: template source, destination and context.
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    /// Name of the bundled template
    pub source_name: String,
    /// Path of the rendered file, relative to the project root
    pub target_path: PathBuf,
    /// Variables available to the template
    pub context: serde_json::Value,
}

impl TemplateDescriptor {
    pub fn new<S, P>(source_name: S, target_path: P, context: serde_json::Value) -> Self
    where
        S: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            source_name: source_name.into(),
            target_path: target_path.into(),
            context,
        }
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the template a descriptor points to.
    ///
    /// # Arguments
    /// * `descriptor` - Template name and the context to render it with
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, descriptor: &TemplateDescriptor) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer serving templates from the bundled assets.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok(assets::get(name)
                .filter(|_| assets::is_jinja_template(name))
                .map(str::to_owned))
        });
        env.set_auto_escape_callback(|_| INSPECT);
        env.set_formatter(inspect_formatter);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a bundled template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateAssetError` if the template is not bundled
    /// * `Error::MinijinjaError` if parsing or rendering fails
    fn render(&self, descriptor: &TemplateDescriptor) -> Result<String> {
        debug!(
            "Rendering '{}' into '{}'",
            descriptor.source_name,
            descriptor.target_path.display()
        );

        let tmpl = self.env.get_template(&descriptor.source_name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateAssetError {
                    name: descriptor.source_name.clone(),
                }
            } else {
                Error::MinijinjaError(e)
            }
        })?;

        Ok(tmpl.render(&descriptor.context)?)
    }
}

/// Writes substituted values the way a debug inspection prints them.
/// Values marked safe are written raw.
fn inspect_formatter(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if !matches!(state.auto_escape(), AutoEscape::Custom("inspect")) || value.is_safe() {
        return escape_formatter(out, state, value);
    }

    let value = serde_json::to_value(value)
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
    out.write_str(&inspect(&value))
        .map_err(|_| minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output"))
}

/// Stringifies a value for debugging output.
///
/// Strings are single-quoted with quotes, backslashes and control characters
/// escaped; arrays and objects are printed recursively as `[ a, b ]` and
/// `{ key: value }`. Keys that are not plain identifiers are quoted.
///
/// # Example
/// ```
/// use kiln::renderer::inspect;
///
/// let value = serde_json::json!({"name": "app", "ports": [3000, 3001]});
/// assert_eq!(inspect(&value), "{ name: 'app', ports: [ 3000, 3001 ] }");
/// ```
pub fn inspect(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => quote(s),
        serde_json::Value::Array(items) if items.is_empty() => "[]".to_string(),
        serde_json::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(inspect).collect();
            format!("[ {} ]", items.join(", "))
        }
        serde_json::Value::Object(map) if map.is_empty() => "{}".to_string(),
        serde_json::Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", inspect_key(key), inspect(value)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

fn inspect_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\x{:02X}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
