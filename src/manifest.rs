//! Packaging manifest rendering.
//!
//! The release flow writes the packaging manifest by substituting
//! `{version}` and `{name}` into a template file kept next to the manifest
//! in the repository. The engine is a fail-safe `{variable}` substitution:
//! undefined variables are an error rather than a silent empty string, so a
//! typo in the template surfaces immediately.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`

use crate::context::ReleaseContext;
use crate::error::{RelcutError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::collections::HashMap;
use std::fmt;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    UndefinedVariable {
        /// The name of the undefined variable.
        name: String,
        /// The position in the template where the variable was found.
        position: usize,
    },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace {
        /// The position of the unmatched `{`.
        position: usize,
    },
    /// An empty variable name was found (e.g., `{}`).
    EmptyVariableName {
        /// The position of the empty variable.
        position: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined variable '{}' at position {} in template",
                    name, position
                )
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {} in template", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(
                    f,
                    "empty variable name '{{}}' at position {} in template",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Default timestamp version: UTC `year.month.day.hour.minute` with no
/// leading zeros in any component.
pub fn default_version() -> String {
    default_version_at(Utc::now())
}

fn default_version_at(now: DateTime<Utc>) -> String {
    format!(
        "{}.{}.{}.{}.{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute()
    )
}

/// Render the manifest template and write the manifest file.
///
/// # Arguments
///
/// * `ctx` - Resolved release context (repo root, config, paths)
/// * `version` - Version token substituted for `{version}`
/// * `name` - Package name substituted for `{name}`, when configured
///
/// # Returns
///
/// * `Ok(())` - Manifest written to the configured path
/// * `Err(RelcutError::UserError)` - Missing template, undefined variable,
///   or an I/O failure
pub fn render_manifest(ctx: &ReleaseContext, version: &str, name: Option<&str>) -> Result<()> {
    let template_path = ctx.template_path();
    let template = std::fs::read_to_string(&template_path).map_err(|e| {
        RelcutError::UserError(format!(
            "failed to read manifest template '{}': {}",
            template_path.display(),
            e
        ))
    })?;

    let mut vars = HashMap::new();
    vars.insert("version".to_string(), version.to_string());
    if let Some(name) = name {
        vars.insert("name".to_string(), name.to_string());
    }

    let rendered = render_template(&template, &vars).map_err(|e| {
        RelcutError::UserError(format!(
            "failed to render '{}': {}\n\
             Provide missing variables with --name or in release.yaml.",
            template_path.display(),
            e
        ))
    })?;

    let manifest_path = ctx.manifest_path();
    std::fs::write(&manifest_path, rendered).map_err(|e| {
        RelcutError::UserError(format!(
            "failed to write manifest '{}': {}",
            manifest_path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Render a template string by substituting `{variable}` placeholders.
///
/// Undefined variables, empty variable names, and unmatched `{` are errors.
pub fn render_template(
    template: &str,
    vars: &HashMap<String, String>,
) -> std::result::Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;
                for (_, c2) in chars.by_ref() {
                    if c2 == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c2);
                }

                if !closed {
                    return Err(TemplateError::UnmatchedBrace { position: pos });
                }
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }
                match vars.get(&name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedVariable {
                            name,
                            position: pos,
                        });
                    }
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
