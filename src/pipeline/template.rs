//! Prompt template substitution
//!
//! Stage prompts carry `{placeholder}` markers that are filled in per run.
//! Substitution is fail-fast: a placeholder with no declared value is an
//! error, never silently passed through or replaced with an empty string.
//! `{{` and `}}` escape to literal braces.

use std::collections::HashMap;
use thiserror::Error;

/// Declared placeholder values for one render
#[derive(Debug, Clone, Default)]
pub struct TemplateVars(HashMap<String, String>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a placeholder value (builder style)
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Template rendering failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder was used that has no declared value
    #[error("unrecognized placeholder '{{{name}}}' at byte {position}")]
    UnknownPlaceholder { name: String, position: usize },

    /// A `{` was opened and never closed
    #[error("unterminated '{{' at byte {position}")]
    UnterminatedBrace { position: usize },

    /// A bare `{}` with no placeholder name
    #[error("empty placeholder at byte {position}")]
    EmptyPlaceholder { position: usize },
}

/// Substitute declared placeholders into `template`
pub fn render(template: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::UnterminatedBrace { position }),
                    }
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyPlaceholder { position });
                }

                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UnknownPlaceholder {
                            name: name.to_string(),
                            position,
                        })
                    }
                }
            }
            '}' => {
                // }} escapes; a lone } is ordinary text
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}
