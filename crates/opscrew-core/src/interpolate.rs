use crate::{OpscrewError, OpscrewResult};
use std::collections::HashMap;

/// Renders a template by substituting every `{name}` placeholder with the
/// corresponding value from `values`.
///
/// Resolution is a single eager pass: substituted values are never re-scanned
/// for placeholders. `{{` and `}}` escape to literal braces, so templates may
/// contain JSON snippets. A placeholder with no matching entry is a
/// [`OpscrewError::MissingInterpolationKey`] — an incomplete instruction must
/// never reach the reasoning backend silently.
pub fn interpolate(template: &str, values: &HashMap<String, String>) -> OpscrewResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => key.push(c),
                        None => {
                            return Err(OpscrewError::Config(format!(
                                "unterminated placeholder '{{{key}' in template"
                            )));
                        }
                    }
                }
                let value = values
                    .get(&key)
                    .ok_or_else(|| OpscrewError::MissingInterpolationKey(key.clone()))?;
                out.push_str(value);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}
