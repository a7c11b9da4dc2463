use std::collections::HashMap;

use super::parser::placeholders;

/// Values typed so far, keyed by variable name. A missing or empty entry
/// renders as the canonical `{{name}}` token.
pub type VariableValues = HashMap<String, String>;

/// Substitute every placeholder token in `content` in a single pass.
///
/// Substituted values are never rescanned, so a value that itself looks like
/// a placeholder is emitted verbatim.
pub fn render(content: &str, values: &VariableValues) -> String {
    let mut output = String::with_capacity(content.len());
    let mut last = 0;

    for token in placeholders(content) {
        output.push_str(&content[last..token.range.start]);
        match values.get(token.name).filter(|value| !value.is_empty()) {
            Some(value) => output.push_str(value),
            None => {
                output.push_str("{{");
                output.push_str(token.name);
                output.push_str("}}");
            }
        }
        last = token.range.end;
    }

    output.push_str(&content[last..]);
    output
}
