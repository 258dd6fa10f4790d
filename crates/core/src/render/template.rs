//! Page templates with `{{name}}` placeholders.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::RenderError;

pub type RenderContext = HashMap<String, String>;

/// Template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<style>
body { max-width: 46rem; margin: 2rem auto; padding: 0 1rem; font-family: sans-serif; line-height: 1.5; }
dl.metadata { display: grid; grid-template-columns: max-content auto; gap: .25rem 1rem; padding: .75rem; background: #f5f5f5; }
dl.metadata dt { font-weight: bold; }
dl.metadata dd { margin: 0; }
dl.metadata ul { margin: 0; padding-left: 1.2rem; }
</style>
</head>
<body>
<header><a href="{{home}}">{{site_title}}</a></header>
<main>
<h1>{{title}}</h1>
{{metadata}}
{{content}}
</main>
<footer><small>{{path}} &middot; generated {{date}}</small></footer>
</body>
</html>
"#;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Captures everything between {{ and }}
    Regex::new(r"\{\{([^{}]+)\}\}").unwrap()
});

/// Read a template file, or fall back to [`DEFAULT_TEMPLATE`].
pub fn load_template(path: Option<&Path>) -> Result<String, RenderError> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|source| RenderError::TemplateRead {
            path: p.display().to_string(),
            source,
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Render a string template with variable substitution.
///
/// Supports:
/// - Simple variables: `{{var_name}}`
/// - Filters: `{{var_name | filter}}` (lower, upper, trim, slugify)
///
/// Unknown variables are left in place. Substituted values are not scanned again.
pub fn render_string(template: &str, ctx: &RenderContext) -> String {
    let result = PLACEHOLDER_RE.replace_all(template, |caps: &regex::Captures<'_>| {
        let expr = caps[1].trim();

        if let Some((var_name, filter)) = parse_filter_expr(expr) {
            return match ctx.get(var_name) {
                Some(value) => apply_filter(value, filter),
                None => caps[0].to_string(),
            };
        }

        ctx.get(expr).cloned().unwrap_or_else(|| caps[0].to_string())
    });

    result.into_owned()
}

/// Parse a filter expression like "var_name | filter_name".
fn parse_filter_expr(expr: &str) -> Option<(&str, &str)> {
    let (var_name, filter) = expr.split_once('|')?;
    let (var_name, filter) = (var_name.trim(), filter.trim());
    if var_name.is_empty() || filter.is_empty() {
        return None;
    }
    Some((var_name, filter))
}

fn apply_filter(value: &str, filter: &str) -> String {
    match filter {
        "slugify" => slugify(value),
        "lowercase" | "lower" => value.to_lowercase(),
        "uppercase" | "upper" => value.to_uppercase(),
        "trim" => value.trim().to_string(),
        _ => value.to_string(), // Unknown filter, return unchanged
    }
}

/// Convert a string to a URL-friendly slug.
///
/// - Converts to lowercase
/// - Replaces spaces and underscores with hyphens
/// - Removes non-alphanumeric characters (except hyphens)
/// - Collapses multiple hyphens into one
/// - Trims leading/trailing hyphens
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if (c == ' ' || c == '_' || c == '-') && !result.ends_with('-') {
            result.push('-');
        }
    }

    result.trim_matches('-').to_string()
}
