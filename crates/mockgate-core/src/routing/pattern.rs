//! Route path patterns with `{param}` placeholders.

use regex::Regex;
use std::collections::HashMap;

/// A compiled route path pattern.
///
/// Paths are declared with `{name}` placeholders (`/api/users/{id}`); each
/// placeholder captures one path segment. The compiled form is kept twice:
/// an anchored regex for standalone path matching, and the unanchored
/// matching body so an endpoint matcher can recombine several route
/// patterns into one composite URL pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    body: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a declared path into a pattern.
    ///
    /// A missing leading `/` is tolerated and normalized in. A trailing
    /// slash on the matched path is always optional.
    pub fn compile(path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let mut param_names = Vec::new();
        let mut body = String::new();
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '{' {
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                param_names.push(name);
                body.push_str("([^/]+)");
            } else if matches!(
                c,
                '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '|' | '\\' | '}'
            ) {
                body.push('\\');
                body.push(c);
            } else {
                body.push(c);
            }
        }
        body.push_str("/?");

        // Escaped literals plus fixed insertions always form a valid regex
        let regex = Regex::new(&format!(r"\A{body}\z")).expect("valid regex");

        Self {
            raw: path,
            body,
            regex,
            param_names,
        }
    }

    /// The path as declared, normalized to a leading `/`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The unanchored matching body of the compiled pattern.
    pub fn pattern_body(&self) -> &str {
        &self.body
    }

    /// Match a request path, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;

        let params = self
            .param_names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                caps.get(i + 1)
                    .map(|m| (name.clone(), m.as_str().to_owned()))
            })
            .collect();

        Some(params)
    }
}
