//! Template Compiler
//!
//! Turns a path template such as `users/{id}/orders/{order:\d+}` into one
//! regular expression plus the ordered list of capture groups that hold
//! parameter values.
//!
//! Compilation happens once, at registration time. The resulting
//! [`CompiledTemplate`] is immutable and can be shared across threads;
//! match state lives in a [`MatchAttempt`](crate::MatchAttempt) created per
//! call.

pub mod groups;
pub mod parser;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::TemplateError;
use groups::group_count;
pub use parser::TemplateToken;

/// Expression emitted for a placeholder without a constraint
pub const DEFAULT_PARAM_REGEX: &str = "[^/]+";

/// Capture group holding one parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamGroup {
    /// 1-based group number inside the compiled expression
    pub group: usize,
    /// Parameter name
    pub name: String,
    /// True for `{name}`: the value can never contain `/`
    pub segment_confined: bool,
}

/// A template compiled into an executable matcher
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    regex_pattern: String,
    groups: Vec<ParamGroup>,
    tokens: Vec<TemplateToken>,
    pub(crate) full: Regex,
    pub(crate) prefix: Regex,
}

/// Compiles a template (free-function form of [`CompiledTemplate::new`])
pub fn compile(template: &str) -> Result<CompiledTemplate, TemplateError> {
    CompiledTemplate::new(template)
}

impl CompiledTemplate {
    /// Compiles `template`
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::CompiledTemplate;
    ///
    /// let t = CompiledTemplate::new("{a:(x)(y)}/{b}").unwrap();
    /// assert_eq!(t.regex_pattern(), "((x)(y))/([^/]+)");
    /// assert_eq!(t.groups()[1].group, 4);
    /// ```
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let tokens = parser::tokenize(template)?;

        let mut regex_pattern = String::new();
        let mut groups = Vec::new();
        let mut group_number = 1;

        for token in &tokens {
            match token {
                TemplateToken::Literal(text) => regex_pattern.push_str(&regex::escape(text)),
                TemplateToken::Param { name, constraint } => {
                    regex_pattern.push('(');
                    match constraint {
                        None => {
                            regex_pattern.push_str(DEFAULT_PARAM_REGEX);
                            groups.push(ParamGroup {
                                group: group_number,
                                name: name.clone(),
                                segment_confined: true,
                            });
                            group_number += 1;
                        }
                        Some(expr) => {
                            regex_pattern.push_str(expr);
                            groups.push(ParamGroup {
                                group: group_number,
                                name: name.clone(),
                                segment_confined: false,
                            });
                            group_number += 1 + group_count(expr);
                        }
                    }
                    regex_pattern.push(')');
                }
            }
        }

        let full = build_regex(template, &format!("^(?:{})$", regex_pattern))?;
        let prefix = build_regex(template, &format!("^(?:{})", regex_pattern))?;

        tracing::debug!(
            template = template,
            regex = %regex_pattern,
            params = groups.len(),
            "compiled path template"
        );

        Ok(Self {
            source: template.to_string(),
            regex_pattern,
            groups,
            tokens,
            full,
            prefix,
        })
    }

    /// The template as registered
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The generated expression, without anchors
    pub fn regex_pattern(&self) -> &str {
        &self.regex_pattern
    }

    /// Parameter groups in ascending group order
    pub fn groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Parameter names in template order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Number of capture groups the regex engine actually sees
    pub fn capture_count(&self) -> usize {
        self.full.captures_len() - 1
    }

    /// Builds a path by substituting `params` into the template
    ///
    /// Values are percent-encoded. For constrained parameters each
    /// `/`-separated piece is encoded on its own, so the separators survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::CompiledTemplate;
    /// use std::collections::HashMap;
    ///
    /// let t = CompiledTemplate::new("files/{path:.+}/v/{rev}").unwrap();
    /// let mut params = HashMap::new();
    /// params.insert("path".to_string(), "docs/read me".to_string());
    /// params.insert("rev".to_string(), "a/b".to_string());
    ///
    /// assert_eq!(t.expand(&params).unwrap(), "files/docs/read%20me/v/a%2Fb");
    /// ```
    pub fn expand(&self, params: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());

        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => out.push_str(text),
                TemplateToken::Param { name, constraint } => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingParameter { name: name.clone() })?;

                    if constraint.is_some() {
                        let encoded: Vec<_> = value.split('/').map(urlencoding::encode).collect();
                        out.push_str(&encoded.join("/"));
                    } else {
                        out.push_str(&urlencoding::encode(value));
                    }
                }
            }
        }

        Ok(out)
    }
}

fn build_regex(template: &str, expr: &str) -> Result<Regex, TemplateError> {
    Regex::new(expr).map_err(|e| TemplateError::InvalidRegex {
        template: template.to_string(),
        message: e.to_string(),
    })
}

impl FromStr for CompiledTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
