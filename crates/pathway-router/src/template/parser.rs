/// Template tokenizer
///
/// Splits a path template into alternating literal and placeholder tokens.
/// Pure function: same input → same tokens.
use crate::TemplateError;

/// One piece of a path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// Literal text, matched verbatim
    Literal(String),
    /// `{name}` or `{name:regex}`
    Param {
        name: String,
        constraint: Option<String>,
    },
}

/// Tokenizes a template
///
/// Braces inside a constraint must balance, so `{id:\d{3}}` is a single
/// placeholder whose constraint is `\d{3}`.
///
/// # Examples
///
/// ```
/// use pathway_router::template::parser::{tokenize, TemplateToken};
///
/// let tokens = tokenize("users/{id:\\d+}").unwrap();
/// assert_eq!(tokens[0], TemplateToken::Literal("users/".to_string()));
/// assert_eq!(
///     tokens[1],
///     TemplateToken::Param { name: "id".to_string(), constraint: Some("\\d+".to_string()) }
/// );
/// ```
pub fn tokenize(template: &str) -> Result<Vec<TemplateToken>, TemplateError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1usize;
                let mut body = String::new();

                for (_, inner) in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        break;
                    }
                    body.push(inner);
                }

                if depth != 0 {
                    return Err(TemplateError::UnbalancedBrace {
                        template: template.to_string(),
                        offset,
                    });
                }

                if !literal.is_empty() {
                    tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(parse_placeholder(template, &body)?);
            }
            '}' => {
                return Err(TemplateError::UnbalancedBrace {
                    template: template.to_string(),
                    offset,
                })
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(TemplateToken::Literal(literal));
    }

    Ok(tokens)
}

/// Parses the inside of `{...}` into a name and optional constraint
fn parse_placeholder(template: &str, body: &str) -> Result<TemplateToken, TemplateError> {
    let (name, constraint) = match body.split_once(':') {
        Some((name, constraint)) => (name.trim(), Some(constraint.trim_start())),
        None => (body.trim(), None),
    };

    if !is_valid_name(name) {
        return Err(TemplateError::InvalidName {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    if constraint == Some("") {
        return Err(TemplateError::EmptyConstraint {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    Ok(TemplateToken::Param {
        name: name.to_string(),
        constraint: constraint.map(str::to_string),
    })
}

/// `\w[\w.-]*`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_word(first) => chars.all(|c| is_word(c) || c == '.' || c == '-'),
        _ => false,
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
