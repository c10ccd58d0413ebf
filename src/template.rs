//! Positional message templates
//!
//! Templates use `{N}` placeholders that refer to the N-th format argument.
//! A placeholder may appear more than once; `{{` and `}}` produce literal
//! braces. Templates are parsed once, when they are constructed, so a
//! malformed template is rejected before it can reach user-visible text.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{OnboardingError, Result};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{(\d+)\}|\{[^{}]*\}?|\}").expect("template token pattern is valid")
});

/// A single format argument
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    /// Inserted verbatim
    Text(String),
    /// Inserted as a decimal integer
    Count(usize),
    /// Inserted rounded to a whole number, without the `%` sign
    Percent(f64),
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Count(count) => write!(f, "{}", count),
            Self::Percent(value) => write!(f, "{:.0}", value),
        }
    }
}

impl From<&str> for TemplateArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TemplateArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<usize> for TemplateArg {
    fn from(value: usize) -> Self {
        Self::Count(value)
    }
}

impl From<f64> for TemplateArg {
    fn from(value: f64) -> Self {
        Self::Percent(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(usize),
}

/// A parsed template with its placeholder-to-argument mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
    arity: usize,
}

impl MessageTemplate {
    /// Parse a template string.
    ///
    /// Fails on unbalanced braces, non-numeric placeholders, and on gaps in
    /// the argument indices (`{0}` and `{2}` without `{1}`).
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN.captures_iter(source) {
            let token = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            literal.push_str(&source[last..token.start]);
            last = token.end;

            match &source[token.clone()] {
                "{{" => literal.push('{'),
                "}}" => literal.push('}'),
                raw => {
                    let index = caps
                        .get(1)
                        .and_then(|m| m.as_str().parse::<usize>().ok())
                        .ok_or_else(|| OnboardingError::TemplateSyntax {
                            template: source.to_string(),
                            message: format!("unexpected {:?} at byte {}", raw, token.start),
                        })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(index));
                }
            }
        }
        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        // Indices must form 0..n exactly, so none may reach the number of
        // distinct placeholders.
        let indices: BTreeSet<usize> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(i) => Some(*i),
                Segment::Literal(_) => None,
            })
            .collect();
        let arity = indices.len();
        if let Some(missing) = (0..arity).find(|i| !indices.contains(i)) {
            return Err(OnboardingError::TemplateSyntax {
                template: source.to_string(),
                message: format!("argument {{{}}} is never used", missing),
            });
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            arity,
        })
    }

    /// Number of arguments the template expects
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Substitute arguments by position.
    pub fn render(&self, args: &[TemplateArg]) -> Result<String> {
        if args.len() != self.arity {
            return Err(OnboardingError::TemplateArity {
                kind: format!("{:?}", self.source),
                expected: self.arity,
                found: args.len(),
            });
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(index) => out.push_str(&args[*index].to_string()),
            }
        }
        Ok(out)
    }
}
