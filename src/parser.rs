use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while1};
use nom::combinator::{map, rest, verify};
use nom::multi::many0;
use nom::sequence::delimited;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Variable(String),
}

/// A prompt template split into literal text and `{{variable}}` markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTemplate {
    pub parts: Vec<TemplatePart>,
}

#[derive(Debug, PartialEq)]
pub enum RenderError {
    MissingValue(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingValue(name) => {
                write!(f, "Missing value for variable: {}", name)
            }
        }
    }
}

impl Error for RenderError {}

/// Splits `input` into literal and variable parts.
///
/// A variable is `{{name}}` where `name` is one or more word characters
/// (alphanumeric or underscore). Anything else, including stray or unclosed
/// braces and markers containing other characters, stays literal text, so
/// parsing never fails.
pub fn parse_template(input: &str) -> ParsedTemplate {
    match many0(parse_element).parse(input) {
        Ok((_, parts)) => ParsedTemplate { parts },
        // Unreachable with the element parsers below; keep the whole input as a literal.
        Err(_) => ParsedTemplate {
            parts: vec![TemplatePart::Literal(input.to_string())],
        },
    }
}

/// Returns the variable names in `text`, in order of occurrence.
///
/// Every occurrence is reported, so a repeated variable appears once per use.
pub fn extract_variables(text: &str) -> Vec<String> {
    parse_template(text).variables()
}

fn parse_element(input: &str) -> IResult<&str, TemplatePart> {
    alt((
        map(parse_variable, |name| {
            TemplatePart::Variable(name.to_string())
        }),
        map(parse_literal_text, |text| {
            TemplatePart::Literal(text.to_string())
        }),
        // A "{{" that does not open a valid marker: consume one brace and rescan,
        // so "{{{name}}}" still yields the inner variable.
        map(tag("{"), |brace: &str| {
            TemplatePart::Literal(brace.to_string())
        }),
    ))
    .parse(input)
}

fn parse_literal_text(input: &str) -> IResult<&str, &str> {
    verify(alt((take_until("{{"), rest)), |s: &&str| !s.is_empty()).parse(input)
}

fn parse_variable(input: &str) -> IResult<&str, &str> {
    delimited(tag("{{"), word, tag("}}")).parse(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

impl ParsedTemplate {
    pub fn variables(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Renders the template, substituting each variable with its value.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, RenderError> {
        let mut result = String::new();

        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => result.push_str(text),
                TemplatePart::Variable(name) => match values.get(name) {
                    Some(value) => result.push_str(value),
                    None => return Err(RenderError::MissingValue(name.clone())),
                },
            }
        }

        Ok(result)
    }
}
