//! N-Triples parser (W3C N-Triples, line-based, absolute IRIs only).
//!
//! N-Triples has no prefixes, no base, no abbreviations, so unlike
//! [`crate::turtle`] this parser needs no persistent directive state — one
//! line parses to at most one triple, independent of every other line.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{map, opt, recognize};
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use ahash::AHashMap;
use rdf_model::{Literal, Term, Triple};

use crate::{ParseError, ParseResult};

/// Stateless N-Triples parser.
#[derive(Debug, Default)]
pub struct NTriplesParser {
    blank_ids: AHashMap<String, u64>,
    next_blank: u64,
}

impl NTriplesParser {
    /// A fresh parser with an empty blank-node label table.
    pub fn new() -> Self {
        NTriplesParser::default()
    }

    /// Parse a complete N-Triples document into triples.
    pub fn parse(&mut self, content: &str) -> ParseResult<Vec<Triple>> {
        let mut triples = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let triple = self.parse_line(line).map_err(|message| ParseError::Syntax {
                line: lineno + 1,
                col: 0,
                message,
            })?;
            triples.push(triple);
        }
        Ok(triples)
    }

    fn parse_line(&mut self, line: &str) -> Result<Triple, String> {
        let (rest, (s, p, o)) = triple_line(line).map_err(|e| e.to_string())?;
        let _ = rest;
        let subject = self.resolve(s);
        let predicate = self.resolve(p);
        let object = self.resolve(o);
        Triple::try_new(subject, predicate, object).map_err(|e| e.to_string())
    }

    fn resolve(&mut self, term: RawTerm) -> Term {
        match term {
            RawTerm::Iri(iri) => Term::iri(iri),
            RawTerm::Blank(label) => {
                let id = *self.blank_ids.entry(label).or_insert_with(|| {
                    let id = self.next_blank;
                    self.next_blank += 1;
                    id
                });
                Term::blank(id)
            }
            RawTerm::Literal(lit) => Term::literal(lit),
        }
    }
}

enum RawTerm {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

fn iriref(input: &str) -> IResult<&str, String> {
    map(delimited(char('<'), is_not("<>\""), char('>')), |s: &str| {
        unescape_unicode(s)
    })(input)
}

fn blank_node_label(input: &str) -> IResult<&str, String> {
    preceded(
        tag("_:"),
        map(
            take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '.'),
            |s: &str| s.to_string(),
        ),
    )(input)
}

fn string_literal_quote(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('"'), recognize_escaped_string, char('"')),
        unescape_string,
    )(input)
}

fn recognize_escaped_string(input: &str) -> IResult<&str, &str> {
    let mut end = 0;
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => break,
            b'\\' => i += 2,
            _ => i += 1,
        }
        end = i;
    }
    Ok((&input[end..], &input[..end]))
}

fn unescape_string(s: &str) -> String {
    unescape_unicode(s)
}

fn unescape_unicode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if let Ok(code) = u32::from_str_radix(&hex, 16) {
                    if let Some(ch) = char::from_u32(code) {
                        out.push(ch);
                    }
                }
            }
            Some('U') => {
                let hex: String = chars.by_ref().take(8).collect();
                if let Ok(code) = u32::from_str_radix(&hex, 16) {
                    if let Some(ch) = char::from_u32(code) {
                        out.push(ch);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn langtag(input: &str) -> IResult<&str, String> {
    preceded(
        char('@'),
        map(
            take_while1(|c: char| c.is_alphanumeric() || c == '-'),
            |s: &str| s.to_string(),
        ),
    )(input)
}

fn literal(input: &str) -> IResult<&str, Literal> {
    let (input, lexical) = string_literal_quote(input)?;
    let (input, modifier) = opt(alt((
        map(langtag, Modifier::Lang),
        map(preceded(tag("^^"), iriref), Modifier::Datatype),
    )))(input)?;
    let lit = match modifier {
        Some(Modifier::Lang(lang)) => Literal::lang(lexical, lang),
        Some(Modifier::Datatype(dt)) => Literal::typed(lexical, dt),
        None => Literal::plain(lexical),
    };
    Ok((input, lit))
}

enum Modifier {
    Lang(String),
    Datatype(String),
}

fn subject_term(input: &str) -> IResult<&str, RawTerm> {
    alt((
        map(iriref, RawTerm::Iri),
        map(blank_node_label, RawTerm::Blank),
    ))(input)
}

fn predicate_term(input: &str) -> IResult<&str, RawTerm> {
    map(iriref, RawTerm::Iri)(input)
}

fn object_term(input: &str) -> IResult<&str, RawTerm> {
    alt((
        map(iriref, RawTerm::Iri),
        map(blank_node_label, RawTerm::Blank),
        map(literal, RawTerm::Literal),
    ))(input)
}

fn triple_line(input: &str) -> IResult<&str, (RawTerm, RawTerm, RawTerm)> {
    map(
        tuple((
            subject_term,
            preceded(multispace1, predicate_term),
            preceded(multispace1, object_term),
            preceded(multispace0, pair(char('.'), multispace0)),
        )),
        |(s, p, o, _)| (s, p, o),
    )(input)
}
