//! RDF terms: IRIs, blank nodes, and literals.
//!
//! Unlike a zero-copy `Node<'a>`, `Term` owns its data. The closure driver
//! mutates the graph in place and mints fresh blank nodes for literal proxies
//! while inference is running, so terms cannot be tied to a borrow of the
//! input. Strings are `Rc<str>` rather than `String` so that the same subject
//! or predicate, repeated across thousands of rule firings in a cycle, clones
//! for the price of a refcount bump. The engine is single-threaded (see the
//! concurrency model in SPEC_FULL.md §5), so `Rc` rather than `Arc` is enough.

use std::fmt;
use std::rc::Rc;

use crate::vocab::xsd;

/// A blank node identifier, unique within one `Graph`/closure run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNodeId(pub u64);

impl fmt::Display for BlankNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.0)
    }
}

/// A literal value: lexical form plus an optional datatype and language tag.
///
/// A literal with neither datatype nor language is implicitly `xsd:string`
/// for the purposes of value comparison (see [`Literal::effective_datatype`]),
/// but its *identity* (used for equality/hashing) is the literal three-tuple
/// as written, matching SPEC_FULL.md §3.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub lexical: Rc<str>,
    pub datatype: Option<Rc<str>>,
    pub language: Option<Rc<str>>,
}

impl Literal {
    pub fn plain(lexical: impl Into<Rc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<Rc<str>>, language: impl Into<Rc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn typed(lexical: impl Into<Rc<str>>, datatype: impl Into<Rc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// The datatype this literal behaves as for value comparison: an
    /// explicit datatype, or `xsd:string` when there is no datatype and no
    /// language tag (plain literals and `rdf:langString` are distinct).
    pub fn effective_datatype(&self) -> Option<&str> {
        match (&self.datatype, &self.language) {
            (Some(dt), _) => Some(dt.as_ref()),
            (None, None) => Some(xsd::STRING),
            (None, Some(_)) => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.datatype.is_none() && self.language.is_none()
    }

    pub fn has_datatype(&self, iri: &str) -> bool {
        self.datatype.as_deref() == Some(iri)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical)?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")?;
        }
        Ok(())
    }
}

/// A generalised-RDF term: IRI, blank node, or literal.
///
/// `Variable` and `QuotedTriple` (RDF-star) are deliberately absent — SWRL/
/// SPARQL variables and quoted triples are outside the scope of the
/// deductive-closure engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(Rc<str>),
    Blank(BlankNodeId),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<Rc<str>>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(id: u64) -> Self {
        Term::Blank(BlankNodeId(id))
    }

    pub fn literal(lit: Literal) -> Self {
        Term::Literal(lit)
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<BlankNodeId> {
        match self {
            Term::Blank(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// True if this term may legally occur in subject position of plain
    /// (non-generalised, non-literal-proxied) RDF.
    pub fn is_subject_like(&self) -> bool {
        matches!(self, Term::Iri(_) | Term::Blank(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(b) => write!(f, "{b}"),
            Term::Literal(lit) => write!(f, "{lit}"),
        }
    }
}
