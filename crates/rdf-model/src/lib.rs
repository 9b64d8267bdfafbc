//! RDF term/triple data model for the deductive closure engine.
//!
//! This crate provides the types shared by every other crate in the
//! workspace: [`Term`] (IRI, blank node, or literal), [`Triple`], and the
//! [`vocab`] module of RDF/RDFS/OWL/XSD constants used by the axiom tables
//! and rule bodies.
//!
//! # Architecture
//!
//! Terms are owned (`Rc<str>`-backed) rather than borrowed: the closure
//! driver mutates the graph in place and mints fresh blank nodes for literal
//! proxies while inference runs, so nothing here can be tied to the lifetime
//! of a parsed input. The engine is single-threaded, so `Rc` rather than
//! `Arc` is enough — see SPEC_FULL.md §3 and §5.
//!
//! # Example
//!
//! ```rust
//! use rdf_model::{Term, Triple};
//!
//! let s = Term::iri("http://example.org/subject");
//! let p = Term::iri("http://example.org/predicate");
//! let o = Term::iri("http://example.org/object");
//! let triple = Triple::try_new(s, p, o).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod term;
mod triple;
pub mod vocab;

pub use term::{BlankNodeId, Literal, Term};
pub use triple::Triple;

/// Errors that can occur when constructing RDF terms or triples.
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    /// A triple was built with a term that cannot appear in subject
    /// position (only IRIs and blank nodes can).
    #[error("invalid subject: {0}")]
    InvalidSubject(String),

    /// A triple was built with a literal in predicate position; even
    /// generalised RDF (blank-node predicates, used mid-inference) never
    /// allows a literal predicate.
    #[error("invalid predicate: {0}")]
    InvalidPredicate(String),

    /// A literal's lexical form is not valid for its datatype.
    #[error("invalid literal '{lexical}' for datatype <{datatype}>")]
    InvalidLiteral {
        /// The offending lexical form.
        lexical: String,
        /// The datatype IRI the lexical form was checked against.
        datatype: String,
    },
}

/// Result type for RDF term/triple construction.
pub type Result<T> = std::result::Result<T, RdfError>;
