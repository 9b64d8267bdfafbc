//! RDFS and OWL 2 RL deductive closure engine.
//!
//! The entry point is [`driver::Closure`]: it owns a [`storage::Graph`],
//! applies the one-time and per-cycle rules of the selected [`Regime`] to a
//! fixed point, and reports what it inferred plus any non-fatal
//! [`ReasoningError`]s it logged along the way.
//!
//! ```rust
//! use reasoning::{Closure, ClosureOptions, Regime};
//! use storage::Graph;
//! use rdf_model::{Term, Triple};
//!
//! let mut graph = Graph::new();
//! graph.insert(&Triple::try_new(
//!     Term::iri("http://example.org/Alice"),
//!     Term::iri("http://example.org/knows"),
//!     Term::iri("http://example.org/Bob"),
//! ).unwrap());
//!
//! let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(graph).unwrap();
//! assert!(report.graph.len() > 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod axioms;
pub mod combined;
pub mod datatypes;
pub mod driver;
pub mod lists;
pub mod owl2rl;
pub mod proxy;
pub mod rational;
pub mod rdfs;
pub mod restricted;

pub use driver::{Closure, ClosureOptions, ClosureReport, Regime};

/// Non-fatal reasoning errors: the closure logs these and keeps going,
/// optionally materialising them as triples (SPEC_FULL.md §7).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ReasoningError {
    /// Two individuals were derived to be both `owl:sameAs` and
    /// `owl:differentFrom`, or a class was derived disjoint with itself.
    #[error("inconsistency: {0}")]
    Inconsistency(String),

    /// A cardinality, `hasValue`, or similar restriction was violated.
    #[error("restriction violation: {0}")]
    RestrictionViolation(String),

    /// A literal's lexical form is not valid for its (explicit or implicit)
    /// datatype.
    #[error("lexically invalid '{lexical}' for datatype <{datatype}>")]
    LexicalInvalidity {
        /// The offending lexical form.
        lexical: String,
        /// The datatype IRI it failed to parse against.
        datatype: String,
    },

    /// A resource was typed `owl:Nothing`.
    #[error("resource typed owl:Nothing: {0}")]
    NothingTyping(String),
}

/// Fatal errors that abort a closure run outright.
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    /// The fixed-point loop did not converge within the configured
    /// resource guard.
    #[error("cycle limit of {0} exceeded without reaching a fixed point")]
    CycleLimitExceeded(usize),
}

/// Result type for fallible closure operations.
pub type ClosureResult<T> = Result<T, ClosureError>;
