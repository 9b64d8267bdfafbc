//! In-memory RDF graph storage for the deductive closure engine.
//!
//! # Design
//!
//! - **Single store**: one [`Graph`], SPO/POS/OSP indexed with `ahash` sets,
//!   no persistence, no named graphs — the closure run lives entirely in
//!   memory for its duration (SPEC_FULL.md §3, §5).
//! - **Pattern queries**: [`TriplePattern`] picks the index with the fewest
//!   wildcards bound, same contract as a SPARQL basic graph pattern match
//!   but scoped to three positions instead of four.
//!
//! # Example
//!
//! ```rust
//! use storage::{Graph, TriplePattern};
//! use rdf_model::{Term, Triple};
//!
//! let mut graph = Graph::new();
//! let triple = Triple::try_new(
//!     Term::iri("http://example.org/s"),
//!     Term::iri("http://example.org/p"),
//!     Term::iri("http://example.org/o"),
//! ).unwrap();
//! graph.insert(&triple);
//!
//! let pattern = TriplePattern::new(None, Term::iri("http://example.org/p"), None);
//! assert_eq!(graph.triples(&pattern).len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod graph;
mod pattern;

pub use graph::Graph;
pub use pattern::{TermPattern, TriplePattern};
