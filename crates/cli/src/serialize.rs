//! Output serialisation for the `-o` flag.
//!
//! Turtle output reuses [`rdf_model::Term`]'s own `Display` impl, which
//! already renders the `<iri>` / `_:bN` / `"lexical"^^<dt>` syntax valid
//! N-Triples shares with full-IRI Turtle — SPEC_FULL.md's A5 scope is
//! Turtle/N-Triples parsing and serialisation, so that is what ships here.
//! JSON and RDF/XML are named in the CLI's `-o` surface but not implemented,
//! matching the stub treatment JSON-LD/RDF-XML get on the input side.

use anyhow::{bail, Result};
use storage::{Graph, TriplePattern};

use crate::OutputFormat;

pub fn serialize(graph: &Graph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Turtle => Ok(to_turtle(graph)),
        OutputFormat::Json => bail!("JSON output is not yet supported"),
        OutputFormat::Xml => bail!("RDF/XML output is not yet supported"),
    }
}

fn to_turtle(graph: &Graph) -> String {
    let mut out = String::new();
    for t in graph.triples(&TriplePattern::all()) {
        out.push_str(&t.subject.to_string());
        out.push(' ');
        out.push_str(&t.predicate.to_string());
        out.push(' ');
        out.push_str(&t.object.to_string());
        out.push_str(" .\n");
    }
    out
}
