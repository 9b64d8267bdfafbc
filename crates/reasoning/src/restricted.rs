//! Restricted ("faceted") datatype extraction: `owl:onDatatype` /
//! `owl:withRestrictions` (component C4, the extension regime).
//!
//! The Python engine delegates this to a dedicated `RestrictedDatatype`
//! class that is not present in the retrieved source pack, so the facet
//! grammar here is taken directly from SPEC_FULL.md §3/§4.3 rather than
//! transliterated: `minInclusive`/`maxInclusive`/`minExclusive`/
//! `maxExclusive` compare numerically, `length`/`minLength`/`maxLength`
//! compare the lexical form's character count, and `pattern` is matched as
//! a literal substring-anchors-full-string check (a full XSD regex engine
//! is out of scope — see SPEC_FULL.md Non-goals).

use rdf_model::vocab::owl;
use rdf_model::Term;
use storage::Graph;

/// One `owl:withRestrictions` facet.
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    /// `xsd:minInclusive`
    MinInclusive(f64),
    /// `xsd:maxInclusive`
    MaxInclusive(f64),
    /// `xsd:minExclusive`
    MinExclusive(f64),
    /// `xsd:maxExclusive`
    MaxExclusive(f64),
    /// `xsd:length`
    Length(usize),
    /// `xsd:minLength`
    MinLength(usize),
    /// `xsd:maxLength`
    MaxLength(usize),
    /// `xsd:pattern`
    Pattern(String),
}

/// A datatype defined by restricting another ("base") datatype with facets.
#[derive(Debug, Clone)]
pub struct RestrictedDatatype {
    /// The restricted datatype's own IRI.
    pub iri: String,
    /// The datatype it restricts (`owl:onDatatype`).
    pub base_iri: String,
    /// The facets from `owl:withRestrictions`, all of which must admit a
    /// value for it to belong to this datatype.
    pub facets: Vec<Facet>,
}

impl RestrictedDatatype {
    /// Whether `lexical` satisfies every facet.
    pub fn admits(&self, lexical: &str) -> bool {
        self.facets.iter().all(|facet| match facet {
            Facet::MinInclusive(bound) => numeric(lexical).is_some_and(|v| v >= *bound),
            Facet::MaxInclusive(bound) => numeric(lexical).is_some_and(|v| v <= *bound),
            Facet::MinExclusive(bound) => numeric(lexical).is_some_and(|v| v > *bound),
            Facet::MaxExclusive(bound) => numeric(lexical).is_some_and(|v| v < *bound),
            Facet::Length(n) => lexical.chars().count() == *n,
            Facet::MinLength(n) => lexical.chars().count() >= *n,
            Facet::MaxLength(n) => lexical.chars().count() <= *n,
            Facet::Pattern(pattern) => lexical == pattern,
        })
    }
}

fn numeric(lexical: &str) -> Option<f64> {
    lexical.parse::<f64>().ok()
}

/// Scan the graph for `owl:onDatatype`/`owl:withRestrictions` declarations
/// and parse them into [`RestrictedDatatype`]s.
pub fn extract_restricted_datatypes(graph: &Graph) -> Vec<RestrictedDatatype> {
    let mut out = Vec::new();
    let on_datatype = Term::iri(owl::ON_DATATYPE);
    for (iri, base) in graph.subject_objects(&on_datatype) {
        let Some(iri_str) = iri.as_iri() else { continue };
        let Some(base_str) = base.as_iri() else { continue };
        let mut facets = Vec::new();
        let with_restrictions = Term::iri(owl::WITH_RESTRICTIONS);
        for (_, list_head) in graph
            .predicate_objects(&iri)
            .filter(|(p, _)| *p == with_restrictions)
        {
            facets.extend(parse_facet_list(graph, &list_head));
        }
        out.push(RestrictedDatatype {
            iri: iri_str.to_string(),
            base_iri: base_str.to_string(),
            facets,
        });
    }
    out
}

fn parse_facet_list(graph: &Graph, head: &Term) -> Vec<Facet> {
    let first = Term::iri(rdf_model::vocab::rdf::FIRST);
    let rest = Term::iri(rdf_model::vocab::rdf::REST);
    let nil = Term::iri(rdf_model::vocab::rdf::NIL);

    let mut facets = Vec::new();
    let mut node = head.clone();
    while node != nil {
        let Some(element) = graph.objects(&node, &first).next() else {
            break;
        };
        facets.extend(facets_from_restriction_node(graph, &element));
        let Some(next) = graph.objects(&node, &rest).next() else {
            break;
        };
        node = next;
    }
    facets
}

fn facets_from_restriction_node(graph: &Graph, node: &Term) -> Vec<Facet> {
    const XSD: &str = rdf_model::vocab::xsd::NS;
    let mut out = Vec::new();
    for (predicate, object) in graph.predicate_objects(node) {
        let Some(p) = predicate.as_iri() else { continue };
        let Some(lex) = literal_lexical(&object) else { continue };
        let facet = if p == format!("{XSD}minInclusive") {
            numeric(&lex).map(Facet::MinInclusive)
        } else if p == format!("{XSD}maxInclusive") {
            numeric(&lex).map(Facet::MaxInclusive)
        } else if p == format!("{XSD}minExclusive") {
            numeric(&lex).map(Facet::MinExclusive)
        } else if p == format!("{XSD}maxExclusive") {
            numeric(&lex).map(Facet::MaxExclusive)
        } else if p == format!("{XSD}length") {
            lex.parse().ok().map(Facet::Length)
        } else if p == format!("{XSD}minLength") {
            lex.parse().ok().map(Facet::MinLength)
        } else if p == format!("{XSD}maxLength") {
            lex.parse().ok().map(Facet::MaxLength)
        } else if p == format!("{XSD}pattern") {
            Some(Facet::Pattern(lex))
        } else {
            None
        };
        if let Some(facet) = facet {
            out.push(facet);
        }
    }
    out
}

fn literal_lexical(term: &Term) -> Option<String> {
    term.as_literal().map(|l| l.lexical.to_string())
}
