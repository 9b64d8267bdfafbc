//! The combined RDFS∪OWL 2 RL regime, and the "extension" regime's three
//! additions on top of it (component C9).
//!
//! Grounded on `CombinedClosure.py`'s `RDFS_OWLRL_Semantics`, whose
//! `rules()` runs the OWL RL rule set first and the RDFS rule set second on
//! every triple, and on `OWLRLExtras.py`'s `OWLRL_Extension`: `owl:hasSelf`
//! as an extra per-triple rule, `owl:rational` registered as a recognised
//! datatype, and restricted (faceted) datatypes subsumed under their base
//! datatype — the last of which must run only *after* the base one-time
//! rules have been flushed into the graph, since it depends on
//! `owl:onDatatype`/`owl:withRestrictions` triples that may themselves have
//! just been entailed.

use rdf_model::vocab::{owl, rdf};
use rdf_model::{Term, Triple};
use storage::Graph;

use crate::owl2rl::RuleOutput;
use crate::restricted::RestrictedDatatype;
use crate::{datatypes, owl2rl, rdfs, ReasoningError};

fn mk(s: Term, p: &str, o: Term) -> Triple {
    Triple::new_unchecked(s, Term::iri(p), o)
}

/// RDFS and OWL 2 RL applied together: OWL RL first, RDFS second, matching
/// `RDFS_OWLRL_Semantics.rules()`'s ordering.
pub fn apply(
    graph: &Graph,
    t: &Triple,
    cycle_num: usize,
    proxies: &crate::proxy::ProxyTable,
    restricted: &[RestrictedDatatype],
) -> RuleOutput {
    let mut out = owl2rl::apply(graph, t, proxies, restricted);
    out.triples.extend(rdfs::apply(graph, t, cycle_num));
    out
}

/// `owl:hasSelf`: a restriction `r` with `(r onProperty p) (r hasSelf true)`
/// is satisfied by exactly the individuals related to themselves via `p`. The
/// boolean literal has already become a proxy blank node by the time this
/// runs, so it is resolved back through the proxy table rather than read off
/// the term directly.
pub fn cls_has_self(graph: &Graph, t: &Triple, proxies: &crate::proxy::ProxyTable) -> Vec<Triple> {
    let mut out = Vec::new();
    if t.predicate.as_iri() != Some(owl::HAS_SELF) {
        return out;
    }
    let lexical = t
        .object
        .as_literal()
        .map(|l| l.lexical.to_string())
        .or_else(|| proxies.literal_for(&t.object).map(|l| l.lexical.to_string()));
    let is_true = lexical.is_some_and(|lex| lex == "true" || lex == "1");
    if !is_true {
        return out;
    }
    let r = t.subject.clone();
    let Some(p) = graph.objects(&r, &Term::iri(owl::ON_PROPERTY)).next() else {
        return out;
    };
    // (x p x) -> (x type r)
    for (x, y) in graph.subject_objects(&p) {
        if x == y {
            out.push(mk(x, rdf::TYPE, r.clone()));
        }
    }
    // (x type r) -> (x p x)
    for x in graph.subjects(&Term::iri(rdf::TYPE), &r) {
        out.push(Triple::new_unchecked(x.clone(), p.clone(), x));
    }
    out
}

/// Register `owl:rational` as a recognised datatype, the same way the base
/// one-time rules type every XSD datatype (`AxiomaticTriples.py`'s
/// datatype tables), so rules that check "is this a recognised datatype"
/// see it too, plus the two one-time `owl:hasSelf` schema axioms
/// (`OWLRLExtras.py`'s `OWLRL_Extension_Axiomatic_Triples`): `hasSelf` is
/// itself an `rdf:Property` whose domain is `rdf:Property`.
pub fn extension_one_time_rules() -> Vec<Triple> {
    vec![
        mk(Term::iri(owl::RATIONAL), rdf::TYPE, Term::iri(rdf_model::vocab::rdfs::DATATYPE)),
        mk(Term::iri(owl::HAS_SELF), rdf::TYPE, Term::iri(rdf::PROPERTY)),
        mk(Term::iri(owl::HAS_SELF), rdf_model::vocab::rdfs::DOMAIN, Term::iri(rdf::PROPERTY)),
    ]
}

/// The combined regime's three full-binding axioms (§4.7): `owl:Thing`,
/// `owl:Class` and `owl:DataRange` are equated with their RDFS counterparts,
/// since OWL 2 RL and RDFS describe the same universe of classes under two
/// different vocabularies.
pub fn combined_one_time_rules() -> Vec<Triple> {
    vec![
        mk(Term::iri(owl::THING), owl::EQUIVALENT_CLASS, Term::iri(rdf_model::vocab::rdfs::RESOURCE)),
        mk(Term::iri(owl::CLASS), owl::EQUIVALENT_CLASS, Term::iri(rdf_model::vocab::rdfs::CLASS)),
        mk(Term::iri(owl::DATA_RANGE), owl::EQUIVALENT_CLASS, Term::iri(rdf_model::vocab::rdfs::DATATYPE)),
    ]
}

/// Subsume every restricted datatype found in the graph under its base
/// datatype, expressed the same way the static lattice in
/// [`crate::datatypes`] is: as an `rdfs:subClassOf` triple. Must be called
/// after the base one-time rules (which may themselves entail
/// `owl:onDatatype` facts via equivalence rules) have already been flushed.
pub fn subsume_restricted_datatypes(restricted: &[RestrictedDatatype]) -> Vec<Triple> {
    restricted
        .iter()
        .map(|rt| mk(Term::iri(rt.iri.clone()), rdf_model::vocab::rdfs::SUB_CLASS_OF, Term::iri(rt.base_iri.clone())))
        .collect()
}

/// One-time pass: for every literal proxy whose datatype is a restricted
/// datatype's base, test `admits(value)` and on success type the proxy with
/// the restricted datatype too.
pub fn restricted_datatype_typings(proxies: &crate::proxy::ProxyTable, restricted: &[RestrictedDatatype]) -> Vec<Triple> {
    let mut out = Vec::new();
    for (bnode, lit) in proxies.iter() {
        let Some(dt) = lit.datatype.as_deref() else { continue };
        for rt in restricted.iter().filter(|rt| rt.base_iri == dt) {
            if rt.admits(&lit.lexical) {
                out.push(mk(bnode.clone(), rdf::TYPE, Term::iri(rt.iri.clone())));
            }
        }
    }
    out
}

/// `OWLRL_Extension.restriction_typing_check`: a literal typed with a
/// restricted datatype must satisfy both the base datatype's lexical rules
/// and the restriction's facets.
pub fn restriction_typing_check(lexical: &str, datatype: &str, restricted: &[RestrictedDatatype]) -> Result<(), ReasoningError> {
    let Some(rt) = restricted.iter().find(|rt| rt.iri == datatype) else {
        return Ok(());
    };
    if let Err(_message) = datatypes::validate_lexical(lexical, &rt.base_iri) {
        return Err(ReasoningError::LexicalInvalidity {
            lexical: lexical.to_string(),
            datatype: datatype.to_string(),
        });
    }
    if !rt.admits(lexical) {
        return Err(ReasoningError::RestrictionViolation(format!(
            "'{lexical}' does not satisfy the facets of restricted datatype <{datatype}>"
        )));
    }
    Ok(())
}
