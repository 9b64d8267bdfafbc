//! Plain RDFS entailment (component C7): the thirteen W3C RDFS entailment
//! rules, dispatched per-triple exactly as the original engine dispatches
//! them.
//!
//! Grounded on `RDFSClosure.py`'s `rules(self, t, cycle_num)`: each rule
//! fires off the *shape* of the triple currently being processed — its
//! predicate, and for the type-based rules its object too — looking up
//! whatever complementary facts it needs from the graph rather than
//! re-joining over the whole store every cycle.

use rdf_model::vocab::{rdf, rdfs};
use rdf_model::{Term, Triple};
use storage::Graph;

fn mk(s: Term, p: &str, o: Term) -> Triple {
    Triple::new_unchecked(s, Term::iri(p), o)
}

/// Entailments triggered by processing `t` during one cycle.
///
/// `cycle_num` is 1-based; rdfs4a/rdfs4b only need to fire the first time a
/// triple is seen, since every triple entails the same two `rdfs:Resource`
/// typings regardless of how many cycles have run since — repeating them
/// every cycle would be redundant (insertion is idempotent either way) but
/// the original skips the work outright after cycle 1.
pub fn apply(graph: &Graph, t: &Triple, cycle_num: usize) -> Vec<Triple> {
    let mut out = Vec::new();
    let type_iri = Term::iri(rdf::TYPE);
    let sub_property_of = Term::iri(rdfs::SUB_PROPERTY_OF);
    let sub_class_of = Term::iri(rdfs::SUB_CLASS_OF);

    // rdf1: every predicate is an instance of rdf:Property.
    out.push(mk(t.predicate.clone(), rdf::TYPE, Term::iri(rdf::PROPERTY)));

    if cycle_num == 1 {
        // rdfs4a / rdfs4b: subjects and (subject-like) objects are resources.
        out.push(mk(t.subject.clone(), rdf::TYPE, Term::iri(rdfs::RESOURCE)));
        if t.object.is_subject_like() {
            out.push(mk(t.object.clone(), rdf::TYPE, Term::iri(rdfs::RESOURCE)));
        }
    }

    if t.predicate.as_iri() == Some(rdfs::DOMAIN) {
        // rdfs2: (p domain c) & (s p o) -> (s type c)
        let (p, c) = (t.subject.clone(), t.object.clone());
        for (s, _o) in graph.subject_objects(&p) {
            out.push(mk(s, rdf::TYPE, c.clone()));
        }
    }

    if t.predicate.as_iri() == Some(rdfs::RANGE) {
        // rdfs3: (p range c) & (s p o) -> (o type c)
        let (p, c) = (t.subject.clone(), t.object.clone());
        for (_s, o) in graph.subject_objects(&p) {
            out.push(mk(o, rdf::TYPE, c.clone()));
        }
    }

    if t.predicate.as_iri() == Some(rdfs::SUB_PROPERTY_OF) {
        let (p, q) = (t.subject.clone(), t.object.clone());

        // rdfs7: (p sub q) & (s p o) -> (s q o)
        for (s, o) in graph.subject_objects(&p) {
            out.push(Triple::new_unchecked(s, q.clone(), o));
        }

        // rdfs5: transitivity of subPropertyOf.
        for r in graph.objects(&q, &sub_property_of) {
            out.push(mk(p.clone(), rdfs::SUB_PROPERTY_OF, r));
        }
        for p0 in graph.subjects(&sub_property_of, &p) {
            out.push(mk(p0, rdfs::SUB_PROPERTY_OF, q.clone()));
        }
    }

    if t.predicate == type_iri && t.object.as_iri() == Some(rdf::PROPERTY) {
        // rdfs6: every property is (reflexively) a sub-property of itself.
        out.push(mk(t.subject.clone(), rdfs::SUB_PROPERTY_OF, t.subject.clone()));
    }

    if t.predicate == type_iri && t.object.as_iri() == Some(rdfs::CLASS) {
        let c = t.subject.clone();
        // rdfs8: every class is a subclass of rdfs:Resource.
        out.push(mk(c.clone(), rdfs::SUB_CLASS_OF, Term::iri(rdfs::RESOURCE)));
        // rdfs10: every class is (reflexively) a subclass of itself.
        out.push(mk(c.clone(), rdfs::SUB_CLASS_OF, c));
    }

    if t.predicate.as_iri() == Some(rdfs::SUB_CLASS_OF) {
        let (c1, c2) = (t.subject.clone(), t.object.clone());

        // rdfs9: (c1 sub c2) & (x type c1) -> (x type c2)
        for x in graph.subjects(&type_iri, &c1) {
            out.push(mk(x, rdf::TYPE, c2.clone()));
        }

        // rdfs11: transitivity of subClassOf.
        for c3 in graph.objects(&c2, &sub_class_of) {
            out.push(mk(c1.clone(), rdfs::SUB_CLASS_OF, c3));
        }
        for c0 in graph.subjects(&sub_class_of, &c1) {
            out.push(mk(c0, rdfs::SUB_CLASS_OF, c2.clone()));
        }
    }

    if t.predicate == type_iri && t.object.as_iri() == Some(rdfs::CONTAINER_MEMBERSHIP_PROPERTY) {
        // rdfs12: every container membership property is a sub-property of rdfs:member.
        out.push(mk(t.subject.clone(), rdfs::SUB_PROPERTY_OF, Term::iri(rdfs::MEMBER)));
    }

    if t.predicate == type_iri && t.object.as_iri() == Some(rdfs::DATATYPE) {
        // rdfs13: every datatype is a subclass of rdfs:Literal.
        out.push(mk(t.subject.clone(), rdfs::SUB_CLASS_OF, Term::iri(rdfs::LITERAL)));
    }

    out
}
