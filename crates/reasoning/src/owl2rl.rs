//! OWL 2 RL entailment (component C8): Tables 4 (equality), 5 (properties),
//! 6 (classes), 7 (class axioms) and 9 (schema vocabulary) of the profile.
//!
//! Grounded on the original engine's `OWLRL.py`: `_equality` for eq-*,
//! `_properties` for prp-*, `_classes` for cls-*, `_class_axioms` for cax-*,
//! `_schema_vocabulary` for scm-*, `_property_chain` for prp-spo2, and
//! `_one_time_rules_misc`/`_one_time_rules_datatypes` for the handful of
//! rules that only need to fire once per closure rather than per triple.
//!
//! The restriction-subsumption corner of Table 9 (`scm-hv`, `scm-svf1/2`,
//! `scm-avf1/2`, `scm-int`, `scm-uni`) is intentionally not implemented:
//! it relates two *class expressions* to each other rather than a class
//! expression to an instance, which would require unifying restriction
//! nodes structurally rather than dispatching off one triple's shape. The
//! instance-level consequences of those same restrictions (cls-svf1/2,
//! cls-avf, cls-hv1/2, cls-int1/2, cls-uni) are implemented in full.

use rdf_model::vocab::{owl, rdf, rdfs};
use rdf_model::{Term, Triple};
use storage::Graph;

use crate::restricted::RestrictedDatatype;
use crate::{combined, lists, ReasoningError};

/// What one call to [`apply`] or [`one_time_rules`] produced: entailed
/// triples plus any non-fatal reasoning errors observed along the way.
#[derive(Debug, Default)]
pub struct RuleOutput {
    /// Newly entailed triples.
    pub triples: Vec<Triple>,
    /// Non-fatal errors (inconsistencies, restriction violations) observed.
    pub errors: Vec<ReasoningError>,
}

impl RuleOutput {
    fn push(&mut self, t: Triple) {
        self.triples.push(t);
    }

    fn err(&mut self, e: ReasoningError) {
        self.errors.push(e);
    }
}

fn mk(s: Term, p: &str, o: Term) -> Triple {
    Triple::new_unchecked(s, Term::iri(p), o)
}

fn same_as(a: Term, b: Term) -> Triple {
    mk(a, owl::SAME_AS, b)
}

fn different_from(a: Term, b: Term) -> Triple {
    mk(a, owl::DIFFERENT_FROM, b)
}

/// The fixed list of built-in annotation properties (prp-ap): typed
/// `owl:AnnotationProperty` unconditionally, not derived from any input
/// triple.
const ANNOTATION_PROPERTIES: [&str; 9] = [
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::DEPRECATED,
    owl::VERSION_INFO,
    owl::PRIOR_VERSION,
    owl::BACKWARD_COMPATIBLE_WITH,
    owl::INCOMPATIBLE_WITH,
];

/// Triples that hold regardless of input: `cls-thing`/`cls-nothing1` (the
/// two universal classes are themselves classes) and `prp-ap` (the built-in
/// annotation properties are typed `owl:AnnotationProperty`).
pub fn one_time_rules() -> Vec<Triple> {
    let mut out = vec![
        mk(Term::iri(owl::THING), rdf::TYPE, Term::iri(owl::CLASS)),
        mk(Term::iri(owl::NOTHING), rdf::TYPE, Term::iri(owl::CLASS)),
    ];
    out.extend(ANNOTATION_PROPERTIES.iter().map(|p| mk(Term::iri(*p), rdf::TYPE, Term::iri(owl::ANNOTATION_PROPERTY))));
    out
}

/// Datatype one-time rules (dt-type1, dt-type2): classify every literal
/// proxy by its declared datatype and every `(s, rdf:type, dt)` already
/// asserted for a recognised datatype, emitting ancestor typings from the
/// subsumption lattice for both. `owl:sameAs` propagation needs no special
/// case here: once these typings land in the graph, `eq-rep-s` replicates
/// them across any `sameAs` edge during the ordinary fixed-point cycles.
/// Disjointness is added only between datatypes actually observed in the
/// graph, never the full cross product, per SPEC_FULL.md §4.2.
pub fn datatype_one_time_rules(graph: &Graph, proxies: &crate::proxy::ProxyTable) -> Vec<Triple> {
    let mut used = std::collections::BTreeSet::new();
    let mut out = Vec::new();

    for (bnode, lit) in proxies.iter() {
        let Some(dt) = lit.effective_datatype() else { continue };
        if !crate::datatypes::RDFS_DATATYPES.contains(&dt) {
            continue;
        }
        used.insert(dt.to_string());
        out.push(mk(bnode.clone(), rdf::TYPE, Term::iri(dt)));
        for super_dt in crate::datatypes::supertypes(dt) {
            out.push(mk(bnode.clone(), rdf::TYPE, Term::iri(*super_dt)));
        }
    }

    let type_iri = Term::iri(rdf::TYPE);
    for (s, dt_term) in graph.subject_objects(&type_iri) {
        let Some(dt) = dt_term.as_iri() else { continue };
        if !crate::datatypes::OWL_RL_DATATYPES.contains(&dt) {
            continue;
        }
        used.insert(dt.to_string());
        for super_dt in crate::datatypes::supertypes(dt) {
            out.push(mk(s.clone(), rdf::TYPE, Term::iri(*super_dt)));
        }
    }

    let used: Vec<String> = used.into_iter().collect();
    for (i, a) in used.iter().enumerate() {
        for b in &used[i + 1..] {
            if crate::datatypes::supertypes(a).contains(&b.as_str()) || crate::datatypes::supertypes(b).contains(&a.as_str()) {
                continue;
            }
            out.push(mk(Term::iri(a.as_str()), owl::DISJOINT_WITH, Term::iri(b.as_str())));
            out.push(mk(Term::iri(b.as_str()), owl::DISJOINT_WITH, Term::iri(a.as_str())));
        }
    }
    out
}

/// Entailments triggered by processing triple `t` against the graph's
/// current snapshot. Because every cycle re-scans the whole graph (rather
/// than only newly added triples), rules whose trigger is an axiom triple
/// (`propertyChainAxiom`, `hasKey`, `AllDifferent`/`AllDisjoint*` member
/// lists) still see freshly derived facts on the next cycle without needing
/// a separate re-trigger mechanism.
pub fn apply(graph: &Graph, t: &Triple, proxies: &crate::proxy::ProxyTable, restricted: &[RestrictedDatatype]) -> RuleOutput {
    let mut out = RuleOutput::default();

    // eq-ref: every term mentioned is trivially sameAs itself.
    for term in [&t.subject, &t.predicate, &t.object] {
        out.push(same_as(term.clone(), term.clone()));
    }

    if let Some(p) = t.predicate.as_iri() {
        match p {
            _ if p == owl::SAME_AS => equality_same_as(graph, t, &mut out),
            _ if p == owl::DIFFERENT_FROM => check_diff(graph, &t.subject, &t.object, owl::SAME_AS, &mut out),
            _ if p == rdfs::DOMAIN => prp_dom(graph, t, &mut out),
            _ if p == rdfs::RANGE => prp_rng(graph, t, &mut out),
            _ if p == rdfs::SUB_PROPERTY_OF => prp_spo1(graph, t, &mut out),
            _ if p == owl::EQUIVALENT_PROPERTY => prp_eqp(graph, t, &mut out),
            _ if p == owl::INVERSE_OF => prp_inv(graph, t, &mut out),
            _ if p == owl::PROPERTY_DISJOINT_WITH => prp_pdw(graph, t, &mut out),
            _ if p == owl::SOME_VALUES_FROM => cls_svf(graph, t, &mut out),
            _ if p == owl::ALL_VALUES_FROM => cls_avf(graph, t, proxies, restricted, &mut out),
            _ if p == owl::HAS_VALUE => cls_hv(graph, t, &mut out),
            _ if p == owl::MAX_CARDINALITY => cls_maxc(graph, t, proxies, &mut out),
            _ if p == owl::MAX_QUALIFIED_CARDINALITY => cls_maxqc(graph, t, proxies, &mut out),
            _ if p == owl::INTERSECTION_OF => cls_int(graph, t, &mut out),
            _ if p == owl::UNION_OF => cls_uni(graph, t, &mut out),
            _ if p == owl::COMPLEMENT_OF => cls_com(graph, t, &mut out),
            _ if p == owl::ONE_OF => cls_oo(graph, t, &mut out),
            _ if p == owl::DISJOINT_WITH => cax_dw(graph, t, &mut out),
            _ if p == owl::EQUIVALENT_CLASS => cax_eqc(graph, t, &mut out),
            _ if p == rdfs::SUB_CLASS_OF => cax_and_scm_sco(graph, t, &mut out),
            _ if p == owl::PROPERTY_CHAIN_AXIOM => prp_spo2(graph, t, &mut out),
            _ if p == owl::HAS_KEY => prp_key(graph, t, &mut out),
            _ if p == owl::MEMBERS || p == owl::DISTINCT_MEMBERS => all_different_or_disjoint(graph, t, &mut out),
            _ if p == owl::SOURCE_INDIVIDUAL || p == owl::ASSERTION_PROPERTY || p == owl::TARGET_INDIVIDUAL || p == owl::TARGET_VALUE => {
                npa_check(graph, &t.subject, &mut out)
            }
            _ if p == rdf::TYPE => type_triggered(graph, t, &mut out),
            _ => {}
        }
    }

    out
}

/// prp-npa1/prp-npa2: a negative property assertion node `x` names a source
/// individual, an assertion property, and a target individual or value; if
/// the asserted relation already holds in the graph, that is a contradiction.
fn npa_check(graph: &Graph, x: &Term, out: &mut RuleOutput) {
    let Some(i1) = graph.objects(x, &Term::iri(owl::SOURCE_INDIVIDUAL)).next() else { return };
    let Some(p) = graph.objects(x, &Term::iri(owl::ASSERTION_PROPERTY)).next() else { return };
    let targets: Vec<Term> = graph
        .objects(x, &Term::iri(owl::TARGET_INDIVIDUAL))
        .chain(graph.objects(x, &Term::iri(owl::TARGET_VALUE)))
        .collect();
    let Some(p_iri) = p.as_iri() else { return };
    for i2 in targets {
        if graph.objects(&i1, &p).any(|v| v == i2) {
            out.err(ReasoningError::Inconsistency(format!(
                "{x} asserts that {i1} is NOT related to {i2} via {p_iri}, but that triple already holds"
            )));
        }
    }
}

fn equality_same_as(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (x, y) = (t.subject.clone(), t.object.clone());
    // eq-sym
    out.push(same_as(y.clone(), x.clone()));
    // eq-trans
    let same_as_p = Term::iri(owl::SAME_AS);
    for z in graph.objects(&y, &same_as_p) {
        out.push(same_as(x.clone(), z));
    }
    // eq-rep-s / eq-rep-p / eq-rep-o: replace x with y (and y with x) in
    // every triple x/y currently participates in.
    for (p, o) in graph.predicate_objects(&x) {
        out.push(Triple::new_unchecked(y.clone(), p.clone(), o.clone()));
    }
    for (s, o) in graph.subject_objects(&x) {
        out.push(Triple::new_unchecked(s, y.clone(), o));
    }
    for (s, p) in graph.subject_predicates(&x) {
        out.push(Triple::new_unchecked(s, p, y.clone()));
    }
    check_diff(graph, &x, &y, owl::DIFFERENT_FROM, out);
}

/// eq-diff1, both directions: `other` is whichever of `owl:sameAs`/
/// `owl:differentFrom` was NOT just asserted on `(a, b)` — flags a
/// contradiction if it already holds the opposite relation.
fn check_diff(graph: &Graph, a: &Term, b: &Term, other: &str, out: &mut RuleOutput) {
    if graph.objects(a, &Term::iri(other)).any(|x| &x == b) {
        out.err(ReasoningError::Inconsistency(format!(
            "{a} is asserted both owl:sameAs and owl:differentFrom {b}"
        )));
    }
}

fn prp_dom(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p, c) = (t.subject.clone(), t.object.clone());
    // prp-dom: instance-level consequence.
    for (s, _o) in graph.subject_objects(&p) {
        out.push(mk(s, rdf::TYPE, c.clone()));
    }
    // scm-dom1: the domain widens along a subClassOf chain.
    for c2 in graph.objects(&c, &Term::iri(rdfs::SUB_CLASS_OF)) {
        out.push(mk(p.clone(), rdfs::DOMAIN, c2));
    }
    // scm-dom2: every subPropertyOf p inherits p's domain.
    for p2 in graph.subjects(&Term::iri(rdfs::SUB_PROPERTY_OF), &p) {
        out.push(mk(p2, rdfs::DOMAIN, c.clone()));
    }
}

fn prp_rng(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p, c) = (t.subject.clone(), t.object.clone());
    // prp-rng: instance-level consequence.
    for (_s, o) in graph.subject_objects(&p) {
        out.push(mk(o, rdf::TYPE, c.clone()));
    }
    // scm-rng1: the range widens along a subClassOf chain.
    for c2 in graph.objects(&c, &Term::iri(rdfs::SUB_CLASS_OF)) {
        out.push(mk(p.clone(), rdfs::RANGE, c2));
    }
    // scm-rng2: every subPropertyOf p inherits p's range.
    for p2 in graph.subjects(&Term::iri(rdfs::SUB_PROPERTY_OF), &p) {
        out.push(mk(p2, rdfs::RANGE, c.clone()));
    }
}

fn prp_spo1(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p, q) = (t.subject.clone(), t.object.clone());
    for (s, o) in graph.subject_objects(&p) {
        out.push(Triple::new_unchecked(s, q.clone(), o));
    }
}

fn prp_eqp(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p1, p2) = (t.subject.clone(), t.object.clone());
    // prp-eqp1
    for (s, o) in graph.subject_objects(&p1) {
        out.push(Triple::new_unchecked(s, p2.clone(), o));
    }
    // prp-eqp2
    for (s, o) in graph.subject_objects(&p2) {
        out.push(Triple::new_unchecked(s, p1.clone(), o));
    }
    // scm-eqp2: equivalence implies mutual subPropertyOf.
    out.push(mk(p1.clone(), rdfs::SUB_PROPERTY_OF, p2.clone()));
    out.push(mk(p2, rdfs::SUB_PROPERTY_OF, p1));
}

fn prp_inv(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p1, p2) = (t.subject.clone(), t.object.clone());
    // prp-inv1
    for (x, y) in graph.subject_objects(&p1) {
        out.push(Triple::new_unchecked(y, p2.clone(), x));
    }
    // prp-inv2
    for (x, y) in graph.subject_objects(&p2) {
        out.push(Triple::new_unchecked(y, p1.clone(), x));
    }
}

fn prp_pdw(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (p1, p2) = (t.subject.clone(), t.object.clone());
    for (x, y) in graph.subject_objects(&p1) {
        if graph.objects(&x, &p2).any(|v| v == y) {
            out.err(ReasoningError::Inconsistency(format!(
                "{p1} and {p2} are disjoint but both relate {x} to {y}"
            )));
        }
    }
}

fn type_triggered(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let Some(class) = t.object.as_iri() else { return };
    let subject = t.subject.clone();

    match class {
        c if c == owl::FUNCTIONAL_PROPERTY => prp_fp(graph, &subject, out),
        c if c == owl::INVERSE_FUNCTIONAL_PROPERTY => prp_ifp(graph, &subject, out),
        c if c == owl::SYMMETRIC_PROPERTY => prp_symp(graph, &subject, out),
        c if c == owl::ASYMMETRIC_PROPERTY => prp_asyp(graph, &subject, out),
        c if c == owl::TRANSITIVE_PROPERTY => prp_trp(graph, &subject, out),
        c if c == owl::IRREFLEXIVE_PROPERTY => prp_irp(graph, &subject, out),
        c if c == owl::NOTHING => out.err(ReasoningError::NothingTyping(subject.to_string())),
        c if c == owl::CLASS => scm_cls(&subject, out),
        c if c == owl::OBJECT_PROPERTY || c == owl::DATATYPE_PROPERTY => {
            out.push(mk(subject.clone(), rdfs::SUB_PROPERTY_OF, subject.clone()));
            out.push(mk(subject.clone(), owl::EQUIVALENT_PROPERTY, subject));
        }
        _ => {}
    }
}

fn prp_fp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    let mut by_subject: ahash::AHashMap<Term, Vec<Term>> = ahash::AHashMap::new();
    for (s, o) in graph.subject_objects(p) {
        by_subject.entry(s).or_default().push(o);
    }
    for values in by_subject.values() {
        for i in 1..values.len() {
            out.push(same_as(values[0].clone(), values[i].clone()));
        }
    }
}

fn prp_ifp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    let mut by_object: ahash::AHashMap<Term, Vec<Term>> = ahash::AHashMap::new();
    for (s, o) in graph.subject_objects(p) {
        by_object.entry(o).or_default().push(s);
    }
    for subjects in by_object.values() {
        for i in 1..subjects.len() {
            out.push(same_as(subjects[0].clone(), subjects[i].clone()));
        }
    }
}

fn prp_symp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    for (s, o) in graph.subject_objects(p) {
        out.push(Triple::new_unchecked(o, p.clone(), s));
    }
}

fn prp_asyp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    for (s, o) in graph.subject_objects(p) {
        if graph.objects(&o, p).any(|v| v == s) {
            out.err(ReasoningError::Inconsistency(format!(
                "{p} is asymmetric but relates both {s} to {o} and back"
            )));
        }
    }
}

fn prp_trp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    let pairs: Vec<(Term, Term)> = graph.subject_objects(p).collect();
    for (s, o) in &pairs {
        for o2 in graph.objects(o, p) {
            out.push(Triple::new_unchecked(s.clone(), p.clone(), o2));
        }
    }
}

fn prp_irp(graph: &Graph, p: &Term, out: &mut RuleOutput) {
    for (s, o) in graph.subject_objects(p) {
        if s == o {
            out.err(ReasoningError::Inconsistency(format!("{p} is irreflexive but relates {s} to itself")));
        }
    }
}

fn scm_cls(c: &Term, out: &mut RuleOutput) {
    out.push(mk(c.clone(), rdfs::SUB_CLASS_OF, c.clone()));
    out.push(mk(c.clone(), owl::EQUIVALENT_CLASS, c.clone()));
    out.push(mk(c.clone(), rdfs::SUB_CLASS_OF, Term::iri(owl::THING)));
    out.push(mk(Term::iri(owl::NOTHING), rdfs::SUB_CLASS_OF, c.clone()));
}

fn restriction_property(graph: &Graph, restriction: &Term) -> Option<Term> {
    graph.objects(restriction, &Term::iri(owl::ON_PROPERTY)).next()
}

fn cls_svf(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (r, filler) = (t.subject.clone(), t.object.clone());
    let Some(p) = restriction_property(graph, &r) else { return };
    let is_thing = filler.as_iri() == Some(owl::THING);
    for (u, v) in graph.subject_objects(&p) {
        let admitted = is_thing || graph.objects(&v, &Term::iri(rdf::TYPE)).any(|ty| ty == filler);
        if admitted {
            out.push(mk(u, rdf::TYPE, r.clone()));
        }
    }
}

fn cls_avf(
    graph: &Graph,
    t: &Triple,
    proxies: &crate::proxy::ProxyTable,
    restricted: &[RestrictedDatatype],
    out: &mut RuleOutput,
) {
    let (r, filler) = (t.subject.clone(), t.object.clone());
    let Some(filler_iri) = filler.as_iri() else { return };
    let Some(p) = restriction_property(graph, &r) else { return };
    for u in graph.subjects(&Term::iri(rdf::TYPE), &r) {
        for v in graph.objects(&u, &p) {
            if let Some(lit) = proxies.literal_for(&v) {
                if let Err(e) = combined::restriction_typing_check(&lit.lexical, filler_iri, restricted) {
                    out.err(e);
                    continue;
                }
            }
            out.push(mk(v, rdf::TYPE, filler.clone()));
        }
    }
}

fn cls_hv(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (r, v) = (t.subject.clone(), t.object.clone());
    let Some(p) = restriction_property(graph, &r) else { return };
    // cls-hv1: (u type r) -> (u p v)
    for u in graph.subjects(&Term::iri(rdf::TYPE), &r) {
        out.push(Triple::new_unchecked(u, p.clone(), v.clone()));
    }
    // cls-hv2: (u p v) -> (u type r)
    for u in graph.subjects(&p, &v) {
        out.push(mk(u, rdf::TYPE, r.clone()));
    }
}

fn cls_maxc(graph: &Graph, t: &Triple, proxies: &crate::proxy::ProxyTable, out: &mut RuleOutput) {
    let (r, bound_lit) = (t.subject.clone(), t.object.clone());
    let Some(bound) = cardinality_bound(&bound_lit, proxies) else { return };
    let Some(p) = restriction_property(graph, &r) else { return };
    for u in graph.subjects(&Term::iri(rdf::TYPE), &r) {
        let values: Vec<Term> = graph.objects(&u, &p).collect();
        apply_cardinality_bound(&u, &values, bound, out);
    }
}

fn cls_maxqc(graph: &Graph, t: &Triple, proxies: &crate::proxy::ProxyTable, out: &mut RuleOutput) {
    let (r, bound_lit) = (t.subject.clone(), t.object.clone());
    let Some(bound) = cardinality_bound(&bound_lit, proxies) else { return };
    let Some(p) = restriction_property(graph, &r) else { return };
    let on_class = graph.objects(&r, &Term::iri(owl::ON_CLASS)).next();
    for u in graph.subjects(&Term::iri(rdf::TYPE), &r) {
        let values: Vec<Term> = graph
            .objects(&u, &p)
            .filter(|v| match &on_class {
                Some(c) if c.as_iri() != Some(owl::THING) => {
                    graph.objects(v, &Term::iri(rdf::TYPE)).any(|ty| &ty == c)
                }
                _ => true,
            })
            .collect();
        apply_cardinality_bound(&u, &values, bound, out);
    }
}

/// The cardinality bound literal has already been replaced by a blank-node
/// proxy by the time per-cycle rules see it (literal-proxy install runs
/// before the fixed-point loop starts), so the numeric value must be
/// resolved back through the proxy table rather than read off the term
/// directly.
fn cardinality_bound(term: &Term, proxies: &crate::proxy::ProxyTable) -> Option<u64> {
    if let Some(lit) = term.as_literal() {
        return lit.lexical.parse().ok();
    }
    proxies.literal_for(term).and_then(|l| l.lexical.parse().ok())
}

fn apply_cardinality_bound(u: &Term, values: &[Term], bound: u64, out: &mut RuleOutput) {
    if bound == 0 {
        if let Some(first) = values.first() {
            out.err(ReasoningError::RestrictionViolation(format!(
                "{u} has a maxCardinality of 0 but is related to {first}"
            )));
        }
    } else if bound == 1 && values.len() > 1 {
        for i in 1..values.len() {
            out.push(same_as(values[0].clone(), values[i].clone()));
        }
    }
}

fn cls_int(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let c = t.subject.clone();
    let conjuncts = lists::items(graph, &t.object);
    if conjuncts.is_empty() {
        return;
    }
    let type_p = Term::iri(rdf::TYPE);
    // cls-int2: (x type c) -> (x type ci) for each conjunct.
    for x in graph.subjects(&type_p, &c) {
        for ci in &conjuncts {
            out.push(mk(x.clone(), rdf::TYPE, ci.clone()));
        }
    }
    // cls-int1: x typed every conjunct -> (x type c).
    if let Some(first) = conjuncts.first() {
        'candidates: for x in graph.subjects(&type_p, first) {
            for ci in &conjuncts[1..] {
                if !graph.objects(&x, &type_p).any(|ty| &ty == ci) {
                    continue 'candidates;
                }
            }
            out.push(mk(x, rdf::TYPE, c.clone()));
        }
    }
}

fn cls_uni(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let c = t.subject.clone();
    let disjuncts = lists::items(graph, &t.object);
    let type_p = Term::iri(rdf::TYPE);
    for ci in &disjuncts {
        for x in graph.subjects(&type_p, ci) {
            out.push(mk(x, rdf::TYPE, c.clone()));
        }
    }
}

fn cls_com(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (c1, c2) = (t.subject.clone(), t.object.clone());
    let type_p = Term::iri(rdf::TYPE);
    for x in graph.subjects(&type_p, &c1) {
        if graph.objects(&x, &type_p).any(|ty| ty == c2) {
            out.err(ReasoningError::Inconsistency(format!(
                "{x} is typed both {c1} and its complement {c2}"
            )));
        }
    }
}

fn cls_oo(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let c = t.subject.clone();
    for member in lists::items(graph, &t.object) {
        out.push(mk(member, rdf::TYPE, c.clone()));
    }
}

fn cax_dw(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (c1, c2) = (t.subject.clone(), t.object.clone());
    let type_p = Term::iri(rdf::TYPE);
    for x in graph.subjects(&type_p, &c1) {
        if graph.objects(&x, &type_p).any(|ty| ty == c2) {
            out.err(ReasoningError::Inconsistency(format!(
                "{x} is typed both {c1} and disjoint class {c2}"
            )));
        }
    }
}

fn cax_eqc(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (c1, c2) = (t.subject.clone(), t.object.clone());
    let type_p = Term::iri(rdf::TYPE);
    for x in graph.subjects(&type_p, &c1) {
        out.push(mk(x, rdf::TYPE, c2.clone()));
    }
    for x in graph.subjects(&type_p, &c2) {
        out.push(mk(x, rdf::TYPE, c1.clone()));
    }
    // scm-eqc2
    out.push(mk(c1.clone(), rdfs::SUB_CLASS_OF, c2.clone()));
    out.push(mk(c2, rdfs::SUB_CLASS_OF, c1));
}

fn cax_and_scm_sco(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let (c1, c2) = (t.subject.clone(), t.object.clone());
    let type_p = Term::iri(rdf::TYPE);
    // cax-sco
    for x in graph.subjects(&type_p, &c1) {
        out.push(mk(x, rdf::TYPE, c2.clone()));
    }
    // scm-sco: transitivity.
    let sub_class_of = Term::iri(rdfs::SUB_CLASS_OF);
    for c3 in graph.objects(&c2, &sub_class_of) {
        out.push(mk(c1.clone(), rdfs::SUB_CLASS_OF, c3));
    }
    // scm-eqc1: mutual subclassing implies equivalence.
    if graph.objects(&c2, &sub_class_of).any(|v| v == c1) {
        out.push(mk(c1, owl::EQUIVALENT_CLASS, c2));
    }
}

fn prp_spo2(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let p = t.subject.clone();
    let chain = lists::items(graph, &t.object);
    if chain.is_empty() {
        return;
    }
    let Some(first) = chain.first() else { return };
    for (x, via) in graph.subject_objects(first) {
        if let Some(end) = walk_chain(graph, &via, &chain[1..]) {
            out.push(Triple::new_unchecked(x, p.clone(), end));
        }
    }
}

fn walk_chain(graph: &Graph, start: &Term, rest: &[Term]) -> Option<Term> {
    let Some((head, tail)) = rest.split_first() else {
        return Some(start.clone());
    };
    graph.objects(start, head).find_map(|next| walk_chain(graph, &next, tail))
}

fn prp_key(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let c = t.subject.clone();
    let key_props = lists::items(graph, &t.object);
    if key_props.is_empty() {
        return;
    }
    let type_p = Term::iri(rdf::TYPE);
    let individuals: Vec<Term> = graph.subjects(&type_p, &c).collect();
    for i in 0..individuals.len() {
        for j in (i + 1)..individuals.len() {
            let (x, y) = (&individuals[i], &individuals[j]);
            let matches = key_props.iter().all(|p| {
                let xs: ahash::AHashSet<Term> = graph.objects(x, p).collect();
                let ys: ahash::AHashSet<Term> = graph.objects(y, p).collect();
                !xs.is_empty() && xs == ys
            });
            if matches {
                out.push(same_as(x.clone(), y.clone()));
            }
        }
    }
}

fn all_different_or_disjoint(graph: &Graph, t: &Triple, out: &mut RuleOutput) {
    let subject = t.subject.clone();
    let members = lists::items(graph, &t.object);
    let type_p = Term::iri(rdf::TYPE);
    let types: Vec<Term> = graph.objects(&subject, &type_p).collect();

    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let (a, b) = (&members[i], &members[j]);
            if types.iter().any(|ty| ty.as_iri() == Some(owl::ALL_DIFFERENT)) {
                out.push(different_from(a.clone(), b.clone()));
                check_diff(graph, a, b, owl::SAME_AS, out);
            }
            if types.iter().any(|ty| ty.as_iri() == Some(owl::ALL_DISJOINT_CLASSES)) {
                let type_p2 = Term::iri(rdf::TYPE);
                for x in graph.subjects(&type_p2, a) {
                    if graph.objects(&x, &type_p2).any(|ty| &ty == b) {
                        out.err(ReasoningError::Inconsistency(format!(
                            "{x} is typed both {a} and {b}, which are pairwise disjoint"
                        )));
                    }
                }
            }
            if types.iter().any(|ty| ty.as_iri() == Some(owl::ALL_DISJOINT_PROPERTIES)) {
                for (x, y) in graph.subject_objects(a) {
                    if graph.objects(&x, b).any(|v| v == y) {
                        out.err(ReasoningError::Inconsistency(format!(
                            "{a} and {b} are pairwise disjoint but both relate {x} to {y}"
                        )));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyTable;
    use rdf_model::Literal;

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    #[test]
    fn eq_ref_fires_for_every_triple() {
        let graph = Graph::new();
        let t = Triple::new_unchecked(iri("http://e/a"), iri("http://e/p"), iri("http://e/b"));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert!(out.triples.contains(&same_as(iri("http://e/a"), iri("http://e/a"))));
    }

    #[test]
    fn prp_fp_merges_functional_values() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new_unchecked(iri("http://e/a"), iri("http://e/hasAge"), iri("http://e/20")));
        graph.insert(&Triple::new_unchecked(iri("http://e/a"), iri("http://e/hasAge"), iri("http://e/twenty")));
        let t = Triple::new_unchecked(iri("http://e/hasAge"), iri(rdf::TYPE), iri(owl::FUNCTIONAL_PROPERTY));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert!(out.triples.contains(&same_as(iri("http://e/20"), iri("http://e/twenty"))));
    }

    #[test]
    fn prp_trp_composes_transitive_property() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new_unchecked(iri("http://e/a"), iri("http://e/ancestorOf"), iri("http://e/b")));
        graph.insert(&Triple::new_unchecked(iri("http://e/b"), iri("http://e/ancestorOf"), iri("http://e/c")));
        let t = Triple::new_unchecked(iri("http://e/ancestorOf"), iri(rdf::TYPE), iri(owl::TRANSITIVE_PROPERTY));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert!(out.triples.contains(&Triple::new_unchecked(iri("http://e/a"), iri("http://e/ancestorOf"), iri("http://e/c"))));
    }

    #[test]
    fn cls_maxc_zero_flags_violation() {
        let mut graph = Graph::new();
        let r = Term::blank(0);
        graph.insert(&Triple::new_unchecked(r.clone(), iri(owl::ON_PROPERTY), iri("http://e/p")));
        graph.insert(&Triple::new_unchecked(iri("http://e/x"), iri(rdf::TYPE), r.clone()));
        graph.insert(&Triple::new_unchecked(iri("http://e/x"), iri("http://e/p"), iri("http://e/y")));
        let t = Triple::new_unchecked(r, iri(owl::MAX_CARDINALITY), Term::literal(Literal::typed("0", rdf_model::vocab::xsd::NON_NEGATIVE_INTEGER)));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn cax_dw_flags_disjoint_typing() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new_unchecked(iri("http://e/x"), iri(rdf::TYPE), iri("http://e/Cat")));
        graph.insert(&Triple::new_unchecked(iri("http://e/x"), iri(rdf::TYPE), iri("http://e/Dog")));
        let t = Triple::new_unchecked(iri("http://e/Cat"), iri(owl::DISJOINT_WITH), iri("http://e/Dog"));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn datatype_one_time_rules_type_proxies_and_ancestors() {
        use crate::proxy::ProxyTable;

        let mut graph = Graph::new();
        graph.insert(
            &Triple::try_new(
                iri("http://e/a"),
                iri("http://e/age"),
                Term::literal(Literal::typed("20", rdf_model::vocab::xsd::INT)),
            )
            .unwrap(),
        );
        let mut proxies = ProxyTable::new();
        proxies.install(&mut graph);

        let out = datatype_one_time_rules(&graph, &proxies);
        let bnode = proxies.iter().next().unwrap().0.clone();
        assert!(out.contains(&mk(bnode.clone(), rdf::TYPE, iri(rdf_model::vocab::xsd::INT))));
        assert!(out.contains(&mk(bnode, rdf::TYPE, iri(rdf_model::vocab::xsd::LONG))));
    }

    #[test]
    fn one_time_rules_type_the_built_in_annotation_properties() {
        let triples = one_time_rules();
        assert!(triples.contains(&mk(iri(rdfs::LABEL), rdf::TYPE, iri(owl::ANNOTATION_PROPERTY))));
        assert!(triples.contains(&mk(iri(owl::DEPRECATED), rdf::TYPE, iri(owl::ANNOTATION_PROPERTY))));
    }

    #[test]
    fn negative_property_assertion_flags_a_contradicted_relation() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new_unchecked(iri("http://e/alice"), iri("http://e/knows"), iri("http://e/bob")));
        let npa = Term::blank(0);
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::SOURCE_INDIVIDUAL), iri("http://e/alice")));
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::ASSERTION_PROPERTY), iri("http://e/knows")));
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::TARGET_INDIVIDUAL), iri("http://e/bob")));

        let t = Triple::new_unchecked(npa, iri(owl::TARGET_INDIVIDUAL), iri("http://e/bob"));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn negative_property_assertion_is_silent_when_the_relation_does_not_hold() {
        let mut graph = Graph::new();
        let npa = Term::blank(1);
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::SOURCE_INDIVIDUAL), iri("http://e/alice")));
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::ASSERTION_PROPERTY), iri("http://e/knows")));
        graph.insert(&Triple::new_unchecked(npa.clone(), iri(owl::TARGET_INDIVIDUAL), iri("http://e/bob")));

        let t = Triple::new_unchecked(npa, iri(owl::TARGET_INDIVIDUAL), iri("http://e/bob"));
        let out = apply(&graph, &t, &ProxyTable::new(), &[]);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn cls_avf_rejects_a_value_outside_the_restricted_datatype_facets() {
        use crate::restricted::Facet;

        let mut graph = Graph::new();
        let r = Term::blank(2);
        graph.insert(&Triple::new_unchecked(r.clone(), iri(owl::ON_PROPERTY), iri("http://e/roll")));
        graph.insert(&Triple::new_unchecked(iri("http://e/die"), iri(rdf::TYPE), r.clone()));
        graph.insert(
            &Triple::try_new(
                iri("http://e/die"),
                iri("http://e/roll"),
                Term::literal(Literal::typed("7", rdf_model::vocab::xsd::INTEGER)),
            )
            .unwrap(),
        );
        let mut proxies = ProxyTable::new();
        proxies.install(&mut graph);

        let restricted = vec![RestrictedDatatype {
            iri: "http://e/OneToSix".into(),
            base_iri: rdf_model::vocab::xsd::INTEGER.into(),
            facets: vec![Facet::MinInclusive(1.0), Facet::MaxInclusive(6.0)],
        }];
        let t = Triple::new_unchecked(r, iri(owl::ALL_VALUES_FROM), iri("http://e/OneToSix"));
        let out = apply(&graph, &t, &proxies, &restricted);
        assert!(out.errors.iter().any(|e| matches!(e, ReasoningError::RestrictionViolation(_))));
        let bnode = proxies.iter().next().unwrap().0.clone();
        assert!(!out.triples.contains(&mk(bnode, rdf::TYPE, iri("http://e/OneToSix"))));
    }

    #[test]
    fn scm_dom_and_rng_propagate_through_subclass_and_subproperty_chains() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new_unchecked(iri("http://e/Mammal"), iri(rdfs::SUB_CLASS_OF), iri("http://e/Animal")));
        graph.insert(&Triple::new_unchecked(iri("http://e/hasPet"), iri(rdfs::SUB_PROPERTY_OF), iri("http://e/relatesTo")));

        let domain = Triple::new_unchecked(iri("http://e/relatesTo"), iri(rdfs::DOMAIN), iri("http://e/Mammal"));
        let out = apply(&graph, &domain, &ProxyTable::new(), &[]);
        assert!(out.triples.contains(&mk(iri("http://e/relatesTo"), rdfs::DOMAIN, iri("http://e/Animal"))));
        assert!(out.triples.contains(&mk(iri("http://e/hasPet"), rdfs::DOMAIN, iri("http://e/Mammal"))));

        let range = Triple::new_unchecked(iri("http://e/relatesTo"), iri(rdfs::RANGE), iri("http://e/Mammal"));
        let out = apply(&graph, &range, &ProxyTable::new(), &[]);
        assert!(out.triples.contains(&mk(iri("http://e/relatesTo"), rdfs::RANGE, iri("http://e/Animal"))));
        assert!(out.triples.contains(&mk(iri("http://e/hasPet"), rdfs::RANGE, iri("http://e/Mammal"))));
    }
}
