//! End-to-end scenarios driven through [`Closure::close`], each grounded on
//! a named rule and exercised the way a real input graph would trigger it,
//! plus the handful of properties that must hold of every closure regardless
//! of which scenario produced it.

use rdf_model::vocab::{owl, rdf, rdfs, xsd};
use rdf_model::{Literal, Term, Triple};
use reasoning::{Closure, ClosureOptions, ReasoningError, Regime};
use storage::{Graph, TriplePattern};

fn iri(s: &str) -> Term {
    Term::iri(s)
}

fn t(s: Term, p: &str, o: Term) -> Triple {
    Triple::new_unchecked(s, Term::iri(p), o)
}

fn list(graph: &mut Graph, items: &[Term]) -> Term {
    let nil = iri(rdf::NIL);
    let mut tail = nil;
    for (i, item) in items.iter().enumerate().rev() {
        let node = Term::blank(900 + i as u64);
        graph.insert(&t(node.clone(), rdf::FIRST, item.clone()));
        graph.insert(&t(node.clone(), rdf::REST, tail));
        tail = node;
    }
    tail
}

// S1 (cax-dw): two disjoint classes sharing an individual is an inconsistency.
#[test]
fn disjoint_classes_with_a_common_individual_is_an_inconsistency() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/Cat"), owl::DISJOINT_WITH, iri("http://t/Dog")));
    graph.insert(&t(iri("http://t/x"), rdf::TYPE, iri("http://t/Cat")));
    graph.insert(&t(iri("http://t/x"), rdf::TYPE, iri("http://t/Dog")));

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.errors.iter().any(|e| matches!(
        e,
        ReasoningError::Inconsistency(msg) if msg.contains("http://t/Cat") && msg.contains("http://t/Dog")
    )));
}

// S2 (cls-maxc2): a functional-in-effect restriction merges two values via
// owl:sameAs when the bound is exceeded by exactly one.
#[test]
fn max_cardinality_one_merges_excess_values_via_same_as() {
    let mut graph = Graph::new();
    let r = Term::blank(1);
    graph.insert(&t(r.clone(), owl::ON_PROPERTY, iri("http://t/p")));
    graph.insert(&t(r.clone(), owl::MAX_CARDINALITY, Term::literal(Literal::typed("1", xsd::NON_NEGATIVE_INTEGER))));
    graph.insert(&t(iri("http://t/u"), rdf::TYPE, r));
    graph.insert(&t(iri("http://t/u"), "http://t/p", iri("http://t/y1")));
    graph.insert(&t(iri("http://t/u"), "http://t/p", iri("http://t/y2")));

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    let merged = report.graph.contains(&t(iri("http://t/y1"), owl::SAME_AS, iri("http://t/y2")))
        || report.graph.contains(&t(iri("http://t/y2"), owl::SAME_AS, iri("http://t/y1")));
    assert!(merged, "expected y1 and y2 to be merged via owl:sameAs");
}

// S3 (cls-maxqc1): a qualified zero-bound restriction flags any relation to
// a member of the target class as a restriction violation.
#[test]
fn max_qualified_cardinality_zero_flags_a_violation() {
    let mut graph = Graph::new();
    let r = Term::blank(2);
    graph.insert(&t(r.clone(), owl::ON_PROPERTY, iri("http://t/p")));
    graph.insert(&t(r.clone(), owl::ON_CLASS, iri("http://t/C")));
    graph.insert(&t(r.clone(), owl::MAX_QUALIFIED_CARDINALITY, Term::literal(Literal::typed("0", xsd::NON_NEGATIVE_INTEGER))));
    graph.insert(&t(iri("http://t/u"), rdf::TYPE, r));
    graph.insert(&t(iri("http://t/u"), "http://t/p", iri("http://t/y")));
    graph.insert(&t(iri("http://t/y"), rdf::TYPE, iri("http://t/C")));

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.errors.iter().any(|e| matches!(e, ReasoningError::RestrictionViolation(_))));
}

// S4 (eq-diff1): asserting both sameAs and differentFrom on the same pair is
// a contradiction.
#[test]
fn same_as_and_different_from_on_the_same_pair_is_a_contradiction() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/x"), owl::SAME_AS, iri("http://t/y")));
    graph.insert(&t(iri("http://t/x"), owl::DIFFERENT_FROM, iri("http://t/y")));

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.errors.iter().any(|e| matches!(
        e,
        ReasoningError::Inconsistency(msg) if msg.contains("sameAs") && msg.contains("differentFrom")
    )));
}

// S7 (prp-spo2): a two-hop property chain propagates through the fixed
// point, matching a small "grandparent" family tree.
#[test]
fn property_chain_propagates_has_grandparent_through_two_hops() {
    let mut graph = Graph::new();
    let chain = list(&mut graph, &[iri("http://t/hasParent"), iri("http://t/hasParent")]);
    graph.insert(&t(iri("http://t/hasGrandparent"), owl::PROPERTY_CHAIN_AXIOM, chain));

    let pairs = [
        ("http://t/alice", "http://t/bob"),
        ("http://t/bob", "http://t/carol"),
        ("http://t/dave", "http://t/erin"),
        ("http://t/erin", "http://t/carol"),
    ];
    for (child, parent) in pairs {
        graph.insert(&t(iri(child), "http://t/hasParent", iri(parent)));
    }

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.graph.contains(&t(iri("http://t/alice"), "http://t/hasGrandparent", iri("http://t/carol"))));
    assert!(report.graph.contains(&t(iri("http://t/dave"), "http://t/hasGrandparent", iri("http://t/carol"))));
}

// Universal invariant 1: closure only ever adds triples.
#[test]
fn closure_is_monotonic() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/alice"), "http://t/knows", iri("http://t/bob")));
    graph.insert(&t(iri("http://t/knows"), rdfs::DOMAIN, iri("http://t/Person")));
    let original: Vec<Triple> = graph.triples(&TriplePattern::all());

    let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(graph).unwrap();
    for triple in &original {
        assert!(report.graph.contains(triple), "monotonicity violated for {triple:?}");
    }
}

// Universal invariant 2: closing an already-closed graph changes nothing.
#[test]
fn closure_is_idempotent() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/Student"), rdfs::SUB_CLASS_OF, iri("http://t/Person")));
    graph.insert(&t(iri("http://t/alice"), rdf::TYPE, iri("http://t/Student")));

    let options = || ClosureOptions::new(Regime::Rdfs);
    let once = Closure::new(options()).close(graph).unwrap();

    let once_triples: std::collections::BTreeSet<String> =
        once.graph.triples(&TriplePattern::all()).iter().map(|tr| tr.to_string()).collect();

    let mut rebuilt = Graph::new();
    for tr in once.graph.triples(&TriplePattern::all()) {
        rebuilt.insert(&tr);
    }
    let twice = Closure::new(options()).close(rebuilt).unwrap();
    let twice_triples: std::collections::BTreeSet<String> =
        twice.graph.triples(&TriplePattern::all()).iter().map(|tr| tr.to_string()).collect();
    assert_eq!(once_triples, twice_triples);
}

// Universal invariant 3: a lexically valid literal survives proxy install
// and restore unchanged in value (xsd:string normalises to plain form).
#[test]
fn literals_round_trip_through_the_proxy_layer() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/alice"), "http://t/age", Term::literal(Literal::typed("30", xsd::INTEGER))));

    let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(graph).unwrap();
    let age = report.graph.objects(&iri("http://t/alice"), &iri("http://t/age")).next().unwrap();
    let lit = age.as_literal().unwrap();
    assert_eq!(lit.lexical.as_ref(), "30");
    assert_eq!(lit.datatype.as_deref(), Some(xsd::INTEGER));
}

// Universal invariant 4: datatype subsumption is sound — a value typed with
// a narrower datatype is also typed with every wider one.
#[test]
fn datatype_subsumption_is_sound() {
    use reasoning::owl2rl::datatype_one_time_rules;
    use reasoning::proxy::ProxyTable;

    let mut graph = Graph::new();
    graph.insert(&Triple::try_new(iri("http://t/a"), iri("http://t/code"), Term::literal(Literal::typed("7", xsd::INT))).unwrap());
    let mut proxies = ProxyTable::new();
    proxies.install(&mut graph);

    let out = datatype_one_time_rules(&graph, &proxies);
    let (bnode, _) = proxies.iter().find(|(_, l)| l.lexical.as_ref() == "7").unwrap();
    assert!(out.contains(&t(bnode.clone(), rdf::TYPE, iri(xsd::INT))));
    for wider in reasoning::datatypes::supertypes(xsd::INT) {
        assert!(out.contains(&t(bnode.clone(), rdf::TYPE, iri(*wider))), "missing ancestor typing {wider}");
    }
}

// Universal invariant 5: a property chain declaration generalises beyond a
// single input pair — every matching two-hop path is propagated, not just
// the first one the fixed point happens to visit.
#[test]
fn property_chain_rule_fires_for_every_matching_path() {
    let mut graph = Graph::new();
    let chain = list(&mut graph, &[iri("http://t/hasParent"), iri("http://t/hasParent")]);
    graph.insert(&t(iri("http://t/hasGrandparent"), owl::PROPERTY_CHAIN_AXIOM, chain));
    for (child, parent) in [
        ("http://t/p1", "http://t/p2"),
        ("http://t/p2", "http://t/p3"),
        ("http://t/q1", "http://t/q2"),
        ("http://t/q2", "http://t/q3"),
    ] {
        graph.insert(&t(iri(child), "http://t/hasParent", iri(parent)));
    }

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.graph.contains(&t(iri("http://t/p1"), "http://t/hasGrandparent", iri("http://t/p3"))));
    assert!(report.graph.contains(&t(iri("http://t/q1"), "http://t/hasGrandparent", iri("http://t/q3"))));
}

// Universal invariant 6: owl:sameAs is an equivalence relation in the
// output — reflexive, symmetric, transitive.
#[test]
fn same_as_is_an_equivalence_relation_in_the_output() {
    let mut graph = Graph::new();
    graph.insert(&t(iri("http://t/a"), owl::SAME_AS, iri("http://t/b")));
    graph.insert(&t(iri("http://t/b"), owl::SAME_AS, iri("http://t/c")));

    let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
    assert!(report.graph.contains(&t(iri("http://t/a"), owl::SAME_AS, iri("http://t/a"))));
    assert!(report.graph.contains(&t(iri("http://t/b"), owl::SAME_AS, iri("http://t/a"))));
    assert!(report.graph.contains(&t(iri("http://t/a"), owl::SAME_AS, iri("http://t/c"))));
    assert!(report.graph.contains(&t(iri("http://t/c"), owl::SAME_AS, iri("http://t/a"))));
}

// Property-based tests over small random graphs, for the universal
// invariants a hand-written example can only sample (SPEC_FULL.md §8 items
// 1, 2, 6).
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const NODES: [&str; 5] = ["http://t/n0", "http://t/n1", "http://t/n2", "http://t/n3", "http://t/n4"];

    fn node_index() -> impl Strategy<Value = usize> {
        0..NODES.len()
    }

    fn random_graph(edges: &[(usize, usize)]) -> Graph {
        let mut graph = Graph::new();
        for (s, o) in edges {
            graph.insert(&t(iri(NODES[*s]), "http://t/knows", iri(NODES[*o])));
        }
        graph
    }

    proptest! {
        #[test]
        fn closure_is_monotonic_over_random_graphs(
            edges in prop::collection::vec((node_index(), node_index()), 0..15)
        ) {
            let graph = random_graph(&edges);
            let original: Vec<Triple> = graph.triples(&TriplePattern::all());

            let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
            for triple in &original {
                prop_assert!(report.graph.contains(triple));
            }
        }

        #[test]
        fn closure_is_idempotent_over_random_graphs(
            edges in prop::collection::vec((node_index(), node_index()), 0..15)
        ) {
            let graph = random_graph(&edges);
            let once = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();

            let once_triples: std::collections::BTreeSet<String> =
                once.graph.triples(&TriplePattern::all()).iter().map(|tr| tr.to_string()).collect();

            let mut rebuilt = Graph::new();
            for tr in once.graph.triples(&TriplePattern::all()) {
                rebuilt.insert(&tr);
            }
            let twice = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(rebuilt).unwrap();
            let twice_triples: std::collections::BTreeSet<String> =
                twice.graph.triples(&TriplePattern::all()).iter().map(|tr| tr.to_string()).collect();

            prop_assert_eq!(once_triples, twice_triples);
        }

        #[test]
        fn same_as_chains_are_always_closed_into_an_equivalence_relation(
            chain in prop::collection::vec(node_index(), 2..6)
        ) {
            let mut graph = Graph::new();
            for i in 0..chain.len() - 1 {
                graph.insert(&t(iri(NODES[chain[i]]), owl::SAME_AS, iri(NODES[chain[i + 1]])));
            }

            let report = Closure::new(ClosureOptions::new(Regime::Owl2Rl)).close(graph).unwrap();
            let involved: std::collections::BTreeSet<usize> = chain.iter().copied().collect();
            for &a in &involved {
                prop_assert!(report.graph.contains(&t(iri(NODES[a]), owl::SAME_AS, iri(NODES[a]))));
                for &b in &involved {
                    prop_assert!(report.graph.contains(&t(iri(NODES[a]), owl::SAME_AS, iri(NODES[b]))));
                }
            }
        }
    }
}
