//! The fixed-point closure driver (component C6): one-time axiom loading,
//! literal-proxy install/restore, and the per-cycle snapshot-then-flush
//! loop that drives every regime to a fixed point.
//!
//! The snapshot-then-flush discipline is grounded on the original engine's
//! `Core.closure()`: each cycle reads every triple currently in the store,
//! computes every rule's consequences against that unchanging snapshot, and
//! only applies them to the store once the whole cycle has been scanned —
//! never reading a triple a rule produced in the same cycle. A cycle that
//! adds nothing is the fixed point. The ambient configuration/error surface
//! (`ClosureOptions`, the cycle-limit guard) follows the shape of a
//! conventional `ReasonerConfig`/`ReasonerError` pair in this codebase's own
//! idiom rather than the Python driver's argument list.

use rdf_model::{Term, Triple};
use storage::{Graph, TriplePattern};
use tracing::debug;

use crate::proxy::ProxyTable;
use crate::restricted::{extract_restricted_datatypes, RestrictedDatatype};
use crate::{axioms, combined, owl2rl, rdfs, ClosureError, ClosureResult, ReasoningError};

/// Which entailment rules a [`Closure`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// The thirteen RDFS entailment rules only.
    Rdfs,
    /// The OWL 2 RL profile only (Tables 4/5/6/7/9), no RDFS rules.
    Owl2Rl,
    /// OWL 2 RL and RDFS together, OWL RL firing first per triple.
    Combined,
    /// [`Regime::Combined`] plus `owl:hasSelf`, `owl:rational`, and
    /// restricted (faceted) datatypes.
    Extension,
}

impl Regime {
    fn wants_rdfs_axioms(self) -> bool {
        matches!(self, Regime::Rdfs | Regime::Combined | Regime::Extension)
    }

    fn wants_owl_axioms(self) -> bool {
        matches!(self, Regime::Owl2Rl | Regime::Combined | Regime::Extension)
    }
}

/// Configuration for one closure run.
#[derive(Debug, Clone)]
pub struct ClosureOptions {
    regime: Regime,
    max_cycles: usize,
    materialize_errors: bool,
    axioms: bool,
    datatype_axioms: bool,
    trimming: bool,
}

impl ClosureOptions {
    /// Default options for `regime`: a generous cycle guard, errors logged
    /// but not materialised into the graph, no axiomatic-triple injection
    /// and no trimming (matching the CLI's un-flagged defaults).
    pub fn new(regime: Regime) -> Self {
        ClosureOptions {
            regime,
            max_cycles: 1_000,
            materialize_errors: false,
            axioms: false,
            datatype_axioms: false,
            trimming: false,
        }
    }

    /// `rdfs+owl_rl+extras+trimming+axioms+datatype_axioms`, matching the
    /// CLI's `--maximal`/`-m`.
    pub fn maximal() -> Self {
        ClosureOptions::new(Regime::Extension)
            .with_axioms(true)
            .with_datatype_axioms(true)
            .with_trimming(true)
    }

    /// Override the cycle-limit guard (SPEC_FULL.md's non-convergence
    /// safeguard). Exceeding it is a fatal [`ClosureError::CycleLimitExceeded`].
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Also materialise each [`ReasoningError`] as a triple in the closed
    /// graph (SPEC_FULL.md §7), rather than only returning them in the report.
    pub fn materialize_errors(mut self, materialize: bool) -> Self {
        self.materialize_errors = materialize;
        self
    }

    /// Insert the static RDFS/OWL-RL axiomatic triple tables (component C3)
    /// before the first cycle. Off by default: the fixed-point rules consult
    /// the axiom tables' *content* as needed without requiring them to be
    /// materialised in the graph, so this only controls whether that schema
    /// noise appears in the output.
    pub fn with_axioms(mut self, axioms: bool) -> Self {
        self.axioms = axioms;
        self
    }

    /// Also insert the datatype D-axioms (supertype-subsumption and
    /// disjointness triples for every XSD datatype used).
    pub fn with_datatype_axioms(mut self, datatype_axioms: bool) -> Self {
        self.datatype_axioms = datatype_axioms;
        self
    }

    /// Prune tautological and axiomatic-noise triples from the closed graph
    /// (the "trimming pass" of SPEC_FULL.md §4.1 step 5).
    pub fn with_trimming(mut self, trimming: bool) -> Self {
        self.trimming = trimming;
        self
    }
}

/// The result of a closure run.
#[derive(Debug)]
pub struct ClosureReport {
    /// The graph after closure, with literal proxies restored.
    pub graph: Graph,
    /// Every non-fatal reasoning error observed along the way.
    pub errors: Vec<ReasoningError>,
    /// How many cycles it took to reach the fixed point.
    pub cycles: usize,
}

/// Drives a [`Graph`] to its deductive closure under a [`Regime`].
pub struct Closure {
    options: ClosureOptions,
}

impl Closure {
    /// A closure driver configured by `options`.
    pub fn new(options: ClosureOptions) -> Self {
        Closure { options }
    }

    /// Compute the deductive closure of `graph`, consuming it and returning
    /// the closed graph plus a report of what was observed.
    pub fn close(&self, mut graph: Graph) -> ClosureResult<ClosureReport> {
        let mut errors = Vec::new();
        self.load_axioms(&mut graph);

        let restricted = if self.options.regime == Regime::Extension {
            extract_restricted_datatypes(&graph)
        } else {
            Vec::new()
        };
        if self.options.regime == Regime::Extension {
            for t in combined::subsume_restricted_datatypes(&restricted) {
                graph.insert(&t);
            }
        }

        let mut proxies = ProxyTable::new();
        errors.extend(proxies.install(&mut graph));
        errors.extend(self.check_restricted_literals(&proxies, &restricted));

        if self.options.regime.wants_owl_axioms() {
            for t in owl2rl::datatype_one_time_rules(&graph, &proxies) {
                graph.insert(&t);
            }
        }
        if self.options.regime == Regime::Extension {
            for t in combined::restricted_datatype_typings(&proxies, &restricted) {
                graph.insert(&t);
            }
        }

        let cycles = self.run_to_fixed_point(&mut graph, &mut errors, &proxies, &restricted)?;

        // One-time (RDFS) §4.5: proxies whose underlying literals are
        // datatype-value-equal are a hidden sameAs on literals — replicate
        // every triple across such a pair regardless of regime.
        for t in crate::proxy::value_equal_replication(&graph, &proxies) {
            graph.insert(&t);
        }

        proxies.restore(&mut graph);
        self.post_process(&mut graph);

        if self.options.materialize_errors {
            materialize(&mut graph, &errors);
        }

        Ok(ClosureReport { graph, errors, cycles })
    }

    fn load_axioms(&self, graph: &mut Graph) {
        // One-time *rules* (as opposed to the static axiom tables below) are
        // never optional: cls-thing/cls-nothing1 and the extension's
        // hasSelf/rational typing have no effect unless these run, so they
        // load regardless of `options.axioms`.
        if self.options.regime.wants_owl_axioms() {
            for t in owl2rl::one_time_rules() {
                graph.insert(&t);
            }
        }
        if self.options.regime == Regime::Extension {
            for t in combined::extension_one_time_rules() {
                graph.insert(&t);
            }
        }
        if matches!(self.options.regime, Regime::Combined | Regime::Extension) {
            for t in combined::combined_one_time_rules() {
                graph.insert(&t);
            }
        }

        if self.options.axioms {
            for t in axioms::rdf_axiomatic_triples() {
                graph.insert(&t);
            }
            if self.options.regime.wants_rdfs_axioms() {
                for t in axioms::rdfs_axiomatic_triples() {
                    graph.insert(&t);
                }
            }
            if self.options.regime.wants_owl_axioms() {
                for t in axioms::owl_axiomatic_triples() {
                    graph.insert(&t);
                }
            }
        }
        if self.options.datatype_axioms && self.options.regime.wants_rdfs_axioms() {
            for t in axioms::datatype_subclass_axioms() {
                graph.insert(&t);
            }
        }
    }

    /// Bnode-predicate cleanup (unconditional, for any OWL-RL-bearing
    /// regime: generalised-RDF artefacts never belong in the final output)
    /// plus the optional trimming pass that removes exactly the axiomatic
    /// triples this run injected and the handful of tautological
    /// self-relations every regime derives for every term.
    fn post_process(&self, graph: &mut Graph) {
        if self.options.regime.wants_owl_axioms() {
            let blank_predicate: Vec<Triple> = graph
                .triples(&TriplePattern::all())
                .into_iter()
                .filter(|t| t.predicate.is_blank())
                .collect();
            for t in &blank_predicate {
                graph.remove(t);
            }
        }

        if !self.options.trimming {
            return;
        }

        let mut noise: Vec<Triple> = Vec::new();
        if self.options.axioms {
            noise.extend(axioms::rdf_axiomatic_triples());
            if self.options.regime.wants_rdfs_axioms() {
                noise.extend(axioms::rdfs_axiomatic_triples());
            }
            if self.options.regime.wants_owl_axioms() {
                noise.extend(axioms::owl_axiomatic_triples());
            }
        }
        if self.options.datatype_axioms && self.options.regime.wants_rdfs_axioms() {
            noise.extend(axioms::datatype_subclass_axioms());
        }
        if self.options.regime.wants_owl_axioms() {
            noise.extend(owl2rl::one_time_rules());
        }
        if self.options.regime == Regime::Extension {
            noise.extend(combined::extension_one_time_rules());
        }
        if matches!(self.options.regime, Regime::Combined | Regime::Extension) {
            noise.extend(combined::combined_one_time_rules());
        }
        for t in &noise {
            graph.remove(t);
        }

        let tautologies: Vec<Triple> = graph
            .triples(&TriplePattern::all())
            .into_iter()
            .filter(|t| t.subject == t.object && is_reflexive_tautology(t))
            .collect();
        for t in &tautologies {
            graph.remove(t);
        }

        // (x subClassOf owl:Thing|rdfs:Resource) and (owl:Nothing subClassOf x)
        // hold for every class and are never a genuine domain assertion.
        let thing = Term::iri(rdf_model::vocab::owl::THING);
        let resource = Term::iri(rdf_model::vocab::rdfs::RESOURCE);
        let nothing = Term::iri(rdf_model::vocab::owl::NOTHING);
        let sub_class_of = Term::iri(rdf_model::vocab::rdfs::SUB_CLASS_OF);
        let schema_tautologies: Vec<Triple> = graph
            .triples(&TriplePattern::all())
            .into_iter()
            .filter(|t| {
                t.predicate == sub_class_of
                    && ((t.object == thing || t.object == resource) || t.subject == nothing)
            })
            .collect();
        for t in &schema_tautologies {
            graph.remove(t);
        }

        // Annotation-property typings are schema scaffolding from prp-ap,
        // never a genuine fact about the input ontology.
        let annotation_typings: Vec<Triple> = graph
            .triples(&TriplePattern::all())
            .into_iter()
            .filter(|t| {
                t.predicate.as_iri() == Some(rdf_model::vocab::rdf::TYPE)
                    && t.object.as_iri() == Some(rdf_model::vocab::owl::ANNOTATION_PROPERTY)
            })
            .collect();
        for t in &annotation_typings {
            graph.remove(t);
        }

        for t in tautological_equivalences() {
            graph.remove(&t);
        }
    }

    fn check_restricted_literals(&self, proxies: &ProxyTable, restricted: &[RestrictedDatatype]) -> Vec<ReasoningError> {
        if restricted.is_empty() {
            return Vec::new();
        }
        let mut errors = Vec::new();
        for (_bnode, lit) in proxies.iter() {
            if let Some(dt) = lit.datatype.as_deref() {
                if let Err(e) = combined::restriction_typing_check(&lit.lexical, dt, restricted) {
                    errors.push(e);
                }
            }
        }
        errors
    }

    fn run_to_fixed_point(
        &self,
        graph: &mut Graph,
        errors: &mut Vec<ReasoningError>,
        proxies: &ProxyTable,
        restricted: &[RestrictedDatatype],
    ) -> ClosureResult<usize> {
        let mut cycle = 0;
        loop {
            cycle += 1;
            if cycle > self.options.max_cycles {
                return Err(ClosureError::CycleLimitExceeded(self.options.max_cycles));
            }

            let snapshot = graph.triples(&TriplePattern::all());
            let mut pending: Vec<Triple> = Vec::new();

            for t in &snapshot {
                match self.options.regime {
                    Regime::Rdfs => pending.extend(rdfs::apply(graph, t, cycle)),
                    Regime::Owl2Rl => {
                        let out = owl2rl::apply(graph, t, proxies, restricted);
                        pending.extend(out.triples);
                        errors.extend(out.errors);
                    }
                    Regime::Combined => {
                        let out = combined::apply(graph, t, cycle, proxies, restricted);
                        pending.extend(out.triples);
                        errors.extend(out.errors);
                    }
                    Regime::Extension => {
                        let out = combined::apply(graph, t, cycle, proxies, restricted);
                        pending.extend(out.triples);
                        errors.extend(out.errors);
                        pending.extend(combined::cls_has_self(graph, t, proxies));
                    }
                }
            }

            let mut changed = false;
            for t in pending {
                if graph.insert(&t) {
                    changed = true;
                }
            }

            debug!(cycle, len = graph.len(), "closure cycle complete");
            if !changed {
                return Ok(cycle);
            }
        }
    }
}

/// A reflexive triple (`x p x`) is tautological noise once `p` is one of the
/// handful of predicates every regime reflexively derives for every term
/// (`owl:sameAs`, `rdfs:subClassOf`, `rdfs:subPropertyOf`) rather than a
/// genuine domain assertion.
fn is_reflexive_tautology(t: &Triple) -> bool {
    matches!(
        t.predicate.as_iri(),
        Some(rdf_model::vocab::owl::SAME_AS)
            | Some(rdf_model::vocab::rdfs::SUB_CLASS_OF)
            | Some(rdf_model::vocab::rdfs::SUB_PROPERTY_OF)
            | Some(rdf_model::vocab::owl::EQUIVALENT_CLASS)
    )
}

/// The Thing/Resource/Class/Datatype/DataRange equivalences the combined
/// regime's one-time rules bind (both directions) — always tautological,
/// never a genuine fact derived from the input ontology.
fn tautological_equivalences() -> Vec<Triple> {
    let mut out = Vec::new();
    for t in combined::combined_one_time_rules() {
        out.push(Triple::new_unchecked(t.object.clone(), t.predicate.clone(), t.subject.clone()));
        out.push(t);
    }
    out
}

fn materialize(graph: &mut Graph, errors: &[ReasoningError]) {
    const ERROR_PREDICATE: &str = "urn:reasoning:error";
    for e in errors {
        let node = Term::Blank(graph.mint_blank());
        graph.insert(&Triple::new_unchecked(
            node,
            Term::iri(ERROR_PREDICATE),
            Term::literal(rdf_model::Literal::plain(e.to_string())),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_model::vocab::{rdfs, xsd};
    use rdf_model::Literal;

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    #[test]
    fn rdfs_regime_propagates_domain_and_range() {
        let mut graph = Graph::new();
        graph.insert(&Triple::try_new(iri("http://e/knows"), iri(rdfs::DOMAIN), iri("http://e/Person")).unwrap());
        graph.insert(&Triple::try_new(iri("http://e/alice"), iri("http://e/knows"), iri("http://e/bob")).unwrap());

        let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(graph).unwrap();
        assert!(report.graph.contains(&Triple::new_unchecked(iri("http://e/alice"), iri(rdf_model::vocab::rdf::TYPE), iri("http://e/Person"))));
    }

    #[test]
    fn combined_regime_merges_owl_and_rdfs() {
        let mut graph = Graph::new();
        graph.insert(&Triple::try_new(iri("http://e/Student"), iri(rdfs::SUB_CLASS_OF), iri("http://e/Person")).unwrap());
        graph.insert(&Triple::try_new(iri("http://e/alice"), iri(rdf_model::vocab::rdf::TYPE), iri("http://e/Student")).unwrap());

        let report = Closure::new(ClosureOptions::new(Regime::Combined)).close(graph).unwrap();
        assert!(report.graph.contains(&Triple::new_unchecked(iri("http://e/alice"), iri(rdf_model::vocab::rdf::TYPE), iri("http://e/Person"))));
    }

    #[test]
    fn literal_proxies_are_restored_to_plain_literals() {
        let mut graph = Graph::new();
        graph.insert(
            &Triple::try_new(
                iri("http://e/alice"),
                iri("http://e/name"),
                Term::literal(Literal::typed("Alice", xsd::STRING)),
            )
            .unwrap(),
        );

        let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(graph).unwrap();
        let found = report.graph.objects(&iri("http://e/alice"), &iri("http://e/name")).next().unwrap();
        let lit = found.as_literal().unwrap();
        assert!(lit.is_plain());
    }

    #[test]
    fn cycle_limit_is_enforced() {
        let graph = Graph::new();
        let options = ClosureOptions::new(Regime::Rdfs).with_max_cycles(0);
        let err = Closure::new(options).close(graph).unwrap_err();
        assert!(matches!(err, ClosureError::CycleLimitExceeded(0)));
    }

    #[test]
    fn axioms_and_datatype_axioms_inject_the_static_tables() {
        let options = ClosureOptions::new(Regime::Rdfs).with_axioms(true).with_datatype_axioms(true);
        let report = Closure::new(options).close(Graph::new()).unwrap();
        assert!(report.graph.contains(&Triple::new_unchecked(
            iri(xsd::INTEGER),
            iri(rdf_model::vocab::rdf::TYPE),
            iri(rdf_model::vocab::rdfs::DATATYPE),
        )));
        assert!(report.graph.contains(&Triple::new_unchecked(
            iri(xsd::INT),
            iri(rdfs::SUB_CLASS_OF),
            iri(xsd::LONG),
        )));
    }

    #[test]
    fn without_axioms_flag_the_static_tables_are_absent() {
        let report = Closure::new(ClosureOptions::new(Regime::Rdfs)).close(Graph::new()).unwrap();
        assert!(report.graph.is_empty());
    }

    #[test]
    fn trimming_removes_injected_axioms_and_self_tautologies() {
        let mut graph = Graph::new();
        graph.insert(&Triple::try_new(iri("http://e/Student"), iri(rdfs::SUB_CLASS_OF), iri("http://e/Person")).unwrap());

        let options = ClosureOptions::new(Regime::Rdfs).with_axioms(true).with_trimming(true);
        let report = Closure::new(options).close(graph).unwrap();

        assert!(!report.graph.contains(&Triple::new_unchecked(
            iri(rdf_model::vocab::rdf::TYPE),
            iri(rdf_model::vocab::rdf::TYPE),
            iri(rdf_model::vocab::rdf::PROPERTY),
        )));
        assert!(!report.graph.contains(&Triple::new_unchecked(
            iri("http://e/Person"),
            iri(rdfs::SUB_CLASS_OF),
            iri("http://e/Person"),
        )));
        assert!(report.graph.contains(&Triple::new_unchecked(
            iri("http://e/Student"),
            iri(rdfs::SUB_CLASS_OF),
            iri("http://e/Person"),
        )));
    }

    #[test]
    fn maximal_options_enable_everything() {
        let report = Closure::new(ClosureOptions::maximal()).close(Graph::new()).unwrap();
        assert!(!report.graph.contains(&Triple::new_unchecked(
            iri(xsd::INTEGER),
            iri(rdf_model::vocab::rdf::TYPE),
            iri(rdf_model::vocab::rdfs::DATATYPE),
        )));
    }

    #[test]
    fn materialize_errors_adds_error_triples_to_graph() {
        let mut graph = Graph::new();
        graph.insert(&Triple::try_new(iri("http://e/x"), iri(rdf_model::vocab::rdf::TYPE), iri(rdf_model::vocab::owl::NOTHING)).unwrap());

        let options = ClosureOptions::new(Regime::Owl2Rl).materialize_errors(true);
        let report = Closure::new(options).close(graph).unwrap();
        assert!(!report.errors.is_empty());
        assert!(report.graph.len() > 0);
    }
}
