//! Literal-proxy layer (component C5): literals cannot appear in subject
//! position, so every literal object gets a fresh blank-node stand-in for
//! the duration of the closure, restored to a literal afterwards.
//!
//! Grounded precisely on the original engine's `Literals.py`
//! (`LiteralProxies.__init__`/`restore`, including the xsd:string/plain
//! literal "twin proxy" rule).

use ahash::AHashMap;

use rdf_model::{Literal, Term, Triple};
use storage::{Graph, TriplePattern};

use crate::{datatypes, ReasoningError};

/// Bidirectional literal ⇄ blank-node proxy table for one closure run.
#[derive(Debug, Default)]
pub struct ProxyTable {
    lit_to_bnode: AHashMap<Literal, Term>,
    bnode_to_lit: AHashMap<Term, Literal>,
}

impl ProxyTable {
    /// A fresh, empty proxy table.
    pub fn new() -> Self {
        ProxyTable::default()
    }

    /// Replace every triple's literal object with a blank-node proxy,
    /// validating each literal's lexical form against its (explicit or
    /// implicit `xsd:string`) datatype along the way. Invalid literals are
    /// still proxied (so the rest of the closure can proceed) but are
    /// reported as [`ReasoningError::LexicalInvalidity`].
    pub fn install(&mut self, graph: &mut Graph) -> Vec<ReasoningError> {
        let mut errors = Vec::new();
        let with_literal_object: Vec<Triple> = graph
            .triples(&TriplePattern::all())
            .into_iter()
            .filter(|t| t.object.is_literal())
            .collect();

        for triple in &with_literal_object {
            let lit = triple.object.as_literal().unwrap().clone();
            if let Some(dt) = lit.datatype.as_deref() {
                if let Err(message) = datatypes::validate_lexical(&lit.lexical, dt) {
                    let _ = message;
                    errors.push(ReasoningError::LexicalInvalidity {
                        lexical: lit.lexical.to_string(),
                        datatype: dt.to_string(),
                    });
                }
            }
            let bnode = self.proxy_for(graph, &lit);
            graph.remove(triple);
            graph.insert(&Triple::new_unchecked(
                triple.subject.clone(),
                triple.predicate.clone(),
                bnode,
            ));
        }
        errors
    }

    fn proxy_for(&mut self, graph: &mut Graph, lit: &Literal) -> Term {
        if let Some(existing) = self.lit_to_bnode.get(lit) {
            return existing.clone();
        }
        let bnode = self.mint(graph, lit.clone());

        // Twin-proxy rule: a plain literal and its xsd:string twin (or vice
        // versa) must resolve to distinct proxies that the rest of the
        // closure can still relate — `Literals.py` creates both proxies up
        // front rather than unifying them, so dt-type rules that fire on
        // one can be observed from the other via rdfs/eq rules later.
        if lit.is_plain() {
            let twin = Literal::typed(lit.lexical.clone(), rdf_model::vocab::xsd::STRING);
            if !self.lit_to_bnode.contains_key(&twin) {
                self.mint(graph, twin);
            }
        } else if lit.has_datatype(rdf_model::vocab::xsd::STRING) {
            let twin = Literal::plain(lit.lexical.clone());
            if !self.lit_to_bnode.contains_key(&twin) {
                self.mint(graph, twin);
            }
        }

        bnode
    }

    fn mint(&mut self, graph: &mut Graph, lit: Literal) -> Term {
        let id = graph.mint_blank();
        let bnode = Term::Blank(id);
        self.lit_to_bnode.insert(lit.clone(), bnode.clone());
        self.bnode_to_lit.insert(bnode.clone(), lit);
        graph.insert(&Triple::new_unchecked(
            bnode.clone(),
            Term::iri(rdf_model::vocab::rdf::TYPE),
            Term::iri(rdf_model::vocab::rdfs::LITERAL),
        ));
        bnode
    }

    /// The literal a proxy blank node stands in for, if it is one.
    pub fn literal_for(&self, term: &Term) -> Option<&Literal> {
        self.bnode_to_lit.get(term)
    }

    /// Every proxy blank node paired with the literal it stands in for.
    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Literal)> {
        self.bnode_to_lit.iter()
    }

    /// Reverse [`ProxyTable::install`]: every triple whose subject is a
    /// proxy is dropped (a literal can never legally be a subject), and
    /// every triple whose object is a proxy has that object swapped back
    /// for the literal it stands in for. A restored `xsd:string` literal is
    /// normalised to plain form, matching `Literals.py::restore`'s
    /// `rdflibLiteral(str(lit))`.
    pub fn restore(&self, graph: &mut Graph) {
        let all: Vec<Triple> = graph.triples(&TriplePattern::all());
        for triple in &all {
            let subject_is_proxy = self.bnode_to_lit.contains_key(&triple.subject);
            let object_proxy_lit = self.bnode_to_lit.get(&triple.object);

            if subject_is_proxy {
                graph.remove(triple);
                continue;
            }
            if let Some(lit) = object_proxy_lit {
                graph.remove(triple);
                let restored = normalize_restored(lit);
                graph.insert(&Triple::new_unchecked(
                    triple.subject.clone(),
                    triple.predicate.clone(),
                    Term::literal(restored),
                ));
            }
        }
    }
}

/// The one-time RDFS rule (SPEC_FULL.md §4.5): for every pair of proxies
/// whose underlying literals are datatype-value-equal, replicate every
/// triple that relates anything to one proxy onto the other too — a hidden
/// `owl:sameAs` between value-equal literals (`"4"^^xsd:int` and
/// `"04"^^xsd:int`) that no rule in [`crate::owl2rl`]/[`crate::rdfs`] would
/// otherwise derive, since `owl:sameAs` only ever relates individuals.
pub fn value_equal_replication(graph: &Graph, proxies: &ProxyTable) -> Vec<Triple> {
    let entries: Vec<(&Term, &Literal)> = proxies.iter().collect();
    let mut out = Vec::new();
    for i in 0..entries.len() {
        let (p1, lit1) = entries[i];
        let Some(dt1) = lit1.effective_datatype() else { continue };
        for &(p2, lit2) in &entries[i + 1..] {
            let Some(dt2) = lit2.effective_datatype() else { continue };
            if dt1 != dt2 || !datatypes::value_equal(&lit1.lexical, &lit2.lexical, dt1) {
                continue;
            }
            for (s, p) in graph.subject_predicates(p1) {
                out.push(Triple::new_unchecked(s, p, p2.clone()));
            }
            for (s, p) in graph.subject_predicates(p2) {
                out.push(Triple::new_unchecked(s, p, p1.clone()));
            }
        }
    }
    out
}

fn normalize_restored(lit: &Literal) -> Literal {
    if lit.has_datatype(rdf_model::vocab::xsd::STRING) {
        Literal::plain(lit.lexical.clone())
    } else {
        lit.clone()
    }
}
