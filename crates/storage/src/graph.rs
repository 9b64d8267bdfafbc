//! In-memory, SPO/POS/OSP-indexed triple store.
//!
//! The deductive closure engine is single-threaded and everything lives in
//! memory for the run's duration (SPEC_FULL.md §3/§5), so this is
//! deliberately the simplest store that still answers every pattern the
//! rule bodies ask for in O(1)-ish time: full scans are never needed once
//! at least one position of a pattern is bound.

use ahash::{AHashMap, AHashSet};

use rdf_model::{BlankNodeId, Term, Triple};

use crate::pattern::{TermPattern, TriplePattern};

type Index = AHashMap<Term, AHashMap<Term, AHashSet<Term>>>;

/// The working graph the closure driver reads from and writes to.
#[derive(Debug, Default)]
pub struct Graph {
    spo: Index,
    pos: Index,
    osp: Index,
    len: usize,
    next_blank: u64,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Graph::default()
    }

    /// Number of distinct triples currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the graph holds no triples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mint a fresh blank node, unique within this graph, for literal
    /// proxies and rule-generated existentials.
    pub fn mint_blank(&mut self) -> BlankNodeId {
        let id = BlankNodeId(self.next_blank);
        self.next_blank += 1;
        id
    }

    /// Insert a triple. Returns `true` if it was not already present.
    pub fn insert(&mut self, triple: &Triple) -> bool {
        let inserted = index_insert(&mut self.spo, &triple.subject, &triple.predicate, &triple.object)
            && index_insert(&mut self.pos, &triple.predicate, &triple.object, &triple.subject)
            && index_insert(&mut self.osp, &triple.object, &triple.subject, &triple.predicate);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a triple. Returns `true` if it was present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let removed = index_remove(&mut self.spo, &triple.subject, &triple.predicate, &triple.object)
            && index_remove(&mut self.pos, &triple.predicate, &triple.object, &triple.subject)
            && index_remove(&mut self.osp, &triple.object, &triple.subject, &triple.predicate);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// True if the exact triple is present.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.spo
            .get(&triple.subject)
            .and_then(|po| po.get(&triple.predicate))
            .is_some_and(|os| os.contains(&triple.object))
    }

    /// All triples matching a pattern. Picks the index with the cheapest
    /// scan given which positions are bound.
    pub fn triples(&self, pattern: &TriplePattern) -> Vec<Triple> {
        match (
            pattern.subject.as_term(),
            pattern.predicate.as_term(),
            pattern.object.as_term(),
        ) {
            (Some(s), _, _) => self.scan(&self.spo, s, &pattern.predicate, &pattern.object, Order::Spo),
            (None, Some(p), _) => self.scan(&self.pos, p, &pattern.object, &pattern.subject, Order::Pos),
            (None, None, Some(o)) => self.scan(&self.osp, o, &pattern.subject, &pattern.predicate, Order::Osp),
            (None, None, None) => self.spo.iter().flat_map(|(s, po)| {
                po.iter().flat_map(move |(p, os)| {
                    os.iter()
                        .map(move |o| Triple::new_unchecked(s.clone(), p.clone(), o.clone()))
                })
            }).collect(),
        }
    }

    fn scan(
        &self,
        index: &Index,
        first: &Term,
        second: &TermPattern,
        third: &TermPattern,
        order: Order,
    ) -> Vec<Triple> {
        let Some(seconds) = index.get(first) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (b, thirds) in seconds {
            if !second.matches(b) {
                continue;
            }
            for c in thirds {
                if !third.matches(c) {
                    continue;
                }
                out.push(order.rebuild(first, b, c));
            }
        }
        out
    }

    /// Subjects `s` such that `(s, predicate, object)` holds, for bound
    /// predicate and object.
    pub fn subjects(&self, predicate: &Term, object: &Term) -> impl Iterator<Item = Term> + '_ {
        self.pos
            .get(predicate)
            .and_then(|os| os.get(object))
            .into_iter()
            .flatten()
            .cloned()
    }

    /// Objects `o` such that `(subject, predicate, o)` holds, for bound
    /// subject and predicate.
    pub fn objects(&self, subject: &Term, predicate: &Term) -> impl Iterator<Item = Term> + '_ {
        self.spo
            .get(subject)
            .and_then(|po| po.get(predicate))
            .into_iter()
            .flatten()
            .cloned()
    }

    /// `(p, o)` pairs for a bound subject.
    pub fn predicate_objects(&self, subject: &Term) -> impl Iterator<Item = (Term, Term)> + '_ {
        self.spo
            .get(subject)
            .into_iter()
            .flat_map(|po| po.iter().flat_map(|(p, os)| os.iter().map(move |o| (p.clone(), o.clone()))))
    }

    /// `(s, o)` pairs for a bound predicate.
    pub fn subject_objects(&self, predicate: &Term) -> impl Iterator<Item = (Term, Term)> + '_ {
        self.pos
            .get(predicate)
            .into_iter()
            .flat_map(|os| os.iter().flat_map(|(o, ss)| ss.iter().map(move |s| (s.clone(), o.clone()))))
    }

    /// `(s, p)` pairs for a bound object.
    pub fn subject_predicates(&self, object: &Term) -> impl Iterator<Item = (Term, Term)> + '_ {
        self.osp
            .get(object)
            .into_iter()
            .flat_map(|sp| sp.iter().flat_map(|(s, ps)| ps.iter().map(move |p| (s.clone(), p.clone()))))
    }

    /// Iterate over every triple currently stored.
    pub fn iter(&self) -> impl Iterator<Item = Triple> + '_ {
        self.triples(&TriplePattern::all()).into_iter()
    }
}

#[derive(Clone, Copy)]
enum Order {
    Spo,
    Pos,
    Osp,
}

impl Order {
    fn rebuild(self, a: &Term, b: &Term, c: &Term) -> Triple {
        match self {
            Order::Spo => Triple::new_unchecked(a.clone(), b.clone(), c.clone()),
            Order::Pos => Triple::new_unchecked(c.clone(), a.clone(), b.clone()),
            Order::Osp => Triple::new_unchecked(b.clone(), c.clone(), a.clone()),
        }
    }
}

fn index_insert(index: &mut Index, a: &Term, b: &Term, c: &Term) -> bool {
    index
        .entry(a.clone())
        .or_default()
        .entry(b.clone())
        .or_default()
        .insert(c.clone())
}

fn index_remove(index: &mut Index, a: &Term, b: &Term, c: &Term) -> bool {
    let Some(bs) = index.get_mut(a) else {
        return false;
    };
    let Some(cs) = bs.get_mut(b) else {
        return false;
    };
    let removed = cs.remove(c);
    if cs.is_empty() {
        bs.remove(b);
    }
    if bs.is_empty() {
        index.remove(a);
    }
    removed
}
