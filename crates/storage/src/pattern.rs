//! Triple pattern matching for graph queries.

use rdf_model::Term;

/// Pattern for matching a single term position.
///
/// `None` represents a wildcard that matches any term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermPattern {
    /// Match any term (wildcard).
    Any,
    /// Match a specific term.
    Concrete(Term),
}

impl TermPattern {
    /// Check if this pattern matches a term.
    pub fn matches(&self, term: &Term) -> bool {
        match self {
            TermPattern::Any => true,
            TermPattern::Concrete(t) => t == term,
        }
    }

    /// Check if this is a wildcard pattern.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TermPattern::Any)
    }

    /// Get the concrete term, if any.
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            TermPattern::Concrete(t) => Some(t),
            TermPattern::Any => None,
        }
    }
}

impl From<Option<Term>> for TermPattern {
    fn from(opt: Option<Term>) -> Self {
        match opt {
            Some(term) => TermPattern::Concrete(term),
            None => TermPattern::Any,
        }
    }
}

impl From<Term> for TermPattern {
    fn from(term: Term) -> Self {
        TermPattern::Concrete(term)
    }
}

/// Pattern for matching triples in `Graph::triples`.
///
/// Each field is either a concrete term or a wildcard. Unlike SPARQL basic
/// graph patterns, there is no graph/context position — SPEC_FULL.md §3
/// only ever speaks of a single `Graph`.
#[derive(Clone, Debug)]
pub struct TriplePattern {
    /// Subject pattern (can be wildcard).
    pub subject: TermPattern,
    /// Predicate pattern (can be wildcard).
    pub predicate: TermPattern,
    /// Object pattern (can be wildcard).
    pub object: TermPattern,
}

impl TriplePattern {
    /// Create a new triple pattern.
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// A pattern that matches every triple in the graph.
    pub fn all() -> Self {
        TriplePattern {
            subject: TermPattern::Any,
            predicate: TermPattern::Any,
            object: TermPattern::Any,
        }
    }

    /// Check whether a triple matches this pattern.
    pub fn matches(&self, triple: &rdf_model::Triple) -> bool {
        self.subject.matches(&triple.subject)
            && self.predicate.matches(&triple.predicate)
            && self.object.matches(&triple.object)
    }

    /// Count how many positions are bound (not wildcards); used by
    /// [`crate::Graph::triples`] to pick the cheapest index to scan.
    pub fn bound_count(&self) -> usize {
        [&self.subject, &self.predicate, &self.object]
            .iter()
            .filter(|p| !p.is_wildcard())
            .count()
    }
}

impl Default for TriplePattern {
    fn default() -> Self {
        TriplePattern::all()
    }
}
