//! `rdf:List` traversal shared by the rules that pattern-match against
//! `owl:intersectionOf`/`owl:unionOf`/`owl:oneOf`/`owl:propertyChainAxiom`/
//! `owl:members`/`owl:distinctMembers` list objects.

use rdf_model::vocab::rdf;
use rdf_model::Term;
use storage::Graph;

/// Collect a `rdf:List`'s elements in order, stopping at `rdf:nil` or at the
/// first broken link (a malformed list yields whatever prefix was valid).
pub fn items(graph: &Graph, head: &Term) -> Vec<Term> {
    let first = Term::iri(rdf::FIRST);
    let rest = Term::iri(rdf::REST);
    let nil = Term::iri(rdf::NIL);

    let mut out = Vec::new();
    let mut node = head.clone();
    while node != nil {
        let Some(element) = graph.objects(&node, &first).next() else {
            break;
        };
        out.push(element);
        let Some(next) = graph.objects(&node, &rest).next() else {
            break;
        };
        node = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_model::Triple;

    #[test]
    fn reads_a_two_element_list() {
        let mut graph = Graph::new();
        let head = Term::blank(0);
        let tail = Term::blank(1);
        graph.insert(&Triple::new_unchecked(head.clone(), Term::iri(rdf::FIRST), Term::iri("http://e/a")));
        graph.insert(&Triple::new_unchecked(head.clone(), Term::iri(rdf::REST), tail.clone()));
        graph.insert(&Triple::new_unchecked(tail.clone(), Term::iri(rdf::FIRST), Term::iri("http://e/b")));
        graph.insert(&Triple::new_unchecked(tail, Term::iri(rdf::REST), Term::iri(rdf::NIL)));

        let elements = items(&graph, &head);
        assert_eq!(elements, vec![Term::iri("http://e/a"), Term::iri("http://e/b")]);
    }

    #[test]
    fn empty_list_yields_no_elements() {
        let graph = Graph::new();
        assert!(items(&graph, &Term::iri(rdf::NIL)).is_empty());
    }
}
