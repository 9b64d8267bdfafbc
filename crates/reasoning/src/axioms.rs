//! Static axiomatic triple tables (component C3).
//!
//! Grounded on the original engine's `AxiomaticTriples.py`: the RDFS domain/
//! range axioms, the pre-computed RDFS-valid class/property typings, and the
//! datatype subsumption chain expressed as `rdfs:subClassOf` triples. These
//! are added once, before the first cycle (SPEC_FULL.md §4.1 step 2), not
//! re-derived by any rule.

use rdf_model::vocab::{owl, rdf, rdfs, xsd};
use rdf_model::{Term, Triple};

fn axiom(s: &str, p: &str, o: &str) -> Triple {
    Triple::new_unchecked(Term::iri(s), Term::iri(p), Term::iri(o))
}

/// The RDFS axiomatic triples: domain/range declarations for the RDF/RDFS
/// vocabulary itself, plus the handful of triples RDFS entailment always
/// holds regardless of input (container subclassing, `XMLLiteral`'s place
/// in the class hierarchy, and the pre-computed class/property typings).
pub fn rdfs_axiomatic_triples() -> Vec<Triple> {
    let domains = [
        (rdf::TYPE, rdfs::RESOURCE),
        (rdfs::DOMAIN, rdf::PROPERTY),
        (rdfs::RANGE, rdf::PROPERTY),
        (rdfs::SUB_PROPERTY_OF, rdf::PROPERTY),
        (rdfs::SUB_CLASS_OF, rdfs::CLASS),
        (rdf::SUBJECT, rdf::STATEMENT),
        (rdf::PREDICATE, rdf::STATEMENT),
        (rdf::OBJECT, rdf::STATEMENT),
        (rdfs::MEMBER, rdfs::RESOURCE),
        (rdf::FIRST, rdf::LIST),
        (rdf::REST, rdf::LIST),
        (rdfs::SEE_ALSO, rdfs::RESOURCE),
        (rdfs::IS_DEFINED_BY, rdfs::RESOURCE),
        (rdfs::COMMENT, rdfs::RESOURCE),
        (rdfs::LABEL, rdfs::RESOURCE),
        (rdfs::VALUE, rdfs::RESOURCE),
    ];
    let ranges = [
        (rdf::TYPE, rdfs::CLASS),
        (rdfs::DOMAIN, rdfs::CLASS),
        (rdfs::RANGE, rdfs::CLASS),
        (rdfs::SUB_PROPERTY_OF, rdf::PROPERTY),
        (rdfs::SUB_CLASS_OF, rdfs::CLASS),
        (rdf::SUBJECT, rdfs::RESOURCE),
        (rdf::PREDICATE, rdfs::RESOURCE),
        (rdf::OBJECT, rdfs::RESOURCE),
        (rdfs::MEMBER, rdfs::RESOURCE),
        (rdf::FIRST, rdfs::RESOURCE),
        (rdf::REST, rdf::LIST),
        (rdfs::SEE_ALSO, rdfs::RESOURCE),
        (rdfs::IS_DEFINED_BY, rdfs::RESOURCE),
        (rdfs::COMMENT, rdfs::LITERAL),
        (rdfs::LABEL, rdfs::LITERAL),
        (rdfs::VALUE, rdfs::RESOURCE),
    ];

    let mut triples: Vec<Triple> = Vec::new();
    triples.extend(domains.iter().map(|(p, d)| axiom(p, rdfs::DOMAIN, d)));
    triples.extend(ranges.iter().map(|(p, r)| axiom(p, rdfs::RANGE, r)));

    triples.push(axiom(rdf::PROPERTY, rdf::TYPE, rdfs::CLASS));
    triples.push(axiom(rdf::ALT, rdfs::SUB_CLASS_OF, rdfs::CONTAINER));
    triples.push(axiom(rdf::BAG, rdfs::SUB_CLASS_OF, rdfs::CONTAINER));
    triples.push(axiom(rdf::SEQ, rdfs::SUB_CLASS_OF, rdfs::CONTAINER));
    triples.push(axiom(rdfs::IS_DEFINED_BY, rdfs::SUB_PROPERTY_OF, rdfs::SEE_ALSO));
    triples.push(axiom(rdf::XML_LITERAL, rdf::TYPE, rdfs::DATATYPE));
    triples.push(axiom(rdf::XML_LITERAL, rdfs::SUB_CLASS_OF, rdfs::LITERAL));
    triples.push(axiom(rdfs::DATATYPE, rdfs::SUB_CLASS_OF, rdfs::CLASS));

    let classes = [
        rdfs::RESOURCE,
        rdfs::CLASS,
        rdfs::LITERAL,
        rdf::XML_LITERAL,
        rdfs::DATATYPE,
        rdf::SEQ,
        rdf::BAG,
        rdf::ALT,
        rdfs::CONTAINER,
        rdf::LIST,
        rdfs::CONTAINER_MEMBERSHIP_PROPERTY,
        rdf::PROPERTY,
        rdf::STATEMENT,
    ];
    triples.extend(classes.iter().map(|c| axiom(c, rdf::TYPE, rdfs::CLASS)));

    let properties = [
        rdfs::DOMAIN,
        rdfs::RANGE,
        rdfs::SUB_PROPERTY_OF,
        rdfs::SUB_CLASS_OF,
        rdfs::MEMBER,
        rdfs::SEE_ALSO,
        rdfs::IS_DEFINED_BY,
        rdfs::COMMENT,
        rdfs::LABEL,
    ];
    triples.extend(properties.iter().map(|p| axiom(p, rdf::TYPE, rdf::PROPERTY)));

    triples
}

/// The OWL 2 RL class/property axiomatic triples (C3): domain/range
/// declarations for the OWL vocabulary itself, grounded on the original
/// engine's `AxiomaticTriples.py` (`_OWL_axiomatic_triples_Classes` +
/// `_OWL_axiomatic_triples_Properties`). Inserted once, ahead of the first
/// cycle, whenever the active regime wants OWL-RL axioms.
pub fn owl_axiomatic_triples() -> Vec<Triple> {
    let domains = [
        (owl::EQUIVALENT_CLASS, rdfs::CLASS),
        (owl::EQUIVALENT_PROPERTY, rdf::PROPERTY),
        (owl::DISJOINT_WITH, rdfs::CLASS),
        (owl::PROPERTY_DISJOINT_WITH, rdf::PROPERTY),
        (owl::SAME_AS, rdfs::RESOURCE),
        (owl::DIFFERENT_FROM, rdfs::RESOURCE),
        (owl::INVERSE_OF, rdf::PROPERTY),
        (owl::PROPERTY_CHAIN_AXIOM, rdf::PROPERTY),
        (owl::HAS_KEY, rdfs::CLASS),
        (owl::ON_PROPERTY, owl::RESTRICTION),
        (owl::ON_CLASS, owl::RESTRICTION),
        (owl::ON_DATATYPE, rdfs::DATATYPE),
        (owl::WITH_RESTRICTIONS, rdfs::DATATYPE),
        (owl::MAX_CARDINALITY, owl::RESTRICTION),
        (owl::MAX_QUALIFIED_CARDINALITY, owl::RESTRICTION),
        (owl::SOME_VALUES_FROM, owl::RESTRICTION),
        (owl::ALL_VALUES_FROM, owl::RESTRICTION),
        (owl::HAS_VALUE, owl::RESTRICTION),
        (owl::HAS_SELF, owl::RESTRICTION),
        (owl::INTERSECTION_OF, owl::CLASS),
        (owl::UNION_OF, owl::CLASS),
        (owl::COMPLEMENT_OF, owl::CLASS),
        (owl::ONE_OF, owl::CLASS),
        (owl::SOURCE_INDIVIDUAL, owl::NEGATIVE_PROPERTY_ASSERTION),
        (owl::ASSERTION_PROPERTY, owl::NEGATIVE_PROPERTY_ASSERTION),
        (owl::TARGET_INDIVIDUAL, owl::NEGATIVE_PROPERTY_ASSERTION),
        (owl::TARGET_VALUE, owl::NEGATIVE_PROPERTY_ASSERTION),
    ];
    let ranges = [
        (owl::EQUIVALENT_CLASS, rdfs::CLASS),
        (owl::EQUIVALENT_PROPERTY, rdf::PROPERTY),
        (owl::DISJOINT_WITH, rdfs::CLASS),
        (owl::PROPERTY_DISJOINT_WITH, rdf::PROPERTY),
        (owl::SAME_AS, rdfs::RESOURCE),
        (owl::DIFFERENT_FROM, rdfs::RESOURCE),
        (owl::INVERSE_OF, rdf::PROPERTY),
        (owl::ON_PROPERTY, rdf::PROPERTY),
        (owl::ON_CLASS, owl::CLASS),
        (owl::ON_DATATYPE, rdfs::DATATYPE),
        (owl::SOME_VALUES_FROM, owl::CLASS),
        (owl::ALL_VALUES_FROM, owl::CLASS),
        (owl::INTERSECTION_OF, rdf::LIST),
        (owl::UNION_OF, rdf::LIST),
        (owl::COMPLEMENT_OF, owl::CLASS),
        (owl::ONE_OF, rdf::LIST),
        (owl::SOURCE_INDIVIDUAL, rdfs::RESOURCE),
        (owl::ASSERTION_PROPERTY, rdf::PROPERTY),
        (owl::TARGET_INDIVIDUAL, rdfs::RESOURCE),
    ];

    let mut triples: Vec<Triple> = Vec::new();
    triples.extend(domains.iter().map(|(p, d)| axiom(p, rdfs::DOMAIN, d)));
    triples.extend(ranges.iter().map(|(p, r)| axiom(p, rdfs::RANGE, r)));

    let classes = [
        owl::CLASS,
        owl::THING,
        owl::NOTHING,
        owl::RESTRICTION,
        owl::OBJECT_PROPERTY,
        owl::DATATYPE_PROPERTY,
        owl::ANNOTATION_PROPERTY,
        owl::TRANSITIVE_PROPERTY,
        owl::SYMMETRIC_PROPERTY,
        owl::ASYMMETRIC_PROPERTY,
        owl::FUNCTIONAL_PROPERTY,
        owl::INVERSE_FUNCTIONAL_PROPERTY,
        owl::IRREFLEXIVE_PROPERTY,
        owl::ALL_DIFFERENT,
        owl::ALL_DISJOINT_CLASSES,
        owl::ALL_DISJOINT_PROPERTIES,
        owl::DATA_RANGE,
        owl::NEGATIVE_PROPERTY_ASSERTION,
    ];
    triples.extend(classes.iter().map(|c| axiom(c, rdf::TYPE, rdfs::CLASS)));

    let properties = [
        owl::EQUIVALENT_CLASS,
        owl::EQUIVALENT_PROPERTY,
        owl::DISJOINT_WITH,
        owl::PROPERTY_DISJOINT_WITH,
        owl::SAME_AS,
        owl::DIFFERENT_FROM,
        owl::INVERSE_OF,
        owl::PROPERTY_CHAIN_AXIOM,
        owl::HAS_KEY,
        owl::ON_PROPERTY,
        owl::ON_CLASS,
        owl::ON_DATATYPE,
        owl::WITH_RESTRICTIONS,
        owl::MAX_CARDINALITY,
        owl::MAX_QUALIFIED_CARDINALITY,
        owl::SOME_VALUES_FROM,
        owl::ALL_VALUES_FROM,
        owl::HAS_VALUE,
        owl::HAS_SELF,
        owl::INTERSECTION_OF,
        owl::UNION_OF,
        owl::COMPLEMENT_OF,
        owl::ONE_OF,
        owl::SOURCE_INDIVIDUAL,
        owl::ASSERTION_PROPERTY,
        owl::TARGET_INDIVIDUAL,
        owl::TARGET_VALUE,
    ];
    triples.extend(properties.iter().map(|p| axiom(p, rdf::TYPE, rdf::PROPERTY)));

    triples
}

/// `(rdf:type, rdf:Property)` — the single one-time RDF axiom both regimes
/// share ahead of the RDFS-specific table above.
pub fn rdf_axiomatic_triples() -> Vec<Triple> {
    vec![axiom(rdf::TYPE, rdf::TYPE, rdf::PROPERTY)]
}

/// The datatype subsumption lattice expressed as `rdfs:subClassOf` triples
/// (`RDFS_D_Axiomatic_Triples_subclasses` in the original), plus the two
/// entries the dict-shaped lattice in [`crate::datatypes`] leaves implicit:
/// `xsd:decimal rdfs:subClassOf rdfs:Literal` and
/// `xsd:dateTimeStamp rdfs:subClassOf xsd:dateTime`.
pub fn datatype_subclass_axioms() -> Vec<Triple> {
    let mut triples = vec![
        axiom(xsd::DECIMAL, rdfs::SUB_CLASS_OF, rdfs::LITERAL),
        axiom(xsd::DATE_TIME_STAMP, rdfs::SUB_CLASS_OF, xsd::DATE_TIME),
    ];
    for dt in crate::datatypes::RDFS_DATATYPES {
        triples.push(axiom(dt, rdf::TYPE, rdfs::DATATYPE));
        for super_dt in crate::datatypes::supertypes(dt) {
            triples.push(axiom(dt, rdfs::SUB_CLASS_OF, super_dt));
        }
    }
    triples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rdfs_axioms_include_type_domain() {
        let triples = rdfs_axiomatic_triples();
        assert!(triples.contains(&axiom(rdf::TYPE, rdfs::DOMAIN, rdfs::RESOURCE)));
    }

    #[test]
    fn datatype_subclass_axioms_include_byte_chain() {
        let triples = datatype_subclass_axioms();
        assert!(triples.contains(&axiom(xsd::BYTE, rdfs::SUB_CLASS_OF, xsd::INTEGER)));
    }

    #[test]
    fn datatype_subclass_axioms_type_every_datatype() {
        let triples = datatype_subclass_axioms();
        assert!(triples.contains(&axiom(xsd::INTEGER, rdf::TYPE, rdfs::DATATYPE)));
        assert!(triples.contains(&axiom(xsd::INT, rdfs::SUB_CLASS_OF, xsd::LONG)));
    }

    #[test]
    fn owl_axioms_include_restriction_domain_range() {
        let triples = owl_axiomatic_triples();
        assert!(triples.contains(&axiom(owl::ON_PROPERTY, rdfs::DOMAIN, owl::RESTRICTION)));
        assert!(triples.contains(&axiom(owl::ON_PROPERTY, rdfs::RANGE, rdf::PROPERTY)));
        assert!(triples.contains(&axiom(owl::SAME_AS, rdf::TYPE, rdf::PROPERTY)));
    }

    #[test]
    fn owl_axioms_include_negative_property_assertion_vocabulary() {
        let triples = owl_axiomatic_triples();
        assert!(triples.contains(&axiom(owl::SOURCE_INDIVIDUAL, rdfs::DOMAIN, owl::NEGATIVE_PROPERTY_ASSERTION)));
        assert!(triples.contains(&axiom(owl::NEGATIVE_PROPERTY_ASSERTION, rdf::TYPE, rdfs::CLASS)));
    }
}
