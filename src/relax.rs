//! RELAX: rewrite equivalence axioms into the weaker subsumptions they entail.
//!
//! Viewing an ontology as an existential graph of `SubClassOf` edges is only
//! complete if everything an equivalence axiom entails at the graph level is
//! also asserted as a subsumption. For every equivalence between a single
//! named class `C` and one or more compound expressions, this pass adds
//! `C SubClassOf E` for each existential restriction `E` reachable by
//! descending through intersection operands, and `C SubClassOf N` for each
//! named class `N` reachable the same way. A qualified cardinality
//! restriction with cardinality > 0 is weakened to the corresponding
//! existential.
//!
//! Purely structural; no reasoner is consulted. Unions, complements, and
//! restriction fillers are deliberately not descended into, which keeps every
//! produced axiom a sound EL-safe consequence of its source equivalence.
//! Nothing is removed, and because the axiom store has set semantics the pass
//! is idempotent.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::expr::ClassExpression;
use crate::ontology::{Ontology, SubClassOfAxiom};

/// What happened during one [`relax`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct RelaxReport {
    /// Subsumption axioms newly added.
    pub added: usize,
}

/// Add the subsumption axioms structurally entailed by equivalence axioms.
pub fn relax(ontology: &mut Ontology) -> RelaxReport {
    let mut new_axioms: HashSet<SubClassOfAxiom> = HashSet::new();

    for eq in ontology.equivalence_axioms() {
        let mut named = eq.expressions().filter_map(ClassExpression::as_named);
        let (Some(class), None) = (named.next(), named.next()) else {
            // Zero or several named members: not the shape this pass weakens.
            continue;
        };

        for member in eq.expressions().filter(|x| x.is_anonymous()) {
            for existential in member.conjunct_existentials() {
                new_axioms.insert(SubClassOfAxiom::new(
                    ClassExpression::Class(class.clone()),
                    existential,
                ));
            }
            for conjunct in member.conjunct_named() {
                if conjunct == *class {
                    debug!("skipping trivial {class} SubClassOf {class}");
                    continue;
                }
                new_axioms.insert(SubClassOfAxiom::new(
                    ClassExpression::Class(class.clone()),
                    ClassExpression::Class(conjunct),
                ));
            }
        }
    }

    let mut report = RelaxReport::default();
    for axiom in new_axioms {
        if ontology.add_subclass_axiom(axiom.clone()) {
            info!("new: {axiom}");
            report.added += 1;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Iri;
    use crate::ontology::EquivalentClassesAxiom;

    fn cls(name: &str) -> ClassExpression {
        ClassExpression::class(name)
    }

    fn contains(ont: &Ontology, sub: ClassExpression, sup: ClassExpression) -> bool {
        let ax = SubClassOfAxiom::new(sub, sup);
        ont.subclass_axioms().any(|a| *a == ax)
    }

    #[test]
    fn intersection_of_existential_and_named() {
        // EquivalentClasses(A, (P some X) and B)
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([
                cls("A"),
                ClassExpression::intersection([ClassExpression::some("P", cls("X")), cls("B")]),
            ])
            .unwrap(),
        );

        let report = relax(&mut ont);

        assert_eq!(report.added, 2);
        assert!(contains(&ont, cls("A"), ClassExpression::some("P", cls("X"))));
        assert!(contains(&ont, cls("A"), cls("B")));
    }

    #[test]
    fn bare_existential_member() {
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([cls("A"), ClassExpression::some("P", cls("X"))])
                .unwrap(),
        );

        let report = relax(&mut ont);
        assert_eq!(report.added, 1);
        assert!(contains(&ont, cls("A"), ClassExpression::some("P", cls("X"))));
    }

    #[test]
    fn cardinality_weakens_to_existential() {
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([
                cls("A"),
                ClassExpression::intersection([
                    cls("B"),
                    ClassExpression::MinCardinality {
                        n: 2,
                        property: Iri::new("P"),
                        filler: Box::new(cls("X")),
                    },
                ]),
            ])
            .unwrap(),
        );

        relax(&mut ont);
        assert!(contains(&ont, cls("A"), ClassExpression::some("P", cls("X"))));
    }

    #[test]
    fn several_named_members_are_left_alone() {
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([cls("A"), cls("B")]).unwrap(),
        );

        let report = relax(&mut ont);
        assert_eq!(report.added, 0);
        assert_eq!(ont.subclass_axiom_count(), 0);
    }

    #[test]
    fn union_members_produce_nothing() {
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([
                cls("A"),
                ClassExpression::union([cls("B"), ClassExpression::some("P", cls("X"))]),
            ])
            .unwrap(),
        );

        let report = relax(&mut ont);
        assert_eq!(report.added, 0);
    }

    #[test]
    fn relax_is_idempotent() {
        let mut ont = Ontology::new();
        ont.add_equivalence_axiom(
            EquivalentClassesAxiom::new([
                cls("A"),
                ClassExpression::intersection([ClassExpression::some("P", cls("X")), cls("B")]),
            ])
            .unwrap(),
        );

        let first = relax(&mut ont);
        assert_eq!(first.added, 2);
        let second = relax(&mut ont);
        assert_eq!(second.added, 0);
        assert_eq!(ont.subclass_axiom_count(), 2);
    }
}
