//! End-to-end tests for the three hierarchy operations.
//!
//! These exercise the full pipeline — document I/O, materialization, the
//! structural oracle, and the in-place transforms — and check the properties
//! the operations guarantee: REDUCE soundness and idempotence, RELAX
//! entailment of everything it adds, MINIMIZE connectivity preservation.

use std::collections::BTreeSet;

use ontoprune::expr::{ClassExpression, Iri};
use ontoprune::io::{load_ontology, save_ontology};
use ontoprune::minimize::minimize;
use ontoprune::ontology::{Annotation, EquivalentClassesAxiom, Ontology, SubClassOfAxiom};
use ontoprune::reasoner::{Reasoner, StructuralReasoner, StructuralReasonerFactory};
use ontoprune::reduce::{ReduceOptions, reduce};
use ontoprune::relax::relax;

fn cls(name: &str) -> ClassExpression {
    ClassExpression::class(name)
}

fn iri(name: &str) -> Iri {
    Iri::new(name)
}

fn sub(a: &str, b: &str) -> SubClassOfAxiom {
    SubClassOfAxiom::new(cls(a), cls(b))
}

/// A mid-sized hierarchy with redundant shortcuts at several depths.
fn shortcut_heavy_ontology() -> Ontology {
    let mut ont = Ontology::new();
    // Chain with shortcuts.
    for (a, b) in [
        ("Neuron", "Cell"),
        ("Cell", "AnatomicalEntity"),
        ("AnatomicalEntity", "MaterialEntity"),
        ("Neuron", "AnatomicalEntity"),   // redundant
        ("Neuron", "MaterialEntity"),     // redundant
        ("Cell", "MaterialEntity"),       // redundant
        ("Astrocyte", "Cell"),
        ("Astrocyte", "MaterialEntity"),  // redundant
    ] {
        ont.add_subclass_axiom(sub(a, b));
    }
    // A GCI and an existential superclass.
    ont.add_subclass_axiom(SubClassOfAxiom::new(
        cls("Neuron"),
        ClassExpression::some("part-of", cls("NervousSystem")),
    ));
    ont
}

/// Named-class subsumption closure as computed by the structural oracle.
fn named_closure(ont: &Ontology) -> BTreeSet<(Iri, Iri)> {
    let reasoner = StructuralReasoner::new(ont);
    let mut closure = BTreeSet::new();
    for class in ont.class_signature() {
        for sup in reasoner.super_classes(&class, false).unwrap() {
            closure.insert((class.clone(), sup));
        }
    }
    closure
}

// ---------------------------------------------------------------------------
// REDUCE
// ---------------------------------------------------------------------------

#[test]
fn reduce_removes_exactly_the_shortcuts() {
    let mut ont = shortcut_heavy_ontology();
    let report = reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default())
        .unwrap();

    assert_eq!(report.removed, 4);
    assert!(!ont.subclass_axioms().any(|a| *a == sub("Neuron", "MaterialEntity")));
    assert!(ont.subclass_axioms().any(|a| *a == sub("Neuron", "Cell")));
}

#[test]
fn reduce_preserves_the_subsumption_closure() {
    let mut ont = shortcut_heavy_ontology();
    let before = named_closure(&ont);

    reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default()).unwrap();

    assert_eq!(named_closure(&ont), before);
}

#[test]
fn reduce_twice_removes_nothing_more() {
    let mut ont = shortcut_heavy_ontology();
    reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default()).unwrap();
    let after_first: usize = ont.subclass_axiom_count();

    let second = reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default())
        .unwrap();
    assert_eq!(second.removed, 0);
    assert_eq!(ont.subclass_axiom_count(), after_first);
}

#[test]
fn reduce_keeps_annotated_axioms_verbatim() {
    let mut ont = Ontology::new();
    ont.add_subclass_axiom(sub("A", "B"));
    ont.add_subclass_axiom(sub("B", "C"));
    let protected = sub("A", "C")
        .with_annotation(Annotation::new("oio:source", "curator decision, 2019-04"));
    ont.add_subclass_axiom(protected.clone());

    reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default()).unwrap();

    let kept: Vec<_> = ont.subclass_axioms().filter(|a| **a == protected).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].annotations, protected.annotations);
}

#[test]
fn reduce_aborts_cleanly_on_inconsistency() {
    let mut ont = Ontology::new();
    ont.add_subclass_axiom(sub("A", "B"));
    ont.add_subclass_axiom(sub("B", "C"));
    ont.add_subclass_axiom(sub("A", "C"));
    ont.add_equivalence_axiom(
        EquivalentClassesAxiom::new([
            ClassExpression::class(Iri::owl_thing()),
            ClassExpression::class(Iri::owl_nothing()),
        ])
        .unwrap(),
    );
    // Anonymous endpoint, so a temporary materialization axiom gets injected.
    ont.add_subclass_axiom(SubClassOfAxiom::new(
        cls("A"),
        ClassExpression::some("P", cls("X")),
    ));
    let subclass_before = ont.subclass_axiom_count();
    let equivalence_before = ont.equivalence_axiom_count();

    let err = reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        ontoprune::error::ReduceError::OntologyInconsistent
    ));
    assert_eq!(ont.subclass_axiom_count(), subclass_before);
    // The temporaries were withdrawn even on the abort path.
    assert_eq!(ont.equivalence_axiom_count(), equivalence_before);
}

// ---------------------------------------------------------------------------
// RELAX
// ---------------------------------------------------------------------------

#[test]
fn relax_adds_only_oracle_entailed_axioms() {
    let mut ont = Ontology::new();
    ont.add_equivalence_axiom(
        EquivalentClassesAxiom::new([
            cls("Hand"),
            ClassExpression::intersection([
                cls("Appendage"),
                ClassExpression::some("part-of", cls("Forelimb")),
            ]),
        ])
        .unwrap(),
    );

    let before: Vec<SubClassOfAxiom> = ont.subclass_axioms().cloned().collect();
    let report = relax(&mut ont);
    assert_eq!(report.added, 2);

    // Every added axiom is entailed by the equivalence it came from.
    let reasoner = StructuralReasoner::new(&ont);
    for ax in ont.subclass_axioms().filter(|a| !before.contains(a)) {
        let sub_name = ax.sub.as_named().expect("relax subjects are named");
        if let Some(sup_name) = ax.sup.as_named() {
            assert!(
                reasoner.is_super_class_of(sup_name, sub_name, false).unwrap(),
                "{ax} is not entailed"
            );
        }
    }
    assert!(ont.subclass_axioms().any(|a| {
        *a == SubClassOfAxiom::new(
            cls("Hand"),
            ClassExpression::some("part-of", cls("Forelimb")),
        )
    }));
    assert!(ont.subclass_axioms().any(|a| *a == sub("Hand", "Appendage")));
}

#[test]
fn relax_then_reduce_leaves_a_minimal_existential_graph() {
    // The usual pipeline: relax equivalences into subsumptions, then strip
    // whatever the asserted graph already entails.
    let mut ont = Ontology::new();
    ont.add_subclass_axiom(sub("Hand", "Appendage"));
    ont.add_equivalence_axiom(
        EquivalentClassesAxiom::new([
            cls("Hand"),
            ClassExpression::intersection([
                cls("Appendage"),
                ClassExpression::some("part-of", cls("Forelimb")),
            ]),
        ])
        .unwrap(),
    );

    let relax_report = relax(&mut ont);
    assert_eq!(relax_report.added, 1); // Hand ⊑ Appendage was already asserted

    let reduce_report =
        reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default()).unwrap();
    // Nothing redundant: the existential superclass is not entailed by
    // Appendage alone.
    assert_eq!(reduce_report.removed, 0);
}

// ---------------------------------------------------------------------------
// MINIMIZE
// ---------------------------------------------------------------------------

/// owl:Thing <- Organ <- {Lobe} <- {L1..L4}, plus Organ <- {O1..O4}.
fn organ_hierarchy() -> Ontology {
    let mut ont = Ontology::new();
    ont.add_subclass_axiom(SubClassOfAxiom::new(
        cls("Organ"),
        ClassExpression::class(Iri::owl_thing()),
    ));
    ont.add_subclass_axiom(sub("Lobe", "Organ"));
    for i in 1..=4 {
        ont.add_subclass_axiom(sub(&format!("L{i}"), "Lobe"));
        ont.add_subclass_axiom(sub(&format!("O{i}"), "Organ"));
    }
    ont
}

#[test]
fn minimize_preserves_precious_and_reachability() {
    let reference = organ_hierarchy();
    let closure_before = named_closure(&reference);

    let mut ont = organ_hierarchy();
    let report = minimize(&mut ont, 5, &BTreeSet::new());

    // Lobe had 4 children (< 5) and goes; Organ ends up with 8 and stays.
    assert_eq!(report.removed_classes, 1);
    let sig = ont.class_signature();
    assert!(!sig.contains(&iri("Lobe")));
    assert!(sig.contains(&iri("Organ")));

    // Connectivity: every surviving before-pair still holds afterwards.
    let closure_after = named_closure(&ont);
    for (sub_c, sup_c) in &closure_before {
        if sig.contains(sub_c) && sig.contains(sup_c) {
            assert!(
                closure_after.contains(&(sub_c.clone(), sup_c.clone())),
                "{sub_c} lost ancestor {sup_c}"
            );
        }
    }

    // Precious keeps Lobe alive on an otherwise identical run.
    let mut ont = organ_hierarchy();
    let precious = BTreeSet::from([iri("Lobe")]);
    let report = minimize(&mut ont, 5, &precious);
    assert_eq!(report.removed_classes, 0);
}

#[test]
fn minimize_terminates_and_keeps_leaves() {
    let mut ont = organ_hierarchy();
    // Absurdly high threshold: everything intermediate collapses, leaves stay.
    let report = minimize(&mut ont, 1000, &BTreeSet::new());
    assert!(report.passes <= 10);

    let sig = ont.class_signature();
    for i in 1..=4 {
        assert!(sig.contains(&iri(&format!("L{i}"))));
        assert!(sig.contains(&iri(&format!("O{i}"))));
    }
    assert!(!sig.contains(&iri("Organ")));
    assert!(!sig.contains(&iri("Lobe")));
}

// ---------------------------------------------------------------------------
// Document round trip
// ---------------------------------------------------------------------------

#[test]
fn pipeline_through_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");

    let mut ont = shortcut_heavy_ontology();
    save_ontology(&input, &ont).unwrap();

    let mut loaded = load_ontology(&input).unwrap();
    let report = reduce(&mut loaded, &StructuralReasonerFactory, &ReduceOptions::default())
        .unwrap();
    save_ontology(&output, &loaded).unwrap();

    let reloaded = load_ontology(&output).unwrap();
    assert_eq!(
        reloaded.subclass_axiom_count(),
        ont.subclass_axiom_count() - report.removed
    );
    // In-memory and file-round-tripped reductions agree.
    reduce(&mut ont, &StructuralReasonerFactory, &ReduceOptions::default()).unwrap();
    assert_eq!(named_closure(&reloaded), named_closure(&ont));
}
