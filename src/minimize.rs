//! MINIMIZE: collapse a class hierarchy under a child-count threshold.
//!
//! An intermediate class with fewer named children than the threshold is
//! removed and its children spliced up to the next surviving level. Removal
//! runs to a fixpoint: splicing can leave a survivor with fewer children than
//! it had before, making it eligible on the next pass.
//!
//! Never removed: the top class, leaves (a class with zero named children),
//! classes placed only under anonymous or no superclasses, classes named in
//! the precious set, and classes with a protected (annotated) incident
//! axiom.
//!
//! Gap-spanning works from an immutable snapshot taken before the first
//! removal: for every surviving class, its superclass chains in the snapshot
//! are walked upward, skipping over removed classes, and a direct edge to
//! each nearest surviving ancestor is re-asserted. Anonymous superclasses
//! are re-asserted only when their entire class signature survived.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use crate::expr::{ClassExpression, Iri};
use crate::ontology::{Ontology, SubClassOfAxiom};

/// What happened during one [`minimize`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MinimizeReport {
    /// Fixpoint passes executed.
    pub passes: usize,
    /// Named classes removed from the hierarchy.
    pub removed_classes: usize,
    /// Gap-spanning axioms added.
    pub spanned_axioms: usize,
}

/// Minimize the ontology's class hierarchy in place.
///
/// `threshold` is the minimum number of named children an intermediate class
/// must have to survive; classes in `precious` are never removed.
pub fn minimize(
    ontology: &mut Ontology,
    threshold: usize,
    precious: &BTreeSet<Iri>,
) -> MinimizeReport {
    // Reference snapshot for gap-spanning, taken before any removal.
    let reference = ontology.clone();
    debug!(
        "classes before minimizing: {}",
        ontology.class_signature().len()
    );

    let mut report = MinimizeReport::default();
    let mut removed: BTreeSet<Iri> = BTreeSet::new();

    loop {
        let to_remove = classes_to_remove(ontology, threshold, precious, &removed);
        if to_remove.is_empty() {
            break;
        }
        report.passes += 1;
        info!(
            "pass {}: removing {} classes",
            report.passes,
            to_remove.len()
        );

        for class in &to_remove {
            for axiom in ontology.subclass_axioms_touching(class) {
                // Eligibility already excluded classes with protected
                // incident axioms; keep the guard anyway.
                if axiom.is_protected() {
                    continue;
                }
                ontology.remove_subclass_axiom(&axiom);
            }
        }
        removed.extend(to_remove);

        // Re-assert the edges that keep every survivor's ancestors reachable.
        let surviving: BTreeSet<Iri> = reference
            .class_signature()
            .into_iter()
            .filter(|c| !removed.contains(c))
            .collect();
        for axiom in span_gaps(&reference, &surviving) {
            if ontology.add_subclass_axiom(axiom) {
                report.spanned_axioms += 1;
            }
        }
    }

    report.removed_classes = removed.len();
    debug!(
        "classes after minimizing: {}",
        ontology.class_signature().len()
    );
    report
}

/// Classes eligible for removal in the current pass.
fn classes_to_remove(
    ontology: &Ontology,
    threshold: usize,
    precious: &BTreeSet<Iri>,
    already_removed: &BTreeSet<Iri>,
) -> BTreeSet<Iri> {
    let mut remove = BTreeSet::new();
    for class in ontology.class_signature() {
        if class.is_owl_thing() || precious.contains(&class) || already_removed.contains(&class) {
            continue;
        }
        // Classes placed only under top (no named superclass) are exempt.
        if !ontology.has_named_superclass(&class) {
            continue;
        }
        let child_count = ontology.named_subclass_count(&class);
        // Leaves (count 0) are exempt by construction; do not "simplify"
        // this to `child_count < threshold`.
        if child_count != 0 && child_count < threshold {
            if ontology
                .subclass_axioms_touching(&class)
                .iter()
                .any(SubClassOfAxiom::is_protected)
            {
                debug!("not removing {class}: it has a protected incident axiom");
                continue;
            }
            remove.insert(class);
        }
    }
    remove
}

/// Subsumption axioms that reconnect every surviving class to its nearest
/// surviving ancestors, computed from the reference snapshot.
fn span_gaps(reference: &Ontology, surviving: &BTreeSet<Iri>) -> HashSet<SubClassOfAxiom> {
    let mut pairs: HashSet<(Iri, ClassExpression)> = HashSet::new();
    for class in surviving {
        let supers: Vec<ClassExpression> = reference
            .direct_superclasses_of(class)
            .into_iter()
            .cloned()
            .collect();
        span_gaps_walk(reference, surviving, &mut pairs, class, &supers);
    }
    pairs
        .into_iter()
        .map(|(sub, sup)| SubClassOfAxiom::new(ClassExpression::Class(sub), sup))
        .collect()
}

/// Walk one class's superclass chains in the snapshot, recording an edge for
/// each nearest surviving superclass and recursing upward from it. A removed
/// named superclass is skipped over: the walk continues from its own
/// superclasses with the same subject.
fn span_gaps_walk(
    reference: &Ontology,
    surviving: &BTreeSet<Iri>,
    pairs: &mut HashSet<(Iri, ClassExpression)>,
    class: &Iri,
    supers: &[ClassExpression],
) {
    for sup in supers {
        let mut signature = BTreeSet::new();
        sup.class_signature(&mut signature);
        if signature.iter().all(|c| surviving.contains(c)) {
            if pairs.insert((class.clone(), sup.clone())) {
                // Recurse only on first sight of the pair.
                if let Some(named) = sup.as_named() {
                    let next: Vec<ClassExpression> = reference
                        .direct_superclasses_of(named)
                        .into_iter()
                        .cloned()
                        .collect();
                    span_gaps_walk(reference, surviving, pairs, named, &next);
                }
            }
        } else if let Some(named) = sup.as_named() {
            // Removed named superclass: skip over it.
            let next: Vec<ClassExpression> = reference
                .direct_superclasses_of(named)
                .into_iter()
                .cloned()
                .collect();
            span_gaps_walk(reference, surviving, pairs, class, &next);
        }
    }
}
