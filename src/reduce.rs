//! REDUCE: remove redundant subsumption axioms.
//!
//! Every asserted axiom `C SubClassOf D` is tested against the oracle: if
//! some other asserted direct superclass `E` of `C` already has `D` among its
//! (possibly indirect) superclasses, the asserted `C SubClassOf D` adds
//! nothing to the transitive closure and is removed. Anonymous endpoints are
//! materialized to synthetic named classes first so the oracle can be asked
//! about them, and the temporary equivalence axioms are withdrawn again
//! before anything is removed.
//!
//! General class inclusions get one extra chance to be found redundant: when
//! the subject itself is anonymous, its *inferred* superclasses are consulted
//! as intermediate parents. This catches chains like
//!
//! ```text
//! (hand and part-of some human) SubClassOf part-of some forelimb
//! hand SubClassOf part-of some forelimb
//! ```
//!
//! where the first axiom is redundant through `hand`, even though no asserted
//! subsumption links the GCI subject to it. Only one level of intermediate
//! parent is consulted, deliberately.
//!
//! Annotated axioms are protected and never evaluated.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::ReduceError;
use crate::expr::Iri;
use crate::materialize::Materializer;
use crate::ontology::{Ontology, SubClassOfAxiom};
use crate::reasoner::{Reasoner, ReasonerFactory};

/// Options for [`reduce`].
#[derive(Debug, Clone)]
pub struct ReduceOptions {
    /// Maximum number of unsatisfiable classes to name individually in the
    /// warning log; beyond that only the count is reported.
    pub unsat_warning_cap: usize,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        ReduceOptions {
            unsat_warning_cap: 10,
        }
    }
}

/// What happened during one [`reduce`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReduceReport {
    /// Axioms evaluated for redundancy.
    pub tested: usize,
    /// Axioms skipped because they carry annotations.
    pub protected: usize,
    /// Axioms removed.
    pub removed: usize,
}

/// Per-axiom outcome of the redundancy test.
enum Verdict {
    Kept,
    Protected,
    Redundant,
}

/// Remove every redundant subsumption axiom from the ontology.
///
/// Mutates the ontology in place. On an inconsistent ontology nothing is
/// removed and [`ReduceError::OntologyInconsistent`] is returned; oracle
/// query failures abort the run the same way. In every case — success,
/// inconsistency, query failure — the temporary materialization axioms are
/// withdrawn before returning.
pub fn reduce<F: ReasonerFactory>(
    ontology: &mut Ontology,
    factory: &F,
    options: &ReduceOptions,
) -> Result<ReduceReport, ReduceError> {
    let asserted: Vec<SubClassOfAxiom> = ontology.subclass_axioms().cloned().collect();

    // Build phase: name both endpoints of every axiom and index each
    // subject's asserted direct superclasses under the materialized names.
    let mut materializer = Materializer::new(ontology);
    let mut endpoints: Vec<(Iri, Iri)> = Vec::with_capacity(asserted.len());
    let mut adjacency: HashMap<Iri, BTreeSet<Iri>> = HashMap::new();
    for ax in &asserted {
        let sub = materializer.materialize(ontology, &ax.sub);
        let sup = materializer.materialize(ontology, &ax.sup);
        adjacency.entry(sub.clone()).or_default().insert(sup.clone());
        endpoints.push((sub, sup));
    }

    // Everything that needs the oracle runs against the materialized
    // ontology; the temporaries are released no matter how it exits.
    let outcome = test_axioms(
        ontology,
        factory,
        options,
        &asserted,
        &endpoints,
        &adjacency,
    );
    let released = materializer.release(ontology);
    debug!("released {released} temporary equivalence axioms");
    let verdicts = outcome?;

    // Commit phase.
    let mut report = ReduceReport::default();
    for (ax, verdict) in asserted.iter().zip(verdicts) {
        match verdict {
            Verdict::Protected => report.protected += 1,
            Verdict::Kept => report.tested += 1,
            Verdict::Redundant => {
                report.tested += 1;
                info!("removing redundant axiom: {ax}");
                ontology.remove_subclass_axiom(ax);
                report.removed += 1;
            }
        }
    }
    info!(
        "reduce: tested {}, protected {}, removed {}",
        report.tested, report.protected, report.removed
    );
    Ok(report)
}

fn test_axioms<F: ReasonerFactory>(
    ontology: &Ontology,
    factory: &F,
    options: &ReduceOptions,
    asserted: &[SubClassOfAxiom],
    endpoints: &[(Iri, Iri)],
    adjacency: &HashMap<Iri, BTreeSet<Iri>>,
) -> Result<Vec<Verdict>, ReduceError> {
    let reasoner = factory.create(ontology)?;

    // Consistency gate: under inconsistency everything is entailed and the
    // redundancy test would remove arbitrary axioms.
    if !reasoner.is_consistent()? {
        warn!("ontology is not consistent; leaving axioms untouched");
        return Err(ReduceError::OntologyInconsistent);
    }

    // Unsatisfiable classes are suspicious but not fatal.
    let unsatisfiable = reasoner.unsatisfiable_classes()?;
    if !unsatisfiable.is_empty() {
        warn!(
            "there are {} unsatisfiable classes in the ontology",
            unsatisfiable.len()
        );
        for class in unsatisfiable.iter().take(options.unsat_warning_cap) {
            warn!("    unsatisfiable: {class}");
        }
        if unsatisfiable.len() > options.unsat_warning_cap {
            warn!(
                "    ... and {} more",
                unsatisfiable.len() - options.unsat_warning_cap
            );
        }
    }

    // The tests are independent read-only oracle queries, so they fan out.
    asserted
        .par_iter()
        .zip(endpoints.par_iter())
        .map(|(ax, (sub, sup))| test_one(&reasoner, adjacency, ax, sub, sup))
        .collect::<Result<Vec<Verdict>, ReduceError>>()
}

fn test_one<R: Reasoner>(
    reasoner: &R,
    adjacency: &HashMap<Iri, BTreeSet<Iri>>,
    ax: &SubClassOfAxiom,
    sub: &Iri,
    sup: &Iri,
) -> Result<Verdict, ReduceError> {
    if ax.is_protected() {
        debug!("protecting annotated axiom: {ax}");
        return Ok(Verdict::Protected);
    }
    debug!("testing: {ax}");

    let Some(asserted_supers) = adjacency.get(sub) else {
        // Cannot happen: the build phase indexed every subject. Skip rather
        // than crash if it somehow does.
        debug!("no adjacency entry for {sub}; skipping {ax}");
        return Ok(Verdict::Kept);
    };

    // Redundant if some asserted direct superclass of the subject already
    // lies below the axiom's superclass.
    for asserted_super in asserted_supers {
        if reasoner.is_super_class_of(sup, asserted_super, false)? {
            debug!("redundant via asserted superclass {asserted_super}: {ax}");
            return Ok(Verdict::Redundant);
        }
    }

    // GCI extension: an anonymous subject may reach the superclass through
    // an inferred intermediate parent that itself has asserted superclasses.
    // Depth one only.
    if ax.is_gci() {
        debug!("GCI subject: {}", ax.sub);
        for intermediate in reasoner.super_classes(sub, false)? {
            if adjacency.contains_key(&intermediate)
                && reasoner.is_super_class_of(sup, &intermediate, false)?
            {
                debug!("redundant via intermediate parent {intermediate}: {ax}");
                return Ok(Verdict::Redundant);
            }
        }
    }

    Ok(Verdict::Kept)
}
