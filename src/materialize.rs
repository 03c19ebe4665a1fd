//! Temporary naming of anonymous class expressions.
//!
//! Reasoners only answer queries about named classes, so before REDUCE can
//! ask about a compound expression it gives the expression a synthetic name
//! and injects a temporary `EquivalentClasses(name, expression)` axiom. The
//! [`Materializer`] owns every axiom it injects and removes all of them in
//! [`Materializer::release`] — a scoped-resource contract the caller honors
//! on every exit path, including the inconsistency abort.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::expr::{ClassExpression, Iri};
use crate::ontology::{EquivalentClassesAxiom, Ontology};

/// Process-scoped map from anonymous expression to synthetic named class.
///
/// Lookups are by structural equality, so repeated calls with independently
/// constructed but identical expressions return the same synthetic name.
#[derive(Debug)]
pub struct Materializer {
    /// Named signature snapshot plus every synthetic name handed out, for
    /// collision checks.
    taken: HashSet<Iri>,
    map: HashMap<ClassExpression, Iri>,
    injected: Vec<EquivalentClassesAxiom>,
}

impl Materializer {
    /// Create a materializer; snapshots the ontology's current named
    /// signature so fresh synthetic names can never collide with it.
    pub fn new(ontology: &Ontology) -> Self {
        Materializer {
            taken: ontology.class_signature().into_iter().collect(),
            map: HashMap::new(),
            injected: Vec::new(),
        }
    }

    /// Map an expression to a named class the oracle can be queried about.
    ///
    /// Named expressions map to themselves and inject nothing. An anonymous
    /// expression gets a fresh `urn:uuid:` name on first sight, backed by a
    /// temporary equivalence axiom added to the ontology; later calls with a
    /// structurally equal expression reuse it.
    pub fn materialize(&mut self, ontology: &mut Ontology, expr: &ClassExpression) -> Iri {
        if let Some(named) = expr.as_named() {
            return named.clone();
        }
        if let Some(existing) = self.map.get(expr) {
            return existing.clone();
        }

        let synthetic = loop {
            let candidate = Iri::new(format!("urn:uuid:{}", Uuid::new_v4()));
            if !self.taken.contains(&candidate) {
                break candidate;
            }
        };
        debug!("{synthetic} ==> {expr}");

        let axiom = EquivalentClassesAxiom::pair(
            ClassExpression::Class(synthetic.clone()),
            expr.clone(),
        );
        ontology.add_equivalence_axiom(axiom.clone());
        self.injected.push(axiom);
        self.taken.insert(synthetic.clone());
        self.map.insert(expr.clone(), synthetic.clone());
        synthetic
    }

    /// The synthetic (or identity) name for an already-materialized
    /// expression, without injecting anything.
    pub fn resolve(&self, expr: &ClassExpression) -> Option<Iri> {
        if let Some(named) = expr.as_named() {
            return Some(named.clone());
        }
        self.map.get(expr).cloned()
    }

    /// Number of temporary equivalence axioms currently injected.
    pub fn temporary_count(&self) -> usize {
        self.injected.len()
    }

    /// Remove every injected temporary equivalence axiom from the ontology.
    /// Returns the number removed. Idempotent.
    pub fn release(&mut self, ontology: &mut Ontology) -> usize {
        let mut removed = 0;
        for axiom in self.injected.drain(..) {
            if ontology.remove_equivalence_axiom(&axiom) {
                removed += 1;
            }
        }
        removed
    }
}
