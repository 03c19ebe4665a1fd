//! The subsumption oracle interface and its structural implementation.
//!
//! The toolkit's algorithms never classify anything themselves: they ask a
//! [`Reasoner`] whether one named class subsumes another, whether the ontology
//! is consistent, and which named classes are unsatisfiable. Description-logic
//! backends are external collaborators behind this trait; the bundled
//! [`StructuralReasoner`] answers from the asserted transitive closure and is
//! what the CLI and the test suite use.
//!
//! Reasoners are constructed through a [`ReasonerFactory`] passed into each
//! operation call — there is no process-wide factory singleton.

pub mod structural;

use std::collections::BTreeSet;

pub use structural::{StructuralReasoner, StructuralReasonerFactory};

use crate::error::ReasonerError;
use crate::expr::Iri;
use crate::ontology::Ontology;

/// A subsumption oracle over the named classes of one ontology.
///
/// All queries take `&self`; implementations must be safe for concurrent
/// reads once constructed, since REDUCE fans its per-axiom redundancy tests
/// out across threads.
pub trait Reasoner: Send + Sync {
    /// Is the ontology consistent?
    fn is_consistent(&self) -> Result<bool, ReasonerError>;

    /// Named classes equivalent to the bottom class, `owl:Nothing` excluded.
    fn unsatisfiable_classes(&self) -> Result<BTreeSet<Iri>, ReasonerError>;

    /// Strict named superclasses of `class`: every named class above it
    /// (transitively if `direct` is false), equivalents excluded.
    fn super_classes(&self, class: &Iri, direct: bool) -> Result<BTreeSet<Iri>, ReasonerError>;

    /// Whether this backend answers entailment queries natively.
    ///
    /// Backends that do should override [`Reasoner::is_super_class_of`] with
    /// the native check; the default composes it from [`Reasoner::super_classes`].
    fn supports_direct_entailment(&self) -> bool {
        false
    }

    /// Is `candidate` a (strict) superclass of `class`?
    fn is_super_class_of(
        &self,
        candidate: &Iri,
        class: &Iri,
        direct: bool,
    ) -> Result<bool, ReasonerError> {
        Ok(self.super_classes(class, direct)?.contains(candidate))
    }
}

/// Constructs a [`Reasoner`] over an ontology's current asserted axioms.
pub trait ReasonerFactory {
    /// The reasoner type this factory produces.
    type Reasoner: Reasoner;

    /// Build a reasoner over a snapshot of the ontology's asserted axioms.
    fn create(&self, ontology: &Ontology) -> Result<Self::Reasoner, ReasonerError>;
}
