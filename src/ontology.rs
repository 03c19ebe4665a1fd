//! The axiom store: subsumption and equivalence axioms with set semantics.
//!
//! An [`Ontology`] holds the mutable working set of asserted axioms that the
//! REDUCE / RELAX / MINIMIZE operations manipulate. Axioms are sets keyed by
//! full structural identity (annotations included), so adding a duplicate is a
//! no-op and removal is by value. Derived queries (signature, direct
//! super/subclasses) are recomputed from the current axiom set; callers that
//! need a stable view take a [`Clone`] snapshot.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OntologyError;
use crate::expr::{ClassExpression, Iri};

/// An annotation attached to an axiom (provenance comment, editor note, ...).
///
/// Any annotation marks its axiom as *protected*: REDUCE and MINIMIZE must
/// never remove it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation property IRI.
    pub property: Iri,
    /// The literal value.
    pub value: String,
}

impl Annotation {
    /// Create an annotation.
    pub fn new(property: impl Into<Iri>, value: impl Into<String>) -> Self {
        Annotation {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A subsumption axiom `sub SubClassOf sup`, optionally annotated.
///
/// Identity includes the annotation set: the same subsumption asserted with
/// different annotations is a different axiom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubClassOfAxiom {
    /// The subclass (may be anonymous; then this axiom is a GCI).
    pub sub: ClassExpression,
    /// The superclass (may be anonymous).
    pub sup: ClassExpression,
    /// Annotations; non-empty means the axiom is protected.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub annotations: BTreeSet<Annotation>,
}

impl SubClassOfAxiom {
    /// Create an unannotated subsumption axiom.
    pub fn new(sub: ClassExpression, sup: ClassExpression) -> Self {
        SubClassOfAxiom {
            sub,
            sup,
            annotations: BTreeSet::new(),
        }
    }

    /// Attach an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    /// An axiom carrying any annotation is protected from removal.
    pub fn is_protected(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// A general class inclusion: the subject is an anonymous expression.
    pub fn is_gci(&self) -> bool {
        self.sub.is_anonymous()
    }
}

impl fmt::Display for SubClassOfAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SubClassOf {}", self.sub, self.sup)
    }
}

/// An equivalence axiom over ≥ 2 pairwise-equivalent class expressions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeSet<ClassExpression>",
    into = "BTreeSet<ClassExpression>"
)]
pub struct EquivalentClassesAxiom {
    expressions: BTreeSet<ClassExpression>,
}

impl EquivalentClassesAxiom {
    /// Create an equivalence axiom; fails fast on fewer than 2 distinct members.
    pub fn new(
        expressions: impl IntoIterator<Item = ClassExpression>,
    ) -> Result<Self, OntologyError> {
        let expressions: BTreeSet<ClassExpression> = expressions.into_iter().collect();
        if expressions.len() < 2 {
            return Err(OntologyError::MalformedEquivalence {
                count: expressions.len(),
            });
        }
        Ok(EquivalentClassesAxiom { expressions })
    }

    /// Pair two expressions already known to be distinct (e.g. a fresh
    /// synthetic class and the anonymous expression it names).
    pub(crate) fn pair(a: ClassExpression, b: ClassExpression) -> Self {
        debug_assert_ne!(a, b);
        EquivalentClassesAxiom {
            expressions: BTreeSet::from([a, b]),
        }
    }

    /// The member expressions.
    pub fn expressions(&self) -> impl Iterator<Item = &ClassExpression> {
        self.expressions.iter()
    }

    /// Number of member expressions.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Always false by construction; present for clippy symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl TryFrom<BTreeSet<ClassExpression>> for EquivalentClassesAxiom {
    type Error = OntologyError;

    fn try_from(expressions: BTreeSet<ClassExpression>) -> Result<Self, Self::Error> {
        EquivalentClassesAxiom::new(expressions)
    }
}

impl From<EquivalentClassesAxiom> for BTreeSet<ClassExpression> {
    fn from(ax: EquivalentClassesAxiom) -> Self {
        ax.expressions
    }
}

impl fmt::Display for EquivalentClassesAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EquivalentClasses(")?;
        for (i, x) in self.expressions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}

/// The mutable working set of asserted axioms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    subclass_axioms: HashSet<SubClassOfAxiom>,
    equivalence_axioms: HashSet<EquivalentClassesAxiom>,
}

impl Ontology {
    /// Create an empty ontology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subsumption axiom. Returns false if it was already present.
    pub fn add_subclass_axiom(&mut self, axiom: SubClassOfAxiom) -> bool {
        self.subclass_axioms.insert(axiom)
    }

    /// Remove a subsumption axiom by identity. Returns false if absent.
    pub fn remove_subclass_axiom(&mut self, axiom: &SubClassOfAxiom) -> bool {
        self.subclass_axioms.remove(axiom)
    }

    /// Add an equivalence axiom. Returns false if it was already present.
    pub fn add_equivalence_axiom(&mut self, axiom: EquivalentClassesAxiom) -> bool {
        self.equivalence_axioms.insert(axiom)
    }

    /// Remove an equivalence axiom by identity. Returns false if absent.
    pub fn remove_equivalence_axiom(&mut self, axiom: &EquivalentClassesAxiom) -> bool {
        self.equivalence_axioms.remove(axiom)
    }

    /// Iterate the asserted subsumption axioms (arbitrary order).
    pub fn subclass_axioms(&self) -> impl Iterator<Item = &SubClassOfAxiom> {
        self.subclass_axioms.iter()
    }

    /// Iterate the asserted equivalence axioms (arbitrary order).
    pub fn equivalence_axioms(&self) -> impl Iterator<Item = &EquivalentClassesAxiom> {
        self.equivalence_axioms.iter()
    }

    /// Number of asserted subsumption axioms.
    pub fn subclass_axiom_count(&self) -> usize {
        self.subclass_axioms.len()
    }

    /// Number of asserted equivalence axioms.
    pub fn equivalence_axiom_count(&self) -> usize {
        self.equivalence_axioms.len()
    }

    /// Every named class mentioned anywhere in the asserted axioms.
    pub fn class_signature(&self) -> BTreeSet<Iri> {
        let mut sig = BTreeSet::new();
        for ax in &self.subclass_axioms {
            ax.sub.class_signature(&mut sig);
            ax.sup.class_signature(&mut sig);
        }
        for ax in &self.equivalence_axioms {
            for x in ax.expressions() {
                x.class_signature(&mut sig);
            }
        }
        sig
    }

    /// Direct asserted superclass expressions of a named class.
    pub fn direct_superclasses_of(&self, class: &Iri) -> Vec<&ClassExpression> {
        self.subclass_axioms
            .iter()
            .filter(|ax| ax.sub.as_named() == Some(class))
            .map(|ax| &ax.sup)
            .collect()
    }

    /// Does the class have at least one *named* direct asserted superclass?
    pub fn has_named_superclass(&self, class: &Iri) -> bool {
        self.subclass_axioms
            .iter()
            .any(|ax| ax.sub.as_named() == Some(class) && !ax.sup.is_anonymous())
    }

    /// Number of distinct *named* direct asserted subclasses of a named class.
    pub fn named_subclass_count(&self, class: &Iri) -> usize {
        self.subclass_axioms
            .iter()
            .filter(|ax| ax.sup.as_named() == Some(class))
            .filter_map(|ax| ax.sub.as_named())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Subsumption axioms whose sub- or super-expression mentions the class
    /// anywhere in its signature.
    pub fn subclass_axioms_touching(&self, class: &Iri) -> Vec<SubClassOfAxiom> {
        self.subclass_axioms
            .iter()
            .filter(|ax| {
                let mut sig = BTreeSet::new();
                ax.sub.class_signature(&mut sig);
                ax.sup.class_signature(&mut sig);
                sig.contains(class)
            })
            .cloned()
            .collect()
    }
}
