//! IRIs and class expressions.
//!
//! A [`ClassExpression`] is either a named class or an anonymous compound term
//! (intersection, existential restriction, qualified cardinality, union,
//! complement). Identity is *structural*: two independently constructed but
//! structurally identical expressions compare equal and hash identically, so
//! they denote the same node everywhere in the toolkit. Unordered operands
//! (intersection, union) live in a `BTreeSet`, which makes the canonical form
//! independent of construction order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An IRI identifying a named class or an object property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// The top class, superclass of everything.
    pub const OWL_THING: &'static str = "http://www.w3.org/2002/07/owl#Thing";
    /// The bottom class, subclass of everything.
    pub const OWL_NOTHING: &'static str = "http://www.w3.org/2002/07/owl#Nothing";

    /// Create an IRI from any string-like value.
    pub fn new(iri: impl Into<String>) -> Self {
        Iri(iri.into())
    }

    /// The canonical `owl:Thing` IRI.
    pub fn owl_thing() -> Self {
        Iri::new(Self::OWL_THING)
    }

    /// The canonical `owl:Nothing` IRI.
    pub fn owl_nothing() -> Self {
        Iri::new(Self::OWL_NOTHING)
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this `owl:Thing`?
    pub fn is_owl_thing(&self) -> bool {
        self.0 == Self::OWL_THING
    }

    /// Is this `owl:Nothing`?
    pub fn is_owl_nothing(&self) -> bool {
        self.0 == Self::OWL_NOTHING
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri(s)
    }
}

/// A class expression: a named class or an anonymous compound term.
///
/// Derived `Eq`/`Ord`/`Hash` give value (structural) identity. All maps in the
/// toolkit that are keyed by expressions rely on this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    /// A named class.
    Class(Iri),
    /// Intersection of the operands (`A and B`).
    Intersection(BTreeSet<ClassExpression>),
    /// Union of the operands (`A or B`).
    Union(BTreeSet<ClassExpression>),
    /// Existential restriction (`P some C`).
    SomeValuesFrom {
        property: Iri,
        filler: Box<ClassExpression>,
    },
    /// Qualified minimum cardinality (`P min n C`).
    MinCardinality {
        n: u32,
        property: Iri,
        filler: Box<ClassExpression>,
    },
    /// Qualified exact cardinality (`P exactly n C`).
    ExactCardinality {
        n: u32,
        property: Iri,
        filler: Box<ClassExpression>,
    },
    /// Complement (`not C`).
    Complement(Box<ClassExpression>),
}

impl ClassExpression {
    /// A named class expression.
    pub fn class(iri: impl Into<Iri>) -> Self {
        ClassExpression::Class(iri.into())
    }

    /// An intersection of the given operands.
    pub fn intersection(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        ClassExpression::Intersection(operands.into_iter().collect())
    }

    /// A union of the given operands.
    pub fn union(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        ClassExpression::Union(operands.into_iter().collect())
    }

    /// An existential restriction `property some filler`.
    pub fn some(property: impl Into<Iri>, filler: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// Is this an anonymous (compound) expression?
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, ClassExpression::Class(_))
    }

    /// The IRI if this is a named class.
    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            ClassExpression::Class(iri) => Some(iri),
            _ => None,
        }
    }

    /// Is this the top class `owl:Thing`?
    pub fn is_top(&self) -> bool {
        self.as_named().is_some_and(Iri::is_owl_thing)
    }

    /// Is this the bottom class `owl:Nothing`?
    pub fn is_bottom(&self) -> bool {
        self.as_named().is_some_and(Iri::is_owl_nothing)
    }

    /// Collect every named class mentioned anywhere in this expression.
    ///
    /// Object property IRIs are not part of the class signature.
    pub fn class_signature(&self, out: &mut BTreeSet<Iri>) {
        match self {
            ClassExpression::Class(iri) => {
                out.insert(iri.clone());
            }
            ClassExpression::Intersection(ops) | ClassExpression::Union(ops) => {
                for op in ops {
                    op.class_signature(out);
                }
            }
            ClassExpression::SomeValuesFrom { filler, .. }
            | ClassExpression::MinCardinality { filler, .. }
            | ClassExpression::ExactCardinality { filler, .. }
            | ClassExpression::Complement(filler) => filler.class_signature(out),
        }
    }

    /// Existential restrictions reachable by descending through intersection
    /// operands only.
    ///
    /// This is the structural unwinding used by RELAX: the expression itself,
    /// or any operand of a (nested) intersection, counts when it is an
    /// existential restriction. A qualified cardinality restriction with
    /// cardinality > 0 entails the corresponding existential and is weakened
    /// to one. Unions, complements, and restriction fillers are never
    /// descended into.
    pub fn conjunct_existentials(&self) -> Vec<ClassExpression> {
        let mut found = Vec::new();
        self.collect_conjunct_existentials(&mut found);
        found
    }

    fn collect_conjunct_existentials(&self, out: &mut Vec<ClassExpression>) {
        match self {
            ClassExpression::SomeValuesFrom { .. } => out.push(self.clone()),
            ClassExpression::MinCardinality { n, property, filler }
            | ClassExpression::ExactCardinality { n, property, filler }
                if *n > 0 =>
            {
                out.push(ClassExpression::SomeValuesFrom {
                    property: property.clone(),
                    filler: filler.clone(),
                });
            }
            ClassExpression::Intersection(ops) => {
                for op in ops {
                    op.collect_conjunct_existentials(out);
                }
            }
            _ => {}
        }
    }

    /// Named classes reachable by descending through intersection operands
    /// only: the expression itself if named, or named operands of (nested)
    /// intersections.
    pub fn conjunct_named(&self) -> Vec<Iri> {
        let mut found = Vec::new();
        self.collect_conjunct_named(&mut found);
        found
    }

    fn collect_conjunct_named(&self, out: &mut Vec<Iri>) {
        match self {
            ClassExpression::Class(iri) => out.push(iri.clone()),
            ClassExpression::Intersection(ops) => {
                for op in ops {
                    op.collect_conjunct_named(out);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassExpression::Class(iri) => write!(f, "{iri}"),
            ClassExpression::Intersection(ops) => write_operands(f, ops, "and"),
            ClassExpression::Union(ops) => write_operands(f, ops, "or"),
            ClassExpression::SomeValuesFrom { property, filler } => {
                write!(f, "({property} some {filler})")
            }
            ClassExpression::MinCardinality { n, property, filler } => {
                write!(f, "({property} min {n} {filler})")
            }
            ClassExpression::ExactCardinality { n, property, filler } => {
                write!(f, "({property} exactly {n} {filler})")
            }
            ClassExpression::Complement(inner) => write!(f, "(not {inner})"),
        }
    }
}

fn write_operands(
    f: &mut fmt::Formatter<'_>,
    ops: &BTreeSet<ClassExpression>,
    sep: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            write!(f, " {sep} ")?;
        }
        write!(f, "{op}")?;
    }
    write!(f, ")")
}
