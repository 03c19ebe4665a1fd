// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # ontoprune
//!
//! Batch manipulation of OWL class hierarchies: redundant-subsumption
//! elimination, equivalence relaxation, and hierarchy minimization.
//!
//! ## Architecture
//!
//! - **Class expressions** (`expr`): named classes and structural compound terms
//! - **Axiom store** (`ontology`): set-semantics subsumption/equivalence axioms
//! - **Subsumption oracle** (`reasoner`): the reasoner trait + a petgraph-backed
//!   structural transitive-closure implementation
//! - **Materialization** (`materialize`): scoped synthetic naming of anonymous
//!   expressions so the oracle can be queried about them
//! - **Operations** (`reduce`, `relax`, `minimize`): the in-place hierarchy
//!   transforms
//!
//! ## Library usage
//!
//! ```
//! use ontoprune::expr::ClassExpression;
//! use ontoprune::ontology::{Ontology, SubClassOfAxiom};
//! use ontoprune::reasoner::StructuralReasonerFactory;
//! use ontoprune::reduce::{reduce, ReduceOptions};
//!
//! let mut ontology = Ontology::new();
//! let (a, b, c) = (
//!     ClassExpression::class("A"),
//!     ClassExpression::class("B"),
//!     ClassExpression::class("C"),
//! );
//! ontology.add_subclass_axiom(SubClassOfAxiom::new(a.clone(), b.clone()));
//! ontology.add_subclass_axiom(SubClassOfAxiom::new(b, c.clone()));
//! ontology.add_subclass_axiom(SubClassOfAxiom::new(a, c)); // redundant
//!
//! let report = reduce(
//!     &mut ontology,
//!     &StructuralReasonerFactory,
//!     &ReduceOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(report.removed, 1);
//! assert_eq!(ontology.subclass_axiom_count(), 2);
//! ```

pub mod error;
pub mod expr;
pub mod io;
pub mod materialize;
pub mod minimize;
pub mod ontology;
pub mod reasoner;
pub mod reduce;
pub mod relax;
