//! Rich diagnostic error types for the ontoprune toolkit.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the ontoprune toolkit.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum OntoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reasoner(#[from] ReasonerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reduce(#[from] ReduceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

// ---------------------------------------------------------------------------
// Ontology errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OntologyError {
    #[error("malformed equivalence axiom: needs at least 2 distinct expressions, got {count}")]
    #[diagnostic(
        code(ontoprune::ontology::malformed_equivalence),
        help(
            "An EquivalentClasses axiom asserts pairwise equivalence and is \
             meaningless with fewer than two distinct class expressions. \
             Check the input document for degenerate axioms."
        )
    )]
    MalformedEquivalence { count: usize },
}

// ---------------------------------------------------------------------------
// Reasoner errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReasonerError {
    #[error("reasoner query failed: {message}")]
    #[diagnostic(
        code(ontoprune::reasoner::query),
        help(
            "The subsumption oracle failed to answer a query. Queries are not \
             retried; the whole operation aborts. Check the reasoner backend's \
             own logs for the underlying cause."
        )
    )]
    Query { message: String },

    #[error("reasoner query timed out after {seconds}s")]
    #[diagnostic(
        code(ontoprune::reasoner::timeout),
        help(
            "The oracle did not answer within the configured deadline. \
             Large or deeply nested ontologies can make classification slow; \
             raise the timeout or pre-classify with a faster reasoner."
        )
    )]
    Timeout { seconds: u64 },
}

// ---------------------------------------------------------------------------
// Reduce errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReduceError {
    #[error("ontology is inconsistent; no axioms were removed")]
    #[diagnostic(
        code(ontoprune::reduce::inconsistent),
        help(
            "Redundancy testing is meaningless under inconsistency (everything \
             is entailed), so the ontology is left untouched. Repair the \
             contradiction first, e.g. by inspecting the unsatisfiable classes."
        )
    )]
    OntologyInconsistent,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reasoner(#[from] ReasonerError),
}

// ---------------------------------------------------------------------------
// I/O errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IoError {
    #[error("failed to read ontology document from {path}")]
    #[diagnostic(
        code(ontoprune::io::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ontology document {path}")]
    #[diagnostic(
        code(ontoprune::io::parse),
        help(
            "The document is not valid ontoprune JSON. Expected an object with \
             `subclass_axioms` and `equivalence_axioms` arrays."
        )
    )]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize ontology document for {path}")]
    #[diagnostic(code(ontoprune::io::serialize))]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write ontology document to {path}")]
    #[diagnostic(
        code(ontoprune::io::write),
        help("Check that the target directory exists and is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning ontoprune results.
pub type OntoResult<T> = std::result::Result<T, OntoError>;
