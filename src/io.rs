//! Ontology document I/O for the CLI.
//!
//! The on-disk format is plain JSON over the axiom types' serde
//! representations, deliberately *not* an OWL concrete syntax: parsing and
//! serializing real OWL belongs to dedicated libraries. Output is sorted so
//! documents diff cleanly across runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IoError;
use crate::ontology::{EquivalentClassesAxiom, Ontology, SubClassOfAxiom};

/// Serialized form of an [`Ontology`], with deterministically ordered axioms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(default)]
    pub subclass_axioms: Vec<SubClassOfAxiom>,
    #[serde(default)]
    pub equivalence_axioms: Vec<EquivalentClassesAxiom>,
}

impl From<&Ontology> for OntologyDocument {
    fn from(ontology: &Ontology) -> Self {
        let mut subclass_axioms: Vec<SubClassOfAxiom> =
            ontology.subclass_axioms().cloned().collect();
        subclass_axioms.sort();
        let mut equivalence_axioms: Vec<EquivalentClassesAxiom> =
            ontology.equivalence_axioms().cloned().collect();
        equivalence_axioms.sort();
        OntologyDocument {
            subclass_axioms,
            equivalence_axioms,
        }
    }
}

impl From<OntologyDocument> for Ontology {
    fn from(doc: OntologyDocument) -> Self {
        let mut ontology = Ontology::new();
        for ax in doc.subclass_axioms {
            ontology.add_subclass_axiom(ax);
        }
        for ax in doc.equivalence_axioms {
            ontology.add_equivalence_axiom(ax);
        }
        ontology
    }
}

/// Load an ontology document from a JSON file.
pub fn load_ontology(path: &Path) -> Result<Ontology, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let doc: OntologyDocument =
        serde_json::from_str(&text).map_err(|source| IoError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    let ontology: Ontology = doc.into();
    debug!(
        "loaded {} subclass and {} equivalence axioms from {}",
        ontology.subclass_axiom_count(),
        ontology.equivalence_axiom_count(),
        path.display()
    );
    Ok(ontology)
}

/// Save an ontology document to a JSON file, pretty-printed and sorted.
pub fn save_ontology(path: &Path, ontology: &Ontology) -> Result<(), IoError> {
    let doc = OntologyDocument::from(ontology);
    let text = serde_json::to_string_pretty(&doc).map_err(|source| IoError::Serialize {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, text).map_err(|source| IoError::Write {
        path: path.display().to_string(),
        source,
    })
}
