//! A structural transitive-closure reasoner over asserted axioms.
//!
//! Builds a petgraph digraph with one node per distinct class expression and
//! edges for everything the asserted axioms entail structurally:
//!
//! - `sub → sup` for every subsumption axiom,
//! - a cycle through the members of every equivalence axiom (mutual
//!   reachability collapses them into one strongly connected component),
//! - `intersection → operand` (`X and Y SubClassOf X`) and
//!   `operand → union` (`X SubClassOf X or Y`) decomposition edges.
//!
//! Superclass queries are answered from the condensation (SCC DAG): the
//! strict superclasses of a class are the named members of every component
//! reachable from its own, equivalents excluded by construction. This is far
//! weaker than a DL reasoner, but it is exactly the fragment the toolkit's
//! operations need for asserted-hierarchy work, and materialized anonymous
//! expressions participate through their equivalence links.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::ReasonerError;
use crate::expr::{ClassExpression, Iri};
use crate::ontology::Ontology;
use crate::reasoner::{Reasoner, ReasonerFactory};

/// Transitive-closure oracle over one ontology's asserted axioms.
///
/// Immutable after construction; all queries are `&self`, so it is safe to
/// share across the parallel redundancy tests in REDUCE.
#[derive(Debug)]
pub struct StructuralReasoner {
    /// Named class → its SCC in the condensation.
    named: HashMap<Iri, usize>,
    /// SCC → named classes it contains.
    scc_named: Vec<Vec<Iri>>,
    /// SCC → every SCC reachable from it (itself excluded).
    scc_reach: Vec<BTreeSet<usize>>,
    thing_scc: usize,
    nothing_scc: usize,
}

impl StructuralReasoner {
    /// Build the closure graph from the ontology's current asserted axioms.
    pub fn new(ontology: &Ontology) -> Self {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let mut nodes: HashMap<ClassExpression, NodeIndex> = HashMap::new();

        for ax in ontology.subclass_axioms() {
            let sub = ensure_node(&mut graph, &mut nodes, &ax.sub);
            let sup = ensure_node(&mut graph, &mut nodes, &ax.sup);
            graph.update_edge(sub, sup, ());
        }
        for ax in ontology.equivalence_axioms() {
            let members: Vec<NodeIndex> = ax
                .expressions()
                .map(|x| ensure_node(&mut graph, &mut nodes, x))
                .collect();
            for i in 0..members.len() {
                let next = members[(i + 1) % members.len()];
                graph.update_edge(members[i], next, ());
            }
        }
        let thing = ensure_node(&mut graph, &mut nodes, &ClassExpression::class(Iri::owl_thing()));
        let nothing = ensure_node(
            &mut graph,
            &mut nodes,
            &ClassExpression::class(Iri::owl_nothing()),
        );

        // Condense into the SCC DAG.
        let sccs = tarjan_scc(&graph);
        let mut scc_of = vec![0usize; graph.node_count()];
        for (id, members) in sccs.iter().enumerate() {
            for &node in members {
                scc_of[node.index()] = id;
            }
        }

        let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); sccs.len()];
        for edge in graph.edge_indices() {
            let (a, b) = graph.edge_endpoints(edge).expect("edge endpoints");
            let (sa, sb) = (scc_of[a.index()], scc_of[b.index()]);
            if sa != sb {
                adjacency[sa].insert(sb);
            }
        }

        let mut memo: Vec<Option<BTreeSet<usize>>> = vec![None; sccs.len()];
        for s in 0..sccs.len() {
            compute_reach(s, &adjacency, &mut memo);
        }
        let scc_reach: Vec<BTreeSet<usize>> =
            memo.into_iter().map(|r| r.unwrap_or_default()).collect();

        let mut named = HashMap::new();
        let mut scc_named: Vec<Vec<Iri>> = vec![Vec::new(); sccs.len()];
        for (expr, idx) in &nodes {
            if let Some(iri) = expr.as_named() {
                let scc = scc_of[idx.index()];
                named.insert(iri.clone(), scc);
                scc_named[scc].push(iri.clone());
            }
        }

        StructuralReasoner {
            named,
            scc_named,
            scc_reach,
            thing_scc: scc_of[thing.index()],
            nothing_scc: scc_of[nothing.index()],
        }
    }

    fn scc_of_class(&self, class: &Iri) -> Option<usize> {
        self.named.get(class).copied()
    }

    /// Is the class's component at or below `owl:Nothing`?
    fn scc_is_unsatisfiable(&self, scc: usize) -> bool {
        scc == self.nothing_scc || self.scc_reach[scc].contains(&self.nothing_scc)
    }
}

fn ensure_node(
    graph: &mut DiGraph<(), ()>,
    nodes: &mut HashMap<ClassExpression, NodeIndex>,
    expr: &ClassExpression,
) -> NodeIndex {
    if let Some(&idx) = nodes.get(expr) {
        return idx;
    }
    let idx = graph.add_node(());
    nodes.insert(expr.clone(), idx);
    match expr {
        ClassExpression::Intersection(ops) => {
            for op in ops {
                let child = ensure_node(graph, nodes, op);
                graph.update_edge(idx, child, ());
            }
        }
        ClassExpression::Union(ops) => {
            for op in ops {
                let child = ensure_node(graph, nodes, op);
                graph.update_edge(child, idx, ());
            }
        }
        _ => {}
    }
    idx
}

fn compute_reach(
    scc: usize,
    adjacency: &[BTreeSet<usize>],
    memo: &mut Vec<Option<BTreeSet<usize>>>,
) -> BTreeSet<usize> {
    if let Some(reach) = &memo[scc] {
        return reach.clone();
    }
    let mut reach = BTreeSet::new();
    for &next in &adjacency[scc] {
        reach.insert(next);
        reach.extend(compute_reach(next, adjacency, memo));
    }
    memo[scc] = Some(reach.clone());
    reach
}

impl Reasoner for StructuralReasoner {
    fn is_consistent(&self) -> Result<bool, ReasonerError> {
        Ok(!self.scc_is_unsatisfiable(self.thing_scc))
    }

    fn unsatisfiable_classes(&self) -> Result<BTreeSet<Iri>, ReasonerError> {
        Ok(self
            .named
            .iter()
            .filter(|&(iri, &scc)| !iri.is_owl_nothing() && self.scc_is_unsatisfiable(scc))
            .map(|(iri, _)| iri.clone())
            .collect())
    }

    fn super_classes(&self, class: &Iri, direct: bool) -> Result<BTreeSet<Iri>, ReasonerError> {
        // A class the ontology never mentions has no information attached;
        // answer with the empty set rather than erroring.
        let Some(scc) = self.scc_of_class(class) else {
            return Ok(BTreeSet::new());
        };
        let reachable = &self.scc_reach[scc];
        if !direct {
            return Ok(reachable
                .iter()
                .flat_map(|&s| self.scc_named[s].iter().cloned())
                .collect());
        }

        // Direct superclasses: the minimal (w.r.t. reachability) components
        // above `scc` that contain at least one named class. Components made
        // only of anonymous expressions are skipped through.
        let named_above: Vec<usize> = reachable
            .iter()
            .copied()
            .filter(|&s| !self.scc_named[s].is_empty())
            .collect();
        Ok(named_above
            .iter()
            .copied()
            .filter(|&s| {
                !named_above
                    .iter()
                    .any(|&other| other != s && self.scc_reach[other].contains(&s))
            })
            .flat_map(|s| self.scc_named[s].iter().cloned())
            .collect())
    }

    fn supports_direct_entailment(&self) -> bool {
        true
    }

    fn is_super_class_of(
        &self,
        candidate: &Iri,
        class: &Iri,
        direct: bool,
    ) -> Result<bool, ReasonerError> {
        if direct {
            return Ok(self.super_classes(class, true)?.contains(candidate));
        }
        let (Some(class_scc), Some(candidate_scc)) =
            (self.scc_of_class(class), self.scc_of_class(candidate))
        else {
            return Ok(false);
        };
        Ok(self.scc_reach[class_scc].contains(&candidate_scc))
    }
}

/// Factory for [`StructuralReasoner`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralReasonerFactory;

impl ReasonerFactory for StructuralReasonerFactory {
    type Reasoner = StructuralReasoner;

    fn create(&self, ontology: &Ontology) -> Result<Self::Reasoner, ReasonerError> {
        Ok(StructuralReasoner::new(ontology))
    }
}
