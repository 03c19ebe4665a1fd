//! ontoprune CLI: batch OWL class-hierarchy manipulation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing::info;

use ontoprune::expr::Iri;
use ontoprune::io;
use ontoprune::minimize::minimize;
use ontoprune::reasoner::StructuralReasonerFactory;
use ontoprune::reduce::{ReduceOptions, reduce};
use ontoprune::relax::relax;

#[derive(Parser)]
#[command(name = "ontoprune", version, about = "Batch OWL class-hierarchy toolkit")]
struct Cli {
    /// Input ontology document (JSON).
    #[arg(short, long)]
    input: PathBuf,

    /// Output ontology document (JSON).
    #[arg(short, long)]
    output: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove redundant subsumption axioms.
    Reduce {
        /// Maximum number of unsatisfiable classes to name in warnings.
        #[arg(long, default_value = "10")]
        unsat_warning_cap: usize,
    },

    /// Rewrite equivalence axioms into the weaker subsumptions they entail.
    Relax,

    /// Collapse intermediate classes with fewer named children than the threshold.
    Minimize {
        /// Minimum number of named children an intermediate class must have.
        #[arg(long)]
        threshold: usize,

        /// Classes never to remove (comma-separated IRIs).
        #[arg(long, value_delimiter = ',')]
        precious: Vec<String>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut ontology = io::load_ontology(&cli.input)?;
    info!(
        "loaded {}: {} subclass, {} equivalence axioms",
        cli.input.display(),
        ontology.subclass_axiom_count(),
        ontology.equivalence_axiom_count()
    );

    match cli.command {
        Commands::Reduce { unsat_warning_cap } => {
            let options = ReduceOptions { unsat_warning_cap };
            let report = reduce(&mut ontology, &StructuralReasonerFactory, &options)?;
            println!(
                "reduce: tested {}, protected {}, removed {}",
                report.tested, report.protected, report.removed
            );
        }
        Commands::Relax => {
            let report = relax(&mut ontology);
            println!("relax: added {} subsumption axioms", report.added);
        }
        Commands::Minimize { threshold, precious } => {
            let precious: BTreeSet<Iri> = precious.into_iter().map(Iri::new).collect();
            let report = minimize(&mut ontology, threshold, &precious);
            println!(
                "minimize: {} passes, removed {} classes, spanned {} axioms",
                report.passes, report.removed_classes, report.spanned_axioms
            );
        }
    }

    io::save_ontology(&cli.output, &ontology)?;
    info!("wrote {}", cli.output.display());
    Ok(())
}
