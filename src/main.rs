//! SCAR: Somatic Chromosomal Aberration Reckoner
//!
//! Usage: scar <N_CHRS> <DIPLOID> <MAX_DUP_DEPTH> <MAX_OVERALL_DEPTH>

use clap::Parser;
use std::io::{self, BufWriter};
use std::process;

use scar_genomics::{Genome, LineSink, Result, ScarError, SearchContext, SearchLimits};

#[derive(Parser)]
#[command(name = "scar")]
#[command(version)]
#[command(
    about = "SCAR: Somatic Chromosomal Aberration Reckoner - exhaustive enumeration of rearranged cancer genomes",
    long_about = None
)]
struct Cli {
    /// Number of wild-type reference chromosomes
    n_chrs: u32,

    /// Ploidy: 0 for haploid, any other value for diploid
    diploid: u32,

    /// Maximum number of duplicative rearrangements per lineage
    max_dup_depth: u32,

    /// Maximum overall number of rearrangements per lineage
    max_overall_depth: u32,

    /// Also enumerate inverted duplications (off in the default operator set)
    #[arg(long)]
    inverted_dups: bool,

    /// Print search statistics to stderr on completion
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.n_chrs == 0 {
        return Err(ScarError::InvalidParameter(
            "at least one reference chromosome is required".to_string(),
        ));
    }
    let diploid = cli.diploid != 0;

    eprintln!(
        "Using {} chromosomes ({})...",
        cli.n_chrs,
        if diploid { "diploid" } else { "haploid" }
    );
    eprintln!(
        "Enumerating down to a maximum of {} duplicative and {} overall rearrangements...",
        cli.max_dup_depth, cli.max_overall_depth
    );

    let stdout = io::stdout();
    let mut sink = LineSink::new(BufWriter::new(stdout.lock()));

    let limits = SearchLimits::new(cli.max_overall_depth, cli.max_dup_depth)
        .with_inverted_dups(cli.inverted_dups);
    let mut ctx = SearchContext::new(limits, &mut sink);
    ctx.run(Genome::wild_type(cli.n_chrs, diploid))?;
    let emitted = ctx.emitted();
    let unique = ctx.unique_genomes();
    drop(ctx);

    sink.flush()?;

    if cli.stats {
        eprintln!(
            "Search stats: {} records emitted, {} unique genome configurations",
            emitted, unique
        );
    }

    Ok(())
}
