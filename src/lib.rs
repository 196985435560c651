//! SCAR: Somatic Chromosomal Aberration Reckoner
//!
//! Exhaustively enumerates every somatic genome configuration reachable from
//! a wild-type haploid or diploid reference by a bounded number of
//! structural rearrangements: deletions, tandem and inverted duplications,
//! inversions, telomeric breaks, fold-back duplications, balanced and
//! unbalanced translocations, and whole-chromosome/whole-genome copy number
//! changes. Each unique configuration is reported once, under its
//! shortest-depth derivation, with its copy-number profile, rearrangement
//! junction set, event history, and a canonical fingerprint that is
//! invariant under chromosome reordering and reversal.
//!
//! # Example
//!
//! ```
//! use scar_genomics::{CollectSink, Genome, SearchContext, SearchLimits};
//!
//! // Everything reachable from one haploid chromosome in a single event.
//! let mut sink = CollectSink::new();
//! let mut ctx = SearchContext::new(SearchLimits::new(1, 0), &mut sink);
//! ctx.run(Genome::wild_type(1, false)).unwrap();
//! drop(ctx);
//!
//! assert_eq!(sink.records[0].label, "{0,0,0}[1]"); // the wild type itself
//! assert!(sink.records.len() > 1);
//! ```

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod genome;
pub mod operators;
pub mod record;
pub mod segment;
pub mod simplify;

pub use engine::{SearchContext, SearchLimits};
pub use error::{Result, ScarError};
pub use fingerprint::canonical_string;
pub use genome::{Event, EventKind, Genome};
pub use record::{CollectSink, GenomeRecord, LineSink, RecordSink};
pub use segment::{Chromosome, Segment, SegmentId};
pub use simplify::simplify;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
