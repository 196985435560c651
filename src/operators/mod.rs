//! The rearrangement operators.
//!
//! Each operator is a free function that enumerates every valid application
//! to its input genome, deep-copies the input per application, mutates the
//! copy through the genome primitives, records the history entry, and hands
//! the child to the search engine. Inputs are never mutated.

pub mod aneuploidy;
pub mod segmental;
pub mod telomeric;
pub mod translocation;

pub use aneuploidy::{chromosome_gains, chromosome_losses, genome_doublings};
pub use segmental::{deletions, inversions, inverted_dups, tandem_dups};
pub use telomeric::{fold_backs, telomere_breaks};
pub use translocation::{balanced_translocations, unbalanced_translocations};
