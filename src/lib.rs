pub mod canon;
pub mod cli;
pub mod codec;
pub mod config;
pub mod format;
pub mod grid;
pub mod pipeline;
pub mod records;

pub use canon::{Canonicalizer, PENALTY_KERNEL, Prettified, TieBreak};
pub use grid::{Grid, Offset};
