#![doc = include_str!("../README.md")]

mod error;
mod generator;
mod layout;
mod permutation;
mod trace;
#[cfg(feature = "wasm")]
mod wasm;

pub use error::{LadderError, Result};
pub use generator::{Generator, GeneratorParams, LadderConfig, generate};
pub use layout::{Layout, MIN_ROWS, has_no_adjacent_rungs, row_count};
pub use permutation::{
    inverse, is_derangement, is_permutation, random_derangement, random_permutation,
};
pub use trace::{Geometry, Point, Trace, compute_all_results, trace};
