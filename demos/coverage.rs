//! Count which permutations the generator realizes for small n.
//!
//! Unconstrained boards should reach every permutation (n!). Exclude-self
//! boards realize the target drawn by the restricted shuffle, which is
//! always a single n-cycle, so they reach (n-1)! of the derangements.
//!
//! Usage: cargo run --release --example coverage -- [n] [samples]

use ghost_leg::{Generator, GeneratorParams, LadderConfig, compute_all_results, is_derangement};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::env;
use std::time::Instant;

// Number of derangements of n elements.
const DERANGEMENTS: &[usize] = &[1, 0, 1, 2, 9, 44, 265, 1854, 14_833];

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let n: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);
    let samples: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);

    println!("=== Ghost-Leg Coverage ===");
    println!("n = {}, samples = {}", n, samples);
    println!();

    for exclude_self in [false, true] {
        let start = Instant::now();
        let config = LadderConfig::new(n, exclude_self);
        let rng = ChaCha20Rng::seed_from_u64(0);
        let generator = match Generator::new(config, rng, GeneratorParams::default()) {
            Ok(g) => g,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };

        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut fixed_point_boards = 0;
        for layout in generator.take(samples) {
            let results = compute_all_results(&layout);
            if !is_derangement(&results) {
                fixed_point_boards += 1;
            }
            *counts.entry(results).or_default() += 1;
        }

        let (label, expected) = if exclude_self {
            ("exclude-self", factorial(n - 1))
        } else {
            ("unconstrained", factorial(n))
        };
        println!("--- {} ---", label);
        println!("distinct permutations: {} (reachable: {})", counts.len(), expected);
        if let Some(&d) = DERANGEMENTS.get(n) {
            println!("derangements of n:     {}", d);
        }
        println!("boards with a fixed point: {}", fixed_point_boards);
        if let (Some(min), Some(max)) = (counts.values().min(), counts.values().max()) {
            println!("hits per permutation: min {}, max {}", min, max);
        }
        println!("elapsed: {:.2}s", start.elapsed().as_secs_f64());
        println!();
    }
}
