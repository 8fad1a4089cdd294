//! Generate a ghost-leg board and print it with the result of every column.
//!
//! Usage: cargo run --release --example generate -- <columns> [--exclude-self] [seed]
//!
//! Example:
//!   cargo run --release --example generate -- 6 --exclude-self 42

use ghost_leg::{GeneratorParams, LadderConfig, compute_all_results, generate};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let n: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("Usage: {} <columns> [--exclude-self] [seed]", args[0]);
        std::process::exit(1);
    });

    let exclude_self = args.iter().any(|s| s == "--exclude-self");
    let seed: u64 = args
        .iter()
        .skip(2)
        .find_map(|s| s.parse().ok())
        .unwrap_or(0);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let layout = match generate(
        LadderConfig::new(n, exclude_self),
        &mut rng,
        &GeneratorParams::default(),
    ) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let header: Vec<String> = (0..n).map(|c| format!("{:<3}", c)).collect();
    println!("{}", header.join(""));
    for row in layout.rows() {
        let mut line = String::new();
        for (s, &rung) in row.iter().enumerate() {
            line.push('|');
            line.push_str(if rung { "--" } else { "  " });
            if s + 1 == row.len() {
                line.push('|');
            }
        }
        println!("{}", line);
    }

    let results = compute_all_results(&layout);
    let footer: Vec<String> = (0..n)
        .map(|end| {
            let start = results.iter().position(|&r| r == end).unwrap_or(end);
            format!("{:<3}", start)
        })
        .collect();
    println!("{}", footer.join(""));
    println!();
    for (start, end) in results.iter().enumerate() {
        let mark = if start == *end { "  (fixed)" } else { "" };
        println!("{} -> {}{}", start, end, mark);
    }
}
