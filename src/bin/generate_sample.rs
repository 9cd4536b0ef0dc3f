use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Cost models in microseconds: `(name, time(array_length, input_range))`.
type CostModel = (&'static str, fn(f64, f64) -> f64);

const ALGORITHMS: [CostModel; 5] = [
    ("insertion_sort", insertion_sort),
    ("quicksort", quicksort),
    ("quicksort_3way", quicksort_3way),
    ("introsort", introsort),
    ("countingsort", countingsort),
];

fn insertion_sort(n: f64, _k: f64) -> f64 {
    2.0e-4 * n * n
}

// degrades when many duplicates are present
fn quicksort(n: f64, k: f64) -> f64 {
    4.0e-2 * n * n.log2() * (1.0 + 8.0 / k.log2().max(1.0))
}

fn quicksort_3way(n: f64, k: f64) -> f64 {
    5.0e-2 * n * k.log2().clamp(1.0, n.log2())
}

fn introsort(n: f64, _k: f64) -> f64 {
    3.5e-2 * n * n.log2()
}

fn countingsort(n: f64, k: f64) -> f64 {
    6.0e-3 * (n + k)
}

const FIXED_INPUT_RANGE: f64 = 1_000_000.0;
const FIXED_ARRAY_LENGTH: f64 = 50_000.0;

/// Deterministic measurement noise (splitmix64 stream).
struct Jitter {
    state: u64,
    amount: f64,
}

impl Jitter {
    fn new(seed: u64, amount: f64) -> Self {
        Jitter {
            state: seed,
            amount,
        }
    }

    /// Factor in `[1 - amount, 1 + amount)`.
    fn factor(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        let unit = (z >> 11) as f64 / (1u64 << 53) as f64;
        1.0 + self.amount * (2.0 * unit - 1.0)
    }
}

fn write_series(path: &Path, rows: &[(f64, f64)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for &(x, t) in rows {
        writer
            .write_record([format!("{x}"), format!("{t:.3}")])
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("results"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = Jitter::new(42, 0.05);

    // Array lengths: 5k → 100k, input ranges: 10 → 10M
    let lengths: Vec<f64> = (1..=20).map(|i| (i * 5_000) as f64).collect();
    let ranges: Vec<f64> = (1..=7).map(|e| 10f64.powi(e)).collect();

    let mut files = 0;
    for (name, cost) in ALGORITHMS {
        let by_length: Vec<(f64, f64)> = lengths
            .iter()
            .map(|&n| (n, cost(n, FIXED_INPUT_RANGE) * noise.factor()))
            .collect();
        write_series(&out_dir.join(format!("{name}.array_length.csv")), &by_length)?;

        let by_range: Vec<(f64, f64)> = ranges
            .iter()
            .map(|&k| (k, cost(FIXED_ARRAY_LENGTH, k) * noise.factor()))
            .collect();
        write_series(&out_dir.join(format!("{name}.input_range.csv")), &by_range)?;

        files += 2;
    }

    println!("Wrote {files} result files to {}", out_dir.display());
    Ok(())
}
