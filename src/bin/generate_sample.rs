use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const JOBS: [&str; 12] = [
    "admin.",
    "blue-collar",
    "entrepreneur",
    "housemaid",
    "management",
    "retired",
    "self-employed",
    "services",
    "student",
    "technician",
    "unemployed",
    "unknown",
];
const MARITAL: [&str; 3] = ["married", "single", "divorced"];
const EDUCATION: [&str; 6] = [
    "basic.4y",
    "basic.9y",
    "high.school",
    "professional.course",
    "university.degree",
    "unknown",
];
const YES_NO: [&str; 3] = ["no", "yes", "unknown"];
// Credit default is almost never "yes" in the public data.
const DEFAULT: [&str; 5] = ["no", "no", "no", "no", "unknown"];
const CONTACT: [&str; 2] = ["cellular", "telephone"];
const MONTHS: [&str; 10] = [
    "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const DAYS: [&str; 5] = ["mon", "tue", "wed", "thu", "fri"];

/// Baseline subscription rate by job, loosely following the public dataset.
fn base_rate(job: &str) -> f64 {
    match job {
        "student" => 0.31,
        "retired" => 0.25,
        "unemployed" => 0.14,
        "admin." | "management" | "unknown" => 0.12,
        "blue-collar" => 0.07,
        _ => 0.10,
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bank-additional-full.csv"));
    let n_rows: usize = match std::env::args().nth(2) {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 5000,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    writer.write_record([
        "age",
        "job",
        "marital",
        "education",
        "default",
        "housing",
        "loan",
        "contact",
        "month",
        "day_of_week",
        "duration",
        "campaign",
        "y",
    ])?;

    for _ in 0..n_rows {
        let job = rng.pick(&JOBS);
        let age_mean = match job {
            "student" => 25.0,
            "retired" => 66.0,
            _ => 40.0,
        };
        let age = rng.gauss(age_mean, 9.0).round().clamp(17.0, 98.0) as i64;
        let duration = rng.gauss(260.0, 180.0).abs().round() as i64;
        let campaign = 1 + rng.next_u64() % 6;

        // Longer calls and the very young / old subscribe more often.
        let mut p = base_rate(job) + (duration as f64 - 260.0) / 3000.0;
        if !(25..=60).contains(&age) {
            p += 0.08;
        }
        let y = if rng.next_f64() < p.clamp(0.01, 0.95) {
            "yes"
        } else {
            "no"
        };

        writer.write_record([
            age.to_string().as_str(),
            job,
            rng.pick(&MARITAL),
            rng.pick(&EDUCATION),
            rng.pick(&DEFAULT),
            rng.pick(&YES_NO),
            rng.pick(&YES_NO),
            rng.pick(&CONTACT),
            rng.pick(&MONTHS),
            rng.pick(&DAYS),
            duration.to_string().as_str(),
            campaign.to_string().as_str(),
            y,
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} campaign records to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_column_draws_both_values() {
        let mut rng = SimpleRng::new(7);
        let draws: Vec<&str> = (0..200).map(|_| rng.pick(&DEFAULT)).collect();
        assert!(draws.contains(&"no"));
        assert!(draws.contains(&"unknown"));
        assert!(draws.iter().all(|d| *d == "no" || *d == "unknown"));
    }
}
