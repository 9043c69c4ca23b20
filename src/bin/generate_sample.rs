//! Writes a deterministic sample of the three indicator tables.
//!
//! Usage: `generate_sample [DIR]` (default: `$SDG9_DATA_DIR` or `data`).

use std::path::Path;

use anyhow::{Context, Result};
use sdg9_gap::{DataSources, SourceId};

/// (country, iso3, mfg % GDP, R&D % GDP, researchers per million, mobile coverage %)
const BASELINES: [(&str, &str, f64, f64, f64, f64); 10] = [
    ("Korea, Rep.", "KOR", 27.5, 4.3, 7500.0, 99.9),
    ("United States", "USA", 11.2, 3.1, 4400.0, 99.8),
    ("Kenya", "KEN", 7.6, 0.8, 90.0, 95.0),
    ("Germany", "DEU", 19.0, 3.0, 5200.0, 99.5),
    ("Brazil", "BRA", 10.5, 1.2, 890.0, 97.0),
    ("India", "IND", 13.5, 0.7, 260.0, 96.0),
    ("Nigeria", "NGA", 9.8, 0.1, 40.0, 88.0),
    ("Chile", "CHL", 9.9, 0.35, 540.0, 98.5),
    ("Viet Nam", "VNM", 16.0, 0.5, 750.0, 99.0),
    ("Ethiopia", "ETH", 5.5, 0.25, 45.0, 85.0),
];

const YEARS: std::ops::RangeInclusive<i32> = 2015..=2022;

/// Seeded splitmix64 stream; only used to jitter the sample values.
struct Jitter(u64);

impl Jitter {
    /// Uniform in `[-1, 1)`.
    fn next_signed(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    }

    /// `base` drifted by `trend` per year plus up to ±`jitter` relative noise,
    /// rounded to two decimals.
    fn drift(&mut self, base: f64, trend: f64, step: i32, jitter: f64) -> f64 {
        let noise = 1.0 + self.next_signed() * jitter;
        (base * (1.0 + trend * step as f64) * noise * 100.0).round() / 100.0
    }
}

fn write_table(path: &Path, header: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sources = match std::env::args_os().nth(1) {
        Some(dir) => DataSources::new(dir),
        None => DataSources::from_env(),
    };
    std::fs::create_dir_all(sources.dir())
        .with_context(|| format!("creating {}", sources.dir().display()))?;

    let mut rng = Jitter(42);
    let mut owid = Vec::new();
    let mut sdr = Vec::new();
    let mut wb = Vec::new();

    for &(country, iso3, mfg, rd, researchers, mobile) in &BASELINES {
        for (step, year) in YEARS.enumerate() {
            let step = step as i32;
            let mfg_v = rng.drift(mfg, -0.005, step, 0.03);
            let rd_v = rng.drift(rd, 0.02, step, 0.05);
            let res_v = rng.drift(researchers, 0.03, step, 0.04).round();
            let mob_v = rng.drift(mobile, 0.002, step, 0.01).min(100.0);
            let score = ((rd_v * 10.0 + mob_v * 0.5).min(100.0) * 10.0).round() / 10.0;

            owid.push(vec![
                country.to_string(),
                year.to_string(),
                mfg_v.to_string(),
                rd_v.to_string(),
            ]);
            sdr.push(vec![
                country.to_string(),
                year.to_string(),
                score.to_string(),
                res_v.to_string(),
            ]);
            // One gap in the latest year, as in the real extract.
            let mob_cell = if year == *YEARS.end() && iso3 == "ETH" {
                String::new()
            } else {
                mob_v.to_string()
            };
            wb.push(vec![
                country.to_string(),
                iso3.to_string(),
                year.to_string(),
                mob_cell,
                mfg_v.to_string(),
            ]);
        }
    }

    write_table(
        &sources.dir().join(SourceId::OurWorldInData.file_name()),
        &["country", "year", "mfg_value_pct", "rd_expend_pct"],
        owid,
    )?;
    write_table(
        &sources.dir().join(SourceId::SdrScores.file_name()),
        &["country", "year", "sdg9_score", "researchers_pm"],
        sdr,
    )?;
    write_table(
        &sources.dir().join(SourceId::WorldBank.file_name()),
        &["country", "iso3", "year", "mobile_cov_pct", "mfg_value_pct"],
        wb,
    )?;

    println!("Wrote sample tables to {}", sources.dir().display());
    Ok(())
}
