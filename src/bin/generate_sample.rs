use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const GAME_COUNT: usize = 600;

/// Tags with a relative popularity used when sampling.
const TAGS: [(&str, f64); 16] = [
    ("Indie", 10.0),
    ("Action", 7.0),
    ("Adventure", 7.0),
    ("Casual", 6.0),
    ("Puzzle", 4.0),
    ("RPG", 4.0),
    ("Horror", 3.0),
    ("Simulation", 3.0),
    ("Open World", 2.0),
    ("Co-op", 2.0),
    ("Cozy", 1.5),
    ("Farming Sim", 1.0),
    ("Detective", 1.0),
    ("Roguelike", 1.5),
    ("Pixel Graphics", 2.0),
    ("Shoot 'Em Up", 0.8),
];

const PRICES: [&str; 6] = ["0.0", "4.99", "9.99", "14.99", "19.99", "29.99"];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Weighted pick without replacement of `k` tag indices.
    fn pick_tags(&mut self, k: usize) -> Vec<usize> {
        let mut picked: Vec<usize> = Vec::with_capacity(k);
        while picked.len() < k.min(TAGS.len()) {
            let total: f64 = TAGS
                .iter()
                .enumerate()
                .filter(|(i, _)| !picked.contains(i))
                .map(|(_, (_, w))| w)
                .sum();
            let mut roll = self.next_f64() * total;
            for (i, (_, w)) in TAGS.iter().enumerate() {
                if picked.contains(&i) {
                    continue;
                }
                roll -= w;
                if roll <= 0.0 {
                    picked.push(i);
                    break;
                }
            }
        }
        picked
    }
}

#[derive(Debug, Serialize)]
struct SampleGame {
    name: String,
    release_date: String,
    price: String,
    positive: i64,
    negative: i64,
    tags: String,
}

fn sample_game(i: usize, rng: &mut SimpleRng) -> SampleGame {
    let epoch = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or(NaiveDate::MIN);
    let release = epoch + Duration::days(rng.below(7 * 365 + 60) as i64);

    // A few rows carry the kinds of junk real exports contain.
    let release_date = if rng.below(40) == 0 {
        "Coming soon".to_string()
    } else {
        release.format("%d/%m/%Y").to_string()
    };

    let tag_count = 2 + rng.below(5);
    let picked = rng.pick_tags(tag_count);
    let mut bonus = 1.0;
    let mut entries = Vec::with_capacity(picked.len());
    for (rank, &t) in picked.iter().enumerate() {
        let (tag, _) = TAGS[t];
        if matches!(tag, "Puzzle" | "Cozy" | "Horror") {
            bonus *= 1.6;
        }
        let votes = 40 * (picked.len() - rank) + rng.below(60);
        entries.push(format!("'{}': {votes}", tag.replace('\'', "\\'")));
    }
    let tags = if rng.below(50) == 0 {
        String::new()
    } else {
        format!("{{{}}}", entries.join(", "))
    };

    let reviews = (rng.gauss(5.0, 1.8).exp() * bonus).round() as i64;
    let positive_share = 0.55 + 0.4 * rng.next_f64();
    let positive = (reviews as f64 * positive_share).round() as i64;

    SampleGame {
        name: format!("Sample Game {i:04}"),
        release_date,
        price: PRICES[rng.below(PRICES.len())].to_string(),
        positive,
        negative: reviews - positive,
        tags,
    }
}

fn write_csv(path: &str, games: &[SampleGame]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for game in games {
        writer.serialize(game).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, games: &[SampleGame]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("release_date", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("positive", DataType::Int64, false),
        Field::new("negative", DataType::Int64, false),
        Field::new("tags", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(games.iter().map(|g| &g.name))),
            Arc::new(StringArray::from_iter_values(
                games.iter().map(|g| &g.release_date),
            )),
            Arc::new(Float64Array::from_iter_values(
                games.iter().map(|g| g.price.parse::<f64>().unwrap_or(0.0)),
            )),
            Arc::new(Int64Array::from_iter_values(games.iter().map(|g| g.positive))),
            Arc::new(Int64Array::from_iter_values(games.iter().map(|g| g.negative))),
            Arc::new(StringArray::from_iter_values(games.iter().map(|g| &g.tags))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let games: Vec<SampleGame> = (0..GAME_COUNT).map(|i| sample_game(i, &mut rng)).collect();

    write_csv("sample_games.csv", &games)?;
    write_parquet("sample_games.parquet", &games)?;

    println!("Wrote {} games to sample_games.csv and sample_games.parquet", games.len());
    Ok(())
}
