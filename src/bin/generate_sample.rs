use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// Booster category and its success probability.
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.2),
    ("v1.1", 0.35),
    ("FT", 0.8),
    ("B4", 0.6),
    ("B5", 0.95),
];

const LAUNCHES: usize = 56;
const MAX_PAYLOAD_KG: f64 = 9_600.0;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    site: &'static str,
    payload_kg: f64,
    booster: &'static str,
    class: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (0..LAUNCHES)
        .map(|i| {
            // Older boosters fly early, newer ones late.
            let era = (i * BOOSTERS.len() / LAUNCHES).min(BOOSTERS.len() - 1);
            let (booster, success_rate) = BOOSTERS[era];
            let payload_kg = (rng.next_f64() * MAX_PAYLOAD_KG).round();
            let class = i64::from(rng.next_f64() < success_rate);
            Launch {
                site: *rng.pick(&SITES),
                payload_kg,
                booster,
                class,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for (i, launch) in launches.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            launch.site.to_string(),
            launch.class.to_string(),
            format!("{:.1}", launch.payload_kg),
            launch.booster.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_batch(launches: &[Launch]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_kg))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

fn write_parquet(path: &str, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating writer")?;
    writer.write(batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = "sample_launches.csv";
    write_csv(csv_path, &launches)?;

    let batch = to_batch(&launches)?;
    let parquet_path = "sample_launches.parquet";
    write_parquet(parquet_path, &batch)?;

    print_batches(&[batch.slice(0, 5)]).context("printing preview")?;
    println!(
        "Wrote {} launches from {} sites to {csv_path} and {parquet_path}",
        launches.len(),
        SITES.len()
    );
    Ok(())
}
