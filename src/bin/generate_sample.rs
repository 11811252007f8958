use chrono::{Duration, NaiveDate};

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

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let models: Vec<(&str, i64, i64)> = vec![
        // (model, price band low, price band high)
        ("ford f-150", 6000, 42_000),
        ("ford focus", 3000, 16_000),
        ("chevrolet silverado 1500", 7000, 45_000),
        ("toyota camry", 4000, 22_000),
        ("toyota", 3500, 20_000),
        ("bmw x5", 9000, 55_000),
        ("honda civic", 3000, 18_000),
        ("gmc yukon", 8000, 48_000),
        ("nissan altima", 3000, 17_000),
        ("jeep wrangler", 9000, 38_000),
    ];
    let colors = [
        "white", "black", "silver", "grey", "blue", "red", "green", "brown",
    ];
    let first_day = NaiveDate::from_ymd_opt(2018, 5, 1).expect("valid date");

    let mut writer = csv::Writer::from_path("sample_listings.csv")
        .expect("Failed to create output file");
    writer
        .write_record([
            "price",
            "model_year",
            "model",
            "cylinders",
            "odometer",
            "paint_color",
            "is_4wd",
            "date_posted",
        ])
        .expect("Failed to write header");

    let n_rows = 800;
    for _ in 0..n_rows {
        let &(model, price_lo, price_hi) = rng.pick(&models);
        let price = rng.range(price_lo, price_hi);
        let model_year = rng.range(1998, 2019);
        let cylinders = *rng.pick(&[4i64, 4, 6, 6, 8]);
        let odometer = rng.range(5_000, 280_000);
        let date = first_day + Duration::days(rng.range(0, 350));

        // The real snapshot stores nullable integers as floats and leaves
        // plenty of cells empty; mirror both quirks.
        let model_year_cell = if rng.chance(0.07) {
            String::new()
        } else {
            format!("{model_year}.0")
        };
        let cylinders_cell = if rng.chance(0.10) {
            String::new()
        } else {
            format!("{cylinders}.0")
        };
        let odometer_cell = if rng.chance(0.15) {
            String::new()
        } else {
            format!("{odometer}.0")
        };
        let paint_cell = if rng.chance(0.18) {
            String::new()
        } else {
            rng.pick(&colors).to_string()
        };
        let is_4wd_cell = if rng.chance(0.5) {
            "1.0".to_string()
        } else {
            String::new()
        };

        writer
            .write_record([
                price.to_string(),
                model_year_cell,
                model.to_string(),
                cylinders_cell,
                odometer_cell,
                paint_cell,
                is_4wd_cell,
                date.format("%Y-%m-%d").to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} listings to sample_listings.csv");
}
