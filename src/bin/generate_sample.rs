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

    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// True with probability `percent` out of 100.
    fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const COUNTRIES: [&str; 10] = [
    "United States",
    "India",
    "United Kingdom",
    "France, Spain",
    "Japan",
    "South Korea",
    "Canada, United States",
    "Germany",
    "Mexico",
    "Brazil",
];

const GENRES: [&str; 8] = [
    "Dramas, International Movies",
    "Comedies",
    "Documentaries",
    "Action & Adventure, Sci-Fi",
    "Children & Family Movies",
    "Thrillers, Dramas",
    "Romantic Movies",
    "Horror Movies",
];

const RATINGS: [&str; 6] = ["G", "PG", "PG-13", "R", "TV-14", "TV-MA"];

/// Write a deterministic sample catalog CSV that exercises every cleaning
/// path: multi-value countries and genres, missing values, bad dates.
fn main() -> Result<()> {
    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_catalog.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("creating {out_path}"))?;

    writer.write_record([
        "show_id", "type", "title", "country", "date_added",
        "release_year", "rating", "duration", "listed_in",
    ])?;

    let n_rows = 200;
    for i in 0..n_rows {
        let kind = if rng.chance(70) { "Movie" } else { "TV Show" };
        let title = format!("Sample Title {i:03}");

        let country = if rng.chance(8) {
            String::new()
        } else {
            rng.pick(&COUNTRIES).to_string()
        };

        let year_added = 2015 + rng.below(9) as i32;
        let date_added = if rng.chance(5) {
            // a few unparseable / missing dates
            if rng.chance(50) { String::new() } else { "invalid".to_string() }
        } else {
            let month = rng.pick(&MONTHS);
            let day = 1 + rng.below(28);
            format!("{month} {day}, {year_added}")
        };

        let release_year = (year_added - rng.below(15) as i32).to_string();
        let duration = if kind == "Movie" {
            format!("{} min", 70 + rng.below(90))
        } else {
            format!("{} Seasons", 1 + rng.below(6))
        };
        let show_id = format!("s{}", i + 1);

        writer.write_record([
            show_id.as_str(),
            kind,
            title.as_str(),
            country.as_str(),
            date_added.as_str(),
            release_year.as_str(),
            *rng.pick(&RATINGS),
            duration.as_str(),
            *rng.pick(&GENRES),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_rows} rows to {out_path}");
    Ok(())
}
