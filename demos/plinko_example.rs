use gradfit::ObservationLog;
use gradfit::neighbors::run_analysis;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DROPS: usize = 1000;
const TEST_SET_SIZE: usize = 100;
const BOARD_WIDTH: f64 = 800.0;
const BUCKETS: u32 = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== KNN Classification: which bucket will the ball land in? ===\n");

    let mut rng = StdRng::seed_from_u64(300);
    let mut log = ObservationLog::new();
    for _ in 0..DROPS {
        let (position, bounciness, size, bucket) = drop_ball(&mut rng);
        log.record(position, bounciness, size, bucket);
    }
    println!("Recorded {} drops", log.len());

    let results = run_analysis(&log, TEST_SET_SIZE, 1..25, &mut rng)?;
    for (k, accuracy) in &results {
        println!("accuracy: {:.2} for k={}", accuracy, k);
    }

    if let Some((k, accuracy)) = results
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        println!("\nBest k={} with accuracy {:.2}", k, accuracy);
    }

    Ok(())
}

/// Bounces scatter the ball around its drop position before it settles.
fn drop_ball(rng: &mut StdRng) -> (f64, f64, f64, u32) {
    let position = rng.gen_range(0.0..BOARD_WIDTH);
    let bounciness = rng.gen_range(0.4..0.6);
    let size = rng.gen_range(16.0..18.0);

    let scatter = rng.gen_range(-60.0..60.0) * bounciness;
    let landed = (position + scatter).clamp(0.0, BOARD_WIDTH - 1.0);
    let bucket = (landed / (BOARD_WIDTH / BUCKETS as f64)).floor() as u32 + 1;

    (position, bounciness, size, bucket)
}
