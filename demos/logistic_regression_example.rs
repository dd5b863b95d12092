use gradfit::{Dataset, LogisticRegression, Matrix, Vector};
use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TEST_DATA_RECORDS: usize = 50;
const LEARNING_RATE: f64 = 0.5;
const ITERATIONS: usize = 100;
const BATCH_SIZE: usize = 10;
const DECISION_BOUNDARY: f64 = 0.5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Logistic Regression: did the car pass emissions? ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let dataset = synthetic_emissions(400, &mut rng)?;
    let (test, train) = dataset.shuffle_split(TEST_DATA_RECORDS, &mut rng)?;

    let mut model = LogisticRegression::with_params(LEARNING_RATE, ITERATIONS, BATCH_SIZE)
        .decision_boundary(DECISION_BOUNDARY);
    model.fit(&train.features, &train.targets())?;

    let accuracy = model.score(&test.features, &test.targets())?;
    let probabilities = model.predict_proba(&test.features)?;

    println!("Cost history (first 5): {:?}", &model.loss_history()[..5]);
    println!("\nFirst test cars:");
    for (i, (&actual, &p)) in test.targets().iter().zip(probabilities.iter()).take(5).enumerate() {
        println!("Car {}: passed={} probability={:.3}", i + 1, actual, p);
    }
    println!("\nAccuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

/// Lighter, less powerful cars tend to pass.
fn synthetic_emissions(n: usize, rng: &mut StdRng) -> Result<Dataset, Box<dyn std::error::Error>> {
    let horsepower = Matrix::random_using((n, 1), Uniform::new(50.0, 230.0), rng);
    let displacement = Matrix::random_using((n, 1), Uniform::new(70.0, 450.0), rng);
    let weight = Matrix::random_using((n, 1), Uniform::new(1600.0, 5000.0), rng);
    let features = ndarray::concatenate![Axis(1), horsepower, displacement, weight];

    let passed: Vector = features.map_axis(Axis(1), |row| {
        let load = row[0] / 230.0 + row[1] / 450.0 + row[2] / 5000.0;
        if load < 1.6 { 1.0 } else { 0.0 }
    });

    Ok(Dataset::from_targets(features, passed)?)
}
