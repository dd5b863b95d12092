use gradfit::{Dataset, LinearRegression, Matrix};
use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TEST_DATA_RECORDS: usize = 50;
const LEARNING_RATE: f64 = 0.1;
const ITERATIONS: usize = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Linear Regression: mpg from horsepower, weight, displacement ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let dataset = synthetic_cars(400, &mut rng)?;
    let (test, train) = dataset.shuffle_split(TEST_DATA_RECORDS, &mut rng)?;

    let mut model = LinearRegression::with_params(LEARNING_RATE, ITERATIONS);
    model.fit(&train.features, &train.targets())?;

    let r2 = model.score(&test.features, &test.targets())?;
    let history = model.loss_history();

    println!("Training samples: {}", train.n_samples());
    println!("Test samples: {}", test.n_samples());
    println!("MSE after first epoch: {:.4}", history[0]);
    println!("MSE after last epoch: {:.4}", history[history.len() - 1]);
    println!("Final learning rate: {:.4}", model.final_learning_rate().unwrap_or(LEARNING_RATE));
    println!("\nR^2 is {:.4}", r2);

    Ok(())
}

/// Cars whose mpg falls linearly with horsepower, weight and displacement.
fn synthetic_cars(n: usize, rng: &mut StdRng) -> Result<Dataset, Box<dyn std::error::Error>> {
    let horsepower = Matrix::random_using((n, 1), Uniform::new(50.0, 230.0), rng);
    let weight = Matrix::random_using((n, 1), Uniform::new(1600.0, 5000.0), rng);
    let displacement = Matrix::random_using((n, 1), Uniform::new(70.0, 450.0), rng);
    let features = ndarray::concatenate![Axis(1), horsepower, weight, displacement];

    let noise = ndarray::Array1::random_using(n, Normal::new(0.0, 1.5)?, rng);
    let mpg = features.map_axis(Axis(1), |row| {
        46.0 - 0.05 * row[0] - 0.005 * row[1] - 0.01 * row[2]
    }) + noise;

    Ok(Dataset::from_targets(features, mpg)?)
}
