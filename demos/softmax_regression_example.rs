use gradfit::dataset::one_hot;
use gradfit::{Dataset, Matrix, SoftmaxRegression};
use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TEST_DATA_RECORDS: usize = 50;
const LEARNING_RATE: f64 = 0.5;
const ITERATIONS: usize = 100;
const BATCH_SIZE: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Multinomial Regression: low / medium / high mpg ===\n");

    let mut rng = StdRng::seed_from_u64(3);
    let dataset = synthetic_mpg_classes(400, &mut rng)?;
    let (test, train) = dataset.shuffle_split(TEST_DATA_RECORDS, &mut rng)?;

    let mut model = SoftmaxRegression::with_params(LEARNING_RATE, ITERATIONS, BATCH_SIZE);
    model.fit(&train.features, &train.labels)?;

    let accuracy = model.score(&test.features, &test.labels)?;
    let predicted = model.predict(&test.features)?;

    let names = ["low (<15)", "medium (15-30)", "high (>=30)"];
    println!("First test predictions:");
    for class in predicted.iter().take(5) {
        println!("  {}", names[*class]);
    }
    println!("\nAccuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

/// Cars bucketed by mpg into three one-hot classes.
fn synthetic_mpg_classes(
    n: usize,
    rng: &mut StdRng,
) -> Result<Dataset, Box<dyn std::error::Error>> {
    let horsepower = Matrix::random_using((n, 1), Uniform::new(50.0, 230.0), rng);
    let displacement = Matrix::random_using((n, 1), Uniform::new(70.0, 450.0), rng);
    let weight = Matrix::random_using((n, 1), Uniform::new(1600.0, 5000.0), rng);
    let features = ndarray::concatenate![Axis(1), horsepower, displacement, weight];

    let classes: Vec<usize> = features
        .axis_iter(Axis(0))
        .map(|row| {
            let mpg = 55.0 - 0.08 * row[0] - 0.02 * row[1] - 0.005 * row[2];
            if mpg < 15.0 {
                0
            } else if mpg < 30.0 {
                1
            } else {
                2
            }
        })
        .collect();

    Ok(Dataset::new(features, one_hot(&classes, 3)?)?)
}
