use gradfit::metrics::relative_error;
use gradfit::{Dataset, KNeighborsRegressor, Matrix};
use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TEST_DATA_RECORDS: usize = 10;
const K: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== KNN Regression: house price from lat, long, sqft_lot, sqft_living ===\n");

    let mut rng = StdRng::seed_from_u64(11);
    let dataset = synthetic_houses(1000, &mut rng)?;
    let (test, train) = dataset.shuffle_split(TEST_DATA_RECORDS, &mut rng)?;

    // sqft_lot spans orders of magnitude, so distances are measured on standardised features
    let mut model = KNeighborsRegressor::new(K).standardize(true);
    model.fit(&train.features, &train.targets())?;

    let predictions = model.predict(&test.features)?;
    for (i, (&actual, &predicted)) in test.targets().iter().zip(predictions.iter()).enumerate() {
        let err = relative_error(actual, predicted);
        println!("Our accuracy for test point {} is {:.2}%", i + 1, err * 100.0);
    }

    Ok(())
}

fn synthetic_houses(n: usize, rng: &mut StdRng) -> Result<Dataset, Box<dyn std::error::Error>> {
    let lat = Matrix::random_using((n, 1), Uniform::new(47.2, 47.8), rng);
    let long = Matrix::random_using((n, 1), Uniform::new(-122.5, -121.3), rng);
    let sqft_lot = Matrix::random_using((n, 1), Uniform::new(500.0, 100_000.0), rng);
    let sqft_living = Matrix::random_using((n, 1), Uniform::new(400.0, 6000.0), rng);
    let features = ndarray::concatenate![Axis(1), lat, long, sqft_lot, sqft_living];

    let price = features.map_axis(Axis(1), |row| {
        let north = (row[0] - 47.2) * 400_000.0;
        let west = (-121.3 - row[1]) * 150_000.0;
        100_000.0 + north + west + 0.5 * row[2] + 250.0 * row[3]
    });

    Ok(Dataset::from_targets(features, price)?)
}
