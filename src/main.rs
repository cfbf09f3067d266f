use kmeans_perceptron_graddesc::logger::init_logger;
use kmeans_perceptron_graddesc::{
    Image, Initialization, KMeansConfig, Model, Perceptron, PerceptronConfig, Result, Row,
};
use ndarray::array;

const CLUSTER_COUNTS: [usize; 5] = [3, 5, 10, 15, 20];

/// Smooth color gradient with a few solid blocks, enough structure for the demo.
fn synthetic_image() -> Image {
    Image::from_fn(64, 48, |x, y| {
        if (16..32).contains(&x) && (12..24).contains(&y) {
            [230, 40, 40]
        } else if x >= 48 && y >= 36 {
            [20, 20, 200]
        } else {
            [(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8]
        }
    })
}

fn compress(image: &Image) -> Result<()> {
    log::info!(
        "Image is {}x{} with {} distinct colors",
        image.width(),
        image.height(),
        image.distinct_colors()
    );

    for k in CLUSTER_COUNTS {
        let config = KMeansConfig::new(k)
            .with_seed(42)
            .with_init(Initialization::KMeansPlusPlus)
            .with_n_init(3);
        let clustering = Model::with_config(config).fit(image)?;
        let recolored = image.recolor(&clustering.clusters);

        log::info!(
            "K={}: inertia {:.1} after {} iterations (converged: {}), {} colors left",
            k,
            clustering.inertia,
            clustering.iterations,
            clustering.converged,
            recolored.distinct_colors()
        );
    }

    Ok(())
}

fn classify() -> Result<()> {
    let rows = vec![
        Row::new(vec![0., 0.], vec![-1.]),
        Row::new(vec![0., 1.], vec![-1.]),
        Row::new(vec![5., 5.], vec![1.]),
        Row::new(vec![5., 6.], vec![1.]),
    ];

    let mut perceptron = Perceptron::with_config(PerceptronConfig::default().with_seed(7));
    perceptron.train(&rows)?;

    for features in [array![5., 5.5], array![0., 0.5]] {
        let predicted = perceptron.predict(features.view())?;
        log::info!("Predicted {} for {}", predicted, features);
    }

    Ok(())
}

fn main() {
    init_logger().expect("Failed to initialize logger");

    if let Err(err) = compress(&synthetic_image()).and_then(|_| classify()) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
