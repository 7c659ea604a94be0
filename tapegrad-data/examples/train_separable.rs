//! Trains a small MLP on two linearly separable Gaussian blobs.
//!
//! Run with `RUST_LOG=debug` for per-step tracing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tapegrad_core::nn::losses::LossKind;
use tapegrad_core::train::{TrainConfig, Trainer};
use tapegrad_core::TapeGradError;
use tapegrad_data::datasets::separable_blobs;
use tapegrad_data::{DataLoader, RandomSampler, SequentialSampler};

fn main() -> Result<(), TapeGradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::default()
        .with_layer_sizes(vec![2, 16, 2])
        .with_learning_rate(0.1)
        .with_batch_size(32)
        .with_epochs(10)
        .with_loss(LossKind::CrossEntropy);
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(7);
    let train = separable_blobs(500, 0.8, &mut rng)?;
    let test = separable_blobs(100, 0.8, &mut rng)?;
    let mut train_loader = DataLoader::new(
        train,
        config.batch_size,
        RandomSampler::new(false, None).with_seed(7),
        false,
    )?;
    let mut test_loader = DataLoader::new(test, config.batch_size, SequentialSampler::new(), false)?;

    let mut trainer = Trainer::from_config(&config, &mut rng)?;
    println!("Training {:?} with {} loss", config.layer_sizes, config.loss);
    for _ in 0..config.epochs {
        let report = trainer.train_epoch(&mut train_loader)?;
        println!("{}", report);
    }

    let evaluation = trainer.evaluate(&mut test_loader)?;
    println!("Test set: {}", evaluation);
    Ok(())
}
