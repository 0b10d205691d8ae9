use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use digit_mlp::{
    data::{load_samples, CLASSES, PIXELS},
    neural::{
        optimizer::{evaluate, Optimizer},
        NeuralNet,
    },
    viz::NNGui,
};

/// Train a digit classifier on one CSV file and score it on another
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training rows: `label,pixel,...`
    #[arg(long, default_value = "mnist_train.csv")]
    train: PathBuf,

    /// Test rows, same format
    #[arg(long, default_value = "mnist_test.csv")]
    test: PathBuf,

    /// Neurons in the hidden layer
    #[arg(long, default_value_t = 100)]
    hidden: usize,

    #[arg(long, default_value_t = 0.2)]
    learning_rate: f64,

    /// Seed for weight initialization
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Passes over the training rows
    #[arg(long, default_value_t = 1)]
    epochs: usize,

    /// Log the error every N training samples
    #[arg(long)]
    log_every: Option<usize>,

    /// Plot the training error in a window
    #[arg(long)]
    gui: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut net = NeuralNet::new(PIXELS, args.hidden, CLASSES, args.learning_rate, &mut rng)
        .context("failed to build network")?;

    let train = load_samples(&args.train, PIXELS, CLASSES);
    info!(samples = train.len(), "training");

    let optim = Optimizer::new(args.epochs).with_log(args.log_every);
    let trained = if args.gui {
        optim.train_gui::<NNGui>(&mut net, &train)
    } else {
        optim.train(&mut net, &train)
    };
    trained.context("training failed")?;

    let test = load_samples(&args.test, PIXELS, CLASSES);
    let eval = evaluate(&net, &test).context("evaluation failed")?;

    for p in &eval.predictions {
        println!("answer label : {}, network answer : {}", p.label, p.predicted);
    }
    match eval.accuracy() {
        Some(acc) => println!("correct answer rate : {acc}"),
        None => println!("correct answer rate : n/a (no test samples)"),
    }

    Ok(())
}
