use std::sync::mpsc;

use tracing::{debug, info};

use crate::{
    data::Sample,
    neural::{utils, NeuralNet},
    prelude::*,
    viz::Visualizer,
};

/// Feeds samples to a network one at a time, in order.
pub struct Optimizer {
    epochs: usize,
    samples_per_log: Option<usize>,
}

/// What the network answered for one test sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: usize,
    pub predicted: usize,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.label == self.predicted
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    pub fn correct(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.predictions.len()
    }

    /// Fraction of correct answers, or None when nothing was evaluated
    pub fn accuracy(&self) -> Option<f64> {
        if self.predictions.is_empty() {
            return None;
        }
        Some(self.correct() as f64 / self.total() as f64)
    }
}

impl Optimizer {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            samples_per_log: None,
        }
    }

    pub fn with_log(mut self, samples_per_log: Option<usize>) -> Self {
        self.samples_per_log = samples_per_log;
        self
    }

    fn should_log(&self, step: usize) -> bool {
        self.samples_per_log
            .is_some_and(|spl| spl > 0 && step % spl == 0)
    }

    pub fn train(&self, net: &mut NeuralNet, samples: &[Sample]) -> Result<()> {
        self.run(net, samples, |step, err| {
            info!(step, error = err, "training");
            Ok(())
        })
    }

    /// Trains on a worker thread while a window plots the logged error.
    pub fn train_gui<Gui: Visualizer>(
        &self,
        net: &mut NeuralNet,
        samples: &[Sample],
    ) -> Result<()> {
        std::thread::scope(|scope| -> Result<()> {
            let (tx, rx) = mpsc::channel();
            let handle = scope.spawn(move || -> Result<()> {
                self.run(net, samples, |step, err| {
                    tx.send((step, err)).map_err(|_| Error::ThreadErr)
                })
            });

            if let Err(e) = eframe::run_native(
                "Digit MLP",
                eframe::NativeOptions::default(),
                Box::new(|cc| Box::new(Gui::new(cc, rx))),
            ) {
                tracing::warn!(error = %e, "training monitor closed");
            }

            handle.join().map_err(|_| Error::ThreadErr)??;
            Ok(())
        })
    }

    /// The training loop. `on_log` receives the step and the squared error
    /// on the sample just trained.
    fn run<F>(&self, net: &mut NeuralNet, samples: &[Sample], mut on_log: F) -> Result<()>
    where
        F: FnMut(usize, f64) -> Result<()>,
    {
        let mut step = 0;
        for epoch in 0..self.epochs {
            info!(epoch, samples = samples.len(), "starting epoch");
            for sample in samples {
                net.train(&sample.input, &sample.target)?;
                step += 1;
                if self.should_log(step) {
                    let err = net.squared_error(&sample.input, &sample.target)?;
                    on_log(step, err)?;
                }
            }
        }
        Ok(())
    }
}

/// Predicts every sample and compares the strongest output with its label.
pub fn evaluate(net: &NeuralNet, samples: &[Sample]) -> Result<Evaluation> {
    let mut predictions = Vec::with_capacity(samples.len());
    for sample in samples {
        let output = net.predict(&sample.input)?;
        let predicted = utils::argmax(&output).ok_or(Error::DimensionErr)?;
        debug!(label = sample.label, predicted, "evaluated");
        predictions.push(Prediction {
            label: sample.label,
            predicted,
        });
    }
    Ok(Evaluation { predictions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{rows_from_reader, samples_from_rows, LabeledRow, Sample};
    use rand::{rngs::StdRng, SeedableRng};

    fn sample(label: usize, pixels: Vec<f64>) -> Sample {
        Sample::from_row(&LabeledRow { label, pixels }, 2, 2).unwrap()
    }

    fn toy_samples() -> Vec<Sample> {
        vec![
            sample(0, vec![230.0, 25.0]),
            sample(1, vec![25.0, 230.0]),
        ]
    }

    #[test]
    fn empty_evaluation() {
        let eval = Evaluation::default();
        assert_eq!(eval.accuracy(), None);
        assert_eq!(eval.total(), 0);
    }

    #[test]
    fn accuracy_ratio() {
        let eval = Evaluation {
            predictions: vec![
                Prediction {
                    label: 1,
                    predicted: 1,
                },
                Prediction {
                    label: 2,
                    predicted: 0,
                },
                Prediction {
                    label: 3,
                    predicted: 3,
                },
                Prediction {
                    label: 4,
                    predicted: 4,
                },
            ],
        };
        assert_eq!(eval.correct(), 3);
        assert_eq!(eval.accuracy(), Some(0.75));
    }

    #[test]
    fn no_samples_no_updates() {
        let mut net = NeuralNet::new(2, 3, 2, 0.3, &mut StdRng::seed_from_u64(1)).unwrap();
        let before = net.weights_ih().clone();

        Optimizer::new(3).train(&mut net, &[]).unwrap();

        assert_eq!(net.weights_ih(), &before);
        assert_eq!(evaluate(&net, &[]).unwrap().accuracy(), None);
    }

    #[test]
    fn train_matches_manual_loop() {
        let samples = toy_samples();
        let mut a = NeuralNet::new(2, 3, 2, 0.3, &mut StdRng::seed_from_u64(1)).unwrap();
        let mut b = a.clone();

        Optimizer::new(2).with_log(Some(1)).train(&mut a, &samples).unwrap();
        for _ in 0..2 {
            for s in &samples {
                b.train(&s.input, &s.target).unwrap();
            }
        }

        assert_eq!(a.weights_ih(), b.weights_ih());
        assert_eq!(a.weights_ho(), b.weights_ho());
    }

    #[test]
    fn learns_toy_problem() {
        let samples = toy_samples();
        let mut net = NeuralNet::new(2, 4, 2, 0.3, &mut StdRng::seed_from_u64(3)).unwrap();

        Optimizer::new(1_000).train(&mut net, &samples).unwrap();

        let eval = evaluate(&net, &samples).unwrap();
        assert_eq!(eval.accuracy(), Some(1.0));
    }

    #[test]
    fn ragged_rows_do_not_stop_training() {
        let rows = rows_from_reader("0,10,20\n1,30\n1,40,50\n".as_bytes());
        let samples = samples_from_rows(&rows, 2, 2);
        let mut net = NeuralNet::new(2, 3, 2, 0.3, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(Optimizer::new(1).train(&mut net, &samples), Ok(()));
        assert_eq!(evaluate(&net, &samples).unwrap().total(), 2);
    }

    #[test]
    fn rejects_wrong_input_size() {
        let samples = toy_samples();
        let mut net = NeuralNet::new(3, 3, 2, 0.3, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(
            Optimizer::new(1).train(&mut net, &samples),
            Err(Error::DimensionErr)
        );
        assert_eq!(evaluate(&net, &samples), Err(Error::DimensionErr));
    }
}
