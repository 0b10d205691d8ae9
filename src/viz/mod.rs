use std::{
    collections::VecDeque,
    sync::{mpsc::Receiver, Arc, Mutex},
    thread,
};

use eframe::CreationContext;
use egui::plot::{Line, Plot};

/// State sent to the GUI renderer on each logged training step
/// (step, squared error on the sample just trained)
pub type IterationState = (usize, f64);

/// Any type that can be rendered and updated during training
pub trait Visualizer: eframe::App + 'static {
    const DATA_LIMIT: usize = 20_000;
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self;
}

/// Default gui that displays error while training
pub struct NNGui {
    data: Arc<Mutex<VecDeque<IterationState>>>,
}

impl Visualizer for NNGui {
    /// Initialize NNGui, but also start a thread that listens to a receiver and updates the state
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self {
        let data = Arc::new(Mutex::new(VecDeque::new()));
        let data_clone = data.clone();

        let ctx = cc.egui_ctx.clone();
        // ends once the training thread drops its sender
        thread::spawn(move || {
            while let Ok(x) = rx.recv() {
                let Ok(mut data) = data_clone.lock() else {
                    break;
                };
                push_bounded(&mut data, x, Self::DATA_LIMIT);
                drop(data);
                ctx.request_repaint()
            }
        });

        Self { data }
    }
}

fn push_bounded(data: &mut VecDeque<IterationState>, x: IterationState, limit: usize) {
    if data.len() == limit {
        data.pop_front();
    }
    data.push_back(x);
}

impl eframe::App for NNGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let data: Vec<_> = self
            .get_data()
            .into_iter()
            .map(|(i, err)| [i as f64, err])
            .collect();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                let [i, err] = data.last().unwrap_or(&[0.0, f64::INFINITY]);
                ui.heading(format!("Sample {} error: {err:.6}", *i as usize));
                Plot::new("Error").show(ui, |plot_ui| plot_ui.line(Line::new(data)));
            });
        });
    }
}

impl NNGui {
    /// Returns a clone of the data as a vec
    /// Blocks until it can get a lock on its state data
    pub fn get_data(&self) -> Vec<IterationState> {
        match self.data.lock() {
            Ok(data) => data.iter().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}
