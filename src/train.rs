//! Example-by-example training loop.
//!
//! One epoch runs [`LayeredNet::output`] followed by [`backprop::backpropagate`] for every
//! example, in order. The epoch error is the sum over examples of the mean squared output
//! error, and training stops once it falls to `min_error` or after `max_epochs`.

use crate::{Activation, Error, LayeredNet, Result, backprop};

/// One input vector with its expected output vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub input: Vec<f32>,
    pub target: Vec<f32>,
}

impl Example {
    pub fn new(input: impl Into<Vec<f32>>, target: impl Into<Vec<f32>>) -> Self {
        Self {
            input: input.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub learn_rate: f32,
    /// Stop once an epoch's total error is at or below this value.
    pub min_error: f32,
    pub max_epochs: usize,
    /// Activation of the relaxation steps in the forward pass.
    pub activation: Activation,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learn_rate: 0.1,
            min_error: 0.01,
            max_epochs: 10_000,
            activation: Activation::Sigmoid,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learn_rate.is_finite() && self.learn_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learn_rate must be finite and > 0, got {}",
                self.learn_rate
            )));
        }
        if !(self.min_error.is_finite() && self.min_error >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_error must be finite and >= 0, got {}",
                self.min_error
            )));
        }
        if self.max_epochs == 0 {
            return Err(Error::InvalidConfig("max_epochs must be > 0".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub epochs: usize,
    pub final_error: f32,
    pub converged: bool,
    /// Total error of every epoch, in order.
    pub history: Vec<f32>,
}

fn check_examples(net: &LayeredNet, examples: &[Example]) -> Result<()> {
    if examples.is_empty() {
        return Err(Error::InvalidData("examples must not be empty".to_owned()));
    }
    for (i, ex) in examples.iter().enumerate() {
        if ex.input.len() != net.input_width() {
            return Err(Error::InvalidShape(format!(
                "example {i} input len {} does not match input width {}",
                ex.input.len(),
                net.input_width()
            )));
        }
        if ex.target.len() != net.output_width() {
            return Err(Error::InvalidShape(format!(
                "example {i} target len {} does not match output width {}",
                ex.target.len(),
                net.output_width()
            )));
        }
    }
    Ok(())
}

#[inline]
fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// Train `net` on `examples` until the epoch error reaches `cfg.min_error`.
pub fn train(net: &mut LayeredNet, examples: &[Example], cfg: TrainConfig) -> Result<TrainReport> {
    cfg.validate()?;
    check_examples(net, examples)?;

    let mut history = Vec::new();
    let mut total = f32::INFINITY;
    let mut converged = false;

    for epoch in 0..cfg.max_epochs {
        total = 0.0;
        for ex in examples {
            let actual = net.output_with(&ex.input, cfg.activation);
            let errout = backprop::backpropagate(net, &ex.target, &actual, cfg.learn_rate);
            total += mean(&errout);
        }
        history.push(total);

        if !total.is_finite() {
            return Err(Error::InvalidData(format!(
                "training diverged at epoch {epoch} (error {total}); lower the learn rate"
            )));
        }
        if epoch % 1000 == 0 {
            log::debug!("epoch {epoch}: learn_rate={} error={total}", cfg.learn_rate);
        }
        if total <= cfg.min_error {
            converged = true;
            break;
        }
    }

    log::debug!(
        "training stopped after {} epochs, error={total}, converged={converged}",
        history.len()
    );

    Ok(TrainReport {
        epochs: history.len(),
        final_error: total,
        converged,
        history,
    })
}

/// Total error over `examples` without touching the weights.
///
/// Activations are still overwritten by the forward passes.
pub fn evaluate(net: &mut LayeredNet, examples: &[Example], activation: Activation) -> Result<f32> {
    check_examples(net, examples)?;

    let mut total = 0.0;
    for ex in examples {
        let actual = net.output_with(&ex.input, activation);
        let sq: Vec<f32> = actual
            .iter()
            .zip(&ex.target)
            .map(|(a, t)| (t - a) * (t - a))
            .collect();
        total += mean(&sq);
    }
    Ok(total)
}
