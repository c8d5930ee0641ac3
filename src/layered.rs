//! Fully-connected layered topology.
//!
//! A `LayeredNet` is a [`NeuronGraph`] whose neurons are split into contiguous layers
//! `L0, L1, ..., Lk`:
//!
//! - input neurons: indices `[0, L0)`
//! - hidden neurons: everything between the first and last layer
//! - output neurons: the last `Lk` indices
//!
//! Every neuron in layer `i` has an edge to every neuron in layer `i + 1` and to nothing
//! else (no skip connections, no recurrence).

use std::ops::{Deref, Range};

use crate::{Activation, Error, NeuronGraph, Result};

#[derive(Debug, Clone)]
pub struct LayeredNet {
    graph: NeuronGraph,
    layers: Vec<usize>,
}

impl LayeredNet {
    /// Builds a layered net with all edges weighted `0.0`.
    ///
    /// `layers` includes the input and output widths and must sum to `neuron_count`.
    pub fn new(neuron_count: usize, layers: &[usize]) -> Result<Self> {
        Self::with_initial_weight(neuron_count, layers, 0.0)
    }

    /// Builds a layered net with every edge weighted `initial_weight`.
    pub fn with_initial_weight(
        neuron_count: usize,
        layers: &[usize],
        initial_weight: f32,
    ) -> Result<Self> {
        if layers.len() < 2 {
            return Err(Error::InvalidConfig(
                "layers must include input and output widths".to_owned(),
            ));
        }
        if layers.contains(&0) {
            return Err(Error::InvalidConfig(
                "all layer sizes must be > 0".to_owned(),
            ));
        }
        let total = total_neurons(layers)?;
        if total != neuron_count {
            return Err(Error::InvalidConfig(format!(
                "number of neurons ({neuron_count}) does not match total number in layers ({total})"
            )));
        }
        if neuron_count.checked_mul(neuron_count).is_none() {
            return Err(Error::InvalidConfig(format!(
                "{neuron_count} neurons overflow the weight matrix size"
            )));
        }

        let mut graph = NeuronGraph::new(neuron_count);
        let mut start = 0;
        for w in layers.windows(2) {
            let (size, next_size) = (w[0], w[1]);
            let next_start = start + size;
            for from in start..next_start {
                for to in next_start..next_start + next_size {
                    graph.connect(from, to, initial_weight);
                }
            }
            start = next_start;
        }

        log::debug!("built layered net {layers:?} with {neuron_count} neurons");

        Ok(Self {
            graph,
            layers: layers.to_vec(),
        })
    }

    /// Builds a layered net whose neuron count is the sum of `layers`.
    pub fn from_layer_sizes(layers: &[usize]) -> Result<Self> {
        Self::new(total_neurons(layers)?, layers)
    }

    #[inline]
    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    #[inline]
    pub fn hidden_layer_count(&self) -> usize {
        self.layers.len() - 2
    }

    #[inline]
    pub fn graph(&self) -> &NeuronGraph {
        &self.graph
    }

    #[inline]
    pub fn graph_mut(&mut self) -> &mut NeuronGraph {
        &mut self.graph
    }

    #[inline]
    pub fn input_width(&self) -> usize {
        self.layers[0]
    }

    #[inline]
    pub fn output_width(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// Neuron indices of layer `idx`.
    pub fn layer_range(&self, idx: usize) -> Range<usize> {
        let start: usize = self.layers[..idx].iter().sum();
        start..start + self.layers[idx]
    }

    pub fn input_neurons(&self) -> Range<usize> {
        0..self.input_width()
    }

    pub fn hidden_neurons(&self) -> Range<usize> {
        self.input_width()..self.neuron_count() - self.output_width()
    }

    pub fn output_neurons(&self) -> Range<usize> {
        self.neuron_count() - self.output_width()..self.neuron_count()
    }

    /// Runs the net on `input` and returns the output vector.
    ///
    /// `use_sigmoid` selects sigmoid relaxation steps; otherwise steps are linear.
    pub fn output(&mut self, input: &[f32], use_sigmoid: bool) -> Vec<f32> {
        self.output_with(input, Activation::from_sigmoid_flag(use_sigmoid))
    }

    /// Runs the net on `input` with the given relaxation activation.
    ///
    /// Clamps the input neurons to `input`, performs `hidden_layer_count()` relaxation
    /// steps, then reads each output neuron's weighted input sum. The read-back itself
    /// carries the signal across the last layer transition, so the outputs reflect
    /// `input` for any depth. Output values are the raw (linear) sums.
    ///
    /// Shape contract: `input.len() == self.input_width()`.
    pub fn output_with(&mut self, input: &[f32], activation: Activation) -> Vec<f32> {
        assert_eq!(
            input.len(),
            self.input_width(),
            "input len {} does not match input width {}",
            input.len(),
            self.input_width()
        );

        for (n, &v) in self.input_neurons().zip(input) {
            self.graph.activate(n, v);
        }
        for _ in 0..self.hidden_layer_count() {
            self.graph.shift_with(activation);
        }
        self.output_neurons()
            .map(|n| self.graph.input_activation(n))
            .collect()
    }
}

/// Sum of the layer widths, or an error if it overflows `usize`.
pub(crate) fn total_neurons(layers: &[usize]) -> Result<usize> {
    layers
        .iter()
        .try_fold(0usize, |acc, &w| acc.checked_add(w))
        .ok_or_else(|| Error::InvalidConfig(format!("layer widths {layers:?} overflow usize")))
}

impl Deref for LayeredNet {
    type Target = NeuronGraph;

    #[inline]
    fn deref(&self) -> &NeuronGraph {
        &self.graph
    }
}
