//! Directed, weighted neuron graph.
//!
//! A `NeuronGraph` holds a fixed number of neurons `N`, identified by index in `[0, N)`.
//! Topology and weights live in two dense row-major `N x N` matrices:
//!
//! - `connections[from * N + to]`: whether the edge `from -> to` exists
//! - `weights[from * N + to]`: its weight (always `0.0` when the edge does not exist)
//!
//! Memory is quadratic in `N`; the graph is meant for small and medium networks.
//!
//! # Neighbor caches
//!
//! Incoming/outgoing neighbor lists are memoized per neuron on first query. Any
//! `connect`/`disconnect` anywhere in the graph drops every cached list, so the next
//! query for any neuron is recomputed from the matrices.
//!
//! # Relaxation
//!
//! [`NeuronGraph::shift_with`] performs one synchronous relaxation step: every neuron's
//! next activation is computed from the *previous* global state, and only then are all
//! activations overwritten. Carrying a signal across `L` edges takes `L` steps.

use std::cell::OnceCell;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Activation, Error, Result};

#[derive(Debug, Clone)]
pub struct NeuronGraph {
    neuron_count: usize,
    connections: Vec<bool>,
    weights: Vec<f32>,
    activations: Vec<f32>,
    incoming: Vec<OnceCell<Vec<usize>>>,
    outgoing: Vec<OnceCell<Vec<usize>>>,
}

impl NeuronGraph {
    /// Creates `neuron_count` disconnected neurons with zero activation.
    ///
    /// Panics if `neuron_count * neuron_count` overflows `usize`.
    pub fn new(neuron_count: usize) -> Self {
        let Some(cells) = neuron_count.checked_mul(neuron_count) else {
            panic!("neuron_count {neuron_count} overflows the N x N matrices");
        };
        Self {
            neuron_count,
            connections: vec![false; cells],
            weights: vec![0.0; cells],
            activations: vec![0.0; neuron_count],
            incoming: vec![OnceCell::new(); neuron_count],
            outgoing: vec![OnceCell::new(); neuron_count],
        }
    }

    #[inline]
    pub fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    #[inline]
    fn cell(&self, from: usize, to: usize) -> usize {
        assert!(
            from < self.neuron_count && to < self.neuron_count,
            "edge ({from}, {to}) out of range for {} neurons",
            self.neuron_count
        );
        from * self.neuron_count + to
    }

    /// Adds (or re-weights) the edge `from -> to`.
    ///
    /// Self-loops are accepted.
    pub fn connect(&mut self, from: usize, to: usize, weight: f32) {
        let c = self.cell(from, to);
        self.connections[c] = true;
        self.weights[c] = weight;
        self.invalidate_caches();
    }

    /// Removes the edge `from -> to` and resets its weight to zero.
    pub fn disconnect(&mut self, from: usize, to: usize) {
        let c = self.cell(from, to);
        self.connections[c] = false;
        self.weights[c] = 0.0;
        self.invalidate_caches();
    }

    #[inline]
    pub fn connected(&self, from: usize, to: usize) -> bool {
        self.connections[self.cell(from, to)]
    }

    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f32 {
        self.weights[self.cell(from, to)]
    }

    /// Row-major `(from, to)` weight matrix, zero at non-edges.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Overwrites the weight of an existing edge.
    ///
    /// Writing to a pair without an edge is ignored: the weight there stays `0.0`.
    /// Use [`NeuronGraph::try_set_weight`] to detect that case.
    pub fn set_weight(&mut self, from: usize, to: usize, weight: f32) {
        let c = self.cell(from, to);
        if self.connections[c] {
            self.weights[c] = weight;
        } else {
            log::trace!("ignoring weight {weight} for missing edge {from} -> {to}");
        }
    }

    /// Like [`NeuronGraph::set_weight`], but reports a missing edge.
    pub fn try_set_weight(&mut self, from: usize, to: usize, weight: f32) -> Result<()> {
        let c = self.cell(from, to);
        if !self.connections[c] {
            return Err(Error::NotConnected { from, to });
        }
        self.weights[c] = weight;
        Ok(())
    }

    /// Assigns a uniform random weight in `[min, max)` to every existing edge.
    ///
    /// Non-edges keep their zero weight.
    pub fn randomly_init_weights<R: Rng + ?Sized>(&mut self, min: f32, max: f32, rng: &mut R) {
        let dist = uniform(min, max);
        let mut edges = 0_usize;
        for (w, &exists) in self.weights.iter_mut().zip(&self.connections) {
            if exists {
                *w = dist.sample(rng);
                edges += 1;
            }
        }
        log::debug!("randomized {edges} edge weights in [{min}, {max})");
    }

    pub fn randomly_init_weights_with_seed(&mut self, min: f32, max: f32, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.randomly_init_weights(min, max, &mut rng);
    }

    /// Assigns a uniform random activation in `[min, max)` to every neuron.
    pub fn randomly_init_activations<R: Rng + ?Sized>(
        &mut self,
        min: f32,
        max: f32,
        rng: &mut R,
    ) {
        let dist = uniform(min, max);
        for a in &mut self.activations {
            *a = dist.sample(rng);
        }
    }

    /// True iff no neuron has an edge into `neuron`.
    ///
    /// This is purely structural and ignores any layer metadata.
    #[inline]
    pub fn is_input_neuron(&self, neuron: usize) -> bool {
        self.input_neurons_for(neuron).is_empty()
    }

    /// All structural input neurons, in index order.
    pub fn input_neurons(&self) -> Vec<usize> {
        (0..self.neuron_count)
            .filter(|&n| self.is_input_neuron(n))
            .collect()
    }

    /// Neurons with an edge into `neuron`, in index order.
    pub fn input_neurons_for(&self, neuron: usize) -> &[usize] {
        self.incoming[neuron].get_or_init(|| {
            (0..self.neuron_count)
                .filter(|&from| self.connected(from, neuron))
                .collect()
        })
    }

    /// Neurons `neuron` has an edge into, in index order.
    pub fn output_neurons_for(&self, neuron: usize) -> &[usize] {
        self.outgoing[neuron].get_or_init(|| {
            (0..self.neuron_count)
                .filter(|&to| self.connected(neuron, to))
                .collect()
        })
    }

    fn invalidate_caches(&mut self) {
        for cell in self.incoming.iter_mut().chain(self.outgoing.iter_mut()) {
            cell.take();
        }
    }

    #[inline]
    pub fn activate(&mut self, neuron: usize, activation: f32) {
        self.activations[neuron] = activation;
    }

    #[inline]
    pub fn activation(&self, neuron: usize) -> f32 {
        self.activations[neuron]
    }

    #[inline]
    pub fn activations(&self) -> &[f32] {
        &self.activations
    }

    pub fn clear_activations(&mut self) {
        self.activations.fill(0.0);
    }

    /// Sets every neuron's activation.
    ///
    /// Shape contract: `values.len() == self.neuron_count()`.
    pub fn activate_all(&mut self, values: &[f32]) {
        assert_eq!(
            values.len(),
            self.neuron_count,
            "activation vector len {} does not match neuron count {}",
            values.len(),
            self.neuron_count
        );
        self.activations.copy_from_slice(values);
    }

    /// Clamps the structural input neurons (in index order) to `values`.
    ///
    /// Shape contract: `values.len() == self.input_neurons().len()`.
    pub fn activate_input_neurons(&mut self, values: &[f32]) {
        let inputs = self.input_neurons();
        assert_eq!(
            values.len(),
            inputs.len(),
            "input vector len {} does not match {} input neurons",
            values.len(),
            inputs.len()
        );
        for (&n, &v) in inputs.iter().zip(values) {
            self.activations[n] = v;
        }
    }

    /// Weighted sum of the activations flowing into `neuron`.
    pub fn input_activation(&self, neuron: usize) -> f32 {
        let n = self.neuron_count;
        self.input_neurons_for(neuron)
            .iter()
            .fold(0.0, |sum, &from| {
                self.weights[from * n + neuron].mul_add(self.activations[from], sum)
            })
    }

    /// The next state of every neuron, computed from the current snapshot.
    ///
    /// Input neurons have no incoming edges; they keep their current activation.
    /// "Input" is the structural [`NeuronGraph::is_input_neuron`] test, also for a
    /// [`crate::LayeredNet`]: a hidden neuron whose incoming edges are all removed is clamped too.
    pub fn input_activations(&self) -> Vec<f32> {
        (0..self.neuron_count)
            .map(|n| {
                if self.is_input_neuron(n) {
                    self.activations[n]
                } else {
                    self.input_activation(n)
                }
            })
            .collect()
    }

    /// One synchronous relaxation step.
    ///
    /// The snapshot from [`NeuronGraph::input_activations`] is fully materialized before
    /// any activation is written, then `activation` is applied to every entry (input
    /// neurons included).
    pub fn shift_with(&mut self, activation: Activation) {
        let mut next = self.input_activations();
        activation.apply_all(&mut next);
        self.activations = next;
    }

    /// Linear relaxation step.
    pub fn shift(&mut self) {
        self.shift_with(Activation::Identity);
    }

    pub fn sigmoid_shift(&mut self) {
        self.shift_with(Activation::Sigmoid);
    }

    pub fn tanh_shift(&mut self) {
        self.shift_with(Activation::Tanh);
    }
}

fn uniform(min: f32, max: f32) -> Uniform<f32> {
    assert!(
        min.is_finite() && max.is_finite() && min < max,
        "random range must be finite with min < max, got [{min}, {max})"
    );
    Uniform::new(min, max)
}
