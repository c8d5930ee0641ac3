//! A small neuron-graph network crate.
//!
//! `rust-nnet` is a from-scratch neural network engine built on a general directed,
//! weighted neuron graph rather than per-layer matrix algebra.
//!
//! # Building blocks
//!
//! - [`NeuronGraph`]: `N` neurons, dense `N x N` edge/weight matrices and an activation
//!   vector. Forward propagation is a synchronous relaxation step
//!   ([`NeuronGraph::shift_with`]).
//! - [`LayeredNet`]: a graph wired as fully-connected bipartite layers, with input /
//!   hidden / output partitions and a multi-step forward pass ([`LayeredNet::output`]).
//! - [`backprop`]: error propagation and weight updates directly on the graph.
//! - [`train`]: an example-by-example training loop over the two.
//!
//! # Panics vs `Result`
//!
//! - Graph operations, the forward pass and backpropagation panic on out-of-range neuron
//!   indices or vector length mismatches; those are programmer errors.
//! - Construction of a [`LayeredNet`], training configuration and persistence validate
//!   their inputs and return [`Result`].
//!
//! # Data layout
//!
//! - Scalars are `f32`.
//! - Weight matrices are row-major `(from, to)` with `N * N` entries, zero at non-edges.
//! - Memory grows quadratically with the neuron count; this crate targets small and
//!   medium networks.

//! # Quick start
//!
//! ```rust
//! use rust_nnet::{LayeredNet, backprop};
//!
//! # fn main() -> rust_nnet::Result<()> {
//! // 2 inputs -> 2 hidden -> 1 output.
//! let mut net = LayeredNet::new(5, &[2, 2, 1])?;
//! net.graph_mut().randomly_init_weights_with_seed(-1.0, 1.0, 0);
//!
//! let input = [1.0_f32, 0.0];
//! let target = [1.0_f32];
//! let actual = net.output(&input, true);
//! let sq_err = backprop::backpropagate(&mut net, &target, &actual, 0.1);
//! assert_eq!(sq_err.len(), 1);
//! # Ok(())
//! # }
//! ```

//! # Training loop
//!
//! ```rust
//! use rust_nnet::{Example, LayeredNet, TrainConfig};
//!
//! # fn main() -> rust_nnet::Result<()> {
//! let mut net = LayeredNet::from_layer_sizes(&[2, 1])?;
//! let examples = vec![
//!     Example::new(vec![1.0_f32, 0.0], vec![0.5_f32]),
//!     Example::new(vec![0.0_f32, 1.0], vec![-0.25_f32]),
//! ];
//! let report = rust_nnet::train(
//!     &mut net,
//!     &examples,
//!     TrainConfig {
//!         learn_rate: 0.2,
//!         min_error: 1e-4,
//!         max_epochs: 1_000,
//!         activation: rust_nnet::Activation::Identity,
//!     },
//! )?;
//! assert!(report.converged);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod backprop;
pub mod error;
pub mod graph;
pub mod layered;
pub mod persist;
pub mod train;

#[cfg(feature = "serde")]
pub mod serde_model;

pub use activation::Activation;
pub use error::{Error, Result};
pub use graph::NeuronGraph;
pub use layered::LayeredNet;
pub use train::{Example, TrainConfig, TrainReport, evaluate, train};
