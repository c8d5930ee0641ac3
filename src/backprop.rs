//! Backpropagation on the neuron graph.
//!
//! Errors are propagated backward through the existing edges as plain weighted sums
//! (no activation-derivative term), then every edge into an output or hidden neuron is
//! nudged by `activation[source] * error[destination] * learn_rate`.
//!
//! Typical training flow:
//!
//! - `let actual = net.output(input, true)`
//! - `let errout = backpropagate(&mut net, target, &actual, learn_rate)`
//! - use `errout` (squared output errors) as the convergence signal

use crate::LayeredNet;

/// Per-neuron error vector of length `net.neuron_count()`.
///
/// - output neuron `o = output_neurons()[i]`: `target[i] - actual[i]`
/// - hidden neurons, from the last to the first, then input neurons:
///   `sum over edges h -> k of err[k] * weight(h, k)`
///
/// Downstream errors are always final before they are read, since hidden neurons are
/// visited in reverse index order and layers only connect forward.
///
/// Shape contract: `target.len() == actual.len() == net.output_width()`.
pub fn error(net: &LayeredNet, target: &[f32], actual: &[f32]) -> Vec<f32> {
    assert_eq!(
        target.len(),
        net.output_width(),
        "target len {} does not match output width {}",
        target.len(),
        net.output_width()
    );
    assert_eq!(
        actual.len(),
        net.output_width(),
        "actual len {} does not match output width {}",
        actual.len(),
        net.output_width()
    );

    let mut err = vec![0.0_f32; net.neuron_count()];

    for ((o, &t), &a) in net.output_neurons().zip(target).zip(actual) {
        err[o] = t - a;
    }

    let upstream = net.hidden_neurons().rev().chain(net.input_neurons());
    for h in upstream {
        let e = net
            .output_neurons_for(h)
            .iter()
            .fold(0.0, |sum, &k| err[k].mul_add(net.weight(h, k), sum));
        err[h] = e;
    }

    err
}

/// Applies one training step for a single example and returns the squared error of each
/// output neuron.
///
/// The error vector is computed from the current weights before any weight is written,
/// so the whole update sees one consistent snapshot. The returned values are a
/// convergence metric only; they do not feed the update.
///
/// `actual` should be the result of [`LayeredNet::output`] for the same example, since
/// the update reads the activations that call left behind.
pub fn backpropagate(
    net: &mut LayeredNet,
    target: &[f32],
    actual: &[f32],
    learn_rate: f32,
) -> Vec<f32> {
    let err = error(net, target, actual);

    let errout = net.output_neurons().map(|o| err[o] * err[o]).collect();

    // Input neurons have no incoming edges, so only outputs and hidden neurons update.
    let targets: Vec<usize> = net.output_neurons().chain(net.hidden_neurons()).collect();
    let graph = net.graph_mut();
    for to in targets {
        let delta = err[to] * learn_rate;
        let sources = graph.input_neurons_for(to).to_vec();
        for from in sources {
            let w = graph.weight(from, to) + graph.activation(from) * delta;
            graph.set_weight(from, to, w);
        }
    }

    errout
}
