use rand::SeedableRng;
use rand::rngs::StdRng;

use rust_nnet::{Activation, Example, LayeredNet, TrainConfig, backprop};

fn xor_examples() -> Vec<Example> {
    vec![
        Example::new([1.0_f32, 1.0], [0.0_f32]),
        Example::new([0.0_f32, 0.0], [0.0_f32]),
        Example::new([1.0_f32, 0.0], [1.0_f32]),
        Example::new([0.0_f32, 1.0], [1.0_f32]),
    ]
}

fn mean(xs: &[f32]) -> f32 {
    xs.iter().sum::<f32>() / xs.len() as f32
}

#[test]
fn xor_error_trends_down_and_ends_small() {
    let examples = xor_examples();

    for seed in [0_u64, 1, 2, 3] {
        let mut net = LayeredNet::new(5, &[2, 2, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        net.graph_mut().randomly_init_weights(-1.0, 1.0, &mut rng);

        let report = rust_nnet::train(
            &mut net,
            &examples,
            TrainConfig {
                learn_rate: 0.3,
                min_error: 0.0,
                max_epochs: 3_000,
                activation: Activation::Sigmoid,
            },
        )
        .unwrap();

        let history = &report.history;
        assert_eq!(history.len(), 3_000);

        let first = history[0];
        let last = report.final_error;
        assert!(
            last < 0.15,
            "seed {seed}: final error {last} (first epoch {first})"
        );
        assert!(last < 0.5 * first, "seed {seed}: {first} -> {last}");

        // Not monotone per epoch, but the windowed mean falls.
        let head = mean(&history[..100]);
        let mid = mean(&history[1_400..1_500]);
        let tail = mean(&history[history.len() - 100..]);
        assert!(tail < head, "seed {seed}: head {head} tail {tail}");
        assert!(tail <= mid * 1.05, "seed {seed}: mid {mid} tail {tail}");

        let eval = rust_nnet::evaluate(&mut net, &examples, Activation::Sigmoid).unwrap();
        assert!(eval < 0.25, "seed {seed}: evaluated error {eval}");
    }
}

#[test]
fn manual_loop_matches_training_driver() {
    let examples = xor_examples();

    let mut a = LayeredNet::new(5, &[2, 2, 1]).unwrap();
    a.graph_mut().randomly_init_weights_with_seed(-1.0, 1.0, 11);
    let mut b = a.clone();

    let report = rust_nnet::train(
        &mut a,
        &examples,
        TrainConfig {
            learn_rate: 0.1,
            min_error: 0.0,
            max_epochs: 20,
            activation: Activation::Sigmoid,
        },
    )
    .unwrap();

    let mut totals = Vec::new();
    for _ in 0..20 {
        let mut total = 0.0_f32;
        for ex in &examples {
            let out = b.output(&ex.input, true);
            let errout = backprop::backpropagate(&mut b, &ex.target, &out, 0.1);
            total += mean(&errout);
        }
        totals.push(total);
    }

    assert_eq!(report.history, totals);
    assert_eq!(a.weights(), b.weights());
}
