use rand::SeedableRng;
use rand::rngs::StdRng;

use rust_nnet::{LayeredNet, NeuronGraph, backprop};

#[test]
fn partitions_match_structure_for_random_layouts() {
    let layouts: [&[usize]; 4] = [&[1, 1], &[4, 3, 2], &[2, 5, 5, 3], &[3, 1, 1, 1, 2]];
    for layers in layouts {
        let n: usize = layers.iter().sum();
        let net = LayeredNet::new(n, layers).unwrap();
        assert!(LayeredNet::new(n + 1, layers).is_err());

        let mut seen = vec![0_u8; n];
        for i in net.input_neurons().chain(net.hidden_neurons()).chain(net.output_neurons()) {
            seen[i] += 1;
        }
        assert!(seen.iter().all(|&c| c == 1), "{layers:?}");

        for i in 0..n {
            assert_eq!(net.is_input_neuron(i), net.input_neurons().contains(&i));
        }
        for o in net.output_neurons() {
            assert!(net.output_neurons_for(o).is_empty());
        }
    }
}

#[test]
fn rewiring_a_layered_net_is_visible_to_backprop() {
    let mut net = LayeredNet::with_initial_weight(4, &[2, 1, 1], 1.0).unwrap();
    assert_eq!(net.output_neurons_for(2), &[3]);

    // Cut the only hidden -> output edge: the hidden error must drop to zero.
    net.graph_mut().disconnect(2, 3);
    assert!(net.output_neurons_for(2).is_empty());
    let err = backprop::error(&net, &[1.0], &[0.0]);
    assert_eq!(err[3], 1.0);
    assert_eq!(err[2], 0.0);
    assert_eq!(err[0], 0.0);

    net.graph_mut().connect(2, 3, 0.5);
    let err = backprop::error(&net, &[1.0], &[0.0]);
    assert_eq!(err[2], 0.5);
    assert_eq!(err[0], 0.5);
}

#[test]
fn text_roundtrip_after_training_keeps_predictions() {
    let mut net = LayeredNet::new(5, &[2, 2, 1]).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    net.graph_mut().randomly_init_weights(-1.0, 1.0, &mut rng);

    for _ in 0..50 {
        let out = net.output(&[1.0, 0.0], true);
        backprop::backpropagate(&mut net, &[1.0], &out, 0.1);
    }

    let text = net.to_text_string().unwrap();
    let mut loaded = LayeredNet::from_text_str(&text).unwrap();
    assert_eq!(loaded.weights(), net.weights());

    for input in [[0.0_f32, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
        net.graph_mut().clear_activations();
        assert_eq!(loaded.output(&input, true), net.output(&input, true));
    }
}

#[test]
fn general_graph_relaxes_like_a_layered_net() {
    // The same 1 -> 1 -> 1 chain, wired by hand.
    let mut g = NeuronGraph::new(3);
    g.connect(0, 1, 0.5);
    g.connect(1, 2, 4.0);
    g.activate_input_neurons(&[2.0]);
    g.shift();

    let mut net = LayeredNet::new(3, &[1, 1, 1]).unwrap();
    net.graph_mut().set_weight(0, 1, 0.5);
    net.graph_mut().set_weight(1, 2, 4.0);
    let out = net.output(&[2.0], false);

    assert_eq!(g.activation(1), net.activation(1));
    assert_eq!(g.input_activation(2), out[0]);
    assert_eq!(out[0], 4.0);
}
