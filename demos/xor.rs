use rust_nnet::{Activation, Example, LayeredNet, TrainConfig};

fn main() -> rust_nnet::Result<()> {
    env_logger::init();

    // Classic XOR dataset.
    let examples = vec![
        Example::new([1.0_f32, 1.0], [0.0_f32]),
        Example::new([0.0_f32, 0.0], [0.0_f32]),
        Example::new([1.0_f32, 0.0], [1.0_f32]),
        Example::new([0.0_f32, 1.0], [1.0_f32]),
    ];

    // 2 -> 2 -> 1 net, sigmoid relaxation.
    let mut net = LayeredNet::new(5, &[2, 2, 1])?;
    net.graph_mut().randomly_init_weights_with_seed(-1.0, 1.0, 0);

    let report = rust_nnet::train(
        &mut net,
        &examples,
        TrainConfig {
            learn_rate: 0.3,
            min_error: 0.1,
            max_epochs: 20_000,
            activation: Activation::Sigmoid,
        },
    )?;
    println!(
        "epochs={} final_error={} converged={}",
        report.epochs, report.final_error, report.converged
    );

    for ex in &examples {
        let out = net.output(&ex.input, true);
        println!("x={:?} y={:?}", ex.input, out);
    }

    Ok(())
}
