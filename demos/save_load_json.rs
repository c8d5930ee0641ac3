#[cfg(not(feature = "serde"))]
fn main() {
    println!("enable the `serde` feature: cargo run --example save_load_json --features serde");
}

#[cfg(feature = "serde")]
fn main() -> rust_nnet::Result<()> {
    use rust_nnet::LayeredNet;

    env_logger::init();

    // Two hidden layers: the text format cannot hold this net, JSON can.
    let mut net = LayeredNet::from_layer_sizes(&[4, 3, 3, 2])?;
    net.graph_mut().randomly_init_weights_with_seed(-1.0, 1.0, 0);

    let path = "target/tmp_net.json";
    net.save_json(path)?;

    let loaded = LayeredNet::load_json(path)?;
    assert_eq!(loaded.weights(), net.weights());
    println!("saved and loaded net: {path}");
    Ok(())
}
