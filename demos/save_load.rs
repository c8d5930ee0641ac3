use rust_nnet::LayeredNet;

fn main() -> rust_nnet::Result<()> {
    env_logger::init();

    let mut net = LayeredNet::new(7, &[3, 3, 1])?;
    net.graph_mut().randomly_init_weights_with_seed(-0.5, 0.5, 1);

    let path = "target/tmp_net.txt";
    net.save_text(path)?;

    let mut loaded = LayeredNet::load_text(path)?;
    let input = [0.2_f32, 0.4, 0.6];
    println!(
        "saved and loaded net: {path}, output before={:?} after={:?}",
        net.output(&input, true),
        loaded.output(&input, true)
    );
    Ok(())
}
