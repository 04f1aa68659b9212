// Demo driver: trains XOR with the library's single-example gradient descent.
//   cargo run -- [path/to/spec.json]
// Set RUST_LOG=debug to follow construction and per-epoch cost.
use std::process::ExitCode;

use lattice_nn::{train_epoch, Matrix, Network, NetworkError, NetworkSpec, Sgd};
use log::{error, info};

fn run() -> Result<(), NetworkError> {
    let spec = match std::env::args().nth(1) {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => NetworkSpec::xor(),
    };
    let mut network = Network::from_spec(&spec)?;
    if network.input_size() != 2 || network.output_size() != 1 {
        return Err(NetworkError::DatasetShape {
            expected: (2, 1),
            found: (network.input_size(), network.output_size()),
        });
    }
    info!(
        "training {} with layers {:?} for {} epochs",
        spec.name.as_deref().unwrap_or("network"),
        spec.layer_sizes,
        spec.epochs
    );

    let inputs = vec![
        Matrix::from_column(&[1.0, 0.0]),
        Matrix::from_column(&[1.0, 1.0]),
        Matrix::from_column(&[0.0, 1.0]),
        Matrix::from_column(&[0.0, 0.0]),
    ];
    let expected_outputs = vec![
        Matrix::from_column(&[1.0]),
        Matrix::from_column(&[0.0]),
        Matrix::from_column(&[1.0]),
        Matrix::from_column(&[0.0]),
    ];

    let optimizer = Sgd::new(spec.learning_rate);
    for epoch in 0..spec.epochs {
        let cost = train_epoch(&mut network, &inputs, &expected_outputs, &optimizer);
        if epoch % 1000 == 0 {
            info!("epoch {epoch}: cost = {cost:.6}");
        }
    }

    print!("{network}");
    for input in &inputs {
        let output = network.feedforward(input);
        println!("Input: {:?} -> Output: {:.4}", input.data(), output.get(0, 0));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("lattice-nn: {err}");
            ExitCode::FAILURE
        }
    }
}
