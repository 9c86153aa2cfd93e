//! Parameter Sweep
//!
//! Drives random in-bounds operating parameters through a prediction session
//! and logs the formatted results, for smoke-testing a model artifact.
//!
//! Usage: parameter_sweep [model_path] [count] [seed]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use silica_predictor::controls::{SliderSpec, AIR_FLOW, AMINE_FLOW, IRON_CONCENTRATE};
use silica_predictor::{presenter, InferenceEngine, InputParameters, ModelLoader, Outcome, Session};
use tracing::{error, info, warn};

/// Generates control values that sit exactly on each slider's step grid
struct ParameterGenerator {
    rng: StdRng,
}

impl ParameterGenerator {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn on_grid(&mut self, spec: &SliderSpec) -> f64 {
        let steps = ((spec.max - spec.min) / spec.step).round() as u64;
        let k = self.rng.gen_range(0..=steps);
        // Round to the display precision so float noise stays on the grid
        ((spec.min + k as f64 * spec.step) * 100.0).round() / 100.0
    }

    fn generate(&mut self) -> InputParameters {
        InputParameters::new(
            self.on_grid(&IRON_CONCENTRATE),
            self.on_grid(&AMINE_FLOW) as i64,
            self.on_grid(&AIR_FLOW) as i64,
        )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parameter_sweep=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let model_path = args.get(1).map(|s| s.as_str()).unwrap_or("model.onnx");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let seed: Option<u64> = args.get(3).and_then(|s| s.parse().ok());

    info!(model_path = %model_path, count = count, seed = ?seed, "Starting parameter sweep");

    let engine = ModelLoader::global().load(model_path).map(InferenceEngine::new);
    let mut session = Session::new(engine);
    if let Some(e) = session.load_error() {
        warn!(error = %e, "Model unavailable; every trigger will be rejected");
    }

    let mut generator = ParameterGenerator::new(seed);
    let (mut succeeded, mut failed) = (0u64, 0u64);
    let (mut lowest, mut highest) = (f64::INFINITY, f64::NEG_INFINITY);

    for i in 0..count {
        let params = generator.generate();
        if let Err(e) = session.controls_mut().set_all(params) {
            error!(error = %e, "Generated parameters rejected");
            failed += 1;
            continue;
        }

        match session.trigger() {
            Outcome::Success(result) => {
                succeeded += 1;
                lowest = lowest.min(result.silica_percentage);
                highest = highest.max(result.silica_percentage);
                info!(
                    run = i + 1,
                    iron_concentrate = params.iron_concentrate,
                    amine_flow = params.amine_flow,
                    air_flow = params.air_flow,
                    prediction = %result.formatted(),
                    "Prediction"
                );
            }
            outcome => {
                failed += 1;
                for panel in presenter::present(&outcome) {
                    warn!(run = i + 1, "{}", panel.body);
                }
            }
        }
    }

    if succeeded > 0 {
        info!(
            "Completed! {} predictions ({} failed), range {} .. {}",
            succeeded,
            failed,
            presenter::format_percentage(lowest),
            presenter::format_percentage(highest)
        );
    } else {
        info!("Completed! No successful predictions ({} failed)", failed);
    }

    Ok(())
}
