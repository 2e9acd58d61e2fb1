// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Headless network driver.
//!
//! Builds a preset network from `neuroweave.toml` (or defaults), runs it for a
//! fixed number of ticks while wandering the input rates, and prints the final
//! statistics as JSON on stdout.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use neuroweave::config::{load_config_or_default, NeuroweaveConfig};
use neuroweave::engine::{InputRates, Network};
use neuroweave::neural::Coord3;
use neuroweave::observability::{debug_flags_help, parse_debug_flags, LoggingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preset {
    /// Proximity-wired population with three inputs, two of them correlated
    Standard,
    /// Three hand-placed neurons and two explicit synapses
    FewNeurons,
    /// Proximity-wired population with one input at the origin
    OneInput,
}

impl Preset {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "standard" => Ok(Preset::Standard),
            "few-neurons" => Ok(Preset::FewNeurons),
            "one-input" => Ok(Preset::OneInput),
            other => bail!("unknown preset `{other}` (expected standard, few-neurons or one-input)"),
        }
    }
}

struct Args {
    config_path: Option<PathBuf>,
    preset: Preset,
    ticks: usize,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: headless_sim [--config <path>] [--preset <name>] [--ticks <n>] [--set key=value]...\n\n\
         Presets: standard (default), few-neurons, one-input\n\
         Defaults:\n\
         - ticks: 2000\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Result<Args> {
    let mut parsed = Args {
        config_path: None,
        preset: Preset::Standard,
        ticks: 2000,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config_path = Some(PathBuf::from(v));
            }
            "--preset" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.preset = Preset::parse(&v)?;
            }
            "--ticks" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.ticks = v
                    .parse()
                    .with_context(|| format!("--ticks expects a count, got `{v}`"))?;
            }
            "--set" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                let (key, value) = v
                    .split_once('=')
                    .with_context(|| format!("--set expects key=value, got `{v}`"))?;
                parsed.overrides.insert(key.to_string(), value.to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            flag if flag.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }
    Ok(parsed)
}

/// Network plus the knobs the driver keeps turning
struct Scene {
    network: Network,
    rates: Option<InputRates>,
}

fn build_scene(preset: Preset, config: &NeuroweaveConfig) -> Result<Scene> {
    let mut config = config.clone();
    if preset != Preset::FewNeurons && config.simulation.initial_neurons == 0 {
        config.simulation.initial_neurons = 750;
    }
    if preset == Preset::FewNeurons {
        config.simulation.initial_neurons = 0;
    }
    let mut network = Network::new(&config).context("failed to build network")?;

    let rates = match preset {
        Preset::Standard => {
            let rates = InputRates::new(vec![30.0, 30.0, 10.0]);
            network.set_input_rate_array(rates.clone(), None, None)?;
            Some(rates)
        }
        Preset::OneInput => {
            let rates = InputRates::new(vec![40.0]);
            network.set_input_rate_array(rates.clone(), Some(vec![Coord3::ORIGIN]), None)?;
            Some(rates)
        }
        Preset::FewNeurons => {
            let a = network.create_neuron(Coord3::new(0.0, 0.0, 0.0));
            let b = network.create_neuron(Coord3::new(1.0, 0.0, 0.0));
            let c = network.create_neuron(Coord3::new(1.0, 1.0, 0.0));
            network.create_synapse(a, b, 0.9);
            network.create_synapse(b, c, 0.9);
            network.select_neuron(b);
            let rates = InputRates::new(vec![50.0]);
            network.set_input_rate_array(rates.clone(), Some(vec![Coord3::ORIGIN]), Some(vec![0.3]))?;
            Some(rates)
        }
    };
    network.add_voltage_detector(Coord3::ORIGIN, config.input.default_radius)?;

    Ok(Scene { network, rates })
}

/// Random walk of the input rates, the two first inputs moving together
fn perturb_rates(rates: &InputRates, rng: &mut StdRng) {
    rates.with_mut(|r| {
        let shared: f32 = rng.gen_range(-5.0..=5.0);
        for (i, rate) in r.iter_mut().enumerate() {
            let step = if i < 2 { shared } else { rng.gen_range(-5.0..=5.0) };
            *rate = (*rate + step).clamp(0.0, 120.0);
        }
    });
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = load_config_or_default(args.config_path.as_deref(), Some(&args.overrides))
        .context("failed to load configuration")?;

    let debug_flags = parse_debug_flags();
    let logging = LoggingConfig::with_level(config.logging.level.clone());

    #[cfg(feature = "file-logging")]
    let _guard = neuroweave::observability::init_logging_default(&debug_flags, &logging)?;
    #[cfg(not(feature = "file-logging"))]
    neuroweave::observability::init_console_logging(&debug_flags, &logging)?;

    info!(
        target: "neuroweave",
        "Starting headless run: preset={:?} ticks={}",
        args.preset,
        args.ticks
    );

    let mut scene = build_scene(args.preset, &config)?;
    let mut rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    for tick in 0..args.ticks {
        if tick % 100 == 99 {
            if let Some(rates) = &scene.rates {
                perturb_rates(rates, &mut rng);
            }
        }
        scene.network.tick()?;
    }

    let network = &scene.network;
    let report = json!({
        "preset": format!("{:?}", args.preset),
        "stats": network.stats(),
        "input_rates": scene.rates.as_ref().map(InputRates::snapshot),
        "input_fires": network.inputs().iter().map(|i| i.fire_count()).collect::<Vec<_>>(),
        "detector_voltages": network.detector_voltages(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(target: "neuroweave", "Headless run finished at t={:.1} ms", network.time());
    Ok(())
}
