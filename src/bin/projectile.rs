//! Search the launch angle that maximizes range for a configured launch speed.
//!
//! Writes one `<angle><config-stem>.dat` file per evaluated angle next to the
//! configuration, then a `<config-stem>_summary.json` sidecar.

use std::path::PathBuf;

use clap::Parser;
use projectile_range::config::load_setup;
use projectile_range::export::samples::DatFileSink;
use projectile_range::export::summary::{self, Metadata};
use projectile_range::search::{SearchReport, maximize_range};
use projectile_range::trajectory::EulerDragIntegrator;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Range-maximizing launch angle search (forward Euler, quadratic drag)"
)]
struct Cli {
    /// Launch configuration (.json, .yaml/.yml or .toml)
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let setup = load_setup(&cli.config)?;

    let initial = setup.params.clone();
    let mut params = setup.params;
    let integrator = EulerDragIntegrator::new(setup.density);
    let mut sink = DatFileSink::for_config(&cli.config);

    let report = maximize_range(&mut params, &integrator, &mut sink, &setup.search)?;

    for step in &report.steps {
        println!(
            "[angle] {} deg -> range {:.3} m ({} samples)",
            step.tag, step.range, step.samples
        );
    }
    warn_on_vertical(&report);

    let summary_path = summary::summary_path(sink.base());
    let config_display = cli.config.display().to_string();
    let meta = Metadata {
        config: &config_display,
        density_model: setup.density.label(),
        rotation: setup.search.rotation.label(),
        angle_step_deg: setup.search.angle_step_deg,
    };
    summary::write_summary(&summary_path, &meta, &initial, &report, sink.written())?;

    let best = report.best_step();
    println!("=== Search Summary ===");
    println!("Launch speed   : {:.3} m/s", initial.launch_speed());
    println!(
        "Best angle     : {} deg ({:.4} deg exact)",
        best.tag, best.angle_deg
    );
    println!("Best range     : {:.3} m", best.range);
    println!("Evaluations    : {}", report.evaluations());
    println!("Data files     : {}", sink.written().len());
    println!("Summary        : {}", summary_path.display());

    Ok(())
}

fn warn_on_vertical(report: &SearchReport) {
    if let Some(step) = report.steps.iter().find(|step| step.launch.x <= 0.0) {
        eprintln!(
            "[warn] launch vector reached vertical at tag {}; angles past this point are not meaningful",
            step.tag
        );
    }
}
