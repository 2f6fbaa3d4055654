//! Interactive plots of stockflow runs.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- drain
//! cargo run --example plot --features plot -- oscillator
//! cargo run --example plot --features plot -- oscillator 0.2
//! ```
//!
//! # Modes
//!
//! - **drain** — A tank emptied at a rate proportional to its level, stopped
//!   once it is nearly empty. Plots the recorded history.
//!
//! - **oscillator [dt]** — A damped spring as two coupled stocks, collected
//!   live and overlaid on the analytical solution. Euler drift grows with the
//!   step size; try `0.05` (default), `0.2`, `0.5`.

use std::error::Error;

use stockflow_core::{Config, Constant, Event, ModelBuilder, Variable};
use stockflow_observers::{PlotObserver, ShowConfig, plot_history};

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "drain".into());
    match mode.as_str() {
        "drain" => drain(),
        "oscillator" => {
            let dt = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<f64>)
                .transpose()?
                .unwrap_or(0.05);
            oscillator(dt)
        }
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [drain|oscillator [dt]]");
            std::process::exit(1);
        }
    }
}

/// Empties a tank through an outflow proportional to its level.
fn drain() -> Result<(), Box<dyn Error>> {
    let mut model = ModelBuilder::new(Config::new("tank").dt(0.1))
        .declare("k", Constant::new("", 0.3).with_unit("1/s"))
        .declare("level", Variable::new("", 10.0).with_unit("m"))
        .declare("outflow", Variable::new("", 0.0).with_unit("m/s"))
        .define("outflow", "k * level")
        .decrease("level", "outflow * dt")
        .stop_when("level < 0.5")
        .build()?;

    model.initialize_definitions()?;
    model.run(true)?;

    if let Some(history) = model.history() {
        plot_history(
            history,
            &["level", "outflow"],
            ShowConfig::new().title("Tank drain").legend(),
        )?;
    }
    Ok(())
}

/// Damped spring, ẍ = −2ζω₀ẋ − ω₀²x, written as stocks `x` and `v`.
fn oscillator(dt: f64) -> Result<(), Box<dyn Error>> {
    let zeta = 0.1_f64;
    let omega0 = 1.0_f64;
    let omega_d = (omega0.powi(2) - zeta.powi(2)).sqrt();

    let mut model = ModelBuilder::new(Config::new("oscillator").dt(dt).max_t(30.0))
        .declare("zeta", Constant::new("", zeta))
        .declare("omega0", Constant::new("", omega0))
        .declare("x", Variable::new("", 1.0))
        .declare("v", Variable::new("", 0.0))
        .increase("x", "v * dt")
        .decrease("v", "(2 * zeta * omega0 * v + omega0 ** 2 * x) * dt")
        .build()?;

    // x(t) = e^(-ζt) · [cos(ω_d·t) + (ζ/ω_d)·sin(ω_d·t)]
    let analytical = move |t: f64| {
        (-zeta * t).exp() * ((omega_d * t).cos() + (zeta / omega_d) * (omega_d * t).sin())
    };

    let mut plot = PlotObserver::new(["Euler (numerical)", "Analytical"]);
    model.run_observed(false, |event: &Event<'_>| {
        let t = event.time();
        plot.record(t, [event.value("x"), Some(analytical(t))]);
        None
    })?;

    plot.show(
        ShowConfig::new()
            .title(format!(
                "Damped oscillator (ζ=0.1, dt={dt}): Euler vs. analytical"
            ))
            .legend(),
    )?;

    Ok(())
}
