//! A car accelerating against rolling and air resistance.
//!
//! The motor pushes with a constant force while rolling resistance is
//! constant and air resistance grows with `v²`. Fuel burns in proportion to
//! the mechanical power delivered, `Pm = Fnetto · v`, and the run stops once
//! the tank is empty or after five minutes.
//!
//! | name     | kind     | rule                     | unit  |
//! |----------|----------|--------------------------|-------|
//! | `Froll`  | constant | 1000                     | N     |
//! | `k`      | constant | 0.1                      |       |
//! | `m_base` | constant | 1000                     | kg    |
//! | `rch`    | constant | 46e6                     | J/kg  |
//! | `Fm`     | constant | 1050                     | N     |
//! | `s`      | stock    | `+ v*dt`                 | m     |
//! | `v`      | stock    | `+ a*dt`                 | m/s   |
//! | `a`      | defined  | `Fnetto/m`               | m/s^2 |
//! | `Pm`     | defined  | `Fnetto*v`               | J/s   |
//! | `m_fuel` | stock    | `- Pm*dt/rch`            | kg    |
//! | `m`      | defined  | `m_base+m_fuel`          | kg    |
//! | `Flw`    | defined  | `k*v**2`                 | N     |
//! | `Fnetto` | defined  | `Fm-Froll-Flw`           | N     |

use stockflow_core::{Config, Constant, Error, Model, ModelBuilder, Variable};

/// Step size of the car model.
pub const DT: f64 = 0.1;

/// Run horizon of the car model.
pub const MAX_T: f64 = 300.0;

/// Fuel on board at the start.
pub const FUEL: f64 = 10.0;

/// Builds the car model, ready to run.
///
/// # Errors
///
/// Only fails if the declarations below are inconsistent.
pub fn model() -> Result<Model, Error> {
    ModelBuilder::new(Config::new("Car").dt(DT).max_t(MAX_T))
        // Constants
        .declare("Froll", Constant::new("", 1000.0).with_unit("N"))
        .declare("k", Constant::new("", 0.1))
        .declare("m_base", Constant::new("", 1000.0).with_unit("kg"))
        .declare("rch", Constant::new("", 46e6).with_unit("J/kg"))
        .declare("Fm", Constant::new("", 1050.0).with_unit("N"))
        // Variables
        .declare("s", Variable::new("", 0.0).with_unit("m"))
        .declare("v", Variable::new("", 0.0).with_unit("m/s"))
        .declare("a", Variable::new("", 0.0).with_unit("m/s^2"))
        .define("a", "Fnetto/m")
        .declare("Pm", Variable::new("", 0.0).with_unit("J/s"))
        .define("Pm", "Fnetto*v")
        .declare("m_fuel", Variable::new("", FUEL).with_unit("kg"))
        .declare("m", Variable::new("", 1000.0 + FUEL).with_unit("kg"))
        .define("m", "m_base+m_fuel")
        .declare("Flw", Variable::new("", 0.0).with_unit("N"))
        .define("Flw", "k*v**2")
        .declare("Fnetto", Variable::new("", 0.0).with_unit("N"))
        .define("Fnetto", "Fm-Froll-Flw")
        // Streams
        .increase("s", "v*dt")
        .increase("v", "a*dt")
        .decrease("m_fuel", "Pm*dt/rch")
        .stop_when("m_fuel <= 0")
        .build()
        .and_then(|mut model| {
            model.initialize_definitions()?;
            Ok(model)
        })
}
