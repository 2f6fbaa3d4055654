#![cfg(feature = "serde")]

use approx::assert_relative_eq;
use stockflow_core::{Definition, Status};

const FALLING: &str = r#"
stops = ["h <= 0"]

[model]
name = "falling"
dt = 0.5
max_t = 60.0

[constants.g]
value = 9.81
unit = "m/s^2"

[variables.h]
start = 20.0
unit = "m"
increase = ["v * dt"]

[variables.v]
start = 0.0
unit = "m/s"
decrease = ["g * dt"]

[variables.speed]
name = "abs_v"
define = "abs(v)"
"#;

#[test]
fn builds_and_runs_a_toml_model() {
    let definition: Definition = toml::from_str(FALLING).unwrap();
    assert_eq!(definition.model.name, "falling");
    assert_eq!(definition.stops, ["h <= 0"]);

    let mut model = definition.build().unwrap();
    let names: Vec<_> = model.entities().map(|entity| entity.name()).collect();
    assert_eq!(names, ["g", "h", "v", "abs_v"]);

    let outcome = model.run(true).unwrap();

    assert!(matches!(outcome.status, Status::StopCondition { index: 0, .. }));
    assert!(model.value("h").unwrap() <= 0.0);
    let v = model.series_for("v").unwrap();
    assert_eq!(v.len(), outcome.ticks);
    assert_relative_eq!(model.value("abs_v").unwrap(), v[v.len() - 1].abs());
}

#[test]
fn model_table_is_optional() {
    let definition: Definition = toml::from_str(
        r#"
        [constants.k]
        value = 1.0
        "#,
    )
    .unwrap();

    assert_eq!(definition.model.dt, 0.1);
    assert_eq!(definition.model.max_t, None);
    assert_eq!(definition.build().unwrap().value("k"), Some(1.0));
}

#[test]
fn unknown_fields_are_rejected() {
    let result: Result<Definition, _> = toml::from_str(
        r#"
        [variables.x]
        start = 1.0
        increse = ["1"]
        "#,
    );
    assert!(result.is_err());
}
