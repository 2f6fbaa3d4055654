use approx::assert_relative_eq;
use stockflow_core::{Definition, Model, Status};
use stockflow_demos::{car, report};

fn load(text: &str) -> Model {
    let definition: Definition = toml::from_str(text).unwrap();
    let mut model = definition.build().unwrap();
    model.initialize_definitions().unwrap();
    model
}

#[test]
fn car_file_matches_the_built_in_model() {
    let mut from_file = load(include_str!("../models/car.toml"));
    let mut built_in = car::model().unwrap();

    let names = |model: &Model| -> Vec<String> {
        model.entities().map(|entity| entity.name().to_string()).collect()
    };
    assert_eq!(names(&from_file), names(&built_in));

    let a = from_file.run(true).unwrap();
    let b = built_in.run(true).unwrap();

    assert_eq!(a, b);
    assert_eq!(from_file.history(), built_in.history());
}

#[test]
fn drain_file_runs_to_its_stop_condition() {
    let mut model = load(include_str!("../models/drain.toml"));
    let outcome = model.run(true).unwrap();

    assert!(matches!(outcome.status, Status::StopCondition { index: 0, .. }));
    assert_eq!(outcome.ticks, 5);
    assert_relative_eq!(model.value("x").unwrap(), 0.0);
    assert_eq!(model.series_for("x").unwrap(), [10.0, 8.0, 6.0, 4.0, 2.0]);

    let table = report::table(&model, &["x"], 1).unwrap();
    assert_eq!(table.lines().count(), 6);
}
