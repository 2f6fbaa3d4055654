//! Plain-text rendering of recorded runs.

use std::fmt::Write as _;

use stockflow_core::{Error, Model};

/// Renders recorded series as whitespace-aligned columns, one row per tick.
///
/// The first column is the tick's start time. Every `every`-th row is kept,
/// always starting with the first.
///
/// # Errors
///
/// Returns [`Error::NotRecorded`] if the model did not record history or a
/// name was not tracked.
pub fn table(model: &Model, names: &[&str], every: usize) -> Result<String, Error> {
    let columns = names
        .iter()
        .map(|name| model.series_for(name))
        .collect::<Result<Vec<_>, _>>()?;
    let times = model
        .history()
        .map(|history| history.times())
        .unwrap_or_default();

    let mut out = format!("{:>12}", "t");
    for name in names {
        let _ = write!(out, " {name:>14}");
    }
    out.push('\n');

    for (row, t) in times.iter().enumerate().step_by(every.max(1)) {
        let _ = write!(out, "{t:>12.3}");
        for column in &columns {
            let _ = write!(out, " {:>14.6}", column[row]);
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use stockflow_core::{Config, Variable};

    use super::*;

    fn counted() -> Model {
        let mut model = Model::new(Config::new("count").dt(1.0).max_t(4.0)).unwrap();
        model.register(Variable::new("n", 0.0)).unwrap();
        model.add_increasing_stream("n", "1").unwrap();
        model.run(true).unwrap();
        model
    }

    #[test]
    fn renders_every_nth_row() {
        let table = table(&counted(), &["n"], 2).unwrap();
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), ["t", "n"]);
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["2.000", "2.000000"]
        );
    }

    #[test]
    fn unknown_series_is_not_recorded() {
        assert!(matches!(
            table(&counted(), &["missing"], 1),
            Err(Error::NotRecorded { .. })
        ));
    }
}
