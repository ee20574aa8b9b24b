//! Report writer for finished solutions.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::models::Solution;

const NO_HUBS: &str = "Ninguno";
const PATH_SEPARATOR: &str = " -> ";

/// Renders the plain-text report.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use hub_routing::io::render_report;
/// use hub_routing::models::{Route, Solution};
///
/// let mut trip = Route::new(0);
/// trip.deliver(1, 5.0);
/// trip.travel(0, 5.0);
/// let report = render_report(&Solution::new(vec![], vec![trip]), Duration::from_millis(1500));
///
/// assert!(report.contains("Ninguno"));
/// assert!(report.contains("0 -> 1 -> 0"));
/// assert!(report.contains("COSTO_TOTAL: 10.00"));
/// assert!(report.contains("TIEMPO_EJECUCION: 1.500000 segundos"));
/// ```
pub fn render_report(solution: &Solution, elapsed: Duration) -> String {
    Report { solution, elapsed }.to_string()
}

struct Report<'a> {
    solution: &'a Solution,
    elapsed: Duration,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.solution;

        writeln!(f, "// HUBS ACTIVADOS")?;
        if solution.active_hubs().is_empty() {
            writeln!(f, "{NO_HUBS}")?;
        } else {
            for id in solution.active_hub_ids() {
                writeln!(f, "{id}")?;
            }
        }

        let path = solution
            .merged_path()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR);
        writeln!(f, "\n// RUTA OPTIMA")?;
        writeln!(f, "{path}")?;

        writeln!(f, "\n// METRICAS")?;
        writeln!(f, "COSTO_TOTAL: {:.2}", solution.total_cost())?;
        writeln!(f, "DISTANCIA_RECORRIDA: {:.2}", solution.distance_cost())?;
        writeln!(f, "COSTO_HUBS: {:.2}", solution.activation_cost())?;
        writeln!(
            f,
            "TIEMPO_EJECUCION: {:.6} segundos",
            self.elapsed.as_secs_f64()
        )
    }
}

/// Writes the plain-text report to `path`.
pub fn write_report(path: impl AsRef<Path>, solution: &Solution, elapsed: Duration) -> Result<()> {
    fs::write(path, render_report(solution, elapsed))?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    solution: &'a Solution,
    merged_path: Vec<usize>,
    distance_cost: f64,
    activation_cost: f64,
    total_cost: f64,
    elapsed_seconds: f64,
}

/// Renders the solution and its derived cost figures as pretty JSON.
pub fn render_json(solution: &Solution, elapsed: Duration) -> Result<String> {
    let report = JsonReport {
        solution,
        merged_path: solution.merged_path(),
        distance_cost: solution.distance_cost(),
        activation_cost: solution.activation_cost(),
        total_cost: solution.total_cost(),
        elapsed_seconds: elapsed.as_secs_f64(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hub, Route};

    fn two_trip_solution() -> Solution {
        let mut a = Route::new(0);
        a.deliver(4, 2.0);
        a.travel(1, 1.5);
        let mut b = Route::new(1);
        b.deliver(5, 1.0);
        b.deliver(6, 1.0);
        b.travel(1, 2.0);
        Solution::new(vec![Hub::new(1, 120.0)], vec![a, b])
    }

    #[test]
    fn test_render_report_layout() {
        let report = render_report(&two_trip_solution(), Duration::from_secs(2));
        let expected = "\
// HUBS ACTIVADOS
1

// RUTA OPTIMA
0 -> 4 -> 1 -> 5 -> 6 -> 1

// METRICAS
COSTO_TOTAL: 127.50
DISTANCIA_RECORRIDA: 7.50
COSTO_HUBS: 120.00
TIEMPO_EJECUCION: 2.000000 segundos
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&two_trip_solution(), Duration::from_millis(250)).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
        assert_eq!(value["total_cost"], 127.5);
        assert_eq!(value["merged_path"], serde_json::json!([0, 4, 1, 5, 6, 1]));
        assert_eq!(value["solution"]["routes"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["elapsed_seconds"], 0.25);
    }

    #[test]
    fn test_write_report() {
        let path = std::env::temp_dir().join(format!("hub-routing-report-{}.txt", std::process::id()));
        write_report(&path, &two_trip_solution(), Duration::ZERO).expect("write");
        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("// HUBS ACTIVADOS\n1\n"));
        let _ = std::fs::remove_file(&path);
    }
}
