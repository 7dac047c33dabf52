//! Panels printed after a run: performance, molecular properties and model
//! scores.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use qvc_core::models::{model_scores, FinalMetrics, MetricsOutcome};
use qvc_core::molecule::MolecularProperties;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Model")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Delta")]
    delta: String,
}

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Quantum AI")]
    quantum: &'static str,
    #[tabled(rename = "Classical AI")]
    classical: &'static str,
}

/// `"2.00x faster"`, or `"n/a"` when the ratio is undefined.
pub fn speedup_text(speedup: Option<f64>) -> String {
    match speedup {
        Some(s) => format!("{:.2}x faster", s),
        None => "n/a".to_string(),
    }
}

fn metric_rows(metrics: &FinalMetrics) -> Vec<MetricRow> {
    let per_molecule = match metrics.time_per_candidate_quantum {
        Some(t) => format!("{:.5}s (Q)", t),
        None => "n/a".to_string(),
    };
    let advantage = match metrics.per_candidate_advantage() {
        Some(a) => format!("{:.1}x faster", a),
        None => "n/a".to_string(),
    };

    vec![
        MetricRow {
            label: "Quantum AI".to_string(),
            value: format!("{} molecules", metrics.quantum_total),
            delta: speedup_text(metrics.speedup),
        },
        MetricRow {
            label: "Classical AI".to_string(),
            value: format!("{} molecules", metrics.classical_total),
            delta: "-".to_string(),
        },
        MetricRow {
            label: "Time per Molecule".to_string(),
            value: per_molecule,
            delta: advantage,
        },
    ]
}

/// Performance panel for a finished run.
pub fn metrics_panel(outcome: &MetricsOutcome) -> String {
    let body = match outcome.metrics() {
        Some(metrics) => Table::new(metric_rows(metrics))
            .with(Style::rounded())
            .to_string(),
        None => "No frames were run; nothing to report.".to_string(),
    };
    format!("{}\n{}\n", "📊 AI Performance".bold(), body)
}

/// Property panel, or the reason it is unavailable.
pub fn properties_panel(smiles: &str) -> String {
    let mut out = format!("{}\n", "🧪 Molecular Properties".bold());
    match MolecularProperties::from_smiles(smiles) {
        Ok(props) => {
            for (label, value) in props.rows() {
                out.push_str(&format!("  {} {}\n", format!("{}:", label).as_str().bold(), value));
            }
        }
        Err(e) => {
            tracing::warn!("Molecular properties unavailable for '{}': {}", smiles, e);
            out.push_str(&format!("  Could not compute properties: {}\n", e));
        }
    }
    out
}

/// Static model score table.
pub fn scores_panel() -> String {
    let [quantum, classical] = model_scores();
    let rows: Vec<ScoreRow> = quantum
        .rows()
        .iter()
        .zip(classical.rows())
        .map(|(&(metric, q), (_, c))| ScoreRow {
            metric,
            quantum: q,
            classical: c,
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{}\n{}\n", "🤖 Model Scores".bold(), table)
}
