//! Terminal line chart, redrawn on every frame.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};

use qvc_core::animation::{ChartFrame, RunObserver};
use qvc_core::models::Breakthrough;
use qvc_core::molecule::MoleculeCard;

pub const CHART_WIDTH: usize = 60;
pub const CHART_HEIGHT: usize = 16;

/// Width of the y-axis tick labels.
const LABEL_WIDTH: usize = 7;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const TITLE: &str = "AI Performance Over Time";
const X_LABEL: &str = "Time (Seconds)";
const Y_LABEL: &str = "Candidates Processed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Classical,
    Quantum,
    Both,
}

impl Cell {
    fn with(self, other: Cell) -> Cell {
        match (self, other) {
            (Cell::Empty, c) | (c, Cell::Empty) => c,
            (a, b) if a == b => a,
            _ => Cell::Both,
        }
    }
}

/// Chart row (0 = bottom) for a value on a fixed `[y_min, y_max]` axis.
///
/// Values below the axis sit on the bottom row.
pub fn scale_row(value: u64, y_min: u64, y_max: u64, log_scale: bool, height: usize) -> usize {
    if height <= 1 || y_max <= y_min {
        return 0;
    }
    let value = value.clamp(y_min, y_max) as f64;
    let (lo, hi) = (y_min as f64, y_max as f64);
    let fraction = if log_scale {
        (value.ln() - lo.ln()) / (hi.ln() - lo.ln())
    } else {
        (value - lo) / (hi - lo)
    };
    (fraction.clamp(0.0, 1.0) * (height - 1) as f64).round() as usize
}

/// Axis value at a chart row; inverse of [`scale_row`].
pub fn axis_value(row: usize, y_min: u64, y_max: u64, log_scale: bool, height: usize) -> f64 {
    let (lo, hi) = (y_min as f64, y_max as f64);
    if height <= 1 || y_max <= y_min {
        return lo;
    }
    let fraction = row as f64 / (height - 1) as f64;
    if log_scale {
        (lo.ln() + fraction * (hi.ln() - lo.ln())).exp()
    } else {
        lo + fraction * (hi - lo)
    }
}

/// Chart column for a frame; the x-axis spans the whole run.
pub fn scale_column(index: usize, frame_count: usize, width: usize) -> usize {
    if frame_count <= 1 || width <= 1 {
        return 0;
    }
    index.min(frame_count - 1) * (width - 1) / (frame_count - 1)
}

/// Draw the chart for one frame.
pub fn render_chart(frame: &ChartFrame<'_>, duration_secs: f64, color: bool) -> String {
    let mut grid = vec![vec![Cell::Empty; CHART_WIDTH]; CHART_HEIGHT];
    let points = frame.classical.iter().zip(frame.quantum).enumerate();
    for (index, (&classical, &quantum)) in points {
        let col = scale_column(index, frame.frame_count, CHART_WIDTH);
        for (value, cell) in [(classical, Cell::Classical), (quantum, Cell::Quantum)] {
            let row = scale_row(value, frame.y_min, frame.y_max, frame.log_scale, CHART_HEIGHT);
            let slot = &mut grid[CHART_HEIGHT - 1 - row][col];
            *slot = slot.with(cell);
        }
    }

    let mut out = String::new();
    let indent = " ".repeat(LABEL_WIDTH + 1);
    out.push_str(&format!("{}{}\n", indent, center(TITLE, CHART_WIDTH)));
    let scale_note = if frame.log_scale { " (log)" } else { "" };
    out.push_str(&format!("{}{}{}\n", indent, Y_LABEL, scale_note));

    let labelled = [CHART_HEIGHT - 1, (CHART_HEIGHT - 1) / 2, 0];
    for (line_no, line) in grid.iter().enumerate() {
        let row = CHART_HEIGHT - 1 - line_no;
        let label = if labelled.contains(&row) {
            let value = axis_value(row, frame.y_min, frame.y_max, frame.log_scale, CHART_HEIGHT);
            format!("{:.0}", value)
        } else {
            String::new()
        };
        out.push_str(&format!("{:>width$} │", label, width = LABEL_WIDTH));
        for &cell in line {
            out.push_str(&paint(cell, color));
        }
        out.push('\n');
    }

    out.push_str(&format!("{:>width$} └{}\n", "", "─".repeat(CHART_WIDTH), width = LABEL_WIDTH));
    let end = format!("{:.1}", duration_secs);
    out.push_str(&format!(
        "{}0{:>width$}\n",
        indent,
        end,
        width = CHART_WIDTH - 1
    ));
    out.push_str(&format!("{}{}\n", indent, center(X_LABEL, CHART_WIDTH)));
    out.push_str(&format!(
        "{}{} Classical AI   {} Quantum AI\n",
        indent,
        paint(Cell::Classical, color),
        paint(Cell::Quantum, color)
    ));
    out
}

fn paint(cell: Cell, color: bool) -> String {
    let symbol = match cell {
        Cell::Empty => return " ".to_string(),
        Cell::Classical => "●",
        Cell::Quantum => "◆",
        Cell::Both => "◈",
    };
    if !color {
        return symbol.to_string();
    }
    let painted: ColoredString = match cell {
        Cell::Classical => symbol.truecolor(255, 140, 0),
        Cell::Quantum => symbol.truecolor(0, 255, 255),
        _ => symbol.white(),
    };
    painted.to_string()
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// File name for a molecule image, derived from its display name.
pub fn image_file_name(card: &MoleculeCard) -> String {
    let mut slug = String::new();
    for c in card.name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    let slug = if slug.is_empty() { "molecule" } else { slug };
    format!("breakthrough_{}.png", slug)
}

/// Write the molecule image into `folder`.
pub fn save_molecule_image(folder: &Path, card: &MoleculeCard) -> io::Result<Option<PathBuf>> {
    let Some(png) = &card.image_png else {
        return Ok(None);
    };
    fs::create_dir_all(folder)?;
    let path = folder.join(image_file_name(card));
    fs::write(&path, png)?;
    Ok(Some(path))
}

/// Lines shown under the chart once the breakthrough fired.
pub fn banner_lines(event: &Breakthrough, image_path: Option<&Path>, color: bool) -> Vec<String> {
    let headline = "💥 Quantum AI Breakthrough!";
    let mut lines = vec![if color {
        headline.red().bold().to_string()
    } else {
        headline.to_string()
    }];
    lines.push(format!(
        "   Frame {}: quantum {} vs classical {}",
        event.sample.index, event.sample.quantum, event.sample.classical
    ));
    if let Some(card) = &event.molecule {
        match (image_path, &card.depiction_error) {
            (Some(path), _) => lines.push(format!("   Molecule image: {}", path.display())),
            (None, Some(err)) => lines.push(format!("   No molecule image: {}", err)),
            (None, None) => {}
        }
        lines.push(format!("   {}", card.caption()));
    }
    lines
}

/// Draws the race in the terminal.
#[derive(Debug)]
pub struct TerminalChart {
    duration_secs: f64,
    output_folder: PathBuf,
    color: bool,
    banner: Vec<String>,
}

impl TerminalChart {
    pub fn new(duration_secs: f64, output_folder: impl Into<PathBuf>, color: bool) -> Self {
        Self {
            duration_secs,
            output_folder: output_folder.into(),
            color,
            banner: Vec::new(),
        }
    }

    /// Axis end for the next run.
    pub fn set_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs;
    }

    fn write(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            tracing::debug!("Chart redraw failed: {}", e);
        }
    }

    fn header(&self) -> String {
        let title = "Quantum AI vs Classical AI";
        let subtitle = "Visualizing Drug Discovery Speed";
        if self.color {
            format!(
                "{}\n{}\n\n",
                title.truecolor(0, 255, 213).bold(),
                subtitle.dimmed()
            )
        } else {
            format!("{}\n{}\n\n", title, subtitle)
        }
    }
}

impl RunObserver for TerminalChart {
    fn on_frame(&mut self, frame: &ChartFrame<'_>) {
        if frame.frame_index == 0 {
            self.banner.clear();
        }
        let mut screen = String::from(CLEAR_SCREEN);
        screen.push_str(&self.header());
        screen.push_str(&render_chart(frame, self.duration_secs, self.color));
        for line in &self.banner {
            screen.push('\n');
            screen.push_str(line);
        }
        screen.push('\n');
        self.write(&screen);
    }

    fn on_breakthrough(&mut self, event: &Breakthrough) {
        let image_path = match &event.molecule {
            Some(card) => match save_molecule_image(&self.output_folder, card) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(
                        "Could not save molecule image to {}: {}",
                        self.output_folder.display(),
                        e
                    );
                    None
                }
            },
            None => None,
        };
        self.banner = banner_lines(event, image_path.as_deref(), self.color);

        let mut text = String::new();
        for line in &self.banner {
            text.push('\n');
            text.push_str(line);
        }
        text.push('\n');
        self.write(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvc_core::models::FrameSample;

    #[test]
    fn linear_rows_span_the_axis() {
        assert_eq!(scale_row(1, 1, 3000, false, 16), 0);
        assert_eq!(scale_row(3000, 1, 3000, false, 16), 15);
        assert_eq!(scale_row(1500, 1, 3000, false, 16), 7);
    }

    #[test]
    fn log_rows_span_the_axis() {
        assert_eq!(scale_row(1, 1, 10000, true, 16), 0);
        assert_eq!(scale_row(10, 1, 10000, true, 16), 4);
        assert_eq!(scale_row(1000, 1, 10000, true, 16), 11);
        assert_eq!(scale_row(10000, 1, 10000, true, 16), 15);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(scale_row(0, 1, 100, true, 16), 0);
        assert_eq!(scale_row(0, 1, 100, false, 16), 0);
        assert_eq!(scale_row(500, 1, 100, false, 16), 15);
    }

    #[test]
    fn degenerate_axis_uses_bottom_row() {
        assert_eq!(scale_row(1, 1, 1, false, 16), 0);
        assert_eq!(axis_value(15, 1, 1, true, 16), 1.0);
    }

    #[test]
    fn axis_value_inverts_scale_row() {
        assert_eq!(axis_value(0, 1, 3000, false, 16), 1.0);
        assert_eq!(axis_value(15, 1, 3000, false, 16), 3000.0);
        assert!((axis_value(15, 1, 10000, true, 16) - 10000.0).abs() < 1e-6);
    }

    #[test]
    fn columns_span_the_run() {
        assert_eq!(scale_column(0, 50, 60), 0);
        assert_eq!(scale_column(49, 50, 60), 59);
        assert_eq!(scale_column(0, 1, 60), 0);
    }

    #[test]
    fn rendered_chart_has_labels_and_points() {
        let times = [0.0, 0.2, 0.4];
        let classical = [0, 20, 40];
        let quantum = [1, 2, 4];
        let frame = ChartFrame {
            frame_index: 2,
            frame_count: 5,
            times: &times,
            classical: &classical,
            quantum: &quantum,
            log_scale: false,
            y_min: 1,
            y_max: 100,
        };
        let chart = render_chart(&frame, 1.0, false);

        assert!(chart.contains(TITLE));
        assert!(chart.contains(X_LABEL));
        assert!(chart.contains(Y_LABEL));
        assert!(chart.contains("● Classical AI"));
        assert!(chart.contains("◆ Quantum AI"));
        assert!(chart.contains("100 │"));
        assert!(!chart.contains("(log)"));
        // Both series start on the bottom row; legend adds one of each
        assert_eq!(chart.matches('◈').count(), 1);
        assert_eq!(chart.matches('●').count(), 3);
        assert_eq!(chart.matches('◆').count(), 3);
    }

    #[test]
    fn log_chart_is_marked() {
        let frame = ChartFrame {
            frame_index: 0,
            frame_count: 1,
            times: &[0.0],
            classical: &[0],
            quantum: &[1],
            log_scale: true,
            y_min: 1,
            y_max: 3000,
        };
        assert!(render_chart(&frame, 0.2, false).contains("Candidates Processed (log)"));
    }

    fn card(name: &str, png: Option<Vec<u8>>) -> MoleculeCard {
        MoleculeCard {
            smiles: "CCO".to_string(),
            name: name.to_string(),
            image_png: png,
            depiction_error: None,
        }
    }

    #[test]
    fn image_names_are_slugged() {
        let name = image_file_name(&card("Acetylsalicylic acid (Aspirin)", None));
        assert_eq!(name, "breakthrough_acetylsalicylic_acid_aspirin.png");
        assert_eq!(image_file_name(&card("()", None)), "breakthrough_molecule.png");
    }

    #[test]
    fn molecule_image_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("out");
        let path = save_molecule_image(&folder, &card("Ethanol", Some(vec![1, 2, 3])))
            .unwrap()
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);

        assert!(save_molecule_image(&folder, &card("Ethanol", None)).unwrap().is_none());
    }

    #[test]
    fn banner_mentions_molecule() {
        let event = Breakthrough {
            sample: FrameSample {
                index: 0,
                time_secs: 0.0,
                classical: 0,
                quantum: 1,
            },
            molecule: Some(MoleculeCard {
                depiction_error: Some("bad smiles".to_string()),
                ..card("Unknown Compound", None)
            }),
        };
        let lines = banner_lines(&event, None, false);
        assert_eq!(lines[0], "💥 Quantum AI Breakthrough!");
        assert!(lines.iter().any(|l| l.contains("No molecule image: bad smiles")));
        assert!(lines.iter().any(|l| l.contains("Scientific Name: Unknown Compound")));
    }
}
