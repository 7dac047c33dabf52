//! 2D molecule depiction rendered to a transparent PNG.
//!
//! Coordinates come from a deterministic force-directed relaxation seeded
//! on a circle in atom order, so the same SMILES always yields the same
//! image.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use super::smiles::{BondOrder, Molecule, SmilesError};

/// Output image edge length in pixels.
pub const IMAGE_SIZE: u32 = 300;

const MARGIN: f64 = 30.0;
const MAX_BOND_PX: f64 = 40.0;
const RELAX_ITERATIONS: usize = 400;

/// Largest molecule laid out; the relaxation is quadratic in atom count.
pub const MAX_DEPICTION_ATOMS: usize = 150;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const BOND_COLOR: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Failure to produce a depiction.
#[derive(Error, Debug)]
pub enum DepictionError {
    #[error("Invalid molecule: {0}")]
    InvalidMolecule(#[from] SmilesError),

    #[error("Molecule has {count} atoms, more than the {max} that can be drawn")]
    TooManyAtoms { count: usize, max: usize },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render a SMILES string as a 300x300 PNG with a transparent background.
pub fn render_png(smiles: &str) -> Result<Vec<u8>, DepictionError> {
    let molecule = Molecule::from_smiles(smiles)?;
    if molecule.atom_count() > MAX_DEPICTION_ATOMS {
        return Err(DepictionError::TooManyAtoms {
            count: molecule.atom_count(),
            max: MAX_DEPICTION_ATOMS,
        });
    }
    let image = render_image(&molecule);

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Rasterize a parsed molecule.
pub fn render_image(molecule: &Molecule) -> RgbaImage {
    let positions = to_pixels(&layout(molecule));
    let mut canvas = Canvas::new(IMAGE_SIZE);

    for bond in molecule.bonds() {
        let from = positions[bond.a];
        let to = positions[bond.b];
        match bond.order {
            BondOrder::Single => canvas.line(from, to, BOND_COLOR, 1.0),
            BondOrder::Double => {
                canvas.offset_line(from, to, 3.0, BOND_COLOR);
                canvas.offset_line(from, to, -3.0, BOND_COLOR);
            }
            BondOrder::Triple => {
                canvas.line(from, to, BOND_COLOR, 1.0);
                canvas.offset_line(from, to, 4.5, BOND_COLOR);
                canvas.offset_line(from, to, -4.5, BOND_COLOR);
            }
            BondOrder::Aromatic => {
                canvas.line(from, to, BOND_COLOR, 1.0);
                canvas.dashed_offset_line(from, to, 4.0, BOND_COLOR);
            }
        }
    }

    for (atom, &center) in molecule.atoms().iter().zip(&positions) {
        let (color, radius) = atom_style(atom.element.atomic_number);
        canvas.disc(center, radius, color);
    }

    canvas.into_image()
}

/// CPK-style color and disc radius for an element on a dark background.
fn atom_style(atomic_number: u8) -> (Rgba<u8>, f64) {
    match atomic_number {
        1 => (Rgba([255, 255, 255, 255]), 4.0),
        6 => (Rgba([200, 200, 200, 255]), 3.0),
        7 => (Rgba([48, 80, 248, 255]), 7.0),
        8 => (Rgba([255, 13, 13, 255]), 7.0),
        9 | 17 => (Rgba([31, 240, 31, 255]), 7.0),
        15 => (Rgba([255, 128, 0, 255]), 7.0),
        16 => (Rgba([255, 255, 48, 255]), 7.0),
        35 => (Rgba([166, 41, 41, 255]), 7.0),
        53 => (Rgba([148, 0, 148, 255]), 7.0),
        _ => (Rgba([255, 20, 147, 255]), 7.0),
    }
}

/// Relaxed 2D coordinates in bond-length units.
pub fn layout(molecule: &Molecule) -> Vec<[f64; 2]> {
    let n = molecule.atom_count();
    if n == 0 {
        return Vec::new();
    }

    // Circle with circumference of roughly one bond length per atom
    let radius = (n as f64 / std::f64::consts::TAU).max(0.5);
    let mut positions: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect();

    // Pairs two bonds apart, held at the 120 degree distance
    let mut angle_pairs = Vec::new();
    for center in 0..n {
        let neighbors = molecule.neighbors(center);
        for (i, &(a, _)) in neighbors.iter().enumerate() {
            for &(b, _) in &neighbors[i + 1..] {
                angle_pairs.push((a, b));
            }
        }
    }
    let angle_length = 3f64.sqrt();

    for iteration in 0..RELAX_ITERATIONS {
        let temperature = 0.2 * (1.0 - iteration as f64 / RELAX_ITERATIONS as f64) + 0.01;
        let mut forces = vec![[0.0f64; 2]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy, dist) = delta(&positions, i, j);
                let push = 0.3 / (dist * dist);
                apply(&mut forces, i, j, dx / dist * push, dy / dist * push);
            }
        }

        for bond in molecule.bonds() {
            spring(&positions, &mut forces, bond.a, bond.b, 1.0, 1.0);
        }
        for &(a, b) in &angle_pairs {
            spring(&positions, &mut forces, a, b, angle_length, 0.5);
        }

        for (position, force) in positions.iter_mut().zip(&forces) {
            let magnitude = (force[0] * force[0] + force[1] * force[1]).sqrt();
            if magnitude == 0.0 {
                continue;
            }
            let step = magnitude.min(temperature);
            position[0] += force[0] / magnitude * step;
            position[1] += force[1] / magnitude * step;
        }
    }

    positions
}

fn delta(positions: &[[f64; 2]], i: usize, j: usize) -> (f64, f64, f64) {
    let dx = positions[i][0] - positions[j][0];
    let dy = positions[i][1] - positions[j][1];
    let dist = (dx * dx + dy * dy).sqrt().max(0.01);
    (dx, dy, dist)
}

/// Add equal and opposite forces (toward `i` positive along i-j).
fn apply(forces: &mut [[f64; 2]], i: usize, j: usize, fx: f64, fy: f64) {
    forces[i][0] += fx;
    forces[i][1] += fy;
    forces[j][0] -= fx;
    forces[j][1] -= fy;
}

fn spring(
    positions: &[[f64; 2]],
    forces: &mut [[f64; 2]],
    i: usize,
    j: usize,
    rest: f64,
    stiffness: f64,
) {
    let (dx, dy, dist) = delta(positions, i, j);
    let pull = -stiffness * (dist - rest);
    apply(forces, i, j, dx / dist * pull, dy / dist * pull);
}

/// Fit layout coordinates into the image, centered.
fn to_pixels(positions: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let center = IMAGE_SIZE as f64 / 2.0;
    if positions.is_empty() {
        return Vec::new();
    }

    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for p in positions {
        min_x = min_x.min(p[0]);
        max_x = max_x.max(p[0]);
        min_y = min_y.min(p[1]);
        max_y = max_y.max(p[1]);
    }

    let span = (max_x - min_x).max(max_y - min_y);
    let available = IMAGE_SIZE as f64 - 2.0 * MARGIN;
    let scale = if span > 0.0 {
        (available / span).min(MAX_BOND_PX)
    } else {
        MAX_BOND_PX
    };
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    positions
        .iter()
        .map(|p| {
            [
                center + (p[0] - mid_x) * scale,
                center + (p[1] - mid_y) * scale,
            ]
        })
        .collect()
}

/// Minimal raster surface for lines and discs.
struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, TRANSPARENT),
        }
    }

    fn into_image(self) -> RgbaImage {
        self.image
    }

    fn plot(&mut self, x: f64, y: f64, color: Rgba<u8>) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (px, py) = (x.round() as u32, y.round() as u32);
        if px < self.image.width() && py < self.image.height() {
            self.image.put_pixel(px, py, color);
        }
    }

    fn disc(&mut self, center: [f64; 2], radius: f64, color: Rgba<u8>) {
        let r = radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                let (fx, fy) = (dx as f64, dy as f64);
                if fx * fx + fy * fy <= radius * radius {
                    self.plot(center[0] + fx, center[1] + fy, color);
                }
            }
        }
    }

    fn line(&mut self, from: [f64; 2], to: [f64; 2], color: Rgba<u8>, thickness: f64) {
        self.stroke(from, to, color, thickness, None);
    }

    fn offset_line(&mut self, from: [f64; 2], to: [f64; 2], offset: f64, color: Rgba<u8>) {
        let (a, b) = offset_segment(from, to, offset);
        self.stroke(a, b, color, 1.0, None);
    }

    fn dashed_offset_line(&mut self, from: [f64; 2], to: [f64; 2], offset: f64, color: Rgba<u8>) {
        let (a, b) = offset_segment(from, to, offset);
        self.stroke(a, b, color, 0.5, Some(4));
    }

    /// Walk the segment pixel by pixel, stamping small discs.
    fn stroke(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Rgba<u8>,
        thickness: f64,
        dash: Option<usize>,
    ) {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            if let Some(dash) = dash {
                if (step / dash) % 2 == 1 {
                    continue;
                }
            }
            let t = step as f64 / steps as f64;
            self.disc([from[0] + dx * t, from[1] + dy * t], thickness, color);
        }
    }
}

/// Segment shifted perpendicular to itself and trimmed at both ends.
fn offset_segment(from: [f64; 2], to: [f64; 2], offset: f64) -> ([f64; 2], [f64; 2]) {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return (from, to);
    }
    let (nx, ny) = (-dy / length * offset, dx / length * offset);
    let trim = 0.15;
    (
        [from[0] + dx * trim + nx, from[1] + dy * trim + ny],
        [to[0] - dx * trim + nx, to[1] - dy * trim + ny],
    )
}
