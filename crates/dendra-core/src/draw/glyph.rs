//! Category glyphs.
//!
//! A [`Glyph`] is a small symbol centered on the origin whose area is given
//! in square units. The geometry follows the familiar d3 symbol set so charts
//! read the same as their browser counterparts. `Plus` and `Times` are
//! line-only symbols and must be stroked rather than filled.

use std::{f32::consts::PI, fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element::path::Data;

const TAU: f32 = 2.0 * PI;
const SQRT3: f32 = 1.732_050_8;

/// A glyph shape used to mark a leaf's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Circle,
    Cross,
    Diamond,
    Plus,
    Square,
    Star,
    Triangle,
    Wye,
    Times,
}

impl Glyph {
    /// The default assignment order for categories.
    pub const SEQUENCE: [Glyph; 9] = [
        Glyph::Circle,
        Glyph::Cross,
        Glyph::Diamond,
        Glyph::Plus,
        Glyph::Square,
        Glyph::Star,
        Glyph::Triangle,
        Glyph::Wye,
        Glyph::Times,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Cross => "cross",
            Self::Diamond => "diamond",
            Self::Plus => "plus",
            Self::Square => "square",
            Self::Star => "star",
            Self::Triangle => "triangle",
            Self::Wye => "wye",
            Self::Times => "times",
        }
    }

    /// True for line-only glyphs that need a stroke to be visible.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Self::Plus | Self::Times)
    }

    /// Conservative half extent of the glyph for the given area.
    ///
    /// Every glyph fits inside a square of side `2 * half_extent(area)`
    /// centered on the origin.
    pub fn half_extent(&self, area: f32) -> f32 {
        area.max(0.0).sqrt()
    }

    /// Builds the SVG path data for this glyph centered on the origin.
    pub fn path_data(&self, area: f32) -> Data {
        let area = area.max(0.0);
        match self {
            Self::Circle => {
                let r = (area / PI).sqrt();
                Data::new()
                    .move_to((r, 0.0))
                    .elliptical_arc_to((r, r, 0.0, 1.0, 1.0, -r, 0.0))
                    .elliptical_arc_to((r, r, 0.0, 1.0, 1.0, r, 0.0))
                    .close()
            }
            Self::Cross => {
                let r = (area / 5.0).sqrt() / 2.0;
                polygon(&[
                    (-3.0 * r, -r),
                    (-r, -r),
                    (-r, -3.0 * r),
                    (r, -3.0 * r),
                    (r, -r),
                    (3.0 * r, -r),
                    (3.0 * r, r),
                    (r, r),
                    (r, 3.0 * r),
                    (-r, 3.0 * r),
                    (-r, r),
                    (-3.0 * r, r),
                ])
            }
            Self::Diamond => {
                let tan30 = (1.0_f32 / 3.0).sqrt();
                let y = (area / (tan30 * 2.0)).sqrt();
                let x = y * tan30;
                polygon(&[(0.0, -y), (x, 0.0), (0.0, y), (-x, 0.0)])
            }
            Self::Plus => {
                let r = (area - (area / 7.0).min(2.0)).max(0.0).sqrt() * 0.282_09;
                Data::new()
                    .move_to((-r, 0.0))
                    .line_to((r, 0.0))
                    .move_to((0.0, r))
                    .line_to((0.0, -r))
            }
            Self::Square => {
                let w = area.sqrt();
                let x = -w / 2.0;
                polygon(&[(x, x), (x + w, x), (x + w, x + w), (x, x + w)])
            }
            Self::Star => star(area),
            Self::Triangle => {
                let y = -(area / (SQRT3 * 3.0)).sqrt();
                polygon(&[(0.0, y * 2.0), (-SQRT3 * y, -y), (SQRT3 * y, -y)])
            }
            Self::Wye => wye(area),
            Self::Times => {
                let r = (area - (area / 6.0).min(1.7)).max(0.0).sqrt() * 0.6189 / 2.0;
                Data::new()
                    .move_to((-r, -r))
                    .line_to((r, r))
                    .move_to((-r, r))
                    .line_to((r, -r))
            }
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Glyph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEQUENCE
            .iter()
            .copied()
            .find(|glyph| glyph.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::SEQUENCE.iter().map(Glyph::name).collect();
                format!(
                    "invalid glyph `{s}`, valid values: {}",
                    names.join(", ")
                )
            })
    }
}

fn polygon(points: &[(f32, f32)]) -> Data {
    let mut data = Data::new();
    for (i, point) in points.iter().enumerate() {
        data = if i == 0 {
            data.move_to(*point)
        } else {
            data.line_to(*point)
        };
    }
    data.close()
}

fn star(area: f32) -> Data {
    let ka = 0.890_813_1_f32;
    let kr = (PI / 10.0).sin() / (7.0 * PI / 10.0).sin();
    let kx = (TAU / 10.0).sin() * kr;
    let ky = -(TAU / 10.0).cos() * kr;

    let r = (area * ka).sqrt();
    let x = kx * r;
    let y = ky * r;

    let mut points = vec![(0.0, -r), (x, y)];
    for i in 1..5 {
        let a = TAU * i as f32 / 5.0;
        let (s, c) = a.sin_cos();
        points.push((s * r, -c * r));
        points.push((c * x - s * y, s * x + c * y));
    }
    polygon(&points)
}

fn wye(area: f32) -> Data {
    let c = -0.5_f32;
    let s = SQRT3 / 2.0;
    let k = 1.0 / 12.0_f32.sqrt();
    let a = (k / 2.0 + 1.0) * 3.0;

    let r = (area / a).sqrt();
    let (x0, y0) = (r / 2.0, r * k);
    let (x1, y1) = (x0, r * k + r);
    let (x2, y2) = (-x1, y1);

    polygon(&[
        (x0, y0),
        (x1, y1),
        (x2, y2),
        (c * x0 - s * y0, s * x0 + c * y0),
        (c * x1 - s * y1, s * x1 + c * y1),
        (c * x2 - s * y2, s * x2 + c * y2),
        (c * x0 + s * y0, c * y0 - s * x0),
        (c * x1 + s * y1, c * y1 - s * x1),
        (c * x2 + s * y2, c * y2 - s * x2),
    ])
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn coordinates(data: &Data) -> Vec<f32> {
        data.iter()
            .flat_map(|command| {
                use svg::node::element::path::Command;
                match command {
                    Command::Move(_, params) | Command::Line(_, params) => {
                        params.iter().copied().collect::<Vec<_>>()
                    }
                    // Arc parameters: rx ry rotation large sweep x y
                    Command::EllipticalArc(_, params) => params.iter().skip(5).copied().collect(),
                    _ => Vec::new(),
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn glyph_fits_within_half_extent(index in 0usize..9, area in 1.0f32..500.0) {
            let glyph = Glyph::SEQUENCE[index];
            let extent = glyph.half_extent(area);
            for value in coordinates(&glyph.path_data(area)) {
                prop_assert!(value.is_finite());
                prop_assert!(
                    value.abs() <= extent + 1e-3,
                    "{glyph} coordinate {value} exceeds {extent}"
                );
            }
        }
    }
}
