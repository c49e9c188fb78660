//! Chart rendering with plotters (PNG output).
//!
//! Frames of the thickness sweep go through the [`FrameRenderer`] trait so the
//! sweep runner does not depend on how, or whether, text is drawn.

use std::path::Path;

use anyhow::Result;
use log::warn;
use plotters::prelude::*;

use thz_core::{Part, ResponseSpectrum};

/// Writes one image file per sweep frame.
pub trait FrameRenderer {
    /// Render `spectrum` to `path`. The file must exist when this returns.
    fn render(&self, spectrum: &ResponseSpectrum, path: &Path) -> Result<()>;
}

/// Line chart of one spectrum component with a fixed vertical range.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    pub part: Part,
    pub y_range: [f64; 2],
    pub size: (u32, u32),
}

impl FrameRenderer for ChartRenderer {
    fn render(&self, spectrum: &ResponseSpectrum, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = spectrum.frequencies.first().copied().unwrap_or(0.0);
        let x_max = spectrum.frequencies.last().copied().unwrap_or(1.0).max(x_min + 1.0);
        let [y_min, y_max] = self.y_range;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!(
                    "Response function R(w) of ZnTe, {} micrometers",
                    spectrum.thickness
                ),
                ("serif", 18).into_font().style(FontStyle::Bold),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("THz")
            .y_desc(format!("{} R(w)", self.part.label()))
            .draw()?;

        let points: Vec<(f64, f64)> = spectrum
            .frequencies
            .iter()
            .zip(spectrum.component(self.part).iter())
            .map(|(&w, &y)| (w, y))
            .collect();
        for segment in clip_to_band(&points, y_min, y_max) {
            chart.draw_series(LineSeries::new(segment, &BLUE))?;
        }

        root.present()?;
        Ok(())
    }
}

/// Render the fine-sweep curve, optionally on a logarithmic vertical axis.
///
/// On a log axis, samples that are not strictly positive cannot be drawn and
/// are dropped with a warning.
pub fn render_fine_chart(
    path: &Path,
    curve: &[(f64, f64)],
    window: [f64; 2],
    thickness: f64,
    part: Part,
    log_y: bool,
    size: (u32, u32),
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let finite: Vec<(f64, f64)> = curve
        .iter()
        .copied()
        .filter(|(_, y)| y.is_finite())
        .collect();
    let caption = format!("Response function R(w) of ZnTe, d = {}", thickness);
    let y_desc = format!("{} R(w)", part.label());

    if log_y {
        let positive: Vec<(f64, f64)> = finite.iter().copied().filter(|&(_, y)| y > 0.0).collect();
        if positive.len() < curve.len() {
            warn!(
                "{} of {} samples are not positive and are omitted from the log axis",
                curve.len() - positive.len(),
                curve.len()
            );
        }
        let (lo, hi) = value_range(&positive).unwrap_or((1e-3, 1.0));
        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("serif", 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(window[0]..window[1], (lo * 0.9..hi * 1.1).log_scale())?;
        chart.configure_mesh().x_desc("THz").y_desc(y_desc).draw()?;
        for segment in visible_segments(curve, |y| y > 0.0) {
            chart.draw_series(LineSeries::new(segment, &BLUE))?;
        }
    } else {
        let (lo, hi) = value_range(&finite).unwrap_or((-1.0, 1.0));
        let pad = ((hi - lo) * 0.05).max(f64::EPSILON);
        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("serif", 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(window[0]..window[1], lo - pad..hi + pad)?;
        chart.configure_mesh().x_desc("THz").y_desc(y_desc).draw()?;
        for segment in visible_segments(curve, |_| true) {
            chart.draw_series(LineSeries::new(segment, &BLUE))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Split a curve into runs of consecutive drawable points.
///
/// A point is drawable when its value is finite and passes `keep`. Breaking
/// the line there leaves a gap instead of a segment through a spike.
pub fn visible_segments(
    points: &[(f64, f64)],
    keep: impl Fn(f64) -> bool,
) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if y.is_finite() && keep(y) {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Clip a polyline to the horizontal band `lo <= y <= hi`.
///
/// Segments that leave the band are cut where they cross its edge, so the
/// curve runs up to the frame border instead of stopping at the last sample
/// inside. Non-finite samples break the line.
pub fn clip_to_band(points: &[(f64, f64)], lo: f64, hi: f64) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    // Whether `current` ends at the unclipped end of the previous segment.
    let mut open = false;

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let finite = x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite();
        let clipped = if finite { clip_segment(y0, y1, lo, hi) } else { None };

        match clipped {
            Some((t0, t1)) => {
                let at = |t: f64| match t {
                    t if t == 0.0 => (x0, y0),
                    t if t == 1.0 => (x1, y1),
                    t => (x0 + t * (x1 - x0), y0 + t * (y1 - y0)),
                };
                if !(open && t0 == 0.0) && !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                if current.is_empty() {
                    current.push(at(t0));
                }
                current.push(at(t1));
                open = t1 == 1.0;
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                open = false;
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Parameter interval `[t0, t1]` of the segment from `y0` to `y1` that lies
/// inside `[lo, hi]`.
fn clip_segment(y0: f64, y1: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    let dy = y1 - y0;
    if dy == 0.0 {
        return (y0 >= lo && y0 <= hi).then_some((0.0, 1.0));
    }
    let (ta, tb) = ((lo - y0) / dy, (hi - y0) / dy);
    let t0 = ta.min(tb).max(0.0);
    let t1 = ta.max(tb).min(1.0);
    (t0 <= t1).then_some((t0, t1))
}

fn value_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if lo == hi {
        Some((lo - lo.abs().max(1.0) * 0.5, hi + hi.abs().max(1.0) * 0.5))
    } else {
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_break_at_non_finite_and_rejected_values() {
        let pts = vec![
            (1.0, 0.5),
            (2.0, 0.6),
            (3.0, f64::NAN),
            (4.0, 0.7),
            (5.0, -0.1),
            (6.0, 0.2),
            (7.0, 0.3),
        ];
        let segs = visible_segments(&pts, |y| y > 0.0);
        assert_eq!(
            segs,
            vec![
                vec![(1.0, 0.5), (2.0, 0.6)],
                vec![(4.0, 0.7)],
                vec![(6.0, 0.2), (7.0, 0.3)],
            ]
        );
    }

    #[test]
    fn test_band_clipping_cuts_at_the_edges() {
        let pts = vec![(0.0, 0.0), (1.0, 2.0), (2.0, 0.0), (3.0, 0.5)];
        let runs = clip_to_band(&pts, -1.0, 1.0);
        assert_eq!(
            runs,
            vec![vec![(0.0, 0.0), (0.5, 1.0)], vec![(1.5, 1.0), (2.0, 0.0), (3.0, 0.5)]]
        );
    }

    #[test]
    fn test_band_clipping_keeps_inside_curve_whole() {
        let pts = vec![(1.0, 0.1), (2.0, -0.2), (3.0, 0.3)];
        assert_eq!(clip_to_band(&pts, -1.0, 1.0), vec![pts.clone()]);
    }

    #[test]
    fn test_band_clipping_crosses_the_whole_band() {
        // One segment entering below and leaving above.
        let runs = clip_to_band(&[(0.0, -2.0), (4.0, 2.0)], -1.0, 1.0);
        assert_eq!(runs, vec![vec![(1.0, -1.0), (3.0, 1.0)]]);
        assert!(clip_to_band(&[(0.0, 5.0), (1.0, 6.0)], -1.0, 1.0).is_empty());
    }

    #[test]
    fn test_band_clipping_breaks_at_non_finite_samples() {
        let pts = vec![(1.0, 0.1), (2.0, 0.2), (3.0, f64::NAN), (4.0, 0.3), (5.0, 0.4)];
        let runs = clip_to_band(&pts, -1.0, 1.0);
        assert_eq!(runs, vec![vec![(1.0, 0.1), (2.0, 0.2)], vec![(4.0, 0.3), (5.0, 0.4)]]);
    }

    #[test]
    fn test_value_range_of_flat_curve_is_widened() {
        let (lo, hi) = value_range(&[(1.0, 2.0), (2.0, 2.0)]).unwrap();
        assert!(lo < 2.0 && hi > 2.0);
        assert!(value_range(&[]).is_none());
    }
}
