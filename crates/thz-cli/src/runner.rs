//! Job runner: ties together the sweeps, frame rendering and file output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use thz_core::ResponseSpectrum;

use crate::animation::assemble_gif;
use crate::config::JobConfig;
use crate::render::{render_fine_chart, ChartRenderer, FrameRenderer};

/// Files produced by a thickness sweep.
pub struct SweepOutput {
    /// One image per thickness, in ascending thickness order.
    pub frames: Vec<PathBuf>,
    pub animation: PathBuf,
}

/// Frame file name for an integer thickness, e.g. `5.png`.
pub fn frame_file_name(thickness: f64) -> String {
    format!("{}.png", thickness)
}

/// Run the thickness sweep with the default chart renderer.
pub fn run_thickness_sweep(job: &JobConfig, out_dir: &Path) -> Result<SweepOutput> {
    let sweep = job.thickness_sweep();
    let renderer = ChartRenderer {
        part: sweep.part,
        y_range: sweep.y_range,
        size: (job.output.frame_size[0], job.output.frame_size[1]),
    };
    run_thickness_sweep_with(job, out_dir, &renderer)
}

/// Run the thickness sweep, writing each frame before the next is computed,
/// then assemble the animation.
pub fn run_thickness_sweep_with(
    job: &JobConfig,
    out_dir: &Path,
    renderer: &dyn FrameRenderer,
) -> Result<SweepOutput> {
    let sweep = job.thickness_sweep();
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create output directory '{}'", out_dir.display()))?;

    let total = sweep.max_thickness;
    info!(
        "Thickness sweep: 1..={} with {} frequency samples ({} transform, {} convention)",
        total,
        sweep.max_frequency,
        sweep.transform.label(),
        sweep.convention.label()
    );

    let mut frames = Vec::with_capacity(total as usize);
    for (i, frame) in sweep.frames(&job.crystal)?.enumerate() {
        let frame = frame?;
        let path = out_dir.join(frame_file_name(frame.thickness));
        renderer
            .render(&frame, &path)
            .with_context(|| format!("Cannot render frame '{}'", path.display()))?;

        let done = i + 1;
        if done % 10 == 0 || done == 1 || done == total as usize {
            println!("  [{}/{}] d={} -> {}", done, total, frame.thickness, path.display());
        }
        frames.push(path);
    }

    let animation = out_dir.join(&job.output.animation);
    let count = assemble_gif(&frames, &animation, job.output.frame_delay_ms)?;
    println!("Animation ({} frames) written to: {}", count, animation.display());

    Ok(SweepOutput { frames, animation })
}

/// Files produced by a fine sweep.
pub struct FineOutput {
    pub spectrum: ResponseSpectrum,
    pub chart: PathBuf,
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Compute the fine sweep and export it as a chart and optional data files.
pub fn run_fine_sweep(job: &JobConfig, out_dir: &Path) -> Result<FineOutput> {
    let fine = job.fine_sweep();
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create output directory '{}'", out_dir.display()))?;

    info!(
        "Fine sweep: d={}, {} samples, window {:?}",
        fine.thickness,
        fine.points(),
        fine.window
    );
    let spectrum = fine.run(&job.crystal)?;
    let curve = fine.curve(&spectrum);

    let chart = out_dir.join(format!("response_{}.png", fine.thickness));
    render_fine_chart(
        &chart,
        &curve,
        fine.window,
        fine.thickness,
        fine.part,
        fine.log_y,
        (job.output.frame_size[0], job.output.frame_size[1]),
    )?;
    println!("Chart written to: {}", chart.display());

    let csv = if job.output.save_csv {
        let path = out_dir.join("response.csv");
        write_spectrum_csv(&spectrum, &path, job)?;
        Some(path)
    } else {
        None
    };
    let json = if job.output.save_json {
        let path = out_dir.join("response.json");
        write_spectrum_json(&spectrum, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(FineOutput {
        spectrum,
        chart,
        csv,
        json,
    })
}

/// Write a spectrum to CSV with a metadata header.
pub fn write_spectrum_csv(spectrum: &ResponseSpectrum, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    let c = &job.crystal;
    writeln!(file, "# ZnTe response function R(w)")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# w_to={}, w_lo={}, gamma={}, epsilon_inf={}, faust_henry={}",
        c.w_to, c.w_lo, c.gamma, c.epsilon_inf, c.faust_henry
    )?;
    writeln!(
        file,
        "# group_index={}, r_electronic={}, speed_of_light={}, hbar={}",
        c.group_index, c.r_electronic, c.speed_of_light, c.hbar
    )?;
    writeln!(
        file,
        "# thickness={}, convention={}, transform={}",
        spectrum.thickness,
        job.model.convention.label(),
        spectrum.transform.label()
    )?;
    writeln!(file, "#")?;
    writeln!(file, "frequency,real,imag")?;

    for (w, z) in spectrum.frequencies.iter().zip(spectrum.values.iter()) {
        writeln!(file, "{:.6},{:.9e},{:.9e}", w, z.re, z.im)?;
    }
    file.flush()?;

    println!("Spectrum written to: {}", path.display());
    Ok(())
}

/// Write a spectrum to a JSON file.
pub fn write_spectrum_json(spectrum: &ResponseSpectrum, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&spectrum.record())
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Spectrum (JSON) written to: {}", path.display());
    Ok(())
}
