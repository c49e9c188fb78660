//! Looping GIF assembly from rendered frame files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, Frame};

/// Stitch `frames`, in the given order, into an infinitely looping GIF.
///
/// Returns the number of frames written.
pub fn assemble_gif(frames: &[PathBuf], output: &Path, delay_ms: u32) -> Result<usize> {
    if frames.is_empty() {
        anyhow::bail!("No frames to assemble into '{}'", output.display());
    }
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output)
        .with_context(|| format!("Cannot create animation '{}'", output.display()))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for path in frames {
        let image = image::open(path)
            .with_context(|| format!("Cannot read frame '{}'", path.display()))?
            .to_rgba8();
        encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .with_context(|| format!("Cannot encode frame '{}'", path.display()))?;
    }
    Ok(frames.len())
}

/// Decode every frame of a GIF, in playback order.
pub fn read_frames(path: &Path) -> Result<Vec<Frame>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open animation '{}'", path.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))?;
    Ok(decoder.into_frames().collect_frames()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn solid_png(dir: &Path, name: &str, colour: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(8, 6, Rgba(colour)).save(&path).unwrap();
        path
    }

    #[test]
    fn test_frames_keep_their_order() {
        let tmp = TempDir::new().unwrap();
        let frames = vec![
            solid_png(tmp.path(), "1.png", [255, 0, 0, 255]),
            solid_png(tmp.path(), "2.png", [0, 255, 0, 255]),
            solid_png(tmp.path(), "3.png", [0, 0, 255, 255]),
        ];
        let gif = tmp.path().join("movie.gif");
        assert_eq!(assemble_gif(&frames, &gif, 100).unwrap(), 3);

        let decoded = read_frames(&gif).unwrap();
        assert_eq!(decoded.len(), 3);
        for (i, frame) in decoded.iter().enumerate() {
            let px = frame.buffer().get_pixel(0, 0);
            // Dominant channel follows the input order red, green, blue.
            let dominant = (0..3).max_by_key(|&c| px[c]).unwrap();
            assert_eq!(dominant, i, "frame {} has pixel {:?}", i, px);
        }
    }

    #[test]
    fn test_empty_frame_list_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(assemble_gif(&[], &tmp.path().join("movie.gif"), 100).is_err());
    }

    #[test]
    fn test_missing_frame_is_reported() {
        let tmp = TempDir::new().unwrap();
        let missing = vec![tmp.path().join("7.png")];
        let err = assemble_gif(&missing, &tmp.path().join("movie.gif"), 100).unwrap_err();
        assert!(format!("{:#}", err).contains("7.png"));
    }
}
