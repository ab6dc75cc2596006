//! Deterministic full-frame rendering and image output
//!
//! Offline frames are shaded row-major with no random sampling or threads,
//! so the same inputs always produce the same bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scene::Scene;
use tracing::info;

use crate::error::RenderError;
use crate::shader::Shader;

/// Shades every pixel with the scalar path. Returns row-major RGB bytes.
pub fn render_frame<S: Scene>(shader: &Shader<'_, S>, width: u32, height: u32) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.extend_from_slice(&shader.render_pixel(x, y));
        }
    }
    rgb
}

/// Shades every pixel eight at a time along each row, finishing ragged row
/// ends with the scalar path. Produces the same bytes as [`render_frame`].
pub fn render_frame_simd<S: Scene>(shader: &Shader<'_, S>, width: u32, height: u32) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let mut x = 0;
        while x + 8 <= width {
            let batch = std::array::from_fn(|i| (x + i as u32, y));
            for color in shader.render_batch(batch) {
                rgb.extend_from_slice(&color);
            }
            x += 8;
        }
        for x in x..width {
            rgb.extend_from_slice(&shader.render_pixel(x, y));
        }
    }
    rgb
}

fn check_len(width: u32, height: u32, rgb: &[u8]) -> Result<(), RenderError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: rgb.len(),
        });
    }
    Ok(())
}

/// Writes a binary PPM: `P6`, dimensions, maximum value 255, then the raw
/// RGB triples.
pub fn write_ppm<W: Write>(
    mut out: W,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<(), RenderError> {
    check_len(width, height, rgb)?;
    write!(out, "P6\n{width} {height}\n255\n")?;
    out.write_all(rgb)?;
    out.flush()?;
    Ok(())
}

/// Saves `rgb` to `path`, as PNG when the extension says so and as PPM
/// otherwise.
pub fn save_image(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<(), RenderError> {
    check_len(width, height, rgb)?;
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        image::save_buffer(path, rgb, width, height, image::ColorType::Rgb8)?;
    } else {
        write_ppm(BufWriter::new(File::create(path)?), width, height, rgb)?;
    }
    info!(path = %path.display(), width, height, "image saved");
    Ok(())
}

/// Timestamped file name in `dir` for a snapshot, such as
/// `snapshot-20240131-235959.ppm`.
pub fn snapshot_path(dir: &Path, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("snapshot-{stamp}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::shader::ShaderConfig;
    use linalg::Vec3;
    use scene::SceneKind;

    #[test]
    fn ppm_header_and_payload() {
        let mut out = Vec::new();
        write_ppm(&mut out, 2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(out, b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06");
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = write_ppm(Vec::new(), 2, 2, &[0; 6]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferSize {
                expected: 12,
                actual: 6
            }
        ));
    }

    #[test]
    fn scalar_and_batched_frames_match() {
        let (w, h) = (21, 9);
        let camera = Camera::new(45.0, w, h, Vec3::new(0.0, 1.0, 4.5), 0.3);
        let config = ShaderConfig {
            time: 1.25,
            ..ShaderConfig::default()
        };
        for scene in SceneKind::ALL {
            let shader = Shader::new(&config, &camera, &scene);
            let scalar = render_frame(&shader, w, h);
            let batched = render_frame_simd(&shader, w, h);
            assert_eq!(scalar.len(), (w * h * 3) as usize);
            assert_eq!(scalar, batched, "{scene}");
        }
    }

    #[test]
    fn snapshot_names_carry_extension() {
        let path = snapshot_path(Path::new("shots"), "png");
        assert!(path.starts_with("shots"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    }
}
