//! Image assets for the scenes.
//!
//! Backgrounds and matcaps are read from the asset directory. A missing
//! file is replaced with a generated stand-in so the demo still runs from a
//! bare checkout; a file that exists but fails to decode is an error.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use image::{Rgba, RgbaImage};

const BACKGROUND_SIZE: (u32, u32) = (512, 512);
const MATCAP_SIZE: u32 = 256;

/// Stand-in generated when an asset file is missing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fallback {
    /// Vertical sRGB gradient.
    Background { top: [u8; 3], bottom: [u8; 3] },
    /// Lit sphere in the given sRGB tint.
    Matcap { tint: [u8; 3] },
}

impl Fallback {
    pub fn generate(self) -> RgbaImage {
        match self {
            Fallback::Background { top, bottom } => {
                gradient_background(BACKGROUND_SIZE.0, BACKGROUND_SIZE.1, top, bottom)
            }
            Fallback::Matcap { tint } => lit_sphere_matcap(MATCAP_SIZE, tint),
        }
    }
}

/// Loads `dir/name` as RGBA8, or generates `fallback` if the file is absent.
pub fn load_or_generate(dir: &Path, name: &str, fallback: Fallback) -> Result<RgbaImage> {
    let path = dir.join(name);
    if !path.is_file() {
        log::warn!("asset {} not found; using a generated stand-in", path.display());
        return Ok(fallback.generate());
    }

    let img = image::open(&path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    log::debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img.to_rgba8())
}

pub fn gradient_background(width: u32, height: u32, top: [u8; 3], bottom: [u8; 3]) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let span = (height - 1).max(1) as f32;

    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / span;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba([mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2]), 255])
    })
}

/// A matcap of a glossy sphere lit from the upper left.
///
/// Pixels outside the disc take the rim normal so edge samples stay
/// plausible under linear filtering.
pub fn lit_sphere_matcap(size: u32, tint: [u8; 3]) -> RgbaImage {
    let size = size.max(2);
    let light = Vec3::new(-0.4, 0.6, 0.7).normalize();
    let half = (light + Vec3::Z).normalize();

    RgbaImage::from_fn(size, size, |x, y| {
        let nx = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
        let ny = 1.0 - (y as f32 + 0.5) / size as f32 * 2.0;
        let r2 = nx * nx + ny * ny;

        let n = if r2 < 1.0 {
            Vec3::new(nx, ny, (1.0 - r2).sqrt())
        } else {
            Vec3::new(nx, ny, 0.0).normalize_or_zero()
        };

        let diffuse = n.dot(light).max(0.0);
        let specular = n.dot(half).max(0.0).powf(32.0);
        let shade = |c: u8| {
            let v = c as f32 * (0.2 + 0.8 * diffuse) + 255.0 * 0.6 * specular;
            v.clamp(0.0, 255.0).round() as u8
        };
        Rgba([shade(tint[0]), shade(tint[1]), shade(tint[2]), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(p: &Rgba<u8>) -> u32 {
        p.0[..3].iter().map(|&c| c as u32).sum()
    }

    // ── generated stand-ins ───────────────────────────────────────────────

    #[test]
    fn gradient_spans_top_to_bottom() {
        let img = gradient_background(4, 11, [0, 0, 0], [200, 100, 50]);
        assert_eq!(img.dimensions(), (4, 11));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(3, 10).0, [200, 100, 50, 255]);
        assert_eq!(img.get_pixel(2, 5).0, [100, 50, 25, 255]);
    }

    #[test]
    fn matcap_is_lit_from_upper_left() {
        let img = lit_sphere_matcap(64, [200, 40, 40]);
        let upper_left = img.get_pixel(20, 18);
        let lower_right = img.get_pixel(44, 46);
        assert!(luma(upper_left) > luma(lower_right));
    }

    #[test]
    fn matcap_keeps_tint_and_is_opaque() {
        let img = lit_sphere_matcap(32, [40, 200, 40]);
        let p = img.get_pixel(16, 16).0;
        assert!(p[1] > p[0] && p[1] > p[2]);
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn degenerate_sizes_are_raised() {
        assert_eq!(gradient_background(0, 0, [0; 3], [0; 3]).dimensions(), (1, 1));
        assert_eq!(lit_sphere_matcap(0, [0; 3]).dimensions(), (2, 2));
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn missing_file_uses_fallback() {
        let dir = std::env::temp_dir().join("fader-assets-does-not-exist");
        let img = load_or_generate(&dir, "red.png", Fallback::Matcap { tint: [255, 0, 0] });
        assert!(matches!(img, Ok(ref i) if i.dimensions() == (MATCAP_SIZE, MATCAP_SIZE)));
    }

    #[test]
    fn existing_file_is_decoded() {
        let dir = std::env::temp_dir().join(format!("fader-assets-ok-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        gradient_background(3, 2, [10, 20, 30], [10, 20, 30])
            .save(dir.join("bg.png"))
            .unwrap();

        let img = load_or_generate(&dir, "bg.png", Fallback::Matcap { tint: [0; 3] }).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("fader-assets-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bg.jpg"), b"not a jpeg").unwrap();

        let res = load_or_generate(&dir, "bg.jpg", Fallback::Matcap { tint: [0; 3] });
        assert!(res.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
