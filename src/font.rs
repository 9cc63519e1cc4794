//! Font resolution, text measuring and text drawing.
//!
//! A [`Typeface`] is either an outline font loaded from disk with `ab_glyph`
//! or the built-in bitmap font. [`resolve_font`] never fails: any problem
//! loading the requested file yields the bitmap font instead.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::bitmap;
use crate::error::FontError;

/// Bold font size used for titles.
pub const TITLE_SIZE: f32 = 60.0;
/// Regular font size used for subtitles.
pub const SUBTITLE_SIZE: f32 = 30.0;
/// Regular font size used for the instructional caption.
pub const CAPTION_SIZE: f32 = 20.0;

/// A resolved font at a fixed size.
pub enum Typeface {
    /// Scalable font loaded from a file.
    Outline {
        /// Parsed font data.
        font: FontVec,
        /// Pixel scale (ascent minus descent, in pixels).
        scale: PxScale,
    },
    /// The built-in 5x7 font, each cell drawn as a `scale`×`scale` block.
    Bitmap {
        /// Integer magnification.
        scale: u32,
    },
}

/// Horizontal ink box of a string, relative to its draw origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    /// Offset from the origin to the first inked column.
    pub left: i32,
    /// Ink width in pixels.
    pub width: u32,
}

/// Load an outline font from `path` at `size` pixels per em.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as a font.
pub fn load_font(path: &Path, size: f32) -> Result<Typeface, FontError> {
    let data =
        std::fs::read(path).map_err(|source| FontError::Read { path: path.into(), source })?;
    let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid { path: path.into() })?;
    let units_per_em = font.units_per_em().ok_or_else(|| FontError::Invalid { path: path.into() })?;
    let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
    Ok(Typeface::Outline { font, scale })
}

/// Load the font at `path`, falling back to the built-in font on any failure.
#[must_use]
pub fn resolve_font(path: &Path, size: f32) -> Typeface {
    match load_font(path, size) {
        Ok(face) => {
            log::debug!("loaded {} at {size}px", path.display());
            face
        }
        Err(e) => {
            log::debug!("{e}; using built-in font at {size}px");
            Typeface::builtin(size)
        }
    }
}

impl Typeface {
    /// The built-in bitmap font, magnified to roughly `size` pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn builtin(size: f32) -> Self {
        let scale = (size / 10.0).round().max(1.0) as u32;
        Self::Bitmap { scale }
    }

    /// Measure the ink box of `text` drawn at origin 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn measure(&self, text: &str) -> TextExtent {
        match self {
            Self::Outline { font, scale } => {
                let (glyphs, advance) = layout(font, *scale, text, 0.0, 0.0);
                let mut bounds: Option<(f32, f32)> = None;
                for g in glyphs {
                    if let Some(outlined) = font.outline_glyph(g) {
                        let r = outlined.px_bounds();
                        bounds = Some(match bounds {
                            Some((lo, hi)) => (lo.min(r.min.x), hi.max(r.max.x)),
                            None => (r.min.x, r.max.x),
                        });
                    }
                }
                match bounds {
                    Some((lo, hi)) => {
                        TextExtent { left: lo.floor() as i32, width: (hi.ceil() - lo.floor()) as u32 }
                    }
                    None => TextExtent { left: 0, width: advance.round().max(0.0) as u32 },
                }
            }
            Self::Bitmap { scale } => match bitmap::ink_columns(text) {
                Some((first, last)) => TextExtent {
                    left: i32::try_from(first.saturating_mul(*scale)).unwrap_or(i32::MAX),
                    width: (last - first + 1).saturating_mul(*scale),
                },
                None => {
                    TextExtent { left: 0, width: bitmap::text_cells(text).saturating_mul(*scale) }
                }
            },
        }
    }

    /// Draw `text` with its line top-left at (`x`, `y`).
    ///
    /// For outline fonts `y` is the ascender line; for the bitmap font it is
    /// the top row of cells. Pixels falling outside the canvas are dropped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale } => {
                let (glyphs, _) = layout(font, *scale, text, x as f32, y as f32);
                for g in glyphs {
                    let Some(outlined) = font.outline_glyph(g) else { continue };
                    let r = outlined.px_bounds();
                    let (ox, oy) = (r.min.x as i32, r.min.y as i32);
                    outlined.draw(|gx, gy, coverage| {
                        blend(canvas, ox + gx as i32, oy + gy as i32, color, coverage);
                    });
                }
            }
            Self::Bitmap { scale } => {
                let s = *scale as i32;
                for (i, ch) in text.chars().enumerate() {
                    let cell_x = x + (i as i32) * bitmap::ADVANCE as i32 * s;
                    for col in 0..bitmap::GLYPH_WIDTH {
                        for row in 0..bitmap::GLYPH_HEIGHT {
                            if !bitmap::is_set(ch, col, row) {
                                continue;
                            }
                            let px = cell_x + col as i32 * s;
                            let py = y + row as i32 * s;
                            for dy in 0..s {
                                for dx in 0..s {
                                    blend(canvas, px + dx, py + dy, color, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Horizontal position that centers a `text_width` span on the canvas.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn centered_offset(canvas_width: u32, text_width: u32) -> i32 {
    (canvas_width as i32 - text_width as i32).div_euclid(2)
}

/// Draw origin that places the ink box of `extent` at [`centered_offset`].
#[must_use]
pub fn centered_origin(canvas_width: u32, extent: TextExtent) -> i32 {
    centered_offset(canvas_width, extent.width) - extent.left
}

/// Position glyphs on a single line, returning them with the total advance.
fn layout(font: &FontVec, scale: PxScale, text: &str, x: f32, y: f32) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let baseline = y + scaled.ascent();
    let mut caret = 0.0;
    let mut prev = None;
    let mut glyphs = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(x + caret, baseline)));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
    (glyphs, caret)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else { return };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x, y);
    for (d, s) in dst.0.iter_mut().zip(color.0) {
        *d = (f32::from(s) * a + f32::from(*d) * (1.0 - a)).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    #[test]
    fn missing_file_falls_back_silently() {
        let face = resolve_font(Path::new("/nonexistent/font.ttf"), 30.0);
        assert!(matches!(face, Typeface::Bitmap { .. }));
    }

    #[test]
    fn garbage_file_falls_back_silently() {
        let dir = std::env::temp_dir().join("kicks_font_garbage_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        assert!(matches!(load_font(&path, 20.0), Err(FontError::Invalid { .. })));
        assert!(matches!(resolve_font(&path, 20.0), Typeface::Bitmap { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_reports_read_error() {
        let err = load_font(Path::new("/nonexistent/font.ttf"), 20.0).err().unwrap();
        assert!(matches!(err, FontError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }

    #[test]
    fn builtin_scale_tracks_size() {
        assert!(matches!(Typeface::builtin(60.0), Typeface::Bitmap { scale: 6 }));
        assert!(matches!(Typeface::builtin(20.0), Typeface::Bitmap { scale: 2 }));
        assert!(matches!(Typeface::builtin(1.0), Typeface::Bitmap { scale: 1 }));
    }

    #[test]
    fn bitmap_measure() {
        let face = Typeface::Bitmap { scale: 2 };
        assert_eq!(face.measure("AB"), TextExtent { left: 0, width: 22 });
        assert_eq!(face.measure(""), TextExtent { left: 0, width: 0 });
        assert_eq!(face.measure("  "), TextExtent { left: 0, width: 22 });
    }

    #[test]
    fn bitmap_measure_uses_ink_not_cells() {
        let face = Typeface::Bitmap { scale: 6 };
        assert_eq!(face.measure("1"), TextExtent { left: 6, width: 18 });
        assert_eq!(face.measure("SNEAKER 1"), TextExtent { left: 0, width: 312 });
    }

    #[test]
    fn bitmap_blank_edged_text_is_centered() {
        let face = Typeface::Bitmap { scale: 6 };
        for text in ["1", "Il1", "SNEAKER 1", "i'l"] {
            let mut canvas = RgbImage::new(800, 60);
            let extent = face.measure(text);
            face.draw(&mut canvas, centered_origin(800, extent), 5, text, Rgb([255, 255, 255]));

            let xs: Vec<u32> = canvas
                .enumerate_pixels()
                .filter(|(_, _, p)| p.0 != [0, 0, 0])
                .map(|(x, _, _)| x)
                .collect();
            let first = *xs.iter().min().unwrap();
            let last = *xs.iter().max().unwrap();
            assert_eq!(last - first + 1, extent.width, "{text}");
            let (left_margin, right_margin) = (first, 799 - last);
            assert!(left_margin.abs_diff(right_margin) <= 1, "{text}: {left_margin} vs {right_margin}");
        }
    }

    #[test]
    fn centering_matches_floor_division() {
        assert_eq!(centered_offset(800, 300), 250);
        assert_eq!(centered_offset(800, 301), 249);
        assert_eq!(centered_offset(800, 801), -1);
        let extent = TextExtent { left: 3, width: 100 };
        assert_eq!(centered_origin(800, extent), 347);
    }

    #[test]
    fn bitmap_draw_lands_inside_measured_box() {
        let face = Typeface::Bitmap { scale: 3 };
        let mut canvas = RgbImage::new(200, 60);
        let extent = face.measure("HI");
        let x = centered_origin(200, extent);
        face.draw(&mut canvas, x, 10, "HI", Rgb([255, 255, 255]));

        let inked: Vec<u32> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(px, _, _)| px)
            .collect();
        let min = *inked.iter().min().unwrap();
        let max = *inked.iter().max().unwrap();
        assert_eq!(i64::from(min), i64::from(centered_offset(200, extent.width)));
        assert_eq!(max - min + 1, extent.width);
    }

    #[test]
    fn draw_clips_off_canvas() {
        let face = Typeface::Bitmap { scale: 4 };
        let mut canvas = RgbImage::new(10, 10);
        let ink = Rgb([0, 255, 65]);
        face.draw(&mut canvas, -15, -5, "WIDE TEXT", ink);
        face.draw(&mut canvas, 8, 8, "X", ink);

        // last column of 'W' reaches x=1..=4 from its second row down
        assert_eq!(*canvas.get_pixel(1, 0), ink);
        assert_eq!(*canvas.get_pixel(4, 2), ink);
        // top-left cell of 'X' straddles the bottom-right corner
        assert_eq!(*canvas.get_pixel(8, 8), ink);
        assert_eq!(*canvas.get_pixel(9, 9), ink);
        assert_eq!(*canvas.get_pixel(0, 9), Rgb([0, 0, 0]));
    }

    #[test]
    fn outline_ink_is_centered() {
        if !Path::new(DEJAVU).exists() {
            eprintln!("skipping outline_ink_is_centered: {DEJAVU} not installed");
            return;
        }
        let face = resolve_font(Path::new(DEJAVU), 30.0);
        assert!(matches!(face, Typeface::Outline { .. }));

        let text = "Air Jordan 4 - Mushroom";
        let extent = face.measure(text);
        assert!(extent.width > 0);

        let mut canvas = RgbImage::new(800, 100);
        face.draw(&mut canvas, centered_origin(800, extent), 10, text, Rgb([255, 255, 255]));
        let first = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(x, _, _)| x)
            .min()
            .unwrap();
        let expected = centered_offset(800, extent.width);
        assert!((i64::from(first) - i64::from(expected)).abs() <= 1);
    }
}
