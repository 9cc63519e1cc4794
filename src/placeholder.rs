//! Placeholder image model and rendering.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::config::FontsConfig;
use crate::error::SetupError;
use crate::font::{
    centered_origin, resolve_font, Typeface, CAPTION_SIZE, SUBTITLE_SIZE, TITLE_SIZE,
};
use crate::output::save_image;

/// Caption drawn near the bottom of every placeholder.
pub const INSTRUCTION_TEXT: &str = "Replace with actual sneaker image";

/// Largest glow offset; the title is redrawn at offsets `GLOW_STEPS..=1`.
const GLOW_STEPS: i32 = 5;

/// Everything needed to draw one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Fill color.
    pub background_color: Rgb<u8>,
    /// Border stroke color.
    pub border_color: Rgb<u8>,
    /// Border stroke width, also its inset from the canvas edge.
    pub border_width: u32,
    /// Large centered heading.
    pub title: String,
    /// Crisp title color.
    pub title_color: Rgb<u8>,
    /// Dim halo color drawn under the title.
    pub glow_color: Rgb<u8>,
    /// Line below the title.
    pub subtitle: String,
    /// Subtitle color.
    pub subtitle_color: Rgb<u8>,
    /// Caption near the bottom edge.
    pub instruction_text: String,
    /// Caption color.
    pub instruction_color: Rgb<u8>,
}

impl ImageSpec {
    /// The standard neon-on-black placeholder for `title` and `subtitle`.
    #[must_use]
    pub fn new(title: &str, subtitle: &str) -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: Rgb([0x0a, 0x0a, 0x0a]),
            border_color: Rgb([0x00, 0xff, 0x41]),
            border_width: 3,
            title: title.to_string(),
            title_color: Rgb([0x00, 0xff, 0x41]),
            glow_color: Rgb([0x00, 0x3d, 0x1a]),
            subtitle: subtitle.to_string(),
            subtitle_color: Rgb([0x39, 0xff, 0x14]),
            instruction_text: INSTRUCTION_TEXT.to_string(),
            instruction_color: Rgb([0x00, 0xff, 0x9f]),
        }
    }
}

/// Render `spec` to a canvas and write it to `path`.
///
/// Fonts that cannot be loaded are replaced by the built-in font without
/// error. The output format follows the extension of `path`.
///
/// # Errors
///
/// Returns an error if the extension is not a supported format or the file
/// cannot be written.
pub fn generate(
    path: &Path,
    title: &str,
    subtitle: &str,
    fonts: &FontsConfig,
) -> Result<(), SetupError> {
    let spec = ImageSpec::new(title, subtitle);
    let canvas = render(&spec, fonts);
    save_image(&canvas, path)?;
    println!("✅ Created: {}", path.display());
    Ok(())
}

/// Draw `spec` into a fresh canvas.
#[must_use]
pub fn render(spec: &ImageSpec, fonts: &FontsConfig) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(spec.width, spec.height, spec.background_color);
    draw_border(&mut canvas, spec.border_width, spec.border_color);

    let title_font = resolve_font(&fonts.bold, TITLE_SIZE);
    let subtitle_font = resolve_font(&fonts.regular, SUBTITLE_SIZE);

    let title_x = centered_origin(spec.width, title_font.measure(&spec.title));
    let subtitle_x = centered_origin(spec.width, subtitle_font.measure(&spec.subtitle));
    let mid = half(spec.height);
    let title_y = mid - 50;

    draw_glow(&mut canvas, &title_font, title_x, title_y, &spec.title, spec.glow_color);
    title_font.draw(&mut canvas, title_x, title_y, &spec.title, spec.title_color);
    subtitle_font.draw(&mut canvas, subtitle_x, mid + 50, &spec.subtitle, spec.subtitle_color);

    let caption_font = resolve_font(&fonts.regular, CAPTION_SIZE);
    let caption_x = centered_origin(spec.width, caption_font.measure(&spec.instruction_text));
    caption_font.draw(
        &mut canvas,
        caption_x,
        signed(spec.height) - 100,
        &spec.instruction_text,
        spec.instruction_color,
    );

    canvas
}

/// Stroke the rectangle `(width, width)`..=`(w - width, h - width)`, growing inward.
fn draw_border(canvas: &mut RgbImage, width: u32, color: Rgb<u8>) {
    let (w, h) = canvas.dimensions();
    if width == 0 || w <= 2 * width || h <= 2 * width {
        return;
    }
    let (x0, y0, x1, y1) = (width, width, w - width, h - width);
    for (x, y, px) in canvas.enumerate_pixels_mut() {
        let inside_outer = (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
        let inside_inner = x >= x0 + width && x + width <= x1 && y >= y0 + width && y + width <= y1;
        if inside_outer && !inside_inner {
            *px = color;
        }
    }
}

/// Soft halo: the title redrawn at shrinking offsets along both diagonals.
fn draw_glow(canvas: &mut RgbImage, font: &Typeface, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    for offset in (1..=GLOW_STEPS).rev() {
        font.draw(canvas, x + offset, y + offset, text, color);
        font.draw(canvas, x - offset, y - offset, text, color);
    }
}

fn signed(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn half(v: u32) -> i32 {
    signed(v / 2)
}
