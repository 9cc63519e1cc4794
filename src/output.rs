//! Format inference, encoding and file writing.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::error::SetupError;

/// Infer the raster format from the extension of `path`.
///
/// # Errors
///
/// Returns an error if the extension is missing or not a known format.
pub fn format_for_path(path: &Path) -> Result<ImageFormat, SetupError> {
    ImageFormat::from_path(path).map_err(|_| SetupError::UnsupportedFormat(path.to_path_buf()))
}

/// Encode `canvas` into memory, then write it to `output_path`.
///
/// Bytes go to a sibling `.partial` file that is renamed over the target
/// once complete, so a failed write never truncates or deletes an existing
/// file. A read-only target is left alone and reported as
/// `PermissionDenied`.
///
/// # Errors
///
/// Returns an error if the format is unsupported, encoding fails, or the
/// file cannot be written.
pub fn save_image(canvas: &RgbImage, output_path: &Path) -> Result<(), SetupError> {
    let format = format_for_path(output_path)?;
    let bytes = encode(canvas, format)
        .map_err(|source| SetupError::Encode { path: output_path.to_path_buf(), source })?;
    log::debug!("encoded {} as {format:?} ({} bytes)", output_path.display(), bytes.len());

    let partial = partial_path(output_path);
    if let Err(e) = write_replacing(&partial, output_path, &bytes) {
        // Only the partial file is ours to clean up.
        let _ = std::fs::remove_file(&partial);
        return Err(SetupError::Io(e));
    }
    Ok(())
}

fn write_replacing(partial: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Ok(meta) = std::fs::metadata(target) {
        if meta.permissions().readonly() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is read-only", target.display()),
            ));
        }
    }
    let mut file = File::create(partial)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(partial, target)
}

/// `dir/.name.partial` next to `path`.
fn partial_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(|| "image".into(), |n| n.to_string_lossy());
    path.with_file_name(format!(".{name}.partial"))
}

fn encode(canvas: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}
