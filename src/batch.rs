//! The setup batch: the fixed sneaker list, banners and the next-steps guide.

use std::path::{Path, PathBuf};

use crate::config::{FontsConfig, Placeholder};
use crate::error::SetupError;
use crate::placeholder::generate;

const SNEAKERS: [(&str, &str, &str); 3] = [
    ("sneaker1.jpg", "SNEAKER 1", "Air Jordan 4 - Mushroom"),
    ("sneaker2.jpg", "SNEAKER 2", "Air Jordan 4 - Union"),
    ("sneaker3.jpg", "SNEAKER 3", "Air Jordan 1 - Mocha"),
];

const RULE_WIDTH: usize = 50;

/// The built-in sneaker placeholders.
#[must_use]
pub fn default_placeholders() -> Vec<Placeholder> {
    SNEAKERS
        .iter()
        .map(|&(filename, title, subtitle)| Placeholder {
            filename: filename.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        })
        .collect()
}

/// Where `placeholder` is written inside `out_dir`.
#[must_use]
pub fn output_path(out_dir: &Path, placeholder: &Placeholder) -> PathBuf {
    out_dir.join(&placeholder.filename)
}

/// Generate every placeholder in order, printing progress and instructions.
///
/// Stops at the first failure.
///
/// # Errors
///
/// Returns the first error raised by [`generate`].
pub fn run_batch(
    out_dir: &Path,
    placeholders: &[Placeholder],
    fonts: &FontsConfig,
) -> Result<Vec<PathBuf>, SetupError> {
    println!("🚀 Setting up Future Kicks website...");
    println!("{}", rule());

    let mut written = Vec::with_capacity(placeholders.len());
    for placeholder in placeholders {
        let path = output_path(out_dir, placeholder);
        log::debug!("generating {} ({:?})", path.display(), placeholder.title);
        generate(&path, &placeholder.title, &placeholder.subtitle, fonts)?;
        written.push(path);
    }

    println!("{}", rule());
    println!("✅ Setup complete!");
    print!("{}", next_steps());
    Ok(written)
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Usage guide printed after a successful batch.
#[must_use]
pub fn next_steps() -> &'static str {
    "\n📝 Next steps:\n\
     1. Replace the placeholder images with your actual sneaker photos\n\
     2. Open index.html in your browser\n\
     3. Enjoy your futuristic sneaker website!\n\
     \n🌐 To start a local server:\n   \
     python3 -m http.server 8000\n   \
     Then visit: http://localhost:8000\n"
}
