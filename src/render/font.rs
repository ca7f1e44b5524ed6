use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Family name every chart element is drawn with.
pub const FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Make a TrueType font available to the chart backend, once per process.
///
/// `preferred` is tried first, then a list of common system locations.
/// Returns `false` when nothing could be registered, in which case charts
/// must be drawn without text.
pub fn ensure_registered(preferred: Option<&Path>) -> bool {
    REGISTERED
        .get_or_init(|| {
            let candidates = preferred
                .into_iter()
                .map(Path::to_path_buf)
                .chain(SYSTEM_FONTS.iter().copied().map(PathBuf::from));
            for path in candidates {
                match try_register(&path) {
                    Ok(()) => {
                        info!(font = %path.display(), "registered chart font");
                        return Some(path);
                    }
                    Err(e) => debug!(font = %path.display(), "font unavailable: {}", e),
                }
            }
            warn!("no TrueType font found; charts will be drawn without text");
            None
        })
        .is_some()
}

fn try_register(path: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(path)?;
    // the backend keeps fonts for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| anyhow::anyhow!("not a usable TrueType font"))
}
