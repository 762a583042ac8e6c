pub mod app;
pub mod cli;
pub mod error;
pub mod mapper;
pub mod overlay;
pub mod report;
pub mod session;

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::SelectorError;
use crate::mapper::Scale;
use crate::session::Session;

/// Fits `original` into `max_w` x `max_h` and builds a session around the
/// result.
pub fn session_for_image(original: &RgbaImage, max_w: u32, max_h: u32) -> Session {
    let orig = (original.width(), original.height());
    let scale = Scale::fit(orig.0, orig.1, max_w, max_h);
    let (w, h) = scale.display_size(orig.0, orig.1);
    let display = if scale.is_scaled() {
        imageops::resize(original, w, h, FilterType::Triangle)
    } else {
        original.clone()
    };
    Session::new(display, orig, scale)
}

pub fn open_session(path: &Path, max_w: u32, max_h: u32) -> Result<Session, SelectorError> {
    let img = image::open(path).map_err(|source| SelectorError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    let session = session_for_image(&img.to_rgba8(), max_w, max_h);
    log::info!("display scale {:.4}", session.scale().factor());
    Ok(session)
}
