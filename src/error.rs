use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Usage: prompt-selector <image_path>")]
    MissingArgument,

    #[error("Could not load image: {}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not open window: {0}")]
    Window(#[from] eframe::Error),

    #[error("could not encode prompts: {0}")]
    Json(#[from] serde_json::Error),
}
