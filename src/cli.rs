use std::path::PathBuf;

use clap::Parser;

use crate::error::SelectorError;
use crate::mapper::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

#[derive(Debug, Parser)]
#[command(
    name = "prompt-selector",
    version,
    about = "Pick point and box prompts on an image for a segmentation model."
)]
pub struct Args {
    /// Image to annotate
    pub image: Option<PathBuf>,

    /// Largest width shown on screen; bigger images are downscaled
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: u32,

    /// Largest height shown on screen; bigger images are downscaled
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: u32,

    /// Also print the final prompts as JSON on exit
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    pub image_path: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
    pub json: bool,
}

impl Args {
    pub fn into_config(self) -> Result<SelectorConfig, SelectorError> {
        let image_path = self.image.ok_or(SelectorError::MissingArgument)?;
        Ok(SelectorConfig {
            image_path,
            max_width: self.max_width,
            max_height: self.max_height,
            json: self.json,
        })
    }
}
