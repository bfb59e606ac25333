//! Writing generated frames to disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::{Config, Error, PixelBuffer};

/// The directory the command line tool writes into.
pub const DEFAULT_OUTPUT_DIR: &str = "samples";

/// Writes `buffer` to `dir`, named after [`Config::output_file`], creating
/// the directory if needed. Returns the path of the written file.
///
/// The outcome is logged either way.
pub fn write_to_file(
    dir: impl AsRef<Path>,
    config: &Config,
    buffer: &PixelBuffer,
) -> Result<PathBuf, Error> {
    let dir = dir.as_ref();
    let path = dir.join(config.output_file());

    match fs::create_dir_all(dir).and_then(|()| fs::write(&path, buffer.as_bytes())) {
        Ok(()) => {
            info!("successfully wrote pixel data to file {}", path.display());
            Ok(path)
        }
        Err(e) => {
            error!("unable to write pixel data to file {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}
