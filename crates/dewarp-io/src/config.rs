use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use dewarp_imgproc::fisheye::DewarpConfig;

use crate::error::IoError;

/// Read a run configuration from a json file.
///
/// Missing fields take their default value.
pub fn read_config(file_path: impl AsRef<Path>) -> Result<DewarpConfig, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(file_path)?);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Write a run configuration to a json file.
pub fn write_config(file_path: impl AsRef<Path>, config: &DewarpConfig) -> Result<(), IoError> {
    let writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(writer, config)?;
    Ok(())
}
