use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Deserialize;

use dewarp_imgproc::calibration::CalibrationPoint;

use crate::error::IoError;

/// One entry of a points file, either `{"x": 1, "y": 2}` or `[1, 2]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRecord {
    Object(CalibrationPoint),
    Pair([i32; 2]),
}

impl From<PointRecord> for CalibrationPoint {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::Object(point) => point,
            PointRecord::Pair(pair) => pair.into(),
        }
    }
}

/// Read boundary points of the fisheye circle from a json file.
///
/// The file holds an array whose entries are objects with `x` and `y` fields
/// or `[x, y]` pairs. Both forms can be mixed.
///
/// # Example
///
/// ```no_run
/// use dewarp_io::calibration::read_calibration_points;
///
/// let points = read_calibration_points("points.json").unwrap();
/// println!("{} points", points.len());
/// ```
pub fn read_calibration_points(
    file_path: impl AsRef<Path>,
) -> Result<Vec<CalibrationPoint>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(file_path)?);
    let records: Vec<PointRecord> = serde_json::from_reader(reader)?;
    let points = records.into_iter().map(CalibrationPoint::from).collect::<Vec<_>>();

    log::debug!("read {} points from {}", points.len(), file_path.display());

    Ok(points)
}

/// Write boundary points to a json file as an array of `{"x", "y"}` objects.
pub fn write_calibration_points(
    file_path: impl AsRef<Path>,
    points: &[CalibrationPoint],
) -> Result<(), IoError> {
    let writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(writer, points)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_both_forms() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.json");
        std::fs::write(&file_path, r#"[{"x": 10, "y": -3}, [250, 150], {"y": 1, "x": 2}]"#)?;

        let points = read_calibration_points(&file_path)?;
        assert_eq!(
            points,
            vec![
                CalibrationPoint::new(10, -3),
                CalibrationPoint::new(250, 150),
                CalibrationPoint::new(2, 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn write_then_read() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.json");
        let points = (0..12)
            .map(|i| CalibrationPoint::new(i * 3, 100 - i))
            .collect::<Vec<_>>();

        write_calibration_points(&file_path, &points)?;
        assert_eq!(read_calibration_points(&file_path)?, points);
        Ok(())
    }

    #[test]
    fn malformed_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.json");
        std::fs::write(&file_path, r#"[[1, 2, 3]]"#)?;

        let res = read_calibration_points(&file_path);
        assert!(matches!(res, Err(IoError::JsonError(_))));

        let res = read_calibration_points(tmp_dir.path().join("missing.json"));
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
        Ok(())
    }
}
