//! Reading GPS position, heading, capture time and orientation from a photo.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

use crate::foundation::error::{StampError, StampResult};
use crate::geo::{GeoPoint, apply_hemisphere, parse_coordinate};
use crate::model::{Direction, PhotoMetadata};

pub trait MetadataProvider: Send + Sync {
    fn read(&self, path: &Path) -> StampResult<PhotoMetadata>;
}

/// Returns the same metadata for every photo.
#[derive(Clone, Debug, Default)]
pub struct StaticMetadata {
    metadata: PhotoMetadata,
}

impl StaticMetadata {
    pub fn new(metadata: PhotoMetadata) -> Self {
        Self { metadata }
    }
}

impl MetadataProvider for StaticMetadata {
    fn read(&self, _path: &Path) -> StampResult<PhotoMetadata> {
        Ok(self.metadata.clone())
    }
}

const EXIFTOOL_TAGS: [&str; 9] = [
    "-GPSLatitude",
    "-GPSLongitude",
    "-GPSLatitudeRef",
    "-GPSLongitudeRef",
    "-GPSImgDirection",
    "-GPSImgDirectionRef",
    "-DateTimeOriginal",
    "-CreateDate",
    "-Orientation",
];

/// Shells out to `exiftool -json -n`.
#[derive(Clone, Debug)]
pub struct ExifToolMetadata {
    program: PathBuf,
}

impl Default for ExifToolMetadata {
    fn default() -> Self {
        Self {
            program: PathBuf::from("exiftool"),
        }
    }
}

impl ExifToolMetadata {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MetadataProvider for ExifToolMetadata {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    fn read(&self, path: &Path) -> StampResult<PhotoMetadata> {
        let output = Command::new(&self.program)
            .args(["-json", "-n"])
            .args(EXIFTOOL_TAGS)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StampError::metadata(format!(
                    "'{}' not found on PATH; install exiftool or pass --lat/--lng",
                    self.program.display()
                )),
                _ => StampError::metadata(format!("failed to run exiftool: {e}")),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StampError::metadata(format!(
                "exiftool exited with {} for '{}': {}",
                output.status,
                path.display(),
                stderr.trim()
            )));
        }
        parse_exiftool_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Return `true` when `exiftool` can be invoked from `PATH`.
pub fn is_exiftool_on_path() -> bool {
    Command::new("exiftool")
        .arg("-ver")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Interpret the JSON array printed by `exiftool -json -n` for a single file.
pub fn parse_exiftool_json(text: &str) -> StampResult<PhotoMetadata> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| StampError::metadata(format!("exiftool JSON: {e}")))?;
    let tags = match &doc {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(&doc),
        _ => None,
    }
    .and_then(Value::as_object)
    .ok_or_else(|| StampError::metadata("exiftool JSON holds no file entry"))?;

    let text_of = |key: &str| -> Option<String> {
        match tags.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    let gps = match (text_of("GPSLatitude"), text_of("GPSLongitude")) {
        (Some(lat), Some(lng)) => {
            let lat = apply_hemisphere(parse_coordinate(&lat), text_of("GPSLatitudeRef").as_deref());
            let lng = apply_hemisphere(parse_coordinate(&lng), text_of("GPSLongitudeRef").as_deref());
            Some(GeoPoint::new(round_to(lat, 6), round_to(lng, 6)))
        }
        _ => None,
    };

    let direction = text_of("GPSImgDirection")
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .map(|d| Direction::from_exif(d, text_of("GPSImgDirectionRef").as_deref()));

    let datetime = text_of("DateTimeOriginal").or_else(|| text_of("CreateDate"));

    let orientation = tags
        .get("Orientation")
        .and_then(Value::as_u64)
        .and_then(|o| u8::try_from(o).ok())
        .filter(|o| (1..=8).contains(o));

    Ok(PhotoMetadata {
        gps,
        direction,
        datetime,
        orientation,
    })
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/metadata.rs"]
mod tests;
