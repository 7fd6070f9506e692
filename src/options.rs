//! Strongly-typed stamping configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so a partial JSON document merges over the
//! defaults below. Range checks live in the newtypes ([`Opacity`], [`ZoomLevel`]) and in
//! [`StampOptions::validate`]; a failed check is an [`StampError::InvalidOption`].

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{StampError, StampResult};
use crate::geo::MAX_ZOOM;

/// Default slippy-map tile source.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Overlay dimensions above this are rejected; they would dwarf any photo.
const MAX_OVERLAY_DIM: u32 = 4096;

/// Opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Opacity(f32);

impl Opacity {
    pub const OPAQUE: Opacity = Opacity(1.0);

    pub fn new(v: f32) -> StampResult<Self> {
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(StampError::invalid_option(format!(
                "opacity must be within [0, 1], got {v}"
            )));
        }
        Ok(Self(v))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Opacity {
    type Error = StampError;

    fn try_from(v: f32) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<Opacity> for f32 {
    fn from(o: Opacity) -> Self {
        o.0
    }
}

/// Tile zoom level in `[0, 19]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub fn new(v: u8) -> StampResult<Self> {
        if v > MAX_ZOOM {
            return Err(StampError::invalid_option(format!(
                "zoom must be within [0, {MAX_ZOOM}], got {v}"
            )));
        }
        Ok(Self(v))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = StampError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(z: ZoomLevel) -> Self {
        z.0
    }
}

/// Bundled compass face artwork.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassStyle {
    #[default]
    Classic,
    Minimal,
    Nautical,
}

impl CompassStyle {
    /// Map the numeric style used on the command line; unknown numbers select `Nautical`.
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => Self::Classic,
            2 => Self::Minimal,
            _ => Self::Nautical,
        }
    }

    pub fn asset_file_name(self) -> &'static str {
        match self {
            Self::Classic => "compass-style1.svg",
            Self::Minimal => "compass-style2.svg",
            Self::Nautical => "compass-style3.svg",
        }
    }
}

/// Shape of the fixed "camera forward" marker drawn over the compass face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassMarker {
    #[default]
    Triangle,
    Arrow,
}

/// How capture timestamps are printed in the caption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `15 de jan de 2025 23:49:08`
    #[default]
    Portuguese,
    /// `2025-01-15 23:49:08`
    Iso,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapOptions {
    pub width: u32,
    pub height: u32,
    pub zoom: ZoomLevel,
    pub opacity: Opacity,
    pub border_radius: u32,
    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub tile_url: String,
    /// Upper bound on concurrent tile downloads.
    pub fetch_threads: usize,
}

impl Default for MinimapOptions {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
            zoom: ZoomLevel(16),
            opacity: Opacity(0.6),
            border_radius: 8,
            tile_url: DEFAULT_TILE_URL.to_owned(),
            fetch_threads: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassOptions {
    pub width: u32,
    pub height: u32,
    pub style: CompassStyle,
    pub arrow_color: Color,
    pub marker: CompassMarker,
}

impl Default for CompassOptions {
    fn default() -> Self {
        Self {
            width: 90,
            height: 90,
            style: CompassStyle::Classic,
            arrow_color: Color::rgb(0x00, 0xd4, 0xd4),
            marker: CompassMarker::Triangle,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoBarOptions {
    pub font_size: u32,
    pub font_family: String,
    pub font_color: Color,
    pub bg_color: Color,
    pub bg_opacity: Opacity,
    pub border_radius: u32,
    pub date_style: DateStyle,
}

impl Default for InfoBarOptions {
    fn default() -> Self {
        Self {
            font_size: 10,
            font_family: "DejaVu Sans Mono".to_owned(),
            font_color: Color::WHITE,
            bg_color: Color::BLACK,
            bg_opacity: Opacity(0.5),
            border_radius: 8,
            date_style: DateStyle::Portuguese,
        }
    }
}

impl InfoBarOptions {
    pub const PADDING_V: u32 = 8;
    pub const PADDING_H: u32 = 14;

    pub fn line_height(&self) -> u32 {
        self.font_size + 4
    }

    /// Height of a bar holding `lines` caption lines; zero lines need no bar.
    pub fn bar_height(&self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }
        lines as u32 * self.line_height() + 2 * Self::PADDING_V
    }
}

/// Everything a stamping run can be configured with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampOptions {
    pub show_compass: bool,
    pub show_minimap: bool,
    pub show_info: bool,
    pub geocode: bool,
    pub minimap: MinimapOptions,
    pub compass: CompassOptions,
    pub info: InfoBarOptions,
    /// Gap between overlays and the photo edges, in pixels.
    pub margin: u32,
    /// Directory holding the SVG assets; see [`StampOptions::resolve_assets_dir`].
    pub assets_dir: Option<PathBuf>,
    pub jpeg_quality: u8,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            show_compass: true,
            show_minimap: true,
            show_info: true,
            geocode: true,
            minimap: MinimapOptions::default(),
            compass: CompassOptions::default(),
            info: InfoBarOptions::default(),
            margin: 10,
            assets_dir: None,
            jpeg_quality: 92,
        }
    }
}

impl StampOptions {
    /// Load a (possibly partial) JSON options document and validate it.
    pub fn from_json_file(path: &Path) -> StampResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> StampResult<Self> {
        let opts: Self = serde_json::from_str(text)
            .map_err(|e| StampError::invalid_option(format!("options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> StampResult<()> {
        check_dim("minimap.width", self.minimap.width)?;
        check_dim("minimap.height", self.minimap.height)?;
        check_dim("compass.width", self.compass.width)?;
        check_dim("compass.height", self.compass.height)?;

        if self.info.font_size == 0 || self.info.font_size > 512 {
            return Err(StampError::invalid_option(format!(
                "info.font_size must be within [1, 512], got {}",
                self.info.font_size
            )));
        }
        if self.info.font_family.trim().is_empty() {
            return Err(StampError::invalid_option("info.font_family must not be empty"));
        }
        if self.minimap.fetch_threads == 0 {
            return Err(StampError::invalid_option(
                "minimap.fetch_threads must be at least 1",
            ));
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.minimap.tile_url.contains(placeholder) {
                return Err(StampError::invalid_option(format!(
                    "minimap.tile_url must contain {placeholder}"
                )));
            }
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(StampError::invalid_option(format!(
                "jpeg_quality must be within [1, 100], got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    pub fn set_minimap_opacity(&mut self, v: f32) -> StampResult<()> {
        self.minimap.opacity = Opacity::new(v)?;
        Ok(())
    }

    pub fn set_minimap_zoom(&mut self, v: u8) -> StampResult<()> {
        self.minimap.zoom = ZoomLevel::new(v)?;
        Ok(())
    }

    pub fn set_info_bg_opacity(&mut self, v: f32) -> StampResult<()> {
        self.info.bg_opacity = Opacity::new(v)?;
        Ok(())
    }

    /// Asset directory: explicit option, then `PHOTOSTAMP_ASSETS_DIR`, then the bundled assets.
    pub fn resolve_assets_dir(&self) -> PathBuf {
        if let Some(dir) = &self.assets_dir {
            return dir.clone();
        }
        if let Some(dir) = std::env::var_os("PHOTOSTAMP_ASSETS_DIR").filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("svg")
    }
}

fn check_dim(name: &str, v: u32) -> StampResult<()> {
    if v == 0 || v > MAX_OVERLAY_DIM {
        return Err(StampError::invalid_option(format!(
            "{name} must be within [1, {MAX_OVERLAY_DIM}], got {v}"
        )));
    }
    Ok(())
}

/// Radius that fits a `width`×`height` rectangle: at most half the shorter side.
pub fn clamp_radius(radius: u32, width: u32, height: u32) -> f64 {
    f64::from(radius).min(f64::from(width.min(height)) / 2.0)
}

#[cfg(test)]
#[path = "../tests/unit/options/options.rs"]
mod tests;
