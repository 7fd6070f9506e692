use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::fonts::{build_fontdb, font_resolver};
use crate::foundation::core::Bitmap;
use crate::foundation::error::{StampError, StampResult};

/// Parsed SVG document, ready to rasterize at any size.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    tree: Arc<usvg::Tree>,
}

impl PreparedSvg {
    /// Intrinsic size in SVG user units.
    pub fn size(&self) -> (f32, f32) {
        let s = self.tree.size();
        (s.width(), s.height())
    }
}

/// Loads SVG assets from one directory and rasterizes them into [`Bitmap`]s.
pub struct SvgRasterizer {
    assets_dir: PathBuf,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("assets_dir", &self.assets_dir)
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl SvgRasterizer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        let assets_dir = assets_dir.into();
        let fontdb = build_fontdb(&assets_dir);
        Self { assets_dir, fontdb }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Load `<assets_dir>/<file_name>`; a missing file is [`StampError::AssetMissing`].
    pub fn load(&self, file_name: &str) -> StampResult<PreparedSvg> {
        let path = self.assets_dir.join(file_name);
        if !path.is_file() {
            return Err(StampError::asset_missing(path));
        }
        let bytes = std::fs::read(&path)
            .map_err(|e| StampError::codec(format!("read '{}': {e}", path.display())))?;
        self.parse(&bytes)
    }

    pub fn parse(&self, bytes: &[u8]) -> StampResult<PreparedSvg> {
        let opts = usvg::Options {
            resources_dir: Some(self.assets_dir.clone()),
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| StampError::codec(format!("parse svg: {e}")))?;
        Ok(PreparedSvg {
            tree: Arc::new(tree),
        })
    }

    /// Parse generated SVG markup and rasterize it at `width`×`height`.
    pub fn rasterize_str(&self, markup: &str, width: u32, height: u32) -> StampResult<Bitmap> {
        let svg = self.parse(markup.as_bytes())?;
        self.rasterize(&svg, width, height)
    }

    /// Rasterize `svg` stretched to exactly `width`×`height`.
    pub fn rasterize(&self, svg: &PreparedSvg, width: u32, height: u32) -> StampResult<Bitmap> {
        let (sw, sh) = svg.size();
        self.render(svg, width, height, width as f32 / sw, height as f32 / sh, 0.0, 0.0)
    }

    /// Rasterize `svg` into a `width`×`height` bitmap, scaled uniformly and centered.
    pub fn rasterize_fit(&self, svg: &PreparedSvg, width: u32, height: u32) -> StampResult<Bitmap> {
        let (sw, sh) = svg.size();
        let scale = (width as f32 / sw).min(height as f32 / sh);
        let tx = (width as f32 - sw * scale) / 2.0;
        let ty = (height as f32 - sh * scale) / 2.0;
        self.render(svg, width, height, scale, scale, tx, ty)
    }

    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        svg: &PreparedSvg,
        width: u32,
        height: u32,
        sx: f32,
        sy: f32,
        tx: f32,
        ty: f32,
    ) -> StampResult<Bitmap> {
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            StampError::codec(format!("failed to allocate {width}x{height} svg pixmap"))
        })?;
        let xform = resvg::tiny_skia::Transform::from_row(sx, 0.0, 0.0, sy, tx, ty);
        resvg::render(&svg.tree, xform, &mut pixmap.as_mut());
        Bitmap::from_premul_rgba8(width, height, pixmap.take())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/rasterize.rs"]
mod tests;
