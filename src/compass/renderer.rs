use kurbo::BezPath;

use crate::assets::{PreparedSvg, SvgRasterizer};
use crate::codec;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Bitmap, Point};
use crate::foundation::error::{StampError, StampResult};
use crate::model::Direction;
use crate::options::{CompassMarker, CompassOptions};
use crate::render::{Canvas, TextAnchor, TextRun, TextStyle, render_text};

const DIAL_FILL: Color = Color::rgba(30, 30, 30, 220);
const DIAL_STROKE: Color = Color::rgb(60, 60, 60);

/// Artwork under the heading marker.
#[derive(Clone, Debug)]
pub enum CompassFace {
    Asset(PreparedSvg),
    /// Dark dial with N/S/E/W labels and a heading line.
    Procedural,
}

#[derive(Clone, Debug)]
pub struct CompassRenderer {
    face: CompassFace,
    arrow_color: Color,
    marker: CompassMarker,
}

impl CompassRenderer {
    pub fn new(face: CompassFace, arrow_color: Color, marker: CompassMarker) -> Self {
        Self {
            face,
            arrow_color,
            marker,
        }
    }

    /// Load the face for `options.style`, falling back to the procedural dial.
    pub fn from_assets(rasterizer: &SvgRasterizer, options: &CompassOptions) -> Self {
        let face = match rasterizer.load(options.style.asset_file_name()) {
            Ok(svg) => CompassFace::Asset(svg),
            Err(e @ StampError::AssetMissing { .. }) => {
                tracing::warn!(error = %e, "compass asset missing, drawing procedural compass");
                CompassFace::Procedural
            }
            Err(e) => {
                tracing::warn!(error = %e, "compass asset unusable, drawing procedural compass");
                CompassFace::Procedural
            }
        };
        Self::new(face, options.arrow_color, options.marker)
    }

    pub fn face(&self) -> &CompassFace {
        &self.face
    }

    /// Render a `width`×`height` compass. The face is drawn square at the larger side and
    /// resampled when the requested shape is not square.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = width, height = height, heading = direction.map(|d| d.degrees))
    )]
    pub fn render(
        &self,
        rasterizer: &SvgRasterizer,
        width: u32,
        height: u32,
        direction: Option<&Direction>,
    ) -> StampResult<Bitmap> {
        let size = width.max(height);
        let square = match &self.face {
            CompassFace::Asset(svg) => self.render_asset(rasterizer, svg, size, direction)?,
            CompassFace::Procedural => self.render_procedural(rasterizer, size, direction)?,
        };
        if width == height {
            Ok(square)
        } else {
            codec::resize(&square, width, height)
        }
    }

    fn render_asset(
        &self,
        rasterizer: &SvgRasterizer,
        svg: &PreparedSvg,
        size: u32,
        direction: Option<&Direction>,
    ) -> StampResult<Bitmap> {
        let face = rasterizer.rasterize_fit(svg, size, size)?;
        let mut canvas = match direction {
            Some(d) => {
                let c = f64::from(size) / 2.0;
                let mut canvas = Canvas::new(size, size)?;
                canvas.draw_bitmap(&face, face_rotation(d.degrees, Point::new(c, c)));
                canvas
            }
            None => Canvas::from_bitmap(face)?,
        };
        let marker = match self.marker {
            CompassMarker::Triangle => triangle_marker(size),
            CompassMarker::Arrow => arrow_marker(size),
        };
        canvas.fill_path(&marker, self.arrow_color);
        canvas.into_bitmap()
    }

    fn render_procedural(
        &self,
        rasterizer: &SvgRasterizer,
        size: u32,
        direction: Option<&Direction>,
    ) -> StampResult<Bitmap> {
        let s = f64::from(size);
        let c = f64::from(size / 2);
        let center = Point::new(c, c);

        let mut canvas = Canvas::new(size, size)?;
        let radius = (c - 3.0).max(1.0);
        canvas.fill_circle(center, radius, DIAL_FILL);
        canvas.stroke_circle(center, radius, DIAL_STROKE, 2.0);

        if let Some(d) = direction {
            let theta = (d.degrees - 90.0).to_radians();
            let length = f64::from(size / 3);
            let tip = Point::new(
                (c + length * theta.cos()).round(),
                (c + length * theta.sin()).round(),
            );
            let mut line = BezPath::new();
            line.move_to(center);
            line.line_to(tip);
            canvas.stroke_path(&line, self.arrow_color, 3.0);
        }

        let style = TextStyle {
            family: "DejaVu Sans".to_owned(),
            size: 12.0,
            color: Color::WHITE,
            bold: true,
        };
        let label = |text: &str, x: f64, baseline: f64| TextRun {
            text: text.to_owned(),
            x,
            baseline,
            anchor: TextAnchor::Middle,
        };
        let labels = [
            label("N", c, 8.0 + 11.0),
            label("S", c, s - 8.0),
            label("E", s - 12.0, c + 4.0),
            label("W", 12.0, c + 4.0),
        ];
        let text = render_text(rasterizer, size, size, &style, &labels)?;
        canvas.draw_bitmap(&text, Affine::IDENTITY);
        canvas.into_bitmap()
    }
}

/// Counter-clockwise turn by the heading, so the cardinal the camera faces ends up on top.
pub fn face_rotation(heading_degrees: f64, center: Point) -> Affine {
    Affine::rotate_about(-heading_degrees.to_radians(), center)
}

/// Elongated triangle from near the top edge down to just below the center.
pub fn triangle_marker(size: u32) -> BezPath {
    let s = f64::from(size);
    let c = f64::from(size / 2);
    let top = (s * 0.12).round();
    let bottom = c + 2.0;
    let half = (s * 0.06).round();

    let mut path = BezPath::new();
    path.move_to((c, top));
    path.line_to((c - half, bottom));
    path.line_to((c + half, bottom));
    path.close_path();
    path
}

/// Shaft from the center with an arrowhead near the top edge.
pub fn arrow_marker(size: u32) -> BezPath {
    let s = f64::from(size);
    let c = f64::from(size / 2);
    let top = (s * 0.12).round();
    let head_len = (s * 0.14).round().max(3.0);
    let head_half = (s * 0.08).round().max(2.0);
    let shaft_half = (s * 0.02).round().max(1.0);

    let mut path = BezPath::new();
    path.move_to((c, top));
    path.line_to((c + head_half, top + head_len));
    path.line_to((c + shaft_half, top + head_len));
    path.line_to((c + shaft_half, c + 2.0));
    path.line_to((c - shaft_half, c + 2.0));
    path.line_to((c - shaft_half, top + head_len));
    path.line_to((c - head_half, top + head_len));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compass/renderer.rs"]
mod tests;
