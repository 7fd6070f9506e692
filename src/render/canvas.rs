//! Vector drawing into a [`Bitmap`] on top of tiny-skia.

use kurbo::{PathEl, RoundedRect, Shape as _};
use resvg::tiny_skia;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Bitmap, Point};
use crate::foundation::error::{StampError, StampResult};
use crate::render::composite::apply_coverage;

const PATH_TOLERANCE: f64 = 0.1;

/// Mutable drawing surface. Pixels stay premultiplied RGBA8 throughout.
pub struct Canvas {
    pixmap: tiny_skia::Pixmap,
}

impl Canvas {
    /// Transparent canvas.
    pub fn new(width: u32, height: u32) -> StampResult<Self> {
        let pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            StampError::codec(format!("failed to allocate {width}x{height} canvas"))
        })?;
        Ok(Self { pixmap })
    }

    pub fn from_bitmap(bitmap: Bitmap) -> StampResult<Self> {
        let (w, h) = (bitmap.width(), bitmap.height());
        let size = tiny_skia::IntSize::from_wh(w, h)
            .ok_or_else(|| StampError::codec(format!("invalid canvas size {w}x{h}")))?;
        let pixmap = tiny_skia::Pixmap::from_vec(bitmap.into_premul_rgba8(), size)
            .ok_or_else(|| StampError::codec("bitmap does not fit canvas"))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(sk) = to_skia_path(path) else {
            return;
        };
        self.pixmap.fill_path(
            &sk,
            &paint(color),
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    pub fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let Some(sk) = to_skia_path(path) else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: width as f32,
            line_cap: tiny_skia::LineCap::Round,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(
            &sk,
            &paint(color),
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let circle = kurbo::Circle::new(center, radius);
        self.fill_path(&circle.to_path(PATH_TOLERANCE), color);
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64) {
        let circle = kurbo::Circle::new(center, radius);
        self.stroke_path(&circle.to_path(PATH_TOLERANCE), color, width);
    }

    /// Draw `bitmap` through `transform` with bilinear sampling.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, transform: Affine) {
        let Some(src) =
            tiny_skia::PixmapRef::from_bytes(bitmap.data(), bitmap.width(), bitmap.height())
        else {
            return;
        };
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..tiny_skia::PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src, &paint, to_skia_transform(transform), None);
    }

    pub fn into_bitmap(self) -> StampResult<Bitmap> {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        Bitmap::from_premul_rgba8(w, h, self.pixmap.take())
    }
}

fn paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

pub(crate) fn to_skia_transform(a: Affine) -> tiny_skia::Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs();
    tiny_skia::Transform::from_row(
        sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
    )
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Anti-aliased coverage of a `width`×`height` rounded rectangle, one byte per pixel.
///
/// `radius` is clamped to half the shorter side.
pub fn rounded_rect_coverage(width: u32, height: u32, radius: f64) -> StampResult<Vec<u8>> {
    let mut mask = tiny_skia::Mask::new(width, height).ok_or_else(|| {
        StampError::codec(format!("failed to allocate {width}x{height} mask"))
    })?;
    let radius = radius.clamp(0.0, f64::from(width.min(height)) / 2.0);
    let shape = RoundedRect::new(0.0, 0.0, f64::from(width), f64::from(height), radius);
    if let Some(path) = to_skia_path(&shape.to_path(PATH_TOLERANCE)) {
        mask.fill_path(
            &path,
            tiny_skia::FillRule::Winding,
            true,
            tiny_skia::Transform::identity(),
        );
    }
    Ok(mask.data().to_vec())
}

/// Make the corners outside a rounded rectangle of `radius` transparent.
pub fn round_corners(bitmap: &mut Bitmap, radius: f64) -> StampResult<()> {
    if radius <= 0.0 {
        return Ok(());
    }
    let coverage = rounded_rect_coverage(bitmap.width(), bitmap.height(), radius)?;
    apply_coverage(bitmap, &coverage);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
