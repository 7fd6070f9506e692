use kurbo::BezPath;

use crate::assets::SvgRasterizer;
use crate::foundation::color::Color;
use crate::foundation::core::{Bitmap, Point};
use crate::foundation::error::{StampError, StampResult};
use crate::render::{Canvas, blit_over};

pub const PIN_ASSET: &str = "map-pin.svg";
/// Edge of the square the pin artwork is fitted into.
pub const PIN_SIZE: u32 = 32;

const PIN_RED: Color = Color::rgb(220, 53, 69);
const PIN_BORDER: Color = Color::rgb(90, 0, 0);
const PIN_CORE: Color = Color::rgb(14, 35, 46);

/// Location marker drawn with its tip on the minimap center.
#[derive(Clone, Debug)]
pub enum PinMarker {
    /// Pre-rasterized `PIN_SIZE`² artwork whose tip is its bottom-center pixel.
    Asset(Bitmap),
    /// Teardrop drawn from fills.
    Procedural,
}

impl PinMarker {
    /// Rasterize the pin asset, or fall back to [`PinMarker::Procedural`] when it is unusable.
    pub fn from_assets(rasterizer: &SvgRasterizer) -> Self {
        let loaded = rasterizer
            .load(PIN_ASSET)
            .and_then(|svg| rasterizer.rasterize_fit(&svg, PIN_SIZE, PIN_SIZE));
        match loaded {
            Ok(bitmap) => Self::Asset(bitmap),
            Err(e @ StampError::AssetMissing { .. }) => {
                tracing::warn!(error = %e, "pin asset missing, drawing procedural pin");
                Self::Procedural
            }
            Err(e) => {
                tracing::warn!(error = %e, "pin asset unusable, drawing procedural pin");
                Self::Procedural
            }
        }
    }

    /// Draw the pin so its tip lands on the center pixel of `map`.
    pub fn draw(&self, map: Bitmap) -> StampResult<Bitmap> {
        let cx = i64::from(map.width() / 2);
        let cy = i64::from(map.height() / 2);
        match self {
            Self::Asset(pin) => {
                let mut map = map;
                let x = cx - i64::from(pin.width() / 2);
                let y = cy - i64::from(pin.height());
                blit_over(&mut map, pin, x, y, 1.0);
                Ok(map)
            }
            Self::Procedural => draw_teardrop(map, cx as f64, cy as f64),
        }
    }
}

fn draw_teardrop(map: Bitmap, cx: f64, cy: f64) -> StampResult<Bitmap> {
    const HEAD_RADIUS: f64 = 8.0;
    let head = Point::new(cx + 0.5, cy - 20.0 + 0.5);
    let tip = Point::new(cx + 0.5, cy + 1.0);

    let mut canvas = Canvas::from_bitmap(map)?;
    canvas.fill_circle(head, HEAD_RADIUS + 1.0, PIN_BORDER);
    canvas.fill_circle(head, HEAD_RADIUS - 1.0, PIN_RED);

    let mut body = BezPath::new();
    body.move_to((head.x - HEAD_RADIUS, head.y + HEAD_RADIUS - 2.0));
    body.line_to((head.x + HEAD_RADIUS, head.y + HEAD_RADIUS - 2.0));
    body.line_to(tip);
    body.close_path();
    canvas.fill_path(&body, PIN_RED);

    canvas.fill_circle(head, 4.0, PIN_CORE);
    canvas.into_bitmap()
}

#[cfg(test)]
#[path = "../../tests/unit/minimap/pin.rs"]
mod tests;
