//! Text is drawn by emitting a small SVG document of `<text>` elements and rasterizing it with
//! the shared font database.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::assets::SvgRasterizer;
use crate::foundation::color::Color;
use crate::foundation::core::Bitmap;
use crate::foundation::error::StampResult;

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub color: Color,
    pub bold: bool,
}

/// One line of text anchored at its left baseline point.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub baseline: f64,
    pub anchor: TextAnchor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Build a transparent `width`×`height` SVG document holding `runs`.
pub fn text_svg(width: u32, height: u32, style: &TextStyle, runs: &[TextRun]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let weight = if style.bold { "bold" } else { "normal" };
    let opacity = style.color.alpha_f32();
    for run in runs {
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" font-weight="{weight}" fill="{}" fill-opacity="{opacity}" text-anchor="{}" xml:space="preserve">{}</text>"#,
            run.x,
            run.baseline,
            escape_xml(&style.family),
            style.size,
            style.color.to_svg_rgb(),
            run.anchor.as_svg(),
            escape_xml(&run.text),
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize `runs` into a transparent `width`×`height` bitmap.
pub fn render_text(
    rasterizer: &SvgRasterizer,
    width: u32,
    height: u32,
    style: &TextStyle,
    runs: &[TextRun],
) -> StampResult<Bitmap> {
    rasterizer.rasterize_str(&text_svg(width, height, style, runs), width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
