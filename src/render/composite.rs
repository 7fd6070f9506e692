//! Integer blend kernels over premultiplied RGBA8 [`Bitmap`]s.

use crate::foundation::core::{Bitmap, PremulRgba8};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// Source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = u16::from(unit_to_u8(opacity));
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Intersection of `src` placed at `(x, y)` with `dst`, as
/// `(dst_x, dst_y, src_x, src_y, width, height)`; `None` when nothing overlaps.
fn clip(
    dst: &Bitmap,
    src: &Bitmap,
    x: i64,
    y: i64,
) -> Option<(usize, usize, usize, usize, usize, usize)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src.width())).min(i64::from(dst.width()));
    let y1 = (y + i64::from(src.height())).min(i64::from(dst.height()));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((
        x0 as usize,
        y0 as usize,
        (x0 - x) as usize,
        (y0 - y) as usize,
        (x1 - x0) as usize,
        (y1 - y0) as usize,
    ))
}

/// Blend `src` over `dst` with its top-left corner at `(x, y)`; parts outside `dst` are dropped.
pub fn blit_over(dst: &mut Bitmap, src: &Bitmap, x: i64, y: i64, opacity: f32) {
    let Some((dx, dy, sx, sy, w, h)) = clip(dst, src, x, y) else {
        return;
    };
    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for row in 0..h {
        let d_start = (dy + row) * dst_stride + dx * 4;
        let s_start = (sy + row) * src_stride + sx * 4;
        let d_row = &mut dst_data[d_start..d_start + w * 4];
        let s_row = &src_data[s_start..s_start + w * 4];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
}

/// Replace the pixels of `dst` under `src` placed at `(x, y)`, clipped to `dst`.
pub fn copy_into(dst: &mut Bitmap, src: &Bitmap, x: i64, y: i64) {
    let Some((dx, dy, sx, sy, w, h)) = clip(dst, src, x, y) else {
        return;
    };
    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for row in 0..h {
        let d_start = (dy + row) * dst_stride + dx * 4;
        let s_start = (sy + row) * src_stride + sx * 4;
        dst_data[d_start..d_start + w * 4].copy_from_slice(&src_data[s_start..s_start + w * 4]);
    }
}

/// Scale every channel (premultiplied) by `opacity`.
pub fn multiply_opacity(bitmap: &mut Bitmap, opacity: f32) {
    let op = u16::from(unit_to_u8(opacity));
    if op == 255 {
        return;
    }
    for c in bitmap.data_mut() {
        *c = mul_div255_u8(u16::from(*c), op);
    }
}

/// Scale every pixel by an 8-bit coverage mask with one byte per pixel.
///
/// A mask whose length does not match the bitmap leaves it untouched.
pub fn apply_coverage(bitmap: &mut Bitmap, coverage: &[u8]) {
    let pixels = bitmap.width() as usize * bitmap.height() as usize;
    if coverage.len() != pixels {
        tracing::warn!(
            expected = pixels,
            got = coverage.len(),
            "coverage mask size mismatch"
        );
        return;
    }
    for (px, &m) in bitmap.data_mut().chunks_exact_mut(4).zip(coverage) {
        match m {
            255 => {}
            0 => px.fill(0),
            _ => {
                for c in px.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), u16::from(m));
                }
            }
        }
    }
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
