pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

/// Source-over of a premultiplied `src` pixel onto a straight-alpha `dst` pixel.
///
/// Returns a straight-alpha pixel. Fully transparent sources leave `dst` untouched and fully
/// opaque sources replace it, so blits of opaque art are exact.
pub(crate) fn over_premul_onto_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let sa = f32::from(sa) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let dst_weight = da * (1.0 - sa);
    let out_a = sa + dst_weight;
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f32::from(src[c]) / 255.0;
        let d = f32::from(dst[c]) / 255.0;
        out[c] = unit_to_u8((s + d * dst_weight) / out_a);
    }
    out[3] = unit_to_u8(out_a);
    out
}

/// Source-over of a straight-alpha `src` pixel onto a straight-alpha `dst` pixel.
pub(crate) fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    over_premul_onto_straight(dst, premul_rgba8(src))
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
