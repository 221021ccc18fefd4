use lamp_base::Frame;

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

// BT.601 in 8.8 fixed point
fn yuv_to_rgb(y: i32, u: i32, v: i32) -> [u8; 3] {
    let (d, e) = (u - 128, v - 128);
    [
        clamp_u8(y + ((359 * e) >> 8)),
        clamp_u8(y - ((88 * d + 183 * e) >> 8)),
        clamp_u8(y + ((454 * d) >> 8)),
    ]
}

/// Converts packed YUYV 4:2:2 (`Y0 U Y1 V`, two pixels share U and V) to
/// an RGB frame.
///
/// Returns `None` when `width` is odd or `data` holds fewer than
/// `width * height * 2` bytes. Trailing bytes are ignored.
pub fn yuyv_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Frame> {
    if width % 2 != 0 {
        return None;
    }
    let len = width.checked_mul(height)?.checked_mul(2)?;
    let packed = data.get(..len)?;

    let mut rgb = Vec::with_capacity(len / 2 * 3);
    for quad in packed.chunks_exact(4) {
        let (u, v) = (quad[1] as i32, quad[3] as i32);
        rgb.extend_from_slice(&yuv_to_rgb(quad[0] as i32, u, v));
        rgb.extend_from_slice(&yuv_to_rgb(quad[2] as i32, u, v));
    }
    Frame::new(width, height, rgb).ok()
}
