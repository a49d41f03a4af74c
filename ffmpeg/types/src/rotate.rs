/*!
    In-place 180° rotation of packed 4-byte-per-pixel images.
*/

use crate::PixelBufferMut;
use crate::buffer::BYTES_PER_PIXEL;

/**
    Rotate the image in `buffer` by 180° in place.

    The pixel at (x, y) ends up at (width - 1 - x, height - 1 - y).
    Row `i` is exchanged with row `height - 1 - i`, reversing pixel order
    while swapping; when the height is odd the middle row is mirrored on
    its own. Row padding is left untouched. No allocation is performed.
*/
pub fn rotate_180(buffer: &mut PixelBufferMut<'_>) {
    let (width, height, stride) = (buffer.width(), buffer.height(), buffer.stride());
    if width == 0 || height == 0 {
        return;
    }
    let row_bytes = width * BYTES_PER_PIXEL;
    let data = buffer.data_mut();

    let (mut top, mut bottom) = (0, height - 1);
    while top < bottom {
        let (head, tail) = data.split_at_mut(bottom * stride);
        let upper = &mut head[top * stride..top * stride + row_bytes];
        let lower = &mut tail[..row_bytes];
        for (a, b) in upper
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(lower.chunks_exact_mut(BYTES_PER_PIXEL).rev())
        {
            a.swap_with_slice(b);
        }
        top += 1;
        bottom -= 1;
    }

    if top == bottom {
        let start = top * stride;
        mirror_row(&mut data[start..start + row_bytes]);
    }
}

/**
    Reverse the order of the 4-byte pixels in a single row.
*/
fn mirror_row(row: &mut [u8]) {
    let pixels = row.len() / BYTES_PER_PIXEL;
    let (left, right) = row.split_at_mut(pixels / 2 * BYTES_PER_PIXEL);
    // An odd middle pixel sits at the front of `right` and stays put.
    let right_start = right.len() - pixels / 2 * BYTES_PER_PIXEL;
    for (a, b) in left
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(right[right_start..].chunks_exact_mut(BYTES_PER_PIXEL).rev())
    {
        a.swap_with_slice(b);
    }
}
