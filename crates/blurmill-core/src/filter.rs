//! Spatial box blur over planar channels.
//!
//! Each interior sample becomes the truncating integer average of the
//! `filter_size x filter_size` window around it. Samples within `pad` rows or
//! columns of an edge are passed through unchanged, so a kernel too large for
//! the image degenerates to the identity.

use crate::image::{Channel, Image};

/// Blur one channel with an NxN uniform-average window.
///
/// `filter_size` is expected to be odd; `pad` is `filter_size / 2`. The
/// output has the same dimensions as the input. Pure function, safe to call
/// concurrently on independent channels.
pub fn box_blur(input: &Channel, filter_size: usize) -> Channel {
    let width = input.width();
    let height = input.height();
    let pad = filter_size / 2;

    // Starting from a copy gives border passthrough for free: only interior
    // pixels are overwritten below.
    let mut output = input.clone();
    if pad == 0 || height < filter_size || width < filter_size {
        return output;
    }

    let window = (filter_size * filter_size) as u32;
    for row in pad..height - pad {
        for col in pad..width - pad {
            let mut sum: u32 = 0;
            for k_row in row - pad..=row + pad {
                for k_col in col - pad..=col + pad {
                    sum += u32::from(input.get(k_row, k_col));
                }
            }
            output.set(row, col, (sum / window) as u8);
        }
    }
    output
}

/// Blur every channel of an image independently, preserving channel order
/// and dimensions.
pub fn blur_image(input: &Image, filter_size: usize) -> Image {
    input.map_channels(|channel| box_blur(channel, filter_size))
}
