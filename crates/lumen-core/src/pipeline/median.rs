//! Square-window median filter for 8-bit grayscale images.
//!
//! Border pixels are handled by nearest-value extension: coordinates outside
//! the image are clamped to the closest edge row or column. Each row is swept
//! left to right with a 256-bin histogram that drops the outgoing column and
//! adds the incoming one.
//!
//! Clamped coordinates are counted with their multiplicity rather than one by
//! one, so the work per pixel is bounded by the image size even when the
//! window is far larger than the image.

use crate::error::EnhanceError;
use crate::models::{validate_window, GrayImage};

/// Replace every pixel with the median of its `window` x `window` neighborhood.
///
/// `window` must be odd and at least 1; a window of 1 returns a copy.
pub fn median_filter(image: &GrayImage, window: u32) -> Result<GrayImage, EnhanceError> {
    validate_window(window)?;

    if window == 1 || image.data.is_empty() {
        return Ok(image.clone());
    }

    let width = image.width as i64;
    let height = image.height as i64;
    let radius = (window / 2) as i64;
    // Odd area, so the median is the element with this many smaller-or-equal peers.
    // (2^32 - 1)^2 still fits in u64.
    let rank = (window as u64 * window as u64) / 2;

    let clamp_x = |x: i64| x.clamp(0, width - 1) as usize;
    let stride = image.width as usize;

    let mut out = vec![0u8; image.data.len()];
    let mut histogram = [0u64; 256];

    for y in 0..height {
        histogram.fill(0);
        let rows: Vec<(usize, u64)> = clamped_span(y - radius, y + radius, height)
            .into_iter()
            .map(|(row, weight)| (row * stride, weight))
            .collect();

        for (col, col_weight) in clamped_span(-radius, radius, width) {
            for &(row, row_weight) in &rows {
                histogram[image.data[row + col] as usize] += col_weight * row_weight;
            }
        }

        let out_row = y as usize * stride;
        for x in 0..width {
            out[out_row + x as usize] = histogram_median(&histogram, rank);

            if x + 1 < width {
                let outgoing = clamp_x(x - radius);
                let incoming = clamp_x(x + radius + 1);
                if outgoing != incoming {
                    for &(row, row_weight) in &rows {
                        histogram[image.data[row + outgoing] as usize] -= row_weight;
                        histogram[image.data[row + incoming] as usize] += row_weight;
                    }
                }
            }
        }
    }

    Ok(GrayImage {
        width: image.width,
        height: image.height,
        data: out,
    })
}

/// Indices in `0..len` covered by the clamped range `lo..=hi`, each with the
/// number of coordinates that clamp onto it.
fn clamped_span(lo: i64, hi: i64, len: i64) -> Vec<(usize, u64)> {
    let first = lo.clamp(0, len - 1);
    let last = hi.clamp(0, len - 1);

    (first..=last)
        .map(|index| {
            // Edge indices absorb every coordinate beyond them
            let from = if index == 0 { lo } else { index };
            let to = if index == len - 1 { hi } else { index };
            (index as usize, (to - from + 1) as u64)
        })
        .collect()
}

#[inline]
fn histogram_median(histogram: &[u64; 256], rank: u64) -> u8 {
    let mut seen = 0u64;
    for (value, &count) in histogram.iter().enumerate() {
        seen += count;
        if seen > rank {
            return value as u8;
        }
    }
    255
}
