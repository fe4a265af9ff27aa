//! Separable Gaussian blur for RGB buffers.
//!
//! Two passes (horizontal, then vertical) in `f32`, sampling past the borders
//! by clamping to the nearest edge pixel. Rows are spread over the rayon pool.
use ndarray::{Array3, Axis};
use rayon::prelude::*;

use crate::core::buffer::ImageBuffer;

/// Normalized 1D Gaussian kernel spanning about six sigma, always of odd length.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Blur `image` with a Gaussian of standard deviation `sigma`.
/// A non-positive sigma returns an unchanged copy.
pub fn gaussian_blur(image: &ImageBuffer, sigma: f32) -> ImageBuffer {
    if sigma <= 0.0 || image.is_empty() {
        return image.clone();
    }

    let input = image.view();
    let (height, width, channels) = input.dim();
    let kernel = gaussian_kernel_1d(sigma);
    let half = kernel.len() as isize / 2;
    let last_x = width as isize - 1;
    let last_y = height as isize - 1;

    // Pass 1: horizontal, one row per task
    let mut temp = Array3::<f32>::zeros((height, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sx = (x as isize + ki as isize - half).clamp(0, last_x) as usize;
                        sum += input[[y, sx, c]] as f32 * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Pass 2: vertical
    let mut result = Array3::<u8>::zeros((height, width, channels));
    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half).clamp(0, last_y) as usize;
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = sum.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    ImageBuffer::from_array(result)
}
