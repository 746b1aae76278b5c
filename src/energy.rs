// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is an L1 Sobel-style gradient of luminance
//! over its eight neighbors.  Anything outside the live image samples
//! as black, so the outer ring of pixels always looks like an abrupt
//! edge.  That is deliberate: it pushes seams away from the borders,
//! and clamping to the nearest in-bounds pixel instead would change
//! which seams get chosen there.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use num_traits::NumCast;
use std::ops::Index;

const RED: f32 = 0.2126;
const GREEN: f32 = 0.7152;
const BLUE: f32 = 0.0722;

#[inline]
fn channel<S: Primitive>(c: S) -> f32 {
    <f32 as NumCast>::from(c).unwrap_or(0.0)
}

/// The brightness of the pixel at `(x, y)`, on the image's own channel
/// scale.  Coordinates may be one pixel outside the live image, in
/// which case the answer is zero.  Alpha is ignored.
pub fn luminance<P: Pixel>(pixels: &TwoDimensionalMap<P>, x: i64, y: i64) -> f32 {
    match pixels.get(x, y) {
        Some(pixel) => {
            let rgb = pixel.to_rgb();
            let c = rgb.0;
            RED * channel(c[0]) + GREEN * channel(c[1]) + BLUE * channel(c[2])
        }
        None => 0.0,
    }
}

/// The energy of one pixel, from the luminance of its eight neighbors:
///
/// ```text
///   gx = NW + W + SW - NE - E - SE
///   gy = NW + N + NE - SW - S - SE
///   e  = |gx| + |gy|
/// ```
pub fn pixel_energy<P: Pixel>(pixels: &TwoDimensionalMap<P>, x: u32, y: u32) -> f32 {
    let (x, y) = (<i64 as From<u32>>::from(x), <i64 as From<u32>>::from(y));
    let lum = |dx: i64, dy: i64| luminance(pixels, x + dx, y + dy);

    let (nw, n, ne) = (lum(-1, -1), lum(0, -1), lum(1, -1));
    let (w, e) = (lum(-1, 0), lum(1, 0));
    let (sw, s, se) = (lum(-1, 1), lum(0, 1), lum(1, 1));

    let gx = nw + w + sw - ne - e - se;
    let gy = nw + n + ne - sw - s - se;
    gx.abs() + gy.abs()
}

/// The energy of every live pixel, kept parallel to the pixel buffer.
#[derive(Debug, Clone)]
pub struct EnergyField {
    map: TwoDimensionalMap<f32>,
}

impl EnergyField {
    /// Compute the energy of every pixel once.
    pub fn compute<P: Pixel>(pixels: &TwoDimensionalMap<P>) -> Self {
        let (width, height) = pixels.dimensions();
        EnergyField {
            map: TwoDimensionalMap::from_fn(width, height, |x, y| pixel_energy(pixels, x, y)),
        }
    }

    /// A convenience wrapper: the energy field of an image view.
    pub fn from_image<I, P>(image: &I) -> Self
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel,
    {
        let (width, height) = image.dimensions();
        Self::compute(&TwoDimensionalMap::from_fn(width, height, |x, y| {
            image.get_pixel(x, y)
        }))
    }

    pub fn width(&self) -> u32 {
        self.map.width()
    }

    pub fn height(&self) -> u32 {
        self.map.height()
    }

    /// The live energies of row `y`.
    pub fn row(&self, y: u32) -> &[f32] {
        self.map.row(y)
    }

    /// Recompute a single pixel against the current state of `pixels`.
    pub fn refresh<P: Pixel>(&mut self, pixels: &TwoDimensionalMap<P>, x: u32, y: u32) {
        self.map[(x, y)] = pixel_energy(pixels, x, y);
    }

    pub(crate) fn remove_seam(&mut self, seam: &[u32]) {
        self.map.remove_seam(seam);
    }

    /// Render the field as a grayscale image, scaled so the most
    /// energetic pixel is white.
    pub fn to_image(&self) -> GrayImage {
        let (width, height) = self.map.dimensions();
        let peak = (0..height)
            .flat_map(|y| self.map.row(y).iter().copied())
            .fold(0.0f32, f32::max);
        ImageBuffer::from_fn(width, height, |x, y| {
            if peak <= 0.0 {
                return Luma([0]);
            }
            let scaled = (self.map[(x, y)] / peak * 255.0).round();
            Luma([<u8 as NumCast>::from(scaled).unwrap_or(u8::MAX)])
        })
    }
}

impl Index<(u32, u32)> for EnergyField {
    type Output = f32;

    fn index(&self, xy: (u32, u32)) -> &f32 {
        &self.map[xy]
    }
}
