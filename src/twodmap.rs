// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A two-dimensional map that can lose columns.
//!
//! Everything the carver keeps per pixel (the pixels themselves, the
//! energy of each pixel, the cumulative cost of reaching each pixel)
//! lives in one of these.  The backing storage is allocated once with
//! the original width as its stride; removing a seam slides each row
//! left over the seam and narrows the *live* width by one.  All
//! addressing goes through the live width, so the stale cells left at
//! the right end of each row are never read.

use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field with a fixed stride and a
/// shrinking live width.
#[derive(Debug, Clone)]
pub struct TwoDimensionalMap<T: Copy> {
    stride: u32,
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy> TwoDimensionalMap<T> {
    /// A map with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        TwoDimensionalMap {
            stride: width,
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// A map whose cells are produced by `f(x, y)`, row by row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> T,
    {
        TwoDimensionalMap {
            stride: width,
            width,
            height,
            data: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    /// The live width.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Live `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  The
    // stride is the original width; the bound is the live one.
    fn get_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside the live {}x{} region",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    /// Signed lookup for neighborhood sampling: anything outside the
    /// live region is `None`.
    pub fn get(&self, x: i64, y: i64) -> Option<T> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(self.data[self.get_index(x as u32, y as u32)])
    }

    /// The live cells of row `y`.
    pub fn row(&self, y: u32) -> &[T] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Remove one cell per row, at the column named by `seam[y]`,
    /// sliding the rest of the row left over it.  The live width
    /// shrinks by one.
    pub fn remove_seam(&mut self, seam: &[u32]) {
        debug_assert_eq!(seam.len(), self.height as usize);
        debug_assert!(self.width > 0);
        let (stride, width) = (self.stride as usize, self.width as usize);
        for (y, &x) in seam.iter().enumerate() {
            let start = y * stride;
            let x = x as usize;
            self.data.copy_within(start + x + 1..start + width, start + x);
        }
        self.width -= 1;
    }
}

impl<T: Copy> Index<(u32, u32)> for TwoDimensionalMap<T> {
    type Output = T;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &T {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<T: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<T> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let map = TwoDimensionalMap::from_fn(3, 2, |x, y| y * 10 + x);
        assert_eq!(map.row(0), &[0, 1, 2]);
        assert_eq!(map.row(1), &[10, 11, 12]);
        assert_eq!(map[(2, 1)], 12);
    }

    #[test]
    fn remove_seam_shifts_each_row_independently() {
        let mut map = TwoDimensionalMap::from_fn(4, 3, |x, y| y * 10 + x);
        map.remove_seam(&[0, 1, 3]);
        assert_eq!(map.dimensions(), (3, 3));
        assert_eq!(map.row(0), &[1, 2, 3]);
        assert_eq!(map.row(1), &[10, 12, 13]);
        assert_eq!(map.row(2), &[20, 21, 22]);
    }

    #[test]
    fn stale_columns_are_out_of_bounds() {
        let mut map = TwoDimensionalMap::filled(3, 1, 7u8);
        map.remove_seam(&[1]);
        assert_eq!(map.get(1, 0), Some(7));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(0, 1), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn indexing_past_live_width_panics_in_debug() {
        let mut map = TwoDimensionalMap::filled(3, 1, 0u8);
        map.remove_seam(&[0]);
        let _ = map[(2, 0)];
    }
}
