// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine.  The image is copied once into a
//! working buffer; the energy field and cost table are computed once
//! alongside it, and from then on every removal patches all three in
//! place instead of starting over.

use crate::cost::{CostTable, CostTableStrategy};
use crate::energy::EnergyField;
use crate::error::{CarveError, Result};
use crate::seamfinder::{Seam, SeamFinder};
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use tracing::{debug, trace};

/// An in-progress carve: the working pixels plus the energy field and
/// cost table that describe them.  All three share the same live width.
#[derive(Debug, Clone)]
pub struct Carving<P: Pixel> {
    pixels: TwoDimensionalMap<P>,
    energy: EnergyField,
    cost: CostTable,
    strategy: CostTableStrategy,
}

impl<P: Pixel> Carving<P> {
    /// Copy `image` into a working buffer and compute its energy field
    /// and cost table.
    pub fn new<I>(image: &I, strategy: CostTableStrategy) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
    {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::DegenerateImage { width, height });
        }

        let pixels = TwoDimensionalMap::from_fn(width, height, |x, y| image.get_pixel(x, y));
        let energy = EnergyField::compute(&pixels);
        let cost = CostTable::build(&energy);
        Ok(Carving {
            pixels,
            energy,
            cost,
            strategy,
        })
    }

    /// The live width.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &TwoDimensionalMap<P> {
        &self.pixels
    }

    pub fn energy(&self) -> &EnergyField {
        &self.energy
    }

    pub fn cost(&self) -> &CostTable {
        &self.cost
    }

    /// The cheapest seam through the current state.
    pub fn next_seam(&self) -> Seam {
        self.cost.find_vertical_seam()
    }

    /// Remove `seam` from the pixels, shifting everything to its right
    /// one column left, then patch the energy field and cost table.
    ///
    /// Energy is refreshed at the seam column and its left neighbor in
    /// every row, and only after every row has been shifted, since each
    /// refresh reads the rows above and below.
    ///
    /// A carving is never narrowed below one column; asking for that
    /// leaves it untouched and fails with `InvalidSeamCount`.
    pub fn remove_seam(&mut self, seam: &Seam) -> Result<()> {
        let width = self.width();
        if width <= 1 {
            return Err(CarveError::InvalidSeamCount { seams: 1, width });
        }
        debug_assert_eq!(seam.len(), self.height() as usize);
        debug_assert!(seam.is_connected());

        self.pixels.remove_seam(seam);
        self.energy.remove_seam(seam);

        let width = self.pixels.width();
        for (y, &x) in (0..).zip(seam.iter()) {
            if x < width {
                self.energy.refresh(&self.pixels, x, y);
            }
            if x > 0 {
                self.energy.refresh(&self.pixels, x - 1, y);
            }
        }

        self.strategy.refresh(&mut self.cost, &self.energy, seam);
        Ok(())
    }

    /// Materialize the live region as a fresh image.
    pub fn into_image(self) -> ImageBuffer<P, Vec<P::Subpixel>> {
        let (width, height) = self.pixels.dimensions();
        ImageBuffer::from_fn(width, height, |x, y| self.pixels[(x, y)])
    }
}

fn validate(width: u32, height: u32, seams: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(CarveError::DegenerateImage { width, height });
    }
    if seams >= width {
        return Err(CarveError::InvalidSeamCount { seams, width });
    }
    Ok(())
}

/// A struct for holding the image to be carved, and how to carve it.
pub struct SeamCarver<'a, I: GenericImageView> {
    image: &'a I,
    strategy: CostTableStrategy,
}

impl<'a, I, P, S> SeamCarver<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a I) -> Self {
        Self {
            image,
            strategy: CostTableStrategy::default(),
        }
    }

    /// Choose how the cost table is kept current between removals.
    pub fn strategy(mut self, strategy: CostTableStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Remove `seams` vertical seams, returning an image that many
    /// columns narrower.  The source image is never modified.
    pub fn carve(&self, seams: u32) -> Result<ImageBuffer<P, Vec<S>>> {
        let (width, height) = self.image.dimensions();
        validate(width, height, seams)?;
        debug!(width, height, seams, strategy = %self.strategy, "carving");

        let mut carving = Carving::new(self.image, self.strategy)?;
        for n in 0..seams {
            let seam = carving.next_seam();
            trace!(seam = n, top = ?seam.first(), bottom = ?seam.last(), "removing seam");
            carving.remove_seam(&seam)?;
        }

        debug!(width = carving.width(), height = carving.height(), "carved");
        Ok(carving.into_image())
    }
}

/// Narrow `image` by `seams` columns using the default strategy.
pub fn remove_vertical_seams<I, P, S>(image: &I, seams: u32) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    SeamCarver::new(image).carve(seams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    const IMAGE_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];

    fn sample() -> GrayImage {
        GrayImage::from_raw(5, 4, IMAGE_DATA.to_vec()).unwrap()
    }

    fn assert_same_tables(a: &Carving<Luma<u8>>, b: &Carving<Luma<u8>>) {
        assert_eq!(a.width(), b.width());
        for y in 0..a.height() {
            assert_eq!(a.pixels().row(y), b.pixels().row(y), "pixels, row {}", y);
            assert_eq!(a.energy().row(y), b.energy().row(y), "energy, row {}", y);
            assert_eq!(a.cost().row(y), b.cost().row(y), "cost, row {}", y);
        }
    }

    #[test]
    fn validation_rejects_bad_counts_and_shapes() {
        assert_eq!(validate(5, 4, 4), Ok(()));
        assert_eq!(
            validate(5, 4, 5),
            Err(CarveError::InvalidSeamCount { seams: 5, width: 5 })
        );
        assert_eq!(
            validate(0, 4, 0),
            Err(CarveError::DegenerateImage { width: 0, height: 4 })
        );
        assert_eq!(
            validate(4, 0, 0),
            Err(CarveError::DegenerateImage { width: 4, height: 0 })
        );
    }

    #[test]
    fn removal_shifts_pixels_over_the_seam() {
        let mut carving = Carving::new(&sample(), CostTableStrategy::default()).unwrap();
        carving.remove_seam(&Seam::from(vec![2, 3, 4, 3])).unwrap();
        assert_eq!(carving.width(), 4);
        assert_eq!(carving.pixels().row(0), &[Luma([9]), Luma([9]), Luma([9]), Luma([9])]);
        assert_eq!(carving.pixels().row(1), &[Luma([9]), Luma([1]), Luma([9]), Luma([9])]);
        assert_eq!(carving.pixels().row(2), &[Luma([9]), Luma([9]), Luma([9]), Luma([9])]);
        assert_eq!(carving.pixels().row(3), &[Luma([9]), Luma([9]), Luma([9]), Luma([9])]);
    }

    #[test]
    fn patched_energy_matches_at_the_seam() {
        let mut carving = Carving::new(&sample(), CostTableStrategy::default()).unwrap();
        let seam = carving.next_seam();
        carving.remove_seam(&seam).unwrap();
        let fresh = EnergyField::compute(carving.pixels());
        let width = carving.width();
        for (y, &x) in (0..).zip(seam.iter()) {
            if x < width {
                assert_eq!(carving.energy()[(x, y)], fresh[(x, y)]);
            }
            if x > 0 {
                assert_eq!(carving.energy()[(x - 1, y)], fresh[(x - 1, y)]);
            }
        }
    }

    // Hand-picked seams hugging each border, where the band clamps.
    #[test]
    fn band_update_matches_rebuild_at_the_edges() {
        for seam in [vec![0, 0, 1, 0], vec![4, 4, 3, 4], vec![0, 1, 2, 3], vec![4, 3, 2, 1]] {
            let image = sample();
            let mut band = Carving::new(&image, CostTableStrategy::IncrementalBand).unwrap();
            let mut full = Carving::new(&image, CostTableStrategy::FullRebuild).unwrap();
            let seam = Seam::from(seam);
            band.remove_seam(&seam).unwrap();
            full.remove_seam(&seam).unwrap();
            assert_same_tables(&band, &full);
        }
    }

    #[test]
    fn band_update_matches_rebuild_down_to_one_column() {
        let image = sample();
        let mut band = Carving::new(&image, CostTableStrategy::IncrementalBand).unwrap();
        let mut full = Carving::new(&image, CostTableStrategy::FullRebuild).unwrap();
        while band.width() > 1 {
            let seam = band.next_seam();
            assert_eq!(seam, full.next_seam());
            band.remove_seam(&seam).unwrap();
            full.remove_seam(&seam).unwrap();
            assert_same_tables(&band, &full);
        }
    }

    #[test]
    fn removing_the_last_column_is_rejected() {
        for strategy in [CostTableStrategy::IncrementalBand, CostTableStrategy::FullRebuild] {
            let image = GrayImage::from_raw(1, 3, vec![10, 20, 30]).unwrap();
            let mut carving = Carving::new(&image, strategy).unwrap();
            let seam = carving.next_seam();
            assert_eq!(seam.columns(), &[0, 0, 0]);
            assert_eq!(
                carving.remove_seam(&seam),
                Err(CarveError::InvalidSeamCount { seams: 1, width: 1 })
            );
            assert_eq!(carving.width(), 1);
            assert_eq!(carving.cost().width(), 1);
            assert_eq!(carving.into_image(), image);
        }
    }

    #[test]
    fn zero_seams_is_a_copy() {
        let image = sample();
        assert_eq!(remove_vertical_seams(&image, 0).unwrap(), image);
    }
}
