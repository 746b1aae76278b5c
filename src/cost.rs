// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost table
//!
//! `cost[0][x] = energy[0][x]`, and every row below it adds the
//! cheapest of the (up to) three cells above:
//!
//! ```text
//!   cost[y][x] = energy[y][x] + min(cost[y-1][x-1], cost[y-1][x], cost[y-1][x+1])
//! ```
//!
//! After a seam has been removed the table can either be rebuilt from
//! scratch or patched.  Patching relies on the table having been shifted
//! along with the pixels: the only cells that can differ from their
//! shifted value are the ones whose energy was refreshed (the seam
//! column and its left neighbor) and everything downstream of them.
//! Downstream of row 0 widens by one column per row in each direction,
//! so row `i` needs recomputing only in
//! `[seam[0] - 1 - i, seam[0] + i]`.  Both strategies run the same
//! recurrence over the same inputs and so agree bit for bit.

use crate::energy::EnergyField;
use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// How the cost table is brought up to date after each removal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CostTableStrategy {
    /// Recompute every cell from the energy field.
    FullRebuild,
    /// Recompute only the band of cells the removal can reach.
    #[default]
    IncrementalBand,
}

impl CostTableStrategy {
    /// Bring `cost` in line with `energy` after `seam` has been removed
    /// from the pixels and the energy field has been patched.
    pub fn refresh(self, cost: &mut CostTable, energy: &EnergyField, seam: &[u32]) {
        cost.remove_seam(seam);
        match self {
            CostTableStrategy::FullRebuild => cost.rebuild(energy),
            CostTableStrategy::IncrementalBand => {
                if let Some(&top) = seam.first() {
                    cost.update_band(energy, top)
                }
            }
        }
    }
}

impl fmt::Display for CostTableStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostTableStrategy::FullRebuild => "full",
            CostTableStrategy::IncrementalBand => "incremental",
        })
    }
}

impl FromStr for CostTableStrategy {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(CostTableStrategy::FullRebuild),
            "incremental" => Ok(CostTableStrategy::IncrementalBand),
            other => Err(CarveError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Minimum cumulative energy from the top row down to each pixel.
#[derive(Debug, Clone)]
pub struct CostTable {
    map: TwoDimensionalMap<f32>,
}

impl CostTable {
    /// Build the whole table from an energy field.
    pub fn build(energy: &EnergyField) -> Self {
        let mut table = CostTable {
            map: TwoDimensionalMap::filled(energy.width(), energy.height(), 0.0),
        };
        table.rebuild(energy);
        table
    }

    #[cfg(test)]
    pub(crate) fn from_map(map: TwoDimensionalMap<f32>) -> Self {
        CostTable { map }
    }

    pub fn width(&self) -> u32 {
        self.map.width()
    }

    pub fn height(&self) -> u32 {
        self.map.height()
    }

    /// The live costs of row `y`.
    pub fn row(&self, y: u32) -> &[f32] {
        self.map.row(y)
    }

    /// Recompute every live cell, top to bottom.
    pub fn rebuild(&mut self, energy: &EnergyField) {
        debug_assert_eq!(self.width(), energy.width());
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.relax(energy, x, y);
            }
        }
    }

    /// Recompute the cone of cells below a removed seam whose top-row
    /// column was `top`.  The table must already have been shifted.
    pub fn update_band(&mut self, energy: &EnergyField, top: u32) {
        debug_assert_eq!(self.width(), energy.width());
        let Some(last) = self.width().checked_sub(1) else {
            return;
        };
        for y in 0..self.height() {
            let low = top.saturating_sub(y + 1);
            let high = top.saturating_add(y).min(last);
            for x in low..=high {
                self.relax(energy, x, y);
            }
        }
    }

    /// Recompute one cell from its energy and the row above.  The row
    /// above must already be current.
    pub fn relax(&mut self, energy: &EnergyField, x: u32, y: u32) {
        let erg = energy[(x, y)];
        if y == 0 {
            self.map[(x, 0)] = erg;
            return;
        }

        let above = y - 1;
        let mut least = self.map[(x, above)];
        if x > 0 && self.map[(x - 1, above)] < least {
            least = self.map[(x - 1, above)];
        }
        if x + 1 < self.width() && self.map[(x + 1, above)] < least {
            least = self.map[(x + 1, above)];
        }
        self.map[(x, y)] = erg + least;
    }

    pub(crate) fn remove_seam(&mut self, seam: &[u32]) {
        self.map.remove_seam(seam);
    }
}

impl Index<(u32, u32)> for CostTable {
    type Output = f32;

    fn index(&self, xy: (u32, u32)) -> &f32 {
        &self.map[xy]
    }
}
