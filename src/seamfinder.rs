// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tracing the cheapest seam out of a cost table.

use crate::cost::CostTable;
use std::ops::Deref;

/// One column index per row, top to bottom.  Adjacent rows never differ
/// by more than one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    /// True if every step between rows moves at most one column.
    pub fn is_connected(&self) -> bool {
        self.0.windows(2).all(|w| w[0].abs_diff(w[1]) <= 1)
    }
}

impl Deref for Seam {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

/// This trait defines how we will get seams out of whatever holds the
/// carve's state.  It's a primitive interface, just enough to make
/// room for more than one way of keeping costs.
pub trait SeamFinder {
    /// Request the cheapest top-to-bottom seam.
    fn find_vertical_seam(&self) -> Seam;
}

impl SeamFinder for CostTable {
    fn find_vertical_seam(&self) -> Seam {
        trace_minimal_seam(self)
    }
}

/// Find the globally cheapest seam.
///
/// The bottom row's minimum starts the seam, leftmost on a tie.  Each
/// step up prefers straight up, then up-left, then up-right: a
/// candidate only displaces the current best if it is strictly
/// cheaper.
pub fn trace_minimal_seam(cost: &CostTable) -> Seam {
    let (width, height) = (cost.width(), cost.height());
    let bottom = height - 1;

    let mut seam_col = 0;
    let mut least = cost[(0, bottom)];
    for x in 1..width {
        if cost[(x, bottom)] < least {
            least = cost[(x, bottom)];
            seam_col = x;
        }
    }

    let mut columns = vec![0; height as usize];
    columns[bottom as usize] = seam_col;

    for y in (0..bottom).rev() {
        let straight = seam_col;
        let mut least = cost[(straight, y)];
        if straight > 0 && cost[(straight - 1, y)] < least {
            least = cost[(straight - 1, y)];
            seam_col = straight - 1;
        }
        if straight + 1 < width && cost[(straight + 1, y)] < least {
            seam_col = straight + 1;
        }
        columns[y as usize] = seam_col;
    }

    Seam(columns)
}
