// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors for the carver.  All of them are precondition failures,
//! reported before any pixel is touched.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarveError {
    /// The image has no pixels along one of its axes.
    #[error("degenerate image {width}x{height}: both dimensions must be at least 1")]
    DegenerateImage { width: u32, height: u32 },

    /// Asked to remove as many seams as there are columns, or more.
    #[error("invalid seam count {seams}: must be less than the image width {width}")]
    InvalidSeamCount { seams: u32, width: u32 },

    /// A cost table strategy name that isn't one we know.
    #[error("unknown cost table strategy {0:?}: expected \"full\" or \"incremental\"")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, CarveError>;
