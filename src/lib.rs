//! Content-aware image narrowing.
//!
//! Repeatedly finds the vertical seam of pixels carrying the least
//! energy and removes it, keeping the energy field and cumulative cost
//! table current between removals rather than recomputing them.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = image::open("photo.png")?.to_rgba8();
//! let narrower = pnmseam::remove_vertical_seams(&image, 64)?;
//! narrower.save("narrower.png")?;
//! # Ok(())
//! # }
//! ```

pub mod cost;
pub use cost::{CostTable, CostTableStrategy};

pub mod energy;
pub use energy::{luminance, pixel_energy, EnergyField};

pub mod error;
pub use error::{CarveError, Result};

pub mod seamcarver;
pub use seamcarver::{remove_vertical_seams, Carving, SeamCarver};

pub mod seamfinder;
pub use seamfinder::{trace_minimal_seam, Seam, SeamFinder};

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;
