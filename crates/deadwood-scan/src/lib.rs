//! Project scanning for deadwood.
//!
//! Walks a [`FileSystem`](deadwood_fs::FileSystem) once, building the file
//! inventory and the reference graph together, then hands both to the
//! [`OrphanAnalyzer`](deadwood_core::OrphanAnalyzer).
//!
//! # Example
//!
//! ```no_run
//! use deadwood_core::ScanOptions;
//! use deadwood_fs::NativeFileSystem;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = NativeFileSystem::new(".")?;
//! let report = deadwood_scan::scan(&fs, &ScanOptions::default())?;
//! println!("Scanned {} files", report.statistics.total_files);
//! # Ok(())
//! # }
//! ```

pub mod inventory;
pub mod scanner;

pub use inventory::{inspect_file, FileInventory, InspectedFile};
pub use scanner::{scan, Scanner};
