//! Read-only filesystem abstraction for deadwood.
//!
//! This crate provides a synchronous [`FileSystem`] trait scoped to a project
//! root, with a native implementation backed by `std::fs` and the `ignore`
//! walker, and an in-memory implementation for tests and embedders.
//!
//! Nothing here writes to the project tree.
//!
//! # Example
//!
//! ```no_run
//! use deadwood_fs::{DiscoveryOptions, FileSystem, NativeFileSystem};
//!
//! # fn main() -> std::io::Result<()> {
//! let fs = NativeFileSystem::new(".")?;
//! let options = DiscoveryOptions {
//!     ignored_dirs: ["node_modules".to_string()].into(),
//!     ..Default::default()
//! };
//! for path in fs.walk_files(&options).flatten() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod file_system;
pub use file_system::{DiscoveryOptions, FileMetadata, FileSystem, FileWalk, WalkError};

pub mod memory;
pub use memory::MemoryFileSystem;

pub mod native;
pub use native::NativeFileSystem;
