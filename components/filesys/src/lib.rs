#![no_std]

//! One filesystem API over two structurally different backends.
//!
//! `FileSys` wraps either a littlefs-style flash log filesystem or a
//! FatFs-style block filesystem. The backend is picked once, by constructor,
//! and stored inline: the facade has the same size whichever backend is
//! active and never allocates.
//!
//! Both libraries are consumed at their native API boundary through the
//! [`LfsBackend`] and [`FatBackend`] traits. The adapters translate the
//! portable [`OpenMode`] and [`SeekFrom`] into native flags and native
//! results back into the portable [`Error`] taxonomy.
//!
//! # Handles
//! [`FileHandle`] and [`DirHandle`] are plain values owned by the caller.
//! A successful open stores the native object inside the handle and stamps
//! it with the [`FsId`] of the facade that opened it. Every later operation
//! checks that stamp first, so a handle that is closed, was never opened, or
//! belongs to another facade fails with [`Error::BadHandle`].
//!
//! Native file objects may hold references into the mounted filesystem, so
//! an open handle must not be moved until it is closed.
//!
//! # Open-mode divergence
//! `OpenMode::CREATE` without `OpenMode::EXCL` truncates an existing file on
//! the FAT backend but leaves it intact on the flash log backend, which only
//! truncates when `OpenMode::TRUNC` is also given. The FAT backend has no
//! open-time truncation at all. This mirrors the wrapped libraries.
//!
//! ```text
//! caller -> FileSys -> LittleFs<L> | FatFs<F> -> native library
//! ```

#[macro_use]
extern crate delog;
generate_macros!();

mod absent;
mod error;
pub mod fat;
mod filesys;
mod handle;
pub mod lfs;
mod mode;

pub use absent::NoBackend;
pub use error::{Error, Result};
pub use fat::{FatBackend, FatFs};
pub use filesys::{BackendKind, FileSys, Mount};
pub use handle::{DirHandle, FileHandle, FileInfo, FsId};
pub use lfs::{LfsBackend, LfsConfig, LittleFs};
pub use mode::{OpenMode, SeekFrom};

/// Longest path the backends are expected to accept. Paths are passed
/// through verbatim, this is not enforced.
pub const MAX_PATH_LENGTH: usize = 256;

/// Capacity of [`FileInfo::name`]; longer names are truncated.
pub const MAX_FILENAME_LENGTH: usize = 64;

/// FAT space accounting assumes this many bytes per sector.
pub const FAT_SECTOR_SIZE: u64 = 512;

/// Drive used when the FAT constructor gets no usable identifier.
pub const DEFAULT_DRIVE: &str = "0:";

/// Storage for the FAT drive identifier; identifiers must be shorter.
pub const DRIVE_PATH_CAPACITY: usize = 8;



#[cfg(test)]
#[macro_use]
extern crate std;
