//! Native API of the littlefs-style flash log filesystem.
//!
//! One method per native call. Errors, open flags and seek origins use the
//! littlefs vocabulary from `littlefs2-core`.

use heapless::String;
use littlefs2_core::{Error, FileOpenFlags, FileType, SeekFrom};

pub type LfsResult<T> = core::result::Result<T, Error>;

/// Longest entry name the native library reports.
pub const LFS_NAME_MAX: usize = 255;

/// Block geometry of the caller supplied configuration.
pub trait LfsConfig {
    fn block_size(&self) -> u32;
    fn block_count(&self) -> u32;
}

/// Native entry info (`lfs_info`).
pub struct LfsInfo {
    pub file_type: FileType,
    pub size: u32,
    pub name: String<LFS_NAME_MAX>,
}

impl LfsInfo {
    pub fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Dir)
    }
}

/// The native filesystem state (`lfs_t`) and its operations.
///
/// `File` and `Dir` are the native open-object states; `Default` must give
/// the zeroed, unopened state. Once opened they may be referenced by the
/// filesystem state and must stay in place until closed.
pub trait LfsBackend {
    type Config: LfsConfig + ?Sized;
    type File: Default;
    type Dir: Default;

    fn format(&mut self, config: &Self::Config) -> LfsResult<()>;
    fn mount(&mut self, config: &Self::Config) -> LfsResult<()>;
    fn unmount(&mut self) -> LfsResult<()>;

    fn file_open(&mut self, file: &mut Self::File, path: &str, flags: FileOpenFlags)
        -> LfsResult<()>;
    fn file_close(&mut self, file: &mut Self::File) -> LfsResult<()>;
    fn file_read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> LfsResult<usize>;
    fn file_write(&mut self, file: &mut Self::File, data: &[u8]) -> LfsResult<usize>;
    /// Returns the new position.
    fn file_seek(&mut self, file: &mut Self::File, pos: SeekFrom) -> LfsResult<u32>;
    fn file_tell(&mut self, file: &mut Self::File) -> LfsResult<u32>;
    fn file_sync(&mut self, file: &mut Self::File) -> LfsResult<()>;
    fn file_truncate(&mut self, file: &mut Self::File, size: u32) -> LfsResult<()>;

    /// Removes a file or an empty directory.
    fn remove(&mut self, path: &str) -> LfsResult<()>;
    fn rename(&mut self, from: &str, to: &str) -> LfsResult<()>;
    fn stat(&mut self, path: &str) -> LfsResult<LfsInfo>;
    fn mkdir(&mut self, path: &str) -> LfsResult<()>;

    fn dir_open(&mut self, dir: &mut Self::Dir, path: &str) -> LfsResult<()>;
    fn dir_close(&mut self, dir: &mut Self::Dir) -> LfsResult<()>;
    /// `None` once the directory is exhausted.
    fn dir_read(&mut self, dir: &mut Self::Dir) -> LfsResult<Option<LfsInfo>>;
    fn dir_rewind(&mut self, dir: &mut Self::Dir) -> LfsResult<()>;

    /// Number of blocks in use.
    fn fs_size(&mut self) -> LfsResult<u32>;
}

