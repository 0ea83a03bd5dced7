//! Adapter for the littlefs-style flash log filesystem.

mod backend;
mod convert;

use littlefs2_core::Error as LfsError;

use crate::{
    DirHandle, Error, FatBackend, FileHandle, FileInfo, FsId, Mount, OpenMode, Result, SeekFrom,
};

pub use backend::{LfsBackend, LfsConfig, LfsInfo, LfsResult, LFS_NAME_MAX};
pub use convert::{error as translate_error, open_flags as translate_mode};

/// Full capability set on top of one [`LfsBackend`].
///
/// The configuration is borrowed from the caller and never inspected beyond
/// its geometry. Without one, every operation fails with
/// [`Error::Invalid`].
pub struct LittleFs<'c, B: LfsBackend> {
    lfs: B,
    config: Option<&'c B::Config>,
    id: FsId,
    mounted: bool,
}

impl<'c, B: LfsBackend> LittleFs<'c, B> {
    pub fn new(lfs: B, config: Option<&'c B::Config>) -> Self {
        Self {
            lfs,
            config,
            id: FsId::next(),
            mounted: false,
        }
    }

    pub fn id(&self) -> FsId {
        self.id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn config(&self) -> Result<&'c B::Config> {
        self.config.ok_or(Error::Invalid)
    }

    fn ready(&self) -> Result<()> {
        self.config()?;
        if self.mounted {
            Ok(())
        } else {
            Err(Error::NotMounted)
        }
    }

    fn file<'h, F: FatBackend>(
        &self,
        handle: &'h mut FileHandle<B, F>,
    ) -> Result<&'h mut B::File> {
        self.config()?;
        let file = handle.slot.littlefs(self.id)?;
        self.ready()?;
        Ok(file)
    }

    fn dir<'h, F: FatBackend>(&self, handle: &'h mut DirHandle<B, F>) -> Result<&'h mut B::Dir> {
        self.config()?;
        let dir = handle.slot.littlefs(self.id)?;
        self.ready()?;
        Ok(dir)
    }

    /// Mounts the volume, formatting it once if the metadata is corrupt.
    ///
    /// Any other mount failure, and any failure of the format or of the
    /// second mount, is returned as is.
    pub fn mount(&mut self) -> Result<Mount> {
        let config = self.config()?;
        if self.mounted {
            return Ok(Mount::Clean);
        }

        let mount = match self.lfs.mount(config) {
            Ok(()) => Mount::Clean,
            Err(native) if native == LfsError::CORRUPTION => {
                warn_now!("littlefs corrupt, formatting");
                self.lfs.format(config).map_err(convert::error)?;
                self.lfs.mount(config).map_err(convert::error)?;
                Mount::Formatted
            }
            Err(native) => {
                let error = convert::error(native);
                error_now!("littlefs mount failed: {:?}", error);
                return Err(error);
            }
        };

        info_now!("littlefs mounted ({:?})", mount);
        self.mounted = true;
        Ok(mount)
    }

    pub fn unmount(&mut self) -> Result<()> {
        self.config()?;
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;
        self.lfs.unmount().map_err(convert::error)
    }

    pub fn open<F: FatBackend>(
        &mut self,
        handle: &mut FileHandle<B, F>,
        path: &str,
        mode: OpenMode,
    ) -> Result<()> {
        self.ready()?;
        let flags = convert::open_flags(mode);
        let lfs = &mut self.lfs;
        handle.slot.open_littlefs(self.id, |file| {
            lfs.file_open(file, path, flags).map_err(convert::error)
        })
    }

    pub fn close<F: FatBackend>(&mut self, handle: &mut FileHandle<B, F>) -> Result<()> {
        self.config()?;
        let mounted = self.mounted;
        let lfs = &mut self.lfs;
        handle.slot.close_littlefs(self.id, |file| {
            if !mounted {
                return Err(Error::NotMounted);
            }
            lfs.file_close(file).map_err(convert::error)
        })
    }

    pub fn read<F: FatBackend>(
        &mut self,
        handle: &mut FileHandle<B, F>,
        buf: &mut [u8],
    ) -> Result<usize> {
        let file = self.file(handle)?;
        self.lfs.file_read(file, buf).map_err(convert::error)
    }

    pub fn write<F: FatBackend>(
        &mut self,
        handle: &mut FileHandle<B, F>,
        data: &[u8],
    ) -> Result<usize> {
        let file = self.file(handle)?;
        self.lfs.file_write(file, data).map_err(convert::error)
    }

    /// Native seek; all three origins are supported by littlefs itself.
    pub fn seek<F: FatBackend>(
        &mut self,
        handle: &mut FileHandle<B, F>,
        pos: SeekFrom,
    ) -> Result<()> {
        let file = self.file(handle)?;
        self.lfs
            .file_seek(file, convert::seek(pos))
            .map(drop)
            .map_err(convert::error)
    }

    pub fn tell<F: FatBackend>(&mut self, handle: &mut FileHandle<B, F>) -> Result<u32> {
        let file = self.file(handle)?;
        self.lfs.file_tell(file).map_err(convert::error)
    }

    pub fn sync<F: FatBackend>(&mut self, handle: &mut FileHandle<B, F>) -> Result<()> {
        let file = self.file(handle)?;
        self.lfs.file_sync(file).map_err(convert::error)
    }

    pub fn truncate<F: FatBackend>(
        &mut self,
        handle: &mut FileHandle<B, F>,
        size: u32,
    ) -> Result<()> {
        let file = self.file(handle)?;
        self.lfs.file_truncate(file, size).map_err(convert::error)
    }

    pub fn remove(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.lfs.remove(path).map_err(convert::error)
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        self.ready()?;
        self.lfs.rename(from, to).map_err(convert::error)
    }

    /// Entry info named after the last path component. littlefs keeps no
    /// timestamps, `modified` is always zero.
    pub fn stat(&mut self, path: &str) -> Result<FileInfo> {
        self.ready()?;
        let info = self.lfs.stat(path).map_err(convert::error)?;
        let name = path.rsplit('/').next().unwrap_or(path);
        Ok(FileInfo::new(name, info.size, info.is_dir(), 0))
    }

    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.lfs.mkdir(path).map_err(convert::error)
    }

    /// littlefs removes empty directories with its regular remove.
    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.lfs.remove(path).map_err(convert::error)
    }

    pub fn opendir<F: FatBackend>(
        &mut self,
        handle: &mut DirHandle<B, F>,
        path: &str,
    ) -> Result<()> {
        self.ready()?;
        let lfs = &mut self.lfs;
        handle
            .slot
            .open_littlefs(self.id, |dir| lfs.dir_open(dir, path).map_err(convert::error))
    }

    pub fn closedir<F: FatBackend>(&mut self, handle: &mut DirHandle<B, F>) -> Result<()> {
        self.config()?;
        let mounted = self.mounted;
        let lfs = &mut self.lfs;
        handle.slot.close_littlefs(self.id, |dir| {
            if !mounted {
                return Err(Error::NotMounted);
            }
            lfs.dir_close(dir).map_err(convert::error)
        })
    }

    /// Next entry, `None` at the end. littlefs lists `.` and `..` first.
    pub fn readdir<F: FatBackend>(
        &mut self,
        handle: &mut DirHandle<B, F>,
    ) -> Result<Option<FileInfo>> {
        let dir = self.dir(handle)?;
        let entry = self.lfs.dir_read(dir).map_err(convert::error)?;
        Ok(entry.map(|info| FileInfo::new(&info.name, info.size, info.is_dir(), 0)))
    }

    pub fn rewinddir<F: FatBackend>(&mut self, handle: &mut DirHandle<B, F>) -> Result<()> {
        let dir = self.dir(handle)?;
        self.lfs.dir_rewind(dir).map_err(convert::error)
    }

    /// Unused blocks times block size; zero if the backend reports more
    /// blocks in use than exist.
    pub fn free_space(&mut self) -> Result<u64> {
        let config = self.config()?;
        self.ready()?;
        let used = self.lfs.fs_size().map_err(convert::error)?;
        let free_blocks = config.block_count().saturating_sub(used);
        Ok(u64::from(free_blocks) * u64::from(config.block_size()))
    }

    pub fn total_space(&mut self) -> Result<u64> {
        let config = self.config()?;
        self.ready()?;
        Ok(u64::from(config.block_count()) * u64::from(config.block_size()))
    }
}

impl<'c, B: LfsBackend> Drop for LittleFs<'c, B> {
    fn drop(&mut self) {
        if self.mounted {
            if let Err(_error) = self.unmount() {
                error!("littlefs unmount on drop failed: {:?}", _error);
            }
        }
    }
}
