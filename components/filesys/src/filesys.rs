use crate::{
    DirHandle, FatBackend, FatFs, FileHandle, FileInfo, FsId, LfsBackend, LittleFs, OpenMode,
    Result, SeekFrom,
};

/// Which backend a [`FileSys`] was built with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BackendKind {
    LittleFs,
    FatFs,
}

/// Successful mount outcome.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mount {
    /// The existing volume was mounted, or it already was.
    Clean,
    /// The volume was corrupt and has been formatted; prior content is gone.
    Formatted,
}

enum Backend<'c, L: LfsBackend, F: FatBackend> {
    LittleFs(LittleFs<'c, L>),
    FatFs(FatFs<F>),
}

macro_rules! dispatch {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match &mut $self.backend {
            Backend::LittleFs(fs) => fs.$method($($arg),*),
            Backend::FatFs(fs) => fs.$method($($arg),*),
        }
    };
}

/// Unified filesystem over either backend.
///
/// The backend is fixed by the constructor. Nothing is mounted until
/// [`FileSys::mount`] is called; dropping a mounted `FileSys` unmounts it.
///
/// Builds with only one backend fill the other type parameter with
/// [`NoBackend`](crate::NoBackend).
pub struct FileSys<'c, L: LfsBackend, F: FatBackend> {
    backend: Backend<'c, L, F>,
}

impl<'c, L: LfsBackend, F: FatBackend> FileSys<'c, L, F> {
    /// Flash log backend. `config` is borrowed, never validated; without
    /// one every operation fails with [`Error::Invalid`](crate::Error::Invalid).
    pub fn littlefs(lfs: L, config: Option<&'c L::Config>) -> Self {
        debug!("filesys: littlefs backend");
        Self {
            backend: Backend::LittleFs(LittleFs::new(lfs, config)),
        }
    }

    /// FAT backend on `drive`, or on [`DEFAULT_DRIVE`](crate::DEFAULT_DRIVE)
    /// if none or an oversized one is given.
    pub fn fatfs(fat: F, drive: Option<&str>) -> Self {
        debug!("filesys: fat backend");
        Self {
            backend: Backend::FatFs(FatFs::new(fat, drive)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self.backend {
            Backend::LittleFs(_) => BackendKind::LittleFs,
            Backend::FatFs(_) => BackendKind::FatFs,
        }
    }

    /// Identity stamped into handles opened through this instance.
    pub fn id(&self) -> FsId {
        match &self.backend {
            Backend::LittleFs(fs) => fs.id(),
            Backend::FatFs(fs) => fs.id(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        match &self.backend {
            Backend::LittleFs(fs) => fs.is_mounted(),
            Backend::FatFs(fs) => fs.is_mounted(),
        }
    }

    /// Mounts the volume; a no-op if already mounted.
    ///
    /// On the flash log backend a corrupt volume is formatted and mounted
    /// again, reported as [`Mount::Formatted`].
    pub fn mount(&mut self) -> Result<Mount> {
        dispatch!(self.mount())
    }

    /// Unmounts the volume; a no-op if not mounted.
    pub fn unmount(&mut self) -> Result<()> {
        dispatch!(self.unmount())
    }

    /// Opens `path` into `handle`, which must be closed.
    ///
    /// See [`OpenMode`] for how the intent differs between backends. On
    /// failure `handle` stays closed.
    pub fn open(
        &mut self,
        handle: &mut FileHandle<L, F>,
        path: &str,
        mode: OpenMode,
    ) -> Result<()> {
        dispatch!(self.open(handle, path, mode))
    }

    /// Closes `handle`. The handle is released even if the backend reports
    /// an error, which is still returned.
    pub fn close(&mut self, handle: &mut FileHandle<L, F>) -> Result<()> {
        dispatch!(self.close(handle))
    }

    /// Bytes actually read, `0` at end of file.
    pub fn read(&mut self, handle: &mut FileHandle<L, F>, buf: &mut [u8]) -> Result<usize> {
        dispatch!(self.read(handle, buf))
    }

    /// Bytes actually written; a short count is not an error.
    pub fn write(&mut self, handle: &mut FileHandle<L, F>, data: &[u8]) -> Result<usize> {
        dispatch!(self.write(handle, data))
    }

    pub fn seek(&mut self, handle: &mut FileHandle<L, F>, pos: SeekFrom) -> Result<()> {
        dispatch!(self.seek(handle, pos))
    }

    pub fn tell(&mut self, handle: &mut FileHandle<L, F>) -> Result<u32> {
        dispatch!(self.tell(handle))
    }

    pub fn sync(&mut self, handle: &mut FileHandle<L, F>) -> Result<()> {
        dispatch!(self.sync(handle))
    }

    pub fn truncate(&mut self, handle: &mut FileHandle<L, F>, size: u32) -> Result<()> {
        dispatch!(self.truncate(handle, size))
    }

    pub fn remove(&mut self, path: &str) -> Result<()> {
        dispatch!(self.remove(path))
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        dispatch!(self.rename(from, to))
    }

    pub fn stat(&mut self, path: &str) -> Result<FileInfo> {
        dispatch!(self.stat(path))
    }

    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        dispatch!(self.mkdir(path))
    }

    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        dispatch!(self.rmdir(path))
    }

    pub fn opendir(&mut self, handle: &mut DirHandle<L, F>, path: &str) -> Result<()> {
        dispatch!(self.opendir(handle, path))
    }

    pub fn closedir(&mut self, handle: &mut DirHandle<L, F>) -> Result<()> {
        dispatch!(self.closedir(handle))
    }

    /// Next directory entry, `None` once all entries have been listed.
    pub fn readdir(&mut self, handle: &mut DirHandle<L, F>) -> Result<Option<FileInfo>> {
        dispatch!(self.readdir(handle))
    }

    pub fn rewinddir(&mut self, handle: &mut DirHandle<L, F>) -> Result<()> {
        dispatch!(self.rewinddir(handle))
    }

    /// Free bytes on the volume.
    pub fn free_space(&mut self) -> Result<u64> {
        dispatch!(self.free_space())
    }

    /// Capacity of the volume in bytes.
    pub fn total_space(&mut self) -> Result<u64> {
        dispatch!(self.total_space())
    }
}
