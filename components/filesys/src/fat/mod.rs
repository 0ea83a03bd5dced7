//! Adapter for the FatFs-style block filesystem.

mod backend;
mod convert;

use heapless::String;

use crate::{
    DirHandle, Error, FileHandle, FileInfo, FsId, LfsBackend, Mount, OpenMode, Result, SeekFrom,
    DEFAULT_DRIVE, DRIVE_PATH_CAPACITY, FAT_SECTOR_SIZE,
};

pub use backend::{
    FatAttr, FatBackend, FatError, FatInfo, FatMode, FatResult, FreeClusters, FAT_NAME_MAX,
};
pub use convert::{
    error as translate_error, open_mode as translate_mode, result as translate_result,
    seek_target,
};

fn drive_path(drive: Option<&str>) -> String<DRIVE_PATH_CAPACITY> {
    let drive = match drive {
        Some(drive) if drive.len() < DRIVE_PATH_CAPACITY => drive,
        _ => {
            debug!("using default drive {}", DEFAULT_DRIVE);
            DEFAULT_DRIVE
        }
    };
    let mut path = String::new();
    // both candidates fit
    path.push_str(drive).ok();
    path
}

/// FAT timestamp as reported in [`FileInfo::modified`].
fn packed_time(info: &FatInfo) -> u32 {
    (u32::from(info.fdate) << 16) | u32::from(info.ftime)
}

/// Full capability set on top of one [`FatBackend`].
///
/// The FAT volume is always mounted immediately and never reformatted.
pub struct FatFs<B: FatBackend> {
    fat: B,
    drive: String<DRIVE_PATH_CAPACITY>,
    id: FsId,
    mounted: bool,
}

impl<B: FatBackend> FatFs<B> {
    /// Drive identifiers that are missing or too long for
    /// [`DRIVE_PATH_CAPACITY`] fall back to [`DEFAULT_DRIVE`].
    pub fn new(fat: B, drive: Option<&str>) -> Self {
        Self {
            fat,
            drive: drive_path(drive),
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

    pub fn drive(&self) -> &str {
        &self.drive
    }

    fn ready(&self) -> Result<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(Error::NotMounted)
        }
    }

    fn file<'h, L: LfsBackend>(
        &self,
        handle: &'h mut FileHandle<L, B>,
    ) -> Result<&'h mut B::File> {
        let file = handle.slot.fatfs(self.id)?;
        self.ready()?;
        Ok(file)
    }

    fn dir<'h, L: LfsBackend>(&self, handle: &'h mut DirHandle<L, B>) -> Result<&'h mut B::Dir> {
        let dir = handle.slot.fatfs(self.id)?;
        self.ready()?;
        Ok(dir)
    }

    pub fn mount(&mut self) -> Result<Mount> {
        if self.mounted {
            return Ok(Mount::Clean);
        }
        if let Err(native) = self.fat.mount(&self.drive, true) {
            let error = convert::error(native);
            error_now!("fat mount of {} failed: {:?}", self.drive.as_str(), error);
            return Err(error);
        }
        info_now!("fat mounted {}", self.drive.as_str());
        self.mounted = true;
        Ok(Mount::Clean)
    }

    pub fn unmount(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;
        self.fat.unmount(&self.drive).map_err(convert::error)
    }

    pub fn open<L: LfsBackend>(
        &mut self,
        handle: &mut FileHandle<L, B>,
        path: &str,
        mode: OpenMode,
    ) -> Result<()> {
        self.ready()?;
        let native_mode = convert::open_mode(mode);
        let fat = &mut self.fat;
        handle.slot.open_fatfs(self.id, |file| {
            fat.open(file, path, native_mode).map_err(convert::error)
        })
    }

    pub fn close<L: LfsBackend>(&mut self, handle: &mut FileHandle<L, B>) -> Result<()> {
        let mounted = self.mounted;
        let fat = &mut self.fat;
        handle.slot.close_fatfs(self.id, |file| {
            if !mounted {
                return Err(Error::NotMounted);
            }
            fat.close(file).map_err(convert::error)
        })
    }

    pub fn read<L: LfsBackend>(
        &mut self,
        handle: &mut FileHandle<L, B>,
        buf: &mut [u8],
    ) -> Result<usize> {
        let file = self.file(handle)?;
        self.fat.read(file, buf).map_err(convert::error)
    }

    pub fn write<L: LfsBackend>(
        &mut self,
        handle: &mut FileHandle<L, B>,
        data: &[u8],
    ) -> Result<usize> {
        let file = self.file(handle)?;
        self.fat.write(file, data).map_err(convert::error)
    }

    /// FatFs only seeks to absolute offsets. Relative targets are resolved
    /// against the current pointer or the file size and clamp at zero.
    pub fn seek<L: LfsBackend>(
        &mut self,
        handle: &mut FileHandle<L, B>,
        pos: SeekFrom,
    ) -> Result<()> {
        let file = self.file(handle)?;
        let target = convert::seek_target(pos, self.fat.tell(file), self.fat.size(file));
        self.fat.lseek(file, target).map_err(convert::error)
    }

    pub fn tell<L: LfsBackend>(&mut self, handle: &mut FileHandle<L, B>) -> Result<u32> {
        let file = self.file(handle)?;
        Ok(self.fat.tell(file))
    }

    pub fn sync<L: LfsBackend>(&mut self, handle: &mut FileHandle<L, B>) -> Result<()> {
        let file = self.file(handle)?;
        self.fat.sync(file).map_err(convert::error)
    }

    /// Cuts or extends the file to `size` bytes.
    ///
    /// The file pointer is restored afterwards if it still lies within the
    /// file, otherwise it stays at `size`.
    pub fn truncate<L: LfsBackend>(
        &mut self,
        handle: &mut FileHandle<L, B>,
        size: u32,
    ) -> Result<()> {
        let file = self.file(handle)?;
        let position = self.fat.tell(file);
        self.fat.lseek(file, size).map_err(convert::error)?;

        if let Err(native) = self.fat.truncate(file) {
            if self.fat.lseek(file, position).is_err() {
                warn!("fat truncate left the file pointer at {}", size);
            }
            return Err(convert::error(native));
        }

        if position <= size {
            self.fat.lseek(file, position).map_err(convert::error)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.fat.unlink(path).map_err(convert::error)
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        self.ready()?;
        self.fat.rename(from, to).map_err(convert::error)
    }

    /// Entry info named after the last path component, not the native
    /// (possibly 8.3) name.
    pub fn stat(&mut self, path: &str) -> Result<FileInfo> {
        self.ready()?;
        let info = self.fat.stat(path).map_err(convert::error)?;
        let name = path.rsplit('/').next().unwrap_or(path);
        Ok(FileInfo::new(
            name,
            info.fsize,
            info.is_dir(),
            packed_time(&info),
        ))
    }

    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.fat.mkdir(path).map_err(convert::error)
    }

    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        self.ready()?;
        self.fat.unlink(path).map_err(convert::error)
    }

    pub fn opendir<L: LfsBackend>(
        &mut self,
        handle: &mut DirHandle<L, B>,
        path: &str,
    ) -> Result<()> {
        self.ready()?;
        let fat = &mut self.fat;
        handle
            .slot
            .open_fatfs(self.id, |dir| fat.opendir(dir, path).map_err(convert::error))
    }

    pub fn closedir<L: LfsBackend>(&mut self, handle: &mut DirHandle<L, B>) -> Result<()> {
        let mounted = self.mounted;
        let fat = &mut self.fat;
        handle.slot.close_fatfs(self.id, |dir| {
            if !mounted {
                return Err(Error::NotMounted);
            }
            fat.closedir(dir).map_err(convert::error)
        })
    }

    /// Next entry, `None` at the end. FatFs does not list `.` or `..`.
    pub fn readdir<L: LfsBackend>(
        &mut self,
        handle: &mut DirHandle<L, B>,
    ) -> Result<Option<FileInfo>> {
        let dir = self.dir(handle)?;
        let info = self.fat.readdir(dir).map_err(convert::error)?;
        if info.fname.is_empty() {
            return Ok(None);
        }
        Ok(Some(FileInfo::new(
            &info.fname,
            info.fsize,
            info.is_dir(),
            packed_time(&info),
        )))
    }

    pub fn rewinddir<L: LfsBackend>(&mut self, handle: &mut DirHandle<L, B>) -> Result<()> {
        let dir = self.dir(handle)?;
        self.fat.rewinddir(dir).map_err(convert::error)
    }

    fn clusters(&mut self) -> Result<FreeClusters> {
        self.ready()?;
        self.fat.getfree(&self.drive).map_err(convert::error)
    }

    /// Free clusters times cluster size.
    pub fn free_space(&mut self) -> Result<u64> {
        let clusters = self.clusters()?;
        Ok(u64::from(clusters.free) * u64::from(clusters.csize) * FAT_SECTOR_SIZE)
    }

    /// Data clusters times cluster size.
    pub fn total_space(&mut self) -> Result<u64> {
        let clusters = self.clusters()?;
        let data_clusters = clusters.n_fatent.saturating_sub(2);
        Ok(u64::from(data_clusters) * u64::from(clusters.csize) * FAT_SECTOR_SIZE)
    }
}

impl<B: FatBackend> Drop for FatFs<B> {
    fn drop(&mut self) {
        if self.mounted {
            if let Err(_error) = self.unmount() {
                error!("fat unmount on drop failed: {:?}", _error);
            }
        }
    }
}
