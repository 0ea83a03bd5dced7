use littlefs2_core::{FileOpenFlags, SeekFrom};

use crate::fat::{FatBackend, FatInfo, FatMode, FatResult, FreeClusters};
use crate::lfs::{LfsBackend, LfsConfig, LfsInfo, LfsResult};

/// Placeholder for the backend a build does not use, e.g.
/// `FileSys<'_, MyFlash, NoBackend>`. It cannot be constructed.
#[derive(Debug)]
pub enum NoBackend {}

impl LfsConfig for NoBackend {
    fn block_size(&self) -> u32 {
        match *self {}
    }

    fn block_count(&self) -> u32 {
        match *self {}
    }
}

impl LfsBackend for NoBackend {
    type Config = NoBackend;
    type File = ();
    type Dir = ();

    fn format(&mut self, _: &NoBackend) -> LfsResult<()> {
        match *self {}
    }

    fn mount(&mut self, _: &NoBackend) -> LfsResult<()> {
        match *self {}
    }

    fn unmount(&mut self) -> LfsResult<()> {
        match *self {}
    }

    fn file_open(&mut self, _: &mut (), _: &str, _: FileOpenFlags) -> LfsResult<()> {
        match *self {}
    }

    fn file_close(&mut self, _: &mut ()) -> LfsResult<()> {
        match *self {}
    }

    fn file_read(&mut self, _: &mut (), _: &mut [u8]) -> LfsResult<usize> {
        match *self {}
    }

    fn file_write(&mut self, _: &mut (), _: &[u8]) -> LfsResult<usize> {
        match *self {}
    }

    fn file_seek(&mut self, _: &mut (), _: SeekFrom) -> LfsResult<u32> {
        match *self {}
    }

    fn file_tell(&mut self, _: &mut ()) -> LfsResult<u32> {
        match *self {}
    }

    fn file_sync(&mut self, _: &mut ()) -> LfsResult<()> {
        match *self {}
    }

    fn file_truncate(&mut self, _: &mut (), _: u32) -> LfsResult<()> {
        match *self {}
    }

    fn remove(&mut self, _: &str) -> LfsResult<()> {
        match *self {}
    }

    fn rename(&mut self, _: &str, _: &str) -> LfsResult<()> {
        match *self {}
    }

    fn stat(&mut self, _: &str) -> LfsResult<LfsInfo> {
        match *self {}
    }

    fn mkdir(&mut self, _: &str) -> LfsResult<()> {
        match *self {}
    }

    fn dir_open(&mut self, _: &mut (), _: &str) -> LfsResult<()> {
        match *self {}
    }

    fn dir_close(&mut self, _: &mut ()) -> LfsResult<()> {
        match *self {}
    }

    fn dir_read(&mut self, _: &mut ()) -> LfsResult<Option<LfsInfo>> {
        match *self {}
    }

    fn dir_rewind(&mut self, _: &mut ()) -> LfsResult<()> {
        match *self {}
    }

    fn fs_size(&mut self) -> LfsResult<u32> {
        match *self {}
    }
}

impl FatBackend for NoBackend {
    type File = ();
    type Dir = ();

    fn mount(&mut self, _: &str, _: bool) -> FatResult<()> {
        match *self {}
    }

    fn unmount(&mut self, _: &str) -> FatResult<()> {
        match *self {}
    }

    fn open(&mut self, _: &mut (), _: &str, _: FatMode) -> FatResult<()> {
        match *self {}
    }

    fn close(&mut self, _: &mut ()) -> FatResult<()> {
        match *self {}
    }

    fn read(&mut self, _: &mut (), _: &mut [u8]) -> FatResult<usize> {
        match *self {}
    }

    fn write(&mut self, _: &mut (), _: &[u8]) -> FatResult<usize> {
        match *self {}
    }

    fn lseek(&mut self, _: &mut (), _: u32) -> FatResult<()> {
        match *self {}
    }

    fn tell(&self, _: &()) -> u32 {
        match *self {}
    }

    fn size(&self, _: &()) -> u32 {
        match *self {}
    }

    fn sync(&mut self, _: &mut ()) -> FatResult<()> {
        match *self {}
    }

    fn truncate(&mut self, _: &mut ()) -> FatResult<()> {
        match *self {}
    }

    fn unlink(&mut self, _: &str) -> FatResult<()> {
        match *self {}
    }

    fn rename(&mut self, _: &str, _: &str) -> FatResult<()> {
        match *self {}
    }

    fn stat(&mut self, _: &str) -> FatResult<FatInfo> {
        match *self {}
    }

    fn mkdir(&mut self, _: &str) -> FatResult<()> {
        match *self {}
    }

    fn opendir(&mut self, _: &mut (), _: &str) -> FatResult<()> {
        match *self {}
    }

    fn closedir(&mut self, _: &mut ()) -> FatResult<()> {
        match *self {}
    }

    fn readdir(&mut self, _: &mut ()) -> FatResult<FatInfo> {
        match *self {}
    }

    fn rewinddir(&mut self, _: &mut ()) -> FatResult<()> {
        match *self {}
    }

    fn getfree(&mut self, _: &str) -> FatResult<FreeClusters> {
        match *self {}
    }
}
