//! Native API of the FatFs-style block filesystem.

use heapless::String;

/// Longest entry name the native library reports.
pub const FAT_NAME_MAX: usize = 255;

/// Non-OK `FRESULT` codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum FatError {
    DiskErr = 1,
    IntErr = 2,
    NotReady = 3,
    NoFile = 4,
    NoPath = 5,
    InvalidName = 6,
    Denied = 7,
    Exist = 8,
    InvalidObject = 9,
    WriteProtected = 10,
    InvalidDrive = 11,
    NotEnabled = 12,
    NoFilesystem = 13,
    MkfsAborted = 14,
    Timeout = 15,
    Locked = 16,
    NotEnoughCore = 17,
    TooManyOpenFiles = 18,
    InvalidParameter = 19,
}

impl FatError {
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::DiskErr,
            2 => Self::IntErr,
            3 => Self::NotReady,
            4 => Self::NoFile,
            5 => Self::NoPath,
            6 => Self::InvalidName,
            7 => Self::Denied,
            8 => Self::Exist,
            9 => Self::InvalidObject,
            10 => Self::WriteProtected,
            11 => Self::InvalidDrive,
            12 => Self::NotEnabled,
            13 => Self::NoFilesystem,
            14 => Self::MkfsAborted,
            15 => Self::Timeout,
            16 => Self::Locked,
            17 => Self::NotEnoughCore,
            18 => Self::TooManyOpenFiles,
            19 => Self::InvalidParameter,
            _ => return None,
        })
    }
}

pub type FatResult<T> = core::result::Result<T, FatError>;

bitflags::bitflags! {
    /// `f_open` mode byte.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct FatMode: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const CREATE_NEW = 0x04;
        const CREATE_ALWAYS = 0x08;
        const OPEN_ALWAYS = 0x10;
        /// `OPEN_ALWAYS` plus a seek to the end.
        const OPEN_APPEND = 0x30;
    }
}

impl FatMode {
    pub const OPEN_EXISTING: Self = Self::empty();
}

bitflags::bitflags! {
    /// Entry attribute byte.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct FatAttr: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN = 0x02;
        const SYSTEM = 0x04;
        const DIRECTORY = 0x10;
        const ARCHIVE = 0x20;
    }
}

/// Native entry info (`FILINFO`). An empty `fname` from `readdir` marks the
/// end of the directory.
#[derive(Clone, Debug, Default)]
pub struct FatInfo {
    pub fsize: u32,
    pub fdate: u16,
    pub ftime: u16,
    pub fattrib: FatAttr,
    pub fname: String<FAT_NAME_MAX>,
}

impl FatInfo {
    pub fn is_dir(&self) -> bool {
        self.fattrib.contains(FatAttr::DIRECTORY)
    }
}

/// Result of `f_getfree`: free clusters plus the volume geometry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FreeClusters {
    pub free: u32,
    /// Sectors per cluster.
    pub csize: u32,
    /// FAT entries, two more than the number of data clusters.
    pub n_fatent: u32,
}

/// The native volume work area (`FATFS`) and its operations.
///
/// `File` and `Dir` are the native `FIL` and `DIR` objects; `Default` gives
/// the zeroed state.
pub trait FatBackend {
    type File: Default;
    type Dir: Default;

    /// `f_mount(fs, drive, force)`.
    fn mount(&mut self, drive: &str, force: bool) -> FatResult<()>;
    /// `f_mount(NULL, drive, 0)`.
    fn unmount(&mut self, drive: &str) -> FatResult<()>;

    fn open(&mut self, file: &mut Self::File, path: &str, mode: FatMode) -> FatResult<()>;
    fn close(&mut self, file: &mut Self::File) -> FatResult<()>;
    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> FatResult<usize>;
    fn write(&mut self, file: &mut Self::File, data: &[u8]) -> FatResult<usize>;
    /// Moves the file pointer to an absolute offset.
    fn lseek(&mut self, file: &mut Self::File, offset: u32) -> FatResult<()>;
    fn tell(&self, file: &Self::File) -> u32;
    fn size(&self, file: &Self::File) -> u32;
    fn sync(&mut self, file: &mut Self::File) -> FatResult<()>;
    /// Cuts the file at the current file pointer.
    fn truncate(&mut self, file: &mut Self::File) -> FatResult<()>;

    /// Removes a file or an empty directory.
    fn unlink(&mut self, path: &str) -> FatResult<()>;
    fn rename(&mut self, from: &str, to: &str) -> FatResult<()>;
    fn stat(&mut self, path: &str) -> FatResult<FatInfo>;
    fn mkdir(&mut self, path: &str) -> FatResult<()>;

    fn opendir(&mut self, dir: &mut Self::Dir, path: &str) -> FatResult<()>;
    fn closedir(&mut self, dir: &mut Self::Dir) -> FatResult<()>;
    fn readdir(&mut self, dir: &mut Self::Dir) -> FatResult<FatInfo>;
    fn rewinddir(&mut self, dir: &mut Self::Dir) -> FatResult<()>;

    fn getfree(&mut self, drive: &str) -> FatResult<FreeClusters>;
}
