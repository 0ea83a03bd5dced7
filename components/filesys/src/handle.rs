use core::fmt;
use core::num::NonZeroU32;
use core::sync::atomic::{AtomicU32, Ordering};

use heapless::String;

use crate::{Error, FatBackend, LfsBackend, Result, MAX_FILENAME_LENGTH};

/// Identity of one facade instance, stamped into every handle it opens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FsId(NonZeroU32);

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

#[cfg(target_has_atomic = "32")]
fn bump_id() -> u32 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Cores without compare-and-swap (thumbv6m) only have atomic load and store.
#[cfg(not(target_has_atomic = "32"))]
fn bump_id() -> u32 {
    critical_section::with(|_| {
        let id = NEXT_ID.load(Ordering::Relaxed);
        NEXT_ID.store(id.wrapping_add(1), Ordering::Relaxed);
        id
    })
}

impl FsId {
    pub(crate) fn next() -> Self {
        loop {
            // skips zero once the counter wraps
            if let Some(id) = NonZeroU32::new(bump_id()) {
                return Self(id);
            }
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Entry metadata produced by `stat` and `readdir`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileInfo {
    /// Entry name, truncated to [`MAX_FILENAME_LENGTH`] bytes.
    pub name: String<MAX_FILENAME_LENGTH>,
    pub size: u32,
    pub is_dir: bool,
    /// Backend specific: `0` on the flash log backend, the FAT date in the
    /// high and the FAT time in the low 16 bits on the FAT backend. This is
    /// not a Unix timestamp.
    pub modified: u32,
}

impl FileInfo {
    pub(crate) fn new(name: &str, size: u32, is_dir: bool, modified: u32) -> Self {
        let mut truncated = String::new();
        for c in name.chars() {
            if truncated.push(c).is_err() {
                break;
            }
        }
        Self {
            name: truncated,
            size,
            is_dir,
            modified,
        }
    }
}

/// Native object of whichever backend opened the handle.
enum Native<A, B> {
    Vacant,
    LittleFs(A),
    FatFs(B),
}

impl<A, B> Native<A, B> {
    fn littlefs(&mut self) -> Option<&mut A> {
        match self {
            Self::LittleFs(native) => Some(native),
            _ => None,
        }
    }

    fn fatfs(&mut self) -> Option<&mut B> {
        match self {
            Self::FatFs(native) => Some(native),
            _ => None,
        }
    }
}

/// Open/closed state, owner stamp and native object of one handle.
pub(crate) struct Slot<A, B> {
    owner: Option<FsId>,
    native: Native<A, B>,
}

type Project<A, B, T> = fn(&mut Native<A, B>) -> Option<&mut T>;

impl<A, B> Slot<A, B> {
    const fn new() -> Self {
        Self {
            owner: None,
            native: Native::Vacant,
        }
    }

    fn owner(&self) -> Option<FsId> {
        self.owner
    }

    fn open_with<T: Default>(
        &mut self,
        id: FsId,
        wrap: fn(T) -> Native<A, B>,
        project: Project<A, B, T>,
        open: impl FnOnce(&mut T) -> Result<()>,
    ) -> Result<()> {
        if self.owner.is_some() {
            debug!("open on a handle that is already open");
            return Err(Error::BadHandle);
        }
        self.native = wrap(T::default());
        let result = project(&mut self.native).map_or(Err(Error::BadHandle), open);
        match result {
            Ok(()) => self.owner = Some(id),
            Err(_) => self.native = Native::Vacant,
        }
        result
    }

    fn get_with<T>(&mut self, id: FsId, project: Project<A, B, T>) -> Result<&mut T> {
        if self.owner != Some(id) {
            debug!("handle owner {:?} does not match {:?}", self.owner, id);
            return Err(Error::BadHandle);
        }
        project(&mut self.native).ok_or(Error::BadHandle)
    }

    fn close_with<T>(
        &mut self,
        id: FsId,
        project: Project<A, B, T>,
        close: impl FnOnce(&mut T) -> Result<()>,
    ) -> Result<()> {
        let result = close(self.get_with(id, project)?);
        self.owner = None;
        self.native = Native::Vacant;
        result
    }

    pub(crate) fn open_littlefs(
        &mut self,
        id: FsId,
        open: impl FnOnce(&mut A) -> Result<()>,
    ) -> Result<()>
    where
        A: Default,
    {
        self.open_with(id, Native::LittleFs, Native::littlefs, open)
    }

    pub(crate) fn open_fatfs(
        &mut self,
        id: FsId,
        open: impl FnOnce(&mut B) -> Result<()>,
    ) -> Result<()>
    where
        B: Default,
    {
        self.open_with(id, Native::FatFs, Native::fatfs, open)
    }

    pub(crate) fn littlefs(&mut self, id: FsId) -> Result<&mut A> {
        self.get_with(id, Native::littlefs)
    }

    pub(crate) fn fatfs(&mut self, id: FsId) -> Result<&mut B> {
        self.get_with(id, Native::fatfs)
    }

    /// Runs `close` and releases the slot whatever it returns.
    pub(crate) fn close_littlefs(
        &mut self,
        id: FsId,
        close: impl FnOnce(&mut A) -> Result<()>,
    ) -> Result<()> {
        self.close_with(id, Native::littlefs, close)
    }

    /// Runs `close` and releases the slot whatever it returns.
    pub(crate) fn close_fatfs(
        &mut self,
        id: FsId,
        close: impl FnOnce(&mut B) -> Result<()>,
    ) -> Result<()> {
        self.close_with(id, Native::fatfs, close)
    }
}

/// Caller-owned open file, valid only with the facade that opened it.
pub struct FileHandle<L: LfsBackend, F: FatBackend> {
    pub(crate) slot: Slot<L::File, F::File>,
}

impl<L: LfsBackend, F: FatBackend> FileHandle<L, F> {
    pub const fn new() -> Self {
        Self { slot: Slot::new() }
    }

    pub fn is_open(&self) -> bool {
        self.slot.owner().is_some()
    }

    /// Facade that opened this handle, `None` while closed.
    pub fn owner(&self) -> Option<FsId> {
        self.slot.owner()
    }
}

impl<L: LfsBackend, F: FatBackend> Default for FileHandle<L, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LfsBackend, F: FatBackend> fmt::Debug for FileHandle<L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("owner", &self.owner())
            .finish()
    }
}

/// Caller-owned open directory, valid only with the facade that opened it.
pub struct DirHandle<L: LfsBackend, F: FatBackend> {
    pub(crate) slot: Slot<L::Dir, F::Dir>,
}

impl<L: LfsBackend, F: FatBackend> DirHandle<L, F> {
    pub const fn new() -> Self {
        Self { slot: Slot::new() }
    }

    pub fn is_open(&self) -> bool {
        self.slot.owner().is_some()
    }

    pub fn owner(&self) -> Option<FsId> {
        self.slot.owner()
    }
}

impl<L: LfsBackend, F: FatBackend> Default for DirHandle<L, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LfsBackend, F: FatBackend> fmt::Debug for DirHandle<L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirHandle")
            .field("owner", &self.owner())
            .finish()
    }
}
