use super::backend::{FatError, FatMode};
use crate::{Error, OpenMode, Result, SeekFrom};

/// Portable kind of a native FatFs error.
pub fn error(native: FatError) -> Error {
    match native {
        FatError::DiskErr
        | FatError::NotReady
        | FatError::MkfsAborted
        | FatError::Timeout => Error::Io,
        FatError::IntErr | FatError::NoFilesystem => Error::Corrupt,
        FatError::NoFile | FatError::NoPath => Error::NotFound,
        FatError::Exist => Error::Exists,
        FatError::InvalidObject => Error::BadHandle,
        FatError::InvalidName
        | FatError::Denied
        | FatError::WriteProtected
        | FatError::Locked
        | FatError::InvalidParameter => Error::Invalid,
        FatError::InvalidDrive | FatError::NotEnabled => Error::NotMounted,
        FatError::NotEnoughCore | FatError::TooManyOpenFiles => Error::NoMemory,
    }
}

/// Translates a raw `FRESULT`; unknown codes are `Io`.
pub fn result(code: u8) -> Result<()> {
    if code == 0 {
        return Ok(());
    }
    Err(FatError::from_code(code).map_or(Error::Io, error))
}

/// Native open mode for `mode`.
///
/// `CREATE` without `EXCL` becomes `CREATE_ALWAYS`, which truncates an
/// existing file. `TRUNC` has no native counterpart and is ignored. With
/// neither `READ` nor `WRITE` the mode carries no access bits.
pub fn open_mode(mode: OpenMode) -> FatMode {
    let mut native = FatMode::empty();
    if mode.contains(OpenMode::READ) {
        native |= FatMode::READ;
    }
    if mode.contains(OpenMode::WRITE) {
        native |= FatMode::WRITE;
    }

    if mode.contains(OpenMode::CREATE) {
        if mode.contains(OpenMode::EXCL) {
            native |= FatMode::CREATE_NEW;
        } else {
            native |= FatMode::CREATE_ALWAYS;
        }
    } else if mode.contains(OpenMode::WRITE) {
        native |= FatMode::OPEN_EXISTING;
    }

    if mode.contains(OpenMode::APPEND) {
        native |= FatMode::OPEN_APPEND;
    }
    native
}

/// Absolute target of a seek, from the current pointer and file size.
/// Targets before the start of the file clamp to zero.
pub fn seek_target(pos: SeekFrom, current: u32, size: u32) -> u32 {
    let relative = |base: u32, offset: i32| {
        if offset >= 0 {
            base.saturating_add(offset.unsigned_abs())
        } else {
            base.saturating_sub(offset.unsigned_abs())
        }
    };
    match pos {
        SeekFrom::Start(offset) => offset,
        SeekFrom::Current(offset) => relative(current, offset),
        SeekFrom::End(offset) => relative(size, offset),
    }
}
