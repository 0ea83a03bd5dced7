use littlefs2_core::{Error as LfsError, FileOpenFlags, SeekFrom as LfsSeekFrom};

use crate::{Error, OpenMode, SeekFrom};

const ERRORS: [(LfsError, Error); 12] = [
    (LfsError::IO, Error::Io),
    (LfsError::CORRUPTION, Error::Corrupt),
    (LfsError::NO_SUCH_ENTRY, Error::NotFound),
    (LfsError::ENTRY_ALREADY_EXISTED, Error::Exists),
    (LfsError::PATH_NOT_DIR, Error::NotADirectory),
    (LfsError::PATH_IS_DIR, Error::IsADirectory),
    (LfsError::DIR_NOT_EMPTY, Error::NotEmpty),
    (LfsError::BAD_FILE_DESCRIPTOR, Error::BadHandle),
    (LfsError::FILE_TOO_BIG, Error::TooLarge),
    (LfsError::NO_SPACE, Error::NoSpace),
    (LfsError::NO_MEMORY, Error::NoMemory),
    (LfsError::INVALID, Error::Invalid),
];

/// Portable kind of a native littlefs error; unmapped codes are `Io`.
pub fn error(native: LfsError) -> Error {
    ERRORS
        .iter()
        .find(|(code, _)| *code == native)
        .map_or(Error::Io, |&(_, portable)| portable)
}

/// Native open flags for `mode`.
///
/// `CREATE` never truncates here; only `TRUNC` does. `EXCL` is dropped
/// unless `CREATE` is present.
pub fn open_flags(mode: OpenMode) -> FileOpenFlags {
    let mut flags = FileOpenFlags::empty();
    match (mode.contains(OpenMode::READ), mode.contains(OpenMode::WRITE)) {
        (true, true) => flags |= FileOpenFlags::READWRITE,
        (true, false) => flags |= FileOpenFlags::READ,
        (false, true) => flags |= FileOpenFlags::WRITE,
        (false, false) => {}
    }
    if mode.contains(OpenMode::CREATE) {
        flags |= FileOpenFlags::CREATE;
        if mode.contains(OpenMode::EXCL) {
            flags |= FileOpenFlags::EXCL;
        }
    }
    if mode.contains(OpenMode::TRUNC) {
        flags |= FileOpenFlags::TRUNCATE;
    }
    if mode.contains(OpenMode::APPEND) {
        flags |= FileOpenFlags::APPEND;
    }
    flags
}

pub fn seek(pos: SeekFrom) -> LfsSeekFrom {
    match pos {
        SeekFrom::Start(offset) => LfsSeekFrom::Start(offset),
        SeekFrom::Current(offset) => LfsSeekFrom::Current(offset),
        SeekFrom::End(offset) => LfsSeekFrom::End(offset),
    }
}
