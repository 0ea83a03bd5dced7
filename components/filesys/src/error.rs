use core::fmt;

/// Portable failure kinds shared by both backends.
///
/// `Ok(..)` is the success outcome; every native failure translates into
/// exactly one of these variants. Permission, write-protection and lock
/// conditions have no kind of their own and are reported as `Invalid`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i8)]
pub enum Error {
    Io = -1,
    Corrupt = -2,
    NotFound = -3,
    Exists = -4,
    NotADirectory = -5,
    IsADirectory = -6,
    NotEmpty = -7,
    BadHandle = -8,
    TooLarge = -9,
    NoSpace = -10,
    NoMemory = -11,
    Invalid = -12,
    NotMounted = -13,
    Unsupported = -14,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Stable negative code of this kind, `0` being reserved for success.
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Inverse of [`Error::code`]; `None` for `0` and unknown codes.
    pub const fn from_code(code: i8) -> Option<Self> {
        Some(match code {
            -1 => Self::Io,
            -2 => Self::Corrupt,
            -3 => Self::NotFound,
            -4 => Self::Exists,
            -5 => Self::NotADirectory,
            -6 => Self::IsADirectory,
            -7 => Self::NotEmpty,
            -8 => Self::BadHandle,
            -9 => Self::TooLarge,
            -10 => Self::NoSpace,
            -11 => Self::NoMemory,
            -12 => Self::Invalid,
            -13 => Self::NotMounted,
            -14 => Self::Unsupported,
            _ => return None,
        })
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Io => "input/output error",
            Self::Corrupt => "corrupted filesystem",
            Self::NotFound => "no such entry",
            Self::Exists => "entry already exists",
            Self::NotADirectory => "not a directory",
            Self::IsADirectory => "is a directory",
            Self::NotEmpty => "directory not empty",
            Self::BadHandle => "bad handle",
            Self::TooLarge => "file too large",
            Self::NoSpace => "no space left",
            Self::NoMemory => "out of memory or handles",
            Self::Invalid => "invalid argument",
            Self::NotMounted => "filesystem not mounted",
            Self::Unsupported => "operation not supported",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
