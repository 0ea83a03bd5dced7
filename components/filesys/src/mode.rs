bitflags::bitflags! {
    /// Portable open intent, translated per backend on every open.
    ///
    /// Bits combine freely. With `CREATE | EXCL` the open fails with
    /// [`Error::Exists`](crate::Error::Exists) if the path is taken; `WRITE`
    /// without `CREATE` on a missing path fails with
    /// [`Error::NotFound`](crate::Error::NotFound). Both checks are left to the
    /// backend.
    ///
    /// An intent with neither `READ` nor `WRITE` is passed on without access
    /// bits; what happens next is up to the backend. The FAT backend opens
    /// the file and then refuses reads and writes.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct OpenMode: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const CREATE = 0x04;
        const EXCL = 0x08;
        /// Honoured by the flash log backend only.
        const TRUNC = 0x10;
        const APPEND = 0x20;

        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Origin and offset of a seek.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SeekFrom {
    Start(u32),
    Current(i32),
    End(i32),
}
