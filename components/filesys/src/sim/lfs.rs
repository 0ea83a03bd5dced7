use std::cell::RefCell;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use littlefs2_core::{Error, FileOpenFlags, FileType, SeekFrom};

use super::{key, name, native_name, Node, Tree};
use crate::lfs::{LfsBackend, LfsConfig, LfsInfo, LfsResult};

pub struct SimConfig {
    pub block_size: u32,
    pub block_count: u32,
}

impl SimConfig {
    pub const fn new(block_count: u32) -> Self {
        Self {
            block_size: 512,
            block_count,
        }
    }
}

impl LfsConfig for SimConfig {
    fn block_size(&self) -> u32 {
        self.block_size
    }

    fn block_count(&self) -> u32 {
        self.block_count
    }
}

/// Flash contents and call counters, shared with the test body.
pub struct LfsDisk {
    pub tree: Tree,
    pub corrupt: bool,
    pub mounted: bool,
    /// Returned by the next mount instead of mounting.
    pub mount_error: Option<Error>,
    /// Returned by every file close, after closing.
    pub close_error: Option<Error>,
    /// Overrides the computed block usage.
    pub used_blocks: Option<u32>,
    /// Geometry of the last mount.
    pub block_size: u32,
    pub block_count: u32,
    pub mounts: u32,
    pub unmounts: u32,
    pub formats: u32,
}

#[derive(Clone)]
pub struct SimLfs(pub Rc<RefCell<LfsDisk>>);

impl SimLfs {
    /// A volume whose metadata does not parse.
    pub fn blank() -> Self {
        let sim = Self::formatted();
        sim.disk().corrupt = true;
        sim
    }

    pub fn formatted() -> Self {
        Self(Rc::new(RefCell::new(LfsDisk {
            tree: Tree::new(),
            corrupt: false,
            mounted: false,
            mount_error: None,
            close_error: None,
            used_blocks: None,
            block_size: 512,
            block_count: 0,
            mounts: 0,
            unmounts: 0,
            formats: 0,
        })))
    }

    pub fn disk(&self) -> std::cell::RefMut<'_, LfsDisk> {
        self.0.borrow_mut()
    }

    /// Superblock pair, a metadata pair per directory, data blocks per file.
    fn blocks_in_use(disk: &LfsDisk) -> u32 {
        let data: u32 = disk
            .tree
            .files()
            .map(|data| (data.len() as u32).div_ceil(disk.block_size))
            .sum();
        2 + 2 * disk.tree.dirs() as u32 + data
    }
}

#[derive(Default)]
pub struct SimFile {
    path: String,
    pos: u32,
    readable: bool,
    writable: bool,
    append: bool,
}

#[derive(Default)]
pub struct SimDir {
    path: String,
    index: usize,
}

fn info(key: &str, node: &Node) -> LfsInfo {
    let (file_type, size) = match node {
        Node::File(data) => (FileType::File, data.len() as u32),
        Node::Dir => (FileType::Dir, 0),
    };
    LfsInfo {
        file_type,
        size,
        name: native_name(name(key)),
    }
}

impl LfsBackend for SimLfs {
    type Config = SimConfig;
    type File = SimFile;
    type Dir = SimDir;

    fn format(&mut self, _config: &SimConfig) -> LfsResult<()> {
        let mut disk = self.disk();
        disk.tree.clear();
        disk.corrupt = false;
        disk.formats += 1;
        Ok(())
    }

    fn mount(&mut self, config: &SimConfig) -> LfsResult<()> {
        let mut disk = self.disk();
        disk.block_size = config.block_size;
        disk.block_count = config.block_count;
        if let Some(error) = disk.mount_error.take() {
            return Err(error);
        }
        if disk.corrupt {
            return Err(Error::CORRUPTION);
        }
        disk.mounted = true;
        disk.mounts += 1;
        Ok(())
    }

    fn unmount(&mut self) -> LfsResult<()> {
        let mut disk = self.disk();
        disk.mounted = false;
        disk.unmounts += 1;
        Ok(())
    }

    fn file_open(&mut self, file: &mut SimFile, path: &str, flags: FileOpenFlags) -> LfsResult<()> {
        let mut disk = self.disk();
        let key = key(path);
        let exists = match disk.tree.get(&key) {
            Some(Node::Dir) => return Err(Error::PATH_IS_DIR),
            Some(Node::File(_)) => true,
            None => false,
        };
        if exists {
            if flags.contains(FileOpenFlags::CREATE) && flags.contains(FileOpenFlags::EXCL) {
                return Err(Error::ENTRY_ALREADY_EXISTED);
            }
        } else {
            if !flags.contains(FileOpenFlags::CREATE) || !disk.tree.parent_is_dir(&key) {
                return Err(Error::NO_SUCH_ENTRY);
            }
            disk.tree.insert(&key, Node::File(Vec::new()));
        }
        if flags.contains(FileOpenFlags::TRUNCATE) {
            if let Some(data) = disk.tree.file_mut(&key) {
                data.clear();
            }
        }
        *file = SimFile {
            path: key,
            pos: 0,
            readable: flags.contains(FileOpenFlags::READ),
            writable: flags.contains(FileOpenFlags::WRITE),
            append: flags.contains(FileOpenFlags::APPEND),
        };
        Ok(())
    }

    fn file_close(&mut self, _file: &mut SimFile) -> LfsResult<()> {
        match self.disk().close_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn file_read(&mut self, file: &mut SimFile, buf: &mut [u8]) -> LfsResult<usize> {
        if !file.readable {
            return Err(Error::BAD_FILE_DESCRIPTOR);
        }
        let disk = self.disk();
        let data = disk.tree.file(&file.path).ok_or(Error::BAD_FILE_DESCRIPTOR)?;
        let start = (file.pos as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        file.pos += n as u32;
        Ok(n)
    }

    fn file_write(&mut self, file: &mut SimFile, data: &[u8]) -> LfsResult<usize> {
        if !file.writable {
            return Err(Error::BAD_FILE_DESCRIPTOR);
        }
        let mut disk = self.disk();
        let used = Self::blocks_in_use(&disk);
        let (block_size, block_count) = (disk.block_size, disk.block_count);
        let content = disk
            .tree
            .file_mut(&file.path)
            .ok_or(Error::BAD_FILE_DESCRIPTOR)?;
        if file.append {
            file.pos = content.len() as u32;
        }
        let end = file.pos as usize + data.len();
        let old_blocks = (content.len() as u32).div_ceil(block_size);
        let new_blocks = (end.max(content.len()) as u32).div_ceil(block_size);
        if used + new_blocks - old_blocks > block_count {
            return Err(Error::NO_SPACE);
        }
        if content.len() < end {
            content.resize(end, 0);
        }
        content[file.pos as usize..end].copy_from_slice(data);
        file.pos = end as u32;
        Ok(data.len())
    }

    fn file_seek(&mut self, file: &mut SimFile, pos: SeekFrom) -> LfsResult<u32> {
        let disk = self.disk();
        let size = disk.tree.file(&file.path).map_or(0, |data| data.len() as i64);
        let target = match pos {
            SeekFrom::Start(offset) => i64::from(offset),
            SeekFrom::Current(offset) => i64::from(file.pos) + i64::from(offset),
            SeekFrom::End(offset) => size + i64::from(offset),
        };
        if target < 0 || target > i64::from(u32::MAX) {
            return Err(Error::INVALID);
        }
        file.pos = target as u32;
        Ok(file.pos)
    }

    fn file_tell(&mut self, file: &mut SimFile) -> LfsResult<u32> {
        Ok(file.pos)
    }

    fn file_sync(&mut self, _file: &mut SimFile) -> LfsResult<()> {
        Ok(())
    }

    fn file_truncate(&mut self, file: &mut SimFile, size: u32) -> LfsResult<()> {
        if !file.writable {
            return Err(Error::BAD_FILE_DESCRIPTOR);
        }
        let mut disk = self.disk();
        let content = disk
            .tree
            .file_mut(&file.path)
            .ok_or(Error::BAD_FILE_DESCRIPTOR)?;
        content.resize(size as usize, 0);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> LfsResult<()> {
        let mut disk = self.disk();
        let key = key(path);
        if key.is_empty() {
            return Err(Error::INVALID);
        }
        match disk.tree.get(&key) {
            None => return Err(Error::NO_SUCH_ENTRY),
            Some(Node::Dir) if !disk.tree.children(&key).is_empty() => {
                return Err(Error::DIR_NOT_EMPTY)
            }
            Some(_) => {}
        }
        disk.tree.remove(&key);
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> LfsResult<()> {
        let mut disk = self.disk();
        let (from, to) = (key(from), key(to));
        if disk.tree.get(&from).is_none() || !disk.tree.parent_is_dir(&to) {
            return Err(Error::NO_SUCH_ENTRY);
        }
        if disk.tree.get(&to).is_some() {
            disk.tree.remove(&to);
        }
        disk.tree.rename(&from, &to);
        Ok(())
    }

    fn stat(&mut self, path: &str) -> LfsResult<LfsInfo> {
        let disk = self.disk();
        let key = key(path);
        let node = disk.tree.get(&key).ok_or(Error::NO_SUCH_ENTRY)?;
        Ok(info(&key, node))
    }

    fn mkdir(&mut self, path: &str) -> LfsResult<()> {
        let mut disk = self.disk();
        let key = key(path);
        if disk.tree.get(&key).is_some() {
            return Err(Error::ENTRY_ALREADY_EXISTED);
        }
        if !disk.tree.parent_is_dir(&key) {
            return Err(Error::NO_SUCH_ENTRY);
        }
        disk.tree.insert(&key, Node::Dir);
        Ok(())
    }

    fn dir_open(&mut self, dir: &mut SimDir, path: &str) -> LfsResult<()> {
        let disk = self.disk();
        let key = key(path);
        match disk.tree.get(&key) {
            None => Err(Error::NO_SUCH_ENTRY),
            Some(Node::File(_)) => Err(Error::PATH_NOT_DIR),
            Some(Node::Dir) => {
                *dir = SimDir {
                    path: key,
                    index: 0,
                };
                Ok(())
            }
        }
    }

    fn dir_close(&mut self, _dir: &mut SimDir) -> LfsResult<()> {
        Ok(())
    }

    fn dir_read(&mut self, dir: &mut SimDir) -> LfsResult<Option<LfsInfo>> {
        let disk = self.disk();
        let entry = match dir.index {
            0 => Some(info(".", &Node::Dir)),
            1 => Some(info("..", &Node::Dir)),
            n => disk
                .tree
                .children(&dir.path)
                .get(n - 2)
                .map(|(name, node)| info(name, node)),
        };
        if entry.is_some() {
            dir.index += 1;
        }
        Ok(entry)
    }

    fn dir_rewind(&mut self, dir: &mut SimDir) -> LfsResult<()> {
        dir.index = 0;
        Ok(())
    }

    fn fs_size(&mut self) -> LfsResult<u32> {
        let disk = self.disk();
        Ok(disk
            .used_blocks
            .unwrap_or_else(|| Self::blocks_in_use(&disk)))
    }
}
