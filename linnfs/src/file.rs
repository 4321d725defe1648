//! # 文件层
//!
//! 已解析的文件系统对象：目录或普通文件，各自持有其 inode。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use vfs::{DirEntry, Error, FileType, Stat};

use crate::layout::{DirectoryEntry, DiskInode, Record};
use crate::Volume;

#[derive(Debug, Clone)]
pub enum File {
    Directory(Directory),
    Regular(RegularFile),
}

#[derive(Debug, Clone)]
pub struct Directory {
    inode_id: u64,
    inode: Arc<DiskInode>,
}

#[derive(Debug, Clone)]
pub struct RegularFile {
    inode_id: u64,
    inode: Arc<DiskInode>,
}

impl File {
    /// 按 inode 类型构造对应的文件对象，其余类型不受支持
    pub fn new(inode_id: u64, inode: Arc<DiskInode>) -> Result<Self, Error> {
        match inode.file_type() {
            Some(FileType::Directory) => Ok(Self::Directory(Directory { inode_id, inode })),
            Some(FileType::Regular) => Ok(Self::Regular(RegularFile { inode_id, inode })),
            ty => {
                log::debug!("LinnFS: inode {inode_id} has unsupported type {ty:?}");
                Err(Error::Unsupported)
            }
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        match self {
            Self::Directory(dir) => dir.inode_id,
            Self::Regular(file) => file.inode_id,
        }
    }

    #[inline]
    pub fn inode(&self) -> &Arc<DiskInode> {
        match self {
            Self::Directory(dir) => &dir.inode,
            Self::Regular(file) => &file.inode,
        }
    }

    #[inline]
    pub fn file_type(&self) -> FileType {
        match self {
            Self::Directory(_) => FileType::Directory,
            Self::Regular(_) => FileType::Regular,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn stat(&self, vol: &Volume) -> Stat {
        let size = self.inode().size as u64;
        Stat {
            inode: self.id(),
            mode: self.file_type(),
            block_size: vol.block_size(),
            blocks: size.div_ceil(vol.block_size()),
            size,
        }
    }
}

impl Directory {
    pub(crate) fn new(inode_id: u64, inode: Arc<DiskInode>) -> Self {
        Self { inode_id, inode }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.inode_id
    }

    /// 在目录内容中按名字查找目录项
    pub fn get_entry(&self, name: &str, vol: &Volume) -> Result<DirectoryEntry, Error> {
        let mut found = None;
        self.scan(vol, |entry| {
            if entry.name() == Some(name) {
                found = Some(entry);
                false
            } else {
                true
            }
        })?;

        found.ok_or(Error::NotFound)
    }

    /// 按磁盘顺序列出全部非空目录项
    pub fn entries(&self, vol: &Volume) -> Result<Vec<DirEntry>, Error> {
        let mut entries = Vec::new();
        self.scan(vol, |entry| {
            match (entry.name(), entry.file_type()) {
                (Some(name), Some(ty)) => entries.push(DirEntry {
                    inode: entry.inode as u64,
                    ty,
                    name: String::from(name),
                }),
                _ => log::warn!(
                    "LinnFS: skipping malformed entry for inode {} in directory {}",
                    entry.inode,
                    self.inode_id
                ),
            }
            true
        })?;

        Ok(entries)
    }
}

impl Directory {
    /// 逐块读取目录内容，跳过空槽位；`f`返回`false`时停止
    fn scan(&self, vol: &Volume, mut f: impl FnMut(DirectoryEntry) -> bool) -> Result<(), Error> {
        // 目录下存放的是目录项，块大小总是目录项大小的整数倍
        let size = self.inode.size as u64;
        let mut block = vec![0u8; vol.block_size() as usize];

        let mut offset = 0;
        while offset < size {
            let read_size = vol.read_at(&self.inode, offset, &mut block)?;
            if read_size == 0 {
                break;
            }

            for raw in block[..read_size].chunks_exact(DirectoryEntry::SIZE) {
                let entry = DirectoryEntry::decode(raw).map_err(|_| Error::Unavailable)?;
                if !entry.is_empty() && !f(entry) {
                    return Ok(());
                }
            }
            offset += read_size as u64;
        }

        Ok(())
    }
}

impl RegularFile {
    #[inline]
    pub fn id(&self) -> u64 {
        self.inode_id
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.inode.size as u64
    }

    pub fn read_at(&self, offset: u64, buf: &mut [u8], vol: &Volume) -> Result<usize, Error> {
        vol.read_at(&self.inode, offset, buf)
    }
}
