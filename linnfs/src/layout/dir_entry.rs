use binrw::BinRead;
use vfs::FileType;

use crate::layout::{DiskInode, Record};

const NAME_MAX_LEN: usize = 59;

/// 目录文件内容中的一项：名字与 inode 编号
#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct DirectoryEntry {
    /// 为0表示空槽位
    pub inode: u32,
    pub ty: u8,
    // 以 \0 填充
    name: [u8; NAME_MAX_LEN],
}

impl Record for DirectoryEntry {
    const SIZE: usize = 64;
}

impl DirectoryEntry {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inode == 0
    }

    /// 名字不是合法的UTF-8时返回`None`
    pub fn name(&self) -> Option<&str> {
        let len = self
            .name
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(NAME_MAX_LEN);
        core::str::from_utf8(&self.name[..len]).ok()
    }

    #[inline]
    pub fn file_type(&self) -> Option<FileType> {
        DiskInode::type_from_tag(self.ty as u16)
    }
}
