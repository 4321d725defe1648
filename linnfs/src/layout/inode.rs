//! 磁盘上的 inode
//!
//! 块索引数组的前 [`DIRECT_BLOCKS`] 项直接指向数据块，其后依次为：
//! - 一级：指向的块连续存储**块编号**，每个编号都指向一个**数据块**
//! - 二级：指向的块连续存储**块编号**，每个编号都指向一个一级索引块
//! - 三级：指向的块连续存储**块编号**，每个编号都指向一个二级索引块

use binrw::BinRead;
use enumflags2::{bitflags, BitFlags};
use vfs::FileType;

use crate::layout::Record;
use crate::{DIRECT_BLOCKS, INODE_BLOCKS};

#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct DiskInode {
    /// 类型标记，见 [`DiskInode::file_type`]
    pub(crate) ty: u16,
    pub mode: u16,
    pub uid: u16,
    pub gid: u16,
    pub size: u32,
    pub access_time: u32,
    pub create_time: u32,
    pub modify_time: u32,
    pub change_time: u32,
    /// 硬链接个数
    pub links: u16,
    /// 块编号，乘以块大小即得字节偏移；0表示空洞
    pub block: [u64; INODE_BLOCKS],
}

impl Record for DiskInode {
    const SIZE: usize = 30 + 8 * INODE_BLOCKS;
}

#[bitflags]
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    OtherExec = 0o001,
    OtherWrite = 0o002,
    OtherRead = 0o004,
    GroupExec = 0o010,
    GroupWrite = 0o020,
    GroupRead = 0o040,
    OwnerExec = 0o100,
    OwnerWrite = 0o200,
    OwnerRead = 0o400,
}

impl DiskInode {
    /// 未知类型返回`None`
    #[inline]
    pub fn file_type(&self) -> Option<FileType> {
        Self::type_from_tag(self.ty)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type() == Some(FileType::Directory)
    }

    #[inline]
    pub fn permissions(&self) -> BitFlags<Permission> {
        BitFlags::from_bits_truncate(self.mode)
    }

    #[inline]
    pub fn direct(&self) -> &[u64] {
        &self.block[..DIRECT_BLOCKS]
    }

    pub(crate) fn type_from_tag(tag: u16) -> Option<FileType> {
        let ty = match tag {
            0 => FileType::Regular,
            1 => FileType::Directory,
            2 => FileType::BlockDevice,
            3 => FileType::CharDevice,
            4 => FileType::SymLink,
            5 => FileType::Fifo,
            _ => return None,
        };
        Some(ty)
    }
}
