//! # 磁盘数据结构层
//!
//! LinnFS 的磁盘布局：
//! 引导区 | 超级块 | 组描述符表 | 各组的 inode 表 | 数据块
//!
//! 所有整数均为小端序。

mod dir_entry;
mod group;
mod inode;
mod super_block;

use binrw::io::Cursor;
use binrw::{BinRead, BinResult, Endian};

pub use self::{
    dir_entry::DirectoryEntry,
    group::GroupDescriptor,
    inode::{DiskInode, Permission},
    super_block::SuperBlock,
};

/// 定长的磁盘记录
pub trait Record: for<'a> BinRead<Args<'a> = ()> {
    /// 记录在磁盘上占据的字节数
    const SIZE: usize;

    fn decode(raw: &[u8]) -> BinResult<Self> {
        Self::read_options(&mut Cursor::new(raw), Endian::Little, ())
    }
}
