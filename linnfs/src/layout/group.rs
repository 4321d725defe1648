use binrw::BinRead;

use crate::layout::Record;

/// 组描述符，记录一个组的 inode 表位置
#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct GroupDescriptor {
    pub free_blocks_count: u32,
    pub free_inodes_count: u32,
    /// 块位图所在的块号
    pub block_bitmap: u64,
    /// inode 表所在的块号
    pub inode_table: u64,
}

impl Record for GroupDescriptor {
    const SIZE: usize = 24;
}
