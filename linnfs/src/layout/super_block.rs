use binrw::BinRead;

use crate::layout::Record;
use crate::{MAGIC0, MAGIC1, MAX_BLOCK_SIZE};

/// 超级块：
/// - 提供文件系统合法性校验；
/// - 给出块大小、inode与块的统计；
/// - 定位组描述符表
#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct SuperBlock {
    /// 魔数：用于校验文件系统合法性
    pub(crate) magic0: u32,
    pub(crate) magic1: u32,
    pub major_revision: u16,
    pub minor_revision: u16,
    pub state: u16,
    _reserved: u16,
    /// 块的字节数
    pub block_size: u32,
    pub inodes_per_group: u32,
    pub inodes_count: u64,
    pub free_inodes_count: u64,
    pub blocks_count: u64,
    pub free_blocks_count: u64,
    /// 组描述符表所在的块号
    pub groups_table: u64,
}

impl Record for SuperBlock {
    const SIZE: usize = 64;
}

impl SuperBlock {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.magic0 == MAGIC0 && self.magic1 == MAGIC1
    }

    /// 块大小须为512到[`MAX_BLOCK_SIZE`]之间的2的幂，每组至少一个inode
    pub fn has_sane_geometry(&self) -> bool {
        (512..=MAX_BLOCK_SIZE).contains(&self.block_size)
            && self.block_size.is_power_of_two()
            && self.inodes_per_group > 0
    }

    /// 组描述符的个数
    #[inline]
    pub fn group_count(&self) -> u64 {
        self.inodes_count.div_ceil(self.inodes_per_group as u64)
    }

    #[inline]
    pub fn used_inodes(&self) -> u64 {
        self.inodes_count.saturating_sub(self.free_inodes_count)
    }

    #[inline]
    pub fn used_blocks(&self) -> u64 {
        self.blocks_count.saturating_sub(self.free_blocks_count)
    }
}
