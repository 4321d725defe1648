//! # 块地址转换
//!
//! 把文件内的逻辑块索引转换为存储设备上的字节偏移。
//!
//! ## 块索引编码
//!
//! 记`P`为一个间接索引块可容纳的块编号数量。剔去直接索引部分后，
//! 一级索引覆盖接下来的`P`块，二级覆盖`P²`块，三级覆盖`P³`块。
//! 在深度为`d`的索引树中，第`l`层(自底向上，从0计)所用的槽位为
//! `index / P^l % P`。

use alloc::vec;

use vfs::Error;

use crate::layout::DiskInode;
use crate::{Volume, DIRECT_BLOCKS, INDIRECT_LEVELS, POINTER_SIZE};

impl Volume {
    /// 间接索引块的编号容量
    #[inline]
    pub fn pointers_per_block(&self) -> u64 {
        self.block_size() / POINTER_SIZE
    }

    /// 逻辑上 inode 指向一系列数据块，此处传入的是这些数据块的索引（逻辑索引），
    /// 返回该块首字节在存储设备上的偏移。
    ///
    /// - `Some(0)`：空洞，块未分配；
    /// - `None`：间接索引块读取失败，或索引超出三级索引的范围。
    ///
    /// 两种情况下调用者都不能按返回值读取。
    pub fn block_offset(&self, inode: &DiskInode, blk: u64) -> Option<u64> {
        let block_size = self.block_size();

        if blk < DIRECT_BLOCKS as u64 {
            return inode.block[blk as usize].checked_mul(block_size);
        }

        // 剔去直接索引的部分，再逐级剔去较浅的间接索引
        let per_block = self.pointers_per_block();
        let mut index = blk - DIRECT_BLOCKS as u64;
        let mut depth = 1;
        let mut span = per_block;
        while index >= span {
            index -= span;
            depth += 1;
            if depth > INDIRECT_LEVELS {
                return None;
            }
            span = span.checked_mul(per_block)?;
        }

        let mut offset = inode.block[DIRECT_BLOCKS + depth - 1].checked_mul(block_size)?;
        let mut indirect = vec![0u8; block_size as usize];

        for level in (0..depth as u32).rev() {
            if offset == 0 {
                return Some(0);
            }
            if let Err(e) = self.storage.read_exact(offset, &mut indirect) {
                log::warn!("LinnFS: reading indirect block at {offset:#x} failed: {e}");
                return None;
            }

            let slot = (index / per_block.pow(level) % per_block) as usize;
            let pos = slot * POINTER_SIZE as usize;
            let pointer = u64::from_le_bytes(indirect[pos..pos + 8].try_into().ok()?);
            offset = pointer.checked_mul(block_size)?;
        }

        Some(offset)
    }

    /// 从指定位置(字节偏移)读出 inode 的数据填充`buf`，
    /// 返回读取的字节数；越过文件末尾的部分不读。
    ///
    /// 空洞读作0。
    pub fn read_at(&self, inode: &DiskInode, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        let block_size = self.block_size();
        let mut start = offset;
        let end = offset
            .saturating_add(buf.len() as u64)
            .min(inode.size as u64);

        if start >= end {
            return Ok(0);
        }

        // 已读取多少字节
        let mut read_size = 0;
        while start < end {
            let blk = start / block_size;
            // 当前块的末地址(字节)
            let current_block_end = ((blk + 1) * block_size).min(end);
            let block_read_size = (current_block_end - start) as usize;
            let dest = &mut buf[read_size..read_size + block_read_size];

            match self.block_offset(inode, blk) {
                None => return Err(Error::Unavailable),
                Some(0) => dest.fill(0),
                Some(block) => {
                    // 绝对地址 % 块大小 = 块内偏移
                    if let Err(e) = self.storage.read_exact(block + start % block_size, dest) {
                        log::warn!("LinnFS: reading block {blk} failed: {e}");
                        return Err(Error::Unavailable);
                    }
                }
            }

            read_size += block_read_size;
            start = current_block_end;
        }

        Ok(read_size)
    }
}
