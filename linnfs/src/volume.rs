//! # 挂载的卷
//!
//! 持有超级块、组描述符表与 inode 缓存，
//! 负责把 inode 编号解析为磁盘上的 inode。

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use spin::Mutex;
use storage::Storage;

use crate::layout::{DiskInode, GroupDescriptor, Record, SuperBlock};
use crate::{MountError, SUPER_OFFSET};

pub struct Volume {
    pub(crate) storage: Arc<dyn Storage>,
    super_block: SuperBlock,
    /// 按组号索引
    groups: Vec<GroupDescriptor>,
    /// inode 缓存，挂载期间只增不减
    inodes: Mutex<BTreeMap<u64, Arc<DiskInode>>>,
}

impl Volume {
    pub fn mount(storage: Arc<dyn Storage>) -> Result<Self, MountError> {
        let mut raw = [0u8; SuperBlock::SIZE];
        if let Err(e) = storage.read_exact(SUPER_OFFSET, &mut raw) {
            log::warn!("LinnFS: reading superblock failed: {e}");
            return Err(MountError::ReadSuperBlock);
        }
        let super_block = SuperBlock::decode(&raw).map_err(|_| MountError::ReadSuperBlock)?;

        if !super_block.is_valid() {
            log::warn!("LinnFS: magic mismatch");
            return Err(MountError::BadMagic);
        }
        if !super_block.has_sane_geometry() {
            log::warn!(
                "LinnFS: block size {} with {} inodes per group",
                super_block.block_size,
                super_block.inodes_per_group
            );
            return Err(MountError::Geometry);
        }

        let volume_size = super_block.blocks_count.saturating_mul(super_block.block_size as u64);
        if let Some(capacity) = storage.capacity().filter(|&capacity| capacity < volume_size) {
            log::warn!("LinnFS: device holds {capacity} bytes, volume claims {volume_size}");
        }

        let group_count = super_block.group_count();
        let table = super_block
            .groups_table
            .checked_mul(super_block.block_size as u64)
            .ok_or(MountError::Geometry)?;

        let mut groups = Vec::new();
        let mut raw = [0u8; GroupDescriptor::SIZE];
        for i in 0..group_count {
            let offset = i
                .checked_mul(GroupDescriptor::SIZE as u64)
                .and_then(|offset| offset.checked_add(table))
                .ok_or(MountError::ReadGroup(i))?;
            if let Err(e) = storage.read_exact(offset, &mut raw) {
                log::warn!("LinnFS: reading group descriptor {i} failed: {e}");
                return Err(MountError::ReadGroup(i));
            }
            groups.push(GroupDescriptor::decode(&raw).map_err(|_| MountError::ReadGroup(i))?);
        }
        log::info!("LinnFS: {group_count} group descriptors");
        log::info!(
            "LinnFS: {} inodes, {} blocks",
            super_block.used_inodes(),
            super_block.used_blocks()
        );

        Ok(Self {
            storage,
            super_block,
            groups,
            inodes: Mutex::new(BTreeMap::new()),
        })
    }

    #[inline]
    pub fn super_block(&self) -> &SuperBlock {
        &self.super_block
    }

    #[inline]
    pub fn block_size(&self) -> u64 {
        self.super_block.block_size as u64
    }

    #[inline]
    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    #[inline]
    pub fn get_group(&self, group_id: u64) -> Option<&GroupDescriptor> {
        self.groups.get(usize::try_from(group_id).ok()?)
    }

    /// inode 编号从1开始
    pub fn group_of(&self, inode_id: u64) -> Option<&GroupDescriptor> {
        let group_id = inode_id.checked_sub(1)? / self.super_block.inodes_per_group as u64;
        self.get_group(group_id)
    }

    /// 根据编号获取 inode，优先使用缓存。
    ///
    /// 同一编号总是返回同一个 [`Arc`]；读取失败不会写入缓存。
    pub fn get_inode(&self, inode_id: u64) -> Result<Arc<DiskInode>, vfs::Error> {
        if inode_id == 0 || inode_id >= self.super_block.inodes_count {
            return Err(vfs::Error::NotFound);
        }

        // 持锁直到插入，同一编号至多读取一次
        let mut inodes = self.inodes.lock();
        if let Some(inode) = inodes.get(&inode_id) {
            return Ok(Arc::clone(inode));
        }

        let offset = self.inode_pos(inode_id).ok_or(vfs::Error::NotFound)?;
        let mut raw = [0u8; DiskInode::SIZE];
        if let Err(e) = self.storage.read_exact(offset, &mut raw) {
            log::warn!("LinnFS: reading inode {inode_id} failed: {e}");
            return Err(vfs::Error::NotFound);
        }
        let inode = Arc::new(DiskInode::decode(&raw).map_err(|_| vfs::Error::NotFound)?);
        log::debug!("LinnFS: cached inode {inode_id}");

        inodes.insert(inode_id, Arc::clone(&inode));
        Ok(inode)
    }

    /// 已缓存的 inode 个数
    pub fn cached_inodes(&self) -> usize {
        self.inodes.lock().len()
    }
}

impl Volume {
    /// inode 在存储设备上的字节偏移
    fn inode_pos(&self, inode_id: u64) -> Option<u64> {
        let group = self.group_of(inode_id)?;
        let index = (inode_id - 1) % self.super_block.inodes_per_group as u64;

        group
            .inode_table
            .checked_mul(self.block_size())?
            .checked_add(index * DiskInode::SIZE as u64)
    }
}

impl fmt::Debug for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Volume")
            .field("super_block", &self.super_block)
            .field("groups", &self.groups)
            .field("cached_inodes", &self.cached_inodes())
            .finish_non_exhaustive()
    }
}
