//! 测试用的镜像构造器与计数存储设备

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;
use storage::{RamDisk, Storage, StorageError};

use crate::layout::{DirectoryEntry, DiskInode, GroupDescriptor, Record, SuperBlock};
use crate::{DIRECT_BLOCKS, INODE_BLOCKS, MAGIC0, MAGIC1, SUPER_OFFSET};

pub const REGULAR: u16 = 0;
pub const DIRECTORY: u16 = 1;
pub const SYMLINK: u16 = 4;

/// 在内存中按 LinnFS 布局拼出一个镜像
pub struct ImageBuilder {
    block_size: u64,
    inodes_per_group: u64,
    inode_tables: Vec<u64>,
    image: Vec<u8>,
}

impl ImageBuilder {
    pub fn new(block_size: u64, inodes_count: u64, inodes_per_group: u64) -> Self {
        let group_count = inodes_count.div_ceil(inodes_per_group);

        let mut next = (SUPER_OFFSET + SuperBlock::SIZE as u64).div_ceil(block_size);
        let groups_table = next;
        next += (group_count * GroupDescriptor::SIZE as u64).div_ceil(block_size);

        let mut inode_tables = Vec::new();
        for _ in 0..group_count {
            inode_tables.push(next);
            next += (inodes_per_group * DiskInode::SIZE as u64).div_ceil(block_size);
        }

        let mut builder = Self {
            block_size,
            inodes_per_group,
            inode_tables,
            image: vec![0; (next * block_size) as usize],
        };

        let mut sb = Vec::with_capacity(SuperBlock::SIZE);
        sb.extend_from_slice(&MAGIC0.to_le_bytes());
        sb.extend_from_slice(&MAGIC1.to_le_bytes());
        sb.extend_from_slice(&1u16.to_le_bytes());
        sb.extend_from_slice(&0u16.to_le_bytes());
        sb.extend_from_slice(&0u16.to_le_bytes());
        sb.extend_from_slice(&0u16.to_le_bytes());
        sb.extend_from_slice(&(block_size as u32).to_le_bytes());
        sb.extend_from_slice(&(inodes_per_group as u32).to_le_bytes());
        sb.extend_from_slice(&inodes_count.to_le_bytes());
        sb.extend_from_slice(&(inodes_count / 2).to_le_bytes());
        sb.extend_from_slice(&next.to_le_bytes());
        sb.extend_from_slice(&0u64.to_le_bytes());
        sb.extend_from_slice(&groups_table.to_le_bytes());
        builder.write(SUPER_OFFSET, &sb);

        for i in 0..group_count {
            let mut gd = Vec::with_capacity(GroupDescriptor::SIZE);
            gd.extend_from_slice(&0u32.to_le_bytes());
            gd.extend_from_slice(&(inodes_per_group as u32).to_le_bytes());
            gd.extend_from_slice(&0u64.to_le_bytes());
            gd.extend_from_slice(&builder.inode_tables[i as usize].to_le_bytes());
            builder.write(
                groups_table * block_size + i * GroupDescriptor::SIZE as u64,
                &gd,
            );
        }

        builder
    }

    pub fn group_table_offset(&self) -> u64 {
        let raw = &self.image[SUPER_OFFSET as usize + 56..SUPER_OFFSET as usize + 64];
        u64::from_le_bytes(raw.try_into().unwrap()) * self.block_size
    }

    pub fn inode_offset(&self, inode_id: u64) -> u64 {
        let group = ((inode_id - 1) / self.inodes_per_group) as usize;
        let index = (inode_id - 1) % self.inodes_per_group;
        self.inode_tables[group] * self.block_size + index * DiskInode::SIZE as u64
    }

    pub fn set_magic(&mut self, magic0: u32, magic1: u32) {
        self.write(SUPER_OFFSET, &magic0.to_le_bytes());
        self.write(SUPER_OFFSET + 4, &magic1.to_le_bytes());
    }

    pub fn set_block_size(&mut self, block_size: u32) {
        self.write(SUPER_OFFSET + 16, &block_size.to_le_bytes());
    }

    pub fn write(&mut self, offset: u64, bytes: &[u8]) {
        let offset = offset as usize;
        self.image[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn alloc_block(&mut self) -> u64 {
        let block = self.image.len() as u64 / self.block_size;
        self.image.resize(self.image.len() + self.block_size as usize, 0);
        block
    }

    pub fn set_inode(&mut self, inode_id: u64, ty: u16, size: u32, block: [u64; INODE_BLOCKS]) {
        let mode: u16 = if ty == DIRECTORY { 0o755 } else { 0o644 };

        let mut raw = Vec::with_capacity(DiskInode::SIZE);
        raw.extend_from_slice(&ty.to_le_bytes());
        raw.extend_from_slice(&mode.to_le_bytes());
        raw.extend_from_slice(&[0; 4]); // uid, gid
        raw.extend_from_slice(&size.to_le_bytes());
        raw.extend_from_slice(&[0; 16]); // 时间戳
        raw.extend_from_slice(&1u16.to_le_bytes());
        for pointer in block {
            raw.extend_from_slice(&pointer.to_le_bytes());
        }
        assert_eq!(DiskInode::SIZE, raw.len());

        let offset = self.inode_offset(inode_id);
        self.write(offset, &raw);
    }

    pub fn add_file(&mut self, inode_id: u64, content: &[u8]) {
        let block = self.store(content);
        self.set_inode(inode_id, REGULAR, content.len() as u32, block);
    }

    pub fn add_dir(&mut self, inode_id: u64, entries: &[(&str, u64, u16)]) {
        let mut content = Vec::with_capacity(entries.len() * DirectoryEntry::SIZE);
        for &(name, inode, ty) in entries {
            content.extend_from_slice(&(inode as u32).to_le_bytes());
            content.push(ty as u8);
            let mut raw_name = [0u8; DirectoryEntry::SIZE - 5];
            raw_name[..name.len()].copy_from_slice(name.as_bytes());
            content.extend_from_slice(&raw_name);
        }

        let block = self.store(&content);
        self.set_inode(inode_id, DIRECTORY, content.len() as u32, block);
    }

    /// 构造一条间接索引链：第`i`个索引块的`slots[i]`槽指向下一块，
    /// 最后一块指向新分配的数据块。返回`(首个索引块, 数据块)`。
    pub fn chain(&mut self, slots: &[u64]) -> (u64, u64) {
        let blocks: Vec<u64> = (0..=slots.len()).map(|_| self.alloc_block()).collect();
        for (i, &slot) in slots.iter().enumerate() {
            let offset = blocks[i] * self.block_size + slot * 8;
            self.write(offset, &blocks[i + 1].to_le_bytes());
        }
        (blocks[0], blocks[slots.len()])
    }

    pub fn build(self) -> Vec<u8> {
        self.image
    }
}

impl ImageBuilder {
    /// 把内容写入新分配的数据块，只用到直接索引与一级索引
    fn store(&mut self, content: &[u8]) -> [u64; INODE_BLOCKS] {
        let per_block = (self.block_size / 8) as usize;
        let mut block = [0; INODE_BLOCKS];
        let chunks = content.chunks(self.block_size as usize);
        assert!(chunks.len() <= DIRECT_BLOCKS + per_block);

        let mut indirect = Vec::new();
        for chunk in chunks {
            let data = self.alloc_block();
            self.write(data * self.block_size, chunk);
            indirect.push(data);
        }

        let rest = indirect.split_off(indirect.len().min(DIRECT_BLOCKS));
        block[..indirect.len()].copy_from_slice(&indirect);
        if !rest.is_empty() {
            let indirect1 = self.alloc_block();
            for (i, data) in rest.into_iter().enumerate() {
                self.write(indirect1 * self.block_size + i as u64 * 8, &data.to_le_bytes());
            }
            block[DIRECT_BLOCKS] = indirect1;
        }

        block
    }
}

/// 记录读取次数，并可令指定区间读取失败的存储设备
pub struct CountingStorage {
    disk: RamDisk,
    reads: AtomicUsize,
    failing: Mutex<Vec<Range<u64>>>,
}

impl CountingStorage {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            disk: RamDisk::from(image),
            reads: AtomicUsize::new(0),
            failing: Mutex::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
    }

    pub fn fail(&self, range: Range<u64>) {
        self.failing.lock().push(range);
    }

    pub fn heal(&self) {
        self.failing.lock().clear();
    }
}

impl Storage for CountingStorage {
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        let end = offset + buf.len() as u64;
        if self
            .failing
            .lock()
            .iter()
            .any(|range| range.start < end && offset < range.end)
        {
            return Err(StorageError::Device(-5));
        }

        self.disk.read(offset, buf)
    }
}
