#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

/* LinnFS 的整体架构，自上而下 */

// 文件缓存树：路径解析与目录遍历的记忆化
mod cache;

// 文件层：目录与普通文件
mod file;

// 挂载：超级块、组描述符与 inode 管理
mod volume;

// 块地址转换：逻辑块索引到存储偏移
mod block;

// 磁盘数据结构层
pub mod layout;

mod error;
mod fs;

#[cfg(test)]
mod fixture;

pub use self::{
    cache::FileCache,
    error::MountError,
    file::{Directory, File, RegularFile},
    fs::LinnFileSystem,
    volume::Volume,
};

pub const MAGIC0: u32 = 0x1f2f_3f4f;
pub const MAGIC1: u32 = 0xf4f3_f2f1;
/// 超级块在存储设备上的字节偏移
pub const SUPER_OFFSET: u64 = 1024;
pub const ROOT_INODE: u64 = 1;
/// 块大小的上限，间接索引块按整块读入内存
pub const MAX_BLOCK_SIZE: u32 = 64 * 1024;

/// 直接索引的块编号个数
pub const DIRECT_BLOCKS: usize = 8;
/// 间接索引的最大层数
pub const INDIRECT_LEVELS: usize = 3;
pub const INODE_BLOCKS: usize = DIRECT_BLOCKS + INDIRECT_LEVELS;
/// 一个块编号的字节数
pub const POINTER_SIZE: u64 = 8;
