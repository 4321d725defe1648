//! # 存储设备接口层
//!
//! 存储设备以**字节偏移**为单位被读取，例如磁盘镜像、引导模块等；
//! [`Storage`] 就是对读取存储设备的抽象，
//! 实现了此特质的类型称为**存储驱动**。

#![no_std]

extern crate alloc;

mod ram_disk;

use derive_more::Display;

pub use self::ram_disk::RamDisk;

/// 存储驱动特质
pub trait Storage: Send + Sync {
    /// 从`offset`处读取数据填充`buf`，返回实际读取的字节数。
    ///
    /// 读到设备末尾时可能少于`buf.len()`。
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// 单次读取恰好填满`buf`，否则报错。
    fn read_exact(&self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        let read_size = self.read(offset, buf)?;
        if read_size == buf.len() {
            Ok(())
        } else {
            Err(StorageError::ShortRead(read_size))
        }
    }

    /// 设备的总字节数，未知时为`None`
    fn capacity(&self) -> Option<u64> {
        None
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    #[display(fmt = "offset out of device bounds")]
    OutOfBounds,
    #[display(fmt = "short read of {} bytes", _0)]
    ShortRead(usize),
    #[display(fmt = "device error {}", _0)]
    Device(i32),
}
