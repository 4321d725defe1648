use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{Storage, StorageError};

/// 内存中的存储设备，例如已被引导程序载入内存的文件系统镜像。
#[derive(Debug, Clone)]
pub struct RamDisk {
    data: Box<[u8]>,
}

impl RamDisk {
    pub fn new(data: impl Into<Box<[u8]>>) -> Self {
        Self { data: data.into() }
    }
}

impl From<Vec<u8>> for RamDisk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl Storage for RamDisk {
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, StorageError> {
        let start = usize::try_from(offset).map_err(|_| StorageError::OutOfBounds)?;
        if start >= self.data.len() {
            return Err(StorageError::OutOfBounds);
        }

        let end = (start + buf.len()).min(self.data.len());
        let read_size = end - start;
        buf[..read_size].copy_from_slice(&self.data[start..end]);

        Ok(read_size)
    }

    fn capacity(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn read_inside() {
        let disk = RamDisk::new(vec![1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 3];
        assert_eq!(Ok(3), disk.read(1, &mut buf));
        assert_eq!([2, 3, 4], buf);
    }

    #[test]
    fn read_short_at_end() {
        let disk = RamDisk::new(vec![1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 4];
        assert_eq!(Ok(2), disk.read(3, &mut buf));
        assert_eq!([4, 5], buf[..2]);
    }

    #[test]
    fn read_past_end() {
        let disk = RamDisk::new(vec![0u8; 8]);
        let mut buf = [0u8; 1];
        assert_eq!(Err(StorageError::OutOfBounds), disk.read(8, &mut buf));
        assert_eq!(Some(8), disk.capacity());
    }

    #[test]
    fn read_exact_rejects_short() {
        let disk = RamDisk::new(vec![0u8; 8]);
        let mut buf = [0u8; 4];
        assert_eq!(Ok(()), disk.read_exact(4, &mut buf));
        assert_eq!(Err(StorageError::ShortRead(2)), disk.read_exact(6, &mut buf));
    }
}
