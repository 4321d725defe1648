use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use send_wrapper::SendWrapper;
use storage::{Storage, StorageError};

/// 以宿主机上的镜像文件作为存储设备
#[derive(Debug)]
pub struct BlockFile {
    inner: SendWrapper<RefCell<File>>,
    len: u64,
}

impl BlockFile {
    pub fn new(fd: File) -> std::io::Result<Self> {
        let len = fd.metadata()?.len();
        Ok(Self {
            inner: SendWrapper::new(RefCell::new(fd)),
            len,
        })
    }
}

impl Storage for BlockFile {
    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize, StorageError> {
        if offset >= self.len {
            return Err(StorageError::OutOfBounds);
        }

        let mut file = self.inner.borrow_mut();
        let io_err = |e: std::io::Error| StorageError::Device(e.raw_os_error().unwrap_or(-1));
        file.seek(SeekFrom::Start(offset)).map_err(io_err)?;

        // 读满或读到文件末尾为止
        let mut read_size = 0;
        while read_size < buf.len() {
            match file.read(&mut buf[read_size..]).map_err(io_err)? {
                0 => break,
                n => read_size += n,
            }
        }

        Ok(read_size)
    }

    fn capacity(&self) -> Option<u64> {
        Some(self.len)
    }
}
