//! # 文件缓存树
//!
//! 内存中按需生长的树，镜像已解析过的路径前缀，
//! 使得每个前缀在一次挂载期间至多从存储设备读取一次。
//!
//! NOTE: 节点从不淘汰，树的大小只受挂载时长限制。

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::Mutex;

use crate::File;

#[derive(Debug)]
pub struct FileCache {
    file: File,
    /// 子项名 -> 子节点；父节点独占子节点
    entries: Mutex<BTreeMap<String, Arc<FileCache>>>,
}

impl FileCache {
    pub fn new(file: File) -> Self {
        Self {
            file,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    #[inline]
    pub fn file(&self) -> &File {
        &self.file
    }

    /// 已缓存的子节点
    pub fn cached(&self, name: &str) -> Option<Arc<FileCache>> {
        self.entries.lock().get(name).cloned()
    }

    /// 已缓存子节点的名字
    pub fn cached_names(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    /// 取得名为`name`的子节点，未缓存时调用`resolve`构造并插入。
    ///
    /// 构造期间持有锁，同名子节点不会被重复构造；构造失败则什么也不插入。
    pub fn child_or_insert_with<E>(
        &self,
        name: &str,
        resolve: impl FnOnce(&File) -> Result<File, E>,
    ) -> Result<Arc<FileCache>, E> {
        let mut entries = self.entries.lock();
        if let Some(child) = entries.get(name) {
            return Ok(Arc::clone(child));
        }

        let child = Arc::new(Self::new(resolve(&self.file)?));
        entries.insert(String::from(name), Arc::clone(&child));
        Ok(child)
    }
}
