use alloc::sync::Arc;
use alloc::vec::Vec;

use storage::Storage;
use vfs::{DirEntry, Error, FileSystem, Path, Stat};

use crate::layout::SuperBlock;
use crate::{Directory, File, FileCache, MountError, Volume, ROOT_INODE};

/// 挂载的 LinnFS：卷加上以`/`为根的文件缓存树
#[derive(Debug)]
pub struct LinnFileSystem {
    volume: Volume,
    root: Arc<FileCache>,
}

impl LinnFileSystem {
    pub fn mount(storage: Arc<dyn Storage>) -> Result<Self, MountError> {
        let volume = Volume::mount(storage)?;

        let root_inode = volume
            .get_inode(ROOT_INODE)
            .map_err(|_| MountError::RootInode)?;
        if !root_inode.is_dir() {
            log::warn!("LinnFS: root inode is not a directory");
            return Err(MountError::RootInode);
        }
        let root = FileCache::new(File::Directory(Directory::new(ROOT_INODE, root_inode)));
        log::info!("LinnFS: mounted '/'");

        Ok(Self {
            volume,
            root: Arc::new(root),
        })
    }

    #[inline]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    #[inline]
    pub fn super_block(&self) -> &SuperBlock {
        self.volume.super_block()
    }

    #[inline]
    pub fn root(&self) -> &Arc<FileCache> {
        &self.root
    }

    /// 解析绝对路径，沿途缓存每个前缀。
    ///
    /// 中间项不是目录时立即失败，不再解析后续项。
    pub fn lookup_file(&self, path: &str) -> Result<Arc<FileCache>, Error> {
        let mut cache = Arc::clone(&self.root);

        for name in path.components() {
            cache = cache.child_or_insert_with(name, |file| {
                // 不是目录就无法继续查找
                let File::Directory(dir) = file else {
                    return Err(Error::NotADirectory);
                };
                log::debug!("LinnFS: resolving '{name}' in inode {}", dir.id());

                let entry = dir.get_entry(name, &self.volume)?;
                let inode_id = entry.inode as u64;
                let inode = self.volume.get_inode(inode_id)?;
                File::new(inode_id, inode)
            })?;
        }

        Ok(cache)
    }

    /// 读取普通文件`path`从`offset`起的内容
    pub fn read_file(&self, path: &str, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        match self.lookup_file(path)?.file() {
            File::Regular(file) => file.read_at(offset, buf, &self.volume),
            File::Directory(_) => Err(Error::IsADirectory),
        }
    }

    pub fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, Error> {
        match self.lookup_file(path)?.file() {
            File::Directory(dir) => dir.entries(&self.volume),
            File::Regular(_) => Err(Error::NotADirectory),
        }
    }

    pub fn stat(&self, path: &str) -> Result<Stat, Error> {
        Ok(self.lookup_file(path)?.file().stat(&self.volume))
    }
}

impl FileSystem for LinnFileSystem {
    type File = Arc<FileCache>;

    /// 请求层只区分找到与否，其余失败一律视作不存在
    fn lookup_file(&self, path: &str) -> Result<Self::File, Error> {
        LinnFileSystem::lookup_file(self, path).map_err(|e| {
            log::debug!("LinnFS: lookup of '{path}' failed: {e}");
            Error::NotFound
        })
    }

    /// 只读挂载，不论路径如何都不支持创建
    fn create_file(&self, path: &str) -> Result<Self::File, Error> {
        log::debug!("LinnFS: refusing to create '{path}'");
        Err(Error::Unsupported)
    }
}
