use alloc::string::String;

use derive_more::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Inode number
    pub inode: u64,
    pub ty: FileType,
    pub name: String,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    #[display(fmt = "regular")]
    Regular,
    #[display(fmt = "directory")]
    Directory,
    #[display(fmt = "block device")]
    BlockDevice,
    #[display(fmt = "char device")]
    CharDevice,
    #[display(fmt = "symlink")]
    SymLink,
    #[display(fmt = "fifo")]
    Fifo,
}
