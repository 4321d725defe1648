use derive_more::Display;

/// 挂载失败的原因。挂载要么完整成功，要么什么也不留下。
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MountError {
    #[display(fmt = "reading superblock failed")]
    ReadSuperBlock,
    #[display(fmt = "magic mismatch")]
    BadMagic,
    #[display(fmt = "unsupported block size or group geometry")]
    Geometry,
    #[display(fmt = "reading group descriptor {} failed", _0)]
    ReadGroup(u64),
    #[display(fmt = "reading root directory failed")]
    RootInode,
}
