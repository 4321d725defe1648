use crate::Error;

/// 请求层所见的文件系统操作。
///
/// 未实现的操作默认返回 [`Error::Unsupported`]。
pub trait FileSystem {
    /// 路径解析得到的文件句柄
    type File;

    fn lookup_file(&self, path: &str) -> Result<Self::File, Error>;

    #[allow(unused_variables)]
    fn create_file(&self, path: &str) -> Result<Self::File, Error> {
        Err(Error::Unsupported)
    }
}
