use derive_more::Display;

/// 单次请求的失败结果。
///
/// 底层的I/O错误码不会穿透到这里，调用者只关心成功与否。
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display(fmt = "no such file or directory")]
    NotFound,
    #[display(fmt = "not a directory")]
    NotADirectory,
    #[display(fmt = "is a directory")]
    IsADirectory,
    #[display(fmt = "operation not supported")]
    Unsupported,
    /// 存储设备读取失败，或块地址无法解析
    #[display(fmt = "block unavailable")]
    Unavailable,
}
