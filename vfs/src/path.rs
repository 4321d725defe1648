pub trait Path {
    /// 按`/`拆分出路径的各个组成部分，跳过空项。
    ///
    /// 根目录`/`没有任何组成部分。
    fn components(&self) -> impl Iterator<Item = &Self>;
}

impl Path for str {
    //WARN: `.`与`..`按普通文件名对待，交由目录项自身解析
    fn components(&self) -> impl Iterator<Item = &Self> {
        self.split('/').filter(|cmp| !cmp.is_empty())
    }
}
