use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::{SubjectList, SubjectListData};

/// 持久化端口：加载/保存科目列表
///
/// 以接口形式注入 App，测试时可替换为内存实现
pub trait SubjectStore {
    fn load(&self) -> io::Result<SubjectList>;
    fn save(&mut self, list: &SubjectList) -> io::Result<()>;
}

/// 基于单个TOML文件的存储
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SubjectStore for FileStore {
    /// 从TOML文件加载科目列表
    fn load(&self) -> io::Result<SubjectList> {
        if !self.path.exists() {
            return Ok(SubjectList::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(parse_list(&content))
    }

    /// 整体覆盖写回TOML文件
    fn save(&mut self, list: &SubjectList) -> io::Result<()> {
        let content = toml::to_string_pretty(&list.to_data())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, content)
    }
}

/// 解析持久化内容
///
/// 数据损坏时打印告警并按空列表处理，不向调用方抛错
pub fn parse_list(content: &str) -> SubjectList {
    match toml::from_str::<SubjectListData>(content) {
        Ok(data) => SubjectList::from_data(data),
        Err(e) => {
            eprintln!("数据文件解析失败，按空列表处理: {}", e);
            SubjectList::new()
        }
    }
}
