use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 科目条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: usize,
    pub name: String,
    pub grade: String,
}

/// TOML文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectListData {
    pub meta: ListMeta,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMeta {
    pub version: String,
    pub created_at: DateTime<Local>,
    pub last_modified: DateTime<Local>,
}

impl Default for SubjectListData {
    fn default() -> Self {
        let now = Local::now();
        Self {
            meta: ListMeta {
                version: "1.0".to_string(),
                created_at: now,
                last_modified: now,
            },
            subjects: Vec::new(),
        }
    }
}

/// 运行时科目列表（保持插入顺序）
#[derive(Debug, Clone)]
pub struct SubjectList {
    pub subjects: Vec<Subject>,
    pub created_at: DateTime<Local>,
}

impl SubjectList {
    pub fn new() -> Self {
        Self {
            subjects: Vec::new(),
            created_at: Local::now(),
        }
    }

    pub fn from_data(data: SubjectListData) -> Self {
        Self {
            subjects: data.subjects,
            created_at: data.meta.created_at,
        }
    }

    pub fn to_data(&self) -> SubjectListData {
        SubjectListData {
            meta: ListMeta {
                version: "1.0".to_string(),
                created_at: self.created_at,
                last_modified: Local::now(),
            },
            subjects: self.subjects.clone(),
        }
    }

    /// 添加科目，id 取当前列表长度
    ///
    /// 删除后不重新编号，交错的添加/删除可能产生重复 id
    pub fn add(&mut self, name: String, grade: String) -> usize {
        let id = self.subjects.len();
        self.subjects.push(Subject { id, name, grade });
        id
    }

    /// 删除第一个 id 匹配的科目
    pub fn remove(&mut self, id: usize) -> bool {
        if let Some(pos) = self.subjects.iter().position(|s| s.id == id) {
            self.subjects.remove(pos);
            true
        } else {
            false
        }
    }

    /// 最终成绩：全部成绩的算术平均值，空列表为 0
    pub fn final_grade(&self) -> f64 {
        if self.subjects.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .subjects
            .iter()
            .map(|s| s.grade.parse::<f64>().unwrap_or(0.0))
            .sum();
        total / self.subjects.len() as f64
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl Default for SubjectList {
    fn default() -> Self {
        Self::new()
    }
}
