//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{Subject, SubjectList};
use crate::storage::SubjectStore;

/// 应用状态
pub struct App {
    pub list: SubjectList,
    pub store: Box<dyn SubjectStore>,
    pub selected_index: usize,
    pub mode: AppMode,
    pub draft_name: String,
    pub draft_grade: String,
    pub input_field: InputField,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingSubject,
}

/// 输入字段类型
#[derive(Debug, Clone, PartialEq)]
pub enum InputField {
    Name,
    Grade,
}

impl App {
    /// 创建新的应用实例
    pub fn new(list: SubjectList, store: Box<dyn SubjectStore>) -> Self {
        Self {
            list,
            store,
            selected_index: 0,
            mode: AppMode::Normal,
            draft_name: String::new(),
            draft_grade: String::new(),
            input_field: InputField::Name,
            message: None,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        if self.list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.list.len() {
            self.selected_index = self.list.len() - 1;
        }
    }

    /// 获取当前选中的科目
    pub fn selected_subject(&self) -> Option<&Subject> {
        self.list.subjects.get(self.selected_index)
    }

    /// 两个草稿去除空白后均非空时才允许提交添加
    pub fn add_enabled(&self) -> bool {
        !self.draft_name.trim().is_empty() && !self.draft_grade.trim().is_empty()
    }
}
