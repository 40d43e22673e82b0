//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑、输入过滤规则和各种业务处理方法

use super::actions::Action;
use super::state::{App, AppMode, InputField};

/// 科目名过滤：候选值只有为空或全为 ASCII 字母时才被接受
///
/// 接受时对整个字符串重新执行首字母大写（每次按键都执行，
/// 不只在提交时），其余字符保持原样；否则返回原草稿不变
pub fn apply_name_input(current: &str, candidate: &str) -> String {
    if candidate.is_empty() || candidate.chars().all(|c| c.is_ascii_alphabetic()) {
        capitalize_first(candidate)
    } else {
        current.to_string()
    }
}

/// 成绩过滤：整体解析为数字后钳制到最大 20
///
/// 解析失败按 0 处理（沿用原始的静默归零语义），不设下限钳制
pub fn apply_grade_input(candidate: &str) -> String {
    let value: f64 = candidate.trim().parse().unwrap_or(0.0);
    format_grade(value.min(20.0))
}

/// 成绩草稿的显示值：恰好为 "0" 时显示为空，草稿本身仍是 "0"
pub fn display_grade(draft: &str) -> &str {
    if draft == "0" { "" } else { draft }
}

/// 数字转成绩字符串，整数不带小数点（15 而不是 15.0）
fn format_grade(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddSubject => self.start_add_subject(),
            Action::RemoveSelected => self.remove_selected(),

            Action::Cancel => self.cancel(),
            Action::SwitchField => self.switch_field(),

            Action::Submit => match self.input_field {
                InputField::Name => {
                    if self.mode == AppMode::AddingSubject && !self.draft_name.trim().is_empty() {
                        self.input_field = InputField::Grade;
                    }
                }
                InputField::Grade => {
                    // 任一草稿为空时提交入口保持禁用（对应原来的按钮置灰）
                    if self.mode == AppMode::AddingSubject && self.add_enabled() {
                        self.confirm_add_subject();
                    }
                }
            },

            Action::Input(c) => self.input_char(c),
            Action::DeleteChar => self.delete_char(),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加科目相关 ============

    /// 开始添加科目
    pub fn start_add_subject(&mut self) {
        self.mode = AppMode::AddingSubject;
        self.draft_name.clear();
        self.draft_grade.clear();
        self.input_field = InputField::Name;
    }

    /// 切换输入字段
    pub fn switch_field(&mut self) {
        if self.mode == AppMode::AddingSubject {
            self.input_field = match self.input_field {
                InputField::Name => InputField::Grade,
                InputField::Grade => InputField::Name,
            };
        }
    }

    /// 确认添加科目
    ///
    /// 函数内只校验科目名非空；成绩是否为空由提交入口拦截
    pub fn confirm_add_subject(&mut self) {
        if self.draft_name.trim().is_empty() {
            return;
        }
        let name = self.draft_name.clone();
        let grade = self.draft_grade.clone();
        self.list.add(name, grade);
        self.draft_name.clear();
        self.draft_grade.clear();
        self.mode = AppMode::Normal;
        self.input_field = InputField::Name;
        self.clamp_selection();
        self.persist();
        self.message = Some("科目已添加".to_string());
    }

    // ============ 删除科目相关 ============

    /// 删除当前选中的科目（按 id 取第一个匹配项）
    pub fn remove_selected(&mut self) {
        if let Some(subject) = self.selected_subject() {
            let id = subject.id;
            if self.list.remove(id) {
                self.clamp_selection();
                self.persist();
                self.message = Some("科目已删除".to_string());
            }
        }
    }

    // ============ 输入编辑相关 ============

    /// 向当前字段追加字符，经过对应的过滤规则
    pub fn input_char(&mut self, c: char) {
        if self.mode != AppMode::AddingSubject {
            return;
        }
        match self.input_field {
            InputField::Name => {
                let candidate = format!("{}{}", self.draft_name, c);
                self.draft_name = apply_name_input(&self.draft_name, &candidate);
            }
            InputField::Grade => {
                // 编辑的是显示值：草稿为 "0" 时显示为空，从空继续输入
                let candidate = format!("{}{}", display_grade(&self.draft_grade), c);
                self.draft_grade = apply_grade_input(&candidate);
            }
        }
    }

    /// 从当前字段删除末尾字符，随后重新执行过滤规则
    pub fn delete_char(&mut self) {
        if self.mode != AppMode::AddingSubject {
            return;
        }
        match self.input_field {
            InputField::Name => {
                let mut shorter = self.draft_name.clone();
                shorter.pop();
                self.draft_name = apply_name_input(&self.draft_name, &shorter);
            }
            InputField::Grade => {
                let mut shorter = display_grade(&self.draft_grade).to_string();
                if shorter.pop().is_some() {
                    // 删空后重新归零为 "0"，显示为空但草稿非空
                    self.draft_grade = apply_grade_input(&shorter);
                }
            }
        }
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.draft_name.clear();
        self.draft_grade.clear();
        self.input_field = InputField::Name;
        self.message = None;
    }

    /// 每次变更后整体写回存储
    pub fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.list) {
            self.message = Some(format!("保存失败: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectList;
    use crate::storage::SubjectStore;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// 内存存储假件，记录每次保存的结果
    #[derive(Default, Clone)]
    struct MemoryStore {
        saved: Rc<RefCell<Vec<Vec<crate::models::Subject>>>>,
    }

    impl SubjectStore for MemoryStore {
        fn load(&self) -> io::Result<SubjectList> {
            Ok(SubjectList::new())
        }

        fn save(&mut self, list: &SubjectList) -> io::Result<()> {
            self.saved.borrow_mut().push(list.subjects.clone());
            Ok(())
        }
    }

    fn new_app() -> (App, MemoryStore) {
        let store = MemoryStore::default();
        let app = App::new(SubjectList::new(), Box::new(store.clone()));
        (app, store)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_name_filter_rejects_non_letters() {
        assert_eq!(apply_name_input("Math", "Math1"), "Math");
        assert_eq!(apply_name_input("Math", "Math "), "Math");
        assert_eq!(apply_name_input("Math", "Math-"), "Math");
        assert_eq!(apply_name_input("", "!"), "");
    }

    #[test]
    fn test_name_filter_capitalizes_first_letter_only() {
        assert_eq!(apply_name_input("", "m"), "M");
        assert_eq!(apply_name_input("M", "Ma"), "Ma");
        // 内部大小写保持用户所输
        assert_eq!(apply_name_input("MA", "MAth"), "MAth");
        assert_eq!(apply_name_input("Math", "Mat"), "Mat");
        assert_eq!(apply_name_input("", ""), "");
    }

    #[test]
    fn test_grade_filter_clamps_to_twenty() {
        assert_eq!(apply_grade_input("15"), "15");
        assert_eq!(apply_grade_input("20"), "20");
        assert_eq!(apply_grade_input("25"), "20");
        assert_eq!(apply_grade_input("155"), "20");
        assert_eq!(apply_grade_input("15.5"), "15.5");
    }

    #[test]
    fn test_grade_filter_coerces_unparseable_to_zero() {
        assert_eq!(apply_grade_input("abc"), "0");
        assert_eq!(apply_grade_input(""), "0");
        assert_eq!(apply_grade_input("-"), "0");
    }

    #[test]
    fn test_display_grade_hides_zero() {
        assert_eq!(display_grade("0"), "");
        assert_eq!(display_grade("15"), "15");
        assert_eq!(display_grade(""), "");
    }

    #[test]
    fn test_add_flow_persists_and_clears_drafts() {
        let (mut app, store) = new_app();

        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "math");
        assert_eq!(app.draft_name, "Math");

        app.dispatch(Action::Submit); // 进入成绩字段
        assert_eq!(app.input_field, InputField::Grade);
        type_str(&mut app, "18");
        assert_eq!(app.draft_grade, "18");

        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.list.subjects[0].id, 0);
        assert_eq!(app.list.subjects[0].name, "Math");
        assert!(app.draft_name.is_empty());
        assert!(app.draft_grade.is_empty());

        // 每次变更都已写回存储
        assert_eq!(store.saved.borrow().len(), 1);
    }

    #[test]
    fn test_submit_disabled_until_both_fields_filled() {
        let (mut app, store) = new_app();

        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Art");
        app.dispatch(Action::Submit);

        // 成绩为空，提交不生效
        assert!(!app.add_enabled());
        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::AddingSubject);
        assert!(app.list.is_empty());
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn test_confirm_add_only_checks_name() {
        // 成绩为空的拦截在提交入口，函数本身只看科目名
        let (mut app, _store) = new_app();
        app.mode = AppMode::AddingSubject;
        app.draft_name = "Art".to_string();
        app.confirm_add_subject();
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.list.subjects[0].grade, "");

        app.mode = AppMode::AddingSubject;
        app.draft_name = "  ".to_string();
        app.confirm_add_subject();
        assert_eq!(app.list.len(), 1);
    }

    #[test]
    fn test_backspace_to_empty_keeps_zero_draft() {
        let (mut app, _store) = new_app();

        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Math");
        app.dispatch(Action::SwitchField);
        type_str(&mut app, "5");
        app.dispatch(Action::DeleteChar);

        // 删空后草稿为 "0"（非空），显示为空
        assert_eq!(app.draft_grade, "0");
        assert_eq!(display_grade(&app.draft_grade), "");
        assert!(app.add_enabled());

        // 再输入从空白显示值续写
        app.dispatch(Action::Input('7'));
        assert_eq!(app.draft_grade, "7");

        // 未输入过成绩时退格不产生 "0"
        app.dispatch(Action::StartAddSubject);
        app.dispatch(Action::SwitchField);
        app.dispatch(Action::DeleteChar);
        assert_eq!(app.draft_grade, "");
    }

    #[test]
    fn test_add_remove_sequence_reuses_id() {
        let (mut app, store) = new_app();

        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Math");
        app.dispatch(Action::SwitchField);
        type_str(&mut app, "18");
        app.dispatch(Action::Submit);

        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Art");
        app.dispatch(Action::SwitchField);
        type_str(&mut app, "12");
        app.dispatch(Action::Submit);

        assert_eq!(app.list.subjects[0].id, 0);
        assert_eq!(app.list.subjects[1].id, 1);

        // 删除 id 0，剩余条目不重新编号
        app.selected_index = 0;
        app.dispatch(Action::RemoveSelected);
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.list.subjects[0].id, 1);
        assert_eq!(app.list.subjects[0].name, "Art");
        assert_eq!(app.list.subjects[0].grade, "12");

        // 随后的添加再次得到 id 1
        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Music");
        app.dispatch(Action::SwitchField);
        type_str(&mut app, "9");
        app.dispatch(Action::Submit);
        assert_eq!(app.list.subjects[1].id, 1);

        assert_eq!(store.saved.borrow().len(), 4);
    }

    #[test]
    fn test_cancel_clears_drafts() {
        let (mut app, _store) = new_app();
        app.dispatch(Action::StartAddSubject);
        type_str(&mut app, "Math");
        app.dispatch(Action::Cancel);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.draft_name.is_empty());
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_selection_clamped_after_remove() {
        let (mut app, _store) = new_app();
        for (name, grade) in [("Math", "10"), ("Art", "12"), ("Music", "14")] {
            app.dispatch(Action::StartAddSubject);
            type_str(&mut app, name);
            app.dispatch(Action::SwitchField);
            type_str(&mut app, grade);
            app.dispatch(Action::Submit);
        }

        app.selected_index = 2;
        app.dispatch(Action::RemoveSelected);
        assert_eq!(app.selected_index, 1);
    }
}
