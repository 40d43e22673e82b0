//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use super::logic::display_grade;
use super::state::{App, AppMode, InputField};
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 科目表格
            Constraint::Length(3), // 最终成绩
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_subjects(frame, app, chunks[1]);
    render_final_grade(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    if app.mode == AppMode::AddingSubject {
        render_add_dialog(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("📘 我的成绩单")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_subjects(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.list.is_empty() {
        let hint = Paragraph::new("暂无科目，按 'a' 添加第一门课")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("科目列表").borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    }

    let rows: Vec<Row> = app
        .list
        .subjects
        .iter()
        .map(|s| Row::new(vec![s.name.clone(), s.grade.clone()]))
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(60), Constraint::Percentage(40)],
    )
    .header(
        Row::new(vec!["科目", "成绩"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Block::default().title("科目列表").borders(Borders::ALL))
    .row_highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    );

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}

/// 仅在列表非空时显示最终成绩，按是否超过中线 10 分着色
fn render_final_grade(frame: &mut Frame, app: &App, area: Rect) {
    if app.list.is_empty() {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    }

    let average = app.list.final_grade();
    let line = Line::from(vec![
        Span::raw("最终成绩 : "),
        Span::styled(
            format!("{:.2}", average),
            Style::default()
                .fg(final_grade_color(average))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let summary = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(summary, area);
}

/// 严格大于 10 为绿色，否则红色
fn final_grade_color(average: f64) -> Color {
    if average > 10.0 {
        Color::Green
    } else {
        Color::Red
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Normal => "[a] 添加  [d] 删除  [j/k] 导航  [q] 退出",
        AppMode::AddingSubject => "[Tab] 切换字段  [Enter] 下一步/添加  [Esc] 取消",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 45, frame.area());
    let inner = render_dialog_framework(frame, area, "添加科目");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    // 科目名输入（只接受字母）
    render_input_widget(
        frame,
        chunks[0],
        "科目",
        &app.draft_name,
        "请输入科目",
        app.input_field == InputField::Name,
    );

    // 成绩输入（草稿为 "0" 时显示为空）
    render_input_widget(
        frame,
        chunks[1],
        "成绩",
        display_grade(&app.draft_grade),
        "请输入成绩 (0-20)",
        app.input_field == InputField::Grade,
    );

    // 两个字段都填好之前，提交提示呈置灰的禁用样式
    let (hint, hint_style) = if app.add_enabled() {
        (
            "按 [Enter] 添加该科目",
            Style::default().fg(Color::Green),
        )
    } else {
        (
            "填写科目和成绩后才能添加",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(hint).style(hint_style), chunks[2]);
}
