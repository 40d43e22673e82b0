mod models;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::storage::{FileStore, SubjectStore};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/gradebook/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("gradebook");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

fn main() -> io::Result<()> {
    // 数据文件路径 (~/.local/share/gradebook/subject_list.toml)
    let data_path = get_data_dir()?.join("subject_list.toml");

    // 加载科目列表（文件损坏时在此处告警并按空列表继续）
    let store = FileStore::new(data_path.clone());
    let list = store.load()?;

    // 创建应用状态，加载结果立即写回一次
    let mut app = App::new(list, Box::new(store));
    app.persist();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    println!("成绩已保存到 {}", data_path.display());

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
