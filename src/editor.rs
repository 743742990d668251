use std::path::Path;

use crate::{
    buffer::Buffer,
    config::{Config, EndKey},
    cursor::{Cursor, Viewport},
    error::Result,
    file_io::FileIO,
    key::Key,
};

/// メインループの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    Terminated,
}

pub struct Editor {
    buffer: Buffer,
    cursor: Cursor,
    viewport: Viewport,
    config: Config,
}

impl Editor {
    pub fn new(config: Config, screen_rows: usize, screen_cols: usize) -> Self {
        Self::from_buffer(Buffer::new(config.tab_stop), config, screen_rows, screen_cols)
    }

    pub fn from_buffer(
        buffer: Buffer,
        config: Config,
        screen_rows: usize,
        screen_cols: usize,
    ) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            viewport: Viewport::new(screen_rows, screen_cols),
            config,
        }
    }

    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let buffer = FileIO::open(path, self.config.tab_stop)?;
        // Editor のプロパティを更新する
        self.buffer = buffer;
        self.cursor = Cursor::new();
        self.viewport = Viewport::new(self.viewport.screen_rows(), self.viewport.screen_cols());
        Ok(())
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// キー入力に応じてカーソルを動かす
    pub fn process_key(&mut self, key: Key) -> Flow {
        let buffer = &self.buffer;
        let cursor = &mut self.cursor;

        match key {
            Key::Quit => {
                tracing::info!("quit");
                return Flow::Terminated;
            }
            Key::ArrowUp => cursor.move_up(buffer),
            Key::ArrowDown => cursor.move_down(buffer),
            Key::ArrowLeft => cursor.move_left(buffer),
            Key::ArrowRight => cursor.move_right(buffer),
            Key::Home => cursor.move_to_line_start(),
            Key::End => {
                let col = match self.config.end_key {
                    EndKey::LineEnd => buffer.line_len(cursor.cy()),
                    EndKey::ScreenEdge => self.viewport.screen_cols().saturating_sub(1),
                };
                cursor.move_to_col(col, buffer);
            }
            Key::PageUp => {
                for _ in 0..self.viewport.screen_rows() {
                    cursor.move_up(buffer);
                }
            }
            Key::PageDown => {
                for _ in 0..self.viewport.screen_rows() {
                    cursor.move_down(buffer);
                }
            }
            // テキスト編集は未対応
            Key::Delete | Key::Escape | Key::Char(_) => {}
        }
        Flow::Running
    }

    /// 描画直前のスクロール位置の再計算
    pub fn scroll(&mut self) {
        self.viewport.scroll(&mut self.cursor, &self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(lines: &[&str], rows: usize, cols: usize) -> Editor {
        let buffer = Buffer::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 4);
        Editor::from_buffer(buffer, Config::default(), rows, cols)
    }

    fn pos(editor: &Editor) -> (usize, usize) {
        (editor.cursor().cy(), editor.cursor().cx())
    }

    #[test]
    fn test_editor_new() {
        let editor = Editor::new(Config::default(), 24, 80);
        assert!(editor.buffer().is_empty());
        assert_eq!(pos(&editor), (0, 0));
    }

    #[test]
    fn test_quit_terminates() {
        let mut editor = editor(&["a"], 5, 10);
        assert_eq!(editor.process_key(Key::Char(b'x')), Flow::Running);
        assert_eq!(editor.process_key(Key::Quit), Flow::Terminated);
    }

    #[test]
    fn test_arrow_right_across_rows() {
        let mut editor = editor(&["hello", "", "0123456789"], 5, 10);
        for _ in 0..5 {
            editor.process_key(Key::ArrowRight);
        }
        assert_eq!(pos(&editor), (0, 5));

        editor.process_key(Key::ArrowRight);
        assert_eq!(pos(&editor), (1, 0));
        editor.process_key(Key::ArrowRight);
        assert_eq!(pos(&editor), (2, 0));
    }

    #[test]
    fn test_home_and_end() {
        let mut editor = editor(&["hello", "0123456789abcdef"], 5, 10);

        editor.process_key(Key::End);
        assert_eq!(pos(&editor), (0, 5));

        editor.process_key(Key::Home);
        assert_eq!(pos(&editor), (0, 0));

        editor.process_key(Key::ArrowDown);
        editor.process_key(Key::End);
        assert_eq!(pos(&editor), (1, 16));
    }

    #[test]
    fn test_end_screen_edge_is_clamped() {
        let buffer = Buffer::from_lines(vec![b"abc".to_vec(), b"0123456789abcdef".to_vec()], 4);
        let config = Config {
            end_key: EndKey::ScreenEdge,
            ..Config::default()
        };
        let mut editor = Editor::from_buffer(buffer, config, 5, 10);

        editor.process_key(Key::End);
        assert_eq!(pos(&editor), (0, 3));

        editor.process_key(Key::ArrowDown);
        editor.process_key(Key::End);
        assert_eq!(pos(&editor), (1, 9));
    }

    #[test]
    fn test_page_down_and_up() {
        let lines = ["x"; 12];
        let mut editor = editor(&lines, 5, 10);

        editor.process_key(Key::PageDown);
        assert_eq!(pos(&editor), (5, 0));
        editor.process_key(Key::PageDown);
        editor.process_key(Key::PageDown);
        // ファイル末尾の次の行で止まる
        assert_eq!(pos(&editor), (12, 0));

        editor.process_key(Key::PageUp);
        assert_eq!(pos(&editor), (7, 0));
        editor.process_key(Key::PageUp);
        editor.process_key(Key::PageUp);
        assert_eq!(pos(&editor), (0, 0));
    }

    #[test]
    fn test_delete_and_escape_do_nothing() {
        let mut editor = editor(&["abc"], 5, 10);
        editor.process_key(Key::ArrowRight);

        editor.process_key(Key::Delete);
        editor.process_key(Key::Escape);
        editor.process_key(Key::Char(b'z'));

        assert_eq!(pos(&editor), (0, 1));
        assert_eq!(editor.buffer().row(0).unwrap().chars(), b"abc");
    }

    #[test]
    fn test_scroll_follows_page_down() {
        let lines = ["x"; 30];
        let mut editor = editor(&lines, 5, 10);

        editor.process_key(Key::PageDown);
        editor.process_key(Key::PageDown);
        editor.scroll();

        assert_eq!(editor.cursor().cy(), 10);
        assert_eq!(editor.viewport().row_offset(), 6);
    }
}
