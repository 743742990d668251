use std::io::{self, Write};

use crate::VERSION;
use crate::buffer::Buffer;
use crate::cursor::{Cursor, Viewport};
use crate::editor::Editor;
use crate::error::{EditorError, Result};

pub struct Screen;

impl Screen {
    pub fn welcome_message() -> String {
        format!("Grass Editor -- version {}", VERSION)
    }

    fn draw_welcome(frame: &mut Vec<u8>, cols: usize, filler: u8) {
        let welcome = Self::welcome_message();
        let len = welcome.len().min(cols);
        let mut padding = (cols - len) / 2;

        // 左端は他の行と同じくフィラー
        if padding > 0 {
            frame.push(filler);
            padding -= 1;
        }
        frame.extend(std::iter::repeat_n(b' ', padding));
        frame.extend_from_slice(&welcome.as_bytes()[..len]);
    }

    pub fn draw_rows(
        frame: &mut Vec<u8>,
        buffer: &Buffer,
        viewport: &Viewport,
        filler: u8,
    ) -> io::Result<()> {
        let rows = viewport.screen_rows();
        let cols = viewport.screen_cols();

        for y in 0..rows {
            let file_row = y + viewport.row_offset();

            match buffer.row(file_row) {
                Some(row) => {
                    // 列オフセット以降を画面幅に切り詰める
                    let render = row.render();
                    let start = viewport.col_offset().min(render.len());
                    let end = (start + cols).min(render.len());
                    frame.extend_from_slice(&render[start..end]);
                }
                None if buffer.is_empty() && y == rows / 3 => {
                    Self::draw_welcome(frame, cols, filler);
                }
                None => frame.push(filler),
            }

            // 行末までクリア
            write!(frame, "{}", termion::clear::UntilNewline)?;

            if y + 1 < rows {
                frame.extend_from_slice(b"\r\n");
            }
        }
        Ok(())
    }

    /// 1 フレーム分の出力を組み立てる
    pub fn compose(
        buffer: &Buffer,
        cursor: &Cursor,
        viewport: &Viewport,
        filler: u8,
    ) -> io::Result<Vec<u8>> {
        let mut frame = Vec::new();

        // カーソルを隠す
        write!(frame, "{}", termion::cursor::Hide)?;
        // カーソルを左上に移動
        write!(frame, "{}", termion::cursor::Goto(1, 1))?;

        Self::draw_rows(&mut frame, buffer, viewport, filler)?;

        // カーソル位置に移動 (1 始まり)
        let (y, x) = viewport.screen_position(cursor);
        let x = u16::try_from(x + 1).unwrap_or(u16::MAX);
        let y = u16::try_from(y + 1).unwrap_or(u16::MAX);
        write!(frame, "{}", termion::cursor::Goto(x, y))?;

        write!(frame, "{}", termion::cursor::Show)?;
        Ok(frame)
    }

    /// スクロール位置を再計算してから 1 回の書き込みで描画する
    pub fn refresh(stdout: &mut impl Write, editor: &mut Editor) -> Result<()> {
        editor.scroll();

        Self::compose(
            editor.buffer(),
            editor.cursor(),
            editor.viewport(),
            editor.config().filler,
        )
        .and_then(|frame| {
            stdout.write_all(&frame)?;
            stdout.flush()
        })
        .map_err(|e| EditorError::terminal_mode("write", e))
    }
}
