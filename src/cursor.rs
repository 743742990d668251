use crate::buffer::Buffer;

/// カーソル位置
///
/// `cx` は文字位置 (タブ展開前)、`rx` は描画位置。`cy` は 0..=行数 の範囲で、
/// 行数と等しいときはファイル末尾の次の空行を指す
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    cx: usize,
    cy: usize,
    rx: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(cy: usize, cx: usize) -> Self {
        Self { cx, cy, rx: 0 }
    }

    pub fn cx(&self) -> usize {
        self.cx
    }

    pub fn cy(&self) -> usize {
        self.cy
    }

    pub fn rx(&self) -> usize {
        self.rx
    }

    pub fn move_up(&mut self, buffer: &Buffer) {
        if self.cy > 0 {
            self.cy -= 1;
        }
        self.snap(buffer);
    }

    pub fn move_down(&mut self, buffer: &Buffer) {
        // ファイル末尾の次の行までは移動できる
        if self.cy < buffer.len() {
            self.cy += 1;
        }
        self.snap(buffer);
    }

    pub fn move_left(&mut self, buffer: &Buffer) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            // 前の行の末尾へ
            self.cy -= 1;
            self.cx = buffer.line_len(self.cy);
        }
        self.snap(buffer);
    }

    pub fn move_right(&mut self, buffer: &Buffer) {
        if let Some(row) = buffer.row(self.cy) {
            if self.cx < row.len() {
                self.cx += 1;
            } else {
                // 次の行の先頭へ
                self.cy += 1;
                self.cx = 0;
            }
        }
        self.snap(buffer);
    }

    pub fn move_to_line_start(&mut self) {
        self.cx = 0;
    }

    pub fn move_to_col(&mut self, cx: usize, buffer: &Buffer) {
        self.cx = cx;
        self.snap(buffer);
    }

    /// cx を現在行の長さに収める
    pub fn snap(&mut self, buffer: &Buffer) {
        self.cy = self.cy.min(buffer.len());
        self.cx = self.cx.min(buffer.line_len(self.cy));
    }

    fn update_rx(&mut self, buffer: &Buffer) {
        self.rx = buffer.cx_to_rx(self.cy, self.cx);
    }
}

/// 表示領域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    row_offset: usize,
    col_offset: usize,
    screen_rows: usize,
    screen_cols: usize,
}

impl Viewport {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows,
            screen_cols,
        }
    }

    pub fn with_offsets(mut self, row_offset: usize, col_offset: usize) -> Self {
        self.row_offset = row_offset;
        self.col_offset = col_offset;
        self
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    /// 描画前に呼ぶ。カーソルが表示領域に入るよう、最小限だけオフセットを動かす
    pub fn scroll(&mut self, cursor: &mut Cursor, buffer: &Buffer) {
        cursor.update_rx(buffer);

        if cursor.cy < self.row_offset {
            self.row_offset = cursor.cy;
        }
        if cursor.cy >= self.row_offset + self.screen_rows {
            self.row_offset = (cursor.cy + 1).saturating_sub(self.screen_rows);
        }
        if cursor.rx < self.col_offset {
            self.col_offset = cursor.rx;
        }
        if cursor.rx >= self.col_offset + self.screen_cols {
            self.col_offset = (cursor.rx + 1).saturating_sub(self.screen_cols);
        }
    }

    /// 画面上のカーソル位置 (0 始まり, 行, 列)
    pub fn screen_position(&self, cursor: &Cursor) -> (usize, usize) {
        (
            cursor.cy.saturating_sub(self.row_offset),
            cursor.rx.saturating_sub(self.col_offset),
        )
    }
}
