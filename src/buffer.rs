/// ファイルの 1 行
///
/// `render` は常に `chars` のタブを展開したもの。両者は [`Row::new`] でのみ設定する
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    pub fn new(chars: Vec<u8>, tab_stop: usize) -> Self {
        let render = render_of(&chars, tab_stop);
        Self { chars, render }
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// 描画幅
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// 文字位置 (cx) を描画位置 (rx) に変換する
    ///
    /// タブは次の `tab_stop` の倍数まで進み、それ以外は 1 列。
    /// 行末を超える `cx` は行末として扱う
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.chars
            .iter()
            .take(cx)
            .fold(0, |rx, &b| if b == b'\t' { rx + tab_stop - rx % tab_stop } else { rx + 1 })
    }
}

/// タブを展開し、タブ直後の列が `tab_stop` の倍数になるようにする
pub fn render_of(chars: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(chars.len() + tabs * (tab_stop - 1));

    for &b in chars {
        if b == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(b);
        }
    }
    render
}

/// ドキュメント全体 (ファイルの全行)
pub struct Buffer {
    rows: Vec<Row>,
    tab_stop: usize,
}

impl Buffer {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop,
        }
    }

    pub fn from_lines<I>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut buffer = Self::new(tab_stop);
        for line in lines {
            buffer.append_row(line);
        }
        buffer
    }

    pub fn append_row(&mut self, chars: Vec<u8>) {
        self.rows.push(Row::new(chars, self.tab_stop));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// 指定行の長さ。ファイル末尾より下の行は 0
    pub fn line_len(&self, row: usize) -> usize {
        self.row(row).map(Row::len).unwrap_or(0)
    }

    /// 指定行での cx → rx 変換。存在しない行では 0
    pub fn cx_to_rx(&self, row: usize, cx: usize) -> usize {
        self.row(row)
            .map(|r| r.cx_to_rx(cx, self.tab_stop))
            .unwrap_or(0)
    }
}
