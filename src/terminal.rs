#![allow(unsafe_code)]

use std::io::{self, Stdout, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

use termion::raw::{IntoRawMode, RawTerminal};

use crate::error::{EditorError, Result};
use crate::key::ByteSource;

/// カーソル位置報告の最大長 (ESC [ rows ; cols R)
const CURSOR_REPORT_MAX: usize = 31;

/// 端末サイズ (行数, 列数)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// raw mode の端末
///
/// 生成時に raw mode に入り、drop 時に画面をクリアしてから元の設定に戻す。
/// 戻す処理は `RawTerminal` の drop で一度だけ行われる
pub struct Terminal {
    stdout: RawTerminal<Stdout>,
    input: TtyInput,
    size: Size,
}

impl Terminal {
    pub fn new(timeout: Duration) -> Result<Self> {
        let stdout = io::stdout()
            .into_raw_mode()
            .map_err(|e| EditorError::terminal_mode("tcsetattr", e))?;
        let mut terminal = Self {
            stdout,
            input: TtyInput::new(),
            size: Size { rows: 0, cols: 0 },
        };
        terminal.size = window_size(&mut terminal.stdout, &mut terminal.input, timeout)?;
        Ok(terminal)
    }

    pub fn stdout(&mut self) -> &mut RawTerminal<Stdout> {
        &mut self.stdout
    }

    pub fn input(&mut self) -> &mut TtyInput {
        &mut self.input
    }

    pub fn rows(&self) -> u16 {
        self.size.rows
    }

    pub fn cols(&self) -> u16 {
        self.size.cols
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        clear_screen(&mut self.stdout)
    }
}

/// 画面全体をクリアしてカーソルを左上に戻す
///
/// raw mode に入る前の失敗でも使えるよう、任意の出力先に書き込む
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(
        out,
        "{}{}",
        termion::clear::All,
        termion::cursor::Goto(1, 1)
    )?;
    out.flush()
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // 終了時の画面クリア。端末設定の復元は stdout の drop で行われる
        let _ = self.clear_screen();
    }
}

/// 標準入力から 1 バイトずつ読む
///
/// std の `Stdin` は内部でバッファリングするため、poll と組み合わせるには
/// ファイルディスクリプタを直接読む
pub struct TtyInput {
    fd: RawFd,
}

impl Default for TtyInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TtyInput {
    pub fn new() -> Self {
        Self::from_fd(io::stdin().as_raw_fd())
    }

    /// 任意のファイルディスクリプタから読む。fd の所有権は持たない
    pub fn from_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl ByteSource for TtyInput {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };

        let ready = unsafe { libc::poll(&raw mut pfd, 1, timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            // シグナルによる中断はタイムアウトと同じ扱い
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&raw mut byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

/// 端末サイズを取得する
///
/// ioctl で取得できない場合は、カーソルを右下端に移動して位置を問い合わせる
pub fn window_size<W: Write, S: ByteSource>(
    out: &mut W,
    input: &mut S,
    timeout: Duration,
) -> Result<Size> {
    match termion::terminal_size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => {
            tracing::info!(rows, cols, fallback = false, "window_size");
            Ok(Size { rows, cols })
        }
        _ => {
            let size = query_cursor_position(out, input, timeout)?;
            tracing::info!(rows = size.rows, cols = size.cols, fallback = true, "window_size");
            Ok(size)
        }
    }
}

/// `ESC [ 999 C ESC [ 999 B` で右下端へ移動し、`ESC [ 6 n` で位置を問い合わせる
pub fn query_cursor_position<W: Write, S: ByteSource>(
    out: &mut W,
    input: &mut S,
    timeout: Duration,
) -> Result<Size> {
    out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")
        .and_then(|_| out.flush())
        .map_err(|e| EditorError::terminal_mode("write", e))?;

    let mut report = Vec::with_capacity(CURSOR_REPORT_MAX);
    while report.len() < CURSOR_REPORT_MAX {
        let byte = input
            .read_byte(timeout)
            .map_err(|e| EditorError::input_read("read", e))?;
        match byte {
            Some(b'R') | None => break,
            Some(b) => report.push(b),
        }
    }

    parse_cursor_report(&report)
        .ok_or_else(|| EditorError::window_size("getCursorPosition", "malformed cursor position report"))
}

/// `ESC [ rows ; cols` (終端の R は除く) を解釈する
pub fn parse_cursor_report(report: &[u8]) -> Option<Size> {
    let body = report.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    let size = Size {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    };
    (size.rows > 0 && size.cols > 0).then_some(size)
}
