pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod key;
pub mod logger;
pub mod screen;
pub mod terminal;

use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 描画
pub const TAB_STOP: usize = 4;
pub const FILLER: u8 = b'@';

// 入力
pub const ESCAPE_TIMEOUT: Duration = Duration::from_secs(1);

/// Ctrl と組み合わせたキーのバイト値
pub const fn ctrl_key(k: u8) -> u8 {
    k & 0x1f
}

pub const QUIT_KEY: u8 = ctrl_key(b'q');
