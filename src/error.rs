use std::io;
use std::panic::Location;

use thiserror::Error;

/// 回復不能なエラー
///
/// どれも発生した時点で処理を打ち切り、画面をクリアしてから報告する。
/// `op` は失敗した呼び出し名、`location` はその呼び出し位置
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Call {op} failed in {location}")]
    TerminalMode {
        op: &'static str,
        location: &'static Location<'static>,
        #[source]
        source: io::Error,
    },

    #[error("Call {op} failed in {location}: {reason}")]
    WindowSize {
        op: &'static str,
        location: &'static Location<'static>,
        reason: String,
    },

    #[error("Call {op} failed in {location}")]
    InputRead {
        op: &'static str,
        location: &'static Location<'static>,
        #[source]
        source: io::Error,
    },

    #[error("Call {op} failed in {location} ({path})")]
    FileLoad {
        op: &'static str,
        path: String,
        location: &'static Location<'static>,
        #[source]
        source: io::Error,
    },
}

impl EditorError {
    #[track_caller]
    pub fn terminal_mode(op: &'static str, source: io::Error) -> Self {
        Self::TerminalMode {
            op,
            location: Location::caller(),
            source,
        }
    }

    #[track_caller]
    pub fn window_size(op: &'static str, reason: impl Into<String>) -> Self {
        Self::WindowSize {
            op,
            location: Location::caller(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn input_read(op: &'static str, source: io::Error) -> Self {
        Self::InputRead {
            op,
            location: Location::caller(),
            source,
        }
    }

    #[track_caller]
    pub fn file_load(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::FileLoad {
            op,
            path: path.into(),
            location: Location::caller(),
            source,
        }
    }

    /// 失敗した呼び出し名
    pub fn op(&self) -> &'static str {
        match self {
            Self::TerminalMode { op, .. }
            | Self::WindowSize { op, .. }
            | Self::InputRead { op, .. }
            | Self::FileLoad { op, .. } => *op,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
