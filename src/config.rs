use std::time::Duration;

use crate::{ESCAPE_TIMEOUT, FILLER, TAB_STOP};

/// END キーの挙動
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndKey {
    /// 行末へ移動
    #[default]
    LineEnd,
    /// 画面右端 (screen_cols - 1) へ移動。移動後は行末にクランプされる
    ScreenEdge,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tab_stop: usize,
    /// エスケープシーケンスの続きを待つ時間
    pub escape_timeout: Duration,
    pub filler: u8,
    pub end_key: EndKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: TAB_STOP,
            escape_timeout: ESCAPE_TIMEOUT,
            filler: FILLER,
            end_key: EndKey::default(),
        }
    }
}
