use std::io;
use std::time::Duration;

use crate::QUIT_KEY;
use crate::error::{EditorError, Result};

const ESC: u8 = 0x1b;

/// 入力を解釈した結果のキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    /// 単独の ESC、または解釈できなかったエスケープシーケンス
    Escape,
    Quit,
}

/// 端末からの 1 バイト読み込み
pub trait ByteSource {
    /// `timeout` 以内にバイトが来なければ `Ok(None)`
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Esc,
    /// ESC [
    EscBracket,
    /// ESC O
    EscO,
    /// ESC [ <digit>
    EscBracketDigit(u8),
}

/// エスケープシーケンスを含むバイト列をキーに変換する状態機械
///
/// 1 シーケンスにつき最大 1 つのキーを返し、ESC の後は最大 3 バイトまでしか読まない
#[derive(Debug)]
pub struct KeyDecoder {
    state: State,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// シーケンスの途中か
    pub fn is_pending(&self) -> bool {
        self.state != State::Idle
    }

    /// 1 バイト進める。キーが確定したら返す
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        let (next, key) = match self.state {
            State::Idle => match byte {
                ESC => (State::Esc, None),
                QUIT_KEY => (State::Idle, Some(Key::Quit)),
                b => (State::Idle, Some(Key::Char(b))),
            },
            State::Esc => match byte {
                b'[' => (State::EscBracket, None),
                b'O' => (State::EscO, None),
                _ => (State::Idle, Some(Key::Escape)),
            },
            State::EscO => {
                let key = match byte {
                    b'H' => Key::Home,
                    b'F' => Key::End,
                    _ => Key::Escape,
                };
                (State::Idle, Some(key))
            }
            State::EscBracket => match byte {
                b'0'..=b'9' => (State::EscBracketDigit(byte), None),
                b'A' => (State::Idle, Some(Key::ArrowUp)),
                b'B' => (State::Idle, Some(Key::ArrowDown)),
                b'C' => (State::Idle, Some(Key::ArrowRight)),
                b'D' => (State::Idle, Some(Key::ArrowLeft)),
                b'H' => (State::Idle, Some(Key::Home)),
                b'F' => (State::Idle, Some(Key::End)),
                _ => (State::Idle, Some(Key::Escape)),
            },
            State::EscBracketDigit(digit) => {
                let key = if byte == b'~' {
                    match digit {
                        b'1' | b'7' => Key::Home,
                        b'3' => Key::Delete,
                        b'4' | b'8' => Key::End,
                        b'5' => Key::PageUp,
                        b'6' => Key::PageDown,
                        _ => Key::Escape,
                    }
                } else {
                    Key::Escape
                };
                (State::Idle, Some(key))
            }
        };
        self.state = next;
        key
    }

    /// 続きのバイトが来なかった場合。シーケンス途中なら ESC 単独押下とみなす
    pub fn timeout(&mut self) -> Option<Key> {
        if self.is_pending() {
            self.state = State::Idle;
            Some(Key::Escape)
        } else {
            None
        }
    }
}

/// バイト列をまとめてデコードする。末尾の未完了シーケンスはタイムアウト扱い
pub fn decode_all(bytes: &[u8]) -> Vec<Key> {
    let mut decoder = KeyDecoder::new();
    let mut keys: Vec<Key> = bytes.iter().filter_map(|&b| decoder.feed(b)).collect();
    keys.extend(decoder.timeout());
    keys
}

/// 次のキーを 1 つ読む
///
/// 最初のバイトはタイムアウトしても待ち続ける。シーケンスの途中でタイムアウトしたら
/// [`Key::Escape`] を返す。読み込みエラーはそのまま返す (リトライしない)
pub fn read_key<S: ByteSource>(source: &mut S, timeout: Duration) -> Result<Key> {
    let mut decoder = KeyDecoder::new();

    loop {
        let byte = source
            .read_byte(timeout)
            .map_err(|e| EditorError::input_read("read", e))?;

        let key = match byte {
            Some(b) => decoder.feed(b),
            None => decoder.timeout(),
        };

        if let Some(key) = key {
            tracing::trace!(?key, "key_decoded");
            return Ok(key);
        }
    }
}
