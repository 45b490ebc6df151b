//! Value Object 定義
//!
//! 生成時にバリデーションを行い、不正な値を型レベルで排除します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// PIN の桁数
pub const PIN_LENGTH: usize = 4;

/// 割り当て可能な最小の PIN（先頭 0 の PIN は使わない）
pub const PIN_MIN: u16 = 1000;

/// 割り当て可能な最大の PIN
pub const PIN_MAX: u16 = 9999;

/// 同時に存在できる Room の数（PIN 空間の大きさ）
pub const PIN_SPACE: usize = (PIN_MAX - PIN_MIN + 1) as usize;

/// 接続 ID
///
/// WebSocket のアップグレードが成功した時点で採番されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// ランダムな接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room の PIN（4 桁の数字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(String);

impl Pin {
    /// 文字列から PIN を生成
    ///
    /// 前後の空白は取り除きます。ちょうど 4 桁の ASCII 数字でなければエラーです。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.len() != PIN_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValueObjectError::InvalidPin(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 数値から PIN を生成（`PIN_MIN..=PIN_MAX` の範囲のみ）
    pub fn from_number(value: u16) -> Result<Self, ValueObjectError> {
        if !(PIN_MIN..=PIN_MAX).contains(&value) {
            return Err(ValueObjectError::InvalidPin(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Pin {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// プレイヤー名
///
/// クライアントが送ってきた文字列をそのまま保持します（空文字も受け付ける）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 送信キューに積まれる 1 フレーム分のデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Binary(value)
    }
}
