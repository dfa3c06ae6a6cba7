//! Value Object 定義
//!
//! セッション層で使う値オブジェクト。生成時に不変条件を検証し、
//! 以降は不変として扱います。

use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// 接続ごとに一意なクライアント ID
///
/// 接続のたびにサーバ側で生成される不透明な識別子。
/// 永続化されることはなく、接続のライフサイクルとともに破棄される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    /// 最大長（UUID より十分長い余裕を持たせる）
    const MAX_LENGTH: usize = 64;

    /// 新しい ClientId を作成（検証付き）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyClientId);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ValueObjectError::ClientIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    /// 接続用の ClientId をサーバ側で生成
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 表示名
///
/// 空の表示名はプレースホルダ名 "anonymous" に置き換えられる。
/// それ以外のフィルタリングは行わない（入力サニタイズは非目標）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// 空の表示名に使うプレースホルダ
    pub const ANONYMOUS: &str = "anonymous";

    /// 新しい Username を作成（空なら "anonymous" にフォールバック）
    pub fn new(value: String) -> Self {
        if value.trim().is_empty() {
            Self(Self::ANONYMOUS.to_string())
        } else {
            Self(value)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// チャットメッセージ本文
///
/// 空文字列もそのまま受け入れる（長さ制限・内容フィルタリングなし）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
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

/// Unix タイムスタンプ（ミリ秒、UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
