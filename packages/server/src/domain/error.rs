//! Domain 層のエラー定義

use thiserror::Error;

/// Value Object の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("client id must not be empty")]
    EmptyClientId,
    #[error("client id is too long: {0} characters")]
    ClientIdTooLong(usize),
}

/// 永続化層（メッセージ / 動画メタデータのストア）のエラー
///
/// セッション層にとって致命的ではない。チャットと在席数の配送は
/// メモリのみのモードに縮退して継続する。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

/// メディアストレージ（アップロードされたバイナリの保存先）のエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// メッセージ送信（push / broadcast）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client not found: {0}")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
    #[error("failed to serialize event: {0}")]
    Serialize(String),
}
