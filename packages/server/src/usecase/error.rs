//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{StorageError, StoreError};

/// Upload Intake Pipeline のエラー
///
/// 検証エラー（NoFile / TooLarge / UnsupportedType）は副作用なしで
/// 同期的に報告される。Storage / Persistence はサーバエラーとして
/// 報告され、ブロードキャストは行われない。
#[derive(Debug, Error)]
pub enum IngestError {
    /// バイナリペイロードが存在しない
    #[error("no video file provided")]
    NoFile,
    /// 設定された上限を超えるペイロード
    #[error("file exceeds the maximum upload size of {limit} bytes")]
    TooLarge { limit: u64 },
    /// 拡張子または content type が許可されていない
    #[error("unsupported video type (extension: '{extension}', content type: '{content_type}')")]
    UnsupportedType {
        extension: String,
        content_type: String,
    },
    /// アップロードボディの読み取り失敗（クライアント切断など）
    #[error("failed to read upload body: {0}")]
    BodyRead(String),
    /// メディアストレージへの書き込み失敗
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// メタデータの永続化失敗
    #[error("failed to persist video metadata: {0}")]
    Persistence(#[from] StoreError),
}

/// 履歴取得（メッセージ / 動画一覧）のエラー
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
