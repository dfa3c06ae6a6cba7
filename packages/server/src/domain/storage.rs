//! メディアストレージの trait 定義
//!
//! アップロードされた動画バイナリの保存先のインターフェース。
//! 具体的な実装（ローカルディスクなど）は Infrastructure 層が提供します。
//!
//! バイナリはストリーミングで書き込む。サイズ検査は呼び出し側
//! （Upload Intake Pipeline）が行い、超過や切断を検知した時点で
//! `discard` により書きかけのファイルを破棄する。

use async_trait::async_trait;

use super::error::StorageError;

/// 1 つのアップロード先への書き込みシンク
#[async_trait]
pub trait MediaSink: Send {
    /// チャンクを追記する
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StorageError>;

    /// 書き込みを完了し、バッファをフラッシュする
    async fn finish(&mut self) -> Result<(), StorageError>;
}

/// メディアストレージ
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// 指定した名前で新しい書き込み先を作成する
    async fn create(&self, filename: &str) -> Result<Box<dyn MediaSink>, StorageError>;

    /// 書きかけ・不要になったファイルを破棄する（存在しなくてもエラーにしない）
    async fn discard(&self, filename: &str) -> Result<(), StorageError>;
}
