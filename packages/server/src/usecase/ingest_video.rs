//! UseCase: 動画アップロードの受け入れ処理（Upload Intake Pipeline）
//!
//! ## 処理の流れ
//!
//! 1. 拡張子と content type の検証（両方を満たさなければ拒否）
//! 2. 衝突しにくいストレージファイル名の生成
//!    （ミリ秒タイムスタンプ + ランダムな salt + 元の拡張子）
//! 3. バイナリをストリーミングでメディアストレージに書き込み
//!    （サイズ上限はチャンクごとに検査し、超過した時点で中断・破棄。
//!    ペイロード全体をメモリに溜め込むことはない）
//! 4. メタデータを永続化コラボレータに保存
//! 5. 両方の書き込みが成功した後にのみ `video-uploaded` をブロードキャスト
//!
//! クライアントがアップロード途中で切断した場合、書きかけのファイルは
//! 破棄され、メタデータは保存されず、ブロードキャストも行われません。

use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use kotatsu_shared::time::Clock;
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::domain::{
    MediaStorage, MessagePusher, ServerEvent, Timestamp, Username, VideoAsset, VideoStore,
};

use super::error::IngestError;

/// 許可する動画ファイルの拡張子
const ALLOWED_EXTENSIONS: [&str; 6] = ["mp4", "webm", "ogg", "mov", "avi", "mkv"];

/// ストレージファイル名に付けるランダム salt の長さ
const FILENAME_SALT_LEN: usize = 6;

/// 動画アップロード受け入れのユースケース
pub struct IngestVideoUseCase {
    /// MediaStorage（バイナリ保存先の抽象化）
    storage: Arc<dyn MediaStorage>,
    /// VideoStore（メタデータ永続化の抽象化）
    store: Arc<dyn VideoStore>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
    /// アップロードサイズの上限（バイト）
    max_size: u64,
}

impl IngestVideoUseCase {
    /// 新しい IngestVideoUseCase を作成
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        store: Arc<dyn VideoStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        max_size: u64,
    ) -> Self {
        Self {
            storage,
            store,
            message_pusher,
            clock,
            max_size,
        }
    }

    /// アップロードの受け入れを実行
    ///
    /// # Arguments
    ///
    /// * `body` - アップロードボディのチャンクストリーム
    /// * `original_filename` - 元のファイル名（ユーザー入力、信頼しない）
    /// * `content_type` - 申告された content type
    /// * `uploader` - アップロードしたユーザーの表示名
    ///
    /// # Returns
    ///
    /// * `Ok(VideoAsset)` - 受け入れ成功（ブロードキャスト済み）
    /// * `Err(IngestError)` - 拒否または失敗（ブロードキャストなし）
    pub async fn execute<S, E>(
        &self,
        mut body: S,
        original_filename: &str,
        content_type: &str,
        uploader: String,
    ) -> Result<VideoAsset, IngestError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin + Send,
        E: std::fmt::Display,
    {
        // 1. 拡張子と content type の両方を検証する
        //    （どちらか一方の検査だけでは偽装アップロードを防げない）
        let extension = extract_extension(original_filename);
        let extension_ok = ALLOWED_EXTENSIONS.contains(&extension.as_str());
        let content_type_ok = content_type.starts_with("video/");
        if !extension_ok || !content_type_ok {
            return Err(IngestError::UnsupportedType {
                extension,
                content_type: content_type.to_string(),
            });
        }

        // 2. 衝突しにくいストレージファイル名を生成
        let uploaded_at = Timestamp::new(self.clock.now_unix_millis());
        let filename = generate_storage_filename(uploaded_at, &extension);

        // 3. バイナリをストリーミングで書き込み（サイズ上限をチャンクごとに検査）
        let mut sink = self.storage.create(&filename).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    // クライアント切断など。書きかけのファイルは破棄する
                    self.discard_quietly(&filename).await;
                    return Err(IngestError::BodyRead(e.to_string()));
                }
            };

            written += chunk.len() as u64;
            if written > self.max_size {
                self.discard_quietly(&filename).await;
                return Err(IngestError::TooLarge {
                    limit: self.max_size,
                });
            }

            if let Err(e) = sink.write_chunk(&chunk).await {
                self.discard_quietly(&filename).await;
                return Err(e.into());
            }
        }

        if written == 0 {
            self.discard_quietly(&filename).await;
            return Err(IngestError::NoFile);
        }

        if let Err(e) = sink.finish().await {
            self.discard_quietly(&filename).await;
            return Err(e.into());
        }

        // 4. メタデータを永続化（失敗したらバイナリも破棄し、通知しない）
        let video = VideoAsset {
            url: format!("/uploads/{filename}"),
            filename,
            original_name: original_filename.to_string(),
            uploader: Username::new(uploader),
            size: written,
            uploaded_at,
        };

        if let Err(e) = self.store.save_video(video.clone()).await {
            self.discard_quietly(&video.filename).await;
            return Err(e.into());
        }

        // 5. 両方の書き込みが成功した後にのみブロードキャスト
        if let Err(e) = self
            .message_pusher
            .broadcast_all(&ServerEvent::from_video(&video))
            .await
        {
            tracing::warn!("Failed to broadcast video-uploaded event: {}", e);
        }

        tracing::info!(
            "Video '{}' ingested as '{}' ({} bytes)",
            video.original_name,
            video.filename,
            video.size
        );

        Ok(video)
    }

    async fn discard_quietly(&self, filename: &str) {
        if let Err(e) = self.storage.discard(filename).await {
            tracing::warn!("Failed to discard partial upload '{}': {}", filename, e);
        }
    }
}

/// 元のファイル名から拡張子を取り出す（小文字化済み、ドットなし）
fn extract_extension(original_filename: &str) -> String {
    std::path::Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// ストレージファイル名を生成する
///
/// 同一ミリ秒に到着した並行アップロード同士でも衝突しないよう、
/// タイムスタンプにランダムな salt を組み合わせる。
fn generate_storage_filename(uploaded_at: Timestamp, extension: &str) -> String {
    let salt: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(FILENAME_SALT_LEN)
        .map(char::from)
        .collect();
    format!("{}-{}.{}", uploaded_at.value(), salt, extension)
}
