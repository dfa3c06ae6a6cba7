//! UseCase: 履歴取得処理（チャットメッセージ / 動画一覧）
//!
//! 接続直後のクライアントが画面を復元するために HTTP で呼び出します。
//! 永続化コラボレータが利用できない場合はエラーを返します（チャット
//! 送信の縮退動作とは異なり、履歴は保存済みデータそのものなので
//! 代替がありません）。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageStore, VideoAsset, VideoStore};

use super::error::HistoryError;

/// 1 回の履歴取得で返すメッセージ件数の上限（既定値も兼ねる）
const MAX_MESSAGE_LIMIT: u32 = 100;

/// メッセージ履歴取得のユースケース
pub struct ListMessagesUseCase {
    /// MessageStore（永続化コラボレータの抽象化）
    store: Arc<dyn MessageStore>,
}

impl ListMessagesUseCase {
    /// 新しい ListMessagesUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// メッセージ履歴取得を実行
    ///
    /// # Arguments
    ///
    /// * `limit` - 取得件数の上限。未指定または 100 超は 100 に丸める
    ///
    /// # Returns
    ///
    /// 直近のメッセージを古い順（シーケンス ID 昇順）で返す。
    pub async fn execute(&self, limit: Option<u32>) -> Result<Vec<ChatMessage>, HistoryError> {
        let limit = limit.unwrap_or(MAX_MESSAGE_LIMIT).min(MAX_MESSAGE_LIMIT);
        let messages = self.store.list_messages(limit).await?;
        Ok(messages)
    }
}

/// 動画一覧取得のユースケース
pub struct ListVideosUseCase {
    /// VideoStore（永続化コラボレータの抽象化）
    store: Arc<dyn VideoStore>,
}

impl ListVideosUseCase {
    /// 新しい ListVideosUseCase を作成
    pub fn new(store: Arc<dyn VideoStore>) -> Self {
        Self { store }
    }

    /// 動画一覧取得を実行（アップロードの新しい順）
    pub async fn execute(&self) -> Result<Vec<VideoAsset>, HistoryError> {
        let videos = self.store.list_videos().await?;
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageBody, StoreError, Timestamp, Username,
        repository::{MockMessageStore, MockVideoStore},
    };

    #[tokio::test]
    async fn test_list_messages_defaults_to_max_limit() {
        // テスト項目: limit 未指定時は上限 100 でストアに問い合わせる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_list_messages()
            .withf(|limit| *limit == 100)
            .returning(|_| Ok(vec![]));
        let usecase = ListMessagesUseCase::new(Arc::new(store));

        // when (操作):
        let messages = usecase.execute(None).await.unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_list_messages_clamps_oversized_limit() {
        // テスト項目: 100 を超える limit は 100 に丸められる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_list_messages()
            .withf(|limit| *limit == 100)
            .returning(|_| Ok(vec![]));
        let usecase = ListMessagesUseCase::new(Arc::new(store));

        // when (操作) / then (期待する結果):
        usecase.execute(Some(5000)).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_messages_passes_small_limit_through() {
        // テスト項目: 上限以下の limit はそのまま使われる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_list_messages()
            .withf(|limit| *limit == 10)
            .returning(|_| {
                Ok(vec![ChatMessage::new(
                    Some(1),
                    Username::new("alice".to_string()),
                    MessageBody::new("hello".to_string()),
                    Timestamp::new(1700000000000),
                )])
            });
        let usecase = ListMessagesUseCase::new(Arc::new(store));

        // when (操作):
        let messages = usecase.execute(Some(10)).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, Some(1));
    }

    #[tokio::test]
    async fn test_list_messages_propagates_store_error() {
        // テスト項目: ストア障害はエラーとして呼び出し元に伝わる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_list_messages()
            .returning(|_| Err(StoreError::Unavailable("database is down".to_string())));
        let usecase = ListMessagesUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute(None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(HistoryError::Store(_))));
    }

    #[tokio::test]
    async fn test_list_videos_returns_store_contents() {
        // テスト項目: 動画一覧はストアの内容をそのまま返す
        // given (前提条件):
        let mut store = MockVideoStore::new();
        store.expect_list_videos().returning(|| {
            Ok(vec![crate::domain::VideoAsset {
                filename: "1700000000000-a1b2c3.mp4".to_string(),
                original_name: "clip.mp4".to_string(),
                uploader: Username::new("alice".to_string()),
                size: 16,
                url: "/uploads/1700000000000-a1b2c3.mp4".to_string(),
                uploaded_at: Timestamp::new(1700000000000),
            }])
        });
        let usecase = ListVideosUseCase::new(Arc::new(store));

        // when (操作):
        let videos = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].original_name, "clip.mp4");
    }
}
