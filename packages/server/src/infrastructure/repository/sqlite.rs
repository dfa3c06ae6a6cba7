//! SQLite を使った永続化コラボレータ実装
//!
//! ドメイン層が定義する MessageStore / VideoStore trait の具体的な実装。
//! sqlx の接続プールを使い、書き込みの直列化はプール側に任せます。
//!
//! ## 縮退動作
//!
//! 接続は遅延確立（`connect_lazy`）なので、データベースが落ちていても
//! プロセスは起動します。個々のクエリの失敗は `StoreError` として
//! 呼び出し側（UseCase 層）に返り、チャットはメモリのみの配送に
//! 縮退します。

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::domain::{
    ChatMessage, MessageBody, MessageStore, StoreError, Timestamp, Username, VideoAsset,
    VideoStore,
};

/// SQLite 永続化コラボレータ
///
/// チャットメッセージと動画メタデータの両方を 1 つのデータベースに
/// 保存します。どちらのテーブルも追記のみで、`id` は単調増加の
/// シーケンス ID（AUTOINCREMENT）です。
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// データベースに接続して新しい SqliteStore を作成（即時接続）
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(to_store_error)?;
        Ok(Self { pool })
    }

    /// 遅延接続で新しい SqliteStore を作成
    ///
    /// 接続は最初のクエリ時に確立される。データベースが利用不能でも
    /// この関数は失敗しない（セッション層はメモリのみの配送に縮退する）。
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(to_store_error)?;
        Ok(Self { pool })
    }

    /// スキーマを初期化する（存在しないテーブルのみ作成）
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS videos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL UNIQUE,
                original_name TEXT NOT NULL,
                uploader TEXT NOT NULL,
                size INTEGER NOT NULL,
                url TEXT NOT NULL,
                uploaded_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(())
    }
}

fn to_store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn save_message(
        &self,
        username: Username,
        content: MessageBody,
        created_at: Timestamp,
    ) -> Result<ChatMessage, StoreError> {
        let result = sqlx::query("INSERT INTO messages (username, content, created_at) VALUES (?, ?, ?)")
            .bind(username.as_str())
            .bind(content.as_str())
            .bind(created_at.value())
            .execute(&self.pool)
            .await
            .map_err(to_store_error)?;

        let id = result.last_insert_rowid();
        Ok(ChatMessage::new(Some(id), username, content, created_at))
    }

    async fn list_messages(&self, limit: u32) -> Result<Vec<ChatMessage>, StoreError> {
        // 直近 limit 件を取り出してから時系列順（古い → 新しい）に並べ直す
        let rows: Vec<(i64, String, String, i64)> = sqlx::query_as(
            "SELECT id, username, content, created_at FROM messages ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        let mut messages: Vec<ChatMessage> = rows
            .into_iter()
            .map(|(id, username, content, created_at)| {
                ChatMessage::new(
                    Some(id),
                    Username::new(username),
                    MessageBody::new(content),
                    Timestamp::new(created_at),
                )
            })
            .collect();
        messages.reverse();
        Ok(messages)
    }
}

#[async_trait]
impl VideoStore for SqliteStore {
    async fn save_video(&self, video: VideoAsset) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO videos (filename, original_name, uploader, size, url, uploaded_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&video.filename)
        .bind(&video.original_name)
        .bind(video.uploader.as_str())
        .bind(video.size as i64)
        .bind(&video.url)
        .bind(video.uploaded_at.value())
        .execute(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(())
    }

    async fn list_videos(&self) -> Result<Vec<VideoAsset>, StoreError> {
        // アップロードの新しい順
        let rows: Vec<(String, String, String, i64, String, i64)> = sqlx::query_as(
            "SELECT filename, original_name, uploader, size, url, uploaded_at
             FROM videos ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(rows
            .into_iter()
            .map(
                |(filename, original_name, uploader, size, url, uploaded_at)| VideoAsset {
                    filename,
                    original_name,
                    uploader: Username::new(uploader),
                    size: size.max(0) as u64,
                    url,
                    uploaded_at: Timestamp::new(uploaded_at),
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_store() -> SqliteStore {
        // インメモリ DB は接続ごとに別になるため、プールは 1 接続に固定
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_save_message_assigns_increasing_ids() {
        // テスト項目: save_message が単調増加のシーケンス ID を採番する
        // given (前提条件):
        let store = create_test_store().await;

        // when (操作):
        let first = store
            .save_message(
                Username::new("alice".to_string()),
                MessageBody::new("first".to_string()),
                Timestamp::new(1000),
            )
            .await
            .unwrap();
        let second = store
            .save_message(
                Username::new("bob".to_string()),
                MessageBody::new("second".to_string()),
                Timestamp::new(2000),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(first.id.unwrap() < second.id.unwrap());
    }

    #[tokio::test]
    async fn test_list_messages_chronological_order() {
        // テスト項目: list_messages が時系列順（古い → 新しい）で返す
        // given (前提条件):
        let store = create_test_store().await;
        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            store
                .save_message(
                    Username::new("alice".to_string()),
                    MessageBody::new(text.to_string()),
                    Timestamp::new(1000 + i as i64),
                )
                .await
                .unwrap();
        }

        // when (操作):
        let messages = store.list_messages(100).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content.as_str(), "one");
        assert_eq!(messages[1].content.as_str(), "two");
        assert_eq!(messages[2].content.as_str(), "three");
    }

    #[tokio::test]
    async fn test_list_messages_returns_most_recent_limit() {
        // テスト項目: limit 指定時は直近の limit 件が時系列順で返る
        // given (前提条件):
        let store = create_test_store().await;
        for i in 0..5 {
            store
                .save_message(
                    Username::new("alice".to_string()),
                    MessageBody::new(format!("msg-{i}")),
                    Timestamp::new(1000 + i),
                )
                .await
                .unwrap();
        }

        // when (操作):
        let messages = store.list_messages(2).await.unwrap();

        // then (期待する結果): 直近 2 件（msg-3, msg-4）が古い順に並ぶ
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.as_str(), "msg-3");
        assert_eq!(messages[1].content.as_str(), "msg-4");
    }

    #[tokio::test]
    async fn test_save_and_list_videos() {
        // テスト項目: 動画メタデータの保存と一覧取得ができる
        // given (前提条件):
        let store = create_test_store().await;
        let video = VideoAsset {
            filename: "1700000000000-a1b2c3.mp4".to_string(),
            original_name: "clip.mp4".to_string(),
            uploader: Username::new("alice".to_string()),
            size: 2048,
            url: "/uploads/1700000000000-a1b2c3.mp4".to_string(),
            uploaded_at: Timestamp::new(1700000000000),
        };

        // when (操作):
        store.save_video(video.clone()).await.unwrap();
        let videos = store.list_videos().await.unwrap();

        // then (期待する結果):
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0], video);
    }

    #[tokio::test]
    async fn test_list_videos_newest_first() {
        // テスト項目: 動画一覧がアップロードの新しい順で返る
        // given (前提条件):
        let store = create_test_store().await;
        for i in 0..3 {
            store
                .save_video(VideoAsset {
                    filename: format!("170000000000{i}-salt.mp4"),
                    original_name: format!("clip-{i}.mp4"),
                    uploader: Username::new("alice".to_string()),
                    size: 1024,
                    url: format!("/uploads/170000000000{i}-salt.mp4"),
                    uploaded_at: Timestamp::new(1700000000000 + i),
                })
                .await
                .unwrap();
        }

        // when (操作):
        let videos = store.list_videos().await.unwrap();

        // then (期待する結果):
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].original_name, "clip-2.mp4");
        assert_eq!(videos[2].original_name, "clip-0.mp4");
    }

    #[tokio::test]
    async fn test_save_video_duplicate_filename_is_error() {
        // テスト項目: ストレージファイル名の一意制約に違反するとエラーになる
        // given (前提条件):
        let store = create_test_store().await;
        let video = VideoAsset {
            filename: "1700000000000-a1b2c3.mp4".to_string(),
            original_name: "clip.mp4".to_string(),
            uploader: Username::new("alice".to_string()),
            size: 2048,
            url: "/uploads/1700000000000-a1b2c3.mp4".to_string(),
            uploaded_at: Timestamp::new(1700000000000),
        };
        store.save_video(video.clone()).await.unwrap();

        // when (操作):
        let result = store.save_video(video).await;

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_on_empty_store() {
        // テスト項目: 空のストアに対する一覧取得は空のリストを返す
        // given (前提条件):
        let store = create_test_store().await;

        // when (操作):
        let messages = store.list_messages(100).await.unwrap();
        let videos = store.list_videos().await.unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
        assert!(videos.is_empty());
    }
}
