//! ローカルディスクを使ったメディアストレージ実装
//!
//! アップロードされた動画バイナリを、ストレージディレクトリ直下に
//! ストリーミングで書き込みます。並行アップロードはそれぞれ一意な
//! ファイル名に書き込むため、共有の可変状態はありません。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::domain::{MediaSink, MediaStorage, StorageError};

/// ローカルディスクのメディアストレージ
pub struct LocalMediaStorage {
    /// 保存先ディレクトリ
    root: PathBuf,
}

impl LocalMediaStorage {
    /// 新しい LocalMediaStorage を作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 保存先ディレクトリを作成する（既にあれば何もしない）
    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        // ファイル名はサーバ側で生成したものだけを受け取る前提だが、
        // パス区切りが紛れ込んでもディレクトリの外に出ないようにする
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| filename.replace(['/', '\\'], "_").into());
        self.root.join(name)
    }
}

/// ディスク上の 1 ファイルへの書き込みシンク
struct DiskSink {
    file: File,
}

#[async_trait]
impl MediaSink for DiskSink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        self.file.write_all(chunk).await?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), StorageError> {
        self.file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn create(&self, filename: &str) -> Result<Box<dyn MediaSink>, StorageError> {
        let file = File::create(self.path_for(filename)).await?;
        Ok(Box::new(DiskSink { file }))
    }

    async fn discard(&self, filename: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
