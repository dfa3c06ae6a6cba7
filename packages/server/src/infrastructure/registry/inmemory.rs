//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! 参加者は接続ごとの一時的なエンティティなので、永続化せず
//! HashMap で保持します。
//!
//! ## 並行性
//!
//! 参加者集合は単一の `tokio::sync::Mutex` で保護します。
//! add / remove / count がロック下で行われるため、同時接続・同時切断でも
//! 在席数が失われることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, Participant, SessionRegistry};

/// インメモリ Session Registry 実装
pub struct InMemorySessionRegistry {
    /// 接続中の参加者（client_id → Participant）
    participants: Mutex<HashMap<String, Participant>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self {
            participants: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn add(&self, participant: Participant) {
        let mut participants = self.participants.lock().await;
        participants.insert(participant.id.as_str().to_string(), participant);
    }

    async fn remove(&self, client_id: &ClientId) {
        let mut participants = self.participants.lock().await;
        participants.remove(client_id.as_str());
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }

    async fn participants(&self) -> Vec<Participant> {
        let participants = self.participants.lock().await;
        let mut list: Vec<Participant> = participants.values().cloned().collect();
        // 一覧の順序を安定させるため client_id 順にソート
        list.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use std::sync::Arc;

    fn participant(id: &str) -> Participant {
        Participant::new(
            ClientId::new(id.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_add_and_count() {
        // テスト項目: 参加者を追加すると在席数に反映される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();

        // when (操作):
        registry.add(participant("alice")).await;
        registry.add(participant("bob")).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_remove_decrements_count() {
        // テスト項目: 参加者を削除すると在席数が減る
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        registry.add(participant("alice")).await;
        registry.add(participant("bob")).await;

        // when (操作):
        let alice = ClientId::new("alice".to_string()).unwrap();
        registry.remove(&alice).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_is_noop() {
        // テスト項目: 存在しない参加者の削除は何もしない（冪等性）
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        registry.add(participant("alice")).await;

        // when (操作):
        let ghost = ClientId::new("ghost".to_string()).unwrap();
        registry.remove(&ghost).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_participants_sorted_by_client_id() {
        // テスト項目: 参加者スナップショットが client_id 順に並ぶ
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        registry.add(participant("charlie")).await;
        registry.add(participant("alice")).await;
        registry.add(participant("bob")).await;

        // when (操作):
        let list = registry.participants().await;

        // then (期待する結果):
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id.as_str(), "alice");
        assert_eq!(list[1].id.as_str(), "bob");
        assert_eq!(list[2].id.as_str(), "charlie");
    }

    #[tokio::test]
    async fn test_concurrent_add_remove_no_drift() {
        // テスト項目: N 並行の接続と切断で在席数がずれない
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let n = 32;

        // when (操作): N 人を並行に追加
        let mut handles = Vec::new();
        for i in 0..n {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.add(participant(&format!("client-{i}"))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): 在席数は N
        assert_eq!(registry.count().await, n);

        // when (操作): N 人を並行に削除
        let mut handles = Vec::new();
        for i in 0..n {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let id = ClientId::new(format!("client-{i}")).unwrap();
                registry.remove(&id).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): 在席数は 0
        assert_eq!(registry.count().await, 0);
    }
}
