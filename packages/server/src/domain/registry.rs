//! Session Registry trait 定義
//!
//! 現在接続中の参加者集合を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::Participant;
use super::value_object::ClientId;

/// Session Registry trait
///
/// 接続中の参加者集合を所有する。登録は失敗しない。
/// 在席数は接続・切断のたびに再計算され、保存されることはない。
///
/// ## 並行性
///
/// 実装は add / remove / count を原子的に行うこと
/// （同時接続・同時切断でカウントが失われてはならない）。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// 参加者を登録
    async fn add(&self, participant: Participant);

    /// 参加者を削除（存在しない場合は何もしない）
    async fn remove(&self, client_id: &ClientId);

    /// 現在の在席数を取得
    async fn count(&self) -> usize;

    /// 参加者のスナップショットを取得
    async fn participants(&self) -> Vec<Participant>;
}
