//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Room は tick driver の所有権を持つため複製できません。Repository は
//! Timer Engine が排他的に所有し、Room への参照を貸し出します。

use super::{Room, RoomId, TimerSettings};

/// Room Repository trait
///
/// Room ID から Room への対応表（レジストリ）。一度作った Room は削除しない。
pub trait RoomRepository: Send + Sync {
    /// Room を取得し、無ければ `settings` から作成する
    ///
    /// 既に存在する場合 `settings` は無視される（最初に join した設定が常に勝つ）。
    fn get_or_create(&mut self, room_id: RoomId, settings: TimerSettings) -> &mut Room;

    /// Room を取得
    fn get(&self, room_id: &RoomId) -> Option<&Room>;

    /// Room を可変参照で取得
    fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room>;

    /// 全ての Room を ID 順で取得
    fn list(&self) -> Vec<&Room>;
}
