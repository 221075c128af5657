//! UseCase: クライアントからのタイマー操作を Timer Engine に渡す

use super::{EngineCommand, EngineHandle, error::EngineError};

/// タイマー操作のユースケース
pub struct DispatchCommandUseCase {
    engine: EngineHandle,
}

impl DispatchCommandUseCase {
    /// 新しい DispatchCommandUseCase を作成
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// コマンドを engine loop のキューに積む
    ///
    /// 結果のイベントは MessagePusher 経由で非同期に届く。
    pub fn execute(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.engine.send(command)
    }
}
