//! Value Object 定義
//!
//! 生の String / 数値をそのまま扱わず、検証済みの型としてドメイン層に持ち込みます。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Room ID の最大長（バイト）
pub const ROOM_ID_MAX_LEN: usize = 128;

/// Room の識別子
///
/// 最初に join したクライアントが決める不透明な文字列。空文字と長すぎる値は拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        if value.len() > ROOM_ID_MAX_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                len: value.len(),
                max: ROOM_ID_MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WebSocket 接続（購読者）の識別子
///
/// 接続ごとにサーバー側で採番する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 現在カウントダウン中のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// 反対側のフェーズ
    pub fn flipped(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

/// Unix タイムスタンプ（JST, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Tick driver の世代番号
///
/// Room が保持している driver と一致しない tick は古いものとして捨てられる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverId(u64);

impl DriverId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver#{}", self.0)
    }
}

/// 各フェーズの長さ（秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub work: u32,
    pub r#break: u32,
}

impl PhaseDurations {
    /// 25 分
    pub const DEFAULT_WORK_SECS: u32 = 25 * 60;
    /// 5 分
    pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

    pub fn new(work: u32, r#break: u32) -> Self {
        Self { work, r#break }
    }

    /// 指定フェーズの長さ
    pub fn of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work,
            Phase::Break => self.r#break,
        }
    }

    /// join 時の設定から長さを決める
    ///
    /// 未指定・0 秒の値は `defaults` にフォールバックする。
    pub fn resolve(settings: &TimerSettings, defaults: PhaseDurations) -> Self {
        Self {
            work: positive(settings.work_secs).unwrap_or(defaults.work),
            r#break: positive(settings.break_secs).unwrap_or(defaults.r#break),
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORK_SECS, Self::DEFAULT_BREAK_SECS)
    }
}

fn positive(secs: Option<u32>) -> Option<u32> {
    secs.filter(|s| *s > 0)
}

/// join 時にクライアントが要求するタイマー設定（秒）
///
/// クライアントは分で送るが、0.5 分のような値も扱えるよう秒に換算して持つ。
/// Room が既に存在する場合は無視される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSettings {
    pub work_secs: Option<u32>,
    pub break_secs: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_opaque_string() {
        // テスト項目: 任意の文字列を Room ID として受け付ける
        // given (前提条件):
        let raw = "team focus/🍅".to_string();

        // when (操作):
        let result = RoomId::new(raw.clone());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), raw);
    }

    #[test]
    fn test_room_id_rejects_empty() {
        // テスト項目: 空の Room ID はエラーになる
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomId));
    }

    #[test]
    fn test_room_id_rejects_too_long() {
        // テスト項目: 最大長を超える Room ID はエラーになる
        // given (前提条件):
        let raw = "a".repeat(ROOM_ID_MAX_LEN + 1);

        // when (操作):
        let result = RoomId::try_from(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomIdTooLong {
                len: ROOM_ID_MAX_LEN + 1,
                max: ROOM_ID_MAX_LEN
            })
        );
    }

    #[test]
    fn test_phase_flipped() {
        // テスト項目: フェーズの反転
        assert_eq!(Phase::Work.flipped(), Phase::Break);
        assert_eq!(Phase::Break.flipped(), Phase::Work);
    }

    #[test]
    fn test_resolve_uses_requested_durations() {
        // テスト項目: 指定された秒数がそのまま使われる
        // given (前提条件):
        let settings = TimerSettings {
            work_secs: Some(600),
            break_secs: Some(120),
        };

        // when (操作):
        let durations = PhaseDurations::resolve(&settings, PhaseDurations::default());

        // then (期待する結果):
        assert_eq!(durations, PhaseDurations::new(600, 120));
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        // テスト項目: 未指定・0 秒はデフォルトになる
        // given (前提条件):
        let defaults = PhaseDurations::new(1500, 300);
        let cases = [
            TimerSettings::default(),
            TimerSettings {
                work_secs: Some(0),
                break_secs: Some(0),
            },
        ];

        for settings in cases {
            // when (操作):
            let durations = PhaseDurations::resolve(&settings, defaults);

            // then (期待する結果):
            assert_eq!(durations, defaults, "settings: {:?}", settings);
        }
    }

    #[test]
    fn test_resolve_mixes_requested_and_default() {
        // テスト項目: 片方だけ指定された場合はもう片方がデフォルトになる
        // given (前提条件):
        let settings = TimerSettings {
            work_secs: None,
            break_secs: Some(900),
        };

        // when (操作):
        let durations = PhaseDurations::resolve(&settings, PhaseDurations::default());

        // then (期待する結果):
        assert_eq!(durations.work, 1500);
        assert_eq!(durations.r#break, 900);
    }
}
