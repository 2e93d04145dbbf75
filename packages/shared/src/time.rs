//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in UTC.
///
/// Returns `None` if the timestamp is out of the range chrono can represent.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse an RFC 3339 string into a Unix timestamp (milliseconds).
pub fn rfc3339_to_millis(value: &str) -> Result<i64, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.timestamp_millis())
}

/// Format a Unix timestamp (milliseconds) as a local wall-clock time for display.
pub fn format_local_time(timestamp_millis: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp1 > 0);
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_millis();
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
    }

    #[test]
    fn test_millis_to_rfc3339_format() {
        // テスト項目: タイムスタンプが UTC の RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00.123 UTC
        let timestamp = 1672531200123;

        // when (操作):
        let result = millis_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("2023-01-01T00:00:00.123Z"));
    }

    #[test]
    fn test_rfc3339_to_millis_accepts_offsets() {
        // テスト項目: タイムゾーン付きの RFC 3339 文字列がミリ秒に変換される
        // given (前提条件):
        let value = "2023-01-01T09:00:00+09:00";

        // when (操作):
        let result = rfc3339_to_millis(value);

        // then (期待する結果):
        assert_eq!(result, Ok(1672531200000));
    }

    #[test]
    fn test_rfc3339_to_millis_rejects_locale_strings() {
        // テスト項目: ロケール形式の日時文字列はエラーになる
        // given (前提条件):
        let value = "1/1/2023, 9:00:00 AM";

        // when (操作):
        let result = rfc3339_to_millis(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_format_local_time_shape() {
        // テスト項目: 表示用の時刻が HH:MM:SS 形式になる
        // given (前提条件):
        let timestamp = 1672531200000;

        // when (操作):
        let result = format_local_time(timestamp);

        // then (期待する結果):
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
    }
}
