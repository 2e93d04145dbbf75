//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成時に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Channel ID が空文字列
    #[error("Channel ID must not be empty")]
    EmptyChannelId,
}
