//! Error types for ScopedEmitter
//!
//! 설정 로드와 시나리오 파싱에서 발생하는 에러를 중앙에서 관리.
//! Emitter의 공개 API (subscribe / trigger / RemovalHandle)는 실패하지 않음.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ScopedEmitter 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 입력 / 시나리오 관련
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// 사용자 입력(설정 파일, 시나리오)으로 인한 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::InvalidInput(_)
                | Error::Scenario(_)
                | Error::Json(_)
                | Error::Toml(_)
        )
    }

    /// 시나리오 에러 생성 헬퍼
    pub fn scenario(message: impl Into<String>) -> Self {
        Error::Scenario(message.into())
    }
}
