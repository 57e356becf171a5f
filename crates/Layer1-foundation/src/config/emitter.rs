//! Emitter Config - Emitter 인스턴스 설정
//!
//! TOML 또는 JSON 파일에서 로드할 수 있으며, 모든 필드는 기본값을 가집니다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 설정 파일명
pub const EMITTER_CONFIG_FILE: &str = "emitter.toml";

/// 한 (scope, event) 버킷에 이 수를 넘는 리스너가 바인딩되면 경고
pub const DEFAULT_LISTENER_WARN_THRESHOLD: usize = 20;

/// location이 비어있을 때 사용하는 sentinel
pub const DEFAULT_ROOT_LOCATION: &str = "/";

/// Emitter 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitterConfig {
    /// 버킷 크기가 이 값을 넘으면 진단 경고 (바인딩은 계속 진행)
    #[serde(default = "default_listener_warn_threshold")]
    pub listener_warn_threshold: usize,

    /// 빈 location 식별자를 대체하는 값
    #[serde(default = "default_root_location")]
    pub root_location: String,

    /// 콜백 스케줄링마다 trace 로그 출력
    #[serde(default)]
    pub trace_dispatch: bool,
}

fn default_listener_warn_threshold() -> usize {
    DEFAULT_LISTENER_WARN_THRESHOLD
}

fn default_root_location() -> String {
    DEFAULT_ROOT_LOCATION.to_string()
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            listener_warn_threshold: DEFAULT_LISTENER_WARN_THRESHOLD,
            root_location: DEFAULT_ROOT_LOCATION.to_string(),
            trace_dispatch: false,
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 경고 임계값 설정
    pub fn with_listener_warn_threshold(mut self, threshold: usize) -> Self {
        self.listener_warn_threshold = threshold;
        self
    }

    /// 루트 location 설정
    pub fn with_root_location(mut self, root: impl Into<String>) -> Self {
        self.root_location = root.into();
        self
    }

    /// dispatch trace 로그 on/off
    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }

    /// TOML 문자열에서 로드
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// JSON 문자열에서 로드
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일에서 로드 (확장자로 포맷 결정: `.toml`, `.json`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::Config(format!(
                "Unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<()> {
        if self.listener_warn_threshold == 0 {
            return Err(Error::Config(
                "listenerWarnThreshold must be at least 1".to_string(),
            ));
        }
        if self.root_location.is_empty() {
            return Err(Error::Config("rootLocation must not be empty".to_string()));
        }
        Ok(())
    }
}
