//! Location - 현재 "위치" 식별자 제공자
//!
//! Emitter는 location을 직접 관리하지 않고, 라우팅 계층이 제공하는
//! `LocationResolver`를 통해 현재 위치를 읽기만 합니다.

use crate::config::DEFAULT_ROOT_LOCATION;
use parking_lot::RwLock;
use std::sync::Arc;

// ============================================================================
// LocationResolver Trait
// ============================================================================

/// 현재 location 식별자를 반환하는 collaborator
///
/// 반환값은 안정적이고 비교 가능해야 합니다 (예: route path).
pub trait LocationResolver: Send + Sync {
    fn current_location(&self) -> String;
}

impl<F> LocationResolver for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_location(&self) -> String {
        self()
    }
}

/// 빈 location을 루트 sentinel로 치환
pub fn normalize_location(raw: String, root: &str) -> String {
    if raw.is_empty() {
        root.to_string()
    } else {
        raw
    }
}

// ============================================================================
// SharedLocation
// ============================================================================

/// 공유 가능한 location 셀
///
/// 라우터를 흉내내는 최소 구현. clone은 같은 셀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct SharedLocation {
    inner: Arc<RwLock<String>>,
}

impl SharedLocation {
    /// 루트(`/`)에서 시작
    pub fn new() -> Self {
        Self::at(DEFAULT_ROOT_LOCATION)
    }

    /// 지정한 location에서 시작
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(location.into())),
        }
    }

    /// location 변경
    pub fn navigate(&self, location: impl Into<String>) {
        let location = location.into();
        tracing::debug!(to = %location, "Location changed");
        *self.inner.write() = location;
    }

    pub fn current(&self) -> String {
        self.inner.read().clone()
    }
}

impl Default for SharedLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver for SharedLocation {
    fn current_location(&self) -> String {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_location_clones_share_state() {
        let location = SharedLocation::new();
        let view = location.clone();
        assert_eq!(view.current_location(), "/");

        location.navigate("/users/7");
        assert_eq!(view.current_location(), "/users/7");
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = || "/settings".to_string();
        assert_eq!(resolver.current_location(), "/settings");
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location(String::new(), "/"), "/");
        assert_eq!(normalize_location("/a".into(), "/"), "/a");
    }
}
