//! Listener Registry - (scope, event) 별 콜백 저장소
//!
//! ```text
//! Registry
//! ├── Scope::Global
//! │   ├── "ping"  → [A, B]          (등록 순서)
//! │   └── "save"  → [C]
//! └── Scope::Location("/users")
//!     └── "ping"  → [D]
//! ```
//!
//! - 버킷은 처음 바인딩될 때 생성되고, 비면 제거됩니다.
//! - 제거는 index가 아닌 `BindingId` 기준 (identity 기반).
//! - 버킷 크기가 임계값을 넘으면 `Diagnostics`로 경고만 하고 바인딩은 진행.

mod handle;

pub use handle::RemovalHandle;

use emitter_foundation::Diagnostics;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Scope
// ============================================================================

/// 바인딩 범위
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// 항상 발화
    Global,
    /// 현재 location이 일치할 때만 발화
    Location(String),
}

impl Scope {
    pub fn location(location: impl Into<String>) -> Self {
        Self::Location(location.into())
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Location(location) => write!(f, "{}", location),
        }
    }
}

// ============================================================================
// Binding
// ============================================================================

/// 바인딩 ID (콜백 identity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "binding-{}", self.0)
    }
}

struct Binding<L> {
    id: BindingId,
    listener: L,
}

type Buckets<L> = HashMap<Scope, HashMap<String, Vec<Binding<L>>>>;

/// `RemovalHandle`이 리스너 타입을 몰라도 제거할 수 있도록 하는 seam
pub(crate) trait Unbind: Send + Sync {
    fn unbind(&self, scope: &Scope, event: &str, id: BindingId) -> bool;
}

// ============================================================================
// Registry
// ============================================================================

/// 리스너 레지스트리
///
/// 모든 변경은 인스턴스당 하나의 mutex로 직렬화됩니다.
/// 콜백은 lock 밖에서 (scheduler를 통해) 실행되므로 콜백 안에서
/// 바인딩/제거를 해도 교착되지 않습니다.
pub struct Registry<L> {
    buckets: Mutex<Buckets<L>>,
    next_id: AtomicU64,
    warn_threshold: usize,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<L> Registry<L>
where
    L: Clone + Send + 'static,
{
    pub fn new(warn_threshold: usize, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            warn_threshold,
            diagnostics,
        }
    }

    /// `(scope, event)` 버킷 끝에 리스너 추가
    pub fn bind(self: &Arc<Self>, scope: Scope, event: &str, listener: L) -> RemovalHandle {
        let id = BindingId(self.next_id.fetch_add(1, Ordering::SeqCst));

        let bucket_len = {
            let mut buckets = self.buckets.lock();
            let bucket = buckets
                .entry(scope.clone())
                .or_default()
                .entry(event.to_string())
                .or_default();
            bucket.push(Binding { id, listener });
            bucket.len()
        };

        debug!(scope = %scope, event, binding = %id, bucket_len, "Bound listener");

        if bucket_len > self.warn_threshold {
            self.diagnostics.warn(&format!(
                "more than {} listeners bound to {} {}, is that correct? ({} bound)",
                self.warn_threshold, scope, event, bucket_len
            ));
        }

        let registry: Arc<dyn Unbind> = self.clone();
        RemovalHandle::new(Arc::downgrade(&registry), scope, event, id)
    }

    /// id가 일치하는 첫 바인딩 제거. 이미 제거되었으면 false
    pub fn unbind(&self, scope: &Scope, event: &str, id: BindingId) -> bool {
        let mut buckets = self.buckets.lock();

        let Some(events) = buckets.get_mut(scope) else {
            return false;
        };
        let Some(bucket) = events.get_mut(event) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|binding| binding.id == id) else {
            return false;
        };

        bucket.remove(position);

        if bucket.is_empty() {
            events.remove(event);
        }
        if events.is_empty() {
            buckets.remove(scope);
        }

        debug!(scope = %scope, event, binding = %id, "Unbound listener");
        true
    }

    /// 버킷의 현재 리스너 스냅샷 (등록 순서)
    pub fn lookup(&self, scope: &Scope, event: &str) -> Vec<L> {
        self.buckets
            .lock()
            .get(scope)
            .and_then(|events| events.get(event))
            .map(|bucket| bucket.iter().map(|b| b.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// 버킷 크기
    pub fn len(&self, scope: &Scope, event: &str) -> usize {
        self.buckets
            .lock()
            .get(scope)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }

    /// 전체 바인딩 수
    pub fn binding_count(&self) -> usize {
        self.buckets
            .lock()
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    /// 바인딩이 하나 이상 있는 scope 목록
    pub fn scopes(&self) -> Vec<Scope> {
        self.buckets.lock().keys().cloned().collect()
    }
}

impl<L> Unbind for Registry<L>
where
    L: Clone + Send + 'static,
{
    fn unbind(&self, scope: &Scope, event: &str, id: BindingId) -> bool {
        Registry::unbind(self, scope, event, id)
    }
}

impl<L> std::fmt::Debug for Registry<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("scopes", &self.buckets.lock().len())
            .field("warn_threshold", &self.warn_threshold)
            .finish()
    }
}

// ============================================================================
// 테스트
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 경고 메시지를 모으는 테스트용 sink
    #[derive(Default)]
    struct RecordingDiagnostics {
        warnings: Mutex<Vec<String>>,
    }

    impl Diagnostics for RecordingDiagnostics {
        fn warn(&self, message: &str) {
            self.warnings.lock().push(message.to_string());
        }
    }

    fn registry(threshold: usize) -> (Arc<Registry<&'static str>>, Arc<RecordingDiagnostics>) {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        (
            Arc::new(Registry::new(threshold, diagnostics.clone())),
            diagnostics,
        )
    }

    #[test]
    fn test_bind_preserves_registration_order() {
        let (registry, _) = registry(20);
        registry.bind(Scope::Global, "ping", "a");
        registry.bind(Scope::Global, "ping", "b");
        registry.bind(Scope::Global, "ping", "c");

        assert_eq!(registry.lookup(&Scope::Global, "ping"), vec!["a", "b", "c"]);
        assert!(registry.lookup(&Scope::Global, "pong").is_empty());
        assert!(registry.lookup(&Scope::location("/a"), "ping").is_empty());
    }

    #[test]
    fn test_scopes_are_isolated() {
        let (registry, _) = registry(20);
        registry.bind(Scope::Global, "ping", "global");
        registry.bind(Scope::location("/a"), "ping", "local");

        assert_eq!(registry.lookup(&Scope::Global, "ping"), vec!["global"]);
        assert_eq!(registry.lookup(&Scope::location("/a"), "ping"), vec!["local"]);
        assert_eq!(registry.binding_count(), 2);
    }

    #[test]
    fn test_removal_is_identity_based_and_idempotent() {
        let (registry, _) = registry(20);
        // 같은 값이라도 바인딩은 별개
        let first = registry.bind(Scope::Global, "ping", "same");
        let _second = registry.bind(Scope::Global, "ping", "same");
        let third = registry.bind(Scope::Global, "ping", "other");

        assert!(first.remove());
        assert!(!first.remove());
        assert_eq!(registry.lookup(&Scope::Global, "ping"), vec!["same", "other"]);

        assert!(third.remove());
        assert_eq!(registry.lookup(&Scope::Global, "ping"), vec!["same"]);
    }

    #[test]
    fn test_empty_buckets_are_dropped() {
        let (registry, _) = registry(20);
        let handle = registry.bind(Scope::location("/a"), "ping", "a");
        assert_eq!(registry.scopes(), vec![Scope::location("/a")]);

        handle.remove();
        assert!(registry.scopes().is_empty());
        assert_eq!(registry.len(&Scope::location("/a"), "ping"), 0);
    }

    #[test]
    fn test_warns_when_bucket_exceeds_threshold() {
        let (registry, diagnostics) = registry(20);

        for _ in 0..20 {
            registry.bind(Scope::Global, "ping", "x");
        }
        assert!(diagnostics.warnings.lock().is_empty());

        registry.bind(Scope::Global, "ping", "x");
        assert_eq!(registry.len(&Scope::Global, "ping"), 21);

        let warnings = diagnostics.warnings.lock();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("global ping"));
    }

    #[test]
    fn test_threshold_is_per_bucket() {
        let (registry, diagnostics) = registry(2);
        registry.bind(Scope::Global, "a", "x");
        registry.bind(Scope::Global, "a", "x");
        registry.bind(Scope::Global, "b", "x");
        registry.bind(Scope::location("/p"), "a", "x");
        assert!(diagnostics.warnings.lock().is_empty());
    }

    #[test]
    fn test_handle_outliving_registry_is_noop() {
        let (registry, _) = registry(20);
        let handle = registry.bind(Scope::Global, "ping", "a");
        drop(registry);
        assert!(!handle.remove());
    }
}
