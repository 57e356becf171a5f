//! RemovalHandle - 바인딩 하나를 제거하는 핸들

use super::{BindingId, Scope, Unbind};
use std::sync::{Arc, Weak};

/// 특정 바인딩 하나를 제거하는 핸들
///
/// 여러 번 호출해도 안전합니다 (첫 제거 이후에는 no-op).
/// 레지스트리를 약하게 참조하므로 Emitter 수명을 늘리지 않습니다.
#[derive(Clone)]
pub struct RemovalHandle {
    registry: Weak<dyn Unbind>,
    scope: Scope,
    event: Arc<str>,
    id: BindingId,
}

impl RemovalHandle {
    pub(crate) fn new(registry: Weak<dyn Unbind>, scope: Scope, event: &str, id: BindingId) -> Self {
        Self {
            registry,
            scope,
            event: Arc::from(event),
            id,
        }
    }

    /// 바인딩 제거. 이번 호출로 실제 제거되었으면 true
    pub fn remove(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.unbind(&self.scope, &self.event, self.id),
            None => false,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn id(&self) -> BindingId {
        self.id
    }
}

impl std::fmt::Debug for RemovalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemovalHandle")
            .field("scope", &self.scope)
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}
