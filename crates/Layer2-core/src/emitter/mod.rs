//! Emitter - scope 인식 이벤트 emitter
//!
//! 컴포넌트마다 하나씩 소유하는 composition root입니다.
//! Registry + Dispatcher를 감싸 공개 API를 제공합니다.
//!
//! ## 사용법
//!
//! ```ignore
//! use emitter_core::Emitter;
//! use emitter_foundation::{QueueScheduler, SharedLocation};
//! use serde_json::json;
//!
//! let location = SharedLocation::at("/users");
//! let scheduler = Arc::new(QueueScheduler::new());
//! let emitter = Emitter::new(Arc::new(location.clone()), scheduler.clone());
//!
//! // location 바인딩: "/users"에 있을 때만 발화
//! let off = emitter.on("saved", |_emitter, args| println!("saved {:?}", args));
//!
//! // global 바인딩: 항상 발화, 직접 제거해야 함
//! let off_global = emitter.subscribe_global("saved", |_emitter, _args| {});
//!
//! emitter.trigger("saved", vec![json!(1)]);
//! scheduler.run_pending();
//!
//! off.remove();
//! off_global.remove();
//! ```

mod builder;
mod scope;

pub use builder::EmitterBuilder;
pub use scope::OnScope;

use crate::dispatch::Dispatcher;
use crate::listener::{Registry, RemovalHandle, Scope};
use emitter_foundation::{EmitterConfig, LocationResolver, Scheduler, TracingDiagnostics};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// 저장되는 리스너 타입. 첫 인자는 이벤트를 발생시킨 Emitter
pub type Listener = Arc<dyn Fn(&Emitter, &[Value]) + Send + Sync>;

// ============================================================================
// EmitterId
// ============================================================================

/// Emitter 인스턴스 ID (로그 구분용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId(uuid::Uuid);

impl EmitterId {
    fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for EmitterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "emitter-{}", self.0)
    }
}

// ============================================================================
// Emitter
// ============================================================================

struct EmitterInner {
    id: EmitterId,
    registry: Arc<Registry<Listener>>,
    dispatcher: Dispatcher,
}

/// scope 인식 이벤트 emitter
///
/// clone은 같은 인스턴스를 가리킵니다. 인스턴스 간에는 상태를 공유하지 않습니다.
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<EmitterInner>,
}

impl Emitter {
    /// 기본 설정으로 생성
    pub fn new(resolver: Arc<dyn LocationResolver>, scheduler: Arc<dyn Scheduler>) -> Self {
        EmitterBuilder::assemble(
            EmitterConfig::default(),
            resolver,
            scheduler,
            Arc::new(TracingDiagnostics),
        )
    }

    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new()
    }

    pub(crate) fn from_parts(registry: Arc<Registry<Listener>>, dispatcher: Dispatcher) -> Self {
        let id = EmitterId::new();
        debug!(emitter = %id, "Created emitter");
        Self {
            inner: Arc::new(EmitterInner {
                id,
                registry,
                dispatcher,
            }),
        }
    }

    pub fn id(&self) -> EmitterId {
        self.inner.id
    }

    /// 현재 location (빈 값은 루트로 치환)
    pub fn current_location(&self) -> String {
        self.inner.dispatcher.current_location()
    }

    /// 기본 구독 = `subscribe_local`
    pub fn on<F>(&self, event: &str, callback: F) -> RemovalHandle
    where
        F: Fn(&Emitter, &[Value]) + Send + Sync + 'static,
    {
        self.subscribe_local(event, callback)
    }

    /// `global` / `local`을 명시적으로 고르는 view
    pub fn on_scope(&self) -> OnScope<'_> {
        OnScope::new(self)
    }

    /// 지금의 location에 바인딩
    ///
    /// location은 호출 시점에 캡처됩니다. 다른 location으로 이동하면
    /// 발화하지 않고, 같은 location으로 돌아오면 다시 발화합니다.
    pub fn subscribe_local<F>(&self, event: &str, callback: F) -> RemovalHandle
    where
        F: Fn(&Emitter, &[Value]) + Send + Sync + 'static,
    {
        let location = self.current_location();
        self.bind(Scope::Location(location), event, Arc::new(callback))
    }

    /// 항상 발화하는 바인딩. 소유자가 직접 제거해야 합니다
    pub fn subscribe_global<F>(&self, event: &str, callback: F) -> RemovalHandle
    where
        F: Fn(&Emitter, &[Value]) + Send + Sync + 'static,
    {
        self.bind(Scope::Global, event, Arc::new(callback))
    }

    /// 한 번만 발화하는 global 바인딩
    ///
    /// 콜백은 trigger 인자가 아니라 `(event, extra)`를 받습니다.
    /// 첫 실행에서 스스로 제거되며, 이미 스케줄된 두 번째 실행이 있더라도
    /// 콜백은 최대 한 번만 호출됩니다.
    pub fn subscribe_once<F>(&self, event: &str, extra: Vec<Value>, callback: F) -> RemovalHandle
    where
        F: FnOnce(&str, &[Value]) + Send + 'static,
    {
        let own_handle: Arc<OnceLock<RemovalHandle>> = Arc::new(OnceLock::new());
        let callback = Mutex::new(Some(callback));
        let name: Arc<str> = Arc::from(event);

        let slot = own_handle.clone();
        let handle = self.subscribe_global(event, move |_emitter, _args| {
            if let Some(handle) = slot.get() {
                handle.remove();
            }
            let Some(callback) = callback.lock().take() else {
                debug!(event = %name, "Once listener already fired, skipping");
                return;
            };
            callback(&*name, extra.as_slice());
        });

        let _ = own_handle.set(handle.clone());
        handle
    }

    /// 이벤트 발생
    ///
    /// 매칭되는 리스너를 스케줄하고 바로 반환합니다. 스케줄된 리스너 수 반환.
    /// 리스너가 없어도 에러가 아닙니다.
    pub fn trigger(&self, event: &str, args: Vec<Value>) -> usize {
        let scheduled = self.inner.dispatcher.dispatch(self, event, args);
        debug!(emitter = %self.inner.id, event, scheduled, "Triggered event");
        scheduled
    }

    /// 전체 바인딩 수 (현재 location과 무관한 local 바인딩 포함)
    pub fn binding_count(&self) -> usize {
        self.inner.registry.binding_count()
    }

    /// 바인딩이 남아있는 scope 목록
    pub fn scopes(&self) -> Vec<Scope> {
        self.inner.registry.scopes()
    }

    /// 특정 scope/event 버킷 크기
    pub fn listener_count(&self, scope: &Scope, event: &str) -> usize {
        self.inner.registry.len(scope, event)
    }

    fn bind(&self, scope: Scope, event: &str, listener: Listener) -> RemovalHandle {
        self.inner.registry.bind(scope, event, listener)
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.inner.id)
            .field("registry", &self.inner.registry)
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}
