//! Dispatcher - 이벤트를 리스너에게 비동기 전달
//!
//! 1. 현재 location 조회
//! 2. delivery set 구성: global 버킷 → 현재 location 버킷 (각각 등록 순서)
//! 3. 리스너마다 task 하나를 scheduler에 제출 (fire-and-forget)
//!
//! delivery set은 스케줄링 전에 스냅샷되므로, 이후의 바인딩/제거는
//! 다음 trigger부터 반영됩니다.

use crate::emitter::{Emitter, Listener};
use crate::listener::{Registry, Scope};
use emitter_foundation::{normalize_location, LocationResolver, Scheduler};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// 이벤트 디스패처
pub struct Dispatcher {
    registry: Arc<Registry<Listener>>,
    resolver: Arc<dyn LocationResolver>,
    scheduler: Arc<dyn Scheduler>,
    root_location: String,
    trace_dispatch: bool,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry<Listener>>,
        resolver: Arc<dyn LocationResolver>,
        scheduler: Arc<dyn Scheduler>,
        root_location: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            resolver,
            scheduler,
            root_location: root_location.into(),
            trace_dispatch: false,
        }
    }

    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }

    /// 현재 location (빈 값은 루트로 치환)
    pub fn current_location(&self) -> String {
        normalize_location(self.resolver.current_location(), &self.root_location)
    }

    /// location에서의 delivery set: global 먼저, 그 다음 location
    pub fn delivery_set(&self, location: &str, event: &str) -> Vec<Listener> {
        let mut listeners = self.registry.lookup(&Scope::Global, event);
        listeners.extend(self.registry.lookup(&Scope::location(location), event));
        listeners
    }

    /// 이벤트 전달. 스케줄된 task 수 반환
    pub fn dispatch(&self, receiver: &Emitter, event: &str, args: Vec<Value>) -> usize {
        let location = self.current_location();
        let listeners = self.delivery_set(&location, event);

        if listeners.is_empty() {
            return 0;
        }

        let args: Arc<[Value]> = args.into();
        let count = listeners.len();

        for (position, listener) in listeners.into_iter().enumerate() {
            if self.trace_dispatch {
                trace!(
                    emitter = %receiver.id(),
                    location = %location,
                    event,
                    position,
                    "Scheduling listener"
                );
            }

            let receiver = receiver.clone();
            let args = args.clone();
            self.scheduler
                .schedule(Box::new(move || listener(&receiver, args.as_ref())));
        }

        count
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("root_location", &self.root_location)
            .field("trace_dispatch", &self.trace_dispatch)
            .finish()
    }
}
