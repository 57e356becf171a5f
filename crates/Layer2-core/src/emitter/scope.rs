//! OnScope - `global` / `local` 구독을 나란히 노출하는 view

use super::Emitter;
use crate::listener::RemovalHandle;
use serde_json::Value;

/// `emitter.on_scope().global(..)` / `.local(..)`
#[derive(Debug, Clone, Copy)]
pub struct OnScope<'a> {
    emitter: &'a Emitter,
}

impl<'a> OnScope<'a> {
    pub(super) fn new(emitter: &'a Emitter) -> Self {
        Self { emitter }
    }

    pub fn global<F>(self, event: &str, callback: F) -> RemovalHandle
    where
        F: Fn(&Emitter, &[Value]) + Send + Sync + 'static,
    {
        self.emitter.subscribe_global(event, callback)
    }

    pub fn local<F>(self, event: &str, callback: F) -> RemovalHandle
    where
        F: Fn(&Emitter, &[Value]) + Send + Sync + 'static,
    {
        self.emitter.subscribe_local(event, callback)
    }
}
