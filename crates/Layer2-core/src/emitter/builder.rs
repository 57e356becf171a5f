//! EmitterBuilder - 설정/협력자를 조립하여 Emitter 생성

use super::{Emitter, Listener};
use crate::dispatch::Dispatcher;
use crate::listener::Registry;
use emitter_foundation::{
    Diagnostics, EmitterConfig, Error, LocationResolver, Result, Scheduler, TracingDiagnostics,
};
use std::sync::Arc;

/// Emitter 빌더
///
/// ```ignore
/// let emitter = Emitter::builder()
///     .config(EmitterConfig::load("emitter.toml")?)
///     .resolver(Arc::new(location.clone()))
///     .scheduler(Arc::new(TokioScheduler::spawn()))
///     .build()?;
/// ```
pub struct EmitterBuilder {
    config: EmitterConfig,
    resolver: Option<Arc<dyn LocationResolver>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl EmitterBuilder {
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
            resolver: None,
            scheduler: None,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn LocationResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// 설정 검증 후 생성
    pub fn build(self) -> Result<Emitter> {
        self.config.validate()?;

        let resolver = self
            .resolver
            .ok_or_else(|| Error::InvalidInput("location resolver is required".to_string()))?;
        let scheduler = self
            .scheduler
            .ok_or_else(|| Error::InvalidInput("scheduler is required".to_string()))?;

        Ok(Self::assemble(self.config, resolver, scheduler, self.diagnostics))
    }

    pub(super) fn assemble(
        config: EmitterConfig,
        resolver: Arc<dyn LocationResolver>,
        scheduler: Arc<dyn Scheduler>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Emitter {
        let registry: Arc<Registry<Listener>> =
            Arc::new(Registry::new(config.listener_warn_threshold, diagnostics));
        let dispatcher = Dispatcher::new(registry.clone(), resolver, scheduler, config.root_location)
            .with_trace_dispatch(config.trace_dispatch);

        Emitter::from_parts(registry, dispatcher)
    }
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
