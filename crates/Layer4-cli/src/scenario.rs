//! Scenario - Emitter 동작 재현 스크립트
//!
//! ```toml
//! initialLocation = "/inbox"
//!
//! [config]
//! listenerWarnThreshold = 20
//!
//! [[step]]
//! action = "subscribe"
//! id = "badge"
//! event = "mail"
//! scope = "local"
//!
//! [[step]]
//! action = "trigger"
//! event = "mail"
//! args = [1, "urgent"]
//!
//! [[step]]
//! action = "navigate"
//! to = "/settings"
//! ```

use emitter_core::{Emitter, RemovalHandle};
use emitter_foundation::{
    EmitterConfig, Error, Result, SharedLocation, TokioScheduler, DEFAULT_ROOT_LOCATION,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// Scenario 정의
// ============================================================================

/// 시나리오 파일
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Emitter 설정
    #[serde(default)]
    pub config: EmitterConfig,

    /// 시작 location
    #[serde(default = "default_initial_location")]
    pub initial_location: String,

    /// 순서대로 적용할 단계
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_initial_location() -> String {
    DEFAULT_ROOT_LOCATION.to_string()
}

/// 구독 범위
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeScope {
    #[default]
    Local,
    Global,
    Once,
}

/// 시나리오 단계
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// location 변경
    Navigate { to: String },

    /// 리스너 등록. `extra`는 once 리스너에게만 전달됨
    Subscribe {
        id: String,
        event: String,
        #[serde(default)]
        scope: SubscribeScope,
        #[serde(default)]
        extra: Vec<Value>,
    },

    /// 등록한 리스너 제거
    Remove { id: String },

    /// 이벤트 발생
    Trigger {
        event: String,
        #[serde(default)]
        args: Vec<Value>,
    },

    /// 스케줄된 콜백이 모두 실행될 때까지 대기
    Flush,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::scenario(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// 실제로 실행된 리스너 호출 한 건
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub listener: String,
    pub event: String,
    pub args: Vec<Value>,
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.listener,
            self.event,
            Value::from(self.args.clone())
        )
    }
}

// ============================================================================
// ScenarioRunner
// ============================================================================

/// 시나리오 실행기
///
/// tokio 런타임 안에서 생성해야 합니다 (`TokioScheduler` 사용).
pub struct ScenarioRunner {
    location: SharedLocation,
    scheduler: Arc<TokioScheduler>,
    emitter: Emitter,
    handles: HashMap<String, RemovalHandle>,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl ScenarioRunner {
    pub fn new(config: EmitterConfig, initial_location: &str) -> Result<Self> {
        let location = SharedLocation::at(initial_location);
        let scheduler = Arc::new(TokioScheduler::spawn());
        let emitter = Emitter::builder()
            .config(config)
            .resolver(Arc::new(location.clone()))
            .scheduler(scheduler.clone())
            .build()?;

        Ok(Self {
            location,
            scheduler,
            emitter,
            handles: HashMap::new(),
            deliveries: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// 시나리오 전체 실행 후 전달 기록 반환
    pub async fn run(scenario: &Scenario) -> Result<Vec<Delivery>> {
        let mut runner = Self::new(scenario.config.clone(), &scenario.initial_location)?;
        for (index, step) in scenario.steps.iter().enumerate() {
            runner.apply(index + 1, step).await?;
        }
        Ok(runner.finish().await)
    }

    /// 단계 하나 적용
    pub async fn apply(&mut self, index: usize, step: &Step) -> Result<()> {
        debug!(step = index, ?step, "Applying scenario step");

        match step {
            Step::Navigate { to } => self.location.navigate(to.clone()),
            Step::Subscribe {
                id,
                event,
                scope,
                extra,
            } => {
                if self.handles.contains_key(id) {
                    return Err(Error::scenario(format!(
                        "step {}: listener '{}' already subscribed",
                        index, id
                    )));
                }
                let handle = self.subscribe(id, event, *scope, extra.clone());
                self.handles.insert(id.clone(), handle);
            }
            Step::Remove { id } => {
                let handle = self.handles.remove(id).ok_or_else(|| {
                    Error::scenario(format!("step {}: unknown listener '{}'", index, id))
                })?;
                let removed = handle.remove();
                debug!(listener = %id, removed, "Removed listener");
            }
            Step::Trigger { event, args } => {
                let scheduled = self.emitter.trigger(event, args.clone());
                info!(event = %event, scheduled, location = %self.location.current(), "Triggered");
            }
            Step::Flush => self.scheduler.flush().await,
        }

        Ok(())
    }

    /// 남은 콜백을 모두 실행하고 전달 기록 반환
    pub async fn finish(self) -> Vec<Delivery> {
        self.scheduler.flush().await;
        let deliveries = self.deliveries.lock().clone();
        deliveries
    }

    fn subscribe(
        &self,
        id: &str,
        event: &str,
        scope: SubscribeScope,
        extra: Vec<Value>,
    ) -> RemovalHandle {
        let deliveries = self.deliveries.clone();
        let listener = id.to_string();

        match scope {
            SubscribeScope::Once => {
                self.emitter
                    .subscribe_once(event, extra, move |event, extra| {
                        deliveries.lock().push(Delivery {
                            listener,
                            event: event.to_string(),
                            args: extra.to_vec(),
                        });
                    })
            }
            SubscribeScope::Global | SubscribeScope::Local => {
                let name = event.to_string();
                let record = move |_emitter: &Emitter, args: &[Value]| {
                    deliveries.lock().push(Delivery {
                        listener: listener.clone(),
                        event: name.clone(),
                        args: args.to_vec(),
                    });
                };
                if scope == SubscribeScope::Global {
                    self.emitter.subscribe_global(event, record)
                } else {
                    self.emitter.subscribe_local(event, record)
                }
            }
        }
    }
}
