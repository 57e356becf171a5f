//! # emitter-foundation
//!
//! Foundation layer for ScopedEmitter:
//! - Error: 에러 타입 (설정, 시나리오)
//! - Config: EmitterConfig (경고 임계값, 루트 location)
//! - Location: 현재 location 제공자 (`LocationResolver`)
//! - Scheduler: 콜백 지연 실행 (`QueueScheduler`, `TokioScheduler`)
//! - Diagnostics: 관찰용 경고 sink
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layer4-cli (scenario replay)                           │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer2-core                                            │
//! │  Emitter ── Registry ── Dispatcher                      │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer1-foundation (이 레이어)                          │
//! │  ├── LocationResolver   (router가 구현)                 │
//! │  ├── Scheduler          (이벤트 루프 / tokio)           │
//! │  └── Diagnostics        (tracing)                       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod location;
pub mod scheduler;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    EmitterConfig, DEFAULT_LISTENER_WARN_THRESHOLD, DEFAULT_ROOT_LOCATION, EMITTER_CONFIG_FILE,
};

// ============================================================================
// Collaborators (외부 협력자)
// ============================================================================
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use location::{normalize_location, LocationResolver, SharedLocation};
pub use scheduler::{QueueScheduler, Scheduler, Task, TokioScheduler};
