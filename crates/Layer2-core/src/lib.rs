//! # emitter-core
//!
//! Scope 인식 publish/subscribe emitter:
//! - Listener: (scope, event) 별 리스너 레지스트리 + RemovalHandle
//! - Dispatch: global → 현재 location 순서로 리스너를 비동기 전달
//! - Emitter: 컴포넌트마다 하나씩 소유하는 공개 API
//!
//! ## 흐름
//!
//! ```text
//! subscribe_local / subscribe_global / subscribe_once
//!        │
//!        ▼
//!   Registry ── bind ──► RemovalHandle
//!        ▲
//!        │ lookup(global) + lookup(current location)
//!        │
//!   Dispatcher ◄── trigger(event, args)
//!        │
//!        ▼
//!   Scheduler.schedule(task) × N   (fire-and-forget)
//! ```

pub mod dispatch;
pub mod emitter;
pub mod listener;

pub use dispatch::Dispatcher;
pub use emitter::{Emitter, EmitterBuilder, EmitterId, Listener, OnScope};
pub use listener::{BindingId, Registry, RemovalHandle, Scope};
