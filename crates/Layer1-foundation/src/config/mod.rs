//! Config - Emitter 설정 관리
//!
//! - `emitter.rs` - EmitterConfig (경고 임계값, 루트 location, trace 옵션)

mod emitter;

pub use emitter::{
    EmitterConfig, DEFAULT_LISTENER_WARN_THRESHOLD, DEFAULT_ROOT_LOCATION, EMITTER_CONFIG_FILE,
};
