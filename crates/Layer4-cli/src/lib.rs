//! # emitter-cli
//!
//! 시나리오 파일(TOML)을 읽어 Emitter에 subscribe / navigate / trigger를
//! 순서대로 적용하고, 실제로 전달된 이벤트를 기록합니다.

pub mod scenario;

pub use scenario::{Delivery, Scenario, ScenarioRunner, Step, SubscribeScope};
