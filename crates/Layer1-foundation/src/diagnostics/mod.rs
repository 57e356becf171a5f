//! Diagnostics - 관찰용 경고 출력
//!
//! 경고는 순수하게 관찰 목적이며 동작을 바꾸거나 막지 않습니다.

/// 진단 메시지 sink
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// `tracing::warn!`으로 전달하는 기본 sink
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
