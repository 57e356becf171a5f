//! Scheduler - 콜백 지연 실행
//!
//! Emitter는 콜백을 직접 호출하지 않고 `Scheduler`에 task로 넘깁니다.
//!
//! ## 계약
//!
//! - task는 현재 동기 구간이 끝난 뒤 실행
//! - 정확히 한 번 실행
//! - 같은 scheduler에 제출된 task 사이에서는 제출 순서(FIFO) 유지
//!
//! ## 구현체
//!
//! - [`QueueScheduler`] - 수동으로 비우는 큐 (테스트, 단일 스레드 이벤트 루프)
//! - [`TokioScheduler`] - tokio 런타임 위의 단일 워커 task

mod queue;
mod worker;

pub use queue::QueueScheduler;
pub use worker::TokioScheduler;

use std::panic::{catch_unwind, AssertUnwindSafe};

/// 지연 실행 단위
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// 지연 실행 collaborator
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: Task);
}

/// task 하나를 실행하고 panic은 격리하여 로그로 남김
///
/// 반환값: task가 정상 종료했으면 true
pub(crate) fn run_isolated(task: Task) -> bool {
    match catch_unwind(AssertUnwindSafe(task)) {
        Ok(()) => true,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::error!(panic = %message, "Scheduled task panicked");
            false
        }
    }
}
