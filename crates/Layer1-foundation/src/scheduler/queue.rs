//! QueueScheduler - 수동 drain 방식의 FIFO 큐
//!
//! 마이크로태스크 큐 모델: `schedule`은 큐에 넣기만 하고,
//! 소유자가 `run_pending`을 호출할 때 실행됩니다.

use super::{run_isolated, Scheduler, Task};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// 결정적(deterministic) FIFO scheduler
#[derive(Default)]
pub struct QueueScheduler {
    queue: Mutex<VecDeque<Task>>,
}

impl QueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 대기 중인 task 수
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// 큐가 빌 때까지 실행
    ///
    /// 실행 도중 새로 제출된 task도 같은 호출에서 실행됩니다.
    /// panic한 task도 실행 횟수에 포함됩니다.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        // lock은 task 실행 전에 해제 (task가 다시 schedule할 수 있음)
        while let Some(task) = self.pop() {
            run_isolated(task);
            ran += 1;
        }
        ran
    }

    fn pop(&self) -> Option<Task> {
        self.queue.lock().pop_front()
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&self, task: Task) {
        self.queue.lock().push_back(task);
    }
}

impl std::fmt::Debug for QueueScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
