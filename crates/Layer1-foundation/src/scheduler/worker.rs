//! TokioScheduler - tokio 런타임 위의 단일 워커
//!
//! 워커 하나가 unbounded 채널에서 task를 꺼내 순서대로 실행하므로
//! 제출 순서가 그대로 실행 순서가 됩니다. task 사이마다 양보(yield)하여
//! 런타임의 다른 작업과 교차 실행됩니다.

use super::{run_isolated, Scheduler, Task};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// tokio 기반 scheduler
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<Task>,
}

impl TokioScheduler {
    /// 현재 런타임에 워커 생성
    ///
    /// # Panics
    ///
    /// tokio 런타임 컨텍스트 밖에서 호출하면 panic합니다 (`Handle::current`).
    /// 런타임 밖에서는 [`TokioScheduler::spawn_on`]을 사용하세요.
    pub fn spawn() -> Self {
        Self::spawn_on(&Handle::current())
    }

    /// 지정한 런타임에 워커 생성
    pub fn spawn_on(handle: &Handle) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Task>();

        handle.spawn(async move {
            debug!("Scheduler worker started");
            while let Some(task) = receiver.recv().await {
                run_isolated(task);
                tokio::task::yield_now().await;
            }
            debug!("Scheduler worker stopped");
        });

        Self { sender }
    }

    /// 이 호출 이전에 제출된 모든 task가 실행될 때까지 대기
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.schedule(Box::new(move || {
            let _ = done_tx.send(());
        }));
        // 워커가 종료된 경우 sender가 drop되어 바로 반환
        let _ = done_rx.await;
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, task: Task) {
        if self.sender.send(task).is_err() {
            warn!("Scheduler worker is gone, dropping task");
        }
    }
}
