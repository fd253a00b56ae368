//! # 세션 이벤트 루프
//!
//! 컨트롤러를 실제 시간에 연결합니다.
//! 한 태스크 안에서 1초 타이머와 플레이어 이벤트 채널을 번갈아 기다리며,
//! 각 이벤트는 다음 이벤트가 처리되기 전에 끝까지 실행됩니다 (협조적 단일 흐름).
//!
//! ```text
//!   IntervalTicks ──tick──┐
//!                         ├─→ tokio::select! (biased: 틱 우선) ─→ LiveSessionController
//!   mpsc<SessionEvent> ───┘
//! ```
//!
//! 같은 순간에 틱과 오류가 동시에 준비되면 틱을 먼저 처리합니다.
//! 그 틱으로 세션이 만료되면 뒤따르는 오류는 종료된 세션에 도착하여 무시됩니다.

use super::controller::{EndReason, LiveSessionController};
use super::player::{PlaybackError, Player, SessionView, TickSource};
use crate::models::SessionDecision;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval};

/// 컨트롤러 바깥에서 들어오는 이벤트
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// 플레이어가 보고한 오류
    PlayerError(PlaybackError),
    /// 플레이어가 복구 후 재생을 재개함
    PlaybackResumed,
    /// 서버에서 다시 받아온 판정 (재동기화가 켜진 경우)
    Resync(SessionDecision),
    /// 페이지 이탈 등 명시적 종료
    Cancel,
}

/// `tokio::time::Interval` 기반 타이머
///
/// `start` 전이나 `cancel` 후에는 `next()`가 영원히 대기합니다.
/// `select!` 안에서 영원히 대기하는 분기는 선택되지 않으므로,
/// 멈춘 타이머는 이벤트 채널만 남겨 두는 것과 같습니다.
#[derive(Debug, Default)]
pub struct IntervalTicks {
    /// 동작 중일 때만 Some. None으로 바꾸는 것이 곧 취소입니다.
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 틱까지 기다립니다.
    pub async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                // tick()은 예정 시각(Instant)을 돌려주지만 여기서는 쓰지 않습니다
                interval.tick().await;
            }
            // pending(): 절대 완료되지 않는 Future
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicks {
    fn start(&mut self, period: Duration) {
        // interval()은 첫 틱이 즉시 완료되므로 한 주기 뒤부터 시작합니다.
        self.interval = Some(interval_at(Instant::now() + period, period));
    }

    fn cancel(&mut self) {
        // Interval을 drop하면 예약된 틱도 함께 사라집니다
        self.interval = None;
    }
}

/// 세션이 끝날 때까지 이벤트를 처리하고, 끝난 이유를 돌려줍니다.
///
/// 이벤트 채널의 송신 측이 모두 닫히면 페이지가 사라진 것으로 보고 취소합니다.
///
/// ## 루프 한 바퀴
/// 1. 타이머가 없으면 (이미 종료) 빠져나옴
/// 2. 틱과 이벤트 중 먼저 준비된 것 하나를 처리 (동시에 준비되면 틱)
/// 3. 컨트롤러가 `Ended`가 되면 종료
///
/// 컨트롤러는 값으로 받아 이 함수가 소유합니다.
/// 함수가 끝나면 컨트롤러와 남은 이벤트 수신자가 함께 drop됩니다.
pub async fn drive<P, V>(
    mut controller: LiveSessionController<P, V, IntervalTicks>,
    mut events: mpsc::Receiver<SessionEvent>,
) -> EndReason
where
    P: Player,
    V: SessionView,
{
    while !controller.is_ended() {
        // 종료되면 teardown이 타이머를 꺼내 가므로 None이 됩니다
        let Some(ticks) = controller.ticks_mut() else {
            break;
        };

        // select!: 여러 Future 중 먼저 완료된 분기 하나만 실행하고 나머지는 취소합니다.
        // 취소된 recv()는 메시지를 잃지 않으므로 다음 바퀴에서 다시 받습니다.
        tokio::select! {
            // biased: 무작위 대신 위에서부터 순서대로 확인 (틱 우선)
            biased;

            _ = ticks.next() => controller.tick(),
            // recv()가 None이면 송신 측이 모두 닫힌 것 (페이지 이탈)
            event = events.recv() => match event {
                Some(SessionEvent::PlayerError(err)) => controller.on_player_error(err),
                Some(SessionEvent::PlaybackResumed) => controller.on_playback_resumed(),
                Some(SessionEvent::Resync(decision)) => controller.resync(&decision),
                Some(SessionEvent::Cancel) | None => controller.cancel(),
            },
        }
    }

    // 루프를 빠져나오면 항상 종료 상태이므로 end_reason은 Some입니다
    controller
        .end_reason()
        .cloned()
        .unwrap_or(EndReason::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::super::controller::tests::{decision, FakePlayer, FakeView, SharedLog};
    use super::super::countdown::Phase;
    use super::super::player::{ErrorClass, Notice, PlaybackSupport};
    use super::*;
    use std::collections::VecDeque;

    fn controller(
        decision: &SessionDecision,
        log: &SharedLog,
    ) -> LiveSessionController<FakePlayer, FakeView, IntervalTicks> {
        LiveSessionController::start(
            decision,
            "/hls/cam1.m3u8",
            FakePlayer {
                log: log.clone(),
                support: PlaybackSupport::Adaptive,
                recovery_results: VecDeque::new(),
            },
            FakeView(log.clone()),
            IntervalTicks::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_expiry_in_real_time() {
        let log = SharedLog::default();
        let c = controller(&decision(100, 3), &log);
        let (_tx, rx) = mpsc::channel(8);

        let started = Instant::now();
        let reason = drive(c, rx).await;

        assert_eq!(reason, EndReason::Expired);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert_eq!(
            log.borrow().countdowns,
            vec!["0:00:03", "0:00:02", "0:00:01", "0:00:00"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_cancels_session() {
        let log = SharedLog::default();
        let c = controller(&decision(7200, 500), &log);
        let (tx, rx) = mpsc::channel(8);
        drop(tx);

        assert_eq!(drive(c, rx).await, EndReason::Cancelled);
        assert_eq!(log.borrow().releases, 1);
        assert_eq!(log.borrow().notices, vec![Notice::SessionFinished]);
    }

    #[tokio::test(start_paused = true)]
    async fn glitch_mid_session_keeps_counting() {
        let log = SharedLog::default();
        let c = controller(&decision(7200, 5), &log);
        let (tx, rx) = mpsc::channel(8);

        let session = drive(c, rx);
        let feeder = async {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            tx.send(SessionEvent::PlayerError(PlaybackError::new(
                ErrorClass::Network,
                true,
                "fragLoadError",
            )))
            .await
            .unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            tx.send(SessionEvent::PlaybackResumed).await.unwrap();
        };

        let (reason, ()) = tokio::join!(session, feeder);
        assert_eq!(reason, EndReason::Expired);

        let log = log.borrow();
        assert_eq!(log.reloads, 1);
        assert_eq!(
            log.countdowns,
            vec!["0:00:05", "0:00:04", "0:00:03", "0:00:02", "0:00:01", "0:00:00"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn inactive_session_returns_immediately() {
        let log = SharedLog::default();
        let mut inactive = decision(100, 50);
        inactive.active = false;
        let c = controller(&inactive, &log);
        assert_eq!(c.phase(), Phase::Ended);

        let (_tx, rx) = mpsc::channel(1);
        assert_eq!(drive(c, rx).await, EndReason::Inactive);
    }
}
