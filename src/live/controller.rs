//! # 라이브 세션 컨트롤러 (LiveSessionController)
//!
//! 페이지 한 번당 하나씩 만들어져, 서버가 넘겨준 `SessionDecision` 스냅샷으로부터
//! 카운트다운·진행 막대·플레이어 수명을 관리하는 상태 기계입니다.
//!
//! ## 규칙 요약
//! - 비활성 판정이면 타이머도 플레이어도 만들지 않고 곧바로 `Ended`
//! - 1초 틱마다 `remaining`을 1 줄이고, 0이 되면 `Ended`
//! - 재생 오류는 `PlaybackError::recovery()` 표에 따라 복구하거나 종료
//! - `Ended`는 종착 상태: 이후 들어오는 틱, 오류, 재개 알림은 모두 무시
//! - 종료 처리(`teardown`)는 몇 번 불러도 눈에 보이는 효과는 한 번만 일어남
//!
//! ## 상태 전이표
//! | 현재 | 입력 | 다음 | 부수 효과 |
//! |------|------|------|-----------|
//! | Idle | 활성 판정 | Playing | 타이머 시작, 스트림 로드 |
//! | Idle | 비활성 판정 | Ended | 종료 화면만 표시 |
//! | Playing | 틱 (남은 시간 > 0) | Playing | 카운트다운·진행 막대 갱신 |
//! | Playing / Recovering | 틱 (남은 시간 = 0) | Ended | teardown |
//! | Playing | 복구 가능한 오류 | Recovering | reload 또는 media recover |
//! | Recovering | 재생 재개 | Playing | 없음 |
//! | Playing / Recovering | 치명적 오류, 취소 | Ended | teardown |
//!
//! 모든 메서드가 `&mut self`를 받으므로 한 세션의 상태 전이가 서로 끼어들 수 없습니다.
//! 잠금(lock) 없이 소유권만으로 상호 배제가 보장됩니다.

use super::countdown::{format_countdown, CountdownState, Phase};
use super::player::{
    Notice, PlaybackError, PlaybackSupport, Player, Recovery, SessionView, TickSource, TICK_PERIOD,
};
use crate::models::{progress_percent, SessionDecision};

/// 세션이 끝난 이유
///
/// `teardown`에 한 번 기록되면 바뀌지 않습니다.
/// 종료 화면의 문구(`Notice`)도 이 값으로 고릅니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// 페이지 로드 시점에 이미 비활성 판정
    Inactive,
    /// 남은 시간이 0에 도달
    Expired,
    /// 복구할 수 없는 재생 오류
    Fatal(PlaybackError),
    /// 페이지 이탈 등 명시적 취소
    Cancelled,
}

/// 한 시청 세션의 상태 기계
///
/// 제네릭 매개변수 세 개는 바깥 세계와 닿는 부분입니다.
/// - `P: Player` — 실제 HLS 플레이어 (브라우저에서는 hls.js, 테스트에서는 가짜)
/// - `V: SessionView` — 카운트다운·진행 막대·안내 문구를 그리는 화면
/// - `T: TickSource` — 1초 주기 타이머
///
/// 컨트롤러는 이 셋을 소유(move)합니다. 세션이 끝나면 플레이어와 타이머는
/// `Option::take()`로 꺼내져 해제되고, 화면만 마지막 상태를 보여주기 위해 남습니다.
pub struct LiveSessionController<P, V, T> {
    /// 진행 막대 계산용 전체 길이 (0으로 나누지 않도록 최소 1)
    total_seconds: i64,
    /// 복구 시 다시 불러올 스트림 경로
    stream_path: String,
    state: CountdownState,
    /// 재생 불가 런타임이거나 종료 후에는 None
    player: Option<P>,
    view: V,
    /// 타이머가 동작 중일 때만 Some. 종료 시 take()로 꺼내 한 번만 취소합니다.
    ticks: Option<T>,
    /// 아직 끝나지 않았으면 None
    end_reason: Option<EndReason>,
}

// impl 블록의 트레이트 경계:
// 상태 전이 메서드들은 세 의존성이 각자의 트레이트를 구현할 때만 쓸 수 있습니다.
impl<P: Player, V: SessionView, T: TickSource> LiveSessionController<P, V, T> {
    /// 판정 스냅샷으로 세션을 시작합니다 (`Idle` → `Playing` 또는 `Ended`).
    ///
    /// `player`와 `ticks`는 값으로 받습니다. 세션을 시작하지 않는 경우(비활성 판정)에는
    /// 이 함수가 끝날 때 그대로 drop되므로, 한 번도 로드되거나 시작되지 않습니다.
    pub fn start(
        decision: &SessionDecision,
        stream_path: impl Into<String>, // &str이든 String이든 받을 수 있도록 Into<String>
        mut player: P,
        view: V,
        mut ticks: T,
    ) -> Self {
        // 처음에는 플레이어도 타이머도 붙이지 않은 Idle 상태로 만듭니다
        let mut controller = Self {
            total_seconds: decision.total_seconds.max(1),
            stream_path: stream_path.into(),
            state: CountdownState::new(decision.remaining_seconds),
            player: None,
            view,
            ticks: None,
            end_reason: None,
        };

        // 비활성 판정: 타이머도 플레이어도 만들지 않고 바로 종료 화면
        if !decision.active {
            controller.teardown(EndReason::Inactive);
            return controller;
        }
        // now == end인 활성 판정: 0초짜리 재생은 시작하지 않습니다
        if controller.state.remaining == 0 {
            controller.teardown(EndReason::Expired);
            return controller;
        }

        // 첫 화면을 그린 뒤 타이머를 켭니다.
        // 첫 틱은 한 주기(1초) 뒤에 오므로, 시작 시점의 값이 먼저 보여야 합니다.
        controller.render_countdown();
        ticks.start(TICK_PERIOD);
        controller.ticks = Some(ticks);
        controller.state.phase = Phase::Playing;
        tracing::info!(
            remaining = controller.state.remaining,
            total = controller.total_seconds,
            "live session started"
        );

        // 런타임의 재생 능력에 따라 플레이어를 붙이거나 버립니다
        match player.support() {
            PlaybackSupport::Unsupported => {
                // 카운트다운은 플레이어와 무관하게 계속 돕니다.
                // player는 여기서 controller에 옮겨지지 않으므로 함수 끝에서 drop됩니다.
                tracing::warn!("runtime cannot play HLS; countdown only");
                controller.view.render_notice(Notice::FormatUnsupported);
            }
            support => {
                tracing::debug!(?support, source = %controller.stream_path, "loading stream");
                let loaded = player.load(&controller.stream_path);
                // 로드가 실패해도 먼저 붙여 둡니다.
                // 그래야 오류 처리 경로가 재시도(reload)나 해제(release)를 할 수 있습니다.
                controller.player = Some(player);
                if let Err(err) = loaded {
                    controller.on_player_error(err);
                }
            }
        }

        controller
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining(&self) -> i64 {
        self.state.remaining
    }

    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// `Option<EndReason>`을 `Option<&EndReason>`으로 빌려줍니다 (복사 없음).
    pub fn end_reason(&self) -> Option<&EndReason> {
        self.end_reason.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 동작 중인 타이머. 종료 후에는 None.
    ///
    /// 이벤트 루프(`runner::drive`)가 다음 틱을 기다릴 때 씁니다.
    pub fn ticks_mut(&mut self) -> Option<&mut T> {
        self.ticks.as_mut()
    }

    /// 1초 틱 하나를 처리합니다.
    ///
    /// 남은 시간은 서버 시계를 다시 보지 않고 로컬 틱으로만 줄어듭니다.
    /// 재생이 멈춰 있는(Recovering) 동안에도 카운트다운은 계속됩니다.
    pub fn tick(&mut self) {
        // 종료 뒤 늦게 도착한 틱 (타이머 취소와 경합한 경우)
        if self.is_ended() {
            return;
        }

        // consume_second()는 0 아래로 내려가지 않으므로 만료는 정확히 한 번 감지됩니다
        if self.state.consume_second() == 0 {
            self.teardown(EndReason::Expired);
            return;
        }
        self.render_countdown();
    }

    /// 플레이어가 보고한 오류를 처리합니다.
    ///
    /// ## 처리 순서
    /// 1. 이미 끝난 세션이면 무시
    /// 2. 남은 시간이 0이면 복구보다 만료가 우선
    /// 3. 플레이어가 없으면 (재생 불가 런타임) 무시
    /// 4. `PlaybackError::recovery()` 표에 따라 무시 / 재로드 / 미디어 복구 / 종료
    pub fn on_player_error(&mut self, err: PlaybackError) {
        if self.is_ended() {
            tracing::debug!(%err, "playback error after session end ignored");
            return;
        }
        // 만료가 우선: 남은 시간이 없으면 복구 경로로 가지 않습니다.
        if self.state.remaining == 0 {
            self.teardown(EndReason::Expired);
            return;
        }

        // let-else: 플레이어가 붙어 있을 때만 아래로 진행합니다
        let Some(player) = self.player.as_mut() else {
            tracing::debug!(%err, "playback error without attached player ignored");
            return;
        };

        // 복구 동작의 결과(Result)를 attempt에 담고, 실패 여부는 아래에서 한 번에 처리합니다
        let attempt = match err.recovery() {
            Recovery::Ignore => {
                // 치명적이지 않은 오류: 플레이어가 스스로 회복합니다
                tracing::debug!(%err, "non-fatal playback error");
                return;
            }
            Recovery::Terminate => {
                tracing::error!(%err, "unrecoverable playback error");
                self.teardown(EndReason::Fatal(err));
                return;
            }
            Recovery::ReloadSource => {
                // 네트워크 오류: 같은 경로로 매니페스트를 다시 불러옵니다
                tracing::warn!(%err, "reloading stream source");
                player.reload_source(&self.stream_path)
            }
            Recovery::RecoverMedia => {
                // 미디어(디코딩) 오류: 플레이어 내부 복구 절차를 씁니다
                tracing::warn!(%err, "recovering from media error");
                player.recover_media_error()
            }
        };

        match attempt {
            // 복구를 시작했을 뿐이므로 Recovering에 머물다가 재개 알림을 기다립니다
            Ok(()) => self.state.phase = Phase::Recovering,
            // 복구 동작 자체가 실패하면 더 시도하지 않고 종료합니다
            Err(failed) => {
                tracing::error!(%failed, "recovery attempt failed");
                self.teardown(EndReason::Fatal(failed));
            }
        }
    }

    /// 플레이어가 복구 후 재생을 재개했음을 알립니다 (`Recovering` → `Playing`).
    ///
    /// 다른 단계에서 온 알림은 무시합니다. 특히 `Ended`에서 빠져나오는 일은 없습니다.
    pub fn on_playback_resumed(&mut self) {
        if self.state.phase == Phase::Recovering {
            tracing::info!(remaining = self.state.remaining, "playback resumed");
            self.state.phase = Phase::Playing;
        }
    }

    /// 서버에서 다시 받은 판정으로 카운트다운을 보정합니다.
    ///
    /// 남은 시간은 줄어드는 방향으로만 보정하고 늘리지 않습니다.
    /// 화면의 카운트다운이 거꾸로 올라가는 일이 없어야 하기 때문입니다.
    pub fn resync(&mut self, decision: &SessionDecision) {
        if self.is_ended() {
            return;
        }
        // 서버가 이미 비활성이라고 하면 로컬 카운트다운과 무관하게 끝냅니다
        if !decision.active {
            self.teardown(EndReason::Expired);
            return;
        }

        let before = self.state.remaining;
        // lower_to()는 값이 실제로 줄었을 때만 true
        if self.state.lower_to(decision.remaining_seconds) {
            tracing::debug!(before, after = self.state.remaining, "countdown resynced");
            if self.state.remaining == 0 {
                self.teardown(EndReason::Expired);
            } else {
                self.render_countdown();
            }
        }
    }

    /// 페이지 이탈 등으로 세션을 즉시 끝냅니다.
    pub fn cancel(&mut self) {
        self.teardown(EndReason::Cancelled);
    }

    /// 세션을 종료 상태로 보냅니다.
    ///
    /// 타이머 취소, 플레이어 해제, 종료 화면 표시를 정확히 한 번 수행합니다.
    /// 이미 종료된 뒤 다시 부르면 아무것도 하지 않고 `false`를 반환합니다.
    ///
    /// ## 한 번만 실행되는 이유
    /// - 첫 줄의 `is_ended()` 검사가 두 번째 호출을 막습니다.
    /// - 타이머와 플레이어는 `Option::take()`로 꺼내므로, 꺼낸 뒤에는 None만 남습니다.
    pub fn teardown(&mut self, reason: EndReason) -> bool {
        if self.is_ended() {
            return false;
        }

        // 상태부터 바꿉니다: 아래 해제 과정에서 다시 불려도 곧바로 반환됩니다
        self.state.phase = Phase::Ended;
        self.state.remaining = 0;

        // take(): Option 안의 값을 꺼내고 그 자리에 None을 남깁니다
        if let Some(mut ticks) = self.ticks.take() {
            ticks.cancel();
        }
        if let Some(mut player) = self.player.take() {
            player.release();
        }

        // 종료 화면: 0:00:00, 진행 막대 100%, 끝난 이유에 맞는 안내 문구
        self.view.render_countdown(&format_countdown(0));
        self.view.render_progress(100);
        self.view.render_notice(match reason {
            EndReason::Fatal(_) => Notice::PlaybackEnded,
            _ => Notice::SessionFinished,
        });

        tracing::info!(?reason, "live session ended");
        self.end_reason = Some(reason);
        true
    }

    /// 현재 남은 시간으로 카운트다운 문구와 진행 막대를 다시 그립니다.
    fn render_countdown(&mut self) {
        let remaining = self.state.remaining;
        let elapsed = self.total_seconds - remaining;
        self.view.render_countdown(&format_countdown(remaining));
        self.view
            .render_progress(progress_percent(elapsed, self.total_seconds));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::super::player::ErrorClass;
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// 가짜 구현들이 공유하는 호출 기록
    #[derive(Debug, Default)]
    pub(crate) struct Log {
        pub countdowns: Vec<String>,
        pub progress: Vec<u8>,
        pub notices: Vec<Notice>,
        pub loads: usize,
        pub reloads: usize,
        pub media_recoveries: usize,
        pub releases: usize,
        pub timer_starts: usize,
        pub timer_cancels: usize,
    }

    pub(crate) type SharedLog = Rc<RefCell<Log>>;

    pub(crate) struct FakePlayer {
        pub log: SharedLog,
        pub support: PlaybackSupport,
        /// 복구 동작이 차례로 돌려줄 결과 (비어 있으면 Ok)
        pub recovery_results: VecDeque<Result<(), PlaybackError>>,
    }

    impl Player for FakePlayer {
        fn support(&self) -> PlaybackSupport {
            self.support
        }
        fn load(&mut self, _source: &str) -> Result<(), PlaybackError> {
            self.log.borrow_mut().loads += 1;
            Ok(())
        }
        fn reload_source(&mut self, source: &str) -> Result<(), PlaybackError> {
            assert_eq!(source, "/hls/cam1.m3u8");
            self.log.borrow_mut().reloads += 1;
            self.recovery_results.pop_front().unwrap_or(Ok(()))
        }
        fn recover_media_error(&mut self) -> Result<(), PlaybackError> {
            self.log.borrow_mut().media_recoveries += 1;
            self.recovery_results.pop_front().unwrap_or(Ok(()))
        }
        fn release(&mut self) {
            self.log.borrow_mut().releases += 1;
        }
    }

    pub(crate) struct FakeView(pub SharedLog);

    impl SessionView for FakeView {
        fn render_countdown(&mut self, text: &str) {
            self.0.borrow_mut().countdowns.push(text.to_string());
        }
        fn render_progress(&mut self, percent: u8) {
            self.0.borrow_mut().progress.push(percent);
        }
        fn render_notice(&mut self, notice: Notice) {
            self.0.borrow_mut().notices.push(notice);
        }
    }

    pub(crate) struct FakeTicks(pub SharedLog);

    impl TickSource for FakeTicks {
        fn start(&mut self, period: std::time::Duration) {
            assert_eq!(period, TICK_PERIOD);
            self.0.borrow_mut().timer_starts += 1;
        }
        fn cancel(&mut self) {
            self.0.borrow_mut().timer_cancels += 1;
        }
    }

    type TestController = LiveSessionController<FakePlayer, FakeView, FakeTicks>;

    fn at(secs_after_ten: i64) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
            .unwrap()
            + Duration::seconds(secs_after_ten)
    }

    /// 10:00 시작, `total`초 길이 창에서 `remaining`초 남은 시점의 판정
    pub(crate) fn decision(total: i64, remaining: i64) -> SessionDecision {
        SessionDecision::compute(at(0), at(total), at(total - remaining))
    }

    fn start_with(
        decision: &SessionDecision,
        support: PlaybackSupport,
    ) -> (TestController, SharedLog) {
        let log = SharedLog::default();
        let player = FakePlayer {
            log: log.clone(),
            support,
            recovery_results: VecDeque::new(),
        };
        let controller = LiveSessionController::start(
            decision,
            "/hls/cam1.m3u8",
            player,
            FakeView(log.clone()),
            FakeTicks(log.clone()),
        );
        (controller, log)
    }

    fn start(decision: &SessionDecision) -> (TestController, SharedLog) {
        start_with(decision, PlaybackSupport::Adaptive)
    }

    fn fatal(class: ErrorClass) -> PlaybackError {
        PlaybackError::new(class, true, "boom")
    }

    #[test]
    fn active_decision_starts_playing() {
        let (c, log) = start(&decision(7200, 3600));
        assert_eq!(c.phase(), Phase::Playing);
        assert_eq!(c.remaining(), 3600);

        let log = log.borrow();
        assert_eq!(log.loads, 1);
        assert_eq!(log.timer_starts, 1);
        assert_eq!(log.countdowns, vec!["1:00:00"]);
        assert_eq!(log.progress, vec![50]);
    }

    #[test]
    fn inactive_decision_ends_without_timer_or_player() {
        let expired = SessionDecision::compute(at(0), at(7200), at(10_800));
        let (c, log) = start(&expired);

        assert_eq!(c.phase(), Phase::Ended);
        assert_eq!(c.end_reason(), Some(&EndReason::Inactive));
        let log = log.borrow();
        assert_eq!(log.timer_starts, 0);
        assert_eq!(log.timer_cancels, 0);
        assert_eq!(log.loads, 0);
        assert_eq!(log.countdowns, vec!["0:00:00"]);
        assert_eq!(log.notices, vec![Notice::SessionFinished]);
    }

    #[test]
    fn three_ticks_from_three_seconds() {
        let (mut c, log) = start(&decision(100, 3));
        c.tick();
        c.tick();
        assert_eq!(c.phase(), Phase::Playing);
        c.tick();
        assert_eq!(c.phase(), Phase::Ended);
        assert_eq!(c.remaining(), 0);

        let log = log.borrow();
        assert_eq!(log.countdowns, vec!["0:00:03", "0:00:02", "0:00:01", "0:00:00"]);
        assert_eq!(log.progress.last(), Some(&100));
        assert_eq!(log.notices, vec![Notice::SessionFinished]);
        assert_eq!(log.timer_cancels, 1);
        assert_eq!(log.releases, 1);
    }

    #[test]
    fn remaining_decreases_by_one_then_sticks_at_zero() {
        let (mut c, _log) = start(&decision(60, 10));
        let mut previous = c.remaining();
        for _ in 0..10 {
            c.tick();
            assert_eq!(c.remaining(), previous - 1);
            previous = c.remaining();
        }
        assert!(c.is_ended());
        for _ in 0..5 {
            c.tick();
            assert_eq!(c.remaining(), 0);
            assert_eq!(c.phase(), Phase::Ended);
        }
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let (mut c, log) = start(&decision(4, 4));
        c.tick();
        c.tick();
        assert_eq!(log.borrow().progress, vec![0, 25, 50]);
        assert_eq!(c.remaining(), 2);
    }

    #[test]
    fn network_glitch_recovers_without_touching_countdown() {
        let (mut c, log) = start(&decision(7200, 500));
        c.tick();
        c.tick();

        c.on_player_error(fatal(ErrorClass::Network));
        assert_eq!(c.phase(), Phase::Recovering);
        assert_eq!(log.borrow().reloads, 1);

        c.tick();
        c.on_playback_resumed();
        assert_eq!(c.phase(), Phase::Playing);
        assert_eq!(c.remaining(), 497);
    }

    #[test]
    fn media_error_uses_internal_recovery() {
        let (mut c, log) = start(&decision(7200, 500));
        c.on_player_error(fatal(ErrorClass::Media));
        assert_eq!(c.phase(), Phase::Recovering);
        assert_eq!(log.borrow().media_recoveries, 1);
        assert_eq!(log.borrow().reloads, 0);
    }

    #[test]
    fn non_fatal_errors_are_ignored() {
        let (mut c, log) = start(&decision(7200, 500));
        for class in [ErrorClass::Network, ErrorClass::Media, ErrorClass::Other] {
            c.on_player_error(PlaybackError::new(class, false, "stall"));
        }
        assert_eq!(c.phase(), Phase::Playing);
        let log = log.borrow();
        assert_eq!(log.reloads + log.media_recoveries + log.releases, 0);
    }

    #[test]
    fn other_fatal_error_ends_with_playback_notice() {
        let (mut c, log) = start(&decision(7200, 500));
        c.on_player_error(fatal(ErrorClass::Other));

        assert_eq!(c.phase(), Phase::Ended);
        assert!(matches!(c.end_reason(), Some(EndReason::Fatal(_))));
        let log = log.borrow();
        assert_eq!(log.notices, vec![Notice::PlaybackEnded]);
        assert_eq!(log.countdowns.last().map(String::as_str), Some("0:00:00"));
        assert_eq!(log.progress.last(), Some(&100));
        assert_eq!(log.releases, 1);
    }

    #[test]
    fn failed_recovery_attempt_is_fatal() {
        let log = SharedLog::default();
        let player = FakePlayer {
            log: log.clone(),
            support: PlaybackSupport::Adaptive,
            recovery_results: VecDeque::from([Err(fatal(ErrorClass::Network))]),
        };
        let mut c = LiveSessionController::start(
            &decision(7200, 500),
            "/hls/cam1.m3u8",
            player,
            FakeView(log.clone()),
            FakeTicks(log.clone()),
        );

        c.on_player_error(fatal(ErrorClass::Network));
        assert_eq!(c.phase(), Phase::Ended);
        assert_eq!(log.borrow().notices, vec![Notice::PlaybackEnded]);
    }

    #[test]
    fn teardown_twice_matches_teardown_once() {
        let (mut c, log) = start(&decision(7200, 500));
        assert!(c.teardown(EndReason::Cancelled));
        let once = format!("{:?}", log.borrow());

        assert!(!c.teardown(EndReason::Cancelled));
        assert!(!c.teardown(EndReason::Fatal(fatal(ErrorClass::Other))));
        assert_eq!(format!("{:?}", log.borrow()), once);

        let log = log.borrow();
        assert_eq!(log.timer_cancels, 1);
        assert_eq!(log.releases, 1);
        assert_eq!(log.notices.len(), 1);
        assert_eq!(c.end_reason(), Some(&EndReason::Cancelled));
    }

    #[test]
    fn expiry_beats_error_in_the_same_instant() {
        let (mut c, log) = start(&decision(100, 1));
        c.tick();
        c.on_player_error(fatal(ErrorClass::Network));
        c.on_playback_resumed();

        assert_eq!(c.phase(), Phase::Ended);
        assert_eq!(c.end_reason(), Some(&EndReason::Expired));
        assert_eq!(log.borrow().reloads, 0);
        assert_eq!(log.borrow().notices, vec![Notice::SessionFinished]);
    }

    #[test]
    fn unsupported_runtime_counts_down_without_player() {
        let (mut c, log) = start_with(&decision(100, 2), PlaybackSupport::Unsupported);
        assert_eq!(c.phase(), Phase::Playing);
        assert_eq!(log.borrow().loads, 0);
        assert_eq!(log.borrow().notices, vec![Notice::FormatUnsupported]);

        c.on_player_error(fatal(ErrorClass::Other));
        assert_eq!(c.phase(), Phase::Playing);

        c.tick();
        c.tick();
        assert!(c.is_ended());
        assert_eq!(log.borrow().releases, 0);
        assert_eq!(log.borrow().timer_cancels, 1);
    }

    #[test]
    fn resync_only_lowers_remaining() {
        let (mut c, _log) = start(&decision(7200, 500));
        c.resync(&decision(7200, 800));
        assert_eq!(c.remaining(), 500);

        c.resync(&decision(7200, 450));
        assert_eq!(c.remaining(), 450);
        assert_eq!(c.phase(), Phase::Playing);
    }

    #[test]
    fn resync_with_inactive_decision_ends_session() {
        let (mut c, _log) = start(&decision(7200, 500));
        c.resync(&SessionDecision::compute(at(0), at(7200), at(9000)));
        assert_eq!(c.end_reason(), Some(&EndReason::Expired));
    }

    #[test]
    fn ended_never_returns_to_playing() {
        let (mut c, _log) = start(&decision(7200, 500));
        c.on_player_error(fatal(ErrorClass::Network));
        c.cancel();
        c.on_playback_resumed();
        c.resync(&decision(7200, 400));
        assert_eq!(c.phase(), Phase::Ended);
    }
}
