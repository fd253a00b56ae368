//! # 카운트다운 상태와 표시 형식

const SECONDS_PER_DAY: i64 = 86_400;

/// 남은 초를 `D? H:MM:SS` 형식으로 표시합니다.
///
/// - 하루 미만: `"0:00:02"`, `"1:59:59"`
/// - 하루 이상: `"1 day 02:03:04"`, `"3 days 00:00:05"` (일 단위가 붙으면 시도 두 자리)
/// - 음수는 0으로 취급
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let days = seconds / SECONDS_PER_DAY;
    let rest = seconds % SECONDS_PER_DAY;
    let (h, m, s) = (rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => format!("{h}:{m:02}:{s:02}"),
        1 => format!("1 day {h:02}:{m:02}:{s:02}"),
        _ => format!("{days} days {h:02}:{m:02}:{s:02}"),
    }
}

/// 세션 상태 기계의 단계
///
/// ```text
/// Idle ──(active)──→ Playing ⇄ Recovering
///   │                   │          │
///   └──(inactive)──→  Ended ←──────┘   (만료, 치명적 오류, 취소)
/// ```
/// `Ended`는 종착 상태입니다. 한 번 들어가면 빠져나오지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Recovering,
    Ended,
}

/// 컨트롤러가 단독으로 소유하는 카운트다운 상태
///
/// `remaining`은 초기화 이후 판정(SessionDecision)과 무관하게 로컬 틱으로만 줄어듭니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining: i64,
    pub phase: Phase,
}

impl CountdownState {
    pub fn new(remaining: i64) -> Self {
        Self {
            remaining: remaining.max(0),
            phase: Phase::Idle,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// 1초를 소비하고 남은 초를 반환합니다. 0 아래로는 내려가지 않습니다.
    pub fn consume_second(&mut self) -> i64 {
        self.remaining = (self.remaining - 1).max(0);
        self.remaining
    }

    /// 남은 초를 더 작은 값으로만 낮춥니다. 늘리는 요청은 무시합니다.
    pub fn lower_to(&mut self, remaining: i64) -> bool {
        let remaining = remaining.max(0);
        if remaining < self.remaining {
            self.remaining = remaining;
            true
        } else {
            false
        }
    }
}
