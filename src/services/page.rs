//! # 시청 페이지 렌더링
//!
//! 서버 상태를 마크업 사이사이에 끼워 넣지 않고,
//! 뷰 모델(`WatchView`) 전체를 JSON 한 덩어리로 직렬화해
//! `<script type="application/json">` 블록에 담습니다.
//! 클라이언트 엔진은 이 블록만 읽으면 되고 마크업을 긁을 필요가 없습니다.

use crate::error::AppError;
use crate::models::WatchView;

const WATCH_TEMPLATE: &str = include_str!("../../templates/watch.html");
const NOTICE_TEMPLATE: &str = include_str!("../../templates/notice.html");

/// JSON을 `<script>` 블록 안에 안전하게 넣을 수 있도록 `<`, `>`, `&`를 이스케이프합니다.
///
/// serde_json 출력에서 이 문자들은 문자열 안에만 나타나므로
/// `\u003c` 같은 유니코드 이스케이프로 바꿔도 같은 JSON입니다.
/// `</script>`로 블록을 조기에 닫는 입력을 막습니다.
pub fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

/// 시청 페이지 HTML을 만듭니다.
pub fn render_watch_page(view: &WatchView) -> Result<String, AppError> {
    let json = serde_json::to_string(view)
        .map_err(|e| AppError::Internal(format!("failed to serialize watch view: {e}")))?;
    Ok(WATCH_TEMPLATE.replace("{{SESSION_JSON}}", &escape_script_json(&json)))
}

/// 중립 안내 페이지 HTML을 만듭니다. 메시지는 고정 문구만 받습니다.
pub fn render_notice_page(message: &'static str) -> String {
    NOTICE_TEMPLATE.replace("{{MESSAGE}}", message)
}
