//! # camview 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 예약 저장소(SQLite) 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 라우터와 미들웨어 설정
//! 6. HTTP 서버 시작

use anyhow::Result;
use camview::{
    config::Config,
    routes::{self, AppState},
    services::{SessionResolver, ViewSettings},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 camview, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camview=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!(
        "Starting camview on {}:{} (site offset {}, stream {})",
        config.host,
        config.port,
        config.site_offset,
        config.stream_path
    );
    if let Some(secs) = config.resync_interval_secs {
        tracing::info!("Countdown resync enabled every {}s", secs);
    }

    // ── 4단계: 연결 풀 생성과 마이그레이션 ──
    // 풀은 요청 경계(AppState)가 소유하고, 판정기에 명시적으로 주입됩니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 5단계: 애플리케이션 상태와 라우터 ──
    let state = AppState {
        resolver: SessionResolver::new(pool.clone(), config.site_offset),
        view: ViewSettings::from(&config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 배포 환경이 STATIC_DIR에 파일을 두었으면 /static 아래로 서빙합니다.
    // 페이지 템플릿 자체는 /static 자산을 참조하지 않습니다.
    let static_dir = Path::new(&config.static_dir);
    let app = if static_dir.exists() {
        tracing::info!("Serving static files from {}", config.static_dir);
        routes::router(state).nest_service("/static", ServeDir::new(static_dir))
    } else {
        tracing::warn!(
            "Static directory {} not found, /static is not mounted",
            config.static_dir
        );
        routes::router(state)
    };
    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
