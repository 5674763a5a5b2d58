/// スタンドアロンHTTPサーバーのエントリポイント
///
/// # 環境変数
/// - `BIND_ADDR`: リッスンアドレス（デフォルト: 127.0.0.1:8080）
/// - `RUST_LOG`: ログレベル（デフォルト: info）
/// - その他は`AppConfig::from_env`を参照
use notion_markdown::infrastructure::{init_logging, AppConfig};
use notion_markdown::{create_router, shutdown_signal, AppState};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    tracing::info!("Notion Markdown API サーバーを起動します");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "設定の読み込みに失敗しました");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        timezone = %config.query.timezone,
        date_property_name = %config.query.date_property_name,
        secret_enabled = config.auth.worker_secret.is_some(),
        "設定を読み込みました"
    );

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Notionクライアントの初期化に失敗しました");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                error = %e,
                addr = %config.bind_addr,
                "アドレスのバインドに失敗しました"
            );
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("リッスン開始: {}", config.bind_addr);

    // shutdown_signal()がシグナルを受信すると新規接続の受付を停止し、
    // 処理中のリクエストの完了を待ってから終了する
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "サーバーが異常終了しました");
        return ExitCode::FAILURE;
    }

    tracing::info!("サーバーが正常に停止しました");
    ExitCode::SUCCESS
}
