/// Lambda Function URL用エントリポイント
///
/// スタンドアロンサーバーと同じaxumルーターをLambda HTTPランタイムで実行する。
/// `BIND_ADDR`は使用しない。
use lambda_http::{run, Error};
use notion_markdown::infrastructure::{init_logging, AppConfig};
use notion_markdown::{create_router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("Notion Markdown Lambda関数を初期化");

    // 設定・クライアントはコールドスタート時に1回だけ構築する
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    run(create_router(state)).await
}
