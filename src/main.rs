use std::env;
use std::path::PathBuf;
use std::time::Duration;

use storefront::{infrastructure::Logger, load_config, router, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 第一个参数可指定配置文件路径
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let _guard = Logger::init(&config.logging)?;

    info!("启动商品店铺服务...");
    info!("远端表格 API: {}", config.catalog.base_url);

    let state = AppState::new(&config)?;
    let app = router(state, Duration::from_secs(config.http.timeout_seconds));

    let addr = config.http.socket_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 服务运行在 http://{}", addr);
    info!("   GET  /             - 商品目录");
    info!("   GET  /admin        - 管理后台");
    info!("   GET  /api/products - 商品列表 (JSON)");
    info!("   GET  /health       - 健康检查");

    axum::serve(listener, app).await?;
    Ok(())
}
