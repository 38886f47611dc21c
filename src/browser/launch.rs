use std::path::Path;

use crate::error::{AppResult, DriverError};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 启动浏览器并打开空白页
///
/// # 参数
/// - `headless`: 是否无头模式；登录需要人工操作时应使用有头模式
/// - `executable`: 浏览器可执行文件，未指定时由 chromiumoxide 自动查找
pub async fn launch_browser(headless: bool, executable: Option<&Path>) -> AppResult<(Browser, Page)> {
    info!("🚀 正在启动浏览器...");

    let mut builder = BrowserConfig::builder();
    if headless {
        builder = builder.new_headless_mode();
    } else {
        builder = builder.with_head();
    }
    if let Some(path) = executable {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }
    let config = builder
        .args(vec![
            "--disable-gpu",           // Windows 无头模式必须禁用 GPU
            "--no-sandbox",            // 禁用沙盒，防止权限问题导致的崩溃
            "--disable-dev-shm-usage", // 防止共享内存不足
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            DriverError::LaunchFailed { message: e }
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        DriverError::LaunchFailed {
            message: e.to_string(),
        }
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        e
    })?;

    Ok((browser, page))
}
