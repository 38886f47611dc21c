use crate::error::{AppError, AppResult};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// 连接到已开启调试端口的浏览器（如 `chrome --remote-debugging-port=9222`）
///
/// 已有标签页的地址以 `reuse_prefix` 开头时直接复用它，
/// 这样用户先手动登录好的答题页不会被新标签页替代。
/// 否则复用第一个标签页，一个都没有时新建空白页。
pub async fn connect_to_browser_and_page(
    port: u16,
    reuse_prefix: Option<&str>,
) -> AppResult<(Browser, Page)> {
    let endpoint = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", endpoint);

    let (browser, mut handler) = Browser::connect(&endpoint)
        .await
        .map_err(|e| AppError::browser_connection_failed(port, e))?;

    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    // 等待标签页列表同步
    sleep(Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("浏览器中已有 {} 个标签页", pages.len());

    if let Some(page) = find_page_by_url(&pages, reuse_prefix).await {
        return Ok((browser, page));
    }

    let page = match pages.into_iter().next() {
        Some(page) => page,
        None => {
            warn!("浏览器中没有可用的标签页，新建空白页");
            browser.new_page("about:blank").await?
        }
    };
    Ok((browser, page))
}

async fn find_page_by_url(pages: &[Page], prefix: Option<&str>) -> Option<Page> {
    let prefix = prefix.filter(|p| !p.is_empty())?;
    for page in pages {
        if let Ok(Some(url)) = page.url().await {
            if url.starts_with(prefix) {
                info!("✓ 复用已打开的页面: {}", url);
                return Some(page.clone());
            }
        }
    }
    None
}
