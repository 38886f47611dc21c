pub mod connection;
pub mod launch;

pub use connection::connect_to_browser_and_page;
pub use launch::launch_browser;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ChromiumDriver;
use crate::services::cookie_store::{self, StoredCookie};
use chromiumoxide::Browser;
use std::path::Path;
use tracing::{info, warn};

/// 已打开的浏览器及其页面驱动
pub struct BrowserSession {
    browser: Browser,
    driver: ChromiumDriver,
}

impl BrowserSession {
    /// 按配置连接已有浏览器，或启动新浏览器
    pub async fn open(config: &Config) -> AppResult<Self> {
        let (browser, page) = match config.browser_debug_port {
            Some(port) => connect_to_browser_and_page(port, config.target_url.as_deref()).await?,
            None => launch_browser(config.headless, config.chrome_executable.as_deref()).await?,
        };
        Ok(Self {
            browser,
            driver: ChromiumDriver::new(page),
        })
    }

    pub fn driver(&self) -> &ChromiumDriver {
        &self.driver
    }

    /// 先打开 cookie 所属站点写入 cookies，再导航到目标页面
    pub async fn navigate_with_cookies(
        &self,
        url: &str,
        cookies_path: &Path,
        cookie_domain_url: &str,
    ) -> AppResult<()> {
        let cookies = cookie_store::load_cookies(cookies_path).await;
        if !cookies.is_empty() {
            self.driver.goto(cookie_domain_url).await?;
            let params = cookies.iter().map(StoredCookie::to_param).collect();
            match self.driver.set_cookies(params).await {
                Ok(()) => info!("成功从 '{}' 加载Cookies。", cookies_path.display()),
                Err(e) => warn!("加载Cookies时出错: {}", e),
            }
        }

        info!("正在导航至目标URL: {}", url);
        self.driver.goto(url).await
    }

    /// 保存当前登录状态
    pub async fn save_cookies(&self, cookies_path: &Path) -> AppResult<()> {
        let cookies: Vec<StoredCookie> = self
            .driver
            .cookies()
            .await?
            .iter()
            .map(StoredCookie::from)
            .collect();
        cookie_store::save_cookies(cookies_path, &cookies).await?;
        info!("登录状态已保存到 '{}'。", cookies_path.display());
        Ok(())
    }

    /// 关闭浏览器
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器时出错: {}", e);
        }
    }
}
