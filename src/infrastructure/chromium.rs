//! chromiumoxide 适配器
//!
//! 唯一的 page owner，把 DevTools 元素包装成 `PageNode`

use crate::error::{AppError, AppResult};
use crate::infrastructure::driver::{PageDriver, PageNode};
use crate::infrastructure::selectors;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam};
use chromiumoxide::element::Element;
use chromiumoxide::Page;

/// 用 JS 点击，绕过元素遮挡
const JS_CLICK: &str = "function() { this.click(); }";
const JS_TEXT_CONTENT: &str = "function() { return this.textContent; }";

/// 浏览器页面驱动
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 导航到指定 URL
    pub async fn goto(&self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        Ok(())
    }

    /// 当前页面 URL
    pub async fn current_url(&self) -> AppResult<Option<String>> {
        Ok(self.page.url().await?)
    }

    /// 读取当前页面的 cookies
    pub async fn cookies(&self) -> AppResult<Vec<Cookie>> {
        Ok(self.page.get_cookies().await?)
    }

    /// 写入 cookies
    pub async fn set_cookies(&self, cookies: Vec<CookieParam>) -> AppResult<()> {
        if cookies.is_empty() {
            return Ok(());
        }
        self.page.set_cookies(cookies).await?;
        Ok(())
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    type Node = ChromiumNode;

    async fn question_nodes(&self) -> AppResult<Vec<ChromiumNode>> {
        let elements = self
            .page
            .find_elements(selectors::QUESTION)
            .await
            .map_err(|e| AppError::query_failed(selectors::QUESTION, e.to_string()))?;
        Ok(elements.into_iter().map(ChromiumNode::new).collect())
    }

    async fn click(&self, node: &ChromiumNode) -> AppResult<()> {
        node.element.call_js_fn(JS_CLICK, false).await?;
        Ok(())
    }
}

/// 浏览器中的一个元素
pub struct ChromiumNode {
    element: Element,
}

impl ChromiumNode {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

#[async_trait]
impl PageNode for ChromiumNode {
    async fn find(&self, selector: &str) -> AppResult<Option<Self>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> AppResult<Vec<Self>> {
        let elements = self
            .element
            .find_elements(selector)
            .await
            .map_err(|e| AppError::query_failed(selector, e.to_string()))?;
        Ok(elements.into_iter().map(ChromiumNode::new).collect())
    }

    async fn text(&self) -> AppResult<String> {
        Ok(self.element.inner_text().await?.unwrap_or_default())
    }

    async fn text_content(&self) -> AppResult<String> {
        let returns = self.element.call_js_fn(JS_TEXT_CONTENT, false).await?;
        let text = returns
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(text)
    }
}
