//! Cookies 存取
//!
//! 登录状态以 JSON 数组保存，字段沿用浏览器导出的命名（httpOnly 等）

use crate::error::{AppResult, FileError};
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 保存在文件中的一条 cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

impl From<&Cookie> for StoredCookie {
    fn from(cookie: &Cookie) -> Self {
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: Some(cookie.domain.clone()),
            path: Some(cookie.path.clone()),
            secure: cookie.secure,
            http_only: cookie.http_only,
        }
    }
}

impl StoredCookie {
    pub fn to_param(&self) -> CookieParam {
        let mut param = CookieParam::new(self.name.clone(), self.value.clone());
        param.domain = self.domain.clone();
        param.path = self.path.clone();
        param.secure = Some(self.secure);
        param.http_only = Some(self.http_only);
        param
    }
}

/// 读取 cookies 文件；文件不存在或格式错误时返回空列表
pub async fn load_cookies(path: &Path) -> Vec<StoredCookie> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Cookies文件 '{}' 不存在，将在登录后创建。", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("读取Cookies时出错: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(cookies) => cookies,
        Err(e) => {
            warn!("Cookies文件 '{}' 格式错误: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// 保存 cookies
pub async fn save_cookies(path: &Path, cookies: &[StoredCookie]) -> AppResult<()> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(cookies).map_err(|e| FileError::SerializeFailed {
        path: display.clone(),
        source: e,
    })?;
    fs::write(path, json)
        .await
        .map_err(|e| FileError::WriteFailed {
            path: display,
            source: e,
        })?;
    Ok(())
}
