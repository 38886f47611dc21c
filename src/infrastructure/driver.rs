//! 页面驱动能力接口
//!
//! 核心逻辑只依赖这两个 trait，不认识具体的浏览器元素类型

use crate::error::AppResult;
use async_trait::async_trait;

/// 页面上的一个节点
#[async_trait]
pub trait PageNode: Send + Sync + Sized {
    /// 在当前节点下查找第一个匹配的子节点
    async fn find(&self, selector: &str) -> AppResult<Option<Self>>;

    /// 在当前节点下按文档顺序查找所有匹配的子节点
    async fn find_all(&self, selector: &str) -> AppResult<Vec<Self>>;

    /// 渲染后的可见文本
    async fn text(&self) -> AppResult<String>;

    /// 原始 textContent（包含隐藏部分）
    async fn text_content(&self) -> AppResult<String>;
}

/// 页面驱动
#[async_trait]
pub trait PageDriver: Send + Sync {
    type Node: PageNode;

    /// 当前页面上所有题目节点
    async fn question_nodes(&self) -> AppResult<Vec<Self::Node>>;

    /// 点击节点
    async fn click(&self, node: &Self::Node) -> AppResult<()>;
}
