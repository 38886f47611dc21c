//! 题目处理上下文
//!
//! 封装"我正在处理哪个页面的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 页面地址（用于日志和警告文件）
    pub page_url: String,

    /// 题目在页面中的序号（从1开始）
    pub question_index: usize,

    /// 页面题目总数
    pub total: usize,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(page_url: impl Into<String>, question_index: usize, total: usize) -> Self {
        Self {
            page_url: page_url.into(),
            question_index,
            total,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 {}/{}]", self.question_index, self.total)
    }
}
