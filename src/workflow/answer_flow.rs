//! 自动答题流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整作答流程
//!
//! 流程顺序：
//! 1. 页面显示的正确答案 → 点击
//! 2. 按题干查题库 → 点击
//! 3. 警告文件（兜底）

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::infrastructure::PageDriver;
use crate::models::bank::QuestionBank;
use crate::services::{AnswerClicker, AnswerMatcher, ClickReport, MatchStatus, WarnWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 单道题的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已作答
    Answered {
        status: MatchStatus,
        letters: BTreeSet<char>,
        clicks: ClickReport,
    },
    /// 找到了题目但没有可点击的答案（如填空题），不做任何操作
    NoAnswer { status: MatchStatus },
    /// 页面和题库都没有答案
    Unmatched { stem: String },
}

/// 自动答题流程
///
/// - 编排"解析答案 → 清空 → 点击"的顺序
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct AnswerFlow {
    matcher: AnswerMatcher,
    clicker: AnswerClicker,
    warn_writer: WarnWriter,
}

impl AnswerFlow {
    pub fn new(matcher: AnswerMatcher, clicker: AnswerClicker, warn_writer: WarnWriter) -> Self {
        Self {
            matcher,
            clicker,
            warn_writer,
        }
    }

    pub async fn run<D: PageDriver>(
        &self,
        driver: &D,
        node: &D::Node,
        bank: &QuestionBank,
        ctx: &QuestionCtx,
    ) -> anyhow::Result<ProcessResult> {
        let resolution = self.matcher.resolve(node, bank).await?;

        if resolution.status == MatchStatus::Unmatched {
            let stem = resolution.stem.unwrap_or_default();
            warn!(
                "{} 警告: 题库中未找到题目 '{}' 的答案。",
                ctx,
                truncate_text(&stem, 30)
            );
            if let Err(e) = self.warn_writer.write(&ctx.page_url, ctx.question_index, &stem) {
                warn!("{} 写入警告文件失败: {}", ctx, e);
            }
            return Ok(ProcessResult::Unmatched { stem });
        }

        if resolution.letters.is_empty() {
            info!("{} 没有可选择的答案，跳过", ctx);
            return Ok(ProcessResult::NoAnswer {
                status: resolution.status,
            });
        }

        let clicks = self
            .clicker
            .apply(driver, node, &resolution.letters)
            .await;

        let answer: String = resolution.letters.iter().collect();
        info!(
            "{} ✓ 已选择 {} ({:?})",
            ctx, answer, resolution.status
        );

        Ok(ProcessResult::Answered {
            status: resolution.status,
            letters: resolution.letters,
            clicks,
        })
    }
}
