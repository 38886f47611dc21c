//! 单个页面处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **提取**：解析当前页面的所有题目并合并进题库
//! 2. **作答**：逐题调用 `AnswerFlow`，严格按顺序处理（同一页面不能并发点击）
//! 3. **统计输出**：记录作答、未匹配、失败数量

use crate::infrastructure::PageDriver;
use crate::models::bank::QuestionBank;
use crate::orchestrator::bank_session::BankSession;
use crate::services::{MatchStatus, PageParser, ParseBatch};
use crate::workflow::{AnswerFlow, ProcessResult, QuestionCtx};
use crate::utils::logging::log_merge_summary;
use anyhow::{Context, Result};
use tracing::{error, info, warn};

/// 提取合并结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub batch: ParseBatch,
    pub added: usize,
    pub bank_size: usize,
}

/// 作答统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerStats {
    pub total: usize,
    pub revealed: usize,
    pub bank_matched: usize,
    pub no_answer: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub click_failures: usize,
}

/// 解析当前页面并合并进题库
pub async fn scrape_and_merge<D: PageDriver>(
    driver: &D,
    session: &mut BankSession,
) -> Result<ScrapeSummary> {
    let nodes = driver.question_nodes().await.context("读取题目列表失败")?;
    if nodes.is_empty() {
        warn!("未能找到类名为 'questionLi' 的题目。请检查页面内容或类名是否正确。");
    }

    let batch = PageParser::new().parse_all(&nodes).await;
    if batch.records.is_empty() {
        warn!("未能提取到任何题目。");
        return Ok(ScrapeSummary {
            batch,
            added: 0,
            bank_size: session.bank().len(),
        });
    }

    let added = session
        .merge_and_persist(batch.records.clone())
        .await
        .with_context(|| format!("保存题库失败: {}", session.path().display()))?;

    log_merge_summary(batch.records.len(), batch.skipped.len(), added, session.bank().len());

    Ok(ScrapeSummary {
        batch,
        added,
        bank_size: session.bank().len(),
    })
}

/// 在当前页面上自动作答
pub async fn auto_answer_page<D: PageDriver>(
    driver: &D,
    bank: &QuestionBank,
    flow: &AnswerFlow,
    page_url: &str,
) -> Result<AnswerStats> {
    let nodes = driver.question_nodes().await.context("读取题目列表失败")?;
    let mut stats = AnswerStats {
        total: nodes.len(),
        ..Default::default()
    };

    if nodes.is_empty() {
        warn!("未找到题目，无法执行自动选择。");
        return Ok(stats);
    }

    for (index, node) in nodes.iter().enumerate() {
        let ctx = QuestionCtx::new(page_url, index + 1, nodes.len());

        match flow.run(driver, node, bank, &ctx).await {
            Ok(ProcessResult::Answered { status, clicks, .. }) => {
                match status {
                    MatchStatus::Revealed => stats.revealed += 1,
                    _ => stats.bank_matched += 1,
                }
                stats.click_failures += clicks.failures;
            }
            Ok(ProcessResult::NoAnswer { status }) => {
                match status {
                    MatchStatus::Revealed => stats.revealed += 1,
                    _ => stats.bank_matched += 1,
                }
                stats.no_answer += 1;
            }
            Ok(ProcessResult::Unmatched { .. }) => {
                stats.unmatched += 1;
            }
            Err(e) => {
                error!("{} 处理失败: {}", ctx, e);
                stats.failed += 1;
            }
        }
    }

    log_answer_complete(&stats);
    Ok(stats)
}

// ========== 日志辅助函数 ==========

fn log_answer_complete(stats: &AnswerStats) {
    info!("\n自动选择完成！");
    info!(
        "题目统计: 页面答案 {}, 题库匹配 {}, 无可选答案 {}, 总计 {}",
        stats.revealed, stats.bank_matched, stats.no_answer, stats.total
    );
    if stats.unmatched > 0 {
        warn!(
            "提示: 有 {} 道题目因无法在页面或题库中找到答案而未作答。",
            stats.unmatched
        );
    }
    if stats.failed > 0 || stats.click_failures > 0 {
        warn!(
            "提示: {} 道题目读取失败，{} 次点击失败。",
            stats.failed, stats.click_failures
        );
    }
}
