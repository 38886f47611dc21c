//! 题目解析服务 - 业务能力层
//!
//! 把页面上的题目节点转换成 `QuestionRecord`。单个节点出错只跳过该节点，不影响整页。

use crate::error::{AppError, AppResult, ExtractionError};
use crate::infrastructure::selectors;
use crate::infrastructure::PageNode;
use crate::models::question::{letter_for, QuestionOption, QuestionRecord, MAX_OPTIONS};
use crate::utils::logging::truncate_text;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// 被跳过的节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    /// 节点在页面中的位置（从 0 开始）
    pub index: usize,
    pub reason: ExtractionError,
}

/// 一页的解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseBatch {
    pub records: Vec<QuestionRecord>,
    pub skipped: Vec<SkippedNode>,
}

impl ParseBatch {
    pub fn total(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// 去掉题干前的编号前缀
///
/// 在第一个 ')' 处切开，保留之后的全部内容（包括后面出现的括号）。
///
/// 没有 ')' 时视为没有前缀，返回整段标题。这里有意不按"取 ')' 之后的部分"
/// 字面处理：那样会得到空题干，而空题干在 `extract_stem` 中会被当作解析错误跳过，
/// 整道题就丢了。
pub fn strip_stem_prefix(header_text: &str) -> String {
    let trimmed = header_text.trim();
    match trimmed.split_once(')') {
        Some((_, rest)) => rest.trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// 去掉题型标签两侧的括号
pub fn clean_type_label(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '(' || c == ')')
        .trim()
        .to_string()
}

/// 从一段文字中解析正确答案字母
///
/// 文字不含标记时返回 None；含标记时返回去掉标记后的每个非空白字符。
pub fn parse_answer_text(text: &str) -> Option<BTreeSet<char>> {
    if !text.contains(selectors::ANSWER_MARKER) {
        return None;
    }
    let letters = text
        .replace(selectors::ANSWER_MARKER, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Some(letters)
}

/// 读取节点上直接显示的正确答案
///
/// 没有答案元素时返回空集合，不算错误
pub async fn revealed_letters<N: PageNode>(node: &N) -> AppResult<BTreeSet<char>> {
    for span in node.find_all(selectors::ANSWER_SPANS).await? {
        if let Some(letters) = parse_answer_text(&span.text_content().await?) {
            return Ok(letters);
        }
    }
    Ok(BTreeSet::new())
}

/// 读取节点的题干
pub async fn extract_stem<N: PageNode>(node: &N) -> AppResult<String> {
    let header = node
        .find(selectors::HEADER)
        .await?
        .ok_or_else(|| AppError::missing_element(selectors::HEADER))?;
    let stem = strip_stem_prefix(&header.text_content().await?);
    if stem.is_empty() {
        return Err(ExtractionError::EmptyStem.into());
    }
    Ok(stem)
}

/// 题目解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct PageParser;

impl PageParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析全部节点，出错的节点记入 `skipped`
    pub async fn parse_all<N: PageNode>(&self, nodes: &[N]) -> ParseBatch {
        info!("找到了 {} 道题目，正在开始解析...", nodes.len());
        let mut batch = ParseBatch::default();

        for (index, node) in nodes.iter().enumerate() {
            match self.parse_node(node).await {
                Ok(record) => {
                    debug!(
                        "第 {} 题解析完成: {} ({} 个选项)",
                        index + 1,
                        truncate_text(&record.stem, 30),
                        record.options.len()
                    );
                    batch.records.push(record);
                }
                Err(e) => {
                    let reason = e.into_extraction();
                    warn!("解析第 {} 道题目时出错: {}", index + 1, reason);
                    batch.skipped.push(SkippedNode { index, reason });
                }
            }
        }

        batch
    }

    /// 解析单个题目节点
    pub async fn parse_node<N: PageNode>(&self, node: &N) -> AppResult<QuestionRecord> {
        let type_label = node
            .find(selectors::TYPE_LABEL)
            .await?
            .ok_or_else(|| AppError::missing_element(selectors::TYPE_LABEL))?;
        let kind = clean_type_label(&type_label.text().await?);

        let stem = extract_stem(node).await?;
        let correct_letters = revealed_letters(node).await?;

        let rows = node.find_all(selectors::OPTION_ROWS).await?;
        if rows.len() > MAX_OPTIONS {
            return Err(ExtractionError::TooManyOptions {
                count: rows.len(),
                max: MAX_OPTIONS,
            }
            .into());
        }

        let mut options = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let text_node = row
                .find(selectors::OPTION_TEXT)
                .await?
                .ok_or_else(|| AppError::missing_element(selectors::OPTION_TEXT))?;
            let text = text_node.text().await?.trim().to_string();
            let is_correct = letter_for(index).is_some_and(|l| correct_letters.contains(&l));
            options.push(QuestionOption::new(text, is_correct));
        }

        Ok(QuestionRecord::new(kind, stem, options))
    }
}
