//! 自动选择服务 - 业务能力层
//!
//! 先取消所有已选中的选项，再依次点击目标字母对应的选项行。
//! 单个选项点击失败只记录，不影响其余选项。

use crate::infrastructure::selectors;
use crate::infrastructure::{PageDriver, PageNode};
use crate::models::question::letter_for;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 一道题的点击统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickReport {
    pub deselected: usize,
    pub selected: usize,
    pub failures: usize,
}

/// 选项点击器
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerClicker {
    delay: Duration,
}

impl AnswerClicker {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 在一道题上选中 `letters` 对应的选项
    pub async fn apply<D: PageDriver>(
        &self,
        driver: &D,
        node: &D::Node,
        letters: &BTreeSet<char>,
    ) -> ClickReport {
        let mut report = ClickReport::default();

        let rows = match node.find_all(selectors::OPTION_ROWS).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("读取选项时出错: {}", e);
                report.failures += 1;
                return report;
            }
        };

        // 取消所有已选中的选项，保证从干净状态开始
        for (index, row) in rows.iter().enumerate() {
            let is_selected = match row.find(selectors::SELECTED_MARK).await {
                Ok(mark) => mark.is_some(),
                Err(e) => {
                    warn!("读取第 {} 个选项的选中状态时出错: {}", index + 1, e);
                    report.failures += 1;
                    continue;
                }
            };
            if is_selected {
                self.click(driver, row, index, &mut report, ClickKind::Deselect)
                    .await;
            }
        }

        // 点击正确答案
        for (index, row) in rows.iter().enumerate() {
            let Some(letter) = letter_for(index) else {
                break;
            };
            if letters.contains(&letter) {
                self.click(driver, row, index, &mut report, ClickKind::Select)
                    .await;
            }
        }

        report
    }

    async fn click<D: PageDriver>(
        &self,
        driver: &D,
        row: &D::Node,
        index: usize,
        report: &mut ClickReport,
        kind: ClickKind,
    ) {
        match driver.click(row).await {
            Ok(()) => {
                debug!("{}第 {} 个选项", kind.label(), index + 1);
                match kind {
                    ClickKind::Deselect => report.deselected += 1,
                    ClickKind::Select => report.selected += 1,
                }
            }
            Err(e) => {
                warn!("点击选项时出错 ({}第 {} 个选项): {}", kind.label(), index + 1, e);
                report.failures += 1;
            }
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ClickKind {
    Deselect,
    Select,
}

impl ClickKind {
    fn label(self) -> &'static str {
        match self {
            ClickKind::Deselect => "取消",
            ClickKind::Select => "选择",
        }
    }
}
