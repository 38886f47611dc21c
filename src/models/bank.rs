//! 题库
//!
//! 以题干为唯一键的有序题目集合。合并是纯函数：传入旧题库，返回新题库和新增数量。

use crate::models::question::QuestionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 合并结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub bank: QuestionBank,
    pub added: usize,
}

/// 题库
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从记录列表构建题库，重复题干只保留第一次出现的记录
    ///
    /// 返回题库以及被丢弃的重复条数
    pub fn from_records(records: Vec<QuestionRecord>) -> (Self, usize) {
        let total = records.len();
        let outcome = Self::new().merge(records);
        let dropped = total - outcome.added;
        (outcome.bank, dropped)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.records.iter()
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.find_by_stem(stem).is_some()
    }

    /// 按题干精确查找
    pub fn find_by_stem(&self, stem: &str) -> Option<&QuestionRecord> {
        self.records.iter().find(|r| r.stem == stem)
    }

    /// 按自定义的题干比较规则查找
    pub fn find_by<F>(&self, mut matches: F) -> Option<&QuestionRecord>
    where
        F: FnMut(&str) -> bool,
    {
        self.records.iter().find(|r| matches(&r.stem))
    }

    /// 所有记录中最多的选项数
    pub fn max_option_count(&self) -> usize {
        self.records.iter().map(|r| r.options.len()).max().unwrap_or(0)
    }

    /// 把新抓取的题目合并进题库
    ///
    /// 只追加题干尚未出现过的记录，保持插入顺序；同一批内的重复题干也只收一次。
    pub fn merge(self, scraped: impl IntoIterator<Item = QuestionRecord>) -> MergeOutcome {
        let mut records = self.records;
        let mut existing_stems: HashSet<String> = records.iter().map(|r| r.stem.clone()).collect();
        let mut added = 0;

        for record in scraped {
            if existing_stems.insert(record.stem.clone()) {
                records.push(record);
                added += 1;
            }
        }

        MergeOutcome {
            bank: QuestionBank { records },
            added,
        }
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionOption;

    fn record(stem: &str) -> QuestionRecord {
        QuestionRecord::new(
            "单选题",
            stem,
            vec![QuestionOption::new("x", false), QuestionOption::new("y", true)],
        )
    }

    fn sample_bank() -> QuestionBank {
        QuestionBank::from_records(vec![record("q1"), record("q2")]).0
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let bank = sample_bank();
        let outcome = bank.clone().merge(Vec::new());
        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.bank, bank);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let scraped = vec![record("q2"), record("q3"), record("q4")];
        let first = sample_bank().merge(scraped.clone());
        assert_eq!(first.added, 2);

        let second = first.bank.clone().merge(scraped);
        assert_eq!(second.added, 0);
        assert_eq!(second.bank, first.bank);
    }

    #[test]
    fn test_merge_keeps_existing_record_and_order() {
        let mut changed = record("q1");
        changed.kind = "多选题".to_string();
        changed.options.reverse();

        let outcome = sample_bank().merge(vec![record("q3"), changed]);
        let stems: Vec<&str> = outcome.bank.iter().map(|r| r.stem.as_str()).collect();
        assert_eq!(stems, vec!["q1", "q2", "q3"]);
        assert_eq!(outcome.bank.find_by_stem("q1"), Some(&record("q1")));
    }

    #[test]
    fn test_merge_dedups_within_batch() {
        let outcome = QuestionBank::new().merge(vec![record("a"), record("a"), record("b")]);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.bank.len(), 2);
    }

    #[test]
    fn test_from_records_reports_duplicates() {
        let (bank, dropped) = QuestionBank::from_records(vec![record("a"), record("a")]);
        assert_eq!(bank.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_max_option_count() {
        let mut bank = sample_bank();
        assert_eq!(bank.max_option_count(), 2);
        bank = bank
            .merge(vec![QuestionRecord::new("填空题", "blank", Vec::new())])
            .bank;
        assert_eq!(bank.max_option_count(), 2);
        assert_eq!(QuestionBank::new().max_option_count(), 0);
    }
}
