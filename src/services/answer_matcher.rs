//! 答案匹配服务 - 业务能力层
//!
//! 为页面上的一道题找出正确选项字母：优先用页面显示的答案，其次按题干查题库

use crate::error::AppResult;
use crate::infrastructure::PageNode;
use crate::models::bank::QuestionBank;
use crate::services::page_parser::{extract_stem, revealed_letters};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// 匹配来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// 页面直接显示了正确答案
    Revealed,
    /// 在题库中按题干找到
    BankMatch,
    /// 两者都没有
    Unmatched,
}

/// 匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub letters: BTreeSet<char>,
    pub status: MatchStatus,
    /// 查题库时使用的题干；`Revealed` 时不读取题干
    pub stem: Option<String>,
}

impl Resolution {
    fn revealed(letters: BTreeSet<char>) -> Self {
        Self {
            letters,
            status: MatchStatus::Revealed,
            stem: None,
        }
    }
}

/// 题干比较规则
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StemPolicy {
    /// 逐字相等
    #[default]
    Exact,
    /// 连续空白折叠为一个空格并去掉首尾空白后比较
    CollapseWhitespace,
}

impl StemPolicy {
    pub fn from_flag(normalize: bool) -> Self {
        if normalize {
            StemPolicy::CollapseWhitespace
        } else {
            StemPolicy::Exact
        }
    }

    pub fn normalize(self, stem: &str) -> String {
        match self {
            StemPolicy::Exact => stem.to_string(),
            StemPolicy::CollapseWhitespace => {
                static WHITESPACE: OnceLock<Regex> = OnceLock::new();
                let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
                re.replace_all(stem.trim(), " ").into_owned()
            }
        }
    }
}

/// 答案匹配器
#[derive(Debug, Clone, Default)]
pub struct AnswerMatcher {
    policy: StemPolicy,
}

impl AnswerMatcher {
    pub fn new(policy: StemPolicy) -> Self {
        Self { policy }
    }

    /// 按题干在题库中查找正确字母
    pub fn lookup(&self, stem: &str, bank: &QuestionBank) -> Option<BTreeSet<char>> {
        let record = match self.policy {
            StemPolicy::Exact => bank.find_by_stem(stem),
            policy => {
                let wanted = policy.normalize(stem);
                bank.find_by(|candidate| policy.normalize(candidate) == wanted)
            }
        }?;
        Some(record.correct_letters())
    }

    /// 解析一道题的正确答案
    ///
    /// 页面显示的答案为空时按未显示处理，继续查题库
    pub async fn resolve<N: PageNode>(&self, node: &N, bank: &QuestionBank) -> AppResult<Resolution> {
        let letters = revealed_letters(node).await?;
        if !letters.is_empty() {
            return Ok(Resolution::revealed(letters));
        }

        let stem = extract_stem(node).await?;
        let resolution = match self.lookup(&stem, bank) {
            Some(letters) => Resolution {
                letters,
                status: MatchStatus::BankMatch,
                stem: Some(stem),
            },
            None => Resolution {
                letters: BTreeSet::new(),
                status: MatchStatus::Unmatched,
                stem: Some(stem),
            },
        };
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{QuestionOption, QuestionRecord};

    fn bank() -> QuestionBank {
        QuestionBank::from_records(vec![QuestionRecord::new(
            "单选题",
            "What  is\t2+2?",
            vec![QuestionOption::new("x", false), QuestionOption::new("y", true)],
        )])
        .0
    }

    #[test]
    fn test_exact_lookup_is_strict() {
        let matcher = AnswerMatcher::default();
        assert_eq!(matcher.lookup("What  is\t2+2?", &bank()), Some(BTreeSet::from(['B'])));
        assert_eq!(matcher.lookup("What is 2+2?", &bank()), None);
    }

    #[test]
    fn test_collapse_whitespace_lookup() {
        let matcher = AnswerMatcher::new(StemPolicy::CollapseWhitespace);
        assert_eq!(matcher.lookup(" What is 2+2? ", &bank()), Some(BTreeSet::from(['B'])));
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(StemPolicy::from_flag(false), StemPolicy::Exact);
        assert_eq!(StemPolicy::from_flag(true).normalize("a \n b"), "a b");
    }
}
