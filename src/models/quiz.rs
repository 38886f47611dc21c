//! 自测相关的数据结构

use crate::error::{AppResult, QuizError};
use crate::models::bank::QuestionBank;
use crate::models::question::QuestionRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// 一次自测抽出的题目，会话期间固定不变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSample {
    questions: Vec<QuestionRecord>,
}

impl QuizSample {
    /// 从题库中不放回地随机抽取 `count` 道题
    pub fn draw<R: Rng + ?Sized>(bank: &QuestionBank, count: usize, rng: &mut R) -> AppResult<Self> {
        if count == 0 || count > bank.len() {
            return Err(QuizError::InvalidSampleSize {
                requested: count,
                available: bank.len(),
            }
            .into());
        }

        let questions = bank
            .records()
            .choose_multiple(rng, count)
            .cloned()
            .collect();
        Ok(Self { questions })
    }

    pub fn from_questions(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }
}

/// 用户作答：题目下标 → 已选选项下标集合
pub type UserAnswerState = BTreeMap<usize, BTreeSet<usize>>;

/// 单题评分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub index: usize,
    pub correct: bool,
    pub selected: BTreeSet<usize>,
    pub expected: BTreeSet<usize>,
}

/// 评分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeResult {
    pub outcomes: Vec<QuestionOutcome>,
    pub score: usize,
}

impl GradeResult {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.outcomes.get(index).map(|o| o.correct)
    }
}
