//! 自测会话状态机
//!
//! 状态：`Setup → InProgress(index) → Submitted → ReviewDone`。
//! 提交时只调用纯函数 `grade`，回顾阶段可随时重新计算。

use crate::error::{AppResult, QuizError};
use crate::models::quiz::{GradeResult, QuizSample, UserAnswerState};
use crate::services::grading::grade;
use std::collections::BTreeSet;

/// 会话状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    Setup,
    InProgress { index: usize },
    Submitted { result: GradeResult },
    ReviewDone,
}

impl QuizState {
    fn name(&self) -> &'static str {
        match self {
            QuizState::Setup => "Setup",
            QuizState::InProgress { .. } => "InProgress",
            QuizState::Submitted { .. } => "Submitted",
            QuizState::ReviewDone => "ReviewDone",
        }
    }
}

/// 一次自测会话
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: QuizState,
    sample: QuizSample,
    answers: UserAnswerState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: QuizState::Setup,
            sample: QuizSample::from_questions(Vec::new()),
            answers: UserAnswerState::new(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn sample(&self) -> &QuizSample {
        &self.sample
    }

    pub fn answers(&self) -> &UserAnswerState {
        &self.answers
    }

    /// 当前题目下标
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::InProgress { index } => Some(index),
            _ => None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.current_index()
            .is_some_and(|index| index + 1 == self.sample.len())
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    /// 开始测验，重置作答记录
    pub fn start(&mut self, sample: QuizSample) -> AppResult<()> {
        if self.state != QuizState::Setup {
            return Err(self.invalid("start").into());
        }
        if sample.is_empty() {
            return Err(QuizError::InvalidSampleSize {
                requested: 0,
                available: 0,
            }
            .into());
        }
        self.sample = sample;
        self.answers.clear();
        self.state = QuizState::InProgress { index: 0 };
        Ok(())
    }

    /// 切换当前题目某个选项的选中状态
    pub fn toggle(&mut self, option: usize) -> AppResult<()> {
        self.toggle_all(&[option])
    }

    /// 一次切换多个选项，任一选项越界时什么都不改
    pub fn toggle_all(&mut self, options: &[usize]) -> AppResult<()> {
        let index = self.current_index().ok_or_else(|| self.invalid("toggle"))?;
        let count = self.sample.get(index).map(|q| q.options.len()).unwrap_or(0);
        if let Some(&option) = options.iter().find(|&&option| option >= count) {
            return Err(QuizError::OptionOutOfRange { option, count }.into());
        }

        let selected = self.answers.entry(index).or_default();
        for &option in options {
            if !selected.remove(&option) {
                selected.insert(option);
            }
        }
        Ok(())
    }

    /// 当前题目的已选选项
    pub fn selected(&self) -> BTreeSet<usize> {
        self.current_index()
            .and_then(|index| self.answers.get(&index).cloned())
            .unwrap_or_default()
    }

    pub fn next(&mut self) -> AppResult<()> {
        match self.current_index() {
            Some(index) if index + 1 < self.sample.len() => {
                self.state = QuizState::InProgress { index: index + 1 };
                Ok(())
            }
            _ => Err(self.invalid("next").into()),
        }
    }

    pub fn prev(&mut self) -> AppResult<()> {
        match self.current_index() {
            Some(index) if index > 0 => {
                self.state = QuizState::InProgress { index: index - 1 };
                Ok(())
            }
            _ => Err(self.invalid("prev").into()),
        }
    }

    /// 提交，只能在最后一题进行
    pub fn submit(&mut self) -> AppResult<GradeResult> {
        if !self.is_last() {
            return Err(self.invalid("submit").into());
        }
        let result = grade(&self.sample, &self.answers);
        self.state = QuizState::Submitted {
            result: result.clone(),
        };
        Ok(result)
    }

    /// 结束回顾
    pub fn finish_review(&mut self) -> AppResult<()> {
        if !matches!(self.state, QuizState::Submitted { .. }) {
            return Err(self.invalid("finish_review").into());
        }
        self.state = QuizState::ReviewDone;
        Ok(())
    }
}
