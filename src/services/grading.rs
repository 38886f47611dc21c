//! 评分服务
//!
//! 纯函数：相同的抽题和作答总是得到相同的结果，可以在回顾时重新计算

use crate::models::quiz::{GradeResult, QuestionOutcome, QuizSample, UserAnswerState};
use std::collections::BTreeSet;

/// 按集合相等判定每道题是否答对
///
/// 没有作答记录的题目按空选择处理；没有正确选项且未作答的题目判为正确
pub fn grade(sample: &QuizSample, answers: &UserAnswerState) -> GradeResult {
    let outcomes: Vec<QuestionOutcome> = sample
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let expected = question.correct_indices();
            let selected = answers.get(&index).cloned().unwrap_or_else(BTreeSet::new);
            QuestionOutcome {
                index,
                correct: expected == selected,
                selected,
                expected,
            }
        })
        .collect();

    let score = outcomes.iter().filter(|o| o.correct).count();
    GradeResult { outcomes, score }
}
