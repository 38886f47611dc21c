//! 终端自测
//!
//! 只负责输入输出，状态变化全部交给 `QuizSession`

use crate::models::bank::QuestionBank;
use crate::models::question::{index_for, letter_for};
use crate::models::quiz::{GradeResult, QuizSample};
use crate::utils::Prompt;
use crate::workflow::{QuizSession, QuizState};
use anyhow::{bail, Result};

/// 答题界面的输入命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    /// 切换这些选项（下标）
    Toggle(Vec<usize>),
    Next,
    Prev,
    Submit,
    Quit,
    Unknown(String),
}

/// 解析一行输入：字母切换选项，n/p/s/q 为导航命令
pub fn parse_command(input: &str) -> QuizCommand {
    match input.trim().to_lowercase().as_str() {
        "n" => QuizCommand::Next,
        "p" => QuizCommand::Prev,
        "s" => QuizCommand::Submit,
        "q" => QuizCommand::Quit,
        other => {
            let indices: Option<Vec<usize>> = other
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .map(index_for)
                .collect();
            match indices {
                Some(indices) if !indices.is_empty() => QuizCommand::Toggle(indices),
                _ => QuizCommand::Unknown(input.trim().to_string()),
            }
        }
    }
}

/// 渲染当前题目
pub fn render_question(session: &QuizSession) -> String {
    let Some(index) = session.current_index() else {
        return String::new();
    };
    let Some(question) = session.sample().get(index) else {
        return String::new();
    };
    let selected = session.selected();

    let mut out = format!("\n题目 {} / {}  ({})\n{}\n", index + 1, session.sample().len(), question.kind, question.stem);
    for (i, option) in question.options.iter().enumerate() {
        let mark = if selected.contains(&i) { "[x]" } else { "[ ]" };
        let letter = letter_for(i).unwrap_or('?');
        out.push_str(&format!("  {} {}. {}\n", mark, letter, option.text));
    }

    let nav = if session.is_last() { "s 提交问卷" } else { "n 下一题" };
    out.push_str(&format!("输入选项字母切换选择，{}，p 上一题，q 退出", nav));
    out
}

/// 渲染答题详情回顾
pub fn render_review(sample: &QuizSample, result: &GradeResult) -> String {
    let mut out = format!("\n测验完成！你的得分: {} / {}\n\n答题详情回顾\n", result.score, result.total());

    for outcome in &result.outcomes {
        let Some(question) = sample.get(outcome.index) else {
            continue;
        };
        let texts = |indices: &std::collections::BTreeSet<usize>| -> Vec<String> {
            indices
                .iter()
                .filter_map(|i| question.options.get(*i).map(|o| o.text.clone()))
                .collect()
        };

        let mut yours = texts(&outcome.selected);
        if yours.is_empty() {
            yours.push("未作答".to_string());
        }

        out.push_str(&format!(
            "{}\n题目 {}: ({})\n{}\n你的答案: {}\n正确答案: {}\n",
            "─".repeat(40),
            outcome.index + 1,
            if outcome.correct { "正确" } else { "错误" },
            question.stem,
            yours.join(", "),
            texts(&outcome.expected).join(", ")
        ));
    }
    out
}

/// 运行一次终端自测
pub async fn run_quiz(bank: &QuestionBank, count: Option<usize>, prompt: &mut Prompt) -> Result<()> {
    if bank.is_empty() {
        bail!("题库为空，无法开始测验");
    }
    println!("欢迎来到测验程序\n题库中共有 {} 道题。", bank.len());

    let mut requested = count;
    let sample = loop {
        let n = match requested.take() {
            Some(n) => n,
            None => {
                let Some(input) = prompt.ask("请输入要抽取的题目数量: ").await? else {
                    return Ok(());
                };
                match input.parse::<usize>() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("请输入一个介于1和{}之间的数字。", bank.len());
                        continue;
                    }
                }
            }
        };
        match QuizSample::draw(bank, n, &mut rand::thread_rng()) {
            Ok(sample) => break sample,
            Err(e) => println!("{}", e),
        }
    };

    let mut session = QuizSession::new();
    session.start(sample)?;

    loop {
        println!("{}", render_question(&session));
        let Some(input) = prompt.ask("> ").await? else {
            return Ok(());
        };

        let outcome = match parse_command(&input) {
            QuizCommand::Toggle(indices) => session.toggle_all(&indices),
            QuizCommand::Next => session.next(),
            QuizCommand::Prev => session.prev(),
            QuizCommand::Submit => session.submit().map(|_| ()),
            QuizCommand::Quit => return Ok(()),
            QuizCommand::Unknown(raw) => {
                println!("无效输入: {}", raw);
                continue;
            }
        };
        if let Err(e) = outcome {
            println!("{}", e);
        }

        if let QuizState::Submitted { result } = session.state() {
            println!("{}", render_review(session.sample(), result));
            session.finish_review()?;
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{QuestionOption, QuestionRecord};
    use crate::services::grading::grade;
    use crate::models::quiz::UserAnswerState;
    use std::collections::BTreeSet;

    fn sample() -> QuizSample {
        QuizSample::from_questions(vec![
            QuestionRecord::new(
                "单选题",
                "中国的首都是？",
                vec![QuestionOption::new("北京", true), QuestionOption::new("上海", false)],
            ),
            QuestionRecord::new(
                "多选题",
                "哪些是偶数",
                vec![QuestionOption::new("2", true), QuestionOption::new("4", true)],
            ),
        ])
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("n"), QuizCommand::Next);
        assert_eq!(parse_command(" P "), QuizCommand::Prev);
        assert_eq!(parse_command("a, c"), QuizCommand::Toggle(vec![0, 2]));
        assert_eq!(parse_command("1"), QuizCommand::Unknown("1".to_string()));
        assert_eq!(parse_command(""), QuizCommand::Unknown(String::new()));
    }

    #[test]
    fn test_render_question_marks_selection() {
        let mut session = QuizSession::new();
        session.start(sample()).unwrap();
        session.toggle(1).unwrap();

        let text = render_question(&session);
        assert!(text.contains("题目 1 / 2"));
        assert!(text.contains("[ ] A. 北京"));
        assert!(text.contains("[x] B. 上海"));
        assert!(text.contains("n 下一题"));
    }

    #[test]
    fn test_render_review() {
        let answers = UserAnswerState::from([(0, BTreeSet::from([0]))]);
        let result = grade(&sample(), &answers);
        let text = render_review(&sample(), &result);

        assert!(text.contains("你的得分: 1 / 2"));
        assert!(text.contains("题目 1: (正确)"));
        assert!(text.contains("题目 2: (错误)"));
        assert!(text.contains("你的答案: 未作答"));
        assert!(text.contains("正确答案: 2, 4"));
    }
}
