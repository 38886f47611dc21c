use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 选项字母表，按位置确定选项字母
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 可寻址的最大选项数
pub const MAX_OPTIONS: usize = 26;

/// 根据选项下标获取字母，超出字母表时返回 None（不回绕）
pub fn letter_for(index: usize) -> Option<char> {
    LETTERS.as_bytes().get(index).map(|b| *b as char)
}

/// 根据字母获取选项下标
pub fn index_for(letter: char) -> Option<usize> {
    LETTERS.find(letter.to_ascii_uppercase())
}

/// 单个选项
///
/// 在题库文件中序列化为 `[text, isCorrect]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, bool)", into = "(String, bool)")]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

impl From<(String, bool)> for QuestionOption {
    fn from((text, is_correct): (String, bool)) -> Self {
        Self { text, is_correct }
    }
}

impl From<QuestionOption> for (String, bool) {
    fn from(option: QuestionOption) -> Self {
        (option.text, option.is_correct)
    }
}

/// 一道题目的规范记录
///
/// `stem` 是唯一的身份键，去重和匹配都只看它
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub stem: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl QuestionRecord {
    pub fn new(kind: impl Into<String>, stem: impl Into<String>, options: Vec<QuestionOption>) -> Self {
        Self {
            kind: kind.into(),
            stem: stem.into(),
            options,
        }
    }

    /// 按位置给出 (字母, 选项)
    pub fn lettered_options(&self) -> impl Iterator<Item = (char, &QuestionOption)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(i, opt)| letter_for(i).map(|letter| (letter, opt)))
    }

    /// 正确选项的下标集合
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, opt)| opt.is_correct)
            .map(|(i, _)| i)
            .collect()
    }

    /// 正确选项的字母集合
    pub fn correct_letters(&self) -> BTreeSet<char> {
        self.lettered_options()
            .filter(|(_, opt)| opt.is_correct)
            .map(|(letter, _)| letter)
            .collect()
    }

    /// 拼接后的答案字符串，如 "AC"
    pub fn answer_string(&self) -> String {
        self.correct_letters().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_do_not_wrap() {
        assert_eq!(letter_for(0), Some('A'));
        assert_eq!(letter_for(25), Some('Z'));
        assert_eq!(letter_for(26), None);
        assert_eq!(index_for('c'), Some(2));
        assert_eq!(index_for('?'), None);
    }

    #[test]
    fn test_option_letters_are_positional_and_unique() {
        let options = (0..MAX_OPTIONS)
            .map(|i| QuestionOption::new(format!("opt{}", i), i % 2 == 0))
            .collect();
        let record = QuestionRecord::new("多选题", "stem", options);

        let letters: Vec<char> = record.lettered_options().map(|(l, _)| l).collect();
        assert_eq!(letters.len(), MAX_OPTIONS);
        assert_eq!(letters.iter().collect::<String>(), LETTERS);
        let unique: BTreeSet<char> = letters.iter().copied().collect();
        assert_eq!(unique.len(), letters.len());
    }

    #[test]
    fn test_correct_sets() {
        let record = QuestionRecord::new(
            "多选题",
            "下列哪些是质数",
            vec![
                QuestionOption::new("2", true),
                QuestionOption::new("4", false),
                QuestionOption::new("5", true),
            ],
        );
        assert_eq!(record.correct_indices(), BTreeSet::from([0, 2]));
        assert_eq!(record.answer_string(), "AC");
    }

    #[test]
    fn test_serialized_shape() {
        let record = QuestionRecord::new("单选题", "1+1=?", vec![QuestionOption::new("2", true)]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "单选题", "stem": "1+1=?", "options": [["2", true]]})
        );
    }
}
