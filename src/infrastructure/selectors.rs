//! 页面结构选择器

/// 每道题的容器
pub const QUESTION: &str = ".questionLi";
/// 题型标签，如 "(单选题)"
pub const TYPE_LABEL: &str = "h3.mark_name > span.colorShallow";
/// 题目标题（含编号前缀）
pub const HEADER: &str = "h3.mark_name";
/// 可能显示正确答案的 span
pub const ANSWER_SPANS: &str = "div.mark_key span";
/// 选项行
pub const OPTION_ROWS: &str = "div.stem_answer > div.clearfix";
/// 选项文本
pub const OPTION_TEXT: &str = "div.answer_p";
/// 已选中标记
pub const SELECTED_MARK: &str = ".check_answer, .check_answer_dx";

/// 正确答案标记文字
pub const ANSWER_MARKER: &str = "正确答案:";
