//! 测试用的内存页面驱动

#![allow(dead_code)]

use async_trait::async_trait;
use quiz_bank_helper::error::{AppError, AppResult};
use quiz_bank_helper::infrastructure::selectors;
use quiz_bank_helper::{PageDriver, PageNode};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Element {
    label: String,
    text: String,
    text_content: String,
    children: HashMap<&'static str, Vec<FakeNode>>,
    broken: bool,
}

/// 内存中的节点，子节点按选择器字符串直接登记
#[derive(Debug, Clone)]
pub struct FakeNode(Arc<Element>);

impl FakeNode {
    fn leaf(label: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        FakeNode(Arc::new(Element {
            label: label.into(),
            text_content: text.clone(),
            text,
            ..Default::default()
        }))
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }
}

#[async_trait]
impl PageNode for FakeNode {
    async fn find(&self, selector: &str) -> AppResult<Option<Self>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> AppResult<Vec<Self>> {
        if self.0.broken {
            return Err(AppError::query_failed(selector, "节点已失效"));
        }
        Ok(self.0.children.get(selector).cloned().unwrap_or_default())
    }

    async fn text(&self) -> AppResult<String> {
        Ok(self.0.text.clone())
    }

    async fn text_content(&self) -> AppResult<String> {
        Ok(self.0.text_content.clone())
    }
}

/// 构建一道题
pub struct QuestionBuilder {
    id: String,
    kind: Option<String>,
    header: Option<String>,
    answer: Option<String>,
    options: Vec<(String, bool)>,
    broken: bool,
}

pub fn question(id: &str) -> QuestionBuilder {
    QuestionBuilder {
        id: id.to_string(),
        kind: Some("单选题".to_string()),
        header: None,
        answer: None,
        options: Vec::new(),
        broken: false,
    }
}

impl QuestionBuilder {
    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn without_kind(mut self) -> Self {
        self.kind = None;
        self
    }

    /// 标题原文，如 "1. (单选题)题干"
    pub fn header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    /// 页面显示的正确答案字母
    pub fn answer(mut self, letters: &str) -> Self {
        self.answer = Some(letters.to_string());
        self
    }

    pub fn option(mut self, text: &str) -> Self {
        self.options.push((text.to_string(), false));
        self
    }

    /// 已处于选中状态的选项
    pub fn selected_option(mut self, text: &str) -> Self {
        self.options.push((text.to_string(), true));
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    pub fn build(self) -> FakeNode {
        let mut children: HashMap<&'static str, Vec<FakeNode>> = HashMap::new();

        if let Some(kind) = &self.kind {
            children.insert(
                selectors::TYPE_LABEL,
                vec![FakeNode::leaf(format!("{}-type", self.id), format!("({})", kind))],
            );
        }
        if let Some(header) = &self.header {
            children.insert(
                selectors::HEADER,
                vec![FakeNode::leaf(format!("{}-header", self.id), header.clone())],
            );
        }

        let mut spans = vec![FakeNode::leaf(format!("{}-mine", self.id), "我的答案: ")];
        if let Some(answer) = &self.answer {
            spans.push(FakeNode::leaf(
                format!("{}-key", self.id),
                format!("{}{}", selectors::ANSWER_MARKER, answer),
            ));
        }
        children.insert(selectors::ANSWER_SPANS, spans);

        let rows = self
            .options
            .iter()
            .enumerate()
            .map(|(i, (text, selected))| {
                let label = format!("{}-{}", self.id, (b'A' + i as u8) as char);
                let mut row_children: HashMap<&'static str, Vec<FakeNode>> = HashMap::new();
                row_children.insert(
                    selectors::OPTION_TEXT,
                    vec![FakeNode::leaf(format!("{}-text", label), format!(" {} ", text))],
                );
                if *selected {
                    row_children.insert(
                        selectors::SELECTED_MARK,
                        vec![FakeNode::leaf(format!("{}-mark", label), "")],
                    );
                }
                FakeNode(Arc::new(Element {
                    label,
                    children: row_children,
                    ..Default::default()
                }))
            })
            .collect();
        children.insert(selectors::OPTION_ROWS, rows);

        FakeNode(Arc::new(Element {
            label: self.id,
            children,
            broken: self.broken,
            ..Default::default()
        }))
    }
}

/// 记录点击顺序的页面驱动
#[derive(Default)]
pub struct FakeDriver {
    nodes: Vec<FakeNode>,
    clicks: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl FakeDriver {
    pub fn new(nodes: Vec<FakeNode>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    /// 点击这个标签的节点时返回错误
    pub fn fail_on(mut self, label: &str) -> Self {
        self.failing.insert(label.to_string());
        self
    }

    pub fn nodes(&self) -> &[FakeNode] {
        &self.nodes
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn clear_clicks(&self) {
        self.clicks.lock().unwrap().clear();
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    type Node = FakeNode;

    async fn question_nodes(&self) -> AppResult<Vec<FakeNode>> {
        Ok(self.nodes.clone())
    }

    async fn click(&self, node: &FakeNode) -> AppResult<()> {
        if self.failing.contains(node.label()) {
            return Err(AppError::query_failed(node.label(), "元素被遮挡"));
        }
        self.clicks.lock().unwrap().push(node.label().to_string());
        Ok(())
    }
}
