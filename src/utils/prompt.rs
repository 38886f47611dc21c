//! 终端交互输入

use anyhow::Result;
use tokio::io::{stdin, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// 按行读取标准输入
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// 显示提示并读取一行（已去除首尾空白），输入结束时返回 None
    pub async fn ask(&mut self, message: &str) -> Result<Option<String>> {
        let mut out = tokio::io::stdout();
        out.write_all(message.as_bytes()).await?;
        out.flush().await?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}
