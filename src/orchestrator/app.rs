//! 交互式菜单 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载题库、准备作答流程
//! 2. **资源管理**：唯一持有 Browser 的模块，退出时关闭
//! 3. **菜单调度**：把菜单选项映射到 提取合并 / 自动作答 / 导出
//!
//! 不处理单道题目的细节，全部委托给 page_processor 和 workflow

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::orchestrator::bank_session::BankSession;
use crate::orchestrator::page_processor::{auto_answer_page, scrape_and_merge};
use crate::orchestrator::quiz_shell;
use crate::services::{
    export_bank, normalize_export_path, AnswerClicker, AnswerMatcher, StemPolicy, WarnWriter,
};
use crate::utils::logging::{log_startup, print_menu};
use crate::utils::Prompt;
use crate::workflow::AnswerFlow;
use anyhow::{bail, Result};
use std::path::Path;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    session: BankSession,
    browser: Option<BrowserSession>,
    flow: AnswerFlow,
    prompt: Prompt,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let session = BankSession::open(&config.bank_path).await;
        log_startup(&config.bank_path.display().to_string(), session.bank().len());

        let flow = AnswerFlow::new(
            AnswerMatcher::new(StemPolicy::from_flag(config.normalize_stems)),
            AnswerClicker::new(config.click_delay),
            WarnWriter::with_path(config.warn_file.clone()),
        );

        Ok(Self {
            config,
            session,
            browser: None,
            flow,
            prompt: Prompt::new(),
        })
    }

    /// 运行菜单循环
    pub async fn run(mut self) -> Result<()> {
        loop {
            print_menu();
            let Some(choice) = self.prompt.ask("请输入您的选择: ").await? else {
                break;
            };

            match choice.as_str() {
                "1" => self.open_browser().await,
                "2" => self.scrape().await,
                "3" => self.auto_answer().await,
                "4" => self.export().await?,
                "0" => break,
                _ => println!("无效输入，请输入菜单中的数字。"),
            }
        }

        if let Some(browser) = self.browser.take() {
            browser.close().await;
        }
        info!("程序已退出。");
        Ok(())
    }

    /// 1. 打开浏览器并导航
    async fn open_browser(&mut self) {
        let url = match self.config.target_url.clone() {
            Some(url) => url,
            None => match self.prompt.ask("请输入要打开的URL: ").await {
                Ok(Some(url)) if !url.is_empty() => url,
                _ => {
                    warn!("URL为空，操作取消。");
                    return;
                }
            },
        };

        if let Err(e) = self.open_browser_at(&url).await {
            error!("打开浏览器或导航时出错: {:#}", e);
        }
    }

    async fn open_browser_at(&mut self, url: &str) -> Result<()> {
        if self.browser.is_none() {
            self.browser = Some(BrowserSession::open(&self.config).await?);
        }
        let Some(browser) = self.browser.as_ref() else {
            bail!("浏览器未打开");
        };

        browser
            .navigate_with_cookies(url, &self.config.cookies_path, &self.config.cookie_domain_url)
            .await?;
        self.config.target_url = Some(url.to_string());

        println!("{}", "-".repeat(50));
        println!("浏览器已打开。如果未能自动登录，请手动完成登录等操作。");
        self.prompt
            .ask("当页面加载完毕后，请回到此窗口按 Enter 键确认...")
            .await?;

        if let Err(e) = browser.save_cookies(&self.config.cookies_path).await {
            warn!("保存Cookies失败: {}", e);
        }
        println!("{}", "-".repeat(50));
        Ok(())
    }

    /// 2. 提取题目并合并进题库
    async fn scrape(&mut self) {
        let Some(browser) = self.browser.as_ref() else {
            error!("错误: 请先选择 '1' 打开浏览器。");
            return;
        };
        if let Err(e) = scrape_and_merge(browser.driver(), &mut self.session).await {
            error!("提取题目失败: {:#}", e);
        }
    }

    /// 3. 自动作答
    async fn auto_answer(&mut self) {
        let Some(browser) = self.browser.as_ref() else {
            error!("错误: 请先选择 '1' 打开浏览器。");
            return;
        };
        if self.session.bank().is_empty() {
            warn!("警告: 本地题库为空，将仅依赖页面上可能存在的'正确答案'进行选择。");
        }

        info!("开始自动选择答案 (操作延迟: {:?})...", self.config.click_delay);
        let page_url = browser
            .driver()
            .current_url()
            .await
            .ok()
            .flatten()
            .unwrap_or_default();

        if let Err(e) =
            auto_answer_page(browser.driver(), self.session.bank(), &self.flow, &page_url).await
        {
            error!("自动选择失败: {:#}", e);
        }
    }

    /// 4. 导出 xlsx
    async fn export(&mut self) -> Result<()> {
        if self.session.bank().is_empty() {
            error!("错误: 题库为空，请先使用选项 '2' 提取题目。");
            return Ok(());
        }
        let input = self
            .prompt
            .ask("请输入要保存的Excel文件名 (按Enter默认为 '题库.xlsx'): ")
            .await?
            .unwrap_or_default();
        let path = normalize_export_path(&input);
        if let Err(e) = export_bank(self.session.bank(), &path).await {
            error!("导出Excel时发生错误: {}", e);
        }
        Ok(())
    }
}

/// 直接导出题库后退出
pub async fn export_only(config: &Config, file: &str) -> Result<()> {
    let session = BankSession::open(&config.bank_path).await;
    if session.bank().is_empty() {
        bail!(
            "题库 '{}' 为空或加载失败，无法执行导出。",
            config.bank_path.display()
        );
    }
    export_bank(session.bank(), &normalize_export_path(file)).await?;
    Ok(())
}

/// 终端自测模式
pub async fn quiz_only(bank_path: &Path, count: Option<usize>) -> Result<()> {
    let session = BankSession::open(bank_path).await;
    let mut prompt = Prompt::new();
    quiz_shell::run_quiz(session.bank(), count, &mut prompt).await
}
