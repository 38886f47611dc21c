use anyhow::Result;
use clap::{Parser, Subcommand};
use quiz_bank_helper::config::{delay_from_secs, Config};
use quiz_bank_helper::orchestrator::{export_only, quiz_only, App};
use quiz_bank_helper::services::exporter::DEFAULT_EXPORT_FILE;
use quiz_bank_helper::utils::logging;
use std::path::PathBuf;

/// 一个交互式的答题页面自动化工具
#[derive(Parser)]
#[command(name = "quiz-bank-helper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 题库JSON数据库的文件名
    #[arg(long)]
    db: Option<PathBuf>,

    /// 预设要操作的URL
    #[arg(long)]
    url: Option<String>,

    /// Cookies文件名
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// 每次点击操作之间的延迟(秒)
    #[arg(long)]
    delay: Option<f64>,

    /// 将题库直接导出为Excel文件并退出
    #[arg(long, value_name = "FILENAME.xlsx", num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    export_excel: Option<String>,

    /// 配置文件 (TOML)
    #[arg(long, env = "QUIZ_CONFIG", default_value = "quiz_bank.toml")]
    config: PathBuf,

    /// 连接已开启调试端口的浏览器
    #[arg(long)]
    port: Option<u16>,

    /// 无头模式启动浏览器
    #[arg(long)]
    headless: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 从题库抽题进行终端自测
    Quiz {
        /// 抽取的题目数量，不指定时交互输入
        #[arg(short, long)]
        count: Option<usize>,
    },
}

impl Cli {
    /// 命令行参数覆盖配置
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(db) = &self.db {
            config.bank_path = db.clone();
        }
        if let Some(url) = &self.url {
            config.target_url = Some(url.clone());
        }
        if let Some(cookies) = &self.cookies {
            config.cookies_path = cookies.clone();
        }
        if let Some(delay) = self.delay {
            config.click_delay = delay_from_secs(delay)?;
        }
        if let Some(port) = self.port {
            config.browser_debug_port = Some(port);
        }
        if self.headless {
            config.headless = true;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(Some(&cli.config))?;
    cli.apply(&mut config)?;

    if let Some(file) = &cli.export_excel {
        return export_only(&config, file).await;
    }

    if let Some(Commands::Quiz { count }) = cli.command {
        return quiz_only(&config.bank_path, count).await;
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await
}
