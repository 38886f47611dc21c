/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use std::sync::Once;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 初始化日志，默认级别 info，可通过 RUST_LOG 覆盖；重复调用无副作用
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

/// 记录程序启动信息
pub fn log_startup(bank_path: &str, bank_size: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📚 题库: {} (共 {} 道题目)", bank_path, bank_size);
    info!("{}", "=".repeat(60));
}

/// 打印菜单（交互界面输出，不经过日志）
pub fn print_menu() {
    println!("\n{} 主菜单 {}", "=".repeat(20), "=".repeat(20));
    println!("1. 打开浏览器并导航到指定URL");
    println!("2. 从当前页面提取题目到本地题库");
    println!("3. 自动选择答案");
    println!("4. 导出题库为Excel (xlsx)格式");
    println!("0. 退出程序");
    println!("{}", "=".repeat(52));
}

/// 记录提取合并结果
///
/// # 参数
/// - `scraped`: 本次解析成功的题目数
/// - `skipped`: 解析失败被跳过的题目数
/// - `added`: 新加入题库的题目数
/// - `bank_size`: 合并后的题库大小
pub fn log_merge_summary(scraped: usize, skipped: usize, added: usize, bank_size: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 成功提取 {} 道题目。其中 {} 道新题已加入题库。", scraped, added);
    if skipped > 0 {
        warn!("⚠️ 有 {} 道题目解析失败被跳过", skipped);
    }
    info!("📚 题库现在总共有 {} 道题目。", bank_size);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
