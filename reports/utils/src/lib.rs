//! 报告程序依赖的通用组件.

use log::LevelFilter;
use simple_logger::SimpleLogger;

pub mod loader;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// `-v` 出现次数对应的日志级别: 0 为 warn, 1 为 info, 更多为 debug.
pub fn level_of(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// 初始化日志, 输出到 stderr. 重复初始化时静默忽略.
pub fn init_logger(verbosity: u8) {
    let _ = SimpleLogger::new()
        .with_level(level_of(verbosity))
        .with_colors(true)
        .init();
}
