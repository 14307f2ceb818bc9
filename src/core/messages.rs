//! User-facing console text.

use std::path::Path;

pub const PAUSE_PROMPT: &str = "请按回车键继续. . .";

pub const INSTALLING: &str = "[提示] 首次运行，正在安装依赖，请稍候...";
pub const INSTALL_FAILED: &str = "[错误] 依赖安装失败，请检查网络连接";
pub const INSTALL_DONE: &str = "[完成] 依赖安装成功";
pub const ABNORMAL_EXIT: &str = "[提示] 程序异常退出";

pub fn interpreter_missing(interpreter: &str) -> String {
    format!(
        "[错误] 未检测到 Python ({})，请先安装 Python 3.8 或更高版本",
        interpreter
    )
}

pub fn download_hint(url: &str) -> String {
    format!("下载地址: {}", url)
}

pub fn workdir_failed(detail: &str) -> String {
    format!("[错误] 无法进入程序所在目录: {}", detail)
}

pub fn not_started(program: &str, reason: &str) -> String {
    format!("[详情] 无法启动 {}: {}", program, reason)
}

pub fn starting(app_name: &str) -> String {
    format!("[启动] 正在启动{}...", app_name)
}

pub fn error_log_hint(path: &Path) -> String {
    format!("错误详情已记录在 {}", path.display())
}

pub fn check_status(ok: bool) -> &'static str {
    if ok { "正常" } else { "缺失" }
}
