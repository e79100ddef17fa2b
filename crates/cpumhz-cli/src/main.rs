use anyhow::{Context, Result};
use clap::Parser;
use cpumhz_core::{ReportMode, Sampler, ScanOptions, ScanResult, DEFAULT_SOURCE};
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// 重复模式下两次扫描之间的间隔
const REPEAT_INTERVAL: Duration = Duration::from_secs(1);
/// 处理器信息源覆盖（测试/诊断用）；命令行上不设对应选项，所有参数都交给模式解析
const SOURCE_ENV: &str = "CPUMHZ_SOURCE";

const BANNER: &str = "cpumhz  Copyright (C) 2020  Fionn Langhans\n\
This program comes with ABSOLUTELY NO WARRANTY;\n\
This is free software, and you are welcome to redistribute it\n\
under certain conditions;\n";

const USAGE: &str = "cpumhz: Display clock speed of processor threads\n\
\n\
ra - Repeat every 1 second, display all clock speeds\n\
r - Repeat every 1 second, display max\n\
a - Output one time, display all clock speeds\n\
No argument - Output one time, display max";

/// 命令行入口（基于 clap）
///
/// 模式参数是宽松解析的单个位置参数：包含 `r` 即重复，包含 `a` 即输出全部核心。
/// 因此关闭 clap 自带的 -h/--help，也不定义任何选项，由 [`interpret`] 统一处理。
#[derive(Parser, Debug)]
#[command(name = "cpumhz", about = "Display clock speed of processor threads", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// 模式参数：r / a / ra / help
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

/// 解析后的调用方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Invocation {
    Help,
    Report { mode: ReportMode, repeat: bool },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    // 启动横幅始终输出，帮助信息也在其后
    println!("{BANNER}");

    match interpret(&cli.args) {
        Invocation::Help => println!("{USAGE}"),
        Invocation::Report { mode, repeat } => {
            let source = source_path(std::env::var_os(SOURCE_ENV));
            let opts = ScanOptions { source, mode, ..ScanOptions::default() };
            report(Sampler::new(opts), repeat)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，stdout 只输出频率
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 数据源路径：环境变量优先，否则为 /proc/cpuinfo
fn source_path(var: Option<OsString>) -> PathBuf {
    var.filter(|v| !v.is_empty()).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
}

/// 解析模式参数（宽松的子串判断，而非严格的选项解析）
/// - 参数个数不是 1 时忽略全部参数，按默认方式运行
fn interpret(args: &[String]) -> Invocation {
    let [arg] = args else {
        return Invocation::Report { mode: ReportMode::Max, repeat: false };
    };
    if matches!(arg.as_str(), "help" | "-h" | "--help") {
        return Invocation::Help;
    }
    let mode = if arg.contains('a') { ReportMode::All } else { ReportMode::Max };
    Invocation::Report { mode, repeat: arg.contains('r') }
}

/// 扫描并输出；重复模式下每秒一次，直到进程被外部终止
/// 任意一轮无法读取数据源都视为致命错误
fn report(mut sampler: Sampler, repeat: bool) -> Result<()> {
    let opts = sampler.options();
    info!(source = %opts.source.display(), mode = ?opts.mode, repeat, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line = LineRenderer::new(out.is_terminal());

    let result = sampler.sample()?;
    line.render(&mut out, &result).context("write result")?;

    while repeat {
        thread::sleep(REPEAT_INTERVAL);
        let result = sampler.sample()?;
        debug!(stats = ?sampler.last_stats(), "repeat sample");
        line.render(&mut out, &result).context("write result")?;
    }

    writeln!(out).context("write result")?;
    Ok(())
}

/// 重复输出的行渲染
/// - 终端：以 `\r` 回到行首覆盖上一轮，并用空格补齐上一轮更长的部分
/// - 非终端：每轮单独一行
struct LineRenderer {
    terminal: bool,
    last_width: Option<usize>,
}

impl LineRenderer {
    fn new(terminal: bool) -> Self {
        Self { terminal, last_width: None }
    }

    fn render(&mut self, out: &mut impl Write, result: &ScanResult) -> io::Result<()> {
        let text = result.to_string();
        match self.last_width {
            Some(_) if self.terminal => out.write_all(b"\r")?,
            Some(_) => writeln!(out)?,
            None => {}
        }
        write!(out, "{text}")?;
        if self.terminal {
            let pad = self.last_width.unwrap_or(0).saturating_sub(text.len());
            if pad > 0 { write!(out, "{:pad$}", "")?; }
        }
        self.last_width = Some(text.len());
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_argument_is_single_max() {
        assert_eq!(interpret(&[]), Invocation::Report { mode: ReportMode::Max, repeat: false });
    }

    #[test]
    fn test_mode_letters() {
        assert_eq!(interpret(&args(&["a"])), Invocation::Report { mode: ReportMode::All, repeat: false });
        assert_eq!(interpret(&args(&["r"])), Invocation::Report { mode: ReportMode::Max, repeat: true });
        assert_eq!(interpret(&args(&["ra"])), Invocation::Report { mode: ReportMode::All, repeat: true });
        assert_eq!(interpret(&args(&["ar"])), Invocation::Report { mode: ReportMode::All, repeat: true });
    }

    #[test]
    fn test_substring_match_is_permissive() {
        assert_eq!(interpret(&args(&["--all"])), Invocation::Report { mode: ReportMode::All, repeat: false });
        assert_eq!(interpret(&args(&["xyz"])), Invocation::Report { mode: ReportMode::Max, repeat: false });
        assert_eq!(interpret(&args(&["bar"])), Invocation::Report { mode: ReportMode::All, repeat: true });
    }

    #[test]
    fn test_help_variants() {
        for h in ["help", "-h", "--help"] {
            assert_eq!(interpret(&args(&[h])), Invocation::Help);
        }
        assert_ne!(interpret(&args(&["helpme"])), Invocation::Help);
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        assert_eq!(interpret(&args(&["ra", "help"])), Invocation::Report { mode: ReportMode::Max, repeat: false });
    }

    #[test]
    fn test_clap_accepts_hyphen_mode_values() {
        let cli = Cli::try_parse_from(["cpumhz", "--help"]).unwrap();
        assert_eq!(cli.args, args(&["--help"]));
        let cli = Cli::try_parse_from(["cpumhz", "ra"]).unwrap();
        assert_eq!(cli.args, args(&["ra"]));
    }

    #[test]
    fn test_option_like_arguments_fall_through_to_mode_parsing() {
        let cli = Cli::try_parse_from(["cpumhz", "--source"]).unwrap();
        assert_eq!(cli.args, args(&["--source"]));
        assert_eq!(interpret(&cli.args), Invocation::Report { mode: ReportMode::Max, repeat: false });

        // 只做子串判断：包含 r 和 a
        let cli = Cli::try_parse_from(["cpumhz", "--source=ra"]).unwrap();
        assert_eq!(cli.args, args(&["--source=ra"]));
        assert_eq!(interpret(&cli.args), Invocation::Report { mode: ReportMode::All, repeat: true });
    }

    #[test]
    fn test_source_path_from_environment() {
        assert_eq!(source_path(None), PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(source_path(Some(OsString::new())), PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(source_path(Some(OsString::from("/tmp/cpuinfo"))), PathBuf::from("/tmp/cpuinfo"));
    }

    #[test]
    fn test_terminal_redraw_overwrites_line() {
        let mut out = Vec::new();
        let mut line = LineRenderer::new(true);
        line.render(&mut out, &ScanResult::All(vec![800.0, 3400.0])).unwrap();
        line.render(&mut out, &ScanResult::All(vec![900.0])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("800.00, 3400.00\r900.00{}", " ".repeat(9)));
    }

    #[test]
    fn test_non_terminal_prints_each_sample_on_its_own_line() {
        let mut out = Vec::new();
        let mut line = LineRenderer::new(false);
        line.render(&mut out, &ScanResult::Max(2400.0)).unwrap();
        line.render(&mut out, &ScanResult::Max(800.5)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2400.00\n800.50");
    }
}
