use clap::Parser;
use std::io::IsTerminal;
use tracing::debug;

use order_analytics::cli::Cli;
use order_analytics::config::{get_config, init_config_from};
use order_analytics::interfaces::cli::run_cli_command;
use order_analytics::system::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 配置：ENV > 配置文件 > 默认值
    init_config_from(&cli.config);
    let config = get_config();
    let color = std::io::stderr().is_terminal();

    if let Err(e) = config.validate() {
        if color {
            eprintln!("{}", e.format_colored());
        } else {
            eprintln!("{}", e.format_simple());
        }
        std::process::exit(1);
    }

    // guard 需要存活到进程结束，保证日志落盘
    let _log_guard = init_logging(&config.logging)?;
    debug!("Configuration loaded from {}", cli.config);

    if let Err(e) = run_cli_command(cli.command).await {
        if color {
            eprintln!("{}", e.format_colored());
        } else {
            eprintln!("{}", e.format_simple());
        }
        std::process::exit(1);
    }

    Ok(())
}
