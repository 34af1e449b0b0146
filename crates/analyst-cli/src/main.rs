//! AI equity research report CLI
//!
//! Generates a full equity-research report for a stock ticker and exports it
//! as a markdown document.
//!
//! # Usage
//!
//! ```bash
//! # Set up the generation credential
//! export GOOGLE_API_KEY="..."
//!
//! # Generate a Chinese report (default language) with the default model
//! analyst NVDA
//!
//! # English report with the heavier model, saved to ./reports
//! analyst NVDA --language en --model gemini-2.5-flash --output reports
//! ```

use analyst_core::{
    FailureKind, ReportConfig, ReportLanguage, ReportPipeline, ReportRequest, ReportResult,
    YahooFinanceClient,
};
use analyst_llm::providers::{GeminiConfig, GeminiProvider};
use anyhow::{Context, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "analyst")]
#[command(about = "AI equity research report generator", long_about = None)]
struct Args {
    /// Stock ticker symbol (e.g. NVDA, AAPL)
    ticker: String,

    /// Generation model to use
    #[arg(short, long, default_value = "gemini-2.5-flash-lite")]
    model: String,

    /// Report language: zh (Chinese, default) or en (English)
    #[arg(short, long, default_value = "zh")]
    language: String,

    /// Directory the markdown report is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Skip writing the markdown report to disk
    #[arg(long)]
    no_save: bool,

    /// Generation API key (falls back to the GOOGLE_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    analyst_utils::init_tracing();

    let args = Args::parse();

    let Some(language) = ReportLanguage::from_code(&args.language) else {
        bail!(
            "Unsupported language '{}': expected 'zh' or 'en'",
            args.language
        );
    };

    // Credential is resolved once at startup; absence is fatal for the whole
    // process, never a per-request error.
    let api_key = match args.api_key.clone().or_else(|| {
        std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty())
    }) {
        Some(key) => key,
        None => bail!(
            "API Key not found: set the GOOGLE_API_KEY environment variable or pass --api-key"
        ),
    };

    let config = ReportConfig::builder().default_model(&args.model).build();
    config.validate()?;

    let generator =
        GeminiProvider::with_config(GeminiConfig::new(api_key)).context("generation client")?;
    let data_provider = YahooFinanceClient::with_timeout(config.request_timeout)
        .context("market data client")?;

    info!(model = %config.default_model, language = %language, "starting report generation");

    let request = ReportRequest::new(
        args.ticker.clone(),
        config.default_model.clone(),
        language,
    );
    let pipeline = ReportPipeline::new(Arc::new(data_provider), Arc::new(generator), config);

    println!("{}", fetching_message(language, &request.ticker));
    println!("{}", analyzing_message(language));

    let result = pipeline.run(&request).await;

    render_result(&result, language, &args.output, args.no_save)
}

fn render_result(
    result: &ReportResult,
    language: ReportLanguage,
    output_dir: &Path,
    no_save: bool,
) -> anyhow::Result<()> {
    match result.report_text() {
        Some(text) => {
            println!();
            println!("{text}");

            if !no_save {
                let path = output_dir.join(result.export_file_name());
                std::fs::write(&path, text)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                println!();
                println!("{} {}", saved_message(language), path.display());
            }
            Ok(())
        },
        None => match result.failure_kind() {
            Some(FailureKind::InvalidInput) => bail!("{}", invalid_ticker_message(language)),
            _ => bail!(
                "Error: {}",
                result.error_message().unwrap_or("unknown failure")
            ),
        },
    }
}

fn fetching_message(language: ReportLanguage, ticker: &str) -> String {
    match language {
        ReportLanguage::English => format!("Fetching data for {ticker}..."),
        ReportLanguage::Chinese => format!("正在拉取 {ticker} 数据..."),
    }
}

fn analyzing_message(language: ReportLanguage) -> &'static str {
    match language {
        ReportLanguage::English => "AI is analyzing...",
        ReportLanguage::Chinese => "AI 正在深度分析...",
    }
}

fn saved_message(language: ReportLanguage) -> &'static str {
    match language {
        ReportLanguage::English => "Report saved to",
        ReportLanguage::Chinese => "报告已保存至",
    }
}

fn invalid_ticker_message(language: ReportLanguage) -> &'static str {
    match language {
        ReportLanguage::English => "Please enter a ticker",
        ReportLanguage::Chinese => "请输入股票代码",
    }
}
