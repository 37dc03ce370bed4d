//! pith - find the main content region of an HTML page

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use pith::dom::parse_html;
use pith::{AnalyzeOptions, DomAnalyzer};

#[derive(Parser)]
#[command(name = "pith")]
#[command(version, about = "Find the main content region of an HTML page", long_about = None)]
#[command(after_help = "EXAMPLES:
    pith page.html              Analyze a file and print a summary
    pith page.html --json       Print a JSON report
    pith - --fallback           Read stdin, use exhaustive fallback mode")]
struct Cli {
    /// Input HTML file, or '-' for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print a JSON report instead of a summary
    #[arg(long)]
    json: bool,

    /// Use exhaustive fallback extraction instead of single-pass analysis
    #[arg(long)]
    fallback: bool,

    /// Print the extracted text instead of a report
    #[arg(short, long)]
    text: bool,
}

#[derive(Serialize)]
struct Report {
    method: &'static str,
    confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_density: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_to_noise: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pith::Result<()> {
    let html = read_input(&cli.input)?;
    let dom = parse_html(&html);
    let analyzer = DomAnalyzer::with_options(AnalyzeOptions::default());

    if cli.fallback {
        let result = analyzer.extract_with_fallback(&dom);
        if cli.text {
            if let Some(content) = &result.content {
                println!("{content}");
            }
        } else if cli.json {
            let report = serde_json::json!({
                "success": result.success,
                "strategies_attempted": result.strategies_attempted,
                "strategy": result.successful_strategy.map(|m| m.as_str()),
                "content": result.content,
                "error": result.error,
            });
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        } else if result.success {
            println!(
                "Extracted {} chars via {}",
                result.content.as_deref().map_or(0, |c| c.chars().count()),
                result
                    .successful_strategy
                    .map_or("unknown", |m| m.as_str())
            );
        } else {
            println!(
                "No content found after {} strategies",
                result.strategies_attempted
            );
        }
        return Ok(());
    }

    let result = analyzer.analyze_content(&dom);

    if cli.text {
        if let Some(el) = result.main_content {
            println!("{}", pith::text::clean_text(&dom, el));
        }
        return Ok(());
    }

    let report = Report {
        method: result.method.as_str(),
        confidence: result.confidence,
        element: result
            .main_content
            .and_then(|el| dom.tag_name(el))
            .map(|t| t.to_string()),
        content_density: result.content_density,
        text_to_noise: result.text_to_noise,
        preview: result.clean_text,
        title: result.metadata.title,
        author: result.metadata.author,
        description: result.metadata.description,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        println!("Method: {}", report.method);
        println!("Confidence: {:.2}", report.confidence);
        if let Some(element) = &report.element {
            println!("Element: <{element}>");
        }
        if let Some(title) = &report.title {
            println!("Title: {title}");
        }
        if let Some(author) = &report.author {
            println!("Author: {author}");
        }
        if let Some(preview) = &report.preview {
            println!("Preview: {preview}");
        }
    }

    Ok(())
}

fn read_input(path: &str) -> pith::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
