use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{GenerationService, HttpGateway};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use url::Url;

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080/api/generate";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGatewayUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGatewayUrl { raw } => {
                write!(f, "invalid --gateway value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--gateway <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --gateway {DEFAULT_GATEWAY_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAMGEN_GATEWAY_URL");
}

struct Args {
    gateway_url: Url,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut raw_gateway = std::env::var("EXAMGEN_GATEWAY_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--gateway" => {
                    raw_gateway = require_value(args, "--gateway")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let gateway_url =
            Url::parse(&raw_gateway).map_err(|_| ArgsError::InvalidGatewayUrl {
                raw: raw_gateway,
            })?;
        Ok(Self { gateway_url })
    }
}

struct DesktopApp {
    generation: Arc<GenerationService>,
}

impl UiApp for DesktopApp {
    fn app_name(&self) -> String {
        "Exam Paper Generator".to_string()
    }

    fn generation(&self) -> Arc<GenerationService> {
        Arc::clone(&self.generation)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    info!(gateway = %parsed.gateway_url, "starting exam paper generator");

    let gateway = Arc::new(HttpGateway::new(parsed.gateway_url));
    let generation = Arc::new(GenerationService::new(gateway));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { generation });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev
    // setups; disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Paper Generator")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
