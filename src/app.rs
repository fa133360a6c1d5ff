use std::io::{BufRead, Write};
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::commands::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controls::ControlKind;
use crate::output::{self, OutputFormat, PageView};
use crate::paginator::{EmptyListPolicy, NavAction};
use crate::runner::{Options, Runner};
use crate::session::Session;

fn print_banner() {
    const BANNER: &str = r#"
     _       _   _       _
  __| | __ _| |_| |_ ___| |__   __ _ _   _  ___
 / _` |/ _` | __| __/ _ \ '_ \ / _` | | | |/ _ \
| (_| | (_| | |_| ||  __/ |_) | (_| | |_| | (_) |
 \__,_|\__,_|\__|\__\___|_.__/ \__,_|\__, |\___/
                                     |___/
         character cards, four at a time
    "#;
    println!("{}", BANNER.bold().yellow());
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dattebayo={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Debug)]
struct RunConfig {
    options: Options,
    page: usize,
    interactive: bool,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let defaults = Options::default();
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let endpoint = args
        .url
        .or(cfg.url)
        .map(|u| u.trim().to_string())
        .unwrap_or(defaults.endpoint);
    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(defaults.timeout_seconds);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }

    let empty_list_policy = match args.empty_pages.or(cfg.empty_pages) {
        Some(raw) => EmptyListPolicy::parse(&raw)
            .ok_or_else(|| format!("invalid empty_pages '{raw}', expected floor or zero"))?,
        None => defaults.empty_list_policy,
    };

    let default_image = args
        .default_image
        .or(cfg.default_image)
        .unwrap_or(defaults.default_image);
    let validate_images = args.validate_images || cfg.validate_images.unwrap_or(false);
    let image_overrides = cfg.image_overrides.unwrap_or_default();

    let output_path = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output_format '{raw}'"))?,
        None => output_path
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        options: Options {
            endpoint,
            timeout_seconds,
            proxy,
            page_size,
            empty_list_policy,
            default_image,
            validate_images,
            image_overrides,
        },
        page: args.page.unwrap_or(1),
        interactive: args.interactive,
        output: output_path,
        output_format,
        no_color,
    })
}

fn load_characters(runner: &Runner) -> Result<Vec<crate::repository::Character>, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.yellow} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("loading characters from {}", runner.options().endpoint));
    pb.enable_steady_tick(Duration::from_millis(100));

    let characters = rt.block_on(runner.load());
    pb.finish_and_clear();
    Ok(characters)
}

fn write_output(view: &PageView, path: &str, format: OutputFormat) -> Result<(), String> {
    std::fs::write(path, output::render(view, format))
        .map_err(|e| format!("failed to write output file '{path}': {e}"))
}

/// Drives a session from line commands until `q` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    view: &mut PageView,
    input: R,
    out: &mut W,
) -> Result<(), String> {
    let io_err = |e: std::io::Error| format!("failed to write to terminal: {e}");
    out.write_all(&output::render_text(view)).map_err(io_err)?;
    writeln!(out, "{}", commands::HELP).map_err(io_err)?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read command: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match commands::parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e.red()).map_err(io_err)?;
                continue;
            }
        };
        let changed = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", commands::HELP).map_err(io_err)?;
                false
            }
            Command::Redraw => true,
            Command::Navigate(action) => {
                let kind = match action {
                    NavAction::Previous => ControlKind::Previous,
                    NavAction::Next => ControlKind::Next,
                    NavAction::Goto(k) => ControlKind::Page(k),
                };
                match view.controls().find(kind).and_then(|c| c.invoke()) {
                    Some(action) => session.navigate(action, view),
                    None => {
                        writeln!(out, "{}", "nothing to navigate to".yellow()).map_err(io_err)?;
                        false
                    }
                }
            }
            Command::Click(index) => match session.slot(index) {
                Some(slot) => session.activate_image(slot, view),
                None => {
                    writeln!(out, "{}", format!("no slot {index} on this page").red())
                        .map_err(io_err)?;
                    false
                }
            },
        };
        if changed {
            out.write_all(&output::render_text(view)).map_err(io_err)?;
        }
    }
    Ok(())
}

fn run(config: RunConfig) -> Result<(), String> {
    if config.no_color {
        colored::control::set_override(false);
    }

    let runner = Runner::new(config.options.clone()).map_err(|e| e.to_string())?;
    if config.output.is_none() {
        print_banner();
        format_kv_line("Source", &runner.options().endpoint);
        format_kv_line("Page size", &runner.options().page_size.to_string());
        println!();
    }

    let characters = load_characters(&runner)?;
    let mut session = runner.session(characters).map_err(|e| e.to_string())?;
    session.set_page(config.page);

    let mut view = PageView::standard(config.options.page_size);
    session.render(&mut view);

    if config.interactive {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        return run_interactive(&mut session, &mut view, stdin.lock(), &mut stdout);
    }

    match config.output.as_deref() {
        Some(path) => {
            write_output(&view, path, config.output_format)?;
            tracing::info!(path, "page written");
        }
        None => {
            let rendered = output::render(&view, config.output_format);
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| format!("failed to write to terminal: {e}"))?;
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        if config::ensure_default_config_file(&path)? {
            println!("wrote default config to {}", path.display());
        } else {
            println!("config already exists at {}", path.display());
        }
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
