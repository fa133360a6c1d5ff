use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dattebayo",
    version,
    about = "paginated character cards for the Dattebayo API",
    long_about = "Dattebayo fetches the character list once, shows it four cards per page and lets you page through it and rotate card images.\n\nExamples:\n  dattebayo\n  dattebayo --page 3\n  dattebayo -i\n  dattebayo -o page.html\n\nTip: Use --init-config to write a starter config with the image override table."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json or html). Inferred from --output when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'u',
        long = "url",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Source",
        help = "Character list endpoint."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Source",
        help = "Path to config file (defaults to ~/.dattebayo/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Source",
        help = "Write the default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "Paging",
        help = "Page to show first (clamped into range)."
    )]
    pub page: Option<usize>,

    #[arg(
        long = "page-size",
        value_name = "N",
        help_heading = "Paging",
        help = "Cards per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        long = "empty-pages",
        value_name = "POLICY",
        help_heading = "Paging",
        help = "Page count for an empty list: floor (one page) or zero."
    )]
    pub empty_pages: Option<String>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Paging",
        help = "Read navigation commands from stdin (n, p, <page>, c <slot>, q)."
    )]
    pub interactive: bool,

    #[arg(
        long = "default-image",
        value_name = "URL",
        help_heading = "Images",
        help = "Placeholder image for characters without images."
    )]
    pub default_image: Option<String>,

    #[arg(
        long = "validate-images",
        help_heading = "Images",
        help = "Check each image with a HEAD request before showing it."
    )]
    pub validate_images: bool,
}
