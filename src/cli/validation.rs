use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::paginator::EmptyListPolicy;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(size) = args.page_size {
        if size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, pages start at 1".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.empty_pages.as_deref() {
        EmptyListPolicy::parse(raw)
            .ok_or_else(|| format!("invalid --empty-pages '{raw}', expected floor or zero"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --output-format '{raw}', expected text, json or html"))?;
    }
    if args.interactive && args.output.is_some() {
        return Err("use either --interactive or --output, not both".to_string());
    }
    Ok(())
}
