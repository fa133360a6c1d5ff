use crate::paginator::NavAction;

pub const HELP: &str = "commands: n|next, p|prev, <page> | g <page>, c <slot>, r (redraw), h (help), q (quit)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Navigate(NavAction),
    Click(usize),
    Redraw,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let head = parts
        .next()
        .ok_or_else(|| "empty command".to_string())?
        .to_lowercase();
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments in '{}'", line.trim()));
    }

    let number = |what: &str| -> Result<usize, String> {
        let raw = arg.ok_or_else(|| format!("missing {what}"))?;
        raw.parse::<usize>()
            .map_err(|_| format!("invalid {what} '{raw}'"))
    };

    match head.as_str() {
        "n" | "next" | "siguiente" => Ok(Command::Navigate(NavAction::Next)),
        "p" | "prev" | "previous" | "anterior" => Ok(Command::Navigate(NavAction::Previous)),
        "g" | "go" | "page" => Ok(Command::Navigate(NavAction::Goto(number("page")?))),
        "c" | "click" => Ok(Command::Click(number("slot")?)),
        "r" | "redraw" => Ok(Command::Redraw),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => match other.parse::<usize>() {
            Ok(k) if arg.is_none() => Ok(Command::Navigate(NavAction::Goto(k))),
            _ => Err(format!("unknown command '{}'", line.trim())),
        },
    }
}
