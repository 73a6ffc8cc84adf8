//! Key bindings.

/// What a line of learner input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Select(usize),
    ToggleDetails,
    Continue,
    ChangeCategory,
    Quit,
}

/// Interpret a line typed while a question is shown.
///
/// Digits only count when that many options exist. Enter and `n` both continue.
pub fn parse_key(line: &str, option_count: usize) -> Option<Command> {
    match line.trim() {
        "" | "n" | "N" => Some(Command::Continue),
        "d" | "D" => Some(Command::ToggleDetails),
        "c" | "C" => Some(Command::ChangeCategory),
        "q" | "Q" => Some(Command::Quit),
        key => match key.parse::<usize>() {
            Ok(n @ 1..=4) if n <= option_count => Some(Command::Select(n - 1)),
            _ => None,
        },
    }
}

/// Interpret a line typed at the category picker as a one-based choice.
pub fn parse_choice(line: &str, count: usize) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}
