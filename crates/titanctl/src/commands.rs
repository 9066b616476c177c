//! Command grammar
//!
//! A submitted line is parsed once into a [`Command`]. The verb is the
//! first whitespace-separated token, case-insensitive; the rest are
//! positional arguments.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Clear,
    Login(Option<String>),
    Build,
    List,
    Access(Option<String>),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Command::Empty;
        };
        let verb = verb.to_lowercase();
        let first_arg = tokens.next().map(str::to_string);

        match verb.as_str() {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "login" => Command::Login(first_arg),
            "build" => Command::Build,
            "list" => Command::List,
            "access" => Command::Access(first_arg),
            _ => Command::Unknown(verb),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Empty => "",
            Command::Help => "help",
            Command::Clear => "clear",
            Command::Login(_) => "login",
            Command::Build => "build",
            Command::List => "list",
            Command::Access(_) => "access",
            Command::Unknown(verb) => verb,
        }
    }
}
