//! Command module
//!
//! Describes possible commands used during gameplay and parses raw input
//! into them. Entity words stay free text -- resolving them to items is the
//! fuzzy matcher's job, not the parser's.

use variantly::Variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Attack { enemy: String, weapon: String },
    Drop(String),
    Eat(String),
    Health,
    Help,
    Inventory,
    Look,
    PutIn { item: String, container: String },
    Quit,
    Read(String),
    Take(String),
    TakeFrom { item: String, container: String },
    Unknown,
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["look"] | ["look", "around"] => Command::Look,
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["health" | "hp"] => Command::Health,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        ["drop", rest @ ..] => Command::Drop(rest.join(" ")),
        ["eat", rest @ ..] => Command::Eat(rest.join(" ")),
        ["read", rest @ ..] => Command::Read(rest.join(" ")),
        ["put" | "place", rest @ ..] => match split_on_keyword(rest, &["in", "into"]) {
            Some((item, container)) => Command::PutIn { item, container },
            // no container named -- the handler answers with a usage hint
            None => Command::PutIn {
                item: rest.join(" "),
                container: String::new(),
            },
        },
        ["take" | "get" | "grab" | "pick", rest @ ..] => {
            let rest = if rest.first() == Some(&"up") { &rest[1..] } else { rest };
            match split_take_from(rest) {
                Some((item, container)) => Command::TakeFrom { item, container },
                None => Command::Take(rest.join(" ")),
            }
        },
        ["attack" | "hit" | "fight", rest @ ..] => match split_on_keyword(rest, &["with", "using"]) {
            Some((enemy, weapon)) => Command::Attack { enemy, weapon },
            None => Command::Attack {
                enemy: rest.join(" "),
                weapon: String::new(),
            },
        },
        ["swing", rest @ ..] => match split_on_keyword(rest, &["at"]) {
            Some((weapon, enemy)) => Command::Attack { enemy, weapon },
            None => Command::Attack {
                enemy: String::new(),
                weapon: rest.join(" "),
            },
        },
        _ => Command::Unknown,
    }
}

/// Split words at the first occurrence of any keyword, returning the text
/// on either side.
fn split_on_keyword(words: &[&str], keywords: &[&str]) -> Option<(String, String)> {
    words
        .iter()
        .position(|w| keywords.contains(w))
        .map(|idx| (words[..idx].join(" "), words[idx + 1..].join(" ")))
}

/// Split "X from Y" or "X out of Y" phrasings of take-from.
fn split_take_from(words: &[&str]) -> Option<(String, String)> {
    for (idx, word) in words.iter().enumerate() {
        if *word == "from" {
            return Some((words[..idx].join(" "), words[idx + 1..].join(" ")));
        }
        if *word == "out" && words.get(idx + 1) == Some(&"of") {
            return Some((words[..idx].join(" "), words[idx + 2..].join(" ")));
        }
    }
    None
}
