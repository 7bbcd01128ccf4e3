use tracing::warn;

use crate::config::override_config::{ArgType, ArgValue, CommandArg};

/// Turn free-form flags (`--jobs 4 --release -F "a b"`) into override
/// records.
///
/// A flag followed by a word that is not itself a flag takes that word as
/// its value; `--name=value` carries it inline. Flags without a value become
/// `boolean` records, numeric values `int` records and everything else
/// `string` records with surrounding quotes removed.
pub fn parse_user_input(input: &str) -> Vec<CommandArg> {
    let words = shell_words::split(input).unwrap_or_else(|e| {
        warn!("Falling back to whitespace splitting for '{}': {}", input, e);
        input.split_whitespace().map(str::to_string).collect()
    });

    let mut args = Vec::new();
    let mut iter = words.into_iter().peekable();

    while let Some(word) = iter.next() {
        if !word.starts_with('-') {
            warn!("Ignoring '{}': expected a flag", word);
            continue;
        }

        let (name, inline_value) = match word.split_once('=') {
            Some((name, value)) if word.starts_with("--") => (name.to_string(), Some(value.to_string())),
            _ => (word.clone(), None),
        };

        let value = inline_value.or_else(|| iter.next_if(|next| !next.starts_with('-')));
        let name = name.trim_start_matches('-').to_string();
        if name.is_empty() {
            continue;
        }

        args.push(match value {
            None => CommandArg::new(name, ArgType::Boolean, ArgValue::Bool(true)),
            Some(value) => match value.parse::<i64>() {
                Ok(number) => CommandArg::new(name, ArgType::Int, ArgValue::Int(number)),
                Err(_) => {
                    let value = value.trim_matches('"').to_string();
                    CommandArg::new(name, ArgType::String, ArgValue::Str(value))
                }
            },
        });
    }

    args
}
