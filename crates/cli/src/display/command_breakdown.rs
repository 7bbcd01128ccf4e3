use cargo_cursor_core::{CargoCommand, CommandType};

/// Flags that take the next argument as their value
const VALUED_FLAGS: [&str; 6] = ["--package", "--bin", "--test", "--bench", "--example", "-E"];

pub fn print_command_breakdown(command: &CargoCommand) {
    println!("   🔧 Command breakdown:");

    match command.command_type {
        CommandType::Make => {
            println!("      • command: make");
            if let [flag, dir, target, ..] = command.args.as_slice() {
                if flag == "-C" {
                    println!("      • directory: {dir}");
                    println!("      • target: {target}");
                }
            }
        }
        CommandType::Cargo => {
            let (harness, cargo_args) = match command.args.iter().position(|a| a == "--") {
                Some(split) => (&command.args[split + 1..], &command.args[..split]),
                None => (&[][..], &command.args[..]),
            };

            let mut iter = cargo_args.iter().peekable();
            let mut subcommand = Vec::new();
            while let Some(word) = iter.next_if(|w| !w.starts_with('-')) {
                subcommand.push(word.as_str());
            }
            println!("      • command: cargo {}", subcommand.join(" "));

            let mut extra_args = Vec::new();
            while let Some(arg) = iter.next() {
                if VALUED_FLAGS.contains(&arg.as_str()) {
                    let value = iter.next().map(String::as_str).unwrap_or("");
                    let label = if arg == "-E" { "filter" } else { arg.trim_start_matches('-') };
                    println!("      • {label}: {value}");
                } else {
                    extra_args.push(arg.as_str());
                }
            }
            if !extra_args.is_empty() {
                println!("      • extraArgs: {extra_args:?}");
            }
            if !harness.is_empty() {
                println!("      • harnessArgs: {harness:?}");
            }
        }
    }

    if !command.env.is_empty() {
        println!("      • env:");
        for (key, value) in &command.env {
            println!("        {key}={value}");
        }
    }
    if let Some(dir) = command.working_dir() {
        println!("      • cwd: {}", dir.display());
    }
}
