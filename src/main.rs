// Interactive shell front end with a small built-in command set

use lineshell::terminals::StdioTerminal;
use lineshell::{CommandError, CommandSet, History, Outcome, Shell};

fn main() {
    let mut commands = CommandSet::new();

    commands.register("echo", |args: &[&str]| {
        println!("{}", args.join(" "));
        Ok(Outcome::Continue)
    });

    commands.register("pwd", |_: &[&str]| match std::env::current_dir() {
        Ok(dir) => {
            println!("{}", dir.display());
            Ok(Outcome::Continue)
        }
        Err(e) => Err(CommandError::from(e.to_string())),
    });

    commands.register("exit", |_: &[&str]| Ok(Outcome::Exit));
    commands.register("quit", |_: &[&str]| Ok(Outcome::Exit));

    let mut shell = Shell::new("> ", History::new(true), commands);
    let mut terminal = StdioTerminal::new();

    if let Err(e) = shell.run(&mut terminal) {
        eprintln!("\nError reading input: {}", e);
        std::process::exit(1);
    }
}
