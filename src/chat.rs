// interactive session - one command per line until exit or eof

use crate::core::{Dispatcher, Request};
use crate::output::Output;
use crate::Error;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const WELCOME: &str = "
+----------------------------------------------------+
|  glossa: words & pictures -> meanings              |
|  Type 'help' for a list of commands.               |
+----------------------------------------------------+";

const HELP: &str = "
  define <word>      Look up a word definition
  describe <image>   Describe an image (JPG/PNG)
  help               Show this help message
  exit               Quit";

const USAGE: &str = "Usage: define <word> | describe <image>\nType 'help' for more info.";

/// What a single line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Lookup(Request),
    Help,
    Exit,
    Usage,
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    match line.to_lowercase().as_str() {
        "exit" | "quit" => return Command::Exit,
        "help" => return Command::Help,
        _ => {}
    }

    let Some((command, argument)) = line.split_once(char::is_whitespace) else {
        return Command::Usage;
    };
    let argument = argument.trim().to_string();

    match command.to_lowercase().as_str() {
        "define" => Command::Lookup(Request::Define(argument)),
        "describe" => Command::Lookup(Request::Describe(argument)),
        other => Command::Unknown(other.to_string()),
    }
}

pub async fn run(dispatcher: &Dispatcher, json: bool) -> Result<(), Error> {
    let stdin = BufReader::new(tokio::io::stdin());
    session(dispatcher, stdin, json).await
}

async fn session<R: AsyncBufRead + Unpin>(
    dispatcher: &Dispatcher,
    input: R,
    json: bool,
) -> Result<(), Error> {
    println!("{WELCOME}");
    if dispatcher.is_online() {
        println!("online mode is on, offline lookups are the fallback");
    }

    let mut lines = input.lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!("\nBye!");
            break;
        };

        match parse_line(&line) {
            Command::Empty => continue,
            Command::Exit => {
                println!("Bye!");
                break;
            }
            Command::Help => println!("{HELP}"),
            Command::Usage => println!("{USAGE}"),
            Command::Unknown(command) => {
                println!("Unknown command: '{command}'. Type 'help' for options.")
            }
            Command::Lookup(request) => {
                let reply = dispatcher.handle(request).await;
                if json {
                    Output::raw(&reply);
                } else {
                    Output::pretty(&reply);
                }
            }
        }
    }

    Ok(())
}
