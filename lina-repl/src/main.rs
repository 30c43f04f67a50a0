mod error;
mod prompt;
mod session;

use log::{error, info};
use prompt::{Prompt, ScriptPrompt};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::{fs::File, io::{self, BufRead, BufReader, IsTerminal}};

/// Initializes terminal logging, with the level read from the `LINA_LOG` environment variable.
fn init_logger() {
    let level = match std::env::var("LINA_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("info") => LevelFilter::Info,
        Ok("error") => LevelFilter::Error,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    };

    // only fails if a logger is already set
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Processes a line and prints the result or the error.
fn process(session: &mut Session, line: &str, prompt: &mut impl Prompt) {
    match session.process(line, prompt) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => (), // cancelled assignment
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr() {
                error!("could not print error report: {}", io_err);
            }
        },
    }
}

/// Runs every line of the script. Assignment prompts are answered by the lines that follow them.
fn run_script(reader: impl BufRead) -> io::Result<()> {
    let mut session = Session::new();
    let mut lines = reader.lines().collect::<io::Result<Vec<_>>>()?.into_iter();

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }
        process(&mut session, &line, &mut ScriptPrompt::new(lines.by_ref()));
    }
    Ok(())
}

/// Asks assignment questions through the line editor.
struct EditorPrompt<'a> {
    rl: &'a mut DefaultEditor,
}

impl Prompt for EditorPrompt<'_> {
    fn ask(&mut self, question: &str) -> Option<String> {
        self.rl.readline(question).ok()
    }
}

/// Runs the interactive line editor until end of input.
fn run_interactive() -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new();

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;
        process(&mut session, &input, &mut EditorPrompt { rl: &mut rl });
    }
}

fn main() {
    init_logger();

    let mut args = std::env::args();
    args.next();

    let result = if let Some(filename) = args.next() {
        // run script file
        info!("running script `{}`", filename);
        File::open(filename)
            .and_then(|file| run_script(BufReader::new(file)))
            .map_err(|err| err.to_string())
    } else if !io::stdin().is_terminal() {
        // read script from stdin
        run_script(io::stdin().lock()).map_err(|err| err.to_string())
    } else {
        // run the repl / interactive mode
        run_interactive().map_err(|err| err.to_string())
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
