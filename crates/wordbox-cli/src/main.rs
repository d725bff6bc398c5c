mod app;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use wordbox_core::{Dictionary, SearchOptions, Session, SessionConfig, WordList};

use app::App;

/// Interactive solver for word-search puzzle boxes.
///
/// Supply the box, the length of the answer you are hunting, and optionally
/// a word list; then step through candidate words one at a time, accepting
/// the ones that fit the puzzle.
#[derive(Parser)]
#[command(name = "wordbox", version, about)]
struct Opts {
    /// Length of one side of the puzzle box
    #[arg(long)]
    size: usize,

    /// Puzzle letters, row by row, top-left to bottom-right
    #[arg(long)]
    letters: String,

    /// Length of the answer to hunt first
    #[arg(long)]
    length: usize,

    /// Known prefix of the answer
    #[arg(long, default_value = "")]
    hint: String,

    /// Word list file (one word per line) backing the dictionary check
    #[arg(long)]
    words: Option<PathBuf>,

    /// Accept vowelless candidates
    #[arg(long)]
    no_vowel_check: bool,

    /// Accept candidates the dictionary does not know
    #[arg(long)]
    no_dictionary: bool,

    /// Search on a single thread instead of the worker pool
    #[arg(long)]
    serial: bool,

    /// Print every unique candidate as a JSON line and exit
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let opts = Opts::parse();
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary: Option<Arc<dyn Dictionary>> = match &opts.words {
        Some(path) => {
            let file = File::open(path)?;
            let list = WordList::from_reader(BufReader::new(file))?;
            Some(Arc::new(list))
        }
        None => None,
    };

    let options = SearchOptions {
        vowel_check: !opts.no_vowel_check,
        dictionary_check: !opts.no_dictionary,
    };

    let session = Session::start(
        SessionConfig {
            side: opts.size,
            letters: &opts.letters,
            word_length: opts.length,
            hint: &opts.hint,
            options,
            solved: &[],
            parallel: !opts.serial,
        },
        dictionary.clone(),
    )?;

    if opts.json {
        return app::dump_json(session, io::stdout().lock());
    }

    let mut app = App::new(
        session,
        opts.size,
        opts.letters,
        opts.length,
        opts.hint,
        options,
        dictionary,
        !opts.serial,
    );
    app.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
