//! The interactive command loop driving a solving session.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::debug;

use wordbox_core::{
    Dictionary, FoundWord, OptionToggle, SearchOptions, Selection, Session, SessionConfig,
};

/// Result of handling one command.
pub enum AppAction {
    Continue,
    Quit,
}

/// Application state: the live session plus everything needed to rebuild it
/// when the user moves on to the next answer in the same puzzle.
pub struct App {
    session: Session,
    side: usize,
    letters: String,
    word_length: usize,
    hint: String,
    options: SearchOptions,
    dictionary: Option<Arc<dyn Dictionary>>,
    parallel: bool,
    /// Answers accepted so far, replayed into every rebuilt session.
    accepted: Vec<FoundWord>,
    /// The candidate most recently shown, the target of `accept`.
    last_word: Option<FoundWord>,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: Session,
        side: usize,
        letters: String,
        word_length: usize,
        hint: String,
        options: SearchOptions,
        dictionary: Option<Arc<dyn Dictionary>>,
        parallel: bool,
    ) -> Self {
        Self {
            session,
            side,
            letters,
            word_length,
            hint,
            options,
            dictionary,
            parallel,
            accepted: Vec::new(),
            last_word: None,
        }
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.print_grid(&mut out)?;
        self.print_stats(&mut out)?;
        writeln!(out, "type 'help' for commands")?;

        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            match self.handle_command(line.trim(), &mut out)? {
                AppAction::Continue => {}
                AppAction::Quit => break,
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<AppAction> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        match command {
            "" => {}
            "next" | "n" => self.show_next(Selection::Unique, out)?,
            "same" | "s" => self.show_next(Selection::SameVariant, out)?,
            "flush" | "f" => self.show_next(Selection::FlushAndRestart, out)?,
            "accept" | "a" => self.accept(out)?,
            "grid" | "g" => self.print_grid(out)?,
            "stats" => self.print_stats(out)?,
            "vowel" => self.toggle(OptionToggle::FlipVowelCheck, out)?,
            "dict" => self.toggle(OptionToggle::FlipDictionaryCheck, out)?,
            "refresh" | "r" => self.refresh(out)?,
            "length" | "l" => {
                let length = parts.next().and_then(|v| v.parse::<usize>().ok());
                let hint = parts.next().unwrap_or("").to_string();
                match length {
                    Some(length) => self.new_answer(length, hint, out)?,
                    None => writeln!(out, "usage: length <n> [hint]")?,
                }
            }
            "cancel" => {
                self.session.cancel_outstanding();
                writeln!(out, "outstanding searches cancelled")?;
            }
            "help" | "h" | "?" => self.print_help(out)?,
            "quit" | "q" | "exit" => return Ok(AppAction::Quit),
            other => writeln!(out, "unknown command '{other}'; type 'help'")?,
        }
        Ok(AppAction::Continue)
    }

    fn show_next(&mut self, selection: Selection, out: &mut impl Write) -> io::Result<()> {
        match self.session.next_word(selection) {
            Some(word) => {
                writeln!(out, "{}", describe(&word))?;
                self.last_word = Some(word);
            }
            None => {
                writeln!(out, "no more words this pass ('refresh' starts over)")?;
                self.last_word = None;
            }
        }
        Ok(())
    }

    fn accept(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(word) = self.last_word.take() else {
            writeln!(out, "nothing to accept; show a word with 'next' first")?;
            return Ok(());
        };
        match self.session.accept_word(&word) {
            Ok(()) => {
                debug!("accepted {}", word.word);
                self.accepted.push(word);
                self.print_grid(out)?;
                writeln!(out, "accepted; pick the next answer with 'length <n> [hint]'")?;
            }
            Err(err) => writeln!(out, "cannot accept: {err}")?,
        }
        Ok(())
    }

    fn toggle(&mut self, toggle: OptionToggle, out: &mut impl Write) -> io::Result<()> {
        self.session.set_option(toggle);
        self.options = self.session.options();
        writeln!(
            out,
            "vowel check {}, dictionary check {}",
            on_off(self.options.vowel_check),
            on_off(self.options.dictionary_check)
        )?;
        self.refresh(out)
    }

    fn refresh(&mut self, out: &mut impl Write) -> io::Result<()> {
        match self.session.refresh_words() {
            Ok(_) => self.print_stats(out),
            Err(err) => writeln!(out, "search failed: {err}"),
        }
    }

    /// Start hunting a different answer in the same puzzle: rebuild the
    /// session from the original letters and replay the accepted answers.
    fn new_answer(&mut self, length: usize, hint: String, out: &mut impl Write) -> io::Result<()> {
        let config = SessionConfig {
            side: self.side,
            letters: &self.letters,
            word_length: length,
            hint: &hint,
            options: self.options,
            solved: &self.accepted,
            parallel: self.parallel,
        };
        match Session::start(config, self.dictionary.clone()) {
            Ok(session) => {
                self.session = session;
                self.word_length = length;
                self.hint = hint;
                self.last_word = None;
                self.print_stats(out)
            }
            Err(err) => writeln!(out, "cannot start search: {err}"),
        }
    }

    fn print_grid(&self, out: &mut impl Write) -> io::Result<()> {
        for row in self.session.grid_letters() {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        Ok(())
    }

    fn print_stats(&self, out: &mut impl Write) -> io::Result<()> {
        let stats = self.session.stats();
        writeln!(
            out,
            "length {} hint '{}': {} usable words from {} candidate paths ({} starting cells)",
            self.word_length,
            self.hint,
            stats.words_kept,
            stats.candidates_found,
            stats.starts_searched
        )
    }

    fn print_help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "next (n)        show the next unique word")?;
        writeln!(out, "same (s)        show another placement of the same word")?;
        writeln!(out, "flush (f)       forget returned words, then next")?;
        writeln!(out, "accept (a)      accept the shown word and collapse the box")?;
        writeln!(out, "length <n> [h]  hunt an answer of length n (hint h)")?;
        writeln!(out, "grid (g)        print the current box")?;
        writeln!(out, "stats           print the last search statistics")?;
        writeln!(out, "vowel / dict    toggle the filters and re-search")?;
        writeln!(out, "refresh (r)     re-run the search over the current box")?;
        writeln!(out, "cancel          cancel outstanding searches")?;
        writeln!(out, "quit (q)        leave")?;
        Ok(())
    }
}

/// Render a found word with the cells it uses, first letter to last.
fn describe(word: &FoundWord) -> String {
    let cells: Vec<String> = word
        .letters
        .iter()
        .map(|p| format!("({},{})", p.pos.row, p.pos.col))
        .collect();
    format!("{}  [{}]", word.word, cells.join(" "))
}

/// Drain every unique candidate from the session as JSON lines.
pub fn dump_json(
    mut session: Session,
    mut out: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(word) = session.next_word(Selection::Unique) {
        writeln!(out, "{}", serde_json::to_string(&word)?)?;
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
