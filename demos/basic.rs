//! Basic example of using the word-search engine

use std::sync::Arc;

use wordbox_core::{
    Dictionary, SearchOptions, Selection, Session, SessionConfig, WordList,
};

fn main() {
    // A 3x3 puzzle box:
    //   C A R
    //   B T E
    //   S U D
    let dictionary: Arc<dyn Dictionary> =
        Arc::new(WordList::new(["car", "tab", "cat", "bat", "bus", "dub"]));

    println!("Searching the box for 3-letter words...\n");
    let mut session = Session::start(
        SessionConfig {
            side: 3,
            letters: "CARBTESUD",
            word_length: 3,
            hint: "",
            options: SearchOptions::default(),
            solved: &[],
            parallel: true,
        },
        Some(Arc::clone(&dictionary)),
    )
    .expect("valid puzzle configuration");

    let stats = session.stats();
    println!(
        "{} usable words out of {} candidate paths",
        stats.words_kept, stats.candidates_found
    );

    // Step through the unique words
    while let Some(word) = session.next_word(Selection::Unique) {
        let cells: Vec<String> = word
            .letters
            .iter()
            .map(|p| format!("({},{})", p.pos.row, p.pos.col))
            .collect();
        println!("  {} via {}", word.word, cells.join(" "));
    }

    // Accept a word and watch the box collapse
    session.refresh_words().expect("search runs");
    if let Some(word) = session.next_word(Selection::Unique) {
        println!("\nAccepting {}...", word.word);
        session.accept_word(&word).expect("word came from this box");
        println!("Box after collapse:");
        for row in session.grid_letters() {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            println!("  {}", line.join(" "));
        }
    }
}
