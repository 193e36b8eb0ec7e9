/// History log and console session tests
mod common;

use std::io::Cursor;

use archlinux_ai_cli::assistant::Assistant;
use archlinux_ai_cli::cli::Interrupt;
use archlinux_ai_cli::cli::session::{answer_query, run_interactive, show_history};
use archlinux_ai_cli::history::{HistoryStore, MAX_HISTORY_ENTRIES};
use archlinux_ai_cli::wiki::WikiRetriever;
use common::{FakeGenerator, FakeWiki, HomeDirBuilder, WIKI_URL, history_entry};

#[test]
fn test_appending_51st_entry_evicts_oldest() {
    let entries: Vec<_> = (1..=50).map(history_entry).collect();
    let home = HomeDirBuilder::new().with_history(&entries);
    let store = HistoryStore::in_dir(&home.config_dir());
    assert_eq!(store.load().len(), 50);

    store.append(history_entry(51)).unwrap();

    let entries = store.load();
    assert_eq!(entries.len(), MAX_HISTORY_ENTRIES);
    assert!(entries.iter().all(|e| e.query != "question 1"));
    assert_eq!(entries.first().unwrap().query, "question 2");
    assert_eq!(entries.last().unwrap().query, "question 51");
}

#[test]
fn test_history_file_is_json_array_with_string_timestamps() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    store.append(history_entry(1)).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["query"], "question 1");
    assert_eq!(first["response"], "answer 1");
    assert!(first["timestamp"].is_string());
}

#[test]
fn test_log_with_unix_second_timestamps_is_kept_on_append() {
    let home = HomeDirBuilder::new().with_history_content(
        r#"[
  {"query": "how do I install yay?", "response": "Use makepkg.", "timestamp": "1700000000.5"},
  {"query": "what is systemd?", "response": "The init system.", "timestamp": "0"}
]"#,
    );
    let store = HistoryStore::in_dir(&home.config_dir());
    assert_eq!(store.load().len(), 2);

    store.append(history_entry(3)).unwrap();

    let queries: Vec<_> = store.load().into_iter().map(|e| e.query).collect();
    assert_eq!(queries, ["how do I install yay?", "what is systemd?", "question 3"]);
}

#[test]
fn test_show_history_prints_recent_entries() {
    let entries: Vec<_> = (1..=3).map(history_entry).collect();
    let home = HomeDirBuilder::new().with_history(&entries);
    let store = HistoryStore::in_dir(&home.config_dir());

    let mut out = Vec::new();
    show_history(&store, 2, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(!out.contains("question 1"));
    assert!(out.contains("Query: question 2"));
    assert!(out.contains("answer 3"));
    assert!(out.find("question 2").unwrap() < out.find("question 3").unwrap());
}

#[test]
fn test_show_history_empty() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());

    let mut out = Vec::new();
    show_history(&store, 10, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "No history found.\n");
}

#[test]
fn test_answer_query_prints_and_saves() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new().with_page("Pacman", "<p>Pacman is the package manager.</p>");
    let generator = FakeGenerator::replying("\x1b[31mUse pacman -Syu.\x1b[0m");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);

    let mut out = Vec::new();
    let answer =
        answer_query(&assistant, &store, "how do I update?", &Interrupt::new(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Searching Arch Wiki..."));
    assert!(out.contains("Use pacman -Syu."));
    assert!(!out.contains('\x1b'));

    let saved = store.load();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].query, "how do I update?");
    assert_eq!(Some(saved[0].response.clone()), answer);
}

#[test]
fn test_no_pages_found_answer_is_saved() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new();
    let generator = FakeGenerator::replying("unused");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);

    let mut out = Vec::new();
    answer_query(&assistant, &store, "xyzzy", &Interrupt::new(), &mut out).unwrap();

    assert_eq!(generator.calls.get(), 0);
    assert_eq!(store.load()[0].response, archlinux_ai_cli::models::NO_PAGES_FOUND);
}

#[test]
fn test_interactive_loop_handles_commands() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new().with_page("Pacman", "<p>Pacman is the package manager.</p>");
    let generator = FakeGenerator::replying("Answer from the wiki.");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);

    let input = Cursor::new("\n   \nhow do I update?\nhistory\nQUIT\nnever asked\n");
    let mut out = Vec::new();
    run_interactive(&assistant, &store, input, &Interrupt::new(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(generator.calls.get(), 1);
    assert!(out.contains("Answer from the wiki."));
    assert!(out.contains("Query: how do I update?"));
    assert!(out.ends_with("Goodbye! Stay rolling!\n"));
    assert_eq!(store.load().len(), 1);
}

#[test]
fn test_interactive_loop_stops_at_end_of_input() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new();
    let generator = FakeGenerator::replying("unused");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);

    let mut out = Vec::new();
    run_interactive(&assistant, &store, Cursor::new(""), &Interrupt::new(), &mut out).unwrap();

    assert!(String::from_utf8(out).unwrap().contains("Goodbye!"));
    assert!(store.load().is_empty());
}

#[test]
fn test_interrupted_query_is_dropped_without_saving() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new().with_page("Pacman", "<p>Pacman is the package manager.</p>");
    let generator = FakeGenerator::replying("Answer from the wiki.");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);
    let interrupt = Interrupt::new();
    interrupt.request();

    let mut out = Vec::new();
    let answer = answer_query(&assistant, &store, "how do I update?", &interrupt, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(answer.is_none());
    assert!(out.contains("Interrupted."));
    assert!(!out.contains("Answer from the wiki."));
    assert_eq!(generator.calls.get(), 0);
    assert!(store.load().is_empty());
}

#[test]
fn test_interrupt_returns_to_the_prompt() {
    let home = HomeDirBuilder::new();
    let store = HistoryStore::in_dir(&home.config_dir());
    let wiki = FakeWiki::new().with_page("Pacman", "<p>Pacman is the package manager.</p>");
    let generator = FakeGenerator::replying("Answer from the wiki.");
    let assistant = Assistant::new(WikiRetriever::new(&wiki), &generator, WIKI_URL);
    let interrupt = Interrupt::new();
    interrupt.request();

    let input = Cursor::new("first question\nsecond question\nexit\n");
    let mut out = Vec::new();
    run_interactive(&assistant, &store, input, &interrupt, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Interrupted."));
    assert!(out.ends_with("Goodbye! Stay rolling!\n"));
    assert_eq!(generator.calls.get(), 1);
    let saved = store.load();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].query, "second question");
}
