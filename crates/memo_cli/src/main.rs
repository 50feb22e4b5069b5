//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `memo_core` linkage with deterministic output.
//! - Given a settings database path, print what the note store loads.

use memo_core::db::open_db;
use memo_core::{NoteStore, SettingsNoteStore, SqliteSettingsRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memo_core ping={}", memo_core::ping());
    println!("memo_core version={}", memo_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("memo_core db_open failed path={db_path} error={err}");
            return ExitCode::FAILURE;
        }
    };

    let notes = SettingsNoteStore::new(SqliteSettingsRepository::new(&conn)).load_all();
    println!("memo_core notes count={}", notes.len());
    for note in &notes {
        println!(
            "created={} edited={} title={}",
            note.time_created(),
            note.time_last_edited(),
            note.title()
        );
    }
    ExitCode::SUCCESS
}
