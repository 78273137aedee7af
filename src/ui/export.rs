//! Board export.
//!
//! Writes the plain board rendering, under a short dated heading, to
//! `<dir>/<base_name>.txt`.

use crate::domain::error::{Result, WatchTierError};
use crate::ui::renderer::render_board_plain;
use crate::ui::viewmodel::BoardViewModel;
use std::path::{Path, PathBuf};

/// Width the exported board is laid out for.
pub const EXPORT_COLUMNS: usize = 100;

/// Writes `board` to `<dir>/<base_name>.txt` and returns the path written.
///
/// Path separators in `base_name` are replaced so the file always lands in
/// `dir`, which is created if missing.
///
/// # Errors
///
/// Returns [`WatchTierError::Storage`] for a blank name, or an I/O error if the
/// directory or file cannot be written.
pub fn export_board(board: &BoardViewModel, dir: &Path, base_name: &str) -> Result<PathBuf> {
    let _span = tracing::debug_span!("export_board", dir = ?dir, base_name).entered();

    let file_name = sanitize(base_name);
    if file_name.is_empty() {
        return Err(WatchTierError::Storage("export name is empty".to_string()));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{file_name}.txt"));

    let ranked: usize = board.rows.iter().map(|r| r.items.len()).sum();
    let mut contents = format!(
        "Movie Tier List\nExported {} · {ranked} ranked, {} unranked\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M"),
        board.pool.len()
    );
    contents.push_str(&render_board_plain(board, EXPORT_COLUMNS));

    std::fs::write(&path, contents)?;
    tracing::info!(path = ?path, ranked, "board exported");
    Ok(path)
}

fn sanitize(base_name: &str) -> String {
    base_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
