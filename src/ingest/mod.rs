//! Import de l'emploi du temps maître depuis une grille CSV irrégulière :
//! blocs enseignants empilés verticalement, en-têtes incohérents, cellules
//! fusionnées ou vides, lignes de pause, noms pollués par des annotations
//! de rôle. Les anomalies de ligne sont comptées, jamais fatales ; seule
//! une grille sans aucun bloc exploitable met l'import en échec.

mod blocks;
pub mod classify;
mod grid;
pub mod subjects;
mod types;

pub use types::{BlockEntry, Diagnostics, IngestOptions, IngestSummary, ParsedTimetable, TeacherBlock};

use tracing::info;

use crate::error::SchoolError;

/// Analyse un emploi du temps brut en blocs enseignants normalisés.
pub fn parse(raw: &[u8], opts: &IngestOptions) -> Result<ParsedTimetable, SchoolError> {
    let grid = grid::read_grid(raw)
        .map_err(|e| SchoolError::MalformedTimetable(format!("unreadable grid: {e}")))?;

    let mut diagnostics = Diagnostics::default();
    let subject_map = subjects::scan_subject_map(&grid);
    let blocks = blocks::discover(&grid, &subject_map, opts, &mut diagnostics);

    if blocks.is_empty() {
        return Err(SchoolError::MalformedTimetable(
            "no teacher blocks discovered".to_string(),
        ));
    }

    info!(
        teachers = blocks.len(),
        subject_mappings = subject_map.len(),
        unparsed_slots = diagnostics.unparsed_slots,
        "timetable parsed"
    );

    Ok(ParsedTimetable {
        blocks,
        subject_mappings_found: subject_map.len(),
        diagnostics,
    })
}
