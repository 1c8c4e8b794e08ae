//! Découverte des blocs enseignants et extraction des périodes.
//!
//! Un bloc est ancré par une cellule de nom candidate suivie, dans une
//! petite fenêtre de lignes, d'une ligne d'en-tête où « Monday » est
//! immédiatement suivi de « Tuesday ». La colonne horaire est celle juste à
//! gauche de « Monday » ; les données courent jusqu'à l'ancre du bloc
//! suivant.

use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;
use tracing::debug;

use super::classify;
use super::grid::{cell, Grid};
use super::subjects;
use super::types::{BlockEntry, Diagnostics, IngestOptions, TeacherBlock};
use crate::model::{Subject, Weekday};

/// Lignes sous un candidat où chercher l'en-tête des jours.
const WEEKDAY_WINDOW: usize = 2;
/// Écart maximal de colonnes entre « Monday » et « Tuesday ».
const TUESDAY_REACH: usize = 3;

struct Anchor {
    candidate_row: usize,
    raw_name: String,
    weekday_row: usize,
    monday_col: usize,
}

pub(super) fn discover(
    grid: &Grid,
    subject_map: &HashMap<String, Subject>,
    opts: &IngestOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<TeacherBlock> {
    let anchors = find_anchors(grid, diagnostics);
    let mut blocks = Vec::new();

    for (i, anchor) in anchors.iter().enumerate() {
        let name = classify::clean_teacher_name(&anchor.raw_name);
        if name.is_empty() {
            diagnostics.dropped_blocks += 1;
            debug!(row = anchor.candidate_row, raw = %anchor.raw_name, "block dropped: empty name after cleaning");
            continue;
        }
        let data_start = anchor.weekday_row + 1;
        let data_end = anchors
            .get(i + 1)
            .map_or(grid.len(), |next| next.candidate_row);
        let subject_override = subject_map.get(&name).copied();
        let entries = extract_entries(grid, anchor, data_start, data_end, subject_override, diagnostics);
        if entries.is_empty() {
            diagnostics.dropped_blocks += 1;
            debug!(teacher = %name, "block dropped: no valid periods");
            continue;
        }
        let email = classify::synthesize_email(&name, &opts.email_domain);
        blocks.push(TeacherBlock { name, email, entries });
    }
    blocks
}

fn find_anchors(grid: &Grid, diagnostics: &mut Diagnostics) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = Vec::new();
    let mut claimed_weekday_rows: HashSet<usize> = HashSet::new();

    for row in 0..grid.len() {
        // une ligne consommée comme en-tête de jours ne fournit pas de candidats
        if claimed_weekday_rows.contains(&row) {
            continue;
        }
        for col in 0..grid[row].len() {
            let raw = cell(grid, row, col);
            if !classify::is_teacher_name_cell(raw) {
                continue;
            }
            diagnostics.candidate_cells += 1;
            let Some((weekday_row, monday_col)) = find_weekday_header(grid, row) else {
                diagnostics.blocks_without_header += 1;
                continue;
            };
            if monday_col == 0 {
                // pas de colonne horaire à gauche de Monday
                diagnostics.blocks_without_header += 1;
                continue;
            }
            if !claimed_weekday_rows.insert(weekday_row) {
                // en-tête déjà pris par un candidat plus haut
                continue;
            }
            anchors.push(Anchor {
                candidate_row: row,
                raw_name: raw.to_string(),
                weekday_row,
                monday_col,
            });
            break;
        }
    }
    anchors
}

/// Cherche sous `from_row` une ligne où « Monday » est suivi de « Tuesday »
/// à quelques colonnes près. Retourne (ligne, colonne de Monday).
fn find_weekday_header(grid: &Grid, from_row: usize) -> Option<(usize, usize)> {
    for row in from_row + 1..=(from_row + WEEKDAY_WINDOW) {
        if row >= grid.len() {
            break;
        }
        for col in 0..grid[row].len() {
            if !cell(grid, row, col).eq_ignore_ascii_case("Monday") {
                continue;
            }
            let tuesday_follows = (col + 1..=col + TUESDAY_REACH)
                .any(|c| cell(grid, row, c).eq_ignore_ascii_case("Tuesday"));
            if tuesday_follows {
                return Some((row, col));
            }
        }
    }
    None
}

fn extract_entries(
    grid: &Grid,
    anchor: &Anchor,
    data_start: usize,
    data_end: usize,
    subject_override: Option<Subject>,
    diagnostics: &mut Diagnostics,
) -> Vec<BlockEntry> {
    let time_col = anchor.monday_col - 1;
    let mut seen_slots: HashSet<(Weekday, NaiveTime, NaiveTime)> = HashSet::new();
    let mut out = Vec::new();

    for row in data_start..data_end.min(grid.len()) {
        let slot_raw = cell(grid, row, time_col);
        if slot_raw.is_empty() || classify::is_break_marker(slot_raw) {
            continue;
        }
        let Some((start, end)) = split_slot(slot_raw) else {
            diagnostics.unparsed_slots += 1;
            debug!(row, slot = slot_raw, "unsplittable time slot, row skipped");
            continue;
        };
        for (offset, day) in Weekday::TAUGHT.iter().enumerate() {
            let class_raw = cell(grid, row, anchor.monday_col + offset);
            if class_raw.is_empty() || classify::is_noise_cell(class_raw) {
                continue;
            }
            if !seen_slots.insert((*day, start, end)) {
                diagnostics.duplicate_slots += 1;
                continue;
            }
            let class_name = class_raw.trim().to_string();
            let subject = subject_override.unwrap_or_else(|| subjects::infer_subject(&class_name));
            let is_free = class_name.eq_ignore_ascii_case("READING");
            out.push(BlockEntry {
                day: *day,
                start,
                end,
                class_name,
                subject,
                is_free,
            });
        }
    }
    out
}

/// Découpe « 08:30 - 09:10 » en bornes de période. Tiret simple ou
/// demi-cadratin, « . » toléré pour « : » (artefact décimal).
pub(super) fn split_slot(raw: &str) -> Option<(NaiveTime, NaiveTime)> {
    let normalized = raw.replace('.', ":");
    let parts: Vec<&str> = normalized
        .split(['-', '–', '—'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 2 {
        return None;
    }
    let start = NaiveTime::parse_from_str(parts[0], "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(parts[1], "%H:%M").ok()?;
    Some((start, end))
}
