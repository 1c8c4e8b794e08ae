//! Correspondance matière → enseignant (pré-passe) et inférence de matière.

use std::collections::HashMap;

use super::classify;
use super::grid::Grid;
use crate::model::Subject;

/// Classes dont la matière est connue d'avance.
const ENGLISH_CLASSES: [&str; 5] = ["2A", "2B", "2C", "5A", "5B"];
const CO_CURRICULAR_KEYWORDS: [&str; 5] = ["DANCE", "ART", "MUSIC", "GAMES", "SPORT"];

/// Inférence de matière à partir du nom de classe nettoyé. Ne sert que
/// lorsque la pré-passe n'a rien appris pour l'enseignant.
pub fn infer_subject(class_name: &str) -> Subject {
    let up = class_name.trim().to_ascii_uppercase();
    if CO_CURRICULAR_KEYWORDS.iter().any(|k| up.contains(k)) {
        return Subject::CoCurricular;
    }
    if up == "READING" || up == "LIBRARY" {
        return Subject::Reading;
    }
    if ENGLISH_CLASSES.contains(&up.as_str()) {
        return Subject::English;
    }
    if up.starts_with('6') || up.starts_with('3') {
        return Subject::Maths;
    }
    Subject::Miscellaneous
}

/// Pré-passe : dans les sections d'en-tête, chaque cellule ressemblant à un
/// nom d'enseignant est associée à la dernière matière rencontrée. Le
/// contexte se referme dès qu'une ligne porte la structure d'emploi du
/// temps (jour ou plage horaire) ou qu'une ligne est entièrement vide, pour
/// que la section de correspondance ne déborde pas sur les blocs.
pub fn scan_subject_map(grid: &Grid) -> HashMap<String, Subject> {
    let mut map = HashMap::new();
    let mut current: Option<Subject> = None;

    for row in grid {
        let blank = row.iter().all(|c| c.trim().is_empty());
        let structural = row
            .iter()
            .any(|c| classify::is_weekday(c) || classify::looks_like_time(c));
        if blank || structural {
            current = None;
            continue;
        }
        for cell in row {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Ok(subject) = trimmed.parse::<Subject>() {
                current = Some(subject);
                continue;
            }
            if let Some(subject) = current {
                if classify::is_teacher_name_cell(trimmed) {
                    let name = classify::clean_teacher_name(trimmed);
                    if !name.is_empty() {
                        map.entry(name).or_insert(subject);
                    }
                }
            }
        }
    }
    map
}
