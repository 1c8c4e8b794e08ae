use crate::model::{Subject, Weekday};
use chrono::NaiveTime;

/// Options d'import.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Domaine institutionnel suffixé aux emails synthétisés.
    pub email_domain: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            email_domain: "school.edu".to_string(),
        }
    }
}

/// Une période extraite d'un bloc, pas encore rattachée à un TeacherId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub class_name: String,
    pub subject: Subject,
    pub is_free: bool,
}

/// Bloc enseignant découvert dans la grille : nom nettoyé, email
/// synthétisé, périodes extraites (jamais vide une fois retenu).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherBlock {
    pub name: String,
    pub email: String,
    pub entries: Vec<BlockEntry>,
}

/// Compteurs d'anomalies non fatales relevées pendant l'analyse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Cellules candidates au rôle de nom d'enseignant.
    pub candidate_cells: usize,
    /// Candidats sans ligne de jours dans la fenêtre (pas de vrais blocs).
    pub blocks_without_header: usize,
    /// Blocs écartés : nom vide après nettoyage ou aucune période valide.
    pub dropped_blocks: usize,
    /// Lignes dont la cellule horaire n'a pas pu être découpée en deux bornes.
    pub unparsed_slots: usize,
    /// Périodes écartées car le créneau (jour, début, fin) était déjà pris.
    pub duplicate_slots: usize,
}

/// Résultat brut du parseur, avant écriture dans le jeu de données.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimetable {
    pub blocks: Vec<TeacherBlock>,
    pub subject_mappings_found: usize,
    pub diagnostics: Diagnostics,
}

/// Bilan d'un import abouti.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub teachers_processed: usize,
    pub total_entries: usize,
    pub subject_mappings_found: usize,
    pub diagnostics: Diagnostics,
}
