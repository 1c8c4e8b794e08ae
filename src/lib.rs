#![forbid(unsafe_code)]
//! Suppleance — coeur de gestion des remplacements d'enseignants (sans BD).
//!
//! - Import de l'emploi du temps maître depuis une grille CSV irrégulière.
//! - Affectation de suppléants : disponibilité, charge plafonnée, priorité matière.
//! - Journal d'absences et historique de suppléances ; état fichier JSON.
//! - Notification meilleure-effort, jamais bloquante pour la décision.

pub mod coverage;
pub mod error;
pub mod ingest;
pub mod io;
pub mod model;
pub mod notification;
pub mod school;
pub mod selector;
pub mod storage;

pub use coverage::{AbsenceInput, CoverageReport, PeriodOutcome};
pub use error::SchoolError;
pub use ingest::{Diagnostics, IngestOptions, IngestSummary};
pub use model::{
    AbsenceId, AbsenceLog, AbsenceStatus, Dataset, Subject, SubstitutionHistory, Teacher,
    TeacherId, TimetableEntry, Weekday,
};
pub use notification::{NoticeRenderer, Notifier, NullNotifier, SubstitutionNotice, TextNotice};
pub use school::{HistoryRecord, School};
pub use selector::{select_substitute, SelectOptions};
pub use storage::{JsonStorage, Storage};
