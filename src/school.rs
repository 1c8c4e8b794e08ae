//! Façade du coeur : encapsule le jeu de données et orchestre import,
//! rapports d'absence et vues de reporting. Chaque opération d'écriture est
//! tout-ou-rien : elle travaille sur une copie et ne remplace l'état qu'en
//! cas de succès.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::coverage::{self, AbsenceInput, CoverageReport};
use crate::error::SchoolError;
use crate::ingest::{self, IngestOptions, IngestSummary};
use crate::model::{Dataset, Subject, Teacher, TeacherId, TimetableEntry, Weekday};
use crate::notification::{self, Notifier};
use crate::selector::{self, SelectOptions};

/// Ligne d'historique jointe (absence × suppléance × noms), prête pour le
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub class_name: String,
    pub subject: Subject,
    pub absent_name: String,
    pub substitute_name: String,
    pub timestamp: DateTime<Utc>,
}

/// École : état courant + opérations du coeur.
#[derive(Debug, Default)]
pub struct School {
    data: Dataset,
    dispatches: Vec<JoinHandle<()>>,
}

impl School {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(data: Dataset) -> Self {
        Self {
            data,
            dispatches: Vec::new(),
        }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut Dataset {
        &mut self.data
    }

    /// Import destructif de l'emploi du temps : toutes les périodes sont
    /// remplacées, les enseignants retrouvés par email gardent leur
    /// compteur de charge. Un échec d'analyse laisse l'état intact.
    pub fn ingest_timetable(
        &mut self,
        raw: &[u8],
        opts: &IngestOptions,
    ) -> Result<IngestSummary, SchoolError> {
        let parsed = ingest::parse(raw, opts)?;
        let mut diagnostics = parsed.diagnostics;

        let mut next = self.data.clone();
        let mut new_entries: Vec<TimetableEntry> = Vec::new();
        let mut seen: HashSet<(TeacherId, Weekday, NaiveTime, NaiveTime)> = HashSet::new();
        let teachers_processed = parsed.blocks.len();

        for block in parsed.blocks {
            let teacher_id = next.upsert_teacher(&block.name, &block.email);
            for entry in block.entries {
                // unicité du créneau par enseignant, y compris entre blocs
                if !seen.insert((teacher_id.clone(), entry.day, entry.start, entry.end)) {
                    diagnostics.duplicate_slots += 1;
                    continue;
                }
                new_entries.push(TimetableEntry {
                    teacher: teacher_id.clone(),
                    day: entry.day,
                    start: entry.start,
                    end: entry.end,
                    class_name: entry.class_name,
                    subject: entry.subject,
                    is_free: entry.is_free,
                });
            }
        }

        let total_entries = new_entries.len();
        next.replace_all_entries(new_entries);
        self.data = next;

        Ok(IngestSummary {
            teachers_processed,
            total_entries,
            subject_mappings_found: parsed.subject_mappings_found,
            diagnostics,
        })
    }

    /// Enregistrement explicite d'un enseignant, hors import.
    pub fn register_teacher(
        &mut self,
        name: &str,
        email: &str,
        is_admin: bool,
    ) -> Result<TeacherId, SchoolError> {
        if self.data.find_teacher_by_email(email).is_some() {
            return Err(SchoolError::EmailTaken(email.to_string()));
        }
        let mut teacher = Teacher::new(name, email);
        teacher.is_admin = is_admin;
        let id = teacher.id.clone();
        self.data.teachers.push(teacher);
        Ok(id)
    }

    /// Rapport d'absence journée complète, validé en bloc. Les
    /// notifications partent après validation, en tâches détachées.
    pub fn report_full_day_absence(
        &mut self,
        input: &AbsenceInput,
        email_domain: &str,
        opts: SelectOptions,
        notifier: Arc<dyn Notifier>,
    ) -> Result<CoverageReport, SchoolError> {
        let mut next = self.data.clone();
        let (report, notices) = coverage::report_full_day(&mut next, input, email_domain, opts)?;
        self.data = next;

        for (email, notice) in notices {
            self.dispatches
                .push(notification::dispatch(Arc::clone(&notifier), email, notice));
        }
        Ok(report)
    }

    /// Attend la fin des remises de notifications en cours (arrêt propre).
    pub fn flush_notifications(&mut self) {
        for handle in self.dispatches.drain(..) {
            let _ = handle.join();
        }
    }

    /// Sélection ad hoc (période partielle), sans écriture.
    pub fn select_substitute(
        &self,
        absent: &TeacherId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        subject: Subject,
        opts: SelectOptions,
    ) -> Option<&Teacher> {
        selector::select_substitute(&self.data, absent, day, start, end, subject, opts)
    }

    /// Enseignants triés par charge de suppléance croissante.
    pub fn list_workload(&self) -> Vec<&Teacher> {
        let mut out: Vec<&Teacher> = self.data.teachers.iter().collect();
        out.sort_by_key(|t| t.sub_workload);
        out
    }

    /// Historique joint. Jointures explicites sur tables pré-indexées,
    /// pas de navigation paresseuse.
    pub fn list_history(&self) -> Vec<HistoryRecord> {
        let absences: HashMap<_, _> = self.data.absences.iter().map(|a| (&a.id, a)).collect();
        let names: HashMap<_, _> = self
            .data
            .teachers
            .iter()
            .map(|t| (&t.id, t.name.as_str()))
            .collect();

        self.data
            .history
            .iter()
            .filter_map(|h| {
                let log = absences.get(&h.absence)?;
                Some(HistoryRecord {
                    date: log.date,
                    start: log.start,
                    end: log.end,
                    class_name: h.class_name.clone(),
                    subject: h.subject,
                    absent_name: names.get(&log.teacher).copied().unwrap_or("?").to_string(),
                    substitute_name: names.get(&h.substitute).copied().unwrap_or("?").to_string(),
                    timestamp: h.timestamp,
                })
            })
            .collect()
    }
}
