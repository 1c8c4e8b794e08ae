//! Rapport d'absence journée complète : énumère les périodes à couvrir,
//! affecte les suppléants, journalise absences et historique.

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::info;

use crate::error::SchoolError;
use crate::ingest::classify;
use crate::model::{
    AbsenceId, AbsenceLog, AbsenceStatus, Dataset, Subject, SubstitutionHistory, TimetableEntry,
    Weekday,
};
use crate::notification::SubstitutionNotice;
use crate::selector::{select_substitute, SelectOptions};

/// Demande de rapport d'absence pour une journée entière.
#[derive(Debug, Clone)]
pub struct AbsenceInput {
    /// Nom affiché ; résolu en enseignant par la même synthèse d'email
    /// que l'import.
    pub teacher_name: String,
    pub date: NaiveDate,
    pub status: AbsenceStatus,
    /// Obligatoire quand le statut est `Busy`.
    pub reason: Option<String>,
}

/// Résultat pour une période : suppléant affecté ou non.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodOutcome {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub class_name: String,
    pub subject: Subject,
    pub substitute: Option<String>,
}

/// Rapport complet d'une journée d'absence. Zéro période à couvrir est un
/// résultat valide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub teacher_name: String,
    pub date: NaiveDate,
    pub day: Weekday,
    pub outcomes: Vec<PeriodOutcome>,
    pub covered: usize,
}

impl CoverageReport {
    pub fn uncovered(&self) -> usize {
        self.outcomes.len() - self.covered
    }
}

/// Applique le rapport sur le jeu de données fourni (une copie de travail :
/// l'appelant ne valide qu'en cas de succès). Retourne le rapport et les
/// notifications à émettre après validation.
pub(crate) fn report_full_day(
    data: &mut Dataset,
    input: &AbsenceInput,
    email_domain: &str,
    opts: SelectOptions,
) -> Result<(CoverageReport, Vec<(String, SubstitutionNotice)>), SchoolError> {
    // validations avant toute écriture
    if input.status == AbsenceStatus::Busy
        && input.reason.as_deref().map_or(true, |r| r.trim().is_empty())
    {
        return Err(SchoolError::ReasonRequired);
    }
    let email = classify::synthesize_email(&input.teacher_name, email_domain);
    let absent = data
        .find_teacher_by_email(&email)
        .cloned()
        .ok_or_else(|| SchoolError::TeacherNotFound(input.teacher_name.clone()))?;

    let day = Weekday::from_date(input.date);
    let periods: Vec<TimetableEntry> = data
        .entries_for(&absent.id, day)
        .into_iter()
        .filter(|e| !e.is_free)
        .cloned()
        .collect();

    let mut outcomes = Vec::with_capacity(periods.len());
    let mut notices = Vec::new();
    let mut covered = 0usize;

    for period in &periods {
        let log = AbsenceLog {
            id: AbsenceId::random(),
            teacher: absent.id.clone(),
            date: input.date,
            start: period.start,
            end: period.end,
            status: input.status,
            reason: input.reason.clone(),
        };
        let absence_id = log.id.clone();
        data.absences.push(log);

        let chosen = select_substitute(data, &absent.id, day, period.start, period.end, period.subject, opts)
            .map(|t| (t.id.clone(), t.name.clone(), t.email.clone()));

        let mut outcome = PeriodOutcome {
            start: period.start,
            end: period.end,
            class_name: period.class_name.clone(),
            subject: period.subject,
            substitute: None,
        };

        if let Some((sub_id, sub_name, sub_email)) = chosen {
            data.history.push(SubstitutionHistory {
                absence: absence_id,
                substitute: sub_id.clone(),
                class_name: period.class_name.clone(),
                subject: period.subject,
                timestamp: Utc::now(),
            });
            data.increment_workload(&sub_id, 1);
            covered += 1;
            notices.push((
                sub_email,
                SubstitutionNotice {
                    date: input.date,
                    day,
                    period: period.period(),
                    class_name: period.class_name.clone(),
                    subject: period.subject,
                    absent_name: absent.name.clone(),
                    substitute_name: sub_name.clone(),
                    reason: input.reason.clone(),
                },
            ));
            outcome.substitute = Some(sub_name);
        }
        outcomes.push(outcome);
    }

    info!(
        teacher = %absent.name,
        %day,
        periods = outcomes.len(),
        covered,
        "absence day processed"
    );

    Ok((
        CoverageReport {
            teacher_name: absent.name,
            date: input.date,
            day,
            outcomes,
            covered,
        },
        notices,
    ))
}
