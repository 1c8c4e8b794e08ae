//! Choix d'un suppléant : disponibilité sur le créneau exact, charge
//! croissante, priorité aux qualifiés dans la matière.

use chrono::NaiveTime;

use crate::model::{Dataset, Subject, Teacher, TeacherId, Weekday};

/// Options de sélection.
#[derive(Debug, Clone, Copy)]
pub struct SelectOptions {
    /// Plafond de suppléances par enseignant.
    pub max_weekly_workload: u32,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            max_weekly_workload: 5,
        }
    }
}

/// Sélection gloutonne d'un suppléant pour un créneau, sans optimisation
/// globale entre périodes. Lecture seule : l'incrément de charge appartient
/// à l'orchestrateur.
///
/// 1. disponibles = tous sauf l'absent, sans période sur (jour, début, fin) ;
/// 2. tri stable par charge croissante, l'ordre du magasin départage ;
/// 3. premier disponible sous plafond ayant déjà enseigné la matière ;
/// 4. sinon premier disponible sous plafond ;
/// 5. sinon personne — résultat normal, pas une erreur.
pub fn select_substitute<'a>(
    data: &'a Dataset,
    absent: &TeacherId,
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    subject: Subject,
    opts: SelectOptions,
) -> Option<&'a Teacher> {
    let mut available: Vec<&Teacher> = data
        .teachers
        .iter()
        .filter(|t| &t.id != absent)
        .filter(|t| !data.has_entry_at(&t.id, day, start, end))
        .collect();
    available.sort_by_key(|t| t.sub_workload);

    for &t in &available {
        if t.sub_workload < opts.max_weekly_workload && data.has_taught(&t.id, subject) {
            return Some(t);
        }
    }
    for &t in &available {
        if t.sub_workload < opts.max_weekly_workload {
            return Some(t);
        }
    }
    None
}
