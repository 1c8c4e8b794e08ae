//! Notification des suppléants : collaborateur externe, meilleure-effort.
//! L'échec de remise est journalisé, jamais remonté, et la remise détachée
//! ne retarde pas la décision de couverture.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use tracing::warn;

use crate::model::{Subject, Weekday};

/// Détails structurés d'une affectation, destinés au transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionNotice {
    pub date: NaiveDate,
    pub day: Weekday,
    pub period: String,
    pub class_name: String,
    pub subject: Subject,
    pub absent_name: String,
    pub substitute_name: String,
    pub reason: Option<String>,
}

impl SubstitutionNotice {
    /// Objet du message.
    pub fn subject_line(&self) -> String {
        format!(
            "URGENT: Substitution Duty Assigned - {} {}",
            self.date, self.period
        )
    }
}

/// Permet de customiser le rendu du message (texte, HTML, SMS…).
pub trait NoticeRenderer {
    fn render(&self, notice: &SubstitutionNotice) -> String;
}

/// Gabarit texte simple destiné à un futur transport mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, notice: &SubstitutionNotice) -> String {
        format!(
            "Dear {name},\n\nYou have been assigned to cover a class due to an absence.\n\n\
             Date: {date} ({day})\nTime: {period}\nSubject/Class: {class} ({subject})\n\
             Absent Teacher: {absent}\nReason: {reason}\n\n\
             Please check the updated schedule immediately. Thank you for covering this period.\n",
            name = notice.substitute_name,
            date = notice.date,
            day = notice.day,
            period = notice.period,
            class = notice.class_name,
            subject = notice.subject,
            absent = notice.absent_name,
            reason = notice.reason.as_deref().unwrap_or("Absent"),
        )
    }
}

/// Capacité d'envoi : vrai si la remise a réussi.
pub trait Notifier: Send + Sync {
    fn notify(&self, email: &str, notice: &SubstitutionNotice) -> bool;
}

/// Notificateur inerte (tests, mode hors-ligne).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _email: &str, _notice: &SubstitutionNotice) -> bool {
        true
    }
}

/// Remise détachée d'un avis. Le handle permet un arrêt propre, l'ignorer
/// reste valide.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    email: String,
    notice: SubstitutionNotice,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        if !notifier.notify(&email, &notice) {
            warn!(%email, period = %notice.period, "substitution notification failed");
        }
    })
}
