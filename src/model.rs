use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Teacher
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId(String);

impl TeacherId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour AbsenceLog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsenceId(String);

impl AbsenceId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Enseignant. L'email sert de clé naturelle entre deux imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Compteur cumulatif de suppléances, jamais décrémenté par le coeur.
    #[serde(default)]
    pub sub_workload: u32,
}

impl Teacher {
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            id: TeacherId::random(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            sub_workload: 0,
        }
    }
}

/// Jour de semaine, comparé structurellement (jamais en durée).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Les cinq colonnes d'un bloc d'emploi du temps, à partir de « Monday ».
    pub const TAUGHT: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("unknown weekday: {other}")),
        }
    }
}

/// Matière (ensemble fermé, aligné sur l'inférence de l'import).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    English,
    Maths,
    Science,
    Reading,
    CoCurricular,
    Miscellaneous,
}

impl Subject {
    pub fn name(self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::Maths => "Maths",
            Subject::Science => "Science",
            Subject::Reading => "Reading",
            Subject::CoCurricular => "Co-Curricular",
            Subject::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Subject::English),
            "maths" => Ok(Subject::Maths),
            "science" => Ok(Subject::Science),
            "reading" => Ok(Subject::Reading),
            "co-curricular" | "cocurricular" => Ok(Subject::CoCurricular),
            "miscellaneous" => Ok(Subject::Miscellaneous),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// Statut d'un événement d'absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceStatus {
    Absent,
    Busy,
}

impl fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AbsenceStatus::Absent => "Absent",
            AbsenceStatus::Busy => "Busy",
        })
    }
}

impl FromStr for AbsenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absent" => Ok(AbsenceStatus::Absent),
            "busy" => Ok(AbsenceStatus::Busy),
            other => Err(format!("unknown status: {other} (expected Absent or Busy)")),
        }
    }
}

/// Période d'emploi du temps d'un enseignant.
/// Invariant : un enseignant n'a jamais deux périodes sur le même
/// (jour, début, fin) — la vérification de disponibilité en dépend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub teacher: TeacherId,
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub class_name: String,
    pub subject: Subject,
    #[serde(default)]
    pub is_free: bool,
}

impl TimetableEntry {
    /// Fenêtre « 08:30-09:10 » pour l'affichage et les notifications.
    pub fn period(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Trace d'absence pour une période précise, immuable après création.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceLog {
    pub id: AbsenceId,
    pub teacher: TeacherId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: AbsenceStatus,
    pub reason: Option<String>,
}

/// Affectation de suppléance aboutie. Les périodes restées sans suppléant
/// n'ont simplement pas d'enregistrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionHistory {
    pub absence: AbsenceId,
    pub substitute: TeacherId,
    pub class_name: String,
    pub subject: Subject,
    pub timestamp: DateTime<Utc>,
}

/// État complet de l'école (équivalent relationnel, en mémoire).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub teachers: Vec<Teacher>,
    pub entries: Vec<TimetableEntry>,
    #[serde(default)]
    pub absences: Vec<AbsenceLog>,
    #[serde(default)]
    pub history: Vec<SubstitutionHistory>,
}

impl Dataset {
    pub fn find_teacher_by_email<'a>(&'a self, email: &str) -> Option<&'a Teacher> {
        self.teachers.iter().find(|t| t.email == email)
    }

    pub fn find_teacher_by_id<'a>(&'a self, id: &TeacherId) -> Option<&'a Teacher> {
        self.teachers.iter().find(|t| &t.id == id)
    }

    pub fn find_teacher_mut_by_id(&mut self, id: &TeacherId) -> Option<&mut Teacher> {
        self.teachers.iter_mut().find(|t| &t.id == id)
    }

    /// Retrouve par email ou crée. Le compteur de suppléances d'un
    /// enseignant existant survit aux ré-imports.
    pub fn upsert_teacher(&mut self, name: &str, email: &str) -> TeacherId {
        if let Some(t) = self.teachers.iter().find(|t| t.email == email) {
            return t.id.clone();
        }
        let t = Teacher::new(name, email);
        let id = t.id.clone();
        self.teachers.push(t);
        id
    }

    /// Remplacement en bloc : l'import est destructif pour les périodes.
    pub fn replace_all_entries(&mut self, entries: Vec<TimetableEntry>) {
        self.entries = entries;
    }

    pub fn entries_for<'a>(&'a self, teacher: &TeacherId, day: Weekday) -> Vec<&'a TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| &e.teacher == teacher && e.day == day)
            .collect()
    }

    /// Vrai si une période existe sur ce créneau exact, libre ou non :
    /// c'est l'absence de toute période qui définit la disponibilité.
    pub fn has_entry_at(
        &self,
        teacher: &TeacherId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> bool {
        self.entries
            .iter()
            .any(|e| &e.teacher == teacher && e.day == day && e.start == start && e.end == end)
    }

    /// Qualification « a déjà enseigné » : n'importe quelle période,
    /// n'importe quel jour, dans la matière demandée.
    pub fn has_taught(&self, teacher: &TeacherId, subject: Subject) -> bool {
        self.entries
            .iter()
            .any(|e| &e.teacher == teacher && e.subject == subject)
    }

    pub fn increment_workload(&mut self, teacher: &TeacherId, delta: u32) {
        if let Some(t) = self.find_teacher_mut_by_id(teacher) {
            t.sub_workload += delta;
        }
    }
}
