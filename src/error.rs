use thiserror::Error;

/// Taxonomie fermée des erreurs du coeur. Un créneau sans suppléant ou une
/// journée sans période à couvrir sont des résultats normaux, pas des
/// variantes ici.
#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("malformed timetable: {0}")]
    MalformedTimetable(String),
    #[error("unknown teacher: {0}")]
    TeacherNotFound(String),
    #[error("reason is required when status is Busy")]
    ReasonRequired,
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
