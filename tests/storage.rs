#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime, Utc};
use suppleance::{
    AbsenceId, AbsenceLog, AbsenceStatus, Dataset, JsonStorage, Storage, Subject,
    SubstitutionHistory, Teacher, TimetableEntry, Weekday,
};
use tempfile::tempdir;

fn sample_dataset() -> Dataset {
    let mut data = Dataset::default();
    let teacher = Teacher::new("Jane Doe", "janedoe@school.edu");
    let substitute = Teacher::new("John Smith", "johnsmith@school.edu");
    data.entries.push(TimetableEntry {
        teacher: teacher.id.clone(),
        day: Weekday::Monday,
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 40, 0).unwrap(),
        class_name: "3A".to_string(),
        subject: Subject::Maths,
        is_free: false,
    });
    let log = AbsenceLog {
        id: AbsenceId::random(),
        teacher: teacher.id.clone(),
        date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 40, 0).unwrap(),
        status: AbsenceStatus::Busy,
        reason: Some("medical appointment".to_string()),
    };
    data.history.push(SubstitutionHistory {
        absence: log.id.clone(),
        substitute: substitute.id.clone(),
        class_name: "3A".to_string(),
        subject: Subject::Maths,
        timestamp: Utc::now(),
    });
    data.absences.push(log);
    data.teachers = vec![teacher, substitute];
    data
}

#[test]
fn save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("school.json");
    let storage = JsonStorage::open(&path).unwrap();

    let data = sample_dataset();
    storage.save(&data).unwrap();
    let loaded = storage.load().unwrap();
    assert_eq!(loaded, data);
}

#[test]
fn save_overwrites_atomically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("school.json");
    let storage = JsonStorage::open(&path).unwrap();

    storage.save(&Dataset::default()).unwrap();
    let data = sample_dataset();
    storage.save(&data).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.teachers.len(), 2);
    assert_eq!(loaded.absences.len(), 1);
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    assert!(storage.load().is_err());
}
