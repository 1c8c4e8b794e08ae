#![forbid(unsafe_code)]
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};
use suppleance::{
    AbsenceInput, AbsenceStatus, Dataset, Notifier, NullNotifier, School, SchoolError,
    SelectOptions, Subject, SubstitutionNotice, Teacher, TimetableEntry, Weekday,
};

fn slot(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Un lundi.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
}

/// Jane a une période lundi 09:00-09:40 (3A, Maths) ; John est libre.
fn school_with_jane() -> School {
    let mut data = Dataset::default();
    let jane = Teacher::new("Jane Doe", "janedoe@school.edu");
    let john = Teacher::new("John Smith", "johnsmith@school.edu");
    data.entries.push(TimetableEntry {
        teacher: jane.id.clone(),
        day: Weekday::Monday,
        start: slot(9, 0),
        end: slot(9, 40),
        class_name: "3A".to_string(),
        subject: Subject::Maths,
        is_free: false,
    });
    data.teachers = vec![jane, john];
    School::from_dataset(data)
}

fn absent_input(status: AbsenceStatus, reason: Option<&str>) -> AbsenceInput {
    AbsenceInput {
        teacher_name: "Jane Doe".to_string(),
        date: monday(),
        status,
        reason: reason.map(str::to_string),
    }
}

fn report(school: &mut School, input: &AbsenceInput) -> Result<suppleance::CoverageReport, SchoolError> {
    school.report_full_day_absence(
        input,
        "school.edu",
        SelectOptions::default(),
        Arc::new(NullNotifier),
    )
}

#[test]
fn one_period_one_log_one_assignment() {
    let mut school = school_with_jane();
    let out = report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();

    assert_eq!(out.day, Weekday::Monday);
    assert_eq!(out.outcomes.len(), 1);
    assert_eq!(out.outcomes[0].class_name, "3A");
    assert_eq!(out.outcomes[0].substitute.as_deref(), Some("John Smith"));
    assert_eq!(out.covered, 1);

    let data = school.data();
    assert_eq!(data.absences.len(), 1);
    assert_eq!(data.absences[0].status, AbsenceStatus::Absent);
    assert_eq!(data.history.len(), 1);
    let john = data.find_teacher_by_email("johnsmith@school.edu").unwrap();
    assert_eq!(john.sub_workload, 1);
    // l'historique pointe bien vers le journal d'absence créé
    assert_eq!(data.history[0].absence, data.absences[0].id);
    assert_eq!(data.history[0].substitute, john.id);
}

#[test]
fn busy_without_reason_is_rejected_before_any_write() {
    let mut school = school_with_jane();
    let err = report(&mut school, &absent_input(AbsenceStatus::Busy, None)).unwrap_err();
    assert!(matches!(err, SchoolError::ReasonRequired));
    assert!(school.data().absences.is_empty());
    assert!(school.data().history.is_empty());

    // une raison vide ne vaut pas mieux
    let err = report(&mut school, &absent_input(AbsenceStatus::Busy, Some("  "))).unwrap_err();
    assert!(matches!(err, SchoolError::ReasonRequired));
}

#[test]
fn busy_with_reason_carries_it_into_the_log() {
    let mut school = school_with_jane();
    report(
        &mut school,
        &absent_input(AbsenceStatus::Busy, Some("medical appointment")),
    )
    .unwrap();
    assert_eq!(
        school.data().absences[0].reason.as_deref(),
        Some("medical appointment")
    );
}

#[test]
fn unknown_teacher_is_rejected() {
    let mut school = school_with_jane();
    let input = AbsenceInput {
        teacher_name: "Nobody Here".to_string(),
        date: monday(),
        status: AbsenceStatus::Absent,
        reason: None,
    };
    let err = report(&mut school, &input).unwrap_err();
    assert!(matches!(err, SchoolError::TeacherNotFound(_)));
    assert!(school.data().absences.is_empty());
}

#[test]
fn free_periods_need_no_coverage() {
    let mut data = Dataset::default();
    let jane = Teacher::new("Jane Doe", "janedoe@school.edu");
    data.entries.push(TimetableEntry {
        teacher: jane.id.clone(),
        day: Weekday::Monday,
        start: slot(9, 0),
        end: slot(9, 40),
        class_name: "READING".to_string(),
        subject: Subject::Reading,
        is_free: true,
    });
    data.teachers = vec![jane];
    let mut school = School::from_dataset(data);

    let out = report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();
    assert!(out.outcomes.is_empty());
    assert_eq!(out.covered, 0);
    assert!(school.data().absences.is_empty(), "no log for free periods");
}

#[test]
fn uncovered_period_leaves_no_history_and_no_workload() {
    let mut data = Dataset::default();
    let jane = Teacher::new("Jane Doe", "janedoe@school.edu");
    let busy = Teacher::new("Busy Colleague", "busycolleague@school.edu");
    for t in [&jane, &busy] {
        data.entries.push(TimetableEntry {
            teacher: t.id.clone(),
            day: Weekday::Monday,
            start: slot(9, 0),
            end: slot(9, 40),
            class_name: "3A".to_string(),
            subject: Subject::Maths,
            is_free: false,
        });
    }
    data.teachers = vec![jane, busy];
    let mut school = School::from_dataset(data);

    let out = report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();
    assert_eq!(out.outcomes.len(), 1);
    assert_eq!(out.outcomes[0].substitute, None);
    assert_eq!(out.uncovered(), 1);

    let data = school.data();
    // le journal existe, l'historique non : c'est ce qui distingue
    // « non couvert » de « couvert »
    assert_eq!(data.absences.len(), 1);
    assert!(data.history.is_empty());
    let colleague = data
        .find_teacher_by_email("busycolleague@school.edu")
        .unwrap();
    assert_eq!(colleague.sub_workload, 0);
}

#[test]
fn workload_spreads_across_two_periods() {
    // deux périodes, deux candidats : la charge doit alterner
    let mut data = Dataset::default();
    let jane = Teacher::new("Jane Doe", "janedoe@school.edu");
    let a = Teacher::new("Sub A", "suba@school.edu");
    let b = Teacher::new("Sub B", "subb@school.edu");
    for (start, end) in [(slot(9, 0), slot(9, 40)), (slot(10, 0), slot(10, 40))] {
        data.entries.push(TimetableEntry {
            teacher: jane.id.clone(),
            day: Weekday::Monday,
            start,
            end,
            class_name: "3A".to_string(),
            subject: Subject::Maths,
            is_free: false,
        });
    }
    data.teachers = vec![jane, a, b];
    let mut school = School::from_dataset(data);

    let out = report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();
    assert_eq!(out.covered, 2);
    let data = school.data();
    let a = data.find_teacher_by_email("suba@school.edu").unwrap();
    let b = data.find_teacher_by_email("subb@school.edu").unwrap();
    assert_eq!((a.sub_workload, b.sub_workload), (1, 1));
}

struct Recording(Mutex<Vec<String>>);

impl Notifier for Recording {
    fn notify(&self, email: &str, _notice: &SubstitutionNotice) -> bool {
        self.0.lock().unwrap().push(email.to_string());
        true
    }
}

#[test]
fn substitutes_are_notified_after_commit() {
    let mut school = school_with_jane();
    let recorder = Arc::new(Recording(Mutex::new(Vec::new())));
    let notifier: Arc<dyn Notifier> = recorder.clone();
    school
        .report_full_day_absence(
            &absent_input(AbsenceStatus::Absent, None),
            "school.edu",
            SelectOptions::default(),
            notifier,
        )
        .unwrap();
    school.flush_notifications();
    assert_eq!(
        recorder.0.lock().unwrap().as_slice(),
        ["johnsmith@school.edu"]
    );
}

#[test]
fn history_view_joins_names_and_periods() {
    let mut school = school_with_jane();
    report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();

    let records = school.list_history();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.date, monday());
    assert_eq!(r.class_name, "3A");
    assert_eq!(r.absent_name, "Jane Doe");
    assert_eq!(r.substitute_name, "John Smith");
    assert_eq!(r.start, slot(9, 0));
}

#[test]
fn workload_listing_sorts_ascending() {
    let mut school = school_with_jane();
    report(&mut school, &absent_input(AbsenceStatus::Absent, None)).unwrap();
    let listed = school.list_workload();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Jane Doe");
    assert_eq!(listed[1].name, "John Smith");
    assert!(listed[0].sub_workload <= listed[1].sub_workload);
}
