use crate::model::Teacher;
use crate::school::HistoryRecord;
use csv::WriterBuilder;
use std::path::Path;

/// Export CSV de la charge: header `name,email,sub_workload`
pub fn export_workload_csv<P: AsRef<Path>>(path: P, teachers: &[&Teacher]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "email", "sub_workload"])?;
    for t in teachers {
        let workload = t.sub_workload.to_string();
        w.write_record([t.name.as_str(), t.email.as_str(), workload.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de l'historique:
/// header `date,start,end,class,subject,absent,substitute,timestamp`
pub fn export_history_csv<P: AsRef<Path>>(path: P, records: &[HistoryRecord]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "date",
        "start",
        "end",
        "class",
        "subject",
        "absent",
        "substitute",
        "timestamp",
    ])?;
    for r in records {
        let date = r.date.to_string();
        let start = r.start.format("%H:%M").to_string();
        let end = r.end.format("%H:%M").to_string();
        let timestamp = r.timestamp.to_rfc3339();
        w.write_record([
            date.as_str(),
            start.as_str(),
            end.as_str(),
            r.class_name.as_str(),
            r.subject.name(),
            r.absent_name.as_str(),
            r.substitute_name.as_str(),
            timestamp.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
