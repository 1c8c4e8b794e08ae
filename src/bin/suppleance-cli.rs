#![forbid(unsafe_code)]
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use suppleance::{
    coverage::AbsenceInput,
    ingest::IngestOptions,
    ingest::classify,
    io,
    model::{AbsenceStatus, Subject, Weekday},
    notification::{NoticeRenderer, Notifier, NullNotifier, SubstitutionNotice, TextNotice},
    school::School,
    selector::SelectOptions,
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de gestion des remplacements (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'état de l'école
    #[arg(long, global = true, default_value = "school.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer l'emploi du temps maître depuis un CSV
    Ingest {
        #[arg(long)]
        csv: String,
        /// Domaine des emails synthétisés
        #[arg(long, default_value = "school.edu")]
        email_domain: String,
    },

    /// Enregistrer un enseignant hors import
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        admin: bool,
    },

    /// Déclarer une absence journée complète et affecter les suppléants
    ReportDay {
        /// Nom de l'enseignant absent
        #[arg(long)]
        teacher: String,
        /// Date AAAA-MM-JJ
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "Absent")]
        status: AbsenceStatus,
        /// Obligatoire quand --status Busy
        #[arg(long)]
        reason: Option<String>,
        #[arg(long, default_value = "school.edu")]
        email_domain: String,
        #[arg(long, default_value_t = 5)]
        max_workload: u32,
        /// Répertoire où déposer les avis de suppléance (sinon aucun envoi)
        #[arg(long)]
        notices_dir: Option<PathBuf>,
    },

    /// Chercher un suppléant pour un créneau isolé, sans écriture
    Select {
        /// Nom de l'enseignant absent
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        day: Weekday,
        /// HH:MM
        #[arg(long, value_parser = parse_slot_time)]
        start: NaiveTime,
        /// HH:MM
        #[arg(long, value_parser = parse_slot_time)]
        end: NaiveTime,
        #[arg(long)]
        subject: Subject,
        #[arg(long, default_value = "school.edu")]
        email_domain: String,
        #[arg(long, default_value_t = 5)]
        max_workload: u32,
    },

    /// Lister les enseignants par charge croissante
    Workload {
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister l'historique des suppléances
    History {
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn parse_slot_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("invalid time {s:?}: {e}"))
}

/// Écrit chaque avis dans un fichier du répertoire donné (transport local).
struct FileNotifier {
    dir: PathBuf,
}

impl Notifier for FileNotifier {
    fn notify(&self, email: &str, notice: &SubstitutionNotice) -> bool {
        let stem = email.split('@').next().unwrap_or("teacher");
        let name = format!("{}-{}-{}.txt", notice.date, stem, notice.period.replace(':', ""));
        let path = self.dir.join(name);
        let content = format!(
            "Subject: {}\nTo: {}\n\n{}",
            notice.subject_line(),
            email,
            TextNotice.render(notice)
        );
        match std::fs::create_dir_all(&self.dir).and_then(|_| std::fs::write(&path, content)) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("Warning: could not write notice {}: {err}", path.display());
                false
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut school = match storage.load() {
        Ok(data) => School::from_dataset(data),
        Err(_) => School::new(),
    };

    let code = match cli.cmd {
        Commands::Ingest { csv, email_domain } => {
            let raw = std::fs::read(&csv)?;
            let opts = IngestOptions { email_domain };
            let summary = school.ingest_timetable(&raw, &opts)?;
            storage.save(school.data())?;
            println!(
                "Master timetable replaced: {} teachers, {} entries, {} subject mappings",
                summary.teachers_processed, summary.total_entries, summary.subject_mappings_found
            );
            let d = summary.diagnostics;
            if d.unparsed_slots + d.duplicate_slots + d.dropped_blocks > 0 {
                eprintln!(
                    "Warning: {} unparsed slot rows, {} duplicate slots, {} dropped blocks",
                    d.unparsed_slots, d.duplicate_slots, d.dropped_blocks
                );
            }
            0
        }
        Commands::Register { name, email, admin } => {
            school.register_teacher(&name, &email, admin)?;
            storage.save(school.data())?;
            println!("Registered {name} <{email}>");
            0
        }
        Commands::ReportDay {
            teacher,
            date,
            status,
            reason,
            email_domain,
            max_workload,
            notices_dir,
        } => {
            let input = AbsenceInput {
                teacher_name: teacher,
                date,
                status,
                reason,
            };
            let opts = SelectOptions {
                max_weekly_workload: max_workload,
            };
            let notifier: Arc<dyn Notifier> = match notices_dir {
                Some(dir) => Arc::new(FileNotifier { dir }),
                None => Arc::new(NullNotifier),
            };
            let report = school.report_full_day_absence(&input, &email_domain, opts, notifier)?;
            storage.save(school.data())?;
            school.flush_notifications();

            if report.outcomes.is_empty() {
                println!(
                    "{} has no scheduled teaching periods on {}. No substitution required.",
                    report.teacher_name, report.day
                );
                0
            } else {
                for o in &report.outcomes {
                    println!(
                        "{}-{} | {} ({}) → {}",
                        o.start.format("%H:%M"),
                        o.end.format("%H:%M"),
                        o.class_name,
                        o.subject,
                        o.substitute.as_deref().unwrap_or("Not Found")
                    );
                }
                println!(
                    "Processed {} periods for {} ({} covered, {} uncovered)",
                    report.outcomes.len(),
                    report.teacher_name,
                    report.covered,
                    report.uncovered()
                );
                // Code 2 = WARNING/INCOMPLETE
                if report.uncovered() > 0 {
                    2
                } else {
                    0
                }
            }
        }
        Commands::Select {
            teacher,
            day,
            start,
            end,
            subject,
            email_domain,
            max_workload,
        } => {
            let email = classify::synthesize_email(&teacher, &email_domain);
            let absent = school
                .data()
                .find_teacher_by_email(&email)
                .map(|t| t.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown teacher: {}", teacher))?;
            let opts = SelectOptions {
                max_weekly_workload: max_workload,
            };
            match school.select_substitute(&absent, day, start, end, subject, opts) {
                Some(t) => {
                    println!("{} <{}> (workload {})", t.name, t.email, t.sub_workload);
                    0
                }
                None => {
                    println!("Not Found");
                    2
                }
            }
        }
        Commands::Workload { out_csv } => {
            let teachers = school.list_workload();
            if let Some(path) = out_csv {
                io::export_workload_csv(path, &teachers)?;
            }
            for t in &teachers {
                println!("{} | {} | {}", t.name, t.email, t.sub_workload);
            }
            0
        }
        Commands::History { out_csv } => {
            let records = school.list_history();
            if let Some(path) = out_csv {
                io::export_history_csv(path, &records)?;
            }
            for r in &records {
                println!(
                    "{} {}-{} | {} ({}) | {} → {}",
                    r.date,
                    r.start.format("%H:%M"),
                    r.end.format("%H:%M"),
                    r.class_name,
                    r.subject,
                    r.absent_name,
                    r.substitute_name
                );
            }
            0
        }
    };

    std::process::exit(code);
}
