use crate::infra::{InMemoryProfileRepository, LoggingNotificationPublisher};
use care_connect::error::AppError;
use care_connect::profiles::{
    CaregiverId, CaregiverProfile, CaregiverProfileService, CompletionReport,
    ProfileCompletionScorer, ProfileCsvImporter, ProfileSearch, ShiftPreference, Skill,
};
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON document describing one caregiver profile
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Print the fill state of every scored field
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Caregiver CSV export to score
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only list caregivers that pass verification
    #[arg(long)]
    pub(crate) verified_only: bool,
}

pub(crate) fn run_profile_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let profile: CaregiverProfile = serde_json::from_str(&raw)?;

    let scorer = ProfileCompletionScorer::new();
    let report = scorer.score(&profile);
    render_report(&args.file.display().to_string(), &report);

    if args.breakdown {
        println!("\nField breakdown");
        for status in scorer.breakdown(&profile) {
            let mark = if status.filled { "x" } else { " " };
            println!("- [{}] {} ({:?})", mark, status.label, status.tier);
        }
    }

    Ok(())
}

pub(crate) fn run_profile_import(args: ImportArgs) -> Result<(), AppError> {
    let imported = ProfileCsvImporter::from_path(&args.csv)?;
    let scorer = ProfileCompletionScorer::new();

    println!("Caregiver export: {}", args.csv.display());
    let mut listed = 0usize;
    let mut verified = 0usize;
    for row in &imported {
        let report = scorer.score(&row.profile);
        if report.is_verified {
            verified += 1;
        }
        if args.verified_only && !report.is_verified {
            continue;
        }
        listed += 1;
        render_report(&row.caregiver_id.0, &report);
    }

    println!(
        "\n{} profiles scored, {} verified, {} listed",
        imported.len(),
        verified,
        listed
    );
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryProfileRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let service = CaregiverProfileService::new(repository, notifications.clone(), 10);

    println!("Caregiver profile demo");

    let caregiver_id = CaregiverId("cg-demo-001".to_string());
    let mut profile = CaregiverProfile {
        name: Some("Asha Begum".to_string()),
        phone: Some("01711223344".to_string()),
        location: Some("Dhaka".to_string()),
        gender: Some("female".to_string()),
        age: Some(29),
        ..CaregiverProfile::default()
    };

    let record = service.save(caregiver_id.clone(), profile.clone())?;
    println!("\nAfter first save");
    render_report(&caregiver_id.0, &record.completion);

    profile.shift_preferences = BTreeSet::from([ShiftPreference::Day, ShiftPreference::LiveIn]);
    profile.skills = BTreeSet::from([Skill::ElderlyCare, Skill::MedicationManagement]);
    profile.certificate_url = Some("certificates/cg-demo-001.pdf".to_string());
    let record = service.save(caregiver_id.clone(), profile)?;
    println!("\nAfter uploading a certificate and adding skills");
    render_report(&caregiver_id.0, &record.completion);

    let peer = CaregiverProfile {
        name: Some("Rahim Uddin".to_string()),
        location: Some("Dhaka".to_string()),
        skills: BTreeSet::from([Skill::ElderlyCare]),
        ..CaregiverProfile::default()
    };
    service.save(CaregiverId("cg-demo-002".to_string()), peer)?;

    let results = service.search(&ProfileSearch {
        location: Some("Dhaka".to_string()),
        skill: Some(Skill::ElderlyCare),
        ..ProfileSearch::default()
    })?;
    println!("\nEmployer search: Dhaka, elderly care");
    for record in &results {
        let view = record.status_view();
        println!(
            "- {} | {}% | {} | verified: {}",
            view.caregiver_id.0,
            view.completion_percentage,
            view.progress_band.label(),
            view.is_verified
        );
    }

    let events = notifications.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications");
        for event in events {
            println!("- template={} -> {}", event.template, event.caregiver_id.0);
        }
    }

    Ok(())
}

fn render_report(subject: &str, report: &CompletionReport) {
    let missing = if report.missing_fields.is_empty() {
        "none".to_string()
    } else {
        report.missing_fields.join(", ")
    };
    println!(
        "- {}: {}% complete ({}), verified: {}, missing: {}",
        subject,
        report.percentage,
        report.progress_band().label(),
        report.is_verified,
        missing
    );
}
