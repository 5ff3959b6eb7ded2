use super::*;
use serde_json::json;

fn job(id: &str, company: &str, status: JobStatus) -> JobApplication {
    JobApplication {
        id: id.to_owned(),
        company: company.to_owned(),
        position: "Engineer".to_owned(),
        status,
        applied_date: Some("2026-01-10".to_owned()),
        salary: String::new(),
        location: String::new(),
        job_type: "Remote".to_owned(),
    }
}

fn board() -> Vec<JobApplication> {
    vec![
        job("1", "Google", JobStatus::Interview),
        job("2", "Microsoft", JobStatus::InReview),
        job("3", "Amazon", JobStatus::Applied),
        job("4", "Meta", JobStatus::Offer),
        job("5", "Netflix", JobStatus::Rejected),
        job("6", "Apple", JobStatus::Applied),
    ]
}

#[test]
fn status_wire_names_are_kebab_case() {
    assert_eq!(serde_json::to_value(JobStatus::InReview).unwrap(), json!("in-review"));
    let parsed: JobStatus = serde_json::from_value(json!("offer")).unwrap();
    assert_eq!(parsed, JobStatus::Offer);
    for status in JobStatus::ALL {
        assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
    }
}

#[test]
fn status_labels_are_title_case() {
    assert_eq!(JobStatus::InReview.label(), "In Review");
    assert_eq!(JobStatus::Applied.label(), "Applied");
}

#[test]
fn status_parse_rejects_unknown() {
    let err = "ghosted".parse::<JobStatus>().unwrap_err();
    assert_eq!(err, UnknownStatus("ghosted".to_owned()));
}

#[test]
fn filter_all_keeps_everything_in_order() {
    let jobs = board();
    let ids: Vec<_> = filter_jobs(&jobs, StatusFilter::All).iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn filter_by_status_selects_matching_jobs() {
    let jobs = board();
    let applied: Vec<_> = filter_jobs(&jobs, StatusFilter::Only(JobStatus::Applied))
        .iter()
        .map(|j| j.company.as_str())
        .collect();
    assert_eq!(applied, vec!["Amazon", "Apple"]);
}

#[test]
fn filter_can_be_empty() {
    let jobs = vec![job("1", "Google", JobStatus::Applied)];
    assert!(filter_jobs(&jobs, StatusFilter::Only(JobStatus::Offer)).is_empty());
}

#[test]
fn status_filter_parses_all_and_statuses() {
    assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
    assert_eq!("in-review".parse::<StatusFilter>().unwrap(), StatusFilter::Only(JobStatus::InReview));
    assert!("nope".parse::<StatusFilter>().is_err());
}

#[test]
fn counts_cover_every_tab() {
    let counts = status_counts(&board());
    assert_eq!(counts.get(StatusFilter::All), 6);
    assert_eq!(counts.get(StatusFilter::Only(JobStatus::Applied)), 2);
    assert_eq!(counts.get(StatusFilter::Only(JobStatus::InReview)), 1);
    assert_eq!(counts.get(StatusFilter::Only(JobStatus::Offer)), 1);
    assert_eq!(counts.rejected, 1);
}

#[test]
fn jobs_from_body_accepts_wrapped_and_bare_lists() {
    let wrapped = json!({ "jobs": [
        { "id": "1", "company": "Google", "position": "SWE", "status": "applied", "applied_date": "2026-01-10" },
        { "id": "2", "company": "Bad", "position": "SWE", "status": "ghosted" }
    ]});
    let jobs = jobs_from_body(&wrapped);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "Google");

    let bare = json!([{ "id": "9", "company": "Meta", "position": "FE", "status": "offer", "type": "Remote", "appliedDate": "2026-01-05" }]);
    let jobs = jobs_from_body(&bare);
    assert_eq!(jobs[0].job_type, "Remote");
    assert_eq!(jobs[0].applied_date.as_deref(), Some("2026-01-05"));

    assert!(jobs_from_body(&json!({ "message": "nope" })).is_empty());
}
