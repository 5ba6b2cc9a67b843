//! Server-side HTML for the dashboard page and its fragments.
//!
//! # Invariants
//! - Every interpolated value passes through `escape_html`.
//! - Rendering is pure: view-models in, markup out. No service access here.

use chrono::NaiveDate;
use intern_core::{DashboardStats, Department, InternRecord, InternStatus, InternView};
use std::fmt::Write;

/// Visual tone of a metric change line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    fn from_change(change: i64) -> Self {
        match change.signum() {
            1 => Self::Positive,
            -1 => Self::Negative,
            _ => Self::Neutral,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    fn indicator(self) -> &'static str {
        match self {
            Self::Positive => "▲",
            Self::Negative => "▼",
            Self::Neutral => "●",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub class: &'static str,
    pub title: &'static str,
    pub value: String,
    pub change: String,
    pub tone: Tone,
    pub icon: &'static str,
}

/// Builds the four headline cards from dashboard stats.
pub fn metric_cards(stats: &DashboardStats) -> Vec<MetricCard> {
    let growth = stats.trends.growth;
    vec![
        MetricCard {
            class: "total-interns",
            title: "Total Interns",
            value: stats.metrics.total_interns.to_string(),
            change: format!("{:+} hired vs last month", growth.hired_change),
            tone: Tone::from_change(growth.hired_change),
            icon: "👥",
        },
        MetricCard {
            class: "active-applications",
            title: "Active Applications",
            value: stats.metrics.active_applications.to_string(),
            change: format!("{:+} this week", growth.applications_change),
            tone: Tone::from_change(growth.applications_change),
            icon: "📋",
        },
        MetricCard {
            class: "interviews-scheduled",
            title: "Interviews Scheduled",
            value: stats.metrics.interviews_scheduled.to_string(),
            change: "This week".to_string(),
            tone: Tone::Neutral,
            icon: "🗓️",
        },
        MetricCard {
            class: "hired-this-month",
            title: "Hired This Month",
            value: stats.metrics.hired_this_month.to_string(),
            change: format!(
                "since {}",
                stats.trends.period.month_start.format("%B %-d")
            ),
            tone: Tone::from_change(stats.metrics.hired_this_month as i64),
            icon: "✅",
        },
    ]
}

pub fn render_metric_cards(cards: &[MetricCard]) -> String {
    let mut html = String::new();
    for card in cards {
        let _ = write!(
            html,
            r#"<div class="metric-card {class}"><div class="metric-header"><div><div class="metric-title">{title}</div><div class="metric-value">{value}</div><div class="metric-change {tone}"><span class="change-indicator">{indicator}</span> {change}</div></div><div class="metric-icon">{icon}</div></div></div>"#,
            class = card.class,
            title = escape_html(card.title),
            value = escape_html(&card.value),
            tone = card.tone.class(),
            indicator = card.tone.indicator(),
            change = escape_html(&card.change),
            icon = card.icon,
        );
    }
    html
}

/// Table rows for the intern list, or an empty-state row.
pub fn render_intern_rows(interns: &[InternView]) -> String {
    if interns.is_empty() {
        return r#"<tr><td colspan="5" class="empty-state"><div class="empty-state-icon">👥</div><div>No interns found</div></td></tr>"#.to_string();
    }

    let mut html = String::new();
    for intern in interns {
        let record = &intern.record;
        let id = escape_html(record.id.as_str());
        let _ = write!(
            html,
            r#"<tr data-intern-id="{id}"><td>{name}</td><td>{email}</td><td>{badge}</td><td>{department}</td><td><div class="action-buttons"><button class="btn btn-primary view-btn" data-detail="/fragments/interns/{id}">View</button><button class="btn btn-secondary edit-btn" data-form="/fragments/interns/{id}/edit">Edit</button></div></td></tr>"#,
            name = escape_html(&intern.full_name),
            email = escape_html(&record.email),
            badge = status_badge(record.status),
            department = escape_html(record.department.as_str()),
        );
    }
    html
}

/// Label/value pairs shown in the detail panel.
pub fn detail_fields(intern: &InternView) -> Vec<(&'static str, String)> {
    let record = &intern.record;
    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());
    let progress = match intern.days_since_start {
        Some(days) => format!(
            "{}% complete ({days} days since start)",
            intern.progress_percentage
        ),
        None => format!("{}% complete", intern.progress_percentage),
    };

    vec![
        ("Full Name", intern.full_name.clone()),
        ("Email Address", record.email.clone()),
        ("Phone Number", or_na(record.phone.clone())),
        ("Department", record.department.as_str().to_string()),
        ("Status", record.status.as_str().to_string()),
        ("University", or_na(record.university.clone())),
        ("GPA", or_na(record.gpa.map(|gpa| gpa.to_string()))),
        (
            "Start Date",
            or_na(record.start_date.map(|d| d.format("%B %-d, %Y").to_string())),
        ),
        (
            "End Date",
            or_na(record.end_date.map(|d| d.format("%B %-d, %Y").to_string())),
        ),
        ("Progress", progress),
        ("Skills", or_na(record.skills.as_ref().map(|s| s.join(", ")))),
        ("Projects", or_na(record.projects.as_ref().map(|p| p.join(", ")))),
        (
            "Notes",
            record
                .notes
                .clone()
                .unwrap_or_else(|| "No notes available".to_string()),
        ),
    ]
}

pub fn render_intern_detail(intern: &InternView) -> String {
    let mut html = format!(
        r#"<div class="intern-details" data-intern-id="{}">"#,
        escape_html(intern.record.id.as_str())
    );
    for (label, value) in detail_fields(intern) {
        let value = if label == "Status" {
            status_badge(intern.record.status)
        } else {
            escape_html(&value)
        };
        let _ = write!(
            html,
            r#"<div class="intern-detail"><label>{label}</label><value>{value}</value></div>"#
        );
    }
    let _ = write!(
        html,
        r#"<div class="detail-actions"><button class="btn btn-secondary" data-form="/fragments/interns/{id}/edit">Edit</button><form class="delete-form" data-submit="/fragments/interns/{id}/delete" data-confirm="Delete {name}? This cannot be undone."><input type="hidden" name="confirm" value="true"><button type="submit" class="btn btn-danger">Delete</button></form></div>"#,
        id = escape_html(intern.record.id.as_str()),
        name = escape_html(&intern.full_name),
    );
    html.push_str("</div>");
    html
}

/// Create form when `existing` is `None`, otherwise an edit form pre-filled
/// with the stored values.
pub fn render_intern_form(existing: Option<&InternRecord>) -> String {
    let (action, heading, submit) = match existing {
        Some(record) => (
            format!("/fragments/interns/{}", record.id),
            format!("Edit {}", record.full_name()),
            "Save Changes",
        ),
        None => (
            "/fragments/interns".to_string(),
            "Add Intern".to_string(),
            "Submit Application",
        ),
    };
    let text = |pick: fn(&InternRecord) -> Option<&str>| existing.and_then(pick).unwrap_or_default();
    let date = |pick: fn(&InternRecord) -> Option<NaiveDate>| {
        existing
            .and_then(pick)
            .map(|value| value.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let joined = |pick: fn(&InternRecord) -> Option<&Vec<String>>| {
        existing
            .and_then(pick)
            .map(|items| items.join(", "))
            .unwrap_or_default()
    };

    let department_options = options(
        Department::ALL.iter().map(|department| department.as_str()),
        existing.map_or("", |record| record.department.as_str()),
        Some("Select department"),
    );
    let status_options = options(
        InternStatus::ALL.iter().map(|status| status.as_str()),
        existing.map_or(InternStatus::Pending, |record| record.status).as_str(),
        None,
    );
    let gpa = existing
        .and_then(|record| record.gpa)
        .map(|gpa| gpa.to_string())
        .unwrap_or_default();

    let mut fields = String::new();
    for (label, name, kind, value) in [
        ("First Name", "firstName", "text", text(|r| Some(r.first_name.as_str()))),
        ("Last Name", "lastName", "text", text(|r| Some(r.last_name.as_str()))),
        ("Email Address", "email", "email", text(|r| Some(r.email.as_str()))),
        ("Phone Number", "phone", "tel", text(|r| r.phone.as_deref())),
        ("University", "university", "text", text(|r| r.university.as_deref())),
    ] {
        fields.push_str(&input(label, name, kind, value));
    }
    let _ = write!(
        fields,
        r#"<label>Department<select name="department">{department_options}</select></label><label>Status<select name="status">{status_options}</select></label>"#
    );
    fields.push_str(&input("Start Date", "startDate", "date", &date(|r| r.start_date)));
    fields.push_str(&input("End Date", "endDate", "date", &date(|r| r.end_date)));
    fields.push_str(&input("GPA", "gpa", "number", &gpa));
    fields.push_str(&input("Skills (comma separated)", "skills", "text", &joined(|r| r.skills.as_ref())));
    fields.push_str(&input("Projects (comma separated)", "projects", "text", &joined(|r| r.projects.as_ref())));
    let _ = write!(
        fields,
        r#"<label>Notes<textarea name="notes">{}</textarea></label>"#,
        escape_html(text(|r| r.notes.as_deref()))
    );

    format!(
        r#"<form class="intern-form" data-submit="{action}"><h2>{heading}</h2><div class="form-grid">{fields}</div><button type="submit" class="btn btn-primary">{submit}</button></form>"#,
        action = escape_html(&action),
        heading = escape_html(&heading),
    )
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    let step = if kind == "number" { r#" step="0.01" min="0" max="4""# } else { "" };
    format!(
        r#"<label>{label}<input name="{name}" type="{kind}"{step} value="{}"></label>"#,
        escape_html(value)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// Notification fragment used for every surfaced failure.
pub fn render_notice(kind: NoticeKind, message: &str) -> String {
    let (class, icon) = match kind {
        NoticeKind::Error => ("notification error", "⚠️"),
        NoticeKind::Info => ("notification info", "ℹ️"),
    };
    format!(
        r#"<div class="{class}" role="alert"><span class="notification-icon">{icon}</span><span class="notification-message">{}</span></div>"#,
        escape_html(message)
    )
}

/// Selected filter values echoed back into the page form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    pub status: String,
    pub department: String,
}

/// Full dashboard document. `metrics` and `rows` are pre-rendered fragments.
pub fn render_dashboard_page(
    metrics: &str,
    rows: &str,
    form: &FilterForm,
    departments: &[&str],
) -> String {
    let status_options = options(
        InternStatus::ALL.iter().map(|status| status.as_str()),
        &form.status,
        Some("All Statuses"),
    );
    let department_options = options(
        departments.iter().copied(),
        &form.department,
        Some("All Departments"),
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Intern Dashboard</title>
</head>
<body>
<header class="dashboard-header"><h1>Intern Dashboard</h1><button class="btn btn-primary" data-form="/fragments/new-intern">Add Intern</button></header>
<div id="notifications"></div>
<section id="metricCards" class="metrics-grid">{metrics}</section>
<section class="intern-table-section">
<form id="filters" method="get" action="/">
<input id="searchInput" name="search" type="search" placeholder="Search interns..." value="{search}">
<select id="statusFilter" name="status">{status_options}</select>
<select id="departmentFilter" name="department">{department_options}</select>
<button type="submit" class="btn btn-primary">Filter</button>
</form>
<table class="intern-table">
<thead><tr><th>Name</th><th>Email</th><th>Status</th><th>Department</th><th>Actions</th></tr></thead>
<tbody id="internTableBody">{rows}</tbody>
</table>
</section>
<aside id="internModal" class="modal"><button class="modal-close" data-close>&times;</button><div id="modalBody" class="modal-body"></div></aside>
<script>
const modal = document.getElementById('internModal');
const filters = document.getElementById('filters');
const refreshRows = async () => {{
  const params = new URLSearchParams(new FormData(filters));
  const response = await fetch('/fragments/interns?' + params.toString());
  document.getElementById('internTableBody').innerHTML = await response.text();
}};
const refreshMetrics = async () => {{
  const response = await fetch('/fragments/metrics');
  document.getElementById('metricCards').innerHTML = await response.text();
}};
document.addEventListener('click', async (event) => {{
  if (event.target.closest('[data-close]')) {{
    modal.classList.remove('show');
    return;
  }}
  const target = event.target.closest('[data-detail], [data-form]');
  if (!target) return;
  const response = await fetch(target.dataset.detail || target.dataset.form);
  document.getElementById('modalBody').innerHTML = await response.text();
  modal.classList.add('show');
}});
document.addEventListener('submit', async (event) => {{
  const form = event.target.closest('form[data-submit]');
  if (!form) return;
  event.preventDefault();
  if (form.dataset.confirm && !window.confirm(form.dataset.confirm)) return;
  const response = await fetch(form.dataset.submit, {{
    method: 'POST',
    body: new URLSearchParams(new FormData(form)),
  }});
  document.getElementById('notifications').innerHTML = await response.text();
  if (!response.ok) return;
  modal.classList.remove('show');
  await Promise.all([refreshRows(), refreshMetrics()]);
}});
filters.addEventListener('input', refreshRows);
</script>
</body>
</html>
"#,
        search = escape_html(&form.search),
    )
}

fn options<'a>(
    values: impl Iterator<Item = &'a str>,
    selected: &str,
    placeholder: Option<&str>,
) -> String {
    let mut html = placeholder
        .map(|label| format!(r#"<option value="">{}</option>"#, escape_html(label)))
        .unwrap_or_default();
    for value in values {
        let marker = if value.eq_ignore_ascii_case(selected) {
            " selected"
        } else {
            ""
        };
        let value = escape_html(value);
        let _ = write!(html, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    html
}

fn status_badge(status: InternStatus) -> String {
    format!(
        r#"<span class="status-badge status-{}">{}</span>"#,
        status.as_str().to_ascii_lowercase(),
        status.as_str()
    )
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
