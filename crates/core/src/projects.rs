//! Project listing domain models and display transforms
//!
//! Types mirroring the project listing API payload, plus pure functions
//! that turn raw records into display-ready rows with pagination metadata.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    ComingSoon,
    OpenForInvestments,
    Funded,
    NotFunded,
    Confirmed,
    Finished,
}

impl ProjectStatus {
    /// Human-readable status label.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::ComingSoon => "Coming soon",
            ProjectStatus::OpenForInvestments => "Open for investments",
            ProjectStatus::Funded => "Funded",
            ProjectStatus::NotFunded => "Not funded",
            ProjectStatus::Confirmed => "Confirmed",
            ProjectStatus::Finished => "Finished",
        }
    }

    /// Whether the project still accepts investments.
    pub fn is_open(&self) -> bool {
        matches!(self, ProjectStatus::OpenForInvestments)
    }
}

/// Which ratio the loan is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanRatio {
    LTV,
    LTC,
}

/// Collateral backing the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityMeasure {
    FirstRankMortgage,
    SecondRankMortgage,
}

/// One project card as returned by the listing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub status: ProjectStatus,
    pub basic_interest: f64,
    pub pid: String,
    pub investment_purpose: Option<String>,
    pub max_bonus_interest: Option<f64>,
    pub initial_rating: String,
    pub loan_ratio: LoanRatio,
    pub loan_ratio_external: f64,
    pub loan_ratio_max: f64,
    pub image_url: Option<String>,
    pub project_name: String,
    pub invested_amount: f64,
    pub required_amount: f64,
    pub days_to_get_money: String,
    pub funded_duration: String,
    pub investors: u64,
    pub credit_duration: String,
    pub preview_url: String,
    #[serde(default)]
    pub country: Option<String>,
    pub security_measures: SecurityMeasure,
}

/// One entry of the server-side pagination link list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// Server-reported pagination metadata. `from`/`to` are null on an empty
/// result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: usize,
    pub from: Option<usize>,
    pub last_page: usize,
    pub path: String,
    pub per_page: usize,
    pub to: Option<usize>,
    pub total: usize,
    pub first_page_url: String,
    pub last_page_url: String,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

/// Full listing API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub data: Vec<ProjectRecord>,
    #[serde(default)]
    pub links: Vec<PaginationLink>,
    pub meta: PaginationMeta,
}

/// Display-ready listing row.
#[derive(Debug, Serialize, Clone)]
pub struct ProjectRow {
    pub pid: String,
    pub name: String,
    pub country: Option<String>,
    pub status: ProjectStatus,
    pub rating: String,
    pub interest: String,
    pub duration: String,
    pub purpose: Option<String>,
    pub invested: String,
    pub required: String,
    pub progress_pct: f64,
    pub investors: u64,
}

/// Pagination metadata for list output, with navigation commands.
#[derive(Debug, Serialize, Clone)]
pub struct ListPaginationInfo {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Complete list output with rows and pagination.
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub items: Vec<ProjectRow>,
    pub pagination: ListPaginationInfo,
}

/// Format a euro amount with thousands grouping and no cents.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}

/// Funding progress as a percentage, clamped to `[0, 100]`.
pub fn project_progress(invested: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return if invested > 0.0 { 100.0 } else { 0.0 };
    }

    let percentage = invested / required * 100.0;
    if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Interest-rate display: `9.5%`, or `9.5-11.5%` when a bonus applies,
/// or an em dash when the base rate is missing.
pub fn format_interest_rate(basic: Option<f64>, max_bonus: Option<f64>) -> String {
    let basic = match basic.filter(|n| n.is_finite()) {
        Some(n) => n,
        None => return "—".to_string(),
    };

    match max_bonus.filter(|n| n.is_finite() && *n > 0.0) {
        Some(bonus) => format!("{:.1}-{:.1}%", basic, basic + bonus),
        None => format!("{:.1}%", basic),
    }
}

/// Month-count display for the string-typed duration fields, em dash when
/// the value does not parse.
pub fn format_months(value: Option<&str>) -> String {
    match parse_number(value) {
        Some(months) => format!("{} mo.", months.round().max(0.0) as i64),
        None => "—".to_string(),
    }
}

/// Day-count display, em dash when the value does not parse.
pub fn format_days(value: Option<&str>) -> String {
    match parse_number(value) {
        Some(days) => format!("{} d.", days.round().max(0.0) as i64),
        None => "—".to_string(),
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Transform a listing API response into display-ready output.
///
/// Rows carry formatted amounts, rates, and durations; the pagination info
/// carries the server metadata plus copy-pasteable navigation commands.
pub fn transform_projects(response: ProjectsResponse) -> ListOutput {
    let items: Vec<ProjectRow> = response
        .data
        .iter()
        .map(|record| ProjectRow {
            pid: record.pid.clone(),
            name: record.project_name.clone(),
            country: record.country.clone(),
            status: record.status,
            rating: record.initial_rating.clone(),
            interest: format_interest_rate(Some(record.basic_interest), record.max_bonus_interest),
            duration: format_months(Some(&record.credit_duration)),
            purpose: record.investment_purpose.clone(),
            invested: format_currency(record.invested_amount),
            required: format_currency(record.required_amount),
            progress_pct: project_progress(record.invested_amount, record.required_amount),
            investors: record.investors,
        })
        .collect();

    let meta = &response.meta;

    let next_page = if meta.current_page < meta.last_page {
        Some(format!(
            "projlist projects list --page {}",
            meta.current_page + 1
        ))
    } else {
        None
    };

    let prev_page = if meta.current_page > 1 {
        Some(format!(
            "projlist projects list --page {}",
            meta.current_page - 1
        ))
    } else {
        None
    };

    ListOutput {
        items,
        pagination: ListPaginationInfo {
            current_page: meta.current_page,
            last_page: meta.last_page,
            per_page: meta.per_page,
            total: meta.total,
            from: meta.from,
            to: meta.to,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}
