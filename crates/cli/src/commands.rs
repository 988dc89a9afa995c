use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use orderdesk_auth::RoleId;
use orderdesk_sales::{
    evaluate as evaluate_plan, ButtonPlan, EligibilityConfig, InMemorySearchPort, OrderSnapshot,
    PageMode,
};

pub struct EvaluateRequest {
    pub snapshot: PathBuf,
    pub lookups: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub mode: PageMode,
    pub role_id: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateOutput {
    pub evaluated_at: DateTime<Utc>,
    pub mode: PageMode,
    pub plan: ButtonPlan,
}

pub fn load_config(path: Option<&Path>) -> Result<EligibilityConfig> {
    EligibilityConfig::load(path).with_context(|| match path {
        Some(p) => format!("load config {}", p.display()),
        None => "load default config".to_string(),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {what} {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {what} {}", path.display()))
}

pub fn evaluate(request: &EvaluateRequest) -> Result<EvaluateOutput> {
    let config = load_config(request.config.as_deref())?;

    let mut snapshot: OrderSnapshot = read_json(&request.snapshot, "snapshot")?;
    snapshot
        .validate()
        .with_context(|| format!("snapshot {} is malformed", request.snapshot.display()))?;

    if let Some(raw) = request.role_id {
        snapshot.user_role = config.roles.resolve(RoleId(raw));
    }

    let port = match &request.lookups {
        Some(path) => read_json::<InMemorySearchPort>(path, "lookups")?,
        None => {
            tracing::warn!("no lookups file given; every saved search returns no rows");
            InMemorySearchPort::new()
        }
    };

    tracing::info!(
        order_id = %snapshot.id,
        transaction = %snapshot.transaction_number,
        role = %snapshot.user_role,
        "evaluating order controls"
    );
    let plan = evaluate_plan(&config, &port, &snapshot, request.mode);

    Ok(EvaluateOutput {
        evaluated_at: Utc::now(),
        mode: request.mode,
        plan,
    })
}
