//! Admin dashboard summary.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use dealership_db::models::lead::Lead;
use dealership_db::models::status::{GearStatus, LeadStatus, VehicleStatus};
use dealership_db::repositories::{GearProductRepo, LeadRepo, VehicleRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of leads listed on the dashboard.
const RECENT_LEADS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub vehicles: BTreeMap<&'static str, i64>,
    pub gear: BTreeMap<&'static str, i64>,
    pub leads: BTreeMap<&'static str, i64>,
    pub recent_leads: Vec<Lead>,
}

/// Expand `(status, count)` rows into a map with every status present.
fn count_map<S: Copy + PartialEq>(
    all: &[S],
    label: impl Fn(S) -> &'static str,
    rows: &[(S, i64)],
) -> BTreeMap<&'static str, i64> {
    all.iter()
        .map(|&status| {
            let count = rows
                .iter()
                .find(|(s, _)| *s == status)
                .map_or(0, |(_, c)| *c);
            (label(status), count)
        })
        .collect()
}

/// GET /api/v1/admin/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (vehicles, gear, leads, recent_leads) = tokio::try_join!(
        VehicleRepo::count_by_status(&state.pool),
        GearProductRepo::count_by_status(&state.pool),
        LeadRepo::count_by_status(&state.pool),
        LeadRepo::list_recent(&state.pool, RECENT_LEADS),
    )?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            vehicles: count_map(VehicleStatus::ALL, VehicleStatus::as_str, &vehicles),
            gear: count_map(GearStatus::ALL, GearStatus::as_str, &gear),
            leads: count_map(LeadStatus::ALL, LeadStatus::as_str, &leads),
            recent_leads,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_map_fills_missing_statuses() {
        let map = count_map(
            LeadStatus::ALL,
            LeadStatus::as_str,
            &[(LeadStatus::Contacted, 3)],
        );
        assert_eq!(map["contacted"], 3);
        assert_eq!(map["new_lead"], 0);
        assert_eq!(map.len(), LeadStatus::ALL.len());
    }
}
