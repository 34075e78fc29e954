use crate::error::{Result, StatsError};
use crate::models::{Column, ColumnRoles, Role};
use tracing::{info, warn};

impl Role {
    /// Whether a raw header name carries this role's tokens. Matching is case-sensitive.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Role::Status => name.contains("STATUS"),
            Role::CaseId => name.contains("CASE") && name.contains("NUMBER"),
            Role::Occupation => name.contains("SOC") && name.contains("NAME"),
            Role::WorkState => name.contains("WORK") && name.contains("STATE"),
            Role::EmployerState => name.contains("EMPLOYER") && name.contains("STATE"),
        }
    }
}

/// First header column, in header order, that matches `role`.
fn find_column(headers: &[&str], role: Role) -> Option<Column> {
    headers
        .iter()
        .position(|name| role.matches(name))
        .map(|index| Column {
            index,
            name: headers[index].to_string(),
        })
}

fn require_column(headers: &[&str], role: Role) -> Result<Column> {
    find_column(headers, role).ok_or(StatsError::MissingColumn(role))
}

impl ColumnRoles {
    /// Map every semantic role onto a header column. Column names differ between
    /// data vintages (`CASE_NUMBER` vs `LCA_CASE_NUMBER`), so only role tokens are matched.
    pub fn resolve<'h, I>(headers: I, employer_state_fallback: bool) -> Result<Self>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();

        let roles = ColumnRoles {
            status: require_column(&headers, Role::Status)?,
            case_id: require_column(&headers, Role::CaseId)?,
            occupation: require_column(&headers, Role::Occupation)?,
            work_state: require_column(&headers, Role::WorkState)?,
            employer_state: if employer_state_fallback {
                let column = find_column(&headers, Role::EmployerState);
                if column.is_none() {
                    warn!("employer state fallback requested but no employer state column found");
                }
                column
            } else {
                None
            },
        };

        info!(
            status = %roles.status.name,
            case_id = %roles.case_id.name,
            occupation = %roles.occupation.name,
            work_state = %roles.work_state.name,
            "resolved columns"
        );
        Ok(roles)
    }
}
