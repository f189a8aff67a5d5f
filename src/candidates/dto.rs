use serde::Deserialize;

/// Request body for creating a candidate.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCandidateRequest {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub google_drive_link: Option<String>,
}

/// Optional window over `GET /candidates`; absent means the full list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
