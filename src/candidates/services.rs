use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{CreateCandidateRequest, ListQuery};
use super::repo_types::{Candidate, NewCandidate, Page};
use crate::{
    auth::services::required,
    db::StoreError,
    error::{AppError, AppResult},
    state::AppState,
};

pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const ROLL_NUMBER_EXISTS: &str = "Roll number already exists";
pub const INVALID_ROLL_NUMBER: &str =
    "Roll number must be in the format 24CS10081 (2 digits, 2 uppercase letters, 5 digits)";
pub const INVALID_DOCUMENT_LINK: &str = "Google Drive link must be a valid drive link";

pub(crate) fn is_valid_roll_number(roll_number: &str) -> bool {
    lazy_static! {
        static ref ROLL_NUMBER_RE: Regex = Regex::new(r"^[0-9]{2}[A-Z]{2}[0-9]{5}$").unwrap();
    }
    ROLL_NUMBER_RE.is_match(roll_number)
}

pub(crate) fn page_from_query(q: ListQuery) -> AppResult<Page> {
    if q.limit.is_some_and(|l| l < 0) || q.offset.is_some_and(|o| o < 0) {
        return Err(AppError::validation("limit and offset must not be negative"));
    }
    Ok(Page {
        limit: q.limit,
        offset: q.offset.unwrap_or(0),
    })
}

pub async fn list(state: &AppState, page: Page) -> AppResult<Vec<Candidate>> {
    let rows = state
        .candidates
        .list(page)
        .await
        .context("list candidates")?;
    Ok(rows)
}

pub async fn create(
    state: &AppState,
    created_by: Uuid,
    req: CreateCandidateRequest,
) -> AppResult<Candidate> {
    let (Some(name), Some(roll_number), Some(link)) = (
        required(req.name),
        required(req.roll_number),
        required(req.google_drive_link),
    ) else {
        return Err(AppError::validation(FIELDS_REQUIRED));
    };

    if !is_valid_roll_number(&roll_number) {
        return Err(AppError::validation(INVALID_ROLL_NUMBER));
    }
    if !link.starts_with(&state.config.candidates.document_link_prefix) {
        return Err(AppError::validation(INVALID_DOCUMENT_LINK));
    }

    let new_candidate = NewCandidate {
        name: &name,
        roll_number: &roll_number,
        google_drive_link: &link,
    };
    match state.candidates.insert(new_candidate).await {
        Ok(candidate) => {
            info!(candidate_id = %candidate.id, %created_by, "candidate created");
            Ok(candidate)
        }
        Err(StoreError::UniqueViolation { constraint }) => {
            warn!(%constraint, %roll_number, "duplicate roll number");
            Err(AppError::conflict(ROLL_NUMBER_EXISTS))
        }
        Err(e) => Err(anyhow::Error::new(e).context("insert candidate").into()),
    }
}
