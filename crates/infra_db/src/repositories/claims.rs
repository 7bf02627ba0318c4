//! Claims repository implementation
//!
//! Database access for claim records. Queries are runtime-checked so the
//! crate builds without a live database; the schema lives in
//! `migrations/0001_create_claims.sql`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimError, ClaimStatus, ClaimStore, DenialRisk};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "claim_id, patient_name, date_of_birth, insurance_company, \
     policy_number, group_number, proposed_cpt_codes, proposed_icd_codes, \
     estimated_denial_risk, raw_ocr_text, ai_confidence, \
     insurance_card_image_path, clinical_doc_image_path, status, created_at, submitted_at";

/// Repository for claim records
///
/// Implements the domain's `ClaimStore` port on PostgreSQL. The repository
/// owns no state beyond the pool handle and is cheap to clone.
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new claim record
    pub async fn create(&self, claim: &Claim) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, patient_name, date_of_birth, insurance_company,
                policy_number, group_number, proposed_cpt_codes, proposed_icd_codes,
                estimated_denial_risk, raw_ocr_text, ai_confidence,
                insurance_card_image_path, clinical_doc_image_path,
                status, created_at, submitted_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16
            )
            "#,
        )
        .bind(claim.id.as_uuid())
        .bind(&claim.patient_name)
        .bind(claim.date_of_birth)
        .bind(&claim.insurance_company)
        .bind(&claim.policy_number)
        .bind(&claim.group_number)
        .bind(&claim.proposed_cpt_codes)
        .bind(&claim.proposed_icd_codes)
        .bind(claim.estimated_denial_risk.map(f64::from))
        .bind(&claim.raw_ocr_text)
        .bind(claim.ai_confidence)
        .bind(&claim.insurance_card_image_path)
        .bind(&claim.clinical_doc_image_path)
        .bind(claim.status.as_str())
        .bind(claim.created_at)
        .bind(claim.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a claim by its identifier
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<Option<Claim>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1"
        ))
        .bind(claim_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Claim::try_from).transpose()
    }

    /// Retrieves all claims, newest first
    pub async fn list_all(&self) -> Result<Vec<Claim>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims ORDER BY created_at DESC, claim_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Claim::try_from).collect()
    }

    /// Removes a claim record, returning whether it existed
    pub async fn remove(&self, claim_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = $1")
            .bind(claim_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ClaimStore for ClaimsRepository {
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimError> {
        self.create(claim).await.map_err(into_claim_error)
    }

    async fn get(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        self.get_by_id(*id.as_uuid()).await.map_err(into_claim_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<Claim>, ClaimError> {
        self.list_all().await.map_err(into_claim_error)
    }

    async fn delete(&self, id: ClaimId) -> Result<bool, ClaimError> {
        self.remove(*id.as_uuid()).await.map_err(into_claim_error)
    }
}

fn into_claim_error(error: DatabaseError) -> ClaimError {
    ClaimError::persistence(error.to_string())
}

/// Database row for a claim
#[derive(Debug, sqlx::FromRow)]
struct ClaimRow {
    claim_id: Uuid,
    patient_name: String,
    date_of_birth: Option<NaiveDate>,
    insurance_company: String,
    policy_number: Option<String>,
    group_number: Option<String>,
    proposed_cpt_codes: Vec<String>,
    proposed_icd_codes: Vec<String>,
    estimated_denial_risk: Option<f64>,
    raw_ocr_text: Option<String>,
    ai_confidence: Option<f64>,
    insurance_card_image_path: String,
    clinical_doc_image_path: String,
    status: String,
    created_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DatabaseError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let status: ClaimStatus = row
            .status
            .parse()
            .map_err(|_| DatabaseError::CorruptRow(format!("unknown status '{}'", row.status)))?;

        let estimated_denial_risk = row
            .estimated_denial_risk
            .map(DenialRisk::new)
            .transpose()
            .map_err(|e| DatabaseError::CorruptRow(e.to_string()))?;

        Ok(Claim {
            id: ClaimId::from_uuid(row.claim_id),
            patient_name: row.patient_name,
            date_of_birth: row.date_of_birth,
            insurance_company: row.insurance_company,
            policy_number: row.policy_number,
            group_number: row.group_number,
            proposed_cpt_codes: row.proposed_cpt_codes,
            proposed_icd_codes: row.proposed_icd_codes,
            estimated_denial_risk,
            raw_ocr_text: row.raw_ocr_text,
            ai_confidence: row.ai_confidence,
            insurance_card_image_path: row.insurance_card_image_path,
            clinical_doc_image_path: row.clinical_doc_image_path,
            status,
            created_at: row.created_at,
            submitted_at: row.submitted_at,
        })
    }
}
