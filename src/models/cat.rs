use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{
    coerce_integer, coerce_text, is_present, require_text, Record, RepositoryError, UNKNOWN,
};

pub const CAT_FIELDS_REQUIRED: &str = "firstname,lastname and beds are all required";

/// A persisted cat document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatRepoModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "bedsOwned")]
    pub beds_owned: i64,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

impl CatRepoModel {
    /// Builds a new, not yet persisted, cat with a fresh id and creation time.
    pub fn new(name: impl Into<String>, beds_owned: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into().trim().to_string(),
            beds_owned,
            created_date: Utc::now(),
        }
    }

    /// The tracker value used before any cat has been created.
    pub fn placeholder() -> Self {
        Self::new(UNKNOWN, 0)
    }
}

impl Record for CatRepoModel {
    const ENTITY: &'static str = "cat";
    const UNIQUE_NAME: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        require_text(&self.name, "name", "Cat")?;
        if self.beds_owned < 0 {
            return Err(RepositoryError::InvalidData(format!(
                "Cat validation failed: bedsOwned: Path `bedsOwned` ({}) is less than minimum allowed value (0).",
                self.beds_owned
            )));
        }
        Ok(())
    }
}

/// Body of a create-cat request, accepted as JSON or as a form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateCatRequest {
    pub firstname: Option<Value>,
    pub lastname: Option<Value>,
    pub beds: Option<Value>,
}

impl CreateCatRequest {
    pub fn has_required_fields(&self) -> bool {
        is_present(self.firstname.as_ref())
            && is_present(self.lastname.as_ref())
            && is_present(self.beds.as_ref())
    }
}

impl TryFrom<CreateCatRequest> for CatRepoModel {
    type Error = RepositoryError;

    fn try_from(request: CreateCatRequest) -> Result<Self, Self::Error> {
        let missing = || RepositoryError::InvalidData(CAT_FIELDS_REQUIRED.to_string());

        let firstname = coerce_text(request.firstname.as_ref().ok_or_else(missing)?, "firstname")?;
        let lastname = coerce_text(request.lastname.as_ref().ok_or_else(missing)?, "lastname")?;
        let beds = coerce_integer(request.beds.as_ref().ok_or_else(missing)?, "bedsOwned")?;

        Ok(CatRepoModel::new(format!("{} {}", firstname, lastname), beds))
    }
}

/// `{ name, beds }` projection returned by most cat endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatSummary {
    pub name: String,
    pub beds: i64,
}

impl From<&CatRepoModel> for CatSummary {
    fn from(cat: &CatRepoModel) -> Self {
        Self {
            name: cat.name.clone(),
            beds: cat.beds_owned,
        }
    }
}
