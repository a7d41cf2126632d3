use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{
    coerce_integer, coerce_text, is_present, require_text, Record, RepositoryError, UNKNOWN,
};

pub const DOG_FIELDS_REQUIRED: &str = "name, age and breed are all required";

/// A persisted dog document. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogRepoModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub breed: String,
    pub age: i64,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

impl DogRepoModel {
    pub fn new(name: impl Into<String>, breed: impl Into<String>, age: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into().trim().to_string(),
            breed: breed.into().trim().to_string(),
            age,
            created_date: Utc::now(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(UNKNOWN, UNKNOWN, 0)
    }
}

impl Record for DogRepoModel {
    const ENTITY: &'static str = "dog";
    const UNIQUE_NAME: bool = false;

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
        require_text(&self.name, "name", "Dog")?;
        require_text(&self.breed, "breed", "Dog")
    }
}

/// Body of a create-dog request, accepted as JSON or as a form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateDogRequest {
    pub name: Option<Value>,
    pub age: Option<Value>,
    pub breed: Option<Value>,
}

impl CreateDogRequest {
    pub fn has_required_fields(&self) -> bool {
        is_present(self.name.as_ref())
            && is_present(self.age.as_ref())
            && is_present(self.breed.as_ref())
    }
}

impl TryFrom<CreateDogRequest> for DogRepoModel {
    type Error = RepositoryError;

    fn try_from(request: CreateDogRequest) -> Result<Self, Self::Error> {
        let missing = || RepositoryError::InvalidData(DOG_FIELDS_REQUIRED.to_string());

        let name = coerce_text(request.name.as_ref().ok_or_else(missing)?, "name")?;
        let age = coerce_integer(request.age.as_ref().ok_or_else(missing)?, "age")?;
        let breed = coerce_text(request.breed.as_ref().ok_or_else(missing)?, "breed")?;

        Ok(DogRepoModel::new(name, breed, age))
    }
}

/// `{ name, age, breed }` projection returned by the dog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogSummary {
    pub name: String,
    pub age: i64,
    pub breed: String,
}

impl From<&DogRepoModel> for DogSummary {
    fn from(dog: &DogRepoModel) -> Self {
        Self {
            name: dog.name.clone(),
            age: dog.age,
            breed: dog.breed.clone(),
        }
    }
}
