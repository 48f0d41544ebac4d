use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{PublicUser, Role};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                                // unique user ID
    pub email: String,                           // user email
    #[serde(skip_serializing)]
    pub password_hash: String,                   // Argon2 hash, not exposed in JSON
    pub role: String,                            // patient | doctor | admin
    pub full_name: String,
    pub phone_number: String,
    pub medical_license_number: Option<String>,  // doctors only
    pub created_at: OffsetDateTime,              // creation timestamp
}

/// Fields needed to insert a user.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub full_name: &'a str,
    pub phone_number: &'a str,
    pub medical_license_number: Option<&'a str>,
}

impl User {
    pub fn role(&self) -> anyhow::Result<Role> {
        self.role.parse()
    }

    pub fn to_public(&self) -> anyhow::Result<PublicUser> {
        Ok(PublicUser {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role()?,
        })
    }
}
