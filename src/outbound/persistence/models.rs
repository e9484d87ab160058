//! Row structs bridging Diesel and the domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{animal_likes, animals, org_likes, organizations, users};
use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::ports::user_repository::UserPersistenceError;
use crate::domain::user::{EmailAddress, User, UserId, Username};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Rebuild the domain user; stored values were validated at insert time,
    /// so a failure here means the table was mutated out-of-band.
    pub fn into_domain(self) -> Result<User, UserPersistenceError> {
        let username = Username::new(&self.username).map_err(|err| {
            UserPersistenceError::query(format!("stored username is invalid: {err}"))
        })?;
        let email = EmailAddress::new(&self.email).map_err(|err| {
            UserPersistenceError::query(format!("stored email is invalid: {err}"))
        })?;
        Ok(User::new(UserId::from_uuid(self.id), username, email))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnimalRow {
    pub id: String,
    pub name: String,
    pub img_url: String,
    pub description: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub img_url: String,
    pub mission_statement: String,
}

/// Shared conversion for both mirror tables.
fn mirror_record(
    id: String,
    kind: SavedKind,
    name: String,
    img_url: String,
    blurb: String,
) -> Result<MirrorRecord, String> {
    let id = ExternalId::new(&id).map_err(|err| format!("stored mirror id is invalid: {err}"))?;
    Ok(MirrorRecord {
        id,
        kind,
        name,
        image_url: img_url,
        blurb,
    })
}

impl AnimalRow {
    pub fn into_domain(self) -> Result<MirrorRecord, String> {
        mirror_record(
            self.id,
            SavedKind::Animal,
            self.name,
            self.img_url,
            self.description,
        )
    }
}

impl OrganizationRow {
    pub fn into_domain(self) -> Result<MirrorRecord, String> {
        mirror_record(
            self.id,
            SavedKind::Organization,
            self.name,
            self.img_url,
            self.mission_statement,
        )
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = animals)]
pub struct NewAnimalRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub img_url: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = organizations)]
pub struct NewOrganizationRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub img_url: &'a str,
    pub mission_statement: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = animal_likes)]
pub struct NewAnimalLikeRow<'a> {
    pub user_id: Uuid,
    pub animal_id: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = org_likes)]
pub struct NewOrgLikeRow<'a> {
    pub user_id: Uuid,
    pub org_id: &'a str,
}
