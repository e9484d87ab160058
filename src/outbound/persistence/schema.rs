//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses them
//! for compile-time query validation and type-safe SQL generation.
//!
//! Constraints relied upon by the adapters:
//! - `users.username` and `users.email` carry unique indexes named
//!   `users_username_key` and `users_email_key`.
//! - `animal_likes` and `org_likes` carry unique `(user_id, <entity>_id)`
//!   indexes, and their `user_id` foreign keys cascade on user deletion.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique account name.
        username -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// bcrypt digest of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Write-once snapshots of upstream animals, keyed by the upstream id.
    animals (id) {
        id -> Varchar,
        name -> Varchar,
        img_url -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Write-once snapshots of upstream organizations, keyed by the upstream id.
    organizations (id) {
        id -> Varchar,
        name -> Varchar,
        img_url -> Varchar,
        mission_statement -> Text,
    }
}

diesel::table! {
    /// `(user, animal)` membership rows; one row per saved animal.
    animal_likes (id) {
        id -> Int4,
        user_id -> Uuid,
        animal_id -> Varchar,
    }
}

diesel::table! {
    /// `(user, organization)` membership rows; one row per saved organization.
    org_likes (id) {
        id -> Int4,
        user_id -> Uuid,
        org_id -> Varchar,
    }
}

diesel::joinable!(animal_likes -> users (user_id));
diesel::joinable!(animal_likes -> animals (animal_id));
diesel::joinable!(org_likes -> users (user_id));
diesel::joinable!(org_likes -> organizations (org_id));

diesel::allow_tables_to_appear_in_same_query!(users, animals, organizations, animal_likes, org_likes);
