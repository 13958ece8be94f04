use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Directory entry owned by exactly one user. Every query here filters
/// by `user_id`; a row owned by someone else is indistinguishable from
/// a row that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Doctor {
    pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<Vec<Doctor>> {
        sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, user_id, name, specialty, phone, email, address, created_at
            FROM doctors
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    pub async fn get_owned(db: &PgPool, owner_id: Uuid, id: Uuid) -> sqlx::Result<Option<Doctor>> {
        sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, user_id, name, specialty, phone, email, address, created_at
            FROM doctors
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
    }

    /// Ownership is fixed to the caller; any client-supplied owner is
    /// ignored upstream.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        name: &str,
        specialty: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> sqlx::Result<Doctor> {
        sqlx::query_as::<_, Doctor>(
            r#"
            INSERT INTO doctors (user_id, name, specialty, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, specialty, phone, email, address, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(specialty)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(db)
        .await
    }

    /// Replace the whole mutable field set. The ownership filter in the
    /// WHERE clause doubles as the existence check: no matching row means
    /// absent or not owned, both reported as None.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_owned(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
        specialty: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> sqlx::Result<Option<Doctor>> {
        sqlx::query_as::<_, Doctor>(
            r#"
            UPDATE doctors
            SET name = $3, specialty = $4, phone = $5, email = $6, address = $7
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, specialty, phone, email, address, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .bind(specialty)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_optional(db)
        .await
    }

    pub async fn delete_owned(db: &PgPool, owner_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM doctors
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every row owned by the caller, returning the count. Other
    /// owners' rows are untouched by construction.
    pub async fn delete_all_by_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM doctors
            WHERE user_id = $1
            "#,
        )
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
