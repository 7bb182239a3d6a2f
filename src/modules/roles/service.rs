use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_core::AppError;
use crossdesk_core::catalog::{self, ADMIN_ROLE_NAME};

use super::model::{CreateRoleDto, PaginatedRolesResponse, Role, RoleFilterParams, UpdateRoleDto};

const ROLE_COLUMNS: &str = "id, name, description, permissions, created_at, updated_at";

#[instrument(skip(db))]
pub async fn list_roles(
    db: &PgPool,
    params: RoleFilterParams,
) -> Result<PaginatedRolesResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let roles: Vec<Role> = sqlx::query_as(&format!(
        "SELECT {} FROM roles
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
         ORDER BY name LIMIT $2 OFFSET $3",
        ROLE_COLUMNS
    ))
    .bind(&params.name)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM roles
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
    )
    .bind(&params.name)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, roles.len());

    Ok(PaginatedRolesResponse { data: roles, meta })
}

#[instrument(skip(db))]
pub async fn get_role(db: &PgPool, id: Uuid) -> Result<Role, AppError> {
    sqlx::query_as(&format!("SELECT {} FROM roles WHERE id = $1", ROLE_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))
}

#[instrument(skip(db, dto))]
pub async fn create_role(db: &PgPool, dto: CreateRoleDto) -> Result<Role, AppError> {
    validate_role_name(&dto.name)?;

    let permissions = dto.permissions.unwrap_or_default();
    ensure_known_codes(&permissions)?;

    let role: Role = sqlx::query_as(&format!(
        "INSERT INTO roles (name, description, permissions)
         VALUES ($1, $2, $3)
         RETURNING {}",
        ROLE_COLUMNS
    ))
    .bind(&dto.name)
    .bind(&dto.description)
    .bind(&permissions)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(anyhow!("A role with this name already exists"));
            }
        }
        AppError::from(e)
    })?;

    Ok(role)
}

#[instrument(skip(db, dto))]
pub async fn update_role(db: &PgPool, id: Uuid, dto: UpdateRoleDto) -> Result<Role, AppError> {
    if let Some(ref name) = dto.name {
        validate_role_name(name)?;

        // Renaming the reserved administrator role would strip every
        // administrator of their isolation bypass.
        let existing = get_role(db, id).await?;
        if existing.name == ADMIN_ROLE_NAME && name != ADMIN_ROLE_NAME {
            return Err(AppError::forbidden(anyhow!(
                "The {} role cannot be renamed",
                ADMIN_ROLE_NAME
            )));
        }
    }

    if let Some(ref permissions) = dto.permissions {
        ensure_known_codes(permissions)?;
    }

    sqlx::query_as(&format!(
        "UPDATE roles
         SET name = COALESCE($2, name),
             description = COALESCE($3, description),
             permissions = COALESCE($4, permissions),
             updated_at = now()
         WHERE id = $1
         RETURNING {}",
        ROLE_COLUMNS
    ))
    .bind(id)
    .bind(dto.name)
    .bind(dto.description)
    .bind(dto.permissions)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))
}

/// Deletes a role. Tokens already issued keep their frozen snapshots;
/// accounts still referencing the role simply resolve without it.
#[instrument(skip(db))]
pub async fn delete_role(db: &PgPool, id: Uuid) -> Result<(), AppError> {
    let role = get_role(db, id).await?;
    if role.name == ADMIN_ROLE_NAME {
        return Err(AppError::forbidden(anyhow!(
            "The {} role cannot be deleted",
            ADMIN_ROLE_NAME
        )));
    }

    sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

fn ensure_known_codes(codes: &[String]) -> Result<(), AppError> {
    let unknown = catalog::unknown_codes(codes);
    if !unknown.is_empty() {
        return Err(AppError::unprocessable(anyhow!(
            "Unknown permission codes: {}",
            unknown.join(", ")
        )));
    }
    Ok(())
}

// Role references on accounts match by id or name; a name that parses as a
// UUID could collide with another role's id, so reject it outright.
fn validate_role_name(name: &str) -> Result<(), AppError> {
    if Uuid::parse_str(name).is_ok() {
        return Err(AppError::bad_request(anyhow!(
            "Role names must not be UUIDs"
        )));
    }
    Ok(())
}
