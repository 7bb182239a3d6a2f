use std::collections::BTreeSet;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rand::RngCore;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_auth::issue_token;
use crossdesk_config::JwtConfig;
use crossdesk_core::AppError;
use crossdesk_core::catalog::{self, ROOT_USERNAME};

use crate::modules::roles::model::Role;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    Account, AccountFilterParams, ApiTokenResponse, ChangePasswordDto, CreateAccountDto, LoginDto,
    LoginResponse, PaginatedAccountsResponse, RegisterDto, UpdateAccountDto,
};

const ACCOUNT_COLUMNS: &str = "id, username, display_name, role_refs, extra_permissions, \
                               api_token, created_at, updated_at";

// ============ Permission resolution ============

/// Union of every matched role's permission list and the directly-granted
/// extras. Deduplicated, deterministic order.
pub fn union_permissions(roles: &[Role], extra_permissions: &[String]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for role in roles {
        set.extend(role.permissions.iter().cloned());
    }
    set.extend(extra_permissions.iter().cloned());
    set.into_iter().collect()
}

/// Effective permission set for an account at resolution time.
///
/// The super-user resolves to the entire catalog. Role references match by
/// role id or role name; references matching nothing contribute nothing.
/// An account with no roles and no extras resolves to the empty set.
#[instrument(skip(db, account), fields(username = %account.username))]
pub async fn resolve_permissions(db: &PgPool, account: &Account) -> Result<Vec<String>, AppError> {
    if account.username == ROOT_USERNAME {
        return Ok(catalog::all());
    }

    let roles: Vec<Role> = if account.role_refs.is_empty() {
        vec![]
    } else {
        sqlx::query_as(
            "SELECT id, name, description, permissions, created_at, updated_at
             FROM roles WHERE id::text = ANY($1) OR name = ANY($1)",
        )
        .bind(&account.role_refs)
        .fetch_all(db)
        .await?
    };

    Ok(union_permissions(&roles, &account.extra_permissions))
}

// ============ Authentication ============

#[instrument(skip(db, dto))]
pub async fn register(db: &PgPool, dto: RegisterDto) -> Result<Account, AppError> {
    if dto.username == ROOT_USERNAME {
        return Err(AppError::bad_request(anyhow!("Username is reserved")));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM accounts WHERE username = $1")
        .bind(&dto.username)
        .fetch_optional(db)
        .await?;

    if existing.is_some() {
        return Err(AppError::bad_request(anyhow!("Username already exists")));
    }

    let hashed = hash_password(&dto.password)?;

    let account: Account = sqlx::query_as(&format!(
        "INSERT INTO accounts (username, password, display_name)
         VALUES ($1, $2, $3)
         RETURNING {}",
        ACCOUNT_COLUMNS
    ))
    .bind(&dto.username)
    .bind(&hashed)
    .bind(dto.display_name.unwrap_or_default())
    .fetch_one(db)
    .await?;

    Ok(account)
}

#[instrument(skip(db, dto, jwt_config))]
pub async fn login(
    db: &PgPool,
    dto: LoginDto,
    jwt_config: &JwtConfig,
) -> Result<LoginResponse, AppError> {
    #[derive(sqlx::FromRow)]
    struct AccountWithPassword {
        id: Uuid,
        username: String,
        display_name: String,
        role_refs: Vec<String>,
        extra_permissions: Vec<String>,
        api_token: Option<String>,
        password: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    let row: AccountWithPassword = sqlx::query_as(&format!(
        "SELECT {}, password FROM accounts WHERE username = $1",
        ACCOUNT_COLUMNS
    ))
    .bind(&dto.username)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid username or password")))?;

    if !verify_password(&dto.password, &row.password)? {
        return Err(AppError::unauthorized(anyhow!(
            "Invalid username or password"
        )));
    }

    let account = Account {
        id: row.id,
        username: row.username,
        display_name: row.display_name,
        role_refs: row.role_refs,
        extra_permissions: row.extra_permissions,
        api_token: row.api_token,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };

    let permissions = resolve_permissions(db, &account).await?;
    let access_token = issue_token(
        account.id,
        &account.username,
        account.role_refs.clone(),
        permissions,
        jwt_config,
    )?;

    Ok(LoginResponse {
        access_token,
        account,
    })
}

// ============ Account management ============

#[instrument(skip(db))]
pub async fn list_accounts(
    db: &PgPool,
    params: AccountFilterParams,
) -> Result<PaginatedAccountsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let accounts: Vec<Account> = sqlx::query_as(&format!(
        "SELECT {} FROM accounts
         WHERE ($1::text IS NULL OR username ILIKE '%' || $1 || '%')
         ORDER BY username LIMIT $2 OFFSET $3",
        ACCOUNT_COLUMNS
    ))
    .bind(&params.username)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM accounts
         WHERE ($1::text IS NULL OR username ILIKE '%' || $1 || '%')",
    )
    .bind(&params.username)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, accounts.len());

    Ok(PaginatedAccountsResponse {
        data: accounts,
        meta,
    })
}

#[instrument(skip(db))]
pub async fn get_account(db: &PgPool, id: Uuid) -> Result<Account, AppError> {
    sqlx::query_as(&format!(
        "SELECT {} FROM accounts WHERE id = $1",
        ACCOUNT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))
}

#[instrument(skip(db, dto))]
pub async fn create_account(db: &PgPool, dto: CreateAccountDto) -> Result<Account, AppError> {
    if dto.username == ROOT_USERNAME {
        return Err(AppError::bad_request(anyhow!("Username is reserved")));
    }

    let extra_permissions = dto.extra_permissions.unwrap_or_default();
    ensure_known_codes(&extra_permissions)?;

    let hashed = hash_password(&dto.password)?;

    let account: Account = sqlx::query_as(&format!(
        "INSERT INTO accounts (username, password, display_name, role_refs, extra_permissions)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        ACCOUNT_COLUMNS
    ))
    .bind(&dto.username)
    .bind(&hashed)
    .bind(dto.display_name.unwrap_or_default())
    .bind(dto.role_refs.unwrap_or_default())
    .bind(extra_permissions)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(anyhow!("Username already exists"));
            }
        }
        AppError::from(e)
    })?;

    Ok(account)
}

#[instrument(skip(db, dto))]
pub async fn update_account(
    db: &PgPool,
    id: Uuid,
    dto: UpdateAccountDto,
) -> Result<Account, AppError> {
    if let Some(ref extras) = dto.extra_permissions {
        ensure_known_codes(extras)?;
    }

    sqlx::query_as(&format!(
        "UPDATE accounts
         SET display_name = COALESCE($2, display_name),
             role_refs = COALESCE($3, role_refs),
             extra_permissions = COALESCE($4, extra_permissions),
             updated_at = now()
         WHERE id = $1
         RETURNING {}",
        ACCOUNT_COLUMNS
    ))
    .bind(id)
    .bind(dto.display_name)
    .bind(dto.role_refs)
    .bind(dto.extra_permissions)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))
}

#[instrument(skip(db))]
pub async fn delete_account(db: &PgPool, id: Uuid) -> Result<(), AppError> {
    let target = get_account(db, id).await?;
    if target.username == ROOT_USERNAME {
        return Err(AppError::forbidden(anyhow!(
            "The super-user account cannot be deleted"
        )));
    }

    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

#[instrument(skip(db, dto))]
pub async fn change_password(
    db: &PgPool,
    id: Uuid,
    dto: ChangePasswordDto,
    caller_id: Uuid,
) -> Result<(), AppError> {
    let (current_hash,): (String,) =
        sqlx::query_as("SELECT password FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))?;

    // Changing one's own password proves knowledge of the current one;
    // administrators resetting another account's do not.
    if caller_id == id {
        let current = dto
            .current_password
            .as_deref()
            .ok_or_else(|| AppError::bad_request(anyhow!("Current password is required")))?;
        if !verify_password(current, &current_hash)? {
            return Err(AppError::unauthorized(anyhow!("Current password is wrong")));
        }
    }

    let hashed = hash_password(&dto.new_password)?;

    sqlx::query("UPDATE accounts SET password = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(&hashed)
        .execute(db)
        .await?;

    Ok(())
}

#[instrument(skip(db))]
pub async fn rotate_api_token(db: &PgPool, id: Uuid) -> Result<ApiTokenResponse, AppError> {
    let api_token = generate_api_token();

    let updated = sqlx::query("UPDATE accounts SET api_token = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(&api_token)
        .execute(db)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("Account not found")));
    }

    Ok(ApiTokenResponse { api_token })
}

/// Lookup for the collect endpoint's long-lived credential.
#[instrument(skip(db, api_token))]
pub async fn find_account_by_api_token(
    db: &PgPool,
    api_token: &str,
) -> Result<Option<Account>, AppError> {
    let account = sqlx::query_as(&format!(
        "SELECT {} FROM accounts WHERE api_token = $1",
        ACCOUNT_COLUMNS
    ))
    .bind(api_token)
    .fetch_optional(db)
    .await?;

    Ok(account)
}

/// Creates or re-keys the super-user account. Only reachable from the
/// `create-root` bootstrap command, never over HTTP.
pub async fn create_root_account(db: &PgPool, password: &str) -> Result<Account, AppError> {
    let hashed = hash_password(password)?;

    let account: Account = sqlx::query_as(&format!(
        "INSERT INTO accounts (username, password, display_name)
         VALUES ($1, $2, 'Super User')
         ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password, updated_at = now()
         RETURNING {}",
        ACCOUNT_COLUMNS
    ))
    .bind(ROOT_USERNAME)
    .bind(&hashed)
    .fetch_one(db)
    .await?;

    Ok(account)
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

fn generate_api_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, permissions: Vec<&str>) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            permissions: permissions.into_iter().map(String::from).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_union_of_roles_and_extras() {
        let roles = vec![
            role("editor", vec!["product:view", "product:edit"]),
            role("viewer", vec!["product:view"]),
        ];
        let extras = vec!["shop:create".to_string()];

        let resolved = union_permissions(&roles, &extras);
        assert_eq!(
            resolved,
            vec!["product:edit", "product:view", "shop:create"]
        );
    }

    #[test]
    fn test_union_with_no_grants_is_empty() {
        assert!(union_permissions(&[], &[]).is_empty());
    }

    #[test]
    fn test_union_deduplicates_across_sources() {
        let roles = vec![role("viewer", vec!["product:view"])];
        let extras = vec!["product:view".to_string()];
        assert_eq!(union_permissions(&roles, &extras), vec!["product:view"]);
    }

    #[test]
    fn test_generated_api_tokens_are_distinct() {
        let a = generate_api_token();
        let b = generate_api_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ensure_known_codes() {
        assert!(ensure_known_codes(&["product:view".to_string()]).is_ok());
        assert!(ensure_known_codes(&["made:up".to_string()]).is_err());
    }
}
