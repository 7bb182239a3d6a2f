use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::model::{
    Account, AccountFilterParams, ApiTokenResponse, ChangePasswordDto, CreateAccountDto, LoginDto,
    LoginResponse, MessageResponse, PaginatedAccountsResponse, RegisterDto, UpdateAccountDto,
};
use crate::modules::assist::model::{
    ImageRequest, ImageResponse, TranslateRequest, TranslateResponse,
};
use crate::modules::collect::model::CollectSubmission;
use crate::modules::permissions::model::{CatalogModule, CatalogResponse, MyPermissionsResponse};
use crate::modules::products::model::{
    BulkDeleteDto, BulkDeleteResponse, CreateProductDto, PaginatedProductsResponse, Product,
    ProductFilterParams, UpdateProductDto,
};
use crate::modules::roles::model::{
    CreateRoleDto, PaginatedRolesResponse, Role, RoleFilterParams, UpdateRoleDto,
};
use crate::modules::shops::model::{
    CreateShopDto, PaginatedShopsResponse, Shop, ShopFilterParams, UpdateShopDto,
};
use crate::modules::system_configs::model::{
    CreateSystemConfigDto, PaginatedSystemConfigsResponse, SystemConfig, SystemConfigFilterParams,
    UpdateSystemConfigDto,
};
use crate::modules::translation_configs::model::{
    CreateTranslationConfigDto, PaginatedTranslationConfigsResponse, TranslationConfig,
    TranslationConfigFilterParams, UpdateTranslationConfigDto,
};

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::accounts::controller::register,
        crate::modules::accounts::controller::login,
        crate::modules::accounts::controller::list_accounts,
        crate::modules::accounts::controller::get_account,
        crate::modules::accounts::controller::create_account,
        crate::modules::accounts::controller::update_account,
        crate::modules::accounts::controller::delete_account,
        crate::modules::accounts::controller::change_password,
        crate::modules::accounts::controller::rotate_api_token,
        crate::modules::roles::controller::list_roles,
        crate::modules::roles::controller::get_role,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::permissions::controller::my_permissions,
        crate::modules::permissions::controller::get_catalog,
        crate::modules::shops::controller::list_shops,
        crate::modules::shops::controller::get_shop,
        crate::modules::shops::controller::create_shop,
        crate::modules::shops::controller::update_shop,
        crate::modules::shops::controller::delete_shop,
        crate::modules::products::controller::list_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::products::controller::delete_products,
        crate::modules::translation_configs::controller::list_configs,
        crate::modules::translation_configs::controller::get_config,
        crate::modules::translation_configs::controller::create_config,
        crate::modules::translation_configs::controller::update_config,
        crate::modules::translation_configs::controller::delete_config,
        crate::modules::system_configs::controller::list_configs,
        crate::modules::system_configs::controller::get_config,
        crate::modules::system_configs::controller::create_config,
        crate::modules::system_configs::controller::update_config,
        crate::modules::system_configs::controller::delete_config,
        crate::modules::collect::controller::collect_product,
        crate::modules::assist::controller::translate,
        crate::modules::assist::controller::process_image,
    ),
    components(
        schemas(
            Account,
            RegisterDto,
            LoginDto,
            LoginResponse,
            CreateAccountDto,
            UpdateAccountDto,
            ChangePasswordDto,
            ApiTokenResponse,
            MessageResponse,
            AccountFilterParams,
            PaginatedAccountsResponse,
            Role,
            CreateRoleDto,
            UpdateRoleDto,
            RoleFilterParams,
            PaginatedRolesResponse,
            MyPermissionsResponse,
            CatalogModule,
            CatalogResponse,
            Shop,
            CreateShopDto,
            UpdateShopDto,
            ShopFilterParams,
            PaginatedShopsResponse,
            Product,
            CreateProductDto,
            UpdateProductDto,
            BulkDeleteDto,
            BulkDeleteResponse,
            ProductFilterParams,
            PaginatedProductsResponse,
            TranslationConfig,
            CreateTranslationConfigDto,
            UpdateTranslationConfigDto,
            TranslationConfigFilterParams,
            PaginatedTranslationConfigsResponse,
            SystemConfig,
            CreateSystemConfigDto,
            UpdateSystemConfigDto,
            SystemConfigFilterParams,
            PaginatedSystemConfigsResponse,
            CollectSubmission,
            TranslateRequest,
            TranslateResponse,
            ImageRequest,
            ImageResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Account management and authentication"),
        (name = "Roles", description = "Role management"),
        (name = "Permissions", description = "Permission snapshot and catalog"),
        (name = "Shops", description = "Connected storefronts"),
        (name = "Products", description = "Collected products"),
        (name = "Translation configs", description = "AI translation settings"),
        (name = "System configs", description = "Global configuration"),
        (name = "Collect", description = "Marketplace ingestion"),
        (name = "AI assist", description = "Translation and image proxies"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
