pub mod accounts;
pub mod assist;
pub mod collect;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod shops;
pub mod system_configs;
pub mod translation_configs;
