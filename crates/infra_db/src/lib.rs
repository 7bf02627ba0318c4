//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL access for the claims intake system using
//! SQLx: pool management, schema migrations, and the repository implementing
//! the domain's `ClaimStore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, ClaimsRepository};
//!
//! let pool = create_pool_from_url("postgres://localhost/claims_intake").await?;
//! run_migrations(&pool).await?;
//! let repo = ClaimsRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::ClaimsRepository;
