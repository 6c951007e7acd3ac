//! Business logic services

pub mod auth;
pub mod books;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub auth: Arc<dyn auth::Authenticator>,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> Self {
        Self {
            books: books::BookService::from_repository(&repository),
            auth: Arc::new(auth::JwtAuthenticator::new(auth_config)),
            repository,
        }
    }
}
