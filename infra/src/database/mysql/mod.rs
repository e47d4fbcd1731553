//! MySQL repository implementations

pub mod role_repository_impl;

pub use role_repository_impl::MySqlRoleRepository;
