//! Session authentication facade for the boundary layer

mod service;


pub use service::SessionAuthenticator;
