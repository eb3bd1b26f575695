pub mod credentials;
pub mod password;
pub mod token;

pub use credentials::{CredentialError, CredentialStore, NewUser, UserProfile};
pub use token::{generate_jwt, validate_jwt, Claims, JwtError};
