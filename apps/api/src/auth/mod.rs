//! Authentication and authorization.
//!
//! - [`password`] - CredentialVault (argon2id digests)
//! - [`token`] - TokenIssuer (HS256 session tokens)
//! - [`gate`] - AuthenticationGate extractor and AuthorizationGate check

pub mod gate;
pub mod password;
pub mod token;

pub use gate::{authorize, extract_bearer_token, Authenticated};
pub use password::{CredentialVault, VaultError};
pub use token::{Claims, TokenError, TokenIssuer};
