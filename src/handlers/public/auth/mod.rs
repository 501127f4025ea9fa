// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

use serde::Deserialize;

pub mod login;    // POST /login - authenticate and get a token
pub mod logout;   // POST /logout - stateless acknowledgement
pub mod register; // POST /register - create a new account

pub use login::login_post;
pub use logout::logout_post;
pub use register::register_post;

/// Body accepted by both /register and /login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}
