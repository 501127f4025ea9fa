// handlers/public - endpoints reachable without a verified token

pub mod auth;
pub mod system;
