// handlers/protected - endpoints behind jwt_auth + validate_user

pub mod notes;
