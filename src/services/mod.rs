pub mod preference_service;
pub mod user_service;
