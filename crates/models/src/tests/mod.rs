
/// Membership uniqueness and the conditional insert
pub mod user_commons_tests;
