pub mod errors;
pub mod db;
pub mod commons;
pub mod user_commons;

#[cfg(test)]
mod tests;
