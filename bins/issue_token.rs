//! Mint a bearer token for local testing.
//!
//! Usage: `issue-token <user_id> <email> [ROLE ...]` (roles default to `USER`).
//! The signing secret comes from `config.toml` or `JWT_SECRET`.

use std::process::ExitCode;

use dotenvy::dotenv;
use service::auth::{domain::{CurrentUser, Role}, TokenService};

fn main() -> ExitCode {
    dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: issue-token <user_id> <email> [ROLE ...]");
        return ExitCode::from(2);
    }
    let id = match args[0].parse::<i64>() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("invalid user id {:?}: {e}", args[0]);
            return ExitCode::from(2);
        }
    };
    let roles = if args.len() > 2 {
        match args[2..].iter().map(|r| r.parse::<Role>()).collect::<Result<Vec<_>, _>>() {
            Ok(roles) => roles,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::from(2);
            }
        }
    } else {
        vec![Role::User]
    };

    let mut auth = configs::load_default().map(|c| c.auth).unwrap_or_default();
    auth.normalize_from_env();
    if let Err(e) = auth.validate() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let user = CurrentUser { id, email: args[1].clone(), roles };
    match TokenService::new(&auth.jwt_secret, auth.token_ttl_secs).issue(&user) {
        Ok(token) => {
            println!("{token}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
