use crate::cli::commands::RunContext;
use crate::cli::parser::{Commands, UserAction};
use crate::core::audit;
use crate::errors::{AppError, AppResult};
use crate::models::user::Role;
use crate::store::RecordStore;
use crate::ui::messages::{info, success};
use crate::utils::formatting::pad_right;

pub fn handle(cmd: &Commands, ctx: &RunContext) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let store = ctx.open_store()?;

    match action {
        UserAction::Add { name, email, admin } => {
            let name = name.trim();
            let email = email.trim();
            if name.is_empty() {
                return Err(AppError::Validation("Name cannot be empty".into()));
            }
            if !email.contains('@') {
                return Err(AppError::Validation(format!("Invalid email address: {}", email)));
            }

            let role = if *admin { Role::Admin } else { Role::Employee };
            let user = store.insert_user(name, email, role, ctx.now)?;
            audit(
                &store,
                "user_add",
                "users",
                &format!("user {} ({})", user.id, role.to_db_str()),
            );
            success(format!("User {} created with id {}", user.full_name, user.id));
        }
        UserAction::List => {
            let users = store.list_users()?;
            if users.is_empty() {
                info("No users registered.");
                return Ok(());
            }
            println!("{:>4}  {}  {}  ROLE", "ID", pad_right("NAME", 24), pad_right("EMAIL", 30));
            for u in users {
                println!(
                    "{:>4}  {}  {}  {}",
                    u.id,
                    pad_right(&u.full_name, 24),
                    pad_right(&u.personal_email, 30),
                    u.role.to_db_str()
                );
            }
        }
    }

    Ok(())
}
