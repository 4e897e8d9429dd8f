//! `assista routes`

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use assista_core::error::AppError;
use assista_entity::user::Role;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    view: String,
    path: String,
    roles: String,
}

/// Execute the routes command
pub fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<RouteRow> = ctx
        .routes
        .views()
        .map(|(name, spec)| RouteRow {
            view: name.to_string(),
            path: spec.path.clone(),
            roles: spec.allowed_roles.as_ref().map_or_else(
                || "any".to_string(),
                |roles| roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", "),
            ),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            output::print_list(&rows, format);
            output::print_kv("Login", ctx.routes.login());
            for role in Role::ALL {
                output::print_kv(&format!("Home ({role})"), ctx.routes.home(role));
            }
        }
        OutputFormat::Json => {
            let homes: serde_json::Map<String, serde_json::Value> = Role::ALL
                .iter()
                .map(|role| (role.to_string(), json!(ctx.routes.home(*role))))
                .collect();
            output::print_json(&json!({
                "login": ctx.routes.login(),
                "homes": homes,
                "views": rows,
            }));
        }
    }
    Ok(())
}
