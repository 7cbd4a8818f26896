//! Backend health check command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Probe the backend's `/health` endpoint and report the result.
///
/// Exits with an error when the backend is unreachable or unhealthy.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let health = state.transport().health().await;
    let healthy = matches!(&health, Ok(h) if h.status == "healthy");

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "api_url": state.api_url,
            "data_dir": state.data_dir.display().to_string(),
            "stale_replies": state.config.stale_replies,
            "backend": match &health {
                Ok(h) => serde_json::json!({ "status": h.status }),
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            },
            "healthy": healthy,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!();
        println!(
            "  {} JournaLLM v{}",
            style("*").cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!();
        println!("  {}  {}", style("Backend:").bold(), style(&state.api_url).dim());
        match &health {
            Ok(h) if healthy => {
                println!("  {} {}", style("✓").green(), h.status);
            }
            Ok(h) => {
                println!("  {} unexpected status '{}'", style("✗").red(), h.status);
            }
            Err(e) => {
                println!("  {} {e}", style("✗").red());
            }
        }
        println!();
    }

    if !healthy {
        anyhow::bail!("backend at {} is not healthy", state.api_url);
    }
    Ok(())
}
