use crate::commands::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<String, String> {
    ctx.theme.load_persisted().await;

    match args.first().map(|a| a.to_lowercase()) {
        None => Ok(format!("🎨 Theme: {}", ctx.theme.mode())),
        Some(arg) if arg == "toggle" => match ctx.theme.toggle().await {
            Ok(mode) => Ok(format!("🎨 Theme switched to {}", mode)),
            // The switch still applies for this session
            Err(e) => Ok(format!("🎨 Theme switched to {} (not saved: {})", ctx.theme.mode(), e)),
        },
        Some(other) => Err(format!("Unknown option '{}'. Usage: `theme [toggle]`", other)),
    }
}
