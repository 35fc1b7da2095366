use std::io;
use std::sync::Arc;

use anyhow::Context;

use agrismart_storefront::{ShopperSession, StorefrontConfig, Terminal, TextRenderer};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("failed to read storefront configuration")?;
    agrismart_observability::init(config.log_format);

    let catalog = config.load_catalog().context("failed to load catalog")?;
    tracing::info!(products = catalog.len(), currency = %config.currency, "marketplace starting");

    let session = ShopperSession::new(Arc::new(catalog));
    let renderer = TextRenderer::new(config.currency_formatter());

    let stdin = io::stdin();
    let mut terminal = Terminal::new(session, renderer, stdin.lock(), io::stdout());
    terminal.run().context("terminal session failed")?;

    tracing::info!("marketplace stopped");
    Ok(())
}
