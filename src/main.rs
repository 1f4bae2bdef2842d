use anyhow::Context;
use spotx::core::config::{Credentials, ExchangeConfig};
use spotx::core::traits::{AccountInfo, MarketDataSource};
use spotx::{build_connector, Order};

fn load_config() -> anyhow::Result<ExchangeConfig> {
    // An explicit credentials file wins over the environment.
    if let Some(path) = std::env::args().nth(2) {
        let credentials = Credentials::from_json_file(&path)
            .with_context(|| format!("loading credentials from {}", path))?;
        return Ok(ExchangeConfig {
            credentials,
            ..ExchangeConfig::read_only()
        });
    }

    #[cfg(feature = "env-file")]
    let loaded = ExchangeConfig::from_env_file("BINANCE");
    #[cfg(not(feature = "env-file"))]
    let loaded = ExchangeConfig::from_env("BINANCE");

    Ok(loaded.unwrap_or_else(|e| {
        tracing::warn!("{}; continuing with public endpoints only", e);
        ExchangeConfig::read_only()
    }))
}

fn print_order(label: &str, order: &Order) -> anyhow::Result<()> {
    println!(
        "Order <{}>: {} {} {} {} {} {} {} {}",
        label,
        order.symbol,
        order.order_id,
        order.quantity,
        order.price,
        order.notional()?,
        order.side,
        order.status,
        order.timestamp
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "VETUSDT".to_string());
    let binance = build_connector(load_config()?)?;

    binance.ping().await?;
    println!("Server ping - <OK>");
    println!("Server DateTime - {}", binance.server_datetime().await?);
    println!("Server Timestamp(ms) - {}", binance.server_time().await?);
    println!("Clock skew(ms) - {}", binance.clock_skew().await?);
    println!(
        "Server PingTime(ms) - {}",
        binance.ping_latency().await?.as_millis()
    );
    println!("Price <{}> - <{}>", symbol, binance.price_of(&symbol).await?);

    if !binance.can_authenticate() {
        return Ok(());
    }

    let balance = binance.account_balance().await?;
    for (asset, entry) in balance.iter() {
        println!(
            "Balance <{}>: free: <{}> locked: <{}>",
            asset, entry.free, entry.locked
        );
    }

    for order in binance.open_orders(&symbol).await? {
        print_order("Open", &order)?;
    }

    for order in binance.all_orders(&symbol).await? {
        print_order("List", &order)?;
        let commission = binance.order_commission(&order.symbol, order.order_id).await?;
        for (asset, amount) in commission.iter() {
            println!("Commission: {} {}", asset, amount);
        }
    }

    Ok(())
}
