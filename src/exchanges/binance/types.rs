use serde::Deserialize;

/// Error body returned with non-200 responses, e.g. `{"code":-1121,"msg":"Invalid symbol."}`
#[derive(Debug, Deserialize)]
pub struct BinanceApiError {
    pub code: i32,
    pub msg: String,
}

#[derive(Debug, Deserialize)]
pub struct BinanceServerTime {
    #[serde(rename = "serverTime", default)]
    pub server_time: u64,
}

#[derive(Debug, Deserialize)]
pub struct BinanceTickerPrice {
    pub symbol: Option<String>,
    pub price: Option<String>,
}

// Every field is optional: creation, query and cancel responses each carry a
// slightly different subset.
#[derive(Debug, Default, Deserialize)]
pub struct BinanceOrder {
    pub symbol: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<u64>,
    pub price: Option<String>,
    #[serde(rename = "origQty")]
    pub orig_qty: Option<String>,
    pub side: Option<String>,
    pub status: Option<String>,
    pub time: Option<u64>,
    #[serde(rename = "transactTime")]
    pub transact_time: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BinanceAccountInfo {
    #[serde(default)]
    pub balances: Vec<BinanceBalance>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BinanceBalance {
    pub asset: Option<String>,
    pub free: Option<String>,
    pub locked: Option<String>,
}

/// One fill from `/api/v3/myTrades`
#[derive(Debug, Default, Deserialize)]
pub struct BinanceTrade {
    pub commission: Option<String>,
    #[serde(rename = "commissionAsset")]
    pub commission_asset: Option<String>,
}
