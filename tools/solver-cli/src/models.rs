//! Wire models for batch instances and solution reports

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use types::execution::Settlement;
use types::ids::{OrderId, TokenId, TokenPair};
use types::numeric::{Amount, Rate};
use types::order::Order;

/// Batch instance as ingested from JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInstance {
    pub base_token: String,
    pub quote_token: String,
    pub orders: Vec<OrderSpec>,
}

/// One order of the instance; amounts and prices are strings so that exact
/// rational and decimal literals survive JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpec {
    pub id: String,
    pub buy_token: String,
    pub sell_token: String,
    pub max_sell_amount: String,
    pub limit_price: String,
}

impl BatchInstance {
    /// Convert the instance into domain records, validating as we go
    pub fn to_domain(&self) -> anyhow::Result<(TokenPair, Vec<Order>)> {
        let pair = TokenPair::try_new(
            TokenId::new(&self.base_token),
            TokenId::new(&self.quote_token),
        )
        .ok_or_else(|| anyhow!("base and quote token must differ"))?;

        let mut orders = Vec::with_capacity(self.orders.len());
        for spec in &self.orders {
            let max_sell: Amount = spec
                .max_sell_amount
                .parse()
                .with_context(|| format!("order {}: bad maxSellAmount", spec.id))?;
            let limit_price: Rate = spec
                .limit_price
                .parse()
                .with_context(|| format!("order {}: bad limitPrice", spec.id))?;
            orders.push(Order::new(
                OrderId::new(&spec.id),
                TokenId::new(&spec.buy_token),
                TokenId::new(&spec.sell_token),
                max_sell,
                limit_price,
            )?);
        }

        Ok((pair, orders))
    }
}

/// Emitted solution artifact
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SolutionReport {
    Match { settlement: Settlement },
    NoMatch,
}
