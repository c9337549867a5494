//! Crypto panic demo: one run per trigger type

use abm::{CryptoPanicModel, quick_estimate};
use jinn_core::{ParamMap, ShockDescriptor, ShockKind, seeded_rng};
use serde_json::json;

fn main() {
    env_logger::init();
    println!("=== Crypto Panic Simulation ===\n");

    let overrides = match json!({"periods": 20, "btc_initial_price": 50000.0}) {
        serde_json::Value::Object(map) => map,
        _ => ParamMap::new(),
    };
    let model = match CryptoPanicModel::new(&overrides) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Invalid parameters: {}", e);
            return;
        }
    };

    for kind in [
        ShockKind::WhaleDump,
        ShockKind::DogePump,
        ShockKind::ExchangeHalt,
        ShockKind::Regulatory,
    ] {
        let shock = ShockDescriptor::new(kind.clone(), 0.8, 10, 2, 0.25);
        let run = model.run(shock, &mut seeded_rng(Some(42)));
        let summary = &run.summary;

        println!("--- {} ---", kind);
        println!("  BTC return:       {:8.2}%", summary.btc_total_return_pct);
        println!("  BTC max drawdown: {:8.2}%", summary.btc_max_drawdown_pct);
        println!("  ETH return:       {:8.2}%", summary.eth_total_return_pct);
        println!("  DOGE return:      {:8.2}%", summary.doge_total_return_pct);
        println!("  DOGE max pump:    {:8.2}%", summary.doge_max_pump_pct);
        println!("  Max frozen:       {:8}", summary.max_frozen_exchanges);
        println!("  Min liquidity:    {:8.3}", summary.min_exchange_liquidity);
        println!("  Severity:         {:>8}", summary.severity);
        println!("  Market survived:  {:>8}", summary.market_survived);

        let estimate = quick_estimate(50000.0, 3000.0, 0.15, &kind, 0.8);
        println!(
            "  Closed form:      BTC {:+.1}% | freeze risk {:.2}\n",
            estimate.btc_price_change, estimate.exchange_freeze_risk
        );
    }
}
