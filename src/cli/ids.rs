//! Handler for the `ids` command.

use tabled::{Table, Tabled};

use crate::cli::{output, IdsArgs};
use crate::domain::{ClientOrderIdSequencer, TradeCode};
use crate::error::Result;

#[derive(Tabled)]
struct IdRow {
    #[tabled(rename = "Client Order Id")]
    client_order_id: u64,
    #[tabled(rename = "Trade Code")]
    trade_code: String,
}

/// Execute `ids`.
pub fn execute(args: &IdsArgs) -> Result<()> {
    let sequencer = ClientOrderIdSequencer::new();
    let rows: Vec<IdRow> = (0..args.count)
        .map(|_| IdRow {
            client_order_id: sequencer.next().value(),
            trade_code: TradeCode::with_prefix(&args.prefix, args.length).to_string(),
        })
        .collect();

    output::section("Generated ids");
    output::table(&Table::new(rows).to_string());
    Ok(())
}
