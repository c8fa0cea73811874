use super::ui;
use crate::controller::{Conversion, ConversionController, UserError};
use crate::core::currency::normalize;
use anyhow::Result;
use comfy_table::Cell;

/// Submits each symbol in order within one session.
pub async fn convert_all(
    controller: &mut ConversionController,
    symbols: &[String],
) -> Vec<(String, Result<Conversion, UserError>)> {
    let mut results = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let result = controller.submit(symbol).await;
        results.push((symbol.clone(), result));
    }
    results
}

pub fn display_as_table(
    results: &[(String, Result<Conversion, UserError>)],
    native_symbol: &str,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Rate (per USD)"),
        ui::header_cell(&format!("{native_symbol} (USD)")),
        ui::header_cell(&format!("{native_symbol} (converted)")),
    ]);

    for (input, result) in results {
        match result {
            Ok(conversion) => {
                table.add_row(vec![
                    Cell::new(conversion.symbol.as_str()),
                    ui::number_cell(format!("{:.4}", conversion.rate)),
                    ui::number_cell(format!("{:.2}", conversion.base_price)),
                    ui::number_cell(format!("{:.2} {}", conversion.price, conversion.symbol)),
                ]);
            }
            Err(_) => {
                table.add_row(vec![
                    Cell::new(normalize(input)),
                    ui::na_cell(true),
                    ui::na_cell(true),
                    ui::na_cell(true),
                ]);
            }
        }
    }

    let mut output = table.to_string();
    let errors: Vec<String> = results
        .iter()
        .filter_map(|(_, r)| r.as_ref().err())
        .map(|e| ui::style_text(&e.to_string(), ui::StyleType::Error))
        .collect();
    if !errors.is_empty() {
        output.push_str("\n\n");
        output.push_str(&errors.join("\n"));
    }
    output
}

pub async fn run(
    controller: &mut ConversionController,
    symbols: &[String],
    native_symbol: &str,
) -> Result<()> {
    let results = convert_all(controller, symbols).await;
    println!("{}", display_as_table(&results, native_symbol));

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} currency switches failed", failed, results.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Notifier, PriceState, RateSnapshot, RateSource, SharedPrice, SymbolList};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticRates;

    #[async_trait]
    impl RateSource for StaticRates {
        async fn fetch_latest(&self) -> anyhow::Result<RateSnapshot> {
            Ok(RateSnapshot {
                rates: [("EUR".to_string(), 0.92), ("GBP".to_string(), 0.79)]
                    .into_iter()
                    .collect(),
                next_update_unix: i64::MAX,
            })
        }
    }

    struct Silent;

    impl Notifier for Silent {
        fn success(&self, _: &str) {}
        fn error(&self, _: &str) {}
    }

    fn controller(price: &SharedPrice) -> ConversionController {
        ConversionController::new(
            SymbolList::default(),
            Arc::new(StaticRates),
            Arc::new(price.clone()),
            Arc::new(Silent),
        )
    }

    #[tokio::test]
    async fn test_convert_all_keeps_going_after_errors() {
        let price = SharedPrice::new(1800.0);
        let mut controller = controller(&price);
        let symbols = vec!["eur".to_string(), "zzz".to_string(), "GBP".to_string()];

        let results = convert_all(&mut controller, &symbols).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(UserError::InvalidSymbol(_))));
        assert!(results[2].1.is_ok());
        assert!((price.native_price() - 1800.0 * 0.79).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_table_lists_each_submission() {
        let price = SharedPrice::new(1800.0);
        let mut controller = controller(&price);
        let symbols = vec!["EUR".to_string(), "zzz".to_string()];

        let results = convert_all(&mut controller, &symbols).await;
        let output = display_as_table(&results, "ETH");

        assert!(output.contains("ETH (converted)"));
        assert!(output.contains("1656.00 EUR"));
        assert!(output.contains("ZZZ"));
        assert!(output.contains("Invalid currency symbol: ZZZ"));
    }

    #[tokio::test]
    async fn test_run_fails_when_any_submission_fails() {
        let price = SharedPrice::new(1800.0);
        let mut controller = controller(&price);

        let result = run(&mut controller, &["EUR".to_string(), "CHF".to_string()], "ETH").await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "1 of 2 currency switches failed"
        );
    }
}
