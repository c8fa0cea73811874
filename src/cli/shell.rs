use super::ui;
use crate::controller::ConversionController;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Reads one currency symbol per line until EOF or `quit`.
///
/// Lines starting with `?` list the symbols matching the rest of the line.
pub async fn run<R, W>(
    controller: &mut ConversionController,
    reader: R,
    out: &mut W,
    native_symbol: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "{}",
        ui::style_text(
            "Enter a currency symbol (?PREFIX for suggestions, quit to exit)",
            ui::StyleType::Subtle
        )
    )?;

    let mut lines = reader.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        if let Some(prefix) = input.strip_prefix('?') {
            let suggestions = controller.symbols().suggest(prefix);
            if suggestions.is_empty() {
                writeln!(out, "No matching currency symbols")?;
            } else {
                writeln!(out, "{}", suggestions.join(" "))?;
            }
            continue;
        }

        match controller.submit(input).await {
            Ok(conversion) => writeln!(
                out,
                "1 {} = {} {}",
                native_symbol,
                ui::style_text(&format!("{:.2}", conversion.price), ui::StyleType::TotalValue),
                conversion.symbol
            )?,
            // Already reported through the notifier
            Err(e) => debug!(error = %e, "Submission failed"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Notifier, PriceState, RateSnapshot, RateSource, SharedPrice, SymbolList};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRates(AtomicUsize);

    #[async_trait]
    impl RateSource for CountingRates {
        async fn fetch_latest(&self) -> anyhow::Result<RateSnapshot> {
            self.0.fetch_add(1, Ordering::SeqCst);
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

    async fn run_session(input: &str) -> (String, SharedPrice, usize) {
        let price = SharedPrice::new(1800.0);
        let source = Arc::new(CountingRates(AtomicUsize::new(0)));
        let mut controller = ConversionController::new(
            SymbolList::default(),
            source.clone(),
            Arc::new(price.clone()),
            Arc::new(Silent),
        );
        let mut out = Vec::new();

        run(&mut controller, input.as_bytes(), &mut out, "ETH")
            .await
            .unwrap();

        (
            String::from_utf8(out).unwrap(),
            price,
            source.0.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn test_session_converts_and_suggests() {
        let (output, price, fetches) = run_session("eur\n?gb\n\nzzz\nGBP\n").await;

        assert!(output.contains("1 ETH = "));
        assert!(output.contains("1656.00"));
        assert!(output.contains("> GBP\n"));
        assert!((price.native_price() - 1800.0 * 0.79).abs() < 1e-9);
        assert_eq!(fetches, 1);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let (_, price, fetches) = run_session("quit\nEUR\n").await;

        assert_eq!(price.native_price(), 1800.0);
        assert_eq!(fetches, 0);
    }

    #[tokio::test]
    async fn test_unknown_prefix_has_no_suggestions() {
        let (output, _, _) = run_session("?QQ\n").await;
        assert!(output.contains("No matching currency symbols"));
    }
}
