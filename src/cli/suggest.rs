use crate::core::SymbolList;

pub fn run(symbols: &SymbolList, prefix: &str) {
    let suggestions = symbols.suggest(prefix);
    if suggestions.is_empty() {
        println!("No matching currency symbols");
    } else {
        println!("{}", suggestions.join("\n"));
    }
}
