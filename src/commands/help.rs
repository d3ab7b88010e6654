pub fn execute() -> String {
    [
        "📖 Fraud Guardian Commands",
        "",
        "  summary [refresh]        Totals, suspicious/normal split and spending trend",
        "  history [refresh|latest] Transaction history, newest first",
        "  alerts [server]          Suspicious transactions only",
        "  check                    Re-score the latest transaction",
        "  send <sender balance> <receiver balance> <amount> <payment type>",
        "                           Score a new transfer (types: UPI, transfer, debit, cashin, cashout)",
        "  chart <output.png>       Save the spending trend as a PNG chart",
        "  theme [toggle]           Show or switch light/dark mode",
        "  clear                    Delete all stored transactions",
        "  help                     Show this message",
        "  quit                     Exit",
    ]
    .join("\n")
}
