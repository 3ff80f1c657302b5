//! Text rendering of the views

use crate::customers::{format_price, LedgerRow};
use crate::shifts::{Pager, ShiftState};
use crate::types::{Order, Product, Shift, ShiftSummary};

/// Lay out rows under headers with columns padded to the widest cell
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = vec![padded_line(headers, &widths)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(padded_line(&cells, &widths));
    }
    out.join("\n")
}

fn padded_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

pub fn ledger_table(rows: &[LedgerRow]) -> String {
    if rows.is_empty() {
        return "Žádní zákazníci".to_string();
    }
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.customer.name.clone(),
                row.summary.last_order_date.clone(),
                row.summary.total_price.clone(),
            ]
        })
        .collect();
    table(&["Zákazník", "Poslední objednávka", "Dluží"], &rows)
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "ano" } else { "ne" };
    label.to_string()
}

/// The order table shown under an expanded shift
pub fn order_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "Žádné objednávky".to_string();
    }
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|order| {
            vec![
                order.id.clone(),
                order.date.clone(),
                order.customer.clone(),
                order.products_label(),
                format_price(order.total_price),
                order.payment_method.clone().unwrap_or_else(|| "-".to_string()),
                yes_no(order.payed),
                if order.cancelled { "obnovit" } else { "zrušit" }.to_string(),
            ]
        })
        .collect();
    table(
        &["ID", "Datum", "Zákazník", "Položky", "Cena", "Platba", "Zaplaceno", "Akce"],
        &rows,
    )
}

pub fn shift_page(shifts: &[Shift], pager: &Pager, expanded: Option<&str>) -> String {
    let mut out = String::new();

    if shifts.is_empty() {
        out.push_str("Žádné směny");
    } else {
        let rows: Vec<Vec<String>> = shifts
            .iter()
            .map(|shift| {
                let marker = if expanded == Some(shift.id.as_str()) { "▾" } else { "▸" };
                vec![
                    format!("{} {}", marker, shift.id),
                    shift.bartender.clone(),
                    shift.start_time.clone(),
                    shift.end_time.clone().unwrap_or_else(|| "probíhá".to_string()),
                    shift.order_count.to_string(),
                ]
            })
            .collect();
        out.push_str(&table(&["Směna", "Barman", "Začátek", "Konec", "Objednávky"], &rows));

        if let Some(shift) = expanded.and_then(|id| shifts.iter().find(|s| s.id == id)) {
            out.push_str(&format!("\n\nObjednávky směny {}:\n", shift.id));
            out.push_str(&order_table(&shift.order_items));
        }
    }

    let prev = if pager.prev_disabled() { "[ ‹ ]" } else { "[‹ p]" };
    let next = if pager.next_disabled() { "[ › ]" } else { "[n ›]" };
    out.push_str(&format!(
        "\n\n{} Strana {} z {} {}",
        prev,
        pager.current_page(),
        pager.total_pages(),
        next
    ));
    out
}

pub fn shift_summary(summary: &ShiftSummary) -> String {
    table(
        &["Souhrn směny", "Částka"],
        &[
            vec!["Celkem".to_string(), format_price(summary.total_revenue)],
            vec!["Hotově".to_string(), format_price(summary.cash_revenue)],
            vec!["Kartou".to_string(), format_price(summary.card_revenue)],
            vec!["Na účet".to_string(), format_price(summary.employee_account_revenue)],
        ],
    )
}

pub fn shift_status(state: &ShiftState) -> String {
    match state {
        ShiftState::NoActiveShift => "Žádná aktivní směna".to_string(),
        ShiftState::ShiftActive { shift_id, bartender } => {
            format!("Aktivní směna #{} (barman: {})", shift_id, bartender)
        }
    }
}

pub fn products_table(products: &[Product]) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| vec![p.id.clone(), p.name.clone(), format_price(p.price), p.quantity.to_string()])
        .collect();
    table(&["ID", "Produkt", "Cena", "Skladem"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::OrderSummary;
    use crate::types::Customer;

    #[test]
    fn test_table_pads_columns() {
        let out = table(
            &["A", "Bee"],
            &[vec!["long cell".to_string(), "x".to_string()]],
        );
        assert_eq!(out, "A         | Bee\n----------+----\nlong cell | x");
    }

    #[test]
    fn test_ledger_table_shows_sentinels() {
        let rows = vec![LedgerRow {
            customer: Customer::new("Jana Novak"),
            summary: OrderSummary::failed(),
        }];
        let out = ledger_table(&rows);
        assert!(out.contains("Jana Novak"));
        assert!(out.contains("Chyba"));
    }

    #[test]
    fn test_shift_summary_lists_every_revenue() {
        let out = shift_summary(&ShiftSummary {
            total_revenue: 1500.0,
            cash_revenue: 1000.0,
            card_revenue: 400.0,
            employee_account_revenue: 100.0,
        });
        for expected in ["1500.00 Kč", "1000.00 Kč", "400.00 Kč", "100.00 Kč"] {
            assert!(out.contains(expected), "missing {}", expected);
        }
    }
}
