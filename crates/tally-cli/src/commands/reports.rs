//! Dashboard and insight commands

use std::path::Path;

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{Dashboard, HeroMetrics, MoneyFormat};

use super::transactions::{format_row, table_header};
use super::{load_all_or_empty, truncate, ViewOptions};

const BAR_WIDTH: usize = 30;

/// JSON shape of `tally dashboard --json`
#[derive(Serialize)]
struct DashboardJson<'a> {
    hero: HeroMetrics,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

/// Build the dashboard for the active view, degrading to an empty one
pub fn build_dashboard(db_path: &Path, view: &ViewOptions) -> Dashboard {
    let all = load_all_or_empty(db_path);
    Dashboard::build_with(&all, view.filter, view.today, &view.money)
}

pub fn cmd_dashboard(db_path: &Path, view: &ViewOptions, json: bool) -> Result<()> {
    let dashboard = build_dashboard(db_path, view);

    if json {
        println!("{}", render_dashboard_json(&dashboard)?);
        return Ok(());
    }

    print!("{}", render_dashboard(&dashboard, &view.money));
    Ok(())
}

pub fn cmd_insights(db_path: &Path, view: &ViewOptions) -> Result<()> {
    let dashboard = build_dashboard(db_path, view);

    println!();
    println!("🤖 Insights - {}", dashboard.filter.label());
    println!("   ─────────────────────────────");
    for insight in &dashboard.insights {
        println!("   {}", insight);
    }
    println!();
    Ok(())
}

/// Pretty JSON with the hero metrics alongside the dashboard fields
pub fn render_dashboard_json(dashboard: &Dashboard) -> Result<String> {
    let out = DashboardJson {
        hero: dashboard.hero(),
        dashboard,
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Render the text dashboard
pub fn render_dashboard(dashboard: &Dashboard, money: &MoneyFormat) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    let hero = dashboard.hero();
    let window = match dashboard.range {
        Some((start, end)) => format!("{} ({} to {})", dashboard.filter.label(), start, end),
        None => dashboard.filter.label().to_string(),
    };

    line(String::new());
    line("╭─────────────────────────────────────────╮".to_string());
    line("│            💸 Tally Dashboard            │".to_string());
    line("╰─────────────────────────────────────────╯".to_string());
    line(format!("  📅 {}", window));
    line(String::new());
    line(format!("  💰 Available cash:   {}", money.format(hero.available_cash)));
    line(format!("  🐖 Net savings:      {}", money.format(hero.net_savings)));
    line(format!(
        "  ⚖️  Simple balance:   {}  ({})",
        money.format(hero.simple_balance),
        dashboard.filter.label()
    ));
    line(String::new());

    line("🤖 Insights".to_string());
    line("   ─────────────────────────────".to_string());
    for insight in &dashboard.insights {
        line(format!("   {}", insight));
    }

    if dashboard.is_empty() {
        line(String::new());
        line("No data in this time filter.".to_string());
        return out;
    }

    line(String::new());
    line("🥧 Expenses by category".to_string());
    line("   ─────────────────────────────".to_string());
    if dashboard.expenses_by_category.is_empty() {
        line("   No expenses recorded.".to_string());
    } else {
        let max = dashboard
            .expenses_by_category
            .iter()
            .map(|c| c.total)
            .max()
            .unwrap_or(Decimal::ZERO);
        for c in &dashboard.expenses_by_category {
            line(format!(
                "   {:20} {:>10}  {}",
                truncate(&c.category, 20),
                money.format(c.total),
                bar(c.total, max, BAR_WIDTH)
            ));
        }
    }

    line(String::new());
    line(format!(
        "📊 Expenses over time (by {})",
        dashboard.granularity.as_str()
    ));
    line("   ─────────────────────────────".to_string());
    if dashboard.expense_timeline.is_empty() {
        line("   No expenses recorded.".to_string());
    } else {
        let max = dashboard
            .expense_timeline
            .iter()
            .map(|p| p.total)
            .max()
            .unwrap_or(Decimal::ZERO);
        for p in &dashboard.expense_timeline {
            line(format!(
                "   {:10} {:>10}  {}",
                p.period,
                money.format(p.total),
                bar(p.total, max, BAR_WIDTH)
            ));
        }
    }

    line(String::new());
    line(format!(
        "📝 Transactions ({})",
        dashboard.transactions.len()
    ));
    line("   ─────────────────────────────".to_string());
    line(format!("   {}", table_header()));
    let cents = money.clone().precision(2);
    for (row, tx) in dashboard.transactions.iter().enumerate() {
        line(format!("   {}", format_row(row, tx, &cents)));
    }
    out
}

/// Horizontal bar scaled against `max`; any positive value gets at least one block
pub fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0);
    let blocks = ((ratio * width as f64).round() as usize).max(1);
    "█".repeat(blocks)
}
