//! Order commands
//!
//! Usage: supplytrack order <add|list|show|delete>

use clap::{Args, Subcommand};
use supplytrack_core::rules::validation::{
    format_date, parse_amount, parse_date, validate_new_order,
};
use supplytrack_core::{NewOrder, OrderId};
use supplytrack_store::OrderStore;

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Create an order
    Add(AddArgs),
    /// List orders
    List(ListArgs),
    /// Show one order with its parts
    Show(ShowArgs),
    /// Delete an order and all of its parts
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Order name
    pub name: String,

    #[arg(long)]
    pub customer: String,

    /// Delivery date (yyyy-MM-dd)
    #[arg(long)]
    pub delivery_date: String,

    #[arg(long)]
    pub salesperson: String,

    /// Order amount; leave out or pass "" when unknown
    #[arg(long, default_value = "")]
    pub amount: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub order_id: OrderId,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub order_id: OrderId,
}

/// Execute order command
pub fn execute(args: OrderArgs, store: &mut OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        OrderCommand::Add(add) => execute_add(add, store),
        OrderCommand::List(list) => execute_list(list, store),
        OrderCommand::Show(show) => execute_show(show, store),
        OrderCommand::Delete(delete) => execute_delete(delete, store),
    }
}

fn execute_add(args: AddArgs, store: &mut OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let order = NewOrder {
        name: args.name,
        customer: args.customer,
        delivery_date: parse_date(&args.delivery_date)?,
        salesperson: args.salesperson,
        amount: parse_amount(&args.amount)?,
    };
    validate_new_order(&order)?;

    let order_id = store.add_order(&order)?;
    println!("✓ Added order {} ({})", order_id, order.name);
    Ok(())
}

fn execute_list(args: ListArgs, store: &OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let orders = store.list_order_records()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    for order in orders {
        let amount = order
            .amount
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            order.id,
            order.name,
            order.customer,
            format_date(order.delivery_date),
            order.salesperson,
            amount
        );
    }
    Ok(())
}

fn execute_show(args: ShowArgs, store: &OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let order = store
        .get_order(args.order_id)?
        .ok_or_else(|| format!("order {} not found", args.order_id))?;

    println!("Order {}: {}", order.id, order.name);
    println!("  customer:      {}", order.customer);
    println!("  delivery date: {}", format_date(order.delivery_date));
    println!("  salesperson:   {}", order.salesperson);
    if let Some(amount) = order.amount {
        println!("  amount:        {:.2}", amount);
    }

    let parts = store.list_parts(order.id)?;
    println!("  parts:         {}", parts.len());
    for part in parts {
        println!(
            "    {}\t{}\t{}\tdeviation {:.2}",
            part.id, part.name, part.status, part.deviation
        );
    }
    Ok(())
}

fn execute_delete(
    args: DeleteArgs,
    store: &mut OrderStore,
) -> Result<(), Box<dyn std::error::Error>> {
    store.delete_order(args.order_id)?;
    println!("✓ Deleted order {} and its parts", args.order_id);
    Ok(())
}
