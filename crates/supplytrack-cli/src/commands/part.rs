//! Part commands
//!
//! Usage: supplytrack part <add|list|update|delete>

use clap::{Args, Subcommand};
use supplytrack_core::rules::validation::{
    format_date, parse_date, parse_optional_date, validate_new_part, validate_part_update,
};
use supplytrack_core::{DeliveryStatus, NewPart, OrderId, PartId, PartUpdate};
use supplytrack_store::OrderStore;

#[derive(Debug, Args)]
pub struct PartArgs {
    #[command(subcommand)]
    pub command: PartCommand,
}

#[derive(Debug, Subcommand)]
pub enum PartCommand {
    /// Add a part to an order
    Add(AddArgs),
    /// List the parts of an order
    List(ListArgs),
    /// Update a part; blank dates keep their stored value
    Update(UpdateArgs),
    /// Delete a part
    Delete(DeleteArgs),
}

/// Selects an order by id or by name
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OrderSelector {
    /// Order id
    #[arg(long)]
    pub order: Option<OrderId>,

    /// Order name; the oldest order with this name is used
    #[arg(long)]
    pub order_name: Option<String>,
}

impl OrderSelector {
    fn resolve(&self, store: &OrderStore) -> Result<OrderId, Box<dyn std::error::Error>> {
        match (&self.order, &self.order_name) {
            (Some(id), _) => Ok(*id),
            (None, Some(name)) => store
                .find_order_id(name)?
                .ok_or_else(|| format!("no order named '{}'", name).into()),
            (None, None) => Err("an order id or order name is required".into()),
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub order: OrderSelector,

    /// Part name
    pub name: String,

    #[arg(long)]
    pub supplier: String,

    /// Planned delivery date (yyyy-MM-dd)
    #[arg(long)]
    pub planned: String,

    /// Actual delivery date (yyyy-MM-dd); leave out while undelivered
    #[arg(long, default_value = "")]
    pub actual: String,

    /// Delivery status, e.g. "delivered" or "not delivered"
    #[arg(long, default_value = DeliveryStatus::NOT_DELIVERED)]
    pub status: DeliveryStatus,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub order: OrderSelector,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub part_id: PartId,

    /// New part name; keeps the current name when left out
    #[arg(long)]
    pub name: Option<String>,

    /// New supplier; keeps the current supplier when left out
    #[arg(long)]
    pub supplier: Option<String>,

    /// Planned delivery date; blank keeps the stored date
    #[arg(long, default_value = "")]
    pub planned: String,

    /// Actual delivery date; blank keeps the stored date
    #[arg(long, default_value = "")]
    pub actual: String,

    /// New delivery status; keeps the current status when left out
    #[arg(long)]
    pub status: Option<DeliveryStatus>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub part_id: PartId,
}

/// Execute part command
pub fn execute(args: PartArgs, store: &mut OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        PartCommand::Add(add) => execute_add(add, store),
        PartCommand::List(list) => execute_list(list, store),
        PartCommand::Update(update) => execute_update(update, store),
        PartCommand::Delete(delete) => execute_delete(delete, store),
    }
}

fn execute_add(args: AddArgs, store: &mut OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let part = NewPart {
        order_id: args.order.resolve(store)?,
        name: args.name,
        supplier: args.supplier,
        planned_date: parse_date(&args.planned)?,
        actual_date: parse_optional_date(&args.actual)?,
        status: args.status,
    };
    validate_new_part(&part)?;

    let part_id = store.add_part(&part)?;
    let stored = store
        .get_part(part_id)?
        .ok_or_else(|| format!("part {} vanished after insert", part_id))?;
    println!(
        "✓ Added part {} to order {} (deviation {:.2})",
        part_id, part.order_id, stored.deviation
    );
    Ok(())
}

fn execute_list(args: ListArgs, store: &OrderStore) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = args.order.resolve(store)?;
    let parts = store.list_parts(order_id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parts)?);
        return Ok(());
    }

    for part in parts {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}",
            part.id,
            part.name,
            part.supplier,
            format_date(part.planned_date),
            part.actual_date.map(format_date).unwrap_or_default(),
            part.status,
            part.deviation
        );
    }
    Ok(())
}

fn execute_update(
    args: UpdateArgs,
    store: &mut OrderStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = store
        .get_part(args.part_id)?
        .ok_or_else(|| format!("part {} not found", args.part_id))?;

    let update = PartUpdate {
        name: args.name.unwrap_or(current.name),
        supplier: args.supplier.unwrap_or(current.supplier),
        planned_date: parse_optional_date(&args.planned)?,
        actual_date: parse_optional_date(&args.actual)?,
        status: args.status.unwrap_or(current.status),
    };
    validate_part_update(&update)?;

    store.update_part(args.part_id, &update)?;
    let stored = store
        .get_part(args.part_id)?
        .ok_or_else(|| format!("part {} vanished after update", args.part_id))?;
    println!(
        "✓ Updated part {} (deviation {:.2})",
        args.part_id, stored.deviation
    );
    Ok(())
}

fn execute_delete(
    args: DeleteArgs,
    store: &mut OrderStore,
) -> Result<(), Box<dyn std::error::Error>> {
    store.delete_part(args.part_id)?;
    println!("✓ Deleted part {}", args.part_id);
    Ok(())
}
