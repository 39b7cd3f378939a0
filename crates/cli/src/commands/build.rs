//! Custom PC build planner commands.

use clap::Args;

use voltpeak_core::ProductId;
use voltpeak_storefront::planner::{slot_options, BuildPlan, BuildSlot};
use voltpeak_storefront::state::StorefrontApp;

#[derive(Args)]
pub struct BuildArgs {
    /// List the selectable parts for one slot
    /// (cpu, motherboard, gpu, ram, storage, psu, case)
    #[arg(long)]
    pub options: Option<String>,

    /// Pick parts as `slot=product-id` pairs, repeatable
    #[arg(long = "part", value_name = "SLOT=ID")]
    pub parts: Vec<String>,
}

fn parse_slot(name: &str) -> Result<BuildSlot, String> {
    match name.to_ascii_lowercase().as_str() {
        "cpu" => Ok(BuildSlot::Cpu),
        "motherboard" | "mainboard" | "mb" => Ok(BuildSlot::Motherboard),
        "gpu" => Ok(BuildSlot::Gpu),
        "ram" => Ok(BuildSlot::Ram),
        "storage" | "ssd" | "hdd" => Ok(BuildSlot::Storage),
        "psu" => Ok(BuildSlot::Psu),
        "case" => Ok(BuildSlot::Case),
        other => Err(format!("unknown build slot: {other}")),
    }
}

pub async fn build(app: &StorefrontApp, args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(slot_name) = args.options {
        let slot = parse_slot(&slot_name)?;
        let options = slot_options(app.client(), slot).await?;

        println!("{}:", slot.label());
        if options.is_empty() {
            println!("  no products in this category");
        }
        for product in options {
            println!("  {}  {}  {}", product.id, product.price, product.name);
        }
        return Ok(());
    }

    if args.parts.is_empty() {
        for slot in BuildSlot::ALL {
            println!("{}", slot.label());
        }
        println!("\npick parts with --part slot=product-id");
        return Ok(());
    }

    let mut plan = BuildPlan::new();
    for pair in &args.parts {
        let (slot_name, id) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected slot=product-id, got {pair}"))?;
        let slot = parse_slot(slot_name)?;
        let product = app.client().get_product(&ProductId::new(id)).await?;
        println!("{:<32} {}  {}", slot.label(), product.price, product.name);
        plan.select(slot, product);
    }

    println!("\nparts:   {}/7", plan.filled_count());
    println!("total:   {}", plan.total_price());
    if plan.is_overload() {
        println!("warning: extreme configuration (over 100k)");
    }
    Ok(())
}
