//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use mutant_io::resolve_param;
use mutant_synth::{ParamDescriptor, ParamKey};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter (name or index)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.param {
        let key = resolve_param(name)?;
        print_detail(key);
        return Ok(());
    }

    println!("Voice Parameters");
    println!("================");
    println!();
    println!(
        "  {:5}  {:18}  {:12}  {:>7}  {}",
        "Index", "Name", "Group", "Default", "Range"
    );
    println!(
        "  {:5}  {:18}  {:12}  {:>7}  {}",
        "-----", "----", "-----", "-------", "-----"
    );

    for key in ParamKey::ALL {
        let desc = key.descriptor();
        println!(
            "  {:5}  {:18}  {:12}  {:>7}  {}",
            key.index(),
            key.name(),
            desc.group,
            desc.default,
            range_label(&desc)
        );
    }

    println!();
    println!("Use 'mutant params <name>' for details, and");
    println!("'mutant render out.wav --param <name>=<value>' to set one.");

    Ok(())
}

fn print_detail(key: ParamKey) {
    let desc = key.descriptor();
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  index:    {}", key.index());
    println!("  name:     {}", key.name());
    println!("  id:       {}", desc.id.0);
    println!("  group:    {}", desc.group);
    println!("  range:    {}", range_label(&desc));
    println!("  default:  {}{}", desc.default, desc.unit.suffix());
    if !desc.is_writable() {
        println!();
        println!("  Derived from filter_shape; writes are ignored.");
    }
}

fn range_label(desc: &ParamDescriptor) -> String {
    let mut label = format!("{}..={}{}", desc.min, desc.max, desc.unit.suffix());
    if !desc.is_writable() {
        label.push_str(" (read-only)");
    }
    label
}
