//! Diagnostic: read a DXF file and print what was found in it.
//!
//! Usage: diag_entity_types <file.dxf> [--strict]

use anyhow::{bail, Context};
use dxfdoc::{DxfParser, DxfParserConfiguration};

fn main() -> anyhow::Result<()> {
    let mut path = None;
    let mut strict = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => strict = true,
            _ if path.is_none() => path = Some(arg),
            _ => bail!("unexpected argument '{}'", arg),
        }
    }
    let Some(path) = path else {
        bail!("usage: diag_entity_types <file.dxf> [--strict]");
    };

    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path))?;
    let config = DxfParserConfiguration {
        failsafe: !strict,
        ..Default::default()
    };
    let doc = DxfParser::new()
        .with_configuration(config)
        .parse_bytes(&bytes)
        .with_context(|| format!("parsing {}", path))?;

    println!("=== {} ===", path);
    if let Some(version) = doc.header_value("ACADVER").and_then(|v| v.as_str()) {
        println!("  version:  {}", version);
    }
    println!("  layers:   {}", doc.layers().len());
    println!("  ltypes:   {}", doc.tables().line_type.line_types.len());
    println!("  handles:  {}", doc.handles().len());

    println!("\n  Blocks ({}):", doc.blocks().len());
    for (name, block) in doc.blocks() {
        println!("    {:<30} entities={}", name, block.entities.len());
    }

    println!("\n  Entities ({}):", doc.entities().len());
    for (type_name, count) in doc.entity_type_counts() {
        println!("    {:<30} {}", type_name, count);
    }

    if !doc.notifications().is_empty() {
        println!("\n  Notifications ({}):", doc.notifications().len());
        for notification in doc.notifications() {
            println!("    {}", notification);
        }
    }

    Ok(())
}
