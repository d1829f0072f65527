use anyhow::{Context, Result};

use facet_metamodel_core::ValueType;

pub fn value_command(value_type: &str, text: &str) -> Result<()> {
    let value_type: ValueType =
        serde_json::from_value(serde_json::Value::String(value_type.to_string()))
            .with_context(|| format!("Unknown value type '{value_type}'"))?;
    let semantics = value_type.semantics();

    let Some(value) = semantics.parse_text_entry(text)? else {
        println!("📭 No value ({value_type})");
        return Ok(());
    };
    println!("📦 Type:    {value_type}");
    println!("🏷️  Title:   {}", semantics.title(Some(&value)));
    println!("🔐 Encoded: {}", semantics.encode(&value)?);
    Ok(())
}
