use serde::Serialize;
use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a serializable payload; text mode uses the given renderer
pub fn output_data<T, F>(output_format: &OutputFormat, data: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": true,
                "data": data
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", text(data));
        }
    }
    Ok(())
}

/// Output raw text (HTML, CSS) or wrap it as JSON
pub fn output_raw(output_format: &OutputFormat, field: &str, body: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": true,
                field: body
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", body);
        }
    }
    Ok(())
}
