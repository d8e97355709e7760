//! Implementation of the `fieldcopy fields` command.

use crate::cli::FieldsArgs;
use fieldcopy::error::{FieldcopyError, Result};
use fieldcopy::template::Template;

/// Execute the `fieldcopy fields` command.
pub fn cmd_fields(args: FieldsArgs) -> Result<()> {
    let output = format_fields(&args.template, args.json)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn format_fields(source: &str, json: bool) -> Result<String> {
    let template = Template::parse(source);
    let fields = template.fields();

    if json {
        serde_json::to_string(&fields)
            .map_err(|e| FieldcopyError::UserError(format!("failed to encode fields: {}", e)))
    } else {
        Ok(fields.join("\n"))
    }
}
