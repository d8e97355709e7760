//! Implementation of the `fieldcopy render` command.

use crate::cli::RenderArgs;
use fieldcopy::error::{FieldcopyError, Result};
use fieldcopy::fixture::render_value;
use fieldcopy::template::Template;
use std::collections::HashMap;
use std::path::Path;

/// Execute the `fieldcopy render` command.
pub fn cmd_render(args: RenderArgs) -> Result<()> {
    println!("{}", render(args)?);
    Ok(())
}

/// Render the template with values from `--values`, overridden by `--set`.
fn render(args: RenderArgs) -> Result<String> {
    let mut values = match &args.values {
        Some(path) => load_values(path)?,
        None => HashMap::new(),
    };
    values.extend(args.set);

    let template = Template::parse(args.template);
    Ok(template.replace(&values)?)
}

/// Load a YAML mapping of field names to values.
fn load_values(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FieldcopyError::UserError(format!(
            "failed to read values file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_values(&content)
}

fn parse_values(yaml: &str) -> Result<HashMap<String, String>> {
    let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)
        .map_err(|e| FieldcopyError::UserError(format!("failed to parse values YAML: {}", e)))?;

    mapping
        .iter()
        .map(|(key, value)| {
            let name = key.as_str().ok_or_else(|| {
                FieldcopyError::UserError(format!("value names must be strings, got {:?}", key))
            })?;
            let rendered = render_value(value).map_err(|reason| {
                FieldcopyError::UserError(format!("cannot render value '{}': {}", name, reason))
            })?;
            Ok::<_, FieldcopyError>((name.to_string(), rendered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_values_renders_scalars() {
        let values = parse_values("tenant: 666\nnonna: \"888\"\nflag: true\n").unwrap();
        assert_eq!(values["tenant"], "666");
        assert_eq!(values["nonna"], "888");
        assert_eq!(values["flag"], "true");
    }

    #[test]
    fn test_parse_values_rejects_non_mapping() {
        assert!(parse_values("- a\n- b\n").is_err());
    }

    #[test]
    fn test_render_missing_field() {
        let args = RenderArgs {
            template: "test {tenant} sample {nonna}".to_string(),
            set: vec![("tenant".to_string(), "666".to_string())],
            values: None,
        };
        let err = render(args).unwrap_err();
        assert!(matches!(err, FieldcopyError::Template(_)));
        assert_eq!(err.exit_code(), fieldcopy::exit_codes::TEMPLATE_FAILURE);
    }

    #[test]
    fn test_render_set_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values.yaml");
        std::fs::write(&path, "a: from-file\nb: 2\n").unwrap();

        let args = RenderArgs {
            template: "{a}/{b}".to_string(),
            set: vec![("a".to_string(), "from-flag".to_string())],
            values: Some(path),
        };
        assert_eq!(render(args).unwrap(), "from-flag/2");
    }

    #[test]
    fn test_render_later_set_wins() {
        let args = RenderArgs {
            template: "{a}".to_string(),
            set: vec![
                ("a".to_string(), "first".to_string()),
                ("a".to_string(), "second".to_string()),
            ],
            values: None,
        };
        assert_eq!(render(args).unwrap(), "second");
    }

    #[test]
    fn test_load_values_missing_file() {
        let err = load_values(Path::new("/nonexistent/values.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read values file"));
    }
}
