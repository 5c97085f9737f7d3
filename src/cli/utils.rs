use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::favorites::{Asset, FavoriteAsset};

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

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

pub fn output_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per asset: kind, id and description
pub fn output_asset_list(user_id: &str, assets: &[Asset]) {
    if assets.is_empty() {
        println!("No favorites for user {}", user_id);
        return;
    }

    println!("Favorites for user {} ({}):", user_id, assets.len());
    for line in assets.iter().map(asset_line) {
        println!("  {}", line);
    }
}

fn asset_line(asset: &Asset) -> String {
    let detail = match asset {
        Asset::Chart(chart) => format!(" [{}; {} points]", chart.title, chart.data.len()),
        Asset::Insight(_) => String::new(),
        Asset::Audience(audience) => format!(
            " [{}, {}, {}]",
            audience.gender, audience.age_group, audience.birth_country
        ),
    };
    format!("{:<8} {:<12} {}{}", asset.kind(), asset.id(), asset.description(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{Chart, Insight};

    #[test]
    fn asset_line_includes_variant_details() {
        let chart = Asset::Chart(Chart {
            id: "1".into(),
            description: "Stock trends".into(),
            title: "Tech".into(),
            axes_titles: vec!["Time".into(), "Price".into()],
            data: vec![3500, 3600],
        });
        let line = asset_line(&chart);
        assert!(line.starts_with("chart"));
        assert!(line.contains("Stock trends [Tech; 2 points]"));

        let insight = Asset::Insight(Insight { id: "2".into(), description: "note".into() });
        assert!(asset_line(&insight).trim_end().ends_with("note"));
    }
}
