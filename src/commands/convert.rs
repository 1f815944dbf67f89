//! Convert command: catalog CSV to the legacy JavaScript bingo-list module.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::catalog::{load_catalog, Catalog};

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Catalog CSV path
    pub input: PathBuf,
    /// JavaScript output path
    pub output: PathBuf,
}

/// Objective record in the legacy JavaScript field layout. Restriction ids
/// are emitted as strings, as the downstream generator expects.
#[derive(Serialize)]
struct LegacyObjective<'a> {
    name: &'a str,
    types: &'a [String],
    id: u32,
    #[serde(rename = "SuppTags")]
    supp_tags: &'a [String],
    #[serde(rename = "Restrictions")]
    restrictions: Vec<String>,
}

/// Execute the convert command
pub fn execute_convert(options: ConvertOptions) -> Result<()> {
    let catalog = load_catalog(&options.input)?;
    let script = render_bingo_list(&catalog)?;
    std::fs::write(&options.output, script)?;

    println!(
        "{} Converted {} objectives to {}",
        style("✓").green(),
        catalog.len(),
        options.output.display()
    );
    Ok(())
}

fn render_bingo_list(catalog: &Catalog) -> Result<String> {
    let max_classification = catalog.classifications().into_iter().max().unwrap_or(0);

    let mut blocks: Vec<String> = Vec::new();
    for classification in 1..=max_classification {
        let objectives = catalog.objectives(classification);
        if objectives.is_empty() {
            blocks.push(format!("bingoList[{}] = [];", classification));
            continue;
        }
        let rows: Vec<LegacyObjective<'_>> = objectives
            .iter()
            .map(|o| LegacyObjective {
                name: &o.name,
                types: &o.core_tags,
                id: o.id,
                supp_tags: &o.supp_tags,
                restrictions: o.restrictions.iter().map(u32::to_string).collect(),
            })
            .collect();
        blocks.push(format!(
            "bingoList[{}] = {};",
            classification,
            serde_json::to_string_pretty(&rows)?
        ));
    }

    Ok(format!(
        "var bingoGenerator = require(\"./generators/generator_bases/srl_generator_v5.js\");\n\
         var bingoList = [];\n\n{}\n",
        blocks.join("\n\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Objective;

    #[test]
    fn test_render_emits_empty_blocks_for_gaps() {
        let mut catalog = Catalog::new();
        catalog.insert(
            1,
            Objective {
                id: 10,
                name: "First".to_string(),
                core_tags: vec!["Reveal".to_string()],
                supp_tags: vec![],
                restrictions: vec![20],
            },
        );
        catalog.insert(3, Objective::name_only("Third"));

        let script = render_bingo_list(&catalog).unwrap();
        assert!(script.starts_with("var bingoGenerator = require"));
        assert!(script.contains("bingoList[1] = ["));
        assert!(script.contains("bingoList[2] = [];"));
        assert!(script.contains("bingoList[3] = ["));
        assert!(script.contains("\"Restrictions\": [\n      \"20\"\n    ]"));
    }
}
