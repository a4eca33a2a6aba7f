use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use flora_codec::Format;
use flora_plants::{AgeCategory, Plant, PlantCatalog, PlantType};

/// A file loaded into a bounded catalog.
pub struct Loaded {
    pub catalog: PlantCatalog,
    /// Rows the line format could not parse.
    pub skipped: usize,
    /// Valid plants that did not fit in the catalog.
    pub dropped: usize,
}

fn resolve_format(path: &Path, explicit: Option<Format>) -> Result<Format> {
    explicit
        .or_else(|| Format::from_path(path))
        .ok_or_else(|| anyhow!("cannot infer format of {}; pass --format", path.display()))
}

pub fn load(path: &Path, format: Option<Format>, max_capacity: usize) -> Result<Loaded> {
    let format = resolve_format(path, format)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let imported = format
        .import(&text)
        .with_context(|| format!("failed to import {}", path.display()))?;

    let mut catalog = PlantCatalog::new(max_capacity)?;
    let total = imported.plants.len();
    let added = catalog.try_add_all(imported.plants);
    tracing::info!(
        path = %path.display(),
        %format,
        added,
        skipped = imported.skipped,
        "file loaded"
    );
    Ok(Loaded {
        catalog,
        skipped: imported.skipped,
        dropped: total - added,
    })
}

pub fn convert(
    input: &Path,
    output: &Path,
    from: Option<Format>,
    to: Option<Format>,
    max_capacity: usize,
    out: &mut impl Write,
) -> Result<()> {
    let loaded = load(input, from, max_capacity)?;
    let to = resolve_format(output, to)?;
    let text = to
        .export(loaded.catalog.iter())
        .context("failed to serialise catalog")?;
    std::fs::write(output, text).with_context(|| format!("failed to write {}", output.display()))?;

    writeln!(
        out,
        "wrote {} plants to {} ({} skipped, {} over capacity)",
        loaded.catalog.size(),
        output.display(),
        loaded.skipped,
        loaded.dropped
    )?;
    Ok(())
}

pub fn stats(input: &Path, from: Option<Format>, max_capacity: usize, out: &mut impl Write) -> Result<()> {
    let loaded = load(input, from, max_capacity)?;
    let catalog = &loaded.catalog;

    writeln!(out, "{}", catalog.aggregate())?;
    writeln!(out, "by type:")?;
    for plant_type in PlantType::ALL {
        let n = catalog.find_by_type(plant_type).len();
        if n > 0 {
            writeln!(out, "  {plant_type}: {n}")?;
        }
    }
    writeln!(out, "by age category:")?;
    for category in [AgeCategory::Young, AgeCategory::Adult, AgeCategory::Old] {
        let n = catalog.find_by_age_category(category).len();
        if n > 0 {
            writeln!(out, "  {category}: {n}")?;
        }
    }
    Ok(())
}

/// Search filters; all given filters must match.
#[derive(Debug, Default, Clone)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub plant_type: Option<PlantType>,
    pub age_category: Option<AgeCategory>,
}

impl SearchFilter {
    fn apply<'a>(&self, catalog: &'a PlantCatalog) -> Vec<&'a Plant> {
        let mut hits = match &self.name {
            Some(name) => catalog.find_by_name_substring(name),
            None => catalog.iter().collect(),
        };
        if let Some(plant_type) = self.plant_type {
            hits.retain(|p| p.plant_type() == plant_type);
        }
        if let Some(category) = self.age_category {
            hits.retain(|p| p.age_category() == category);
        }
        hits
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.plant_type.is_none() && self.age_category.is_none()
    }
}

pub fn search(
    input: &Path,
    from: Option<Format>,
    filter: &SearchFilter,
    max_capacity: usize,
    out: &mut impl Write,
) -> Result<()> {
    if filter.is_empty() {
        bail!("give at least one of --name, --type or --age-category");
    }
    let loaded = load(input, from, max_capacity)?;
    let hits = filter.apply(&loaded.catalog);
    if hits.is_empty() {
        writeln!(out, "no plants match")?;
    }
    for plant in hits {
        writeln!(out, "{} [{}]", plant.description(), plant.age_category())?;
    }
    Ok(())
}

/// Strict-parse a single record and describe it.
pub fn check(line: &str, out: &mut impl Write) -> Result<()> {
    let plant = Plant::parse_line(line).context("cannot parse line")?;
    writeln!(out, "{}", plant.description())?;
    writeln!(out, "{}", plant.planting_info())?;
    writeln!(out, "age category: {}", plant.age_category())?;
    writeln!(out, "flowering: {}", plant.is_flowering())?;
    Ok(())
}
