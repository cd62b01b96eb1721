//! Implementations behind each `plantitas` subcommand.
//!
//! Commands work on an in-memory [`PlantCollection`] and write their
//! output to the given sink; loading and saving the record file is done
//! by the caller through [`load_collection`] and [`save_collection`].

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::{AddArgs, SortKey, UpdateArgs};
use crate::clock::Clock;
use crate::collection::PlantCollection;
use crate::db::StoreError;
use crate::models::Plant;

/// Load the record file. A file that does not exist yet is an empty collection.
pub fn load_collection(path: &Path) -> Result<PlantCollection> {
    let mut collection = PlantCollection::new();
    match collection.load_from_file(path) {
        Ok(report) => {
            if !report.is_clean() {
                tracing::warn!(
                    path = %path.display(),
                    skipped = report.skipped.len(),
                    "some plant rows could not be read and were skipped"
                );
            }
        }
        Err(StoreError::FileNotFound { .. }) => {
            tracing::debug!(path = %path.display(), "no plant file yet, starting empty");
        }
        Err(e) => return Err(e).context("failed to load plants"),
    }
    Ok(collection)
}

/// Save the collection, creating the parent directory if needed.
pub fn save_collection(collection: &PlantCollection, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    collection
        .save_to_file(path)
        .context("failed to save plants")
}

pub fn run_list(
    out: &mut dyn Write,
    collection: &PlantCollection,
    clock: &dyn Clock,
    due: bool,
    sort: Option<SortKey>,
    ids: bool,
) -> Result<()> {
    let today = clock.today();

    // Keep original positions so printed indexes stay valid for other commands.
    let mut rows: Vec<(usize, &Plant)> = collection
        .iter()
        .enumerate()
        .filter(|(_, p)| !due || p.is_watering_needed(today))
        .collect();
    match sort {
        Some(SortKey::Name) => rows.sort_by(|a, b| a.1.cmp_by_name(b.1)),
        Some(SortKey::Watered) => rows.sort_by_key(|(_, p)| p.last_watering_date()),
        Some(SortKey::Interval) => rows.sort_by_key(|(_, p)| p.watering_interval()),
        None => {}
    }

    if rows.is_empty() {
        writeln!(out, "No se encontraron plantas")?;
        return Ok(());
    }

    for (index, plant) in rows {
        if ids {
            writeln!(out, "{index}, '{}'", plant.name())?;
        } else {
            let marker = if plant.is_watering_needed(today) { " *" } else { "" };
            writeln!(out, "[{index}] {plant}{marker}")?;
        }
    }
    Ok(())
}

pub fn run_show(
    out: &mut dyn Write,
    collection: &PlantCollection,
    clock: &dyn Clock,
    index: usize,
) -> Result<()> {
    let plant = collection.get(index)?;
    let today = clock.today();
    writeln!(out, "Nombre: '{}'", plant.name())?;
    writeln!(out, "Riego cada: {} días", plant.watering_interval())?;
    writeln!(out, "Notas: {}", plant.notes())?;
    writeln!(out, "Plantada: {}", plant.planted_date())?;
    writeln!(out, "Último riego: {}", plant.last_watering_date())?;
    writeln!(out, "Próximo riego: {}", plant.next_watering_date())?;
    writeln!(out, "{}", plant.watering_info(today))?;
    Ok(())
}

/// Add a plant; returns its index.
pub fn run_add(
    out: &mut dyn Write,
    collection: &mut PlantCollection,
    clock: &dyn Clock,
    args: AddArgs,
) -> Result<usize> {
    let today = clock.today();
    let plant = Plant::new(
        args.name,
        args.interval,
        args.notes,
        args.planted.unwrap_or(today),
        args.last_watered.unwrap_or(today),
    )
    .context("invalid plant")?;

    writeln!(out, "Planta agregada: {plant}")?;
    collection.add(plant);
    Ok(collection.len() - 1)
}

/// Water one plant, or every plant that is due; returns how many were watered.
pub fn run_water(
    out: &mut dyn Write,
    collection: &mut PlantCollection,
    clock: &dyn Clock,
    index: Option<usize>,
    all_due: bool,
) -> Result<usize> {
    let today = clock.today();

    let targets: Vec<usize> = match (index, all_due) {
        (Some(index), false) => vec![index],
        (None, true) => collection
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_watering_needed(today))
            .map(|(i, _)| i)
            .collect(),
        _ => bail!("indica un índice o --all-due"),
    };

    for &index in &targets {
        let plant = collection.get_mut(index)?;
        plant.water_now(today);
        writeln!(out, "Planta regada: '{}'", plant.name())?;
    }
    if targets.is_empty() {
        writeln!(out, "Ninguna planta necesita riego")?;
    }
    Ok(targets.len())
}

/// Apply corrective edits. Nothing is changed if any edit is invalid.
pub fn run_update(
    out: &mut dyn Write,
    collection: &mut PlantCollection,
    args: UpdateArgs,
) -> Result<()> {
    if args.is_empty() {
        writeln!(out, "No se proporcionaron cambios para actualizar")?;
        return Ok(());
    }

    let mut plant = collection.get(args.index)?.clone();
    if let Some(name) = args.name {
        plant.set_name(name)?;
    }
    if let Some(interval) = args.interval {
        plant.set_watering_interval(interval)?;
    }
    if let Some(notes) = args.notes {
        plant.set_notes(notes)?;
    }
    // Move the bound that relaxes the range first so valid combined edits pass.
    match (args.planted, args.last_watered) {
        (Some(planted), Some(watered)) if planted <= plant.planted_date() => {
            plant.set_planted_date(planted)?;
            plant.set_last_watering_date(watered)?;
        }
        (Some(planted), Some(watered)) => {
            plant.set_last_watering_date(watered)?;
            plant.set_planted_date(planted)?;
        }
        (Some(planted), None) => plant.set_planted_date(planted)?,
        (None, Some(watered)) => plant.set_last_watering_date(watered)?,
        (None, None) => {}
    }

    writeln!(out, "Planta {} actualizada: {plant}", args.index)?;
    *collection.get_mut(args.index)? = plant;
    Ok(())
}

pub fn run_remove(
    out: &mut dyn Write,
    collection: &mut PlantCollection,
    index: usize,
) -> Result<Plant> {
    let plant = collection
        .remove_at(index)
        .with_context(|| format!("no se encontró planta con índice {index}"))?;
    writeln!(out, "Planta '{}' removida", plant.name())?;
    Ok(plant)
}
