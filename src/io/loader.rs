// src/io/loader.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::model::entity::{Entity, EntityKind};
use crate::model::geo::Coordinates;

const STOCK_PREFIX: &str = "stock_";
const FLOOR_PREFIX: &str = "min_stock_";

/// Reads hospitals or suppliers from CSV.
///
/// Expected columns: `name`, `coordinates` (`"lat, lon"`), one `stock_<P>` per
/// product and optionally `min_stock_<P>`. Hospitals get a floor entry for every
/// stocked product (0 when the min column is missing); suppliers only get the
/// floors they declare. Other columns (e.g. `production_<P>`) are ignored. Empty numeric
/// cells read as 0.
pub fn load_entities<R: Read>(reader: R, kind: EntityKind) -> Result<Vec<Entity>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();

    let name_col = column(&headers, "name")?;
    let coord_col = column(&headers, "coordinates")?;

    let mut stock_cols = Vec::new();
    let mut floor_cols = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(product) = header.strip_prefix(FLOOR_PREFIX) {
            floor_cols.push((product.to_string(), i));
        } else if let Some(product) = header.strip_prefix(STOCK_PREFIX) {
            stock_cols.push((product.to_string(), i));
        }
    }
    if let Some((orphan, _)) = floor_cols
        .iter()
        .find(|(product, _)| !stock_cols.iter().any(|(p, _)| p == product))
    {
        bail!("column '{FLOOR_PREFIX}{orphan}' has no matching '{STOCK_PREFIX}{orphan}' column");
    }

    let mut entities = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = record.with_context(|| format!("failed to read CSV line {line}"))?;

        let name = record.get(name_col).unwrap_or_default().to_string();
        let coordinates = parse_coordinates(record.get(coord_col).unwrap_or_default())
            .with_context(|| format!("line {line} ('{name}'): bad coordinates"))?;

        let mut entity = Entity::new(name.clone(), kind, coordinates);
        for (product, col) in &stock_cols {
            let stock = parse_quantity(record.get(*col))
                .with_context(|| format!("line {line} ('{name}'): bad {STOCK_PREFIX}{product}"))?;
            entity.inventory.insert(product.clone(), stock);
            if kind == EntityKind::Hospital {
                entity.floor.insert(product.clone(), 0);
            }
        }
        for (product, col) in &floor_cols {
            let floor = parse_quantity(record.get(*col))
                .with_context(|| format!("line {line} ('{name}'): bad {FLOOR_PREFIX}{product}"))?;
            entity.floor.insert(product.clone(), floor);
        }

        entities.push(entity);
    }

    tracing::info!(kind = ?kind, count = entities.len(), "entities_loaded");
    Ok(entities)
}

pub fn load_entities_from_path(path: &Path, kind: EntityKind) -> Result<Vec<Entity>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    load_entities(file, kind).with_context(|| format!("failed to load {}", path.display()))
}

fn column(headers: &csv::StringRecord, wanted: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == wanted)
        .ok_or_else(|| anyhow!("missing required column '{wanted}'"))
}

fn parse_quantity(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value
            .parse::<u32>()
            .with_context(|| format!("'{value}' is not a non-negative integer")),
    }
}

/// Parses `"lat, lon"`; whitespace around either number is ignored.
pub fn parse_coordinates(raw: &str) -> Result<Coordinates> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'lat, lon', got '{raw}'"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude '{lat}'"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("bad longitude '{lon}'"))?;
    Ok(Coordinates::new(lat, lon)?)
}
