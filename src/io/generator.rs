// src/io/generator.rs

use anyhow::{ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::model::entity::Entity;
use crate::model::geo::Coordinates;

/// Parameters for a synthetic supply network.
#[derive(Debug, Clone)]
pub struct NetworkSpec {
    pub hospitals: usize,
    pub suppliers: usize,
    pub products: Vec<String>,
    /// Centre of the region, as (lat, lon).
    pub center: (f64, f64),
    /// Standard deviation of entity positions around the centre, in degrees.
    pub spread_deg: f64,
    pub seed: u64,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        Self {
            hospitals: 4,
            suppliers: 2,
            products: ["Gloves", "Masks", "Ventilators", "Syringes", "Bandages"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            center: (52.37, 4.90), // Amsterdam
            spread_deg: 0.5,
            seed: 42,
        }
    }
}

/// Builds a reproducible network: the same spec always yields the same
/// entities.
///
/// Hospitals get stock in 10..=500 against floors in 50..=200, so roughly a
/// quarter of their products start short. Suppliers hold 100..=1000 of every
/// product and declare no floor.
pub fn generate_network(spec: &NetworkSpec) -> Result<Vec<Entity>> {
    ensure!(
        spec.spread_deg.is_finite() && spec.spread_deg >= 0.0,
        "spread must be a non-negative number of degrees"
    );
    let center = Coordinates::new(spec.center.0, spec.center.1)
        .context("network centre is not a valid coordinate")?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let lat_dist = Normal::new(center.latitude(), spec.spread_deg)?;
    let lon_dist = Normal::new(center.longitude(), spec.spread_deg)?;

    let scatter = |rng: &mut StdRng| -> Result<Coordinates> {
        // Clamp so a wide spread can never leave the valid range.
        let lat = lat_dist.sample(rng).clamp(-90.0, 90.0);
        let lon = lon_dist.sample(rng).clamp(-180.0, 180.0);
        Ok(Coordinates::new(lat, lon)?)
    };

    let mut entities = Vec::with_capacity(spec.hospitals + spec.suppliers);

    for i in 1..=spec.hospitals {
        let mut hospital = Entity::hospital(format!("Hospital {i}"), scatter(&mut rng)?);
        for product in &spec.products {
            let stock = rng.gen_range(10..=500);
            let floor = rng.gen_range(50..=200);
            hospital = hospital.with_stock_and_floor(product.clone(), stock, floor);
        }
        entities.push(hospital);
    }

    for i in 1..=spec.suppliers {
        let mut supplier = Entity::supplier(format!("Supplier {i}"), scatter(&mut rng)?);
        for product in &spec.products {
            supplier = supplier.with_stock(product.clone(), rng.gen_range(100..=1000));
        }
        entities.push(supplier);
    }

    tracing::debug!(
        hospitals = spec.hospitals,
        suppliers = spec.suppliers,
        products = spec.products.len(),
        seed = spec.seed,
        "network_generated"
    );

    Ok(entities)
}
