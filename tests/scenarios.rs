use supply_relief::model::{distance_km, Coordinates, Entity, NetworkModel};
use supply_relief::resolution::{
    build_candidates, detect, ResolutionEngine, ResolverConfig, Shortage, UnresolvedShortage,
};
use supply_relief::strategy::{AllocationStrategy, GreedyEfficiency};
use supply_relief::{ResolveError, Result};

fn at(lat: f64, lon: f64) -> Coordinates {
    Coordinates::new(lat, lon).expect("test coordinates are valid")
}

#[test]
fn nearby_large_supplier_covers_hospital_alone() -> Result<()> {
    let mut network = NetworkModel::new(vec![
        Entity::hospital("H", at(52.37, 4.90)).with_stock_and_floor("A", 50, 100),
        Entity::supplier("S1", at(52.39, 4.92)).with_stock("A", 200),
        Entity::supplier("S2", at(52.38, 4.80)).with_stock("A", 10),
    ])?;

    let shortages = detect(network.entities());
    assert_eq!(
        shortages,
        vec![Shortage {
            entity: "H".into(),
            product: "A".into(),
            deficit: 50
        }]
    );

    let candidates = build_candidates(&shortages[0], network.entities())?;
    let s1 = candidates.iter().find(|c| c.donor == "S1").expect("S1 listed");
    let s2 = candidates.iter().find(|c| c.donor == "S2").expect("S2 listed");
    assert!(s1.cost_per_unit() < s2.cost_per_unit());

    let report = ResolutionEngine::new(&ResolverConfig::greedy()).run(&mut network)?;
    let plan = &report.plans[0];
    assert_eq!(plan.assignments.len(), 1);
    assert_eq!(plan.assignments[0].donor, "S1");
    assert_eq!(plan.assignments[0].quantity, 50);
    assert_eq!(plan.residual, 0);

    assert_eq!(network.get("H").map(|e| e.stock("A")), Some(100));
    assert_eq!(network.get("S1").map(|e| e.stock("A")), Some(150));
    assert_eq!(network.get("S2").map(|e| e.stock("A")), Some(10));
    Ok(())
}

#[test]
fn no_donor_stock_leaves_shortage_unresolved() -> Result<()> {
    let mut network = NetworkModel::new(vec![
        Entity::hospital("H", at(52.37, 4.90)).with_stock_and_floor("A", 0, 40),
        Entity::hospital("H2", at(52.30, 4.80)).with_stock_and_floor("A", 40, 40),
        Entity::supplier("S", at(52.39, 4.92)).with_stock("A", 0).with_stock("B", 500),
    ])?;

    for config in [ResolverConfig::greedy(), ResolverConfig::exhaustive(Default::default())] {
        let mut network = network.clone();
        let report = ResolutionEngine::new(&config).run(&mut network)?;
        assert!(report.plans[0].assignments.is_empty());
        assert_eq!(report.plans[0].residual, 40);
        assert_eq!(
            report.allocation.unresolved,
            vec![UnresolvedShortage {
                entity: "H".into(),
                product: "A".into(),
                remaining: 40
            }]
        );
        assert!(report.summary_lines()[0].contains("still short by 40"));
    }

    // Nothing moved.
    ResolutionEngine::new(&ResolverConfig::greedy()).run(&mut network)?;
    assert_eq!(network.get("H").map(|e| e.stock("A")), Some(0));
    Ok(())
}

#[test]
fn equal_donors_split_by_name() -> Result<()> {
    let network = NetworkModel::new(vec![
        Entity::hospital("H", at(51.0, 4.0)).with_stock_and_floor("A", 0, 50),
        Entity::supplier("Bravo", at(51.2, 4.1)).with_stock("A", 30),
        Entity::supplier("Alpha", at(51.2, 4.1)).with_stock("A", 30),
    ])?;

    let shortage = &detect(network.entities())[0];
    let candidates = build_candidates(shortage, network.entities())?;
    let plan = GreedyEfficiency::new().allocate(shortage, &candidates)?;

    let split: Vec<_> = plan
        .assignments
        .iter()
        .map(|a| (a.donor.as_str(), a.quantity))
        .collect();
    assert_eq!(split, vec![("Alpha", 30), ("Bravo", 20)]);
    assert_eq!(plan.residual, 0);
    Ok(())
}

#[test]
fn exhaustive_refuses_twenty_five_candidates_without_cap() -> Result<()> {
    let mut entities = vec![Entity::hospital("H", at(50.0, 5.0)).with_stock_and_floor("A", 0, 10)];
    for i in 0..25 {
        let offset = f64::from(i) * 0.01;
        entities.push(Entity::supplier(format!("S{i:02}"), at(50.0 + offset, 5.0)).with_stock("A", 1));
    }
    let mut network = NetworkModel::new(entities)?;

    let err = ResolutionEngine::new(&ResolverConfig::exhaustive(Default::default()))
        .run(&mut network)
        .unwrap_err();
    assert_eq!(err, ResolveError::TooManyCandidates { count: 25, cap: 20 });
    Ok(())
}

#[test]
fn latitude_beyond_pole_is_invalid() {
    let err = distance_km((91.0, 0.0), (0.0, 0.0)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0
        }
    );
}
