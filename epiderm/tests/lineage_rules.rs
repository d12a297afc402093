use epiderm::prelude::*;

fn cell(cell_type: CellType, diameter: f64) -> CellAgent {
    CellAgent::new([3.0, 4.0, 0.0].into(), diameter, cell_type).unwrap()
}

fn check_division(cell_type: CellType, diameter: f64, daughter_type: CellType) {
    let mut mother = cell(cell_type, diameter);
    let daughter = mother.run().unwrap().unwrap();
    assert_eq!(daughter.cell_type(), daughter_type);
    assert!(daughter.can_divide());
    assert_eq!(daughter.behavior().cell_type(), daughter_type);
    assert_eq!(daughter.pos(), mother.pos());
    assert_eq!(daughter.diameter(), mother.diameter());
    assert_eq!(mother.cell_type(), cell_type);
    assert!(mother.can_divide());
}

fn check_arrest(cell_type: CellType, diameter: f64) {
    let mut mother = cell(cell_type, diameter);
    assert!(mother.run().unwrap().is_none());
    assert!(!mother.can_divide());
    // Once arrested, the cell never divides again
    for d in [0.0, 4.0, 6.0, 9.0, 20.0] {
        mother.set_diameter(d).unwrap();
        assert!(mother.run().unwrap().is_none());
        assert!(!mother.can_divide());
        assert_eq!(mother.cell_type(), cell_type);
    }
}

#[test]
fn stem_cells() {
    check_division(CellType::Stem, 0.0, CellType::Stem);
    check_division(CellType::Stem, 4.99, CellType::Stem);
    check_division(CellType::Stem, 5.0, CellType::TransitAmplifying);
    check_division(CellType::Stem, 7.99, CellType::TransitAmplifying);
    check_arrest(CellType::Stem, 8.0);
    check_arrest(CellType::Stem, 100.0);
}

#[test]
fn transit_amplifying_cells() {
    check_division(CellType::TransitAmplifying, 2.0, CellType::TransitAmplifying);
    check_division(CellType::TransitAmplifying, 7.99, CellType::TransitAmplifying);
    check_division(CellType::TransitAmplifying, 8.0, CellType::Differentiated);
    check_division(CellType::TransitAmplifying, 9.99, CellType::Differentiated);
    check_arrest(CellType::TransitAmplifying, 10.0);
}

#[test]
fn differentiated_cells_never_divide() {
    for diameter in [0.0, 4.0, 9.0, 10.0, 10.5, 30.0] {
        let mut c = cell(CellType::Differentiated, diameter);
        let before = c.clone();
        for _ in 0..3 {
            assert!(c.run().unwrap().is_none());
            assert_eq!(c.cell_type_code(), 3);
        }
        assert_eq!(c, before);
    }
}

#[test]
fn custom_thresholds() {
    let rules: LineageRules = serde_json::from_str(
        r#"{ "stem": { "self_renewal_diameter": 1.0, "commitment_diameter": 2.0 } }"#,
    )
    .unwrap();
    assert_eq!(rules.transit_amplifying, TransitAmplifying::default());

    let mut mother = CellAgent::with_rules([0.0; 3].into(), 1.5, CellType::Stem, rules).unwrap();
    let daughter = mother.run().unwrap().unwrap();
    assert_eq!(daughter.cell_type(), CellType::TransitAmplifying);
    assert_eq!(daughter.rules(), &rules);
    mother.set_diameter(2.0).unwrap();
    assert!(mother.run().unwrap().is_none());
    assert!(!mother.can_divide());
}

#[test]
fn type_codes_are_validated() {
    assert!(CellAgent::from_code([0.0; 3].into(), 1.0, 0).is_err());
    assert!(CellAgent::from_code([0.0; 3].into(), 1.0, 4).is_err());
    let mut c = CellAgent::from_code([0.0; 3].into(), 1.0, 1).unwrap();
    assert!(c.set_cell_type_code(-1).is_err());
    assert_eq!(c.cell_type(), CellType::Stem);
    c.set_cell_type_code(2).unwrap();
    assert_eq!(c.behavior().cell_type(), CellType::TransitAmplifying);
}
