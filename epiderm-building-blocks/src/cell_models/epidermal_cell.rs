use crate::cell_building_blocks::lineage::{BehaviorModule, LineageRules};

use epiderm_concepts::{
    CellType, Differentiation, Division, DivisionError, InconsistentState, InvalidArgument,
    LineageAgent, Position, Size,
};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Checks that a diameter is usable as a division trigger.
fn validate_diameter(diameter: f64) -> Result<f64, InvalidArgument> {
    if diameter >= 0.0 && diameter.is_finite() {
        Ok(diameter)
    } else {
        Err(InvalidArgument(format!(
            "diameter must be non-negative and finite but is {diameter}"
        )))
    }
}

/// Applies [validate_diameter] to deserialized cells.
fn deserialize_diameter<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let diameter = f64::deserialize(deserializer)?;
    validate_diameter(diameter).map_err(serde::de::Error::custom)
}

/// A single epidermal cell.
///
/// The differentiation type and the attached [BehaviorModule] are only changed together
/// (see [Differentiation::set_cell_type]).
/// Position and diameter are owned by the mechanics engine and merely read by the lineage rules.
///
/// ```
/// # use epiderm_building_blocks::prelude::*;
/// # use epiderm_concepts::*;
/// let mut cell = CellAgent::new([10.0, 20.0, 0.0].into(), 2.0, CellType::Stem).unwrap();
/// assert_eq!(cell.cell_type_code(), 1);
/// assert!(cell.can_divide());
///
/// cell.set_cell_type(CellType::TransitAmplifying);
/// assert_eq!(cell.behavior().cell_type(), CellType::TransitAmplifying);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CellAgent {
    position: Vector3<f64>,
    #[serde(deserialize_with = "deserialize_diameter")]
    diameter: f64,
    cell_type: CellType,
    can_divide: bool,
    behavior: BehaviorModule,
    rules: LineageRules,
}

impl CellAgent {
    /// Creates a new cell which is allowed to divide and uses the default [LineageRules].
    pub fn new(
        position: Vector3<f64>,
        diameter: f64,
        cell_type: CellType,
    ) -> Result<Self, InvalidArgument> {
        Self::with_rules(position, diameter, cell_type, LineageRules::default())
    }

    /// Same as [CellAgent::new] but with custom thresholds.
    pub fn with_rules(
        position: Vector3<f64>,
        diameter: f64,
        cell_type: CellType,
        rules: LineageRules,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            position,
            diameter: validate_diameter(diameter)?,
            cell_type,
            can_divide: true,
            behavior: rules.module_for(cell_type),
            rules,
        })
    }

    /// Creates a new cell from the integer code of its type
    /// (1=Stem, 2=TransitAmplifying, 3=Differentiated).
    pub fn from_code(
        position: Vector3<f64>,
        diameter: f64,
        code: i32,
    ) -> Result<Self, InvalidArgument> {
        Self::new(position, diameter, CellType::from_code(code)?)
    }

    /// Builder-style setter for the divisibility flag.
    pub fn with_can_divide(self, can_divide: bool) -> Self {
        Self { can_divide, ..self }
    }

    /// The attached behavior module.
    pub fn behavior(&self) -> &BehaviorModule {
        &self.behavior
    }

    /// The rules from which behavior modules are selected on a change of type.
    pub fn rules(&self) -> &LineageRules {
        &self.rules
    }

    /// Integer code of the differentiation type.
    pub fn cell_type_code(&self) -> i32 {
        self.cell_type.code()
    }

    /// Sets the differentiation type from its integer code.
    pub fn set_cell_type_code(&mut self, code: i32) -> Result<(), InvalidArgument> {
        self.set_cell_type(CellType::from_code(code)?);
        Ok(())
    }
}

impl Differentiation for CellAgent {
    fn cell_type(&self) -> CellType {
        self.cell_type
    }

    fn set_cell_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        self.behavior = self.rules.module_for(cell_type);
    }

    fn can_divide(&self) -> bool {
        self.can_divide
    }

    fn set_can_divide(&mut self, can_divide: bool) {
        self.can_divide = can_divide;
    }
}

impl Position<Vector3<f64>> for CellAgent {
    fn pos(&self) -> Vector3<f64> {
        self.position
    }

    fn set_pos(&mut self, pos: &Vector3<f64>) {
        self.position = *pos;
    }
}

impl Size for CellAgent {
    fn diameter(&self) -> f64 {
        self.diameter
    }

    fn set_diameter(&mut self, diameter: f64) -> Result<(), InvalidArgument> {
        self.diameter = validate_diameter(diameter)?;
        Ok(())
    }
}

impl Division for CellAgent {
    /// The daughter is placed at the position of the mother and copies all of its state,
    /// including the divisibility flag. Separating both cells is up to the mechanics engine.
    fn divide(&self) -> Result<Self, DivisionError> {
        if !self.can_divide {
            return Err(DivisionError(format!(
                "{} cell at {:?} is not allowed to divide",
                self.cell_type,
                self.position.as_slice()
            )));
        }
        Ok(self.clone())
    }
}

impl LineageAgent for CellAgent {
    type Behavior = BehaviorModule;

    fn behavior(&self) -> &BehaviorModule {
        &self.behavior
    }

    /// The attached module must be the one which the stored rules select for the type.
    fn check_consistency(&self) -> Result<(), InconsistentState> {
        if self.behavior == self.rules.module_for(self.cell_type) {
            Ok(())
        } else {
            Err(InconsistentState(format!(
                "cell of type {} (code {}) carries {:?} which differs from its rules",
                self.cell_type,
                self.cell_type.code(),
                self.behavior
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use epiderm_concepts::{Lineage, LineageError};

    fn cell(cell_type: CellType, diameter: f64) -> CellAgent {
        CellAgent::new(Vector3::from([1.0, 2.0, 0.0]), diameter, cell_type).unwrap()
    }

    #[test]
    fn rejects_invalid_diameter() {
        assert!(CellAgent::new(Vector3::zeros(), -0.1, CellType::Stem).is_err());
        assert!(CellAgent::new(Vector3::zeros(), f64::INFINITY, CellType::Stem).is_err());
        let mut c = cell(CellType::Stem, 2.0);
        assert!(c.set_diameter(f64::NAN).is_err());
        assert_eq!(c.diameter(), 2.0);
    }

    #[test]
    fn type_codes() {
        let mut c = CellAgent::from_code(Vector3::zeros(), 1.0, 2).unwrap();
        assert_eq!(c.cell_type(), CellType::TransitAmplifying);
        assert!(c.set_cell_type_code(0).is_err());
        assert_eq!(c.cell_type_code(), 2);
        c.set_cell_type_code(3).unwrap();
        assert_eq!(c.behavior().cell_type(), CellType::Differentiated);
    }

    #[test]
    fn type_change_keeps_rules() {
        let mut rules = LineageRules::default();
        rules.transit_amplifying.self_renewal_diameter = 3.0;
        let mut c = CellAgent::with_rules(Vector3::zeros(), 1.0, CellType::Stem, rules).unwrap();
        c.set_cell_type(CellType::TransitAmplifying);
        match c.behavior() {
            BehaviorModule::TransitAmplifying(ta) => assert_eq!(ta.self_renewal_diameter, 3.0),
            other => panic!("unexpected behavior {other:?}"),
        }
    }

    #[test]
    fn divide_copies_mother() {
        let mother = cell(CellType::TransitAmplifying, 6.5);
        let daughter = mother.divide().unwrap();
        assert_eq!(daughter, mother);
        assert!(cell(CellType::Stem, 1.0)
            .with_can_divide(false)
            .divide()
            .is_err());
    }

    #[test]
    fn stem_self_renewal() {
        let mut mother = cell(CellType::Stem, 4.0);
        let daughter = mother.run().unwrap().unwrap();
        assert_eq!(daughter.cell_type(), CellType::Stem);
        assert!(daughter.can_divide());
        assert!(mother.can_divide());
        assert_eq!(mother.cell_type(), CellType::Stem);
        assert_eq!(daughter.pos(), mother.pos());
    }

    #[test]
    fn stem_commitment() {
        let mut mother = cell(CellType::Stem, 6.0);
        let daughter = mother.run().unwrap().unwrap();
        assert_eq!(daughter.cell_type(), CellType::TransitAmplifying);
        assert_eq!(daughter.behavior().cell_type(), CellType::TransitAmplifying);
        assert!(daughter.can_divide());
        assert_eq!(mother.cell_type(), CellType::Stem);
    }

    #[test]
    fn stem_arrest_is_permanent() {
        let mut mother = cell(CellType::Stem, 8.0);
        assert!(mother.run().unwrap().is_none());
        assert!(!mother.can_divide());
        for d in [0.5, 4.0, 6.0, 9.0] {
            mother.set_diameter(d).unwrap();
            assert!(mother.run().unwrap().is_none());
        }
    }

    #[test]
    fn transit_amplifying_rules() {
        let mut mother = cell(CellType::TransitAmplifying, 7.0);
        let d = mother.run().unwrap().unwrap();
        assert_eq!(d.cell_type(), CellType::TransitAmplifying);

        let mut mother = cell(CellType::TransitAmplifying, 9.0);
        let d = mother.run().unwrap().unwrap();
        assert_eq!(d.cell_type(), CellType::Differentiated);
        assert!(d.can_divide());

        let mut mother = cell(CellType::TransitAmplifying, 11.0);
        assert!(mother.run().unwrap().is_none());
        assert!(!mother.can_divide());
    }

    #[test]
    fn differentiated_is_idempotent() {
        for d in [0.0, 5.0, 10.0, 10.1, 50.0] {
            let mut c = cell(CellType::Differentiated, d);
            assert!(c.run().unwrap().is_none());
            let after_first = c.clone();
            assert!(c.run().unwrap().is_none());
            assert_eq!(c, after_first);
            assert_eq!(c.cell_type(), CellType::Differentiated);
        }
    }

    #[test]
    fn mismatched_behavior_is_reported() {
        let json = serde_json::to_string(&cell(CellType::Stem, 2.0)).unwrap();
        let tampered = json.replacen("\"cell_type\":1", "\"cell_type\":2", 1);
        let mut c: CellAgent = serde_json::from_str(&tampered).unwrap();
        let before = c.clone();
        assert!(matches!(c.run(), Err(LineageError::InconsistentState(_))));
        assert_eq!(c, before);
    }

    #[test]
    fn mismatched_thresholds_are_reported() {
        let mut json = serde_json::to_value(cell(CellType::Stem, 2.0)).unwrap();
        json["behavior"]["Stem"]["self_renewal_diameter"] = serde_json::json!(1.0);
        let mut c: CellAgent = serde_json::from_value(json).unwrap();
        assert_eq!(c.behavior().cell_type(), CellType::Stem);
        let before = c.clone();
        assert!(matches!(c.run(), Err(LineageError::InconsistentState(_))));
        assert_eq!(c, before);
    }

    #[test]
    fn deserialization_validates_diameter() {
        let mut json = serde_json::to_value(cell(CellType::Stem, 2.0)).unwrap();
        json["diameter"] = serde_json::json!(-3.0);
        assert!(serde_json::from_value::<CellAgent>(json.clone()).is_err());
        json["diameter"] = serde_json::json!(4.5);
        let c: CellAgent = serde_json::from_value(json).unwrap();
        assert_eq!(c.diameter(), 4.5);
    }
}
